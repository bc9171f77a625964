//! Log line structure

use super::severity::Severity;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Source location of a logging call
///
/// Captured at compile time through `#[track_caller]`, so building one from a
/// [`Location`] costs nothing beyond copying a pointer and two integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    file: Cow<'static, str>,
    line: u32,
}

impl CallSite {
    pub const UNKNOWN_FILE: &'static str = "unknown";

    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Placeholder used when the location is not available
    pub const fn unknown() -> Self {
        Self {
            file: Cow::Borrowed(Self::UNKNOWN_FILE),
            line: 0,
        }
    }

    /// Location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn is_unknown(&self) -> bool {
        self.line == 0 && self.file == Self::UNKNOWN_FILE
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(location.file()),
            line: location.line(),
        }
    }
}

impl Default for CallSite {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A rendered line travelling from a producer to the drain worker
///
/// Immutable once built: the message already carries any call-site prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    severity: Severity,
    message: String,
}

impl LogLine {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// Build a line whose message is prefixed with `[<file>:<line>] `
    pub fn annotated(severity: Severity, message: &str, site: &CallSite) -> Self {
        Self {
            severity,
            message: format!("[{}] {}", site, message),
        }
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_call_site() {
        let site = CallSite::unknown();
        assert!(site.is_unknown());
        assert_eq!(site.to_string(), "unknown:0");
        assert_eq!(CallSite::default(), site);
    }

    #[test]
    fn test_caller_matches_this_line() {
        let expected_line = line!() + 1;
        let site = CallSite::caller();
        assert_eq!(site.line(), expected_line);
        assert!(site.file().ends_with("log_line.rs"), "got {}", site.file());
        assert!(!site.is_unknown());
    }

    #[test]
    fn test_annotated_line() {
        let site = CallSite::new("src/main.rs", 42);
        let line = LogLine::annotated(Severity::Debug, "trace", &site);
        assert_eq!(line.message(), "[src/main.rs:42] trace");
        assert_eq!(line.severity(), Severity::Debug);
    }

    #[test]
    fn test_plain_line_keeps_message_verbatim() {
        let line = LogLine::new(Severity::Error, "x");
        assert_eq!(line.message(), "x");
        assert_eq!(line.into_message(), "x");
    }
}
