//! Console sink implementation

use crate::core::{LogLine, Result, Sink};
use chrono::format::{Item, StrftimeItems};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Write};

/// Standard stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Writes each line to stdout or stderr
///
/// Plain output by default: just the message and a newline. A local
/// timestamp prefix and severity colors can be switched on.
pub struct ConsoleSink {
    target: ConsoleTarget,
    use_colors: bool,
    timestamp_format: Option<String>,
}

impl ConsoleSink {
    /// Timestamp layout matching the classic `date time` log prefix
    pub const DEFAULT_TIMESTAMP_FORMAT: &'static str = "%Y/%m/%d %H:%M:%S";

    pub fn new(target: ConsoleTarget) -> Self {
        Self {
            target,
            use_colors: false,
            timestamp_format: None,
        }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }

    /// Color the message by severity (needs the `console` feature)
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Prefix each line with the local time
    ///
    /// # Example
    ///
    /// ```
    /// use drain_logger::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::stdout().with_timestamps();
    /// ```
    #[must_use]
    pub fn with_timestamps(self) -> Self {
        self.with_custom_timestamp(Self::DEFAULT_TIMESTAMP_FORMAT)
    }

    /// Prefix each line with the local time in a strftime-compatible layout
    ///
    /// A layout chrono cannot parse is replaced by
    /// [`DEFAULT_TIMESTAMP_FORMAT`](Self::DEFAULT_TIMESTAMP_FORMAT).
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        let format_str = if is_valid_timestamp_format(format_str) {
            format_str
        } else {
            eprintln!(
                "[LOGGER WARNING] Invalid timestamp format '{}', using '{}'",
                format_str,
                Self::DEFAULT_TIMESTAMP_FORMAT
            );
            Self::DEFAULT_TIMESTAMP_FORMAT
        };
        self.timestamp_format = Some(format_str.to_string());
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn render(&self, line: &LogLine) -> String {
        let message = self.paint(line);
        match &self.timestamp_format {
            Some(format) => format!("{} {}", chrono::Local::now().format(format), message),
            None => message,
        }
    }

    #[cfg(feature = "console")]
    fn paint(&self, line: &LogLine) -> String {
        if self.use_colors {
            line.message()
                .color(line.severity().color_code())
                .to_string()
        } else {
            line.message().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, line: &LogLine) -> String {
        line.message().to_string()
    }
}

fn is_valid_timestamp_format(format_str: &str) -> bool {
    !StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Sink for ConsoleSink {
    fn write_line(&mut self, line: &LogLine) -> Result<()> {
        let output = self.render(line);
        match self.target {
            ConsoleTarget::Stdout => writeln!(io::stdout().lock(), "{}", output)?,
            ConsoleTarget::Stderr => writeln!(io::stderr().lock(), "{}", output)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().flush()?,
            ConsoleTarget::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    #[test]
    fn test_plain_render_is_message_only() {
        let sink = ConsoleSink::stdout();
        let line = LogLine::new(Severity::Warn, "disk at 91%");
        assert_eq!(sink.render(&line), "disk at 91%");
    }

    #[test]
    fn test_custom_timestamp_prefix() {
        let sink = ConsoleSink::stderr().with_custom_timestamp("[fixed]");
        let line = LogLine::new(Severity::App, "hello");
        assert_eq!(sink.render(&line), "[fixed] hello");
    }

    #[test]
    fn test_invalid_timestamp_falls_back_to_default() {
        let sink = ConsoleSink::stdout().with_custom_timestamp("%Q %Y");
        assert_eq!(
            sink.timestamp_format.as_deref(),
            Some(ConsoleSink::DEFAULT_TIMESTAMP_FORMAT)
        );

        let rendered = sink.render(&LogLine::new(Severity::Error, "still written"));
        assert!(rendered.ends_with(" still written"));
    }

    #[test]
    fn test_timestamp_format_validation() {
        assert!(is_valid_timestamp_format(ConsoleSink::DEFAULT_TIMESTAMP_FORMAT));
        assert!(is_valid_timestamp_format("%d/%b/%Y:%H:%M:%S %z"));
        assert!(!is_valid_timestamp_format("%Q"));
        assert!(!is_valid_timestamp_format("trailing %"));
    }

    #[test]
    fn test_default_targets_stderr() {
        assert_eq!(ConsoleSink::default().target(), ConsoleTarget::Stderr);
    }
}
