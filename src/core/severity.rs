//! Severity tiers used both to filter and to label log lines

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity of a log line.
///
/// Ascending order means increasing verbosity: `Fatal` is the most severe
/// tier and `Internal` the most verbose. A line passes a threshold when its
/// severity is less than or equal to the threshold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Severity {
    Fatal = 0,
    #[default]
    Error = 1,
    Warn = 2,
    App = 3,
    Debug = 4,
    Internal = 5,
}

impl Severity {
    /// All tiers, most severe first
    pub const ALL: [Severity; 6] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::App,
        Severity::Debug,
        Severity::Internal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::App => "APP",
            Severity::Debug => "DEBUG",
            Severity::Internal => "INTERNAL",
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode the integer form. Values past the last tier saturate to `Internal`.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Fatal,
            1 => Severity::Error,
            2 => Severity::Warn,
            3 => Severity::App,
            4 => Severity::Debug,
            _ => Severity::Internal,
        }
    }

    /// Whether a line of this severity is emitted under `threshold`
    #[inline]
    pub fn is_enabled_at(self, threshold: Severity) -> bool {
        self <= threshold
    }

    /// Whether a threshold this verbose prefixes lines with their call site
    #[inline]
    pub fn annotates_call_site(self) -> bool {
        self >= Severity::Debug
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Fatal => BrightRed,
            Severity::Error => Red,
            Severity::Warn => Yellow,
            Severity::App => Green,
            Severity::Debug => Blue,
            Severity::Internal => BrightBlack,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FATAL" => Ok(Severity::Fatal),
            "ERROR" => Ok(Severity::Error),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "APP" => Ok(Severity::App),
            "DEBUG" => Ok(Severity::Debug),
            "INTERNAL" => Ok(Severity::Internal),
            _ => Err(LoggerError::invalid_severity(s)),
        }
    }
}
