//! Crate-level error types.

use std::fmt;

/// Errors produced by the orrery crate.
///
/// Only setup paths are fallible; the per-frame update contains its own
/// anomalies and never returns an error.
#[derive(Debug)]
pub enum OrreryError {
    /// The render backend reported no drawable surface at startup.
    MissingSurface,
    /// A body in the initial catalog failed validation.
    InvalidBody(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for OrreryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSurface => {
                write!(f, "no render surface available; frame loop not started")
            }
            Self::InvalidBody(msg) => write!(f, "invalid body: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for OrreryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrreryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
