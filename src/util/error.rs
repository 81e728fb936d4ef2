// mdpick - util/error.rs
//
// Typed errors with context-preserving error chains, one enum per
// subsystem. Picker errors never reach callers of `open_picker`; they exist
// so the diagnostic log entry carries the full causal chain.

use std::fmt;
use std::io;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Picker errors
// ---------------------------------------------------------------------------

/// Failures inside a single picker invocation.
#[derive(Debug)]
pub enum PickerError {
    /// The chosen file's bytes could not be read.
    Read { name: String, source: io::Error },

    /// The chosen file is not valid UTF-8 text.
    InvalidEncoding {
        name: String,
        source: std::string::FromUtf8Error,
    },

    /// The host could not present a selection surface.
    HostUnavailable { reason: String },
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { name, source } => write!(f, "'{name}': read failed: {source}"),
            Self::InvalidEncoding { name, source } => {
                write!(f, "'{name}': invalid UTF-8 encoding: {source}")
            }
            Self::HostUnavailable { reason } => {
                write!(f, "Selection surface unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for PickerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::HostUnavailable { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Import errors
// ---------------------------------------------------------------------------

/// Errors emitting a selection to stdout or a file.
#[derive(Debug)]
pub enum ImportError {
    /// I/O error writing the output file.
    Io { path: PathBuf, source: io::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Output I/O error '{}': {source}", path.display())
            }
            Self::Json { source } => write!(f, "JSON serialisation error: {source}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::ValueOutOfRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_read_error_preserves_source() {
        let err = PickerError::Read {
            name: "notes.md".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("notes.md"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_import_io_error_names_path() {
        let err = ImportError::Io {
            path: PathBuf::from("out.md"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("out.md"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_value_out_of_range_has_no_source() {
        let err = ConfigError::ValueOutOfRange {
            field: "[logging] level".to_string(),
            value: "loud".to_string(),
            expected: "error, warn, info, debug, trace".to_string(),
        };
        assert!(err.source().is_none());
        assert!(err.to_string().contains("loud"));
    }
}
