// mdpick - platform/config.rs
//
// Platform directory resolution and config.toml loading with startup
// validation. Uses the `directories` crate for XDG (Linux), AppData
// (Windows), and Library (macOS) compliance.
//
// The accept filter is deliberately absent from the config file.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for mdpick configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/mdpick/ or %APPDATA%\mdpick\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[dialog]` section.
    pub dialog: DialogSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[dialog]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DialogSection {
    /// Title of the native selection dialog.
    pub title: Option<String>,
    /// Directory the dialog opens in.
    pub start_directory: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dialog_title: String,
    pub start_directory: Option<PathBuf>,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dialog_title: constants::DEFAULT_DIALOG_TITLE.to_string(),
            start_directory: None,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from `config_dir`.
///
/// Returns the validated config and a list of non-fatal warnings. A missing
/// file yields defaults with no warnings; an unreadable or unparseable file
/// yields defaults plus a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path,
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: config_path,
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::debug!(path = %config_path.display(), "Loaded config.toml");
    let config = validate(raw, &mut warnings);
    (config, warnings)
}

/// Validate raw values, accumulating a warning per rejected field.
pub fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Dialog: title --
    if let Some(title) = raw.dialog.title {
        let len = title.chars().count();
        if title.trim().is_empty() {
            warnings.push("[dialog] title is empty. Using default.".to_string());
        } else if len > constants::MAX_DIALOG_TITLE_LEN {
            let err = ConfigError::ValueOutOfRange {
                field: "[dialog] title".to_string(),
                value: format!("{len} characters"),
                expected: format!("1-{} characters", constants::MAX_DIALOG_TITLE_LEN),
            };
            warnings.push(format!("{err}. Using default."));
        } else {
            config.dialog_title = title;
        }
    }

    // -- Dialog: start_directory --
    if let Some(dir) = raw.dialog.start_directory {
        let path = PathBuf::from(&dir);
        if !dir.is_empty() && path.is_dir() {
            config.start_directory = Some(path);
        } else if !dir.is_empty() {
            warnings.push(format!(
                "[dialog] start_directory = \"{dir}\" is not a directory. Ignoring."
            ));
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "[logging] level".to_string(),
                value: level,
                expected: constants::VALID_LOG_LEVELS.join(", "),
            };
            warnings.push(format!("{err}. Using default ({}).", constants::DEFAULT_LOG_LEVEL));
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.dialog_title, constants::DEFAULT_DIALOG_TITLE);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_valid_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let start = dir.path().display().to_string().replace('\\', "\\\\");
        fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            format!(
                "[dialog]\ntitle = \"Import notes\"\nstart_directory = \"{start}\"\n\
                 [logging]\nlevel = \"DEBUG\"\n"
            ),
        )
        .unwrap();

        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.dialog_title, "Import notes");
        assert_eq!(config.start_directory.as_deref(), Some(dir.path()));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unparseable_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(constants::CONFIG_FILE_NAME), "[dialog\n").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.dialog_title, constants::DEFAULT_DIALOG_TITLE);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let raw: RawConfig = toml::from_str(
            "[dialog]\ntitle = \"  \"\nstart_directory = \"/definitely/not/here\"\n\
             [logging]\nlevel = \"loud\"\n",
        )
        .unwrap();
        let mut warnings = Vec::new();
        let config = validate(raw, &mut warnings);
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.dialog_title, constants::DEFAULT_DIALOG_TITLE);
        assert!(config.start_directory.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let raw: RawConfig = toml::from_str("[filter]\nextensions = [\".txt\"]\n").unwrap();
        let mut warnings = Vec::new();
        validate(raw, &mut warnings);
        assert!(warnings.is_empty());
    }
}
