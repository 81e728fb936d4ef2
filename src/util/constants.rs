// mdpick - util/constants.rs
//
// Single source of truth for named constants, the fixed accept policy,
// and configuration defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "mdpick";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "mdpick";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Accept policy
// =============================================================================

/// File extensions accepted by the picker, including the leading dot.
///
/// Existing callers depend on this exact list; do not make it configurable.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".md", ".markdown"];

/// MIME types accepted by the picker.
pub const ACCEPTED_MIME_TYPES: &[&str] = &["text/markdown", "text/x-markdown", "text/plain"];

/// Filter label shown by native dialogs that group extensions under a name.
pub const FILTER_LABEL: &str = "Markdown";

/// Byte-order mark stripped from the front of decoded content.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// =============================================================================
// Dialog
// =============================================================================

/// Default title for the native selection dialog.
pub const DEFAULT_DIALOG_TITLE: &str = "Open Markdown file";

/// Maximum accepted length of a configured dialog title (characters).
pub const MAX_DIALOG_TITLE_LEN: usize = 256;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Process exit codes
// =============================================================================

/// No file was obtained (cancelled, empty selection, or unreadable file).
pub const EXIT_NO_SELECTION: i32 = 1;

/// The selection could not be written to its destination.
pub const EXIT_OUTPUT_FAILED: i32 = 2;
