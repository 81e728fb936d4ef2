// mdpick - app/import.rs
//
// Emits a picked selection as raw text or JSON, to stdout or a file.

use crate::core::model::SelectionResult;
use crate::util::error::ImportError;
use std::io::Write;
use std::path::Path;

/// How a selection is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The decoded content, unchanged.
    #[default]
    Text,
    /// Pretty-printed `{ "name": ..., "content": ... }`.
    Json,
}

/// Render `result` in `format`.
pub fn render(result: &SelectionResult, format: OutputFormat) -> Result<String, ImportError> {
    match format {
        OutputFormat::Text => Ok(result.content.clone()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).map_err(|source| ImportError::Json { source })
        }
    }
}

/// Write the rendered selection to `writer`.
pub fn emit<W: Write>(
    result: &SelectionResult,
    format: OutputFormat,
    mut writer: W,
    dest: &Path,
) -> Result<(), ImportError> {
    let rendered = render(result, format)?;
    writer
        .write_all(rendered.as_bytes())
        .and_then(|()| {
            if format == OutputFormat::Json {
                writer.write_all(b"\n")?;
            }
            writer.flush()
        })
        .map_err(|source| ImportError::Io {
            path: dest.to_path_buf(),
            source,
        })
}

/// Create (or truncate) `path` and write the rendered selection to it.
pub fn write_to(
    path: &Path,
    result: &SelectionResult,
    format: OutputFormat,
) -> Result<(), ImportError> {
    let file = std::fs::File::create(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    emit(result, format, std::io::BufWriter::new(file), path)?;
    tracing::info!(path = %path.display(), file = %result.name, "Selection written");
    Ok(())
}
