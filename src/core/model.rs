// mdpick - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.

use crate::util::constants;
use serde::Serialize;
use std::fmt;

// =============================================================================
// Selection result
// =============================================================================

/// The decoded text of a user-chosen file and its original file name.
///
/// Produced at most once per picker invocation and owned by the caller
/// afterwards. Carries no backing resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    /// File name as reported by the host (no directory component).
    pub name: String,

    /// Full file content decoded as UTF-8.
    pub content: String,
}

// =============================================================================
// Accept filter
// =============================================================================

/// Extension and MIME restrictions applied to a selection surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptFilter {
    /// Extensions with their leading dot, e.g. `.md`.
    pub extensions: Vec<&'static str>,

    /// MIME types, e.g. `text/markdown`.
    pub mime_types: Vec<&'static str>,
}

impl AcceptFilter {
    /// The fixed Markdown policy every picker invocation uses.
    pub fn markdown() -> Self {
        Self {
            extensions: constants::ACCEPTED_EXTENSIONS.to_vec(),
            mime_types: constants::ACCEPTED_MIME_TYPES.to_vec(),
        }
    }

    /// Comma-joined accept string: extensions first, then MIME types.
    pub fn accept_attribute(&self) -> String {
        self.extensions
            .iter()
            .chain(self.mime_types.iter())
            .copied()
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Extensions without their leading dot, as native dialogs expect them.
    pub fn bare_extensions(&self) -> Vec<&'static str> {
        self.extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect()
    }
}

// =============================================================================
// Surface identity and lifecycle
// =============================================================================

/// Host-assigned identifier of a selection surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// Per-invocation lifecycle of a picker session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    /// `open_picker` was called; no surface attached yet.
    Idle,
    /// Surface attached and activated; waiting on change or cancel.
    AwaitingUserDecision,
    /// Terminal: the invocation has settled.
    Resolved,
}

impl PickerState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingUserDecision => "awaiting",
            Self::Resolved => "resolved",
        }
    }
}
