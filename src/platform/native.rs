// mdpick - platform/native.rs
//
// Native selection host backed by `rfd`'s async file dialog.
//
// The OS dialog has no separate attach step; "attached" means the dialog
// has been built and not yet disposed. Dismissing the dialog maps to a
// cancel event. MIME restrictions cannot be expressed natively; only the
// extension list reaches the dialog.

use crate::core::event::SurfaceEvent;
use crate::core::model::{AcceptFilter, SurfaceId};
use crate::core::surface::{ChosenFile, SelectionHost, SelectionSurface};
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::PickerError;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use rfd::{AsyncFileDialog, FileHandle};
use std::cell::Cell;
use std::io;
use std::path::PathBuf;

/// Host that opens the platform file dialog.
#[derive(Debug)]
pub struct NativeHost {
    title: String,
    start_directory: Option<PathBuf>,
    next_id: Cell<u64>,
}

impl NativeHost {
    pub fn new(title: impl Into<String>, start_directory: Option<PathBuf>) -> Self {
        Self {
            title: title.into(),
            start_directory,
            next_id: Cell::new(0),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.dialog_title.clone(), config.start_directory.clone())
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Default for NativeHost {
    fn default() -> Self {
        Self::new(constants::DEFAULT_DIALOG_TITLE, None)
    }
}

impl SelectionHost for NativeHost {
    type Surface = NativeSurface;

    fn create_surface(&self, filter: &AcceptFilter) -> NativeSurface {
        let id = SurfaceId(self.next_id.get() + 1);
        self.next_id.set(id.0);

        let extensions = filter.bare_extensions();
        let mut dialog = AsyncFileDialog::new()
            .set_title(self.title.as_str())
            .add_filter(constants::FILTER_LABEL, extensions.as_slice());
        if let Some(ref dir) = self.start_directory {
            dialog = dialog.set_directory(dir);
        }

        tracing::debug!(
            surface = %id,
            extensions = ?filter.extensions,
            mime_types = ?filter.mime_types,
            "Native dialog prepared (MIME types are advisory only)"
        );

        NativeSurface {
            id,
            dialog: Some(dialog),
            attached: false,
        }
    }
}

/// One prepared native dialog.
pub struct NativeSurface {
    id: SurfaceId,
    dialog: Option<AsyncFileDialog>,
    attached: bool,
}

impl SelectionSurface for NativeSurface {
    type File = NativeFile;

    fn id(&self) -> SurfaceId {
        self.id
    }

    fn attach(&mut self) -> Result<(), PickerError> {
        if self.dialog.is_none() {
            return Err(PickerError::HostUnavailable {
                reason: format!("{} was already disposed", self.id),
            });
        }
        check_display()?;
        self.attached = true;
        Ok(())
    }

    fn activate(&mut self) -> LocalBoxFuture<'static, Option<SurfaceEvent<NativeFile>>> {
        let Some(dialog) = self.dialog.take() else {
            return future::ready(None).boxed_local();
        };
        async move {
            match dialog.pick_file().await {
                Some(handle) => Some(SurfaceEvent::Change(vec![NativeFile::new(handle)])),
                None => Some(SurfaceEvent::Cancel),
            }
        }
        .boxed_local()
    }

    fn dispose(&mut self) {
        if self.attached {
            tracing::debug!(surface = %self.id, "Native dialog released");
        }
        self.dialog = None;
        self.attached = false;
    }
}

/// A file chosen in the native dialog.
pub struct NativeFile {
    name: String,
    handle: FileHandle,
}

impl NativeFile {
    fn new(handle: FileHandle) -> Self {
        Self {
            name: handle.file_name(),
            handle,
        }
    }
}

impl ChosenFile for NativeFile {
    fn name(&self) -> &str {
        &self.name
    }

    /// Reads through the handle's path. `FileHandle::read` maps I/O errors
    /// to an empty buffer, which would turn an unreadable file into an
    /// empty selection.
    fn read_bytes(&self) -> LocalBoxFuture<'_, io::Result<Vec<u8>>> {
        future::ready(std::fs::read(self.handle.path())).boxed_local()
    }
}

/// Linux dialogs need a graphical session; fail early instead of letting
/// the portal call report a silent cancel.
#[cfg(target_os = "linux")]
fn check_display() -> Result<(), PickerError> {
    let has_display = ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()));
    if has_display {
        Ok(())
    } else {
        Err(PickerError::HostUnavailable {
            reason: "no graphical session (DISPLAY and WAYLAND_DISPLAY are unset)".to_string(),
        })
    }
}

#[cfg(not(target_os = "linux"))]
fn check_display() -> Result<(), PickerError> {
    Ok(())
}
