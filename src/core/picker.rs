// mdpick - core/picker.rs
//
// The file picker. Each `open_picker` call owns its own session: it creates,
// attaches, awaits and disposes its surface without touching any other
// invocation's surface. Disposal runs from the session's `Drop`, so it
// happens on every exit path, including when the caller drops the future.
//
// Every failure collapses to `None`. Only read/decode failures and host
// attach failures are logged (at WARN).

use crate::core::event::SurfaceEvent;
use crate::core::model::{AcceptFilter, PickerState, SelectionResult, SurfaceId};
use crate::core::surface::{ChosenFile, SelectionHost, SelectionSurface};
use crate::util::constants;
use crate::util::error::PickerError;
use futures::lock::Mutex;
use std::cell::Cell;
use std::rc::Rc;

/// How overlapping invocations on the same picker interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerPolicy {
    /// Each invocation runs its own surface; none affects another.
    #[default]
    Independent,
    /// Invocations queue; the next surface is created only after the
    /// previous invocation settles.
    Serialized,
}

/// Markdown file picker over a selection host.
pub struct FilePicker<H: SelectionHost> {
    host: H,
    filter: AcceptFilter,
    policy: PickerPolicy,
    turn: Mutex<()>,
    active: Rc<Cell<usize>>,
}

impl<H: SelectionHost> FilePicker<H> {
    pub fn new(host: H) -> Self {
        Self::with_policy(host, PickerPolicy::default())
    }

    pub fn with_policy(host: H, policy: PickerPolicy) -> Self {
        Self {
            host,
            filter: AcceptFilter::markdown(),
            policy,
            turn: Mutex::new(()),
            active: Rc::new(Cell::new(0)),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn policy(&self) -> PickerPolicy {
        self.policy
    }

    /// Number of sessions whose surface is currently attached.
    pub fn active_sessions(&self) -> usize {
        self.active.get()
    }

    /// Run one round of user-driven selection and text decoding.
    ///
    /// Resolves to `None` on cancel, on an empty selection, and when the
    /// chosen file cannot be read or decoded. Never fails.
    pub async fn open_picker(&self) -> Option<SelectionResult> {
        let _turn = match self.policy {
            PickerPolicy::Serialized => Some(self.turn.lock().await),
            PickerPolicy::Independent => None,
        };

        let surface = self.host.create_surface(&self.filter);
        let mut session = PickerSession::new(surface, Rc::clone(&self.active));
        session.run().await
    }
}

/// One invocation's surface plus its lifecycle state.
struct PickerSession<S: SelectionSurface> {
    surface: S,
    state: PickerState,
    attached: bool,
    active: Rc<Cell<usize>>,
}

impl<S: SelectionSurface> PickerSession<S> {
    fn new(surface: S, active: Rc<Cell<usize>>) -> Self {
        tracing::debug!(surface = %surface.id(), "Picker session created");
        Self {
            surface,
            state: PickerState::Idle,
            attached: false,
            active,
        }
    }

    fn transition(&mut self, next: PickerState) {
        tracing::debug!(
            surface = %self.surface.id(),
            from = self.state.label(),
            to = next.label(),
            "Picker state change"
        );
        self.state = next;
    }

    async fn run(&mut self) -> Option<SelectionResult> {
        let id = self.surface.id();

        if let Err(e) = self.surface.attach() {
            tracing::warn!(surface = %id, error = %e, "Could not present selection surface");
            self.transition(PickerState::Resolved);
            return None;
        }
        self.attached = true;
        self.active.set(self.active.get() + 1);

        let event = self.surface.activate();
        self.transition(PickerState::AwaitingUserDecision);

        let outcome = match event.await {
            Some(SurfaceEvent::Change(files)) => {
                if files.len() > 1 {
                    tracing::debug!(
                        surface = %id,
                        count = files.len(),
                        "Multiple files delivered; using the first"
                    );
                }
                match files.first() {
                    Some(file) => read_selection(id, file).await,
                    None => {
                        tracing::debug!(surface = %id, "Change event carried no file");
                        None
                    }
                }
            }
            Some(SurfaceEvent::Cancel) => {
                tracing::debug!(surface = %id, "Selection cancelled");
                None
            }
            None => {
                tracing::debug!(surface = %id, "Surface torn down before any event");
                None
            }
        };

        self.transition(PickerState::Resolved);
        outcome
    }
}

impl<S: SelectionSurface> Drop for PickerSession<S> {
    fn drop(&mut self) {
        self.surface.dispose();
        if self.attached {
            self.active.set(self.active.get().saturating_sub(1));
        }
        tracing::debug!(
            surface = %self.surface.id(),
            state = self.state.label(),
            "Picker session disposed"
        );
    }
}

async fn read_selection<F: ChosenFile>(id: SurfaceId, file: &F) -> Option<SelectionResult> {
    let name = file.name().to_string();
    let result = match file.read_bytes().await {
        Ok(bytes) => decode_text(&name, bytes),
        Err(source) => Err(PickerError::Read {
            name: name.clone(),
            source,
        }),
    };

    match result {
        Ok(content) => {
            tracing::info!(surface = %id, file = %name, bytes = content.len(), "File selected");
            Some(SelectionResult { name, content })
        }
        Err(e) => {
            tracing::warn!(surface = %id, error = %e, "Failed to read selected file");
            None
        }
    }
}

/// Decode file bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode_text(name: &str, mut bytes: Vec<u8>) -> Result<String, PickerError> {
    if bytes.starts_with(constants::UTF8_BOM) {
        bytes.drain(..constants::UTF8_BOM.len());
    }
    String::from_utf8(bytes).map_err(|source| PickerError::InvalidEncoding {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_utf8() {
        assert_eq!(decode_text("a.md", b"# Hi".to_vec()).unwrap(), "# Hi");
    }

    #[test]
    fn test_decode_strips_bom() {
        let mut bytes = constants::UTF8_BOM.to_vec();
        bytes.extend_from_slice("café".as_bytes());
        assert_eq!(decode_text("a.md", bytes).unwrap(), "café");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_text("bad.md", vec![0x23, 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, PickerError::InvalidEncoding { ref name, .. } if name == "bad.md"));
    }

    #[test]
    fn test_decode_empty_file() {
        assert_eq!(decode_text("empty.md", Vec::new()).unwrap(), "");
    }

    #[test]
    fn test_default_policy_is_independent() {
        assert_eq!(PickerPolicy::default(), PickerPolicy::Independent);
    }
}
