// mdpick - platform/scripted.rs
//
// In-memory selection host for the test suite. Keeps a record of every
// surface it has created, disposed ones included, so tests can observe
// attachment history and fire user events by hand.

use crate::core::event::{terminal_event, EventListeners, SurfaceEvent};
use crate::core::model::{AcceptFilter, SurfaceId};
use crate::core::surface::{ChosenFile, SelectionHost, SelectionSurface};
use crate::util::error::PickerError;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

// =============================================================================
// Chosen files
// =============================================================================

/// A file a scripted user can choose.
#[derive(Debug, Clone)]
pub struct ScriptedFile {
    name: String,
    contents: Result<Vec<u8>, (io::ErrorKind, String)>,
}

impl ScriptedFile {
    /// File whose bytes are the UTF-8 encoding of `text`.
    pub fn text(name: impl Into<String>, text: &str) -> Self {
        Self::bytes(name, text.as_bytes().to_vec())
    }

    pub fn bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            contents: Ok(bytes),
        }
    }

    /// File whose read always fails with `kind`.
    pub fn unreadable(name: impl Into<String>, kind: io::ErrorKind) -> Self {
        Self {
            name: name.into(),
            contents: Err((kind, "scripted read failure".to_string())),
        }
    }
}

impl ChosenFile for ScriptedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes(&self) -> LocalBoxFuture<'_, io::Result<Vec<u8>>> {
        let result = match &self.contents {
            Ok(bytes) => Ok(bytes.clone()),
            Err((kind, msg)) => Err(io::Error::new(*kind, msg.clone())),
        };
        future::ready(result).boxed_local()
    }
}

// =============================================================================
// Document tree
// =============================================================================

struct SurfaceRecord {
    id: SurfaceId,
    filter: AcceptFilter,
    hidden: bool,
    attached: bool,
    listeners: Option<EventListeners<ScriptedFile>>,
}

#[derive(Default)]
struct Document {
    next_id: u64,
    surfaces: Vec<SurfaceRecord>,
    unavailable: Option<String>,
}

impl Document {
    fn record(&self, id: SurfaceId) -> Option<&SurfaceRecord> {
        self.surfaces.iter().find(|r| r.id == id)
    }

    fn record_mut(&mut self, id: SurfaceId) -> Option<&mut SurfaceRecord> {
        self.surfaces.iter_mut().find(|r| r.id == id)
    }

    fn detach(&mut self, id: SurfaceId) -> bool {
        match self.record_mut(id) {
            Some(record) => {
                let was_attached = record.attached;
                record.attached = false;
                if let Some(listeners) = record.listeners.take() {
                    listeners.clear();
                }
                was_attached
            }
            None => false,
        }
    }
}

// =============================================================================
// Host
// =============================================================================

/// Scripted selection host. Clones share the same document tree.
#[derive(Clone, Default)]
pub struct ScriptedHost {
    doc: Rc<RefCell<Document>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose surfaces always fail to attach.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let host = Self::default();
        host.doc.borrow_mut().unavailable = Some(reason.into());
        host
    }

    /// Handles for every surface created so far, oldest first.
    pub fn surfaces(&self) -> Vec<SurfaceHandle> {
        self.doc
            .borrow()
            .surfaces
            .iter()
            .map(|r| self.handle(r.id))
            .collect()
    }

    /// The most recently created surface.
    pub fn latest(&self) -> Option<SurfaceHandle> {
        let id = self.doc.borrow().surfaces.last().map(|r| r.id)?;
        Some(self.handle(id))
    }

    pub fn surface(&self, id: SurfaceId) -> Option<SurfaceHandle> {
        self.doc.borrow().record(id)?;
        Some(self.handle(id))
    }

    /// Ids of the surfaces currently in the document tree.
    pub fn attached_ids(&self) -> Vec<SurfaceId> {
        self.doc
            .borrow()
            .surfaces
            .iter()
            .filter(|r| r.attached)
            .map(|r| r.id)
            .collect()
    }

    pub fn is_attached(&self, id: SurfaceId) -> bool {
        self.doc.borrow().record(id).is_some_and(|r| r.attached)
    }

    /// Remove a surface from the tree without any user event, as a host
    /// would on navigation. Returns false if it was not attached.
    pub fn detach_externally(&self, id: SurfaceId) -> bool {
        self.doc.borrow_mut().detach(id)
    }

    fn handle(&self, id: SurfaceId) -> SurfaceHandle {
        SurfaceHandle {
            id,
            doc: Rc::clone(&self.doc),
        }
    }
}

impl SelectionHost for ScriptedHost {
    type Surface = ScriptedSurface;

    fn create_surface(&self, filter: &AcceptFilter) -> ScriptedSurface {
        let mut doc = self.doc.borrow_mut();
        doc.next_id += 1;
        let id = SurfaceId(doc.next_id);
        doc.surfaces.push(SurfaceRecord {
            id,
            filter: filter.clone(),
            hidden: true,
            attached: false,
            listeners: None,
        });
        ScriptedSurface {
            id,
            doc: Rc::clone(&self.doc),
        }
    }
}

// =============================================================================
// Surface
// =============================================================================

/// Surface owned by a picker session.
pub struct ScriptedSurface {
    id: SurfaceId,
    doc: Rc<RefCell<Document>>,
}

impl SelectionSurface for ScriptedSurface {
    type File = ScriptedFile;

    fn id(&self) -> SurfaceId {
        self.id
    }

    fn attach(&mut self) -> Result<(), PickerError> {
        let mut doc = self.doc.borrow_mut();
        if let Some(reason) = doc.unavailable.clone() {
            return Err(PickerError::HostUnavailable { reason });
        }
        match doc.record_mut(self.id) {
            Some(record) => {
                record.attached = true;
                Ok(())
            }
            None => Err(PickerError::HostUnavailable {
                reason: format!("{} is not known to this host", self.id),
            }),
        }
    }

    fn activate(&mut self) -> LocalBoxFuture<'static, Option<SurfaceEvent<ScriptedFile>>> {
        let (listeners, event) = terminal_event();
        match self.doc.borrow_mut().record_mut(self.id) {
            Some(record) if record.attached => record.listeners = Some(listeners),
            _ => listeners.clear(),
        }
        event.boxed_local()
    }

    fn dispose(&mut self) {
        self.doc.borrow_mut().detach(self.id);
    }
}

// =============================================================================
// Scripted user
// =============================================================================

/// Test-side view of one surface: inspect it and act as the user.
#[derive(Clone)]
pub struct SurfaceHandle {
    id: SurfaceId,
    doc: Rc<RefCell<Document>>,
}

impl SurfaceHandle {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn is_attached(&self) -> bool {
        self.doc.borrow().record(self.id).is_some_and(|r| r.attached)
    }

    pub fn is_hidden(&self) -> bool {
        self.doc.borrow().record(self.id).is_some_and(|r| r.hidden)
    }

    /// True while change/cancel handlers are bound and nothing has fired.
    pub fn is_armed(&self) -> bool {
        self.listeners().is_some_and(|l| l.is_armed())
    }

    pub fn accept_filter(&self) -> Option<AcceptFilter> {
        self.doc.borrow().record(self.id).map(|r| r.filter.clone())
    }

    /// Choose `file`. Returns whether the event reached a handler.
    pub fn choose(&self, file: ScriptedFile) -> bool {
        self.listeners().is_some_and(|l| l.on_change(vec![file]))
    }

    /// Confirm the surface with an empty file list.
    pub fn choose_nothing(&self) -> bool {
        self.listeners().is_some_and(|l| l.on_change(Vec::new()))
    }

    /// Dismiss the surface.
    pub fn cancel(&self) -> bool {
        self.listeners().is_some_and(|l| l.on_cancel())
    }

    fn listeners(&self) -> Option<EventListeners<ScriptedFile>> {
        self.doc
            .borrow()
            .record(self.id)
            .and_then(|r| r.listeners.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_surface_is_hidden_and_detached() {
        let host = ScriptedHost::new();
        let surface = host.create_surface(&AcceptFilter::markdown());
        let handle = host.surface(surface.id()).unwrap();
        assert!(handle.is_hidden());
        assert!(!handle.is_attached());
        assert_eq!(handle.accept_filter(), Some(AcceptFilter::markdown()));
    }

    #[test]
    fn test_attach_and_dispose() {
        let host = ScriptedHost::new();
        let mut surface = host.create_surface(&AcceptFilter::markdown());
        surface.attach().unwrap();
        assert_eq!(host.attached_ids(), vec![surface.id()]);
        surface.dispose();
        surface.dispose();
        assert!(host.attached_ids().is_empty());
    }

    #[test]
    fn test_events_dropped_after_dispose() {
        let host = ScriptedHost::new();
        let mut surface = host.create_surface(&AcceptFilter::markdown());
        surface.attach().unwrap();
        let _event = surface.activate();
        let handle = host.latest().unwrap();
        assert!(handle.is_armed());
        surface.dispose();
        assert!(!handle.cancel());
        assert!(!handle.choose(ScriptedFile::text("a.md", "x")));
    }

    #[test]
    fn test_unavailable_host_refuses_attach() {
        let host = ScriptedHost::unavailable("no display");
        let mut surface = host.create_surface(&AcceptFilter::markdown());
        let err = surface.attach().unwrap_err();
        assert!(matches!(err, PickerError::HostUnavailable { .. }));
        assert!(!host.is_attached(surface.id()));
    }

    #[test]
    fn test_unreadable_file_errors() {
        let file = ScriptedFile::unreadable("x.md", io::ErrorKind::PermissionDenied);
        let err = file.read_bytes().now_or_never().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
