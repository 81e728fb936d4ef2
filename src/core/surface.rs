// mdpick - core/surface.rs
//
// Host capability traits. A host presents a native selection surface
// restricted by an `AcceptFilter`, emits exactly one terminal event, and
// reads a chosen file's bytes asynchronously.
//
// Implementations live in the platform layer.

use crate::core::event::SurfaceEvent;
use crate::core::model::{AcceptFilter, SurfaceId};
use crate::util::error::PickerError;
use futures::future::LocalBoxFuture;
use std::io;

/// Source of selection surfaces.
pub trait SelectionHost {
    type Surface: SelectionSurface;

    /// Create a surface configured with `filter`, hidden from visual layout
    /// and not yet attached.
    fn create_surface(&self, filter: &AcceptFilter) -> Self::Surface;
}

/// One ephemeral selection surface.
pub trait SelectionSurface {
    type File: ChosenFile;

    fn id(&self) -> SurfaceId;

    /// Insert the surface into the host's UI tree.
    fn attach(&mut self) -> Result<(), PickerError>;

    /// Bind the change/cancel handlers and trigger the native interaction.
    ///
    /// The returned future resolves to the first terminal event, or `None`
    /// if the handlers were unbound before anything fired.
    fn activate(&mut self) -> LocalBoxFuture<'static, Option<SurfaceEvent<Self::File>>>;

    /// Remove the surface from the tree and unbind its handlers.
    /// Must be idempotent.
    fn dispose(&mut self);
}

/// A file delivered by a change event.
pub trait ChosenFile {
    fn name(&self) -> &str;

    /// Read the file's full contents.
    fn read_bytes(&self) -> LocalBoxFuture<'_, io::Result<Vec<u8>>>;
}
