// mdpick - core/event.rs
//
// Single-shot terminal event shared by a surface's change and cancel
// handlers. Whichever handler fires first settles the future; every later
// delivery, and any delivery after `clear`, is dropped.

use futures::channel::oneshot;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// A terminal event emitted by a selection surface.
#[derive(Debug)]
pub enum SurfaceEvent<F> {
    /// The user confirmed the surface. Zero or one files.
    Change(Vec<F>),
    /// The user dismissed the surface without choosing.
    Cancel,
}

/// Create a linked listener/future pair.
pub fn terminal_event<F>() -> (EventListeners<F>, TerminalEvent<F>) {
    let (tx, rx) = oneshot::channel();
    (
        EventListeners {
            slot: Rc::new(RefCell::new(Some(tx))),
        },
        TerminalEvent { rx },
    )
}

/// The change and cancel handlers bound to one surface.
///
/// Clones share the same slot, so a host may hand one clone to each of
/// its event sources.
pub struct EventListeners<F> {
    slot: Rc<RefCell<Option<oneshot::Sender<SurfaceEvent<F>>>>>,
}

impl<F> Clone for EventListeners<F> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<F> EventListeners<F> {
    /// Deliver a change event. Returns false if the latch already settled
    /// or was cleared.
    pub fn on_change(&self, files: Vec<F>) -> bool {
        self.deliver(SurfaceEvent::Change(files))
    }

    /// Deliver a cancel event. Returns false if the latch already settled
    /// or was cleared.
    pub fn on_cancel(&self) -> bool {
        self.deliver(SurfaceEvent::Cancel)
    }

    /// Unbind both handlers. The paired future resolves to `None` if it
    /// had not settled yet.
    pub fn clear(&self) {
        self.slot.borrow_mut().take();
    }

    /// True while no event has been delivered and the handlers are bound.
    pub fn is_armed(&self) -> bool {
        self.slot
            .borrow()
            .as_ref()
            .is_some_and(|tx| !tx.is_canceled())
    }

    fn deliver(&self, event: SurfaceEvent<F>) -> bool {
        match self.slot.borrow_mut().take() {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }
}

/// Future side of the latch.
///
/// Resolves to `Some(event)` for the first delivered event, or `None` when
/// the handlers were cleared before anything fired.
pub struct TerminalEvent<F> {
    rx: oneshot::Receiver<SurfaceEvent<F>>,
}

impl<F> Future for TerminalEvent<F> {
    type Output = Option<SurfaceEvent<F>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(Result::ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[test]
    fn test_first_event_wins() {
        let (listeners, event) = terminal_event::<&str>();
        let cancel = listeners.clone();
        assert!(listeners.on_change(vec!["a.md"]));
        assert!(!cancel.on_cancel());
        assert!(!listeners.is_armed());

        match event.now_or_never() {
            Some(Some(SurfaceEvent::Change(files))) => assert_eq!(files, vec!["a.md"]),
            other => panic!("expected change event, got {other:?}"),
        }
    }

    #[test]
    fn test_cancel_settles() {
        let (listeners, event) = terminal_event::<()>();
        assert!(listeners.on_cancel());
        assert!(matches!(
            event.now_or_never(),
            Some(Some(SurfaceEvent::Cancel))
        ));
    }

    #[test]
    fn test_clear_resolves_none_and_drops_later_events() {
        let (listeners, event) = terminal_event::<()>();
        assert!(listeners.is_armed());
        listeners.clear();
        assert!(!listeners.is_armed());
        assert!(!listeners.on_cancel());
        assert!(matches!(event.now_or_never(), Some(None)));
    }

    #[test]
    fn test_pending_until_delivered() {
        let (listeners, mut event) = terminal_event::<()>();
        assert!((&mut event).now_or_never().is_none());
        listeners.on_cancel();
        assert!(matches!(
            event.now_or_never(),
            Some(Some(SurfaceEvent::Cancel))
        ));
    }

    #[test]
    fn test_dropped_future_disarms_listeners() {
        let (listeners, event) = terminal_event::<()>();
        drop(event);
        assert!(!listeners.is_armed());
        assert!(!listeners.on_cancel());
    }
}
