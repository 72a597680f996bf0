//! The document a component lives in.
//!
//! Components never touch a global document. Everything they need from the
//! host (element creation, focus, the active element and document-level
//! mouse release) goes through [`FocusEnvironment`], so a handle can run
//! against a real DOM (`WebEnvironment` on wasm32)
//! or the headless [`MemoryEnvironment`].

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{HandleError, Result};
use crate::event::MouseEvent;

/// Identifies an element created by an environment.
///
/// Ids are unique across every environment in the process, so a page with
/// several environments never sees two elements share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

static NEXT_ELEMENT: AtomicU64 = AtomicU64::new(0);

impl ElementId {
    /// Hand out the next process-wide element id.
    pub(crate) fn allocate() -> Self {
        Self(NEXT_ELEMENT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies a registered document-level listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Document-level mouse release listener.
///
/// Receives the event and the element holding focus at the moment of
/// dispatch.
pub type MouseUpListener = Rc<dyn Fn(&MouseEvent, Option<ElementId>)>;

/// Host services a component needs.
///
/// All methods take `&self`: an environment is shared by every component
/// mounted in it and uses interior mutability, like a document does.
pub trait FocusEnvironment {
    /// Create a new focusable element.
    fn create_element(&self) -> Result<ElementId>;

    /// Detach an element. Removing an unknown element is a no-op.
    fn remove_element(&self, id: ElementId);

    /// Move focus to `id`.
    fn focus(&self, id: ElementId) -> Result<()>;

    /// Remove focus from `id`. Does nothing if `id` is not focused.
    fn blur(&self, id: ElementId) -> Result<()>;

    /// The element currently holding focus.
    fn active_element(&self) -> Option<ElementId>;

    /// Register a listener for mouse release anywhere in the document.
    fn add_mouse_up_listener(&self, listener: MouseUpListener) -> Result<ListenerId>;

    /// Unregister a listener. Returns `false` if it was not registered.
    fn remove_mouse_up_listener(&self, id: ListenerId) -> bool;
}

/// In-process environment with no rendering backend.
///
/// Used by tests and the native demo; mouse releases are injected with
/// [`MemoryEnvironment::dispatch_mouse_up`].
#[derive(Default)]
pub struct MemoryEnvironment {
    elements: RefCell<BTreeSet<ElementId>>,
    active: Cell<Option<ElementId>>,
    next_listener: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, MouseUpListener)>>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a document-level mouse release to every registered listener.
    ///
    /// Listeners run against a snapshot taken before dispatch, so they may
    /// call back into the environment. A listener removed by an earlier
    /// listener in the same dispatch is skipped.
    pub fn dispatch_mouse_up(&self, event: &MouseEvent) {
        let snapshot: Vec<(ListenerId, MouseUpListener)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        log::trace!("dispatching mouse up to {} listeners", snapshot.len());
        for (id, listener) in snapshot {
            if !self.is_listening(id) {
                continue;
            }
            listener(event, self.active.get());
        }
    }

    /// Number of registered document-level listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|(l, _)| *l == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.borrow().contains(&id)
    }
}

impl FocusEnvironment for MemoryEnvironment {
    fn create_element(&self) -> Result<ElementId> {
        let id = ElementId::allocate();
        self.elements.borrow_mut().insert(id);
        Ok(id)
    }

    fn remove_element(&self, id: ElementId) {
        if self.elements.borrow_mut().remove(&id) && self.active.get() == Some(id) {
            self.active.set(None);
        }
    }

    fn focus(&self, id: ElementId) -> Result<()> {
        if !self.contains(id) {
            return Err(HandleError::UnknownElement(id));
        }
        self.active.set(Some(id));
        Ok(())
    }

    fn blur(&self, id: ElementId) -> Result<()> {
        if !self.contains(id) {
            return Err(HandleError::UnknownElement(id));
        }
        if self.active.get() == Some(id) {
            self.active.set(None);
        }
        Ok(())
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active.get()
    }

    fn add_mouse_up_listener(&self, listener: MouseUpListener) -> Result<ListenerId> {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        Ok(id)
    }

    fn remove_mouse_up_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(l, _)| *l != id);
        listeners.len() != before
    }
}

impl fmt::Debug for MemoryEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryEnvironment")
            .field("elements", &self.elements.borrow().len())
            .field("active", &self.active.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Point;

    #[test]
    fn focus_and_blur_track_active_element() {
        let env = MemoryEnvironment::new();
        let a = env.create_element().unwrap();
        let b = env.create_element().unwrap();

        env.focus(a).unwrap();
        assert_eq!(env.active_element(), Some(a));

        // Blurring an element without focus leaves focus alone.
        env.blur(b).unwrap();
        assert_eq!(env.active_element(), Some(a));

        env.blur(a).unwrap();
        assert_eq!(env.active_element(), None);
    }

    #[test]
    fn focus_unknown_element_fails() {
        let env = MemoryEnvironment::new();
        assert_eq!(
            env.focus(ElementId(u64::MAX)),
            Err(HandleError::UnknownElement(ElementId(u64::MAX)))
        );
    }

    #[test]
    fn element_ids_unique_across_environments() {
        let first = MemoryEnvironment::new();
        let second = MemoryEnvironment::new();
        let a = first.create_element().unwrap();
        let b = second.create_element().unwrap();
        assert_ne!(a, b);
        assert!(!first.contains(b));
        assert!(!second.contains(a));
    }

    #[test]
    fn removing_active_element_clears_focus() {
        let env = MemoryEnvironment::new();
        let a = env.create_element().unwrap();
        env.focus(a).unwrap();
        env.remove_element(a);
        assert_eq!(env.active_element(), None);
        assert!(!env.contains(a));
    }

    #[test]
    fn listeners_see_active_element() {
        let env = MemoryEnvironment::new();
        let a = env.create_element().unwrap();
        env.focus(a).unwrap();

        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        env.add_mouse_up_listener(Rc::new(move |_: &MouseEvent, active: Option<ElementId>| {
            sink.set(active)
        }))
        .unwrap();

        env.dispatch_mouse_up(&MouseEvent::primary(Point::default()));
        assert_eq!(seen.get(), Some(a));
    }

    #[test]
    fn remove_listener_once() {
        let env = MemoryEnvironment::new();
        let id = env
            .add_mouse_up_listener(Rc::new(|_: &MouseEvent, _: Option<ElementId>| {}))
            .unwrap();
        assert_eq!(env.listener_count(), 1);
        assert!(env.remove_mouse_up_listener(id));
        assert!(!env.remove_mouse_up_listener(id));
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn listener_removed_mid_dispatch_is_skipped() {
        let env = Rc::new(MemoryEnvironment::new());
        let calls = Rc::new(Cell::new(0));

        // The second listener's id is known ahead of time: ids are sequential.
        let victim = ListenerId(1);
        let remover_env = Rc::downgrade(&env);
        env.add_mouse_up_listener(Rc::new(move |_: &MouseEvent, _: Option<ElementId>| {
            if let Some(env) = remover_env.upgrade() {
                env.remove_mouse_up_listener(victim);
            }
        }))
        .unwrap();

        let counter = Rc::clone(&calls);
        let id = env
            .add_mouse_up_listener(Rc::new(move |_: &MouseEvent, _: Option<ElementId>| {
                counter.set(counter.get() + 1)
            }))
            .unwrap();
        assert_eq!(id, victim);

        env.dispatch_mouse_up(&MouseEvent::primary(Point::default()));
        assert_eq!(calls.get(), 0);
    }
}
