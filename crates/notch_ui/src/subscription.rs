//! Scoped ownership of document-level listeners.

use std::rc::Rc;

use crate::environment::{FocusEnvironment, ListenerId, MouseUpListener};
use crate::error::Result;

/// A registered document listener, removed when the guard is cancelled or
/// dropped.
///
/// Removal happens exactly once however the owner goes away: explicit
/// [`cancel`](Subscription::cancel), ordinary drop or unwinding.
pub struct Subscription<E: FocusEnvironment + ?Sized> {
    env: Rc<E>,
    id: Option<ListenerId>,
}

impl<E: FocusEnvironment + ?Sized> Subscription<E> {
    /// Register `listener` for mouse release anywhere in `env`.
    pub fn mouse_up(env: &Rc<E>, listener: MouseUpListener) -> Result<Self> {
        let id = env.add_mouse_up_listener(listener)?;
        log::debug!("acquired mouse up listener {:?}", id);
        Ok(Self {
            env: Rc::clone(env),
            id: Some(id),
        })
    }

    /// Whether the listener is still registered through this guard.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Remove the listener now. Later calls and the eventual drop do nothing.
    pub fn cancel(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if self.env.remove_mouse_up_listener(id) {
            log::debug!("released mouse up listener {:?}", id);
        } else {
            log::warn!("mouse up listener {:?} was already gone", id);
        }
    }
}

impl<E: FocusEnvironment + ?Sized> Drop for Subscription<E> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<E: FocusEnvironment + ?Sized> std::fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
