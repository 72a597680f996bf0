//! Handlers a handle's owner attaches to it.
//!
//! A handle reports `mousedown`, `blur` and `keydown` to its parent through
//! a [`Callback`] per event. The handle updates its own click focus first
//! and then calls the callback, whose return value becomes the parent's
//! message. An unset callback means the parent did not ask for that event.
//!
//! [`SideEffect`] is the other direction: the redraw hook a handle fires when
//! the document `mouseup` listener flips its click focus.
//!
//! ```
//! use notch_ui::{Callback, Key, KeyboardEvent};
//!
//! let on_key_down: Callback<KeyboardEvent, Key> = Callback::new(|e: KeyboardEvent| e.key);
//! assert_eq!(on_key_down.call(KeyboardEvent::new(Key::Home)), Some(Key::Home));
//!
//! let unset: Callback<KeyboardEvent, Key> = Callback::none();
//! assert_eq!(unset.call(KeyboardEvent::new(Key::Home)), None);
//! ```

use std::fmt;

/// An optional handler that turns a handle event into a parent message.
///
/// - `T`: the event payload (`MouseEvent`, `FocusEvent` or `KeyboardEvent`)
/// - `M`: the message type the owner understands, e.g. a slider's
///   drag-start or key message
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Wrap a handler function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// A callback with no handler attached.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Invoke the handler, returning its message if one is attached.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

// =============================================================================
// Side-effect Callback (SideEffect)
// =============================================================================

/// Redraw hook passed to `Handle::mount_with`.
///
/// The document `mouseup` listener runs outside any event the owner
/// dispatched, so the owner cannot see the click focus change in a return
/// value. The handle emits this instead, once per actual change of the
/// flag, and the owner renders again. Clearing click focus on blur or key
/// down also emits it.
pub struct SideEffect {
    f: Option<Box<dyn Fn()>>,
}

impl SideEffect {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    pub fn none() -> Self {
        Self { f: None }
    }

    /// Run the side effect, if one is attached.
    pub fn emit(&self) {
        if let Some(ref f) = self.f {
            f();
        }
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl Default for SideEffect {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for SideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffect")
            .field("set", &self.is_some())
            .finish()
    }
}
