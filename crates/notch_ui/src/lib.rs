//! notch_ui - slider handle components
//!
//! This crate provides the focusable handle a slider positions along its
//! track. Handles run against an injected [`FocusEnvironment`]: the
//! headless [`MemoryEnvironment`] everywhere, and the DOM-backed
//! `WebEnvironment` on wasm32.

mod callback;
mod constants;
mod environment;
mod error;
mod event;
mod handle;
mod node;
mod props;
mod style;
mod subscription;

#[cfg(target_arch = "wasm32")]
mod web;

pub use callback::{Callback, SideEffect};
pub use constants::{click_focused_class, DEFAULT_PREFIX_CLS};
pub use environment::{ElementId, FocusEnvironment, ListenerId, MemoryEnvironment, MouseUpListener};
pub use error::{HandleError, Result};
pub use event::{
    FocusEvent, HandleEvent, Key, KeyboardEvent, Modifiers, MouseButton, MouseEvent, Point,
};
pub use handle::{Handle, HandleControl, HandleRef};
pub use node::HandleNode;
pub use props::{HandleConfig, HandleProps, TabIndex};
pub use style::{format_number, Axis, Edge, Position, Style, Translate};
pub use subscription::Subscription;

#[cfg(target_arch = "wasm32")]
pub use web::WebEnvironment;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::environment::{FocusEnvironment, MemoryEnvironment};
    pub use crate::event::{FocusEvent, HandleEvent, Key, KeyboardEvent, MouseEvent, Point};
    pub use crate::handle::{Handle, HandleControl, HandleRef};
    pub use crate::props::{HandleConfig, HandleProps, TabIndex};
    pub use crate::style::Style;
}
