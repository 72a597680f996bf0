//! The slider handle component.
//!
//! A handle is one focusable element positioned along a slider track. It
//! remembers whether its focus came from a mouse interaction ("click focus")
//! so the owner can style mouse and keyboard focus differently, and forwards
//! mouse-down, blur and key-down to the owning slider.
//!
//! Mouse release is watched at document level for the whole time the handle
//! is mounted: a drag that starts on the handle can end anywhere.
//!
//! ```
//! use std::rc::Rc;
//! use notch_ui::{Handle, HandleProps, MemoryEnvironment, MouseEvent, Point};
//!
//! let env = Rc::new(MemoryEnvironment::new());
//! let handle = Handle::mount(&env, HandleProps::<()>::new().offset(40.0)).unwrap();
//!
//! handle.on_mouse_down(&MouseEvent::primary(Point::default())).unwrap();
//! env.dispatch_mouse_up(&MouseEvent::primary(Point::new(300.0, 0.0)));
//!
//! assert!(handle.is_click_focused());
//! assert!(handle.render().has_class("rc-slider-handle-click-focused"));
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::callback::SideEffect;
use crate::constants::{
    click_focused_class, ARIA_DISABLED, ARIA_VALUEMAX, ARIA_VALUEMIN, ARIA_VALUENOW, ROLE_SLIDER,
};
use crate::environment::{ElementId, FocusEnvironment, MouseUpListener};
use crate::error::{HandleError, Result};
use crate::event::{FocusEvent, HandleEvent, KeyboardEvent, MouseEvent};
use crate::node::{class_names, HandleNode};
use crate::props::HandleProps;
use crate::style::{format_number, Position};
use crate::subscription::Subscription;

/// Attributes the handle controls itself; passthrough values are dropped.
const RESERVED_ATTRIBUTES: [&str; 4] = ["role", "class", "style", "tabindex"];

/// Imperative operations an owner may invoke on a handle.
pub trait HandleControl {
    /// Move focus to the handle without touching click focus.
    fn focus(&self) -> Result<()>;

    /// Remove focus from the handle.
    fn blur(&self) -> Result<()>;

    /// Mark the handle click-focused, then move focus to it.
    fn click_focus(&self) -> Result<()>;
}

/// State shared between a handle and its document listener.
struct Shared<E: FocusEnvironment + ?Sized> {
    env: Rc<E>,
    element: ElementId,
    click_focused: Cell<bool>,
    on_redraw: SideEffect,
}

impl<E: FocusEnvironment + ?Sized> Shared<E> {
    fn set_click_focused(&self, focused: bool) {
        if self.click_focused.replace(focused) != focused {
            log::trace!("handle {} click focus -> {}", self.element, focused);
            self.on_redraw.emit();
        }
    }

    fn handle_mouse_up(&self, active: Option<ElementId>) {
        if active == Some(self.element) {
            self.set_click_focused(true);
        }
    }
}

impl<E: FocusEnvironment + ?Sized> HandleControl for Shared<E> {
    fn focus(&self) -> Result<()> {
        self.env.focus(self.element)
    }

    fn blur(&self) -> Result<()> {
        self.env.blur(self.element)
    }

    fn click_focus(&self) -> Result<()> {
        self.set_click_focused(true);
        self.focus()
    }
}

/// A mounted slider handle.
///
/// Mounting creates the element and registers the document listener;
/// dropping the handle (or calling [`Handle::unmount`]) releases both.
pub struct Handle<E: FocusEnvironment + ?Sized + 'static, M> {
    subscription: Subscription<E>,
    shared: Rc<Shared<E>>,
    props: HandleProps<M>,
}

impl<E: FocusEnvironment + ?Sized + 'static, M> Handle<E, M> {
    /// Mount a handle into `env`.
    pub fn mount(env: &Rc<E>, props: HandleProps<M>) -> Result<Self> {
        Self::mount_with(env, props, SideEffect::none())
    }

    /// Mount a handle, calling `on_redraw` whenever its own state changes.
    ///
    /// Click focus can change from the document listener, outside any event
    /// the owner dispatched; `on_redraw` is how the owner learns about it.
    pub fn mount_with(env: &Rc<E>, props: HandleProps<M>, on_redraw: SideEffect) -> Result<Self> {
        let element = env.create_element()?;
        let shared = Rc::new(Shared {
            env: Rc::clone(env),
            element,
            click_focused: Cell::new(false),
            on_redraw,
        });

        let weak = Rc::downgrade(&shared);
        let listener: MouseUpListener =
            Rc::new(move |_event: &MouseEvent, active: Option<ElementId>| {
                if let Some(shared) = weak.upgrade() {
                    shared.handle_mouse_up(active);
                }
            });
        let subscription = match Subscription::mouse_up(env, listener) {
            Ok(subscription) => subscription,
            Err(e) => {
                env.remove_element(element);
                return Err(e);
            }
        };

        log::debug!("mounted handle {element}");
        Ok(Self {
            subscription,
            shared,
            props,
        })
    }

    /// Tear the handle down now.
    pub fn unmount(self) {
        drop(self);
    }

    pub fn element(&self) -> ElementId {
        self.shared.element
    }

    /// Whether focus was obtained through a mouse interaction.
    pub fn is_click_focused(&self) -> bool {
        self.shared.click_focused.get()
    }

    /// Replace props. Click focus and the subscription carry over.
    pub fn set_props(&mut self, props: HandleProps<M>) {
        self.props = props;
    }

    /// A weak capability the owner can keep for imperative calls.
    pub fn handle_ref(&self) -> HandleRef<E> {
        HandleRef {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Focus the element, then forward to `on_mouse_down`.
    pub fn on_mouse_down(&self, event: &MouseEvent) -> Result<Option<M>> {
        self.focus()?;
        log::trace!("handle {} mouse down", self.shared.element);
        Ok(self.props.on_mouse_down.call(*event))
    }

    /// Clear click focus, then forward to `on_blur`.
    pub fn on_blur(&self, event: &FocusEvent) -> Option<M> {
        self.shared.set_click_focused(false);
        self.props.on_blur.call(*event)
    }

    /// Clear click focus, then forward to `on_key_down`.
    pub fn on_key_down(&self, event: &KeyboardEvent) -> Option<M> {
        self.shared.set_click_focused(false);
        self.props.on_key_down.call(*event)
    }

    /// Route an element event to its handler.
    pub fn on_event(&self, event: &HandleEvent) -> Result<Option<M>> {
        match event {
            HandleEvent::MouseDown(e) => self.on_mouse_down(e),
            HandleEvent::Blur(e) => Ok(self.on_blur(e)),
            HandleEvent::KeyDown(e) => Ok(self.on_key_down(e)),
        }
    }

    /// Describe the element for the current props and state.
    pub fn render(&self) -> HandleNode {
        let props = &self.props;

        let modifier = self
            .is_click_focused()
            .then(|| click_focused_class(&props.prefix_cls));
        let class_name = class_names([props.class_name.as_deref(), modifier.as_deref()]);

        let mut style = props.style.clone();
        style.merge(&Position::compute(props.vertical, props.reverse, props.offset).to_style());

        let mut attributes = props.attributes.clone();
        for reserved in RESERVED_ATTRIBUTES {
            attributes.remove(reserved);
        }
        for (name, value) in [
            (ARIA_VALUEMIN, props.min),
            (ARIA_VALUEMAX, props.max),
            (ARIA_VALUENOW, props.value),
        ] {
            match value {
                Some(v) => attributes.insert(name.to_string(), format_number(v)),
                None => attributes.remove(name),
            };
        }
        attributes.insert(ARIA_DISABLED.to_string(), props.disabled.to_string());

        HandleNode {
            tab_index: props.tab_index.resolve(props.disabled),
            class_name,
            style,
            role: ROLE_SLIDER,
            attributes,
        }
    }
}

impl<E: FocusEnvironment + ?Sized + 'static, M> HandleControl for Handle<E, M> {
    fn focus(&self) -> Result<()> {
        self.shared.focus()
    }

    fn blur(&self) -> Result<()> {
        self.shared.blur()
    }

    fn click_focus(&self) -> Result<()> {
        self.shared.click_focus()
    }
}

impl<E: FocusEnvironment + ?Sized + 'static, M> Drop for Handle<E, M> {
    fn drop(&mut self) {
        self.subscription.cancel();
        self.shared.env.remove_element(self.shared.element);
        log::debug!("unmounted handle {}", self.shared.element);
    }
}

impl<E: FocusEnvironment + ?Sized + 'static, M> fmt::Debug for Handle<E, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("element", &self.shared.element)
            .field("click_focused", &self.is_click_focused())
            .field("subscription", &self.subscription)
            .finish()
    }
}

/// Weak capability to a handle's imperative operations.
///
/// Every call fails with [`HandleError::NotMounted`] once the handle is gone.
pub struct HandleRef<E: FocusEnvironment + ?Sized> {
    shared: Weak<Shared<E>>,
}

impl<E: FocusEnvironment + ?Sized> HandleRef<E> {
    fn upgrade(&self) -> Result<Rc<Shared<E>>> {
        self.shared.upgrade().ok_or(HandleError::NotMounted)
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.strong_count() > 0
    }
}

impl<E: FocusEnvironment + ?Sized> Clone for HandleRef<E> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<E: FocusEnvironment + ?Sized> HandleControl for HandleRef<E> {
    fn focus(&self) -> Result<()> {
        self.upgrade()?.focus()
    }

    fn blur(&self) -> Result<()> {
        self.upgrade()?.blur()
    }

    fn click_focus(&self) -> Result<()> {
        self.upgrade()?.click_focus()
    }
}

impl<E: FocusEnvironment + ?Sized> fmt::Debug for HandleRef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleRef")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironment;
    use crate::event::{Key, Point};
    use crate::props::TabIndex;
    use crate::style::Style;

    const CLICK_FOCUSED: &str = "rc-slider-handle-click-focused";

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Down,
        Blurred,
        Key(Key),
    }

    fn env() -> Rc<MemoryEnvironment> {
        Rc::new(MemoryEnvironment::new())
    }

    fn press() -> MouseEvent {
        MouseEvent::primary(Point::new(10.0, 10.0))
    }

    fn release_elsewhere() -> MouseEvent {
        MouseEvent::primary(Point::new(500.0, 80.0))
    }

    #[test]
    fn mount_registers_single_listener() {
        let env = env();
        let handle = Handle::mount(&env, HandleProps::<Msg>::new()).unwrap();
        assert_eq!(env.listener_count(), 1);
        assert!(env.contains(handle.element()));
        assert!(!handle.is_click_focused());
    }

    #[test]
    fn mouse_down_focuses_before_forwarding() {
        let env = env();
        let observer = Rc::clone(&env);
        let seen_active = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen_active);
        let props = HandleProps::new().on_mouse_down(move |_| {
            sink.set(observer.active_element());
            Msg::Down
        });
        let handle = Handle::mount(&env, props).unwrap();

        let msg = handle.on_mouse_down(&press()).unwrap();
        assert_eq!(msg, Some(Msg::Down));
        assert_eq!(seen_active.get(), Some(handle.element()));
    }

    #[test]
    fn press_then_release_sets_click_focus() {
        let env = env();
        let handle = Handle::mount(&env, HandleProps::<Msg>::new()).unwrap();

        handle.on_mouse_down(&press()).unwrap();
        assert!(!handle.is_click_focused());

        env.dispatch_mouse_up(&release_elsewhere());
        assert!(handle.is_click_focused());
        assert!(handle.render().has_class(CLICK_FOCUSED));
    }

    #[test]
    fn key_down_clears_click_focus() {
        let env = env();
        let props = HandleProps::new().on_key_down(|e| Msg::Key(e.key));
        let handle = Handle::mount(&env, props).unwrap();

        handle.on_mouse_down(&press()).unwrap();
        env.dispatch_mouse_up(&release_elsewhere());
        assert!(handle.is_click_focused());

        let msg = handle.on_key_down(&KeyboardEvent::new(Key::Right));
        assert_eq!(msg, Some(Msg::Key(Key::Right)));
        assert!(!handle.is_click_focused());
        assert!(!handle.render().has_class(CLICK_FOCUSED));
    }

    #[test]
    fn blur_clears_click_focus_and_forwards() {
        let env = env();
        let props = HandleProps::new().on_blur(|_| Msg::Blurred);
        let handle = Handle::mount(&env, props).unwrap();
        handle.click_focus().unwrap();

        assert_eq!(handle.on_blur(&FocusEvent::default()), Some(Msg::Blurred));
        assert!(!handle.is_click_focused());
    }

    #[test]
    fn release_while_other_element_focused_is_ignored() {
        let env = env();
        let handle = Handle::mount(&env, HandleProps::<Msg>::new()).unwrap();
        let other = env.create_element().unwrap();

        env.focus(other).unwrap();
        env.dispatch_mouse_up(&release_elsewhere());
        assert!(!handle.is_click_focused());

        // An already click-focused handle is also left alone.
        handle.click_focus().unwrap();
        env.focus(other).unwrap();
        env.dispatch_mouse_up(&release_elsewhere());
        assert!(handle.is_click_focused());
    }

    #[test]
    fn release_only_marks_the_focused_handle() {
        let env = env();
        let first = Handle::mount(&env, HandleProps::<Msg>::new()).unwrap();
        let second = Handle::mount(&env, HandleProps::<Msg>::new()).unwrap();
        assert_eq!(env.listener_count(), 2);

        second.on_mouse_down(&press()).unwrap();
        env.dispatch_mouse_up(&release_elsewhere());
        assert!(!first.is_click_focused());
        assert!(second.is_click_focused());
    }

    #[test]
    fn handles_in_separate_environments_stay_distinct() {
        let (left_env, right_env) = (env(), env());
        let left = Handle::mount(&left_env, HandleProps::<Msg>::new()).unwrap();
        let right = Handle::mount(&right_env, HandleProps::<Msg>::new()).unwrap();
        assert_ne!(left.element(), right.element());

        // A listener told that the other environment's handle is focused
        // must not take it for its own element.
        right.on_mouse_down(&press()).unwrap();
        left.shared.handle_mouse_up(right_env.active_element());
        assert!(!left.is_click_focused());
    }

    #[test]
    fn unmount_stops_listening() {
        let env = env();
        let redraws = Rc::new(Cell::new(0));
        let counter = Rc::clone(&redraws);
        let handle = Handle::mount_with(
            &env,
            HandleProps::<Msg>::new(),
            SideEffect::new(move || counter.set(counter.get() + 1)),
        )
        .unwrap();
        let element = handle.element();
        let handle_ref = handle.handle_ref();
        handle.focus().unwrap();

        handle.unmount();
        assert_eq!(env.listener_count(), 0);
        assert!(!env.contains(element));

        env.dispatch_mouse_up(&release_elsewhere());
        assert_eq!(redraws.get(), 0);
        assert!(!handle_ref.is_mounted());
        assert_eq!(handle_ref.click_focus(), Err(HandleError::NotMounted));
        assert_eq!(handle_ref.focus(), Err(HandleError::NotMounted));
        assert_eq!(handle_ref.blur(), Err(HandleError::NotMounted));
    }

    #[test]
    fn handle_ref_drives_mounted_handle() {
        let env = env();
        let handle = Handle::mount(&env, HandleProps::<Msg>::new()).unwrap();
        let handle_ref = handle.handle_ref().clone();

        handle_ref.focus().unwrap();
        assert_eq!(env.active_element(), Some(handle.element()));
        assert!(!handle.is_click_focused());

        handle_ref.blur().unwrap();
        assert_eq!(env.active_element(), None);

        handle_ref.click_focus().unwrap();
        assert!(handle.is_click_focused());
        assert_eq!(env.active_element(), Some(handle.element()));
    }

    #[test]
    fn redraw_fires_only_on_change() {
        let env = env();
        let redraws = Rc::new(Cell::new(0));
        let counter = Rc::clone(&redraws);
        let handle = Handle::mount_with(
            &env,
            HandleProps::<Msg>::new(),
            SideEffect::new(move || counter.set(counter.get() + 1)),
        )
        .unwrap();

        handle.on_mouse_down(&press()).unwrap();
        env.dispatch_mouse_up(&release_elsewhere());
        env.dispatch_mouse_up(&release_elsewhere());
        assert_eq!(redraws.get(), 1);

        handle.on_key_down(&KeyboardEvent::new(Key::Up));
        handle.on_key_down(&KeyboardEvent::new(Key::Up));
        assert_eq!(redraws.get(), 2);
    }

    #[test]
    fn set_props_keeps_state() {
        let env = env();
        let mut handle = Handle::mount(&env, HandleProps::<Msg>::new().offset(10.0)).unwrap();
        handle.click_focus().unwrap();

        handle.set_props(HandleProps::new().offset(60.0));
        assert!(handle.is_click_focused());
        assert_eq!(env.listener_count(), 1);
        assert_eq!(handle.render().style.get("left"), Some("60%"));
    }

    #[test]
    fn on_event_routes() {
        let env = env();
        let props = HandleProps::new()
            .on_mouse_down(|_| Msg::Down)
            .on_blur(|_| Msg::Blurred)
            .on_key_down(|e| Msg::Key(e.key));
        let handle = Handle::mount(&env, props).unwrap();

        let down = handle.on_event(&HandleEvent::MouseDown(press())).unwrap();
        let key = handle
            .on_event(&HandleEvent::KeyDown(KeyboardEvent::new(Key::Home)))
            .unwrap();
        let blur = handle
            .on_event(&HandleEvent::Blur(FocusEvent::default()))
            .unwrap();
        assert_eq!(down, Some(Msg::Down));
        assert_eq!(key, Some(Msg::Key(Key::Home)));
        assert_eq!(blur, Some(Msg::Blurred));
    }

    #[test]
    fn handlers_without_callbacks_return_none() {
        let env = env();
        let handle = Handle::mount(&env, HandleProps::<Msg>::new()).unwrap();
        assert_eq!(handle.on_mouse_down(&press()).unwrap(), None);
        assert_eq!(handle.on_blur(&FocusEvent::default()), None);
    }

    #[test]
    fn render_tab_index() {
        let env = env();
        let cases = [
            (false, TabIndex::Unset, Some(0)),
            (false, TabIndex::Null, None),
            (false, TabIndex::Value(0), Some(0)),
            (false, TabIndex::Value(2), Some(2)),
            (true, TabIndex::Unset, None),
            (true, TabIndex::Value(2), None),
        ];
        for (disabled, tab_index, expected) in cases {
            let props = HandleProps::<Msg>::new().disabled(disabled).tab_index(tab_index);
            let handle = Handle::mount(&env, props).unwrap();
            assert_eq!(handle.render().tab_index, expected, "{disabled} {tab_index:?}");
        }
    }

    #[test]
    fn render_accessibility() {
        let env = env();
        let props = HandleProps::<Msg>::new().range(0.0, 100.0, 37.5).disabled(true);
        let node = Handle::mount(&env, props).unwrap().render();

        assert_eq!(node.role, "slider");
        assert_eq!(node.attribute("aria-valuemin"), Some("0"));
        assert_eq!(node.attribute("aria-valuemax"), Some("100"));
        assert_eq!(node.attribute("aria-valuenow"), Some("37.5"));
        assert_eq!(node.attribute("aria-disabled"), Some("true"));
    }

    #[test]
    fn unset_bounds_are_omitted() {
        let env = env();
        let node = Handle::mount(&env, HandleProps::<Msg>::new()).unwrap().render();
        assert_eq!(node.attribute("aria-valuenow"), None);
        assert_eq!(node.attribute("aria-disabled"), Some("false"));
    }

    #[test]
    fn passthrough_cannot_override_controlled_attributes() {
        let env = env();
        let props = HandleProps::<Msg>::new()
            .range(0.0, 10.0, 5.0)
            .attribute("role", "button")
            .attribute("aria-valuenow", "99")
            .attribute("tabindex", "7")
            .attribute("data-index", "1");
        let node = Handle::mount(&env, props).unwrap().render();

        assert_eq!(node.role, "slider");
        assert_eq!(node.attribute("role"), None);
        assert_eq!(node.attribute("tabindex"), None);
        assert_eq!(node.attribute("aria-valuenow"), Some("5"));
        assert_eq!(node.attribute("data-index"), Some("1"));
    }

    #[test]
    fn render_classes_and_position() {
        let env = env();
        let props = HandleProps::<Msg>::new()
            .prefix_cls("my")
            .class_name("my-handle my-handle-1")
            .vertical(true)
            .reverse(true)
            .offset(25.0)
            .style(Style::new().with("top", "1px").with("background", "red"));
        let handle = Handle::mount(&env, props).unwrap();

        let node = handle.render();
        assert_eq!(node.class_name, "my-handle my-handle-1");
        assert_eq!(node.style.get("top"), Some("25%"));
        assert_eq!(node.style.get("bottom"), Some("auto"));
        assert_eq!(node.style.get("transform"), Some("translateY(+50%)"));
        assert_eq!(node.style.get("background"), Some("red"));

        handle.click_focus().unwrap();
        assert_eq!(
            handle.render().class_name,
            "my-handle my-handle-1 my-handle-click-focused"
        );
    }
}
