//! Browser backend: handles as real DOM elements.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node};

use crate::environment::{ElementId, FocusEnvironment, ListenerId, MouseUpListener};
use crate::error::{HandleError, Result};
use crate::event::{
    FocusEvent, HandleEvent, Key, KeyboardEvent, Modifiers, MouseButton, MouseEvent, Point,
};
use crate::node::HandleNode;

type DomListener = Closure<dyn FnMut(web_sys::Event)>;

/// Attribute mapping DOM elements back to element ids
const ELEMENT_ID_ATTRIBUTE: &str = "data-notch-id";

fn js_error(value: JsValue) -> HandleError {
    HandleError::Environment(format!("{:?}", value))
}

/// Map a DOM element back to the id it was created with.
fn element_id_of(element: &Element) -> Option<ElementId> {
    element
        .get_attribute(ELEMENT_ID_ATTRIBUTE)
        .and_then(|raw| raw.parse().ok())
        .map(ElementId)
}

impl From<&web_sys::MouseEvent> for MouseEvent {
    fn from(event: &web_sys::MouseEvent) -> Self {
        Self {
            button: MouseButton::from_dom_index(event.button()),
            position: Point::new(event.client_x() as f32, event.client_y() as f32),
            modifiers: Modifiers {
                shift: event.shift_key(),
                ctrl: event.ctrl_key(),
                alt: event.alt_key(),
                meta: event.meta_key(),
            },
        }
    }
}

impl From<&web_sys::KeyboardEvent> for KeyboardEvent {
    fn from(event: &web_sys::KeyboardEvent) -> Self {
        Self {
            key: Key::from_dom_key(&event.key()),
            modifiers: Modifiers {
                shift: event.shift_key(),
                ctrl: event.ctrl_key(),
                alt: event.alt_key(),
                meta: event.meta_key(),
            },
        }
    }
}

impl From<&web_sys::FocusEvent> for FocusEvent {
    fn from(event: &web_sys::FocusEvent) -> Self {
        let related = event
            .related_target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element_id_of(&element));
        Self { related }
    }
}

/// Environment backed by the page's `document`.
///
/// Elements are `div`s appended to a container; the document-level listener
/// is a real `mouseup` listener on the document.
pub struct WebEnvironment {
    document: Document,
    container: Element,
    elements: RefCell<HashMap<ElementId, HtmlElement>>,
    element_listeners: RefCell<HashMap<ElementId, Vec<(&'static str, DomListener)>>>,
    next_listener: Cell<u64>,
    listeners: RefCell<HashMap<ListenerId, DomListener>>,
}

impl WebEnvironment {
    /// Create an environment whose elements live inside `container`.
    pub fn new(container: Element) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| HandleError::Environment("no document".to_string()))?;
        Ok(Self {
            document,
            container,
            elements: RefCell::new(HashMap::new()),
            element_listeners: RefCell::new(HashMap::new()),
            next_listener: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
        })
    }

    /// Look up the container by DOM id.
    pub fn in_container(container_id: &str) -> Result<Self> {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .ok_or_else(|| {
                HandleError::Environment(format!("container '{container_id}' not found"))
            })?;
        Self::new(container)
    }

    pub fn element(&self, id: ElementId) -> Option<HtmlElement> {
        self.elements.borrow().get(&id).cloned()
    }

    /// Forward `mousedown`, `blur` and `keydown` on element `id` to `f`.
    pub fn listen_element(&self, id: ElementId, f: Rc<dyn Fn(HandleEvent)>) -> Result<()> {
        let element = self.element(id).ok_or(HandleError::UnknownElement(id))?;
        let mut registered = Vec::with_capacity(3);

        for kind in ["mousedown", "blur", "keydown"] {
            let f = Rc::clone(&f);
            let closure = DomListener::new(move |event: web_sys::Event| {
                let translated = match kind {
                    "mousedown" => event
                        .dyn_ref::<web_sys::MouseEvent>()
                        .map(|e| HandleEvent::MouseDown(e.into())),
                    "blur" => event
                        .dyn_ref::<web_sys::FocusEvent>()
                        .map(|e| HandleEvent::Blur(e.into())),
                    _ => event
                        .dyn_ref::<web_sys::KeyboardEvent>()
                        .map(|e| HandleEvent::KeyDown(e.into())),
                };
                if let Some(event) = translated {
                    f(event);
                }
            });
            element
                .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
                .map_err(js_error)?;
            registered.push((kind, closure));
        }

        self.element_listeners
            .borrow_mut()
            .entry(id)
            .or_default()
            .extend(registered);
        Ok(())
    }

    /// Write a rendered node onto element `id`.
    ///
    /// Attributes from a previous render that the node no longer carries are
    /// removed.
    pub fn apply(&self, id: ElementId, node: &HandleNode) -> Result<()> {
        let element = self.element(id).ok_or(HandleError::UnknownElement(id))?;

        let names: js_sys::Array = element.get_attribute_names();
        for name in names.iter().filter_map(|n| n.as_string()) {
            let keep = name == ELEMENT_ID_ATTRIBUTE
                || matches!(name.as_str(), "class" | "style" | "role" | "tabindex")
                || node.attributes.contains_key(&name);
            if !keep {
                element.remove_attribute(&name).map_err(js_error)?;
            }
        }

        match node.tab_index {
            Some(index) => element
                .set_attribute("tabindex", &index.to_string())
                .map_err(js_error)?,
            None => element.remove_attribute("tabindex").map_err(js_error)?,
        }
        element.set_class_name(&node.class_name);
        element
            .set_attribute("style", &node.style.to_css())
            .map_err(js_error)?;
        element.set_attribute("role", node.role).map_err(js_error)?;
        for (name, value) in &node.attributes {
            element.set_attribute(name, value).map_err(js_error)?;
        }
        Ok(())
    }

    fn detach_element_listeners(&self, id: ElementId, element: &HtmlElement) {
        let Some(registered) = self.element_listeners.borrow_mut().remove(&id) else {
            return;
        };
        for (kind, closure) in registered {
            if let Err(e) =
                element.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            {
                log::warn!("failed to detach {kind} from {id}: {:?}", e);
            }
        }
    }
}

impl FocusEnvironment for WebEnvironment {
    fn create_element(&self) -> Result<ElementId> {
        let id = ElementId::allocate();
        let element: HtmlElement = self
            .document
            .create_element("div")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| HandleError::Environment("div is not an HtmlElement".to_string()))?;
        element
            .set_attribute(ELEMENT_ID_ATTRIBUTE, &id.0.to_string())
            .map_err(js_error)?;
        self.container.append_child(&element).map_err(js_error)?;

        self.elements.borrow_mut().insert(id, element);
        Ok(id)
    }

    fn remove_element(&self, id: ElementId) {
        let Some(element) = self.elements.borrow_mut().remove(&id) else {
            return;
        };
        self.detach_element_listeners(id, &element);
        element.remove();
    }

    fn focus(&self, id: ElementId) -> Result<()> {
        let element = self.element(id).ok_or(HandleError::UnknownElement(id))?;
        element.focus().map_err(js_error)
    }

    fn blur(&self, id: ElementId) -> Result<()> {
        let element = self.element(id).ok_or(HandleError::UnknownElement(id))?;
        element.blur().map_err(js_error)
    }

    fn active_element(&self) -> Option<ElementId> {
        let active = self.document.active_element()?;
        let id = element_id_of(&active)?;
        let elements = self.elements.borrow();
        let owned = elements.get(&id)?;
        // The attribute can be copied onto foreign nodes; only our own element counts.
        let active: &Node = &active;
        owned.is_same_node(Some(active)).then_some(id)
    }

    fn add_mouse_up_listener(&self, listener: MouseUpListener) -> Result<ListenerId> {
        let id = ListenerId(self.next_listener.get());
        let document = self.document.clone();
        let closure = DomListener::new(move |event: web_sys::Event| {
            let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() else {
                return;
            };
            let active = document
                .active_element()
                .and_then(|element| element_id_of(&element));
            listener(&MouseEvent::from(event), active);
        });
        self.document
            .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;

        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, closure);
        Ok(id)
    }

    fn remove_mouse_up_listener(&self, id: ListenerId) -> bool {
        let Some(closure) = self.listeners.borrow_mut().remove(&id) else {
            return false;
        };
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to detach mouseup listener {:?}: {:?}", id, e);
        }
        true
    }
}

impl Drop for WebEnvironment {
    fn drop(&mut self) {
        let ids: Vec<ListenerId> = self.listeners.borrow().keys().copied().collect();
        for id in ids {
            self.remove_mouse_up_listener(id);
        }
        let elements: Vec<ElementId> = self.elements.borrow().keys().copied().collect();
        for id in elements {
            self.remove_element(id);
        }
    }
}
