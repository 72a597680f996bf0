//! Handle properties supplied by the owning slider.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::callback::Callback;
use crate::constants::DEFAULT_PREFIX_CLS;
use crate::event::{FocusEvent, KeyboardEvent, MouseEvent};
use crate::style::Style;

/// Requested tab order position.
///
/// Three states are distinct: leaving the tab index unset (the handle is
/// tabbable at `0`), asking for no tab index at all, and an explicit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabIndex {
    #[default]
    Unset,
    Null,
    Value(i32),
}

impl TabIndex {
    /// The tab index to render, `None` removing the element from tab order.
    pub fn resolve(self, disabled: bool) -> Option<i32> {
        match self {
            _ if disabled => None,
            TabIndex::Null => None,
            TabIndex::Unset => Some(0),
            TabIndex::Value(n) => Some(n),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, TabIndex::Unset)
    }
}

impl From<Option<i32>> for TabIndex {
    fn from(value: Option<i32>) -> Self {
        value.map_or(TabIndex::Null, TabIndex::Value)
    }
}

// A missing field is handled by `#[serde(default)]`; here `null` and numbers
// are all that can arrive.
impl<'de> Deserialize<'de> for TabIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<i32>::deserialize(deserializer).map(TabIndex::from)
    }
}

impl Serialize for TabIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TabIndex::Unset | TabIndex::Null => serializer.serialize_none(),
            TabIndex::Value(n) => serializer.serialize_some(n),
        }
    }
}

/// Properties of a [`Handle`](crate::Handle).
///
/// `M` is the owner's message type produced by the event callbacks.
pub struct HandleProps<M> {
    pub(crate) prefix_cls: String,
    pub(crate) class_name: Option<String>,
    pub(crate) vertical: bool,
    pub(crate) reverse: bool,
    pub(crate) offset: f64,
    pub(crate) style: Style,
    pub(crate) disabled: bool,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) value: Option<f64>,
    pub(crate) tab_index: TabIndex,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) on_mouse_down: Callback<MouseEvent, M>,
    pub(crate) on_blur: Callback<FocusEvent, M>,
    pub(crate) on_key_down: Callback<KeyboardEvent, M>,
}

impl<M> Default for HandleProps<M> {
    fn default() -> Self {
        Self {
            prefix_cls: DEFAULT_PREFIX_CLS.to_string(),
            class_name: None,
            vertical: false,
            reverse: false,
            offset: 0.0,
            style: Style::new(),
            disabled: false,
            min: None,
            max: None,
            value: None,
            tab_index: TabIndex::Unset,
            attributes: BTreeMap::new(),
            on_mouse_down: Callback::none(),
            on_blur: Callback::none(),
            on_key_down: Callback::none(),
        }
    }
}

impl<M> HandleProps<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// CSS namespace for generated class names.
    pub fn prefix_cls(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_cls = prefix.into();
        self
    }

    /// Base class, rendered ahead of any state modifier.
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Position along the track, as a percentage.
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Caller style; positioning declarations win over same-named entries.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Bounds and current value, exposed as ARIA attributes.
    pub fn range(mut self, min: f64, max: f64, value: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.value = Some(value);
        self
    }

    pub fn tab_index(mut self, tab_index: TabIndex) -> Self {
        self.tab_index = tab_index;
        self
    }

    /// Extra attribute passed through to the rendered element.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn on_mouse_down<F>(mut self, f: F) -> Self
    where
        F: Fn(MouseEvent) -> M + 'static,
    {
        self.on_mouse_down = Callback::new(f);
        self
    }

    pub fn on_blur<F>(mut self, f: F) -> Self
    where
        F: Fn(FocusEvent) -> M + 'static,
    {
        self.on_blur = Callback::new(f);
        self
    }

    pub fn on_key_down<F>(mut self, f: F) -> Self
    where
        F: Fn(KeyboardEvent) -> M + 'static,
    {
        self.on_key_down = Callback::new(f);
        self
    }

    pub fn get_offset(&self) -> f64 {
        self.offset
    }
}

fn default_prefix_cls() -> String {
    DEFAULT_PREFIX_CLS.to_string()
}

/// Serializable description of handle props, without callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleConfig {
    #[serde(default = "default_prefix_cls")]
    pub prefix_cls: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default)]
    pub vertical: bool,

    #[serde(default)]
    pub reverse: bool,

    #[serde(default)]
    pub offset: f64,

    /// Inline style overrides
    #[serde(default)]
    pub style: BTreeMap<String, String>,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub min: Option<f64>,

    #[serde(default)]
    pub max: Option<f64>,

    #[serde(default)]
    pub value: Option<f64>,

    /// Absent, `null` and a number are three different requests
    #[serde(default, skip_serializing_if = "TabIndex::is_unset")]
    pub tab_index: TabIndex,

    /// Passthrough attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            prefix_cls: default_prefix_cls(),
            class_name: None,
            vertical: false,
            reverse: false,
            offset: 0.0,
            style: BTreeMap::new(),
            disabled: false,
            min: None,
            max: None,
            value: None,
            tab_index: TabIndex::Unset,
            attributes: BTreeMap::new(),
        }
    }
}

impl HandleConfig {
    /// Build props from this description; callbacks start unset.
    pub fn to_props<M>(&self) -> HandleProps<M> {
        let mut style = Style::new();
        for (property, value) in &self.style {
            style.set(property.clone(), value.clone());
        }
        HandleProps {
            prefix_cls: self.prefix_cls.clone(),
            class_name: self.class_name.clone(),
            vertical: self.vertical,
            reverse: self.reverse,
            offset: self.offset,
            style,
            disabled: self.disabled,
            min: self.min,
            max: self.max,
            value: self.value,
            tab_index: self.tab_index,
            attributes: self.attributes.clone(),
            ..HandleProps::default()
        }
    }
}
