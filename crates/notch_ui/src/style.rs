//! Inline style declarations and handle positioning.

use std::collections::BTreeMap;
use std::fmt;

/// A set of inline CSS declarations keyed by property name.
///
/// Later writes to the same property replace earlier ones, which is how
/// caller overrides and computed positioning are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    declarations: BTreeMap<String, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Style::set`].
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Merge `other` over `self`; properties present in both take `other`'s value.
    pub fn merge(&mut self, other: &Style) {
        for (property, value) in &other.declarations {
            self.declarations.insert(property.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Serialize as a `style` attribute value.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A side of the track a handle can be anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub fn property(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

/// Axis of a centering translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A half-size translation that centres the handle on its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translate {
    pub axis: Axis,
    /// `true` for `+50%`, `false` for `-50%`.
    pub positive: bool,
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = match self.axis {
            Axis::X => 'X',
            Axis::Y => 'Y',
        };
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "translate{axis}({sign}50%)")
    }
}

/// Where a handle sits on its track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Edge the offset is measured from.
    pub anchor: Edge,
    /// Opposite edge, released with `auto`.
    pub released: Edge,
    /// Percentage along the track.
    pub offset: f64,
    pub translate: Translate,
}

impl Position {
    /// Compute the anchor and centering translation for a handle.
    ///
    /// | vertical | reverse | anchor   | released | translate          |
    /// |----------|---------|----------|----------|--------------------|
    /// | yes      | no      | `bottom` | `top`    | `translateY(+50%)` |
    /// | yes      | yes     | `top`    | `bottom` | `translateY(+50%)` |
    /// | no       | no      | `left`   | `right`  | `translateX(-50%)` |
    /// | no       | yes     | `right`  | `left`   | `translateX(+50%)` |
    pub fn compute(vertical: bool, reverse: bool, offset: f64) -> Self {
        let (anchor, released, axis, positive) = match (vertical, reverse) {
            (true, false) => (Edge::Bottom, Edge::Top, Axis::Y, true),
            (true, true) => (Edge::Top, Edge::Bottom, Axis::Y, true),
            (false, false) => (Edge::Left, Edge::Right, Axis::X, false),
            (false, true) => (Edge::Right, Edge::Left, Axis::X, true),
        };
        Self {
            anchor,
            released,
            offset,
            translate: Translate { axis, positive },
        }
    }

    pub fn to_style(&self) -> Style {
        Style::new()
            .with(self.anchor.property(), format!("{}%", format_number(self.offset)))
            .with(self.released.property(), "auto")
            .with("transform", self.translate.to_string())
    }
}

/// Format a number the way a JavaScript template literal would.
///
/// Integral values drop the fractional part (`30` rather than `30.0`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        // Covers -0.0, which JavaScript prints as "0".
        "0".to_string()
    } else {
        format!("{value}")
    }
}
