use crate::environment::ElementId;

/// Events a handle responds to.
///
/// Mouse release is deliberately absent: it is observed at document level
/// through [`FocusEnvironment`](crate::FocusEnvironment) rather than on the
/// handle element.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleEvent {
    /// Mouse button pressed on the handle element.
    MouseDown(MouseEvent),
    /// The handle element lost focus.
    Blur(FocusEvent),
    /// A key was pressed while the handle element had focus.
    KeyDown(KeyboardEvent),
}

/// A point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Mouse press or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub button: MouseButton,
    pub position: Point,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Primary button at `position`, no modifiers held.
    pub fn primary(position: Point) -> Self {
        Self {
            button: MouseButton::Left,
            position,
            modifiers: Modifiers::default(),
        }
    }
}

/// Focus moving away from an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusEvent {
    /// The element receiving focus, if the environment knows it.
    pub related: Option<ElementId>,
}

/// Key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    pub fn from_dom_index(index: i16) -> Self {
        match index {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            n => MouseButton::Other(n.max(0) as u16),
        }
    }
}

/// Keyboard keys relevant to slider interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Any key without a dedicated variant.
    Unidentified,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            "Tab" => Key::Tab,
            " " => Key::Space,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unidentified,
                }
            }
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_dom_key(" "), Key::Space);
        assert_eq!(Key::from_dom_key("k"), Key::Char('k'));
        assert_eq!(Key::from_dom_key("F13"), Key::Unidentified);
    }

    #[test]
    fn dom_buttons() {
        assert_eq!(MouseButton::from_dom_index(0), MouseButton::Left);
        assert_eq!(MouseButton::from_dom_index(2), MouseButton::Right);
        assert_eq!(MouseButton::from_dom_index(4), MouseButton::Other(4));
    }
}
