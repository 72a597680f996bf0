//! Scripted interaction against the headless environment.
//!
//! Drives a slider through a click-drag, keyboard steps and a blur, and
//! records how the handle renders after each step.

use std::cell::Cell;
use std::rc::Rc;

use notch_ui::{
    FocusEvent, HandleEvent, HandleNode, Key, KeyboardEvent, MemoryEnvironment, MouseEvent, Point,
    SideEffect,
};

use crate::config::AppConfig;
use crate::slider::{Slider, SliderError};

/// One recorded step of the script.
#[derive(Debug, Clone)]
pub struct Frame {
    pub label: &'static str,
    pub value: f64,
    pub click_focused: bool,
    pub node: HandleNode,
}

impl Frame {
    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        let tab_index = self
            .node
            .tab_index
            .map_or_else(|| "none".to_string(), |i| i.to_string());
        format!(
            "{:<12} value={} class=\"{}\" tabindex={} style=\"{}\"",
            self.label,
            self.value,
            self.node.class_name,
            tab_index,
            self.node.style.to_css()
        )
    }
}

/// Run the script with the slider described by `config`.
pub fn run(config: &AppConfig) -> Result<Vec<Frame>, SliderError> {
    let env = Rc::new(MemoryEnvironment::new());
    let redraws = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&redraws);
    let mut slider = Slider::mount_with(
        &env,
        config.slider.clone(),
        SideEffect::new(move || counter.set(counter.get() + 1)),
    )?;

    let mut frames = Vec::new();
    let mut record = |label: &'static str, slider: &Slider<MemoryEnvironment>| {
        let frame = Frame {
            label,
            value: slider.value(),
            click_focused: slider.handle().is_click_focused(),
            node: slider.render(),
        };
        log::info!("{}", frame.summary());
        frames.push(frame);
    };

    record("mounted", &slider);

    slider.dispatch(&HandleEvent::MouseDown(MouseEvent::primary(Point::new(4.0, 8.0))))?;
    record("mouse down", &slider);

    // Released well outside the handle.
    env.dispatch_mouse_up(&MouseEvent::primary(Point::new(240.0, 30.0)));
    record("mouse up", &slider);

    for key in [Key::Right, Key::Right, Key::PageUp] {
        slider.dispatch(&HandleEvent::KeyDown(KeyboardEvent::new(key)))?;
        record("key down", &slider);
    }

    slider.dispatch(&HandleEvent::Blur(FocusEvent::default()))?;
    record("blur", &slider);

    drop(slider);
    log::debug!(
        "demo finished after {} redraw notifications, {} listeners left",
        redraws.get(),
        env.listener_count()
    );
    Ok(frames)
}
