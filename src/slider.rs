//! A single-handle slider driving a [`Handle`].
//!
//! The slider owns the value; the handle only reports interactions. Every
//! change re-renders the handle's props from the slider state.

use std::rc::Rc;

use notch_ui::{
    FocusEnvironment, Handle, HandleError, HandleEvent, HandleNode, HandleProps, HandleRef, Key,
    SideEffect,
};
use thiserror::Error;

use crate::config::{ConfigError, SliderConfig};

/// Errors from mounting or driving a slider.
#[derive(Debug, Error)]
pub enum SliderError {
    /// The slider configuration is unusable
    #[error("Invalid slider configuration: {0}")]
    Config(#[from] ConfigError),

    /// The handle or its environment failed
    #[error("Handle error: {0}")]
    Handle(#[from] HandleError),
}

/// Messages the handle sends back to its slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderMessage {
    /// Mouse pressed on the handle.
    DragStart,
    /// Key pressed while the handle had focus.
    KeyDown(Key),
    /// The handle lost focus.
    DragEnd,
}

/// A slider with one handle.
pub struct Slider<E: FocusEnvironment + ?Sized + 'static> {
    config: SliderConfig,
    value: f64,
    dragging: bool,
    handle: Handle<E, SliderMessage>,
}

impl<E: FocusEnvironment + ?Sized + 'static> Slider<E> {
    /// Mount a slider and its handle into `env`.
    pub fn mount(env: &Rc<E>, config: SliderConfig) -> Result<Self, SliderError> {
        Self::mount_with(env, config, SideEffect::none())
    }

    /// Mount, notifying `on_redraw` when the handle changes state on its own.
    ///
    /// The configuration is validated first: a non-positive step would snap
    /// every key press to `min`.
    pub fn mount_with(
        env: &Rc<E>,
        config: SliderConfig,
        on_redraw: SideEffect,
    ) -> Result<Self, SliderError> {
        config.validate()?;
        let value = config.value.max(config.min).min(config.max);
        let props = Self::handle_props(&config, value);
        let handle = Handle::mount_with(env, props, on_redraw)?;
        Ok(Self {
            config,
            value,
            dragging: false,
            handle,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn handle(&self) -> &Handle<E, SliderMessage> {
        &self.handle
    }

    pub fn handle_ref(&self) -> HandleRef<E> {
        self.handle.handle_ref()
    }

    /// Handle position along the track, as a percentage.
    pub fn offset(&self) -> f64 {
        self.value_ratio() * 100.0
    }

    /// Deliver an element event to the handle and apply whatever it reports.
    pub fn dispatch(&mut self, event: &HandleEvent) -> notch_ui::Result<()> {
        if let Some(message) = self.handle.on_event(event)? {
            self.update(message);
        }
        Ok(())
    }

    /// Apply a handle message.
    pub fn update(&mut self, message: SliderMessage) {
        log::debug!("slider message {:?}", message);
        match message {
            SliderMessage::DragStart => self.dragging = true,
            SliderMessage::DragEnd => self.dragging = false,
            SliderMessage::KeyDown(key) => {
                self.dragging = false;
                if let Some(value) = self.keyboard_value(key) {
                    self.set_value(value);
                }
            }
        }
    }

    /// Snap `value` onto the step grid and move the handle there.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.snap(value);
        self.handle
            .set_props(Self::handle_props(&self.config, self.value));
    }

    pub fn render(&self) -> HandleNode {
        self.handle.render()
    }

    /// Target value for a key press, honoring orientation and direction.
    fn keyboard_value(&self, key: Key) -> Option<f64> {
        let SliderConfig {
            vertical,
            reverse,
            step,
            ..
        } = self.config;
        let increase = self.value + step;
        let decrease = self.value - step;
        let value = match key {
            Key::Up if vertical && reverse => decrease,
            Key::Up => increase,
            Key::Down if vertical && reverse => increase,
            Key::Down => decrease,
            Key::Right if !vertical && reverse => decrease,
            Key::Right => increase,
            Key::Left if !vertical && reverse => increase,
            Key::Left => decrease,
            Key::Home => self.config.min,
            Key::End => self.config.max,
            Key::PageUp => self.value + step * 2.0,
            Key::PageDown => self.value - step * 2.0,
            _ => return None,
        };
        Some(value)
    }

    /// Snap to the step grid and clamp into range.
    fn snap(&self, value: f64) -> f64 {
        let SliderConfig { min, max, step, .. } = self.config;
        let steps = ((value - min) / step).round();
        (min + steps * step).max(min).min(max)
    }

    /// Get the normalized position (0-1) of the current value.
    fn value_ratio(&self) -> f64 {
        let range = self.config.max - self.config.min;
        if range.abs() < f64::EPSILON {
            0.0
        } else {
            (self.value - self.config.min) / range
        }
    }

    fn handle_props(config: &SliderConfig, value: f64) -> HandleProps<SliderMessage> {
        let range = config.max - config.min;
        let offset = if range.abs() < f64::EPSILON {
            0.0
        } else {
            (value - config.min) / range * 100.0
        };
        config
            .handle
            .to_props()
            .vertical(config.vertical)
            .reverse(config.reverse)
            .offset(offset)
            .range(config.min, config.max, value)
            .disabled(config.disabled || config.handle.disabled)
            .on_mouse_down(|_| SliderMessage::DragStart)
            .on_key_down(|e| SliderMessage::KeyDown(e.key))
            .on_blur(|_| SliderMessage::DragEnd)
    }
}
