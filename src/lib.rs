//! notch - slider handle demo
//!
//! A single-handle slider built on `notch_ui`, runnable natively against the
//! headless environment or in the browser against the DOM.

pub mod config;
pub mod demo;
pub mod slider;

pub use config::{AppConfig, ConfigError, LogLevel, SliderConfig};
pub use slider::{Slider, SliderError, SliderMessage};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
