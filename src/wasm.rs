use std::cell::RefCell;
use std::rc::{Rc, Weak};

use notch_ui::{HandleEvent, SideEffect, WebEnvironment};
use wasm_bindgen::prelude::*;

use crate::{AppConfig, Slider, SliderError};

/// DOM id of the element handles are appended to.
const CONTAINER_ID: &str = "notch";

type SharedSlider = Rc<RefCell<Option<Slider<WebEnvironment>>>>;

thread_local! {
    // Keeps the mounted slider alive for the lifetime of the page.
    static APP: RefCell<Option<(Rc<WebEnvironment>, SharedSlider)>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = AppConfig::default();
    let level = config
        .log_level
        .to_level_filter()
        .to_level()
        .unwrap_or(log::Level::Error);
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(level);

    log::info!("notch WASM starting...");
    mount(config).map_err(|e| JsValue::from_str(&format!("Application error: {e}")))
}

/// Re-render the slider's handle onto its DOM element.
fn apply(env: &WebEnvironment, slider: &Slider<WebEnvironment>) {
    let element = slider.handle().element();
    if let Err(e) = env.apply(element, &slider.render()) {
        log::warn!("failed to render handle {element}: {e}");
    }
}

fn upgrade_both(
    slider: &Weak<RefCell<Option<Slider<WebEnvironment>>>>,
    env: &Weak<WebEnvironment>,
) -> Option<(SharedSlider, Rc<WebEnvironment>)> {
    Some((slider.upgrade()?, env.upgrade()?))
}

fn mount(config: AppConfig) -> Result<(), SliderError> {
    let env = Rc::new(WebEnvironment::in_container(CONTAINER_ID)?);
    let slider: SharedSlider = Rc::new(RefCell::new(None));

    // Click focus set by the document listener happens outside any element
    // event, so the handle asks for a render itself. During element events
    // the slider is already borrowed and the event handler renders instead.
    let (redraw_slider, redraw_env) = (Rc::downgrade(&slider), Rc::downgrade(&env));
    let on_redraw = SideEffect::new(move || {
        let Some((slider, env)) = upgrade_both(&redraw_slider, &redraw_env) else {
            return;
        };
        if let Ok(guard) = slider.try_borrow() {
            if let Some(slider) = guard.as_ref() {
                apply(&env, slider);
            }
        }
    });

    let mounted = Slider::mount_with(&env, config.slider, on_redraw)?;
    let element = mounted.handle().element();
    apply(&env, &mounted);
    *slider.borrow_mut() = Some(mounted);

    let (event_slider, event_env) = (Rc::downgrade(&slider), Rc::downgrade(&env));
    env.listen_element(
        element,
        Rc::new(move |event: HandleEvent| {
            let Some((slider, env)) = upgrade_both(&event_slider, &event_env) else {
                return;
            };
            let Ok(mut guard) = slider.try_borrow_mut() else {
                log::trace!("dropping re-entrant {:?}", event);
                return;
            };
            let Some(slider) = guard.as_mut() else {
                return;
            };
            if let Err(e) = slider.dispatch(&event) {
                log::warn!("handle event failed: {e}");
            }
            apply(&env, slider);
        }),
    )?;

    APP.with(|app| *app.borrow_mut() = Some((env, slider)));
    log::info!("notch mounted into #{CONTAINER_ID}");
    Ok(())
}
