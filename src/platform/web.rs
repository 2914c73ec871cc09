//! Browser platform: `setInterval` timer, alert/reload session, page lookups

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, Window};

use super::{Session, Timer};
use crate::settings::Settings;

/// Id of the optional `<script type="application/json">` holding settings
pub const SETTINGS_ELEMENT_ID: &str = "game-settings";
/// Id of the game canvas
pub const CANVAS_ELEMENT_ID: &str = "canvas";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    document
        .get_element_by_id(CANVAS_ELEMENT_ID)
        .ok_or_else(|| JsValue::from_str("no #canvas element"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("#canvas is not a canvas"))
}

/// Read settings from the page; the canvas size always wins over configured size
pub fn load_settings(document: &Document, canvas: &HtmlCanvasElement) -> Settings {
    let mut settings = match document
        .get_element_by_id(SETTINGS_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(json) => {
            log::info!("Loaded settings from #{}", SETTINGS_ELEMENT_ID);
            Settings::from_json_or_default(&json)
        }
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    settings.width = canvas.width() as f32;
    settings.height = canvas.height() as f32;
    settings
}

/// Repeating timer over `window.setInterval`
pub struct IntervalTimer {
    window: Window,
}

impl IntervalTimer {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

/// `setInterval` id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalHandle(i32);

impl Timer for IntervalTimer {
    type Handle = IntervalHandle;
    type Error = JsValue;

    fn schedule(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Result<IntervalHandle, JsValue> {
        let closure = Closure::<dyn FnMut()>::wrap(callback);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            )?;
        // The interval may cancel itself from inside the callback, so the
        // closure cannot be dropped with the handle
        closure.forget();
        Ok(IntervalHandle(id))
    }

    fn cancel(&self, handle: IntervalHandle) {
        self.window.clear_interval_with_handle(handle.0);
    }
}

/// Ends a run the way a page does: an alert, then a full reload
pub struct BrowserSession {
    window: Window,
}

impl BrowserSession {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Session for BrowserSession {
    fn notify(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("alert failed: {:?}", e);
        }
    }

    fn restart(&mut self) {
        if let Err(e) = self.window.location().reload() {
            log::error!("Reload failed: {:?}", e);
        }
    }
}
