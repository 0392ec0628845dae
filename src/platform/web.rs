//! Browser entry point
//!
//! The page owns the canvas and event listeners; it forwards raw events to
//! [`WebApp`] and draws the JSON frame returned by [`WebApp::frame`] on every
//! animation frame.

use wasm_bindgen::prelude::*;

use super::input::{InputEvent, Key, dom_button};
use super::storage::LocalStorageStore;
use crate::app::App;
use crate::config::GameConfig;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Math Tiles starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebApp {
    app: App,
    pending: Vec<InputEvent>,
}

#[wasm_bindgen]
impl WebApp {
    /// Create the app. `config_json` may override any part of the default config.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> WebApp {
        let config = match config_json.as_deref().map(GameConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Invalid config, using defaults: {}", e);
                GameConfig::default()
            }
            None => GameConfig::default(),
        };
        let store = LocalStorageStore::new(config.storage_key.clone());
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebApp {
            app: App::new(config, Box::new(store), seed),
            pending: Vec::new(),
        }
    }

    /// `button` is the DOM `MouseEvent.button` (0 = primary)
    pub fn pointer_down(&mut self, x: f32, y: f32, button: i16) {
        self.pending.push(InputEvent::PointerDown {
            pos: glam::Vec2::new(x, y),
            button: dom_button(button),
        });
    }

    /// `key` is the DOM `KeyboardEvent.key`
    pub fn key_down(&mut self, key: &str) {
        if let Some(key) = Key::from_name(key) {
            self.pending.push(InputEvent::KeyDown(key));
        }
    }

    /// Call from `beforeunload` so progress is saved
    pub fn window_close(&mut self) {
        self.app.handle_event(InputEvent::WindowClose);
    }

    /// Apply queued input, advance by `dt` seconds and return the frame as
    /// JSON, including the gameplay events raised since the previous call
    pub fn frame(&mut self, dt: f32) -> String {
        let events = std::mem::take(&mut self.pending);
        self.app.frame(events, dt);
        match self.app.take_frame().to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Frame serialization failed: {}", e);
                String::from("{\"state\":\"quit\",\"events\":[]}")
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.app.is_running()
    }
}
