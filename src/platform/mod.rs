//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pointer, keys, window close)
//! - Storage (file on native, LocalStorage on web)
//! - The wasm entry point exposed to a JavaScript renderer

pub mod input;
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod web;
