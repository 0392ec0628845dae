//! Math Tiles - a falling-tiles arithmetic quiz
//!
//! Core modules:
//! - `sim`: Gameplay simulation (problems, tiles, session state, tick)
//! - `economy`: Coins and consumable items
//! - `app`: Menu/tutorial/game state machine and input routing
//! - `persistence`: Save data and the save coordinator
//! - `platform`: Input events and storage backends (file, memory, LocalStorage)
//! - `ui`: Button layout and hit-testing
//! - `view`: Read-only projection handed to renderers
//! - `config`: Immutable game configuration

pub mod app;
pub mod config;
pub mod economy;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod ui;
pub mod view;

pub use app::{App, AppState};
pub use config::GameConfig;
pub use economy::{Inventory, Item, Ledger};
pub use persistence::{SaveCoordinator, SaveData, SaveError};
pub use platform::input::{InputEvent, Key};
pub use view::{Frame, FrameUpdate};

/// Default game constants
pub mod consts {
    /// Play field dimensions
    pub const SCREEN_W: f32 = 800.0;
    pub const SCREEN_H: f32 = 600.0;

    /// Tiles spawn above the visible field and fall down the left column
    pub const TILE_X: f32 = 40.0;
    pub const SPAWN_Y: f32 = -80.0;
    pub const TILE_WIDTH: f32 = 300.0;
    pub const TILE_HEIGHT: f32 = 70.0;

    /// Fall speed curve (pixels/s): base + score * per_score
    pub const BASE_FALL_SPEED: f32 = 60.0;
    pub const SPEED_PER_SCORE: f32 = 3.0;

    /// Spawn interval curve (seconds): max(min, base - score * accel)
    pub const SPAWN_INTERVAL_BASE: f32 = 2.0;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.5;
    pub const SPAWN_ACCEL_PER_SCORE: f32 = 0.03;

    /// Shop prices (coins)
    pub const COST_SKIP: u32 = 8;
    pub const COST_SHIELD: u32 = 15;

    /// Lives at the start of every run (also the cap)
    pub const MAX_LIVES: u8 = 3;

    /// Answer choices per tile and the range they are drawn from
    pub const CHOICE_COUNT: usize = 3;
    pub const CHOICE_MIN: i32 = -100;
    pub const CHOICE_MAX: i32 = 100;
    pub const CHOICE_SPREAD: i32 = 10;

    /// Largest frame delta fed to the simulation (prevents tunneling after stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Undrained gameplay events kept by the app; older ones are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Default save location
    pub const SAVE_FILE: &str = "savegame.json";
    pub const STORAGE_KEY: &str = "math_tiles_save";
}
