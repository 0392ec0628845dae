//! Session state and core simulation types
//!
//! A [`GameSession`] is one run: it owns the tile queue, score, lives and
//! spawn timing. Coins and items belong to the [`Ledger`], which outlives
//! sessions and is passed in wherever a rule touches it.

use std::collections::VecDeque;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::choices::{self, Choices};
use super::problem::{self, Problem};
use crate::config::GameConfig;
use crate::economy::{Item, Ledger};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Tiles fall, answers are accepted
    Running,
    /// Shop overlay is open; simulation is suspended
    Shop,
    /// Out of lives; waiting for a restart
    Over,
}

/// Things that happened during input handling or a tick, drained by the app
/// and forwarded to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    TileSpawned { id: u32 },
    Correct { id: u32, score: u32 },
    Wrong { id: u32, selected: i32, answer: i32 },
    Missed { id: u32 },
    ShieldAbsorbed,
    LifeLost { lives: u8 },
    GameOver { score: u32 },
    Skipped { id: u32 },
    Purchased { item: Item },
    PurchaseDenied { item: Item },
    ShopOpened,
    ShopClosed,
}

/// A falling problem
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: u32,
    pub x: f32,
    /// Top edge of the tile (grows downward)
    pub position_y: f32,
    pub problem: Problem,
    pub choices: Choices,
    /// Pixels per second
    pub fall_speed: f32,
}

impl Tile {
    pub fn answer(&self) -> i32 {
        self.problem.answer
    }

    pub fn problem_text(&self) -> String {
        self.problem.text()
    }

    /// Advance by `dt` seconds at the current fall speed
    pub fn update(&mut self, dt: f32) {
        self.position_y += self.fall_speed * dt;
    }
}

/// One run of the game
#[derive(Debug, Clone)]
pub struct GameSession {
    config: Rc<GameConfig>,
    rng: Pcg32,
    /// Oldest tile first; only the front tile is interactive
    pub(crate) tiles: VecDeque<Tile>,
    pub(crate) score: u32,
    pub(crate) lives: u8,
    pub(crate) spawn_timer: f32,
    pub(crate) spawn_interval: f32,
    pub(crate) phase: SessionPhase,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Create an empty session. Call [`GameSession::start`] or
    /// [`GameSession::restart`] to get the first tile on screen.
    pub fn new(config: Rc<GameConfig>, seed: u64) -> Self {
        let lives = config.starting_lives;
        let spawn_interval = config.tuning.spawn_interval(0);
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            tiles: VecDeque::new(),
            score: 0,
            lives,
            spawn_timer: 0.0,
            spawn_interval,
            phase: SessionPhase::Running,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a session with its first tile already spawned
    pub fn start(config: Rc<GameConfig>, seed: u64) -> Self {
        let mut session = Self::new(config, seed);
        session.spawn();
        session
    }

    /// Reset to a fresh run (keeps the RNG stream) and spawn one tile
    pub fn restart(&mut self) {
        self.tiles.clear();
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.spawn_timer = 0.0;
        self.spawn_interval = self.config.tuning.spawn_interval(0);
        self.phase = SessionPhase::Running;
        self.spawn();
        log::info!("Session restarted");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    pub fn is_shop_open(&self) -> bool {
        self.phase == SessionPhase::Shop
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    /// Current fall speed for every tile
    pub fn fall_speed(&self) -> f32 {
        self.config.tuning.fall_speed(self.score)
    }

    /// The interactive tile, if any
    pub fn head(&self) -> Option<&Tile> {
        self.tiles.front()
    }

    /// All tiles, oldest first
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a new tile at the top of the field
    pub fn spawn(&mut self) {
        let problem = problem::generate(&mut self.rng);
        let choices = choices::build(problem.answer, &mut self.rng);
        let id = self.next_entity_id();
        let tile = Tile {
            id,
            x: self.config.field.tile_x,
            position_y: self.config.field.spawn_y,
            problem,
            choices,
            fall_speed: self.fall_speed(),
        };
        log::debug!("Spawned tile {} '{}'", id, tile.problem);
        self.tiles.push_back(tile);
        self.emit(GameEvent::TileSpawned { id });
    }

    /// Remove and return the interactive tile
    pub(crate) fn pop_head(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }

    /// Apply a miss (wrong answer or tile reaching the bottom).
    /// A shield absorbs it; otherwise a life is lost and the run may end.
    pub(crate) fn apply_miss_penalty(&mut self, ledger: &mut Ledger) {
        if ledger.consume(Item::Shield) {
            log::debug!("Shield absorbed a miss ({} left)", ledger.count(Item::Shield));
            self.emit(GameEvent::ShieldAbsorbed);
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.emit(GameEvent::LifeLost { lives: self.lives });
        if self.lives == 0 {
            self.phase = SessionPhase::Over;
            log::info!("Game over with score {}", self.score);
            self.emit(GameEvent::GameOver { score: self.score });
        }
    }

    /// Refresh the spawn interval from the current score
    pub(crate) fn update_spawn_interval(&mut self) {
        self.spawn_interval = self.config.tuning.spawn_interval(self.score);
    }
}
