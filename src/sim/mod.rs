//! Gameplay simulation
//!
//! All game rules live here. This module has no rendering or platform
//! dependencies:
//! - Randomness comes from a seeded RNG owned by the session
//! - Tiles are a FIFO queue; only the front tile is interactive
//! - Input is applied before each tick

pub mod choices;
pub mod problem;
pub mod state;
pub mod tick;

pub use choices::Choices;
pub use problem::{Operator, Problem};
pub use state::{GameEvent, GameSession, SessionPhase, Tile};
pub use tick::{AnswerOutcome, SessionAction, apply, evaluate_answer, purchase, tick, toggle_shop, use_skip};
