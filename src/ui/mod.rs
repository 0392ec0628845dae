//! Screen layout and hit-testing
//!
//! Renderers draw the buttons wherever they like, but clicks are resolved
//! against these rectangles, so the two should agree.

pub mod layout;

pub use layout::{Layout, MenuButton, Rect};

pub const TITLE: &str = "Math Tiles";
pub const TUTORIAL_TITLE: &str = "How to Play Math Tiles";

/// Tutorial screen text, one entry per line
pub const TUTORIAL_LINES: &[&str] = &[
    "Solve falling math problems before they reach the bottom!",
    "Click the correct answer on the right panel.",
    "You start with 3 lives. Lose one for each wrong or missed tile.",
    "Earn 1 coin for each correct answer.",
    "Press S to open the shop:",
    "  - Buy 'Skip' to remove the current problem.",
    "  - Buy 'Shield' to block one mistake.",
    "Controls:",
    "  S - Open/close shop",
    "  K - Use Skip item",
    "  ESC - Quit game",
    "Click 'Back' below to return to menu.",
];
