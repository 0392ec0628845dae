//! Session actions and the simulation tick
//!
//! Input is applied first through [`apply`], then [`tick`] advances timers
//! and tile motion, so a click always acts on the tiles as they were going
//! into the frame.

use super::state::{GameEvent, GameSession, SessionPhase};
use crate::economy::{Item, Ledger};

/// Discrete player commands for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Answer the head tile with this value
    Answer(i32),
    /// Spend a skip item on the head tile
    Skip,
    /// Buy one item in the shop
    Purchase(Item),
    /// Open or close the shop
    ToggleShop,
}

/// Result of answering the head tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    /// No tile to answer, or the session is not running
    Ignored,
}

/// Apply one action to the session
pub fn apply(session: &mut GameSession, ledger: &mut Ledger, action: SessionAction) {
    match action {
        SessionAction::Answer(value) => {
            evaluate_answer(session, ledger, value);
        }
        SessionAction::Skip => {
            use_skip(session, ledger);
        }
        SessionAction::Purchase(item) => {
            purchase(session, ledger, item);
        }
        SessionAction::ToggleShop => toggle_shop(session),
    }
}

/// Check `selected` against the head tile.
///
/// Either way the head tile is removed: a wrong answer counts as a miss,
/// exactly like a tile reaching the bottom.
pub fn evaluate_answer(session: &mut GameSession, ledger: &mut Ledger, selected: i32) -> AnswerOutcome {
    if session.phase != SessionPhase::Running {
        return AnswerOutcome::Ignored;
    }
    let Some(head) = session.pop_head() else {
        return AnswerOutcome::Ignored;
    };

    if selected == head.answer() {
        session.score += 1;
        ledger.credit_coins(1);
        session.update_spawn_interval();
        log::debug!("Correct: '{}' = {} (score {})", head.problem, selected, session.score);
        session.emit(GameEvent::Correct {
            id: head.id,
            score: session.score,
        });
        AnswerOutcome::Correct
    } else {
        log::debug!("Wrong: '{}' = {}, picked {}", head.problem, head.answer(), selected);
        session.emit(GameEvent::Wrong {
            id: head.id,
            selected,
            answer: head.answer(),
        });
        session.apply_miss_penalty(ledger);
        AnswerOutcome::Wrong
    }
}

/// Discard the head tile using a skip item. No effect without a skip item
/// or a tile to discard.
pub fn use_skip(session: &mut GameSession, ledger: &mut Ledger) -> bool {
    if session.phase != SessionPhase::Running || session.head().is_none() {
        return false;
    }
    if !ledger.consume(Item::Skip) {
        log::debug!("No skip items");
        return false;
    }
    if let Some(tile) = session.pop_head() {
        log::debug!("Skipped tile {}", tile.id);
        session.emit(GameEvent::Skipped { id: tile.id });
    }
    true
}

/// Buy an item at the configured price. Only possible while the shop is open.
pub fn purchase(session: &mut GameSession, ledger: &mut Ledger, item: Item) -> bool {
    if session.phase != SessionPhase::Shop {
        return false;
    }
    let cost = session.config().costs.cost(item);
    if ledger.purchase(item, cost) {
        log::info!("Bought {} for {} coins", item.as_str(), cost);
        session.emit(GameEvent::Purchased { item });
        true
    } else {
        session.emit(GameEvent::PurchaseDenied { item });
        false
    }
}

/// Switch between running and shopping. Ignored after game over.
pub fn toggle_shop(session: &mut GameSession) {
    match session.phase {
        SessionPhase::Running => {
            session.phase = SessionPhase::Shop;
            session.emit(GameEvent::ShopOpened);
        }
        SessionPhase::Shop => {
            session.phase = SessionPhase::Running;
            session.emit(GameEvent::ShopClosed);
        }
        SessionPhase::Over => {}
    }
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut GameSession, ledger: &mut Ledger, dt: f32) {
    // Shop and game over both freeze the field
    if session.phase != SessionPhase::Running {
        return;
    }

    session.spawn_timer += dt;
    if session.spawn_timer >= session.spawn_interval {
        session.spawn_timer = 0.0;
        session.spawn();
    }

    let fall_speed = session.fall_speed();
    for tile in session.tiles.iter_mut() {
        tile.fall_speed = fall_speed;
        tile.update(dt);
    }

    let bottom = session.config().field.bottom();
    if session.head().is_some_and(|t| t.position_y > bottom) {
        if let Some(tile) = session.pop_head() {
            log::debug!("Missed tile {} '{}'", tile.id, tile.problem);
            session.emit(GameEvent::Missed { id: tile.id });
            session.apply_miss_penalty(ledger);
        }
    }
}
