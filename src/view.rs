//! Read-only projection of the app for renderers
//!
//! A [`Frame`] carries everything needed to draw one screen and nothing a
//! renderer could use to cheat (tile answers are not included). The web
//! renderer receives it as a [`FrameUpdate`] together with the gameplay
//! events raised since its previous frame, so it can animate and play sounds.

use serde::Serialize;

use crate::config::ItemCosts;
use crate::economy::{Inventory, Item, Ledger};
use crate::sim::{GameEvent, GameSession};
use crate::ui::{self, Layout, MenuButton, Rect};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonView {
    pub label: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileView {
    pub id: u32,
    pub rect: Rect,
    pub text: String,
}

/// One answer button; `value` is `None` while no tile is active
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerSlotView {
    pub rect: Rect,
    pub value: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopEntryView {
    pub item: Item,
    pub label: String,
    pub cost: u32,
    pub owned: u32,
    pub affordable: bool,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView {
    /// Oldest (active) tile first
    pub tiles: Vec<TileView>,
    pub answer_slots: Vec<AnswerSlotView>,
    pub score: u32,
    pub coins: u32,
    pub lives: u8,
    pub high_score: u32,
    pub items: Inventory,
    pub game_over: bool,
    pub shop_open: bool,
    pub shop: Vec<ShopEntryView>,
    pub skip_button: Rect,
    pub shield_badge: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Frame {
    Menu {
        title: String,
        buttons: Vec<ButtonView>,
    },
    Tutorial {
        title: String,
        lines: Vec<String>,
        back: ButtonView,
    },
    Game(GameView),
    Quit,
}

impl Frame {
    pub fn menu(layout: &Layout) -> Self {
        Frame::Menu {
            title: ui::TITLE.to_string(),
            buttons: MenuButton::ALL
                .iter()
                .map(|b| ButtonView {
                    label: b.label().to_string(),
                    rect: layout.menu_button(*b),
                })
                .collect(),
        }
    }

    pub fn tutorial(layout: &Layout) -> Self {
        Frame::Tutorial {
            title: ui::TUTORIAL_TITLE.to_string(),
            lines: ui::TUTORIAL_LINES.iter().map(|l| l.to_string()).collect(),
            back: ButtonView {
                label: "Back".to_string(),
                rect: layout.tutorial_back(),
            },
        }
    }

    pub fn game(
        session: &GameSession,
        ledger: &Ledger,
        high_score: u32,
        layout: &Layout,
        costs: &ItemCosts,
    ) -> Self {
        let field = &session.config().field;
        let tiles = session
            .tiles()
            .map(|t| TileView {
                id: t.id,
                rect: Rect::new(t.x, t.position_y, field.tile_width, field.tile_height),
                text: t.problem_text(),
            })
            .collect();

        let head = session.head();
        let answer_slots = layout
            .answer_slots()
            .iter()
            .enumerate()
            .map(|(i, rect)| AnswerSlotView {
                rect: *rect,
                value: head.map(|t| t.choices[i]),
            })
            .collect();

        let shop = Item::ALL
            .iter()
            .map(|item| {
                let cost = costs.cost(*item);
                ShopEntryView {
                    item: *item,
                    label: item.label().to_string(),
                    cost,
                    owned: ledger.count(*item),
                    affordable: ledger.can_afford(cost),
                    rect: layout.shop_row(*item),
                }
            })
            .collect();

        Frame::Game(GameView {
            tiles,
            answer_slots,
            score: session.score(),
            coins: ledger.coins(),
            lives: session.lives(),
            high_score: high_score.max(session.score()),
            items: ledger.items(),
            game_over: session.is_game_over(),
            shop_open: session.is_shop_open(),
            shop,
            skip_button: layout.skip_button(),
            shield_badge: layout.shield_badge(),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One frame plus the events that led to it. Serializes as the frame's own
/// object with an extra `events` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameUpdate {
    #[serde(flatten)]
    pub frame: Frame,
    pub events: Vec<GameEvent>,
}

impl FrameUpdate {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
