//! Button rectangles derived from the field size

use glam::Vec2;
use serde::Serialize;

use crate::config::FieldConfig;
use crate::consts::CHOICE_COUNT;
use crate::economy::Item;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}

/// Main menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Play,
    Tutorial,
    Quit,
}

impl MenuButton {
    pub const ALL: [MenuButton; 3] = [MenuButton::Play, MenuButton::Tutorial, MenuButton::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuButton::Play => "Play",
            MenuButton::Tutorial => "Tutorial",
            MenuButton::Quit => "Quit",
        }
    }
}

const MENU_BUTTON_SIZE: Vec2 = Vec2::new(200.0, 60.0);
const MENU_BUTTON_TOP: f32 = 300.0;
const MENU_BUTTON_GAP: f32 = 90.0;

const ANSWER_BUTTON_SIZE: Vec2 = Vec2::new(160.0, 80.0);
const ANSWER_PANEL_MARGIN: f32 = 40.0;
const ANSWER_BUTTON_YS: [f32; CHOICE_COUNT] = [140.0, 260.0, 380.0];

const HUD_BUTTON_SIZE: Vec2 = Vec2::new(120.0, 34.0);

/// Every clickable region, computed once per field size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    menu: [Rect; 3],
    tutorial_back: Rect,
    answers: [Rect; CHOICE_COUNT],
    skip_button: Rect,
    shield_badge: Rect,
    shop_rows: [Rect; 2],
}

impl Layout {
    pub fn new(field: &FieldConfig) -> Self {
        let w = field.width;
        let h = field.height;

        let menu = std::array::from_fn(|i| {
            Rect::new(
                w / 2.0 - MENU_BUTTON_SIZE.x / 2.0,
                MENU_BUTTON_TOP + i as f32 * MENU_BUTTON_GAP,
                MENU_BUTTON_SIZE.x,
                MENU_BUTTON_SIZE.y,
            )
        });

        let answer_x = w - ANSWER_BUTTON_SIZE.x - ANSWER_PANEL_MARGIN;
        let answers = ANSWER_BUTTON_YS
            .map(|y| Rect::new(answer_x, y, ANSWER_BUTTON_SIZE.x, ANSWER_BUTTON_SIZE.y));

        Self {
            menu,
            tutorial_back: Rect::new(w / 2.0 - 60.0, h - 60.0, 120.0, 45.0),
            answers,
            skip_button: Rect::new(w - 140.0, 10.0, HUD_BUTTON_SIZE.x, HUD_BUTTON_SIZE.y),
            shield_badge: Rect::new(w - 280.0, 10.0, HUD_BUTTON_SIZE.x, HUD_BUTTON_SIZE.y),
            shop_rows: [
                Rect::new(20.0, 48.0, 380.0, 34.0),
                Rect::new(20.0, 94.0, 380.0, 34.0),
            ],
        }
    }

    pub fn menu_button(&self, button: MenuButton) -> Rect {
        self.menu[button as usize]
    }

    pub fn tutorial_back(&self) -> Rect {
        self.tutorial_back
    }

    pub fn answer_slots(&self) -> &[Rect; CHOICE_COUNT] {
        &self.answers
    }

    pub fn skip_button(&self) -> Rect {
        self.skip_button
    }

    /// Shield count display (not clickable)
    pub fn shield_badge(&self) -> Rect {
        self.shield_badge
    }

    pub fn shop_row(&self, item: Item) -> Rect {
        match item {
            Item::Skip => self.shop_rows[0],
            Item::Shield => self.shop_rows[1],
        }
    }

    pub fn hit_menu(&self, pos: Vec2) -> Option<MenuButton> {
        MenuButton::ALL
            .into_iter()
            .find(|b| self.menu_button(*b).contains(pos))
    }

    /// Index of the answer slot under `pos`
    pub fn hit_answer(&self, pos: Vec2) -> Option<usize> {
        self.answers.iter().position(|r| r.contains(pos))
    }

    pub fn hit_shop(&self, pos: Vec2) -> Option<Item> {
        Item::ALL
            .into_iter()
            .find(|item| self.shop_row(*item).contains(pos))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(&FieldConfig::default())
    }
}
