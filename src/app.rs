//! Top-level application state machine
//!
//! ```text
//! Menu --Play--> Game        Menu --Tutorial--> Tutorial --Back--> Menu
//! Menu --Quit--> Quit        any --Esc / window close--> Quit
//! Game(over) --click--> Game(restarted)
//! ```
//!
//! The app owns the ledger and high score across sessions and decides when
//! to persist them.

use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_PENDING_EVENTS};
use crate::economy::Ledger;
use crate::persistence::{SaveCoordinator, SaveData};
use crate::platform::input::{InputEvent, Key, LEFT_BUTTON};
use crate::platform::storage::SaveStore;
use crate::sim::{self, GameEvent, GameSession, SessionAction, SessionPhase};
use crate::ui::{Layout, MenuButton};
use crate::view::{Frame, FrameUpdate};

pub enum AppState {
    Menu,
    Tutorial,
    Game(GameSession),
    Quit,
}

pub struct App {
    config: Rc<GameConfig>,
    layout: Layout,
    state: AppState,
    ledger: Ledger,
    high_score: u32,
    saves: SaveCoordinator,
    /// Seeds each new session
    seeder: Pcg32,
    /// Gameplay events not yet drained by the platform layer
    events: Vec<GameEvent>,
}

impl App {
    /// Create the app in the menu, loading progress from `store`
    pub fn new(config: GameConfig, store: Box<dyn SaveStore>, seed: u64) -> Self {
        let config = Rc::new(config.sanitized());
        let saves = SaveCoordinator::new(store);
        let save = saves.load();
        Self {
            layout: Layout::new(&config.field),
            config,
            state: AppState::Menu,
            ledger: save.ledger(),
            high_score: save.high_score,
            saves,
            seeder: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, AppState::Quit)
    }

    pub fn session(&self) -> Option<&GameSession> {
        match &self.state {
            AppState::Game(session) => Some(session),
            _ => None,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Current durable progress
    pub fn save_data(&self) -> SaveData {
        SaveData::new(self.high_score, &self.ledger)
    }

    /// Take gameplay events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The current frame together with every event drained since the last call
    pub fn take_frame(&mut self) -> FrameUpdate {
        FrameUpdate {
            events: self.drain_events(),
            frame: self.view(),
        }
    }

    /// Run one frame: apply all input, then advance the simulation.
    /// Returns false once the app has quit.
    pub fn frame<I>(&mut self, events: I, dt: f32) -> bool
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.handle_event(event);
        }
        self.update(dt);
        self.is_running()
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::WindowClose | InputEvent::KeyDown(Key::Quit) => self.quit(),
            InputEvent::KeyDown(key) => self.handle_key(key),
            InputEvent::PointerDown { pos, button } if button == LEFT_BUTTON => {
                self.handle_click(pos)
            }
            InputEvent::PointerDown { .. } => {}
        }
        self.collect_session_events();
    }

    /// Advance the simulation and flush any requested save
    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        if let AppState::Game(session) = &mut self.state {
            sim::tick(session, &mut self.ledger, dt);
        }
        self.collect_session_events();
        let data = self.save_data();
        self.saves.flush(&data);
    }

    pub fn view(&self) -> Frame {
        match &self.state {
            AppState::Menu => Frame::menu(&self.layout),
            AppState::Tutorial => Frame::tutorial(&self.layout),
            AppState::Game(session) => Frame::game(
                session,
                &self.ledger,
                self.high_score,
                &self.layout,
                &self.config.costs,
            ),
            AppState::Quit => Frame::Quit,
        }
    }

    fn handle_key(&mut self, key: Key) {
        let AppState::Game(session) = &mut self.state else {
            return;
        };
        let action = match key {
            Key::ToggleShop => SessionAction::ToggleShop,
            Key::UseSkip => SessionAction::Skip,
            Key::Quit => return,
        };
        sim::apply(session, &mut self.ledger, action);
    }

    fn handle_click(&mut self, pos: Vec2) {
        match self.state {
            AppState::Menu => match self.layout.hit_menu(pos) {
                Some(MenuButton::Play) => self.start_game(),
                Some(MenuButton::Tutorial) => {
                    log::info!("Opening tutorial");
                    self.state = AppState::Tutorial;
                }
                Some(MenuButton::Quit) => self.quit(),
                None => {}
            },
            AppState::Tutorial => {
                if self.layout.tutorial_back().contains(pos) {
                    self.state = AppState::Menu;
                }
            }
            AppState::Game(ref mut session) => {
                let action = match session.phase() {
                    SessionPhase::Over => {
                        session.restart();
                        return;
                    }
                    SessionPhase::Shop => self.layout.hit_shop(pos).map(SessionAction::Purchase),
                    SessionPhase::Running => {
                        if let Some(slot) = self.layout.hit_answer(pos) {
                            session.head().map(|t| SessionAction::Answer(t.choices[slot]))
                        } else if self.layout.skip_button().contains(pos) {
                            Some(SessionAction::Skip)
                        } else {
                            None
                        }
                    }
                };
                if let Some(action) = action {
                    sim::apply(session, &mut self.ledger, action);
                }
            }
            AppState::Quit => {}
        }
    }

    fn start_game(&mut self) {
        let seed = self.seeder.random::<u64>();
        log::info!("Starting game (seed {})", seed);
        self.state = AppState::Game(GameSession::start(self.config.clone(), seed));
    }

    fn record_score(&mut self, score: u32) {
        if score > self.high_score {
            log::info!("New high score: {} (was {})", score, self.high_score);
            self.high_score = score;
        }
    }

    fn collect_session_events(&mut self) {
        let events = match &mut self.state {
            AppState::Game(session) => session.drain_events(),
            _ => return,
        };
        for event in &events {
            if let GameEvent::GameOver { score } = *event {
                self.record_score(score);
                self.saves.request_save();
            }
        }
        self.events.extend(events);
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            log::debug!("Dropping {} undrained events", excess);
            self.events.drain(..excess);
        }
    }

    /// Enter the terminal state, saving progress first
    fn quit(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Some(score) = self.session().map(|s| s.score()) {
            self.record_score(score);
        }
        self.collect_session_events();
        self.state = AppState::Quit;
        let data = self.save_data();
        self.saves.save_best_effort(&data);
        log::info!("Quitting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::economy::{Inventory, Item};
    use crate::platform::storage::{FailingStore, MemoryStore};

    fn app_with(store: &MemoryStore) -> App {
        App::new(GameConfig::default(), Box::new(store.clone()), 7)
    }

    fn click(app: &mut App, pos: Vec2) {
        app.handle_event(InputEvent::PointerDown {
            pos,
            button: LEFT_BUTTON,
        });
    }

    fn start(app: &mut App) {
        let play = app.layout().menu_button(MenuButton::Play).center();
        click(app, play);
        assert!(matches!(app.state, AppState::Game(_)));
    }

    fn session_mut(app: &mut App) -> &mut GameSession {
        match &mut app.state {
            AppState::Game(session) => session,
            _ => panic!("not in game"),
        }
    }

    /// Click the answer slot holding `value` for the head tile
    fn click_value(app: &mut App, value: i32) {
        let head = app.session().unwrap().head().unwrap();
        let slot = head.choices.iter().position(|c| *c == value).unwrap();
        let pos = app.layout().answer_slots()[slot].center();
        click(app, pos);
    }

    fn click_correct(app: &mut App) {
        let answer = app.session().unwrap().head().unwrap().answer();
        click_value(app, answer);
    }

    fn click_wrong(app: &mut App) {
        let head = app.session().unwrap().head().unwrap();
        let wrong = *head.choices.iter().find(|c| **c != head.answer()).unwrap();
        click_value(app, wrong);
    }

    fn click_correct_after_spawn(app: &mut App) {
        session_mut(app).spawn();
        click_correct(app);
    }

    fn saved(store: &MemoryStore) -> SaveData {
        SaveData::from_json(&store.contents().unwrap()).unwrap()
    }

    #[test]
    fn test_menu_navigation() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        assert!(matches!(app.state, AppState::Menu));

        let tutorial = app.layout().menu_button(MenuButton::Tutorial).center();
        click(&mut app, tutorial);
        assert!(matches!(app.state, AppState::Tutorial));

        // Clicks outside Back do nothing
        click(&mut app, Vec2::new(5.0, 5.0));
        assert!(matches!(app.state, AppState::Tutorial));

        let back = app.layout().tutorial_back().center();
        click(&mut app, back);
        assert!(matches!(app.state, AppState::Menu));
    }

    #[test]
    fn test_play_spawns_one_tile() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        start(&mut app);
        let session = app.session().unwrap();
        assert_eq!(session.tile_count(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), 3);
    }

    #[test]
    fn test_right_click_ignored() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        let play = app.layout().menu_button(MenuButton::Play).center();
        app.handle_event(InputEvent::PointerDown { pos: play, button: 3 });
        assert!(matches!(app.state, AppState::Menu));
    }

    #[test]
    fn test_quit_button_saves() {
        let store = MemoryStore::with_contents(r#"{"high_score": 4, "coins": 9}"#);
        let mut app = app_with(&store);
        let quit = app.layout().menu_button(MenuButton::Quit).center();
        assert!(!app.frame([InputEvent::click(quit.x, quit.y)], 0.016));
        assert!(matches!(app.state, AppState::Quit));
        let data = saved(&store);
        assert_eq!(data.high_score, 4);
        assert_eq!(data.coins, 9);
    }

    #[test]
    fn test_escape_and_close_quit_from_any_state() {
        fn open_tutorial(app: &mut App) {
            let tutorial = app.layout().menu_button(MenuButton::Tutorial).center();
            click(app, tutorial);
            assert!(matches!(app.state, AppState::Tutorial));
        }
        let setups: [fn(&mut App); 3] = [|_| {}, open_tutorial, start];
        for setup in setups {
            for event in [InputEvent::KeyDown(Key::Quit), InputEvent::WindowClose] {
                let store = MemoryStore::default();
                let mut app = app_with(&store);
                setup(&mut app);
                app.handle_event(event);
                assert!(!app.is_running());
                assert!(store.contents().is_some());
                assert!(matches!(app.view(), Frame::Quit));
            }
        }
    }

    #[test]
    fn test_quit_mid_game_records_high_score() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        start(&mut app);
        click_correct(&mut app);
        click_correct_after_spawn(&mut app);
        app.handle_event(InputEvent::WindowClose);
        assert_eq!(app.high_score(), 2);
        assert_eq!(saved(&store).high_score, 2);
        assert_eq!(saved(&store).coins, 2);
    }

    #[test]
    fn test_loads_existing_progress() {
        let store = MemoryStore::with_contents(
            r#"{"high_score": 12, "coins": 30, "items": {"skip": 1, "shield": 2}}"#,
        );
        let app = app_with(&store);
        assert_eq!(app.high_score(), 12);
        assert_eq!(app.ledger().coins(), 30);
        assert_eq!(app.ledger().items(), Inventory { skip: 1, shield: 2 });
    }

    #[test]
    fn test_input_applies_before_tick() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        start(&mut app);
        // Head tile is one step away from the bottom
        session_mut(&mut app).tiles.front_mut().unwrap().position_y = SCREEN_H - 1.0;
        let answer = app.session().unwrap().head().unwrap().answer();
        let head = app.session().unwrap().head().unwrap();
        let slot = head.choices.iter().position(|c| *c == answer).unwrap();
        let pos = app.layout().answer_slots()[slot].center();

        app.frame([InputEvent::click(pos.x, pos.y)], 0.1);
        let session = app.session().unwrap();
        assert_eq!(session.score(), 1);
        assert_eq!(session.lives(), 3);
    }

    #[test]
    fn test_game_over_saves_and_click_restarts() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        start(&mut app);
        click_correct(&mut app);
        session_mut(&mut app).lives = 1;
        session_mut(&mut app).spawn();
        click_wrong(&mut app);
        assert!(app.session().unwrap().is_game_over());
        assert_eq!(app.high_score(), 1);

        // Save is flushed at the end of the frame
        app.update(0.016);
        assert_eq!(saved(&store).high_score, 1);
        assert!(app.drain_events().contains(&GameEvent::GameOver { score: 1 }));

        click(&mut app, Vec2::new(1.0, 1.0));
        let session = app.session().unwrap();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.tile_count(), 1);
        assert_eq!(app.ledger().coins(), 1);
    }

    #[test]
    fn test_high_score_never_decreases() {
        let store = MemoryStore::with_contents(r#"{"high_score": 50}"#);
        let mut app = app_with(&store);
        start(&mut app);
        session_mut(&mut app).lives = 1;
        click_wrong(&mut app);
        app.update(0.0);
        assert_eq!(app.high_score(), 50);
        assert_eq!(saved(&store).high_score, 50);
    }

    #[test]
    fn test_shop_purchase_by_click() {
        let store = MemoryStore::with_contents(r#"{"coins": 10}"#);
        let mut app = app_with(&store);
        start(&mut app);
        app.handle_event(InputEvent::KeyDown(Key::ToggleShop));
        assert!(app.session().unwrap().is_shop_open());

        let shield = app.layout().shop_row(Item::Shield).center();
        click(&mut app, shield);
        assert_eq!(app.ledger().coins(), 10);

        let skip = app.layout().shop_row(Item::Skip).center();
        click(&mut app, skip);
        assert_eq!(app.ledger().coins(), 2);
        assert_eq!(app.ledger().count(Item::Skip), 1);

        // Simulation is frozen while shopping
        let y = app.session().unwrap().head().unwrap().position_y;
        app.update(0.1);
        assert_eq!(app.session().unwrap().head().unwrap().position_y, y);

        app.handle_event(InputEvent::KeyDown(Key::ToggleShop));
        assert_eq!(app.session().unwrap().phase(), SessionPhase::Running);
    }

    #[test]
    fn test_skip_key_and_button() {
        let store = MemoryStore::with_contents(r#"{"items": {"skip": 2}}"#);
        let mut app = app_with(&store);
        start(&mut app);
        app.handle_event(InputEvent::KeyDown(Key::UseSkip));
        assert_eq!(app.session().unwrap().tile_count(), 0);
        assert_eq!(app.ledger().count(Item::Skip), 1);

        session_mut(&mut app).spawn();
        let button = app.layout().skip_button().center();
        click(&mut app, button);
        assert_eq!(app.session().unwrap().tile_count(), 0);
        assert_eq!(app.ledger().count(Item::Skip), 0);
        assert_eq!(app.session().unwrap().lives(), 3);
    }

    #[test]
    fn test_save_failure_keeps_running() {
        let mut app = App::new(GameConfig::default(), Box::new(FailingStore), 1);
        start(&mut app);
        session_mut(&mut app).lives = 1;
        click_wrong(&mut app);
        app.update(0.016);
        assert!(app.is_running());
        assert!(app.session().unwrap().is_game_over());
    }

    #[test]
    fn test_view_projection() {
        let store = MemoryStore::with_contents(r#"{"high_score": 3, "coins": 20}"#);
        let mut app = app_with(&store);
        assert!(matches!(app.view(), Frame::Menu { ref buttons, .. } if buttons.len() == 3));
        start(&mut app);
        let Frame::Game(view) = app.view() else {
            panic!("expected game frame");
        };
        let head = app.session().unwrap().head().unwrap();
        assert_eq!(view.tiles.len(), 1);
        assert_eq!(view.tiles[0].text, head.problem_text());
        let values: Vec<i32> = view.answer_slots.iter().map(|s| s.value.unwrap()).collect();
        assert_eq!(values, head.choices.to_vec());
        assert_eq!(view.high_score, 3);
        assert_eq!(view.coins, 20);
        assert!(!view.game_over);
        assert!(!view.shop_open);
        assert!(view.shop.iter().all(|e| e.affordable));

        let json = app.view().to_json().unwrap();
        assert!(json.contains("\"state\":\"game\""));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        start(&mut app);

        for _ in 0..3 {
            if app.session().unwrap().head().is_none() {
                session_mut(&mut app).spawn();
            }
            click_correct(&mut app);
        }
        let session = app.session().unwrap();
        assert_eq!(session.score(), 3);
        assert_eq!(app.ledger().coins(), 3);
        assert!((session.spawn_interval() - 1.91).abs() < 1e-5);

        // Let a tile fall off the bottom with no shield
        session_mut(&mut app).spawn();
        session_mut(&mut app).tiles.front_mut().unwrap().position_y = SCREEN_H + 1.0;
        app.update(0.0);
        assert_eq!(app.session().unwrap().lives(), 2);

        // A shield costs 15; 3 coins is not enough
        let before = app.ledger().clone();
        app.handle_event(InputEvent::KeyDown(Key::ToggleShop));
        let shield = app.layout().shop_row(Item::Shield).center();
        click(&mut app, shield);
        assert_eq!(*app.ledger(), before);
        assert_eq!(app.ledger().coins(), 3);
        assert_eq!(app.ledger().count(Item::Shield), 0);
    }

    #[test]
    fn test_frame_carries_events_once() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        start(&mut app);
        let id = app.session().unwrap().head().unwrap().id;
        let answer = app.session().unwrap().head().unwrap().answer();
        let head = app.session().unwrap().head().unwrap();
        let slot = head.choices.iter().position(|c| *c == answer).unwrap();
        let pos = app.layout().answer_slots()[slot].center();
        app.frame([InputEvent::click(pos.x, pos.y)], 0.016);

        let update = app.take_frame();
        assert!(update.events.contains(&GameEvent::Correct { id, score: 1 }));
        let value: serde_json::Value = serde_json::from_str(&update.to_json().unwrap()).unwrap();
        assert_eq!(value["state"], "game");
        assert_eq!(value["score"], 1);
        let events = value["events"].as_array().unwrap();
        assert!(events.contains(&serde_json::json!({"kind": "correct", "id": id, "score": 1})));

        // Already delivered
        app.frame([], 0.016);
        assert!(app.take_frame().events.is_empty());
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        start(&mut app);
        for _ in 0..MAX_PENDING_EVENTS + 50 {
            session_mut(&mut app).spawn();
            app.update(0.0);
        }
        let last = app.session().unwrap().tiles().last().unwrap().id;
        let events = app.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events.last(), Some(&GameEvent::TileSpawned { id: last }));
    }

    #[test]
    fn test_frame_clamps_large_dt() {
        let store = MemoryStore::default();
        let mut app = app_with(&store);
        start(&mut app);
        app.frame([], 10.0);
        let head = app.session().unwrap().head().unwrap();
        assert!((head.position_y - (SPAWN_Y + BASE_FALL_SPEED * MAX_FRAME_DT)).abs() < 1e-4);
    }
}
