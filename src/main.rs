//! Math Tiles entry point
//!
//! The web build is driven from JavaScript through `platform::web`. The
//! native binary runs a headless autoplay demo against the real save file.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use serde::Serialize;

    use math_tiles::platform::storage::FileStore;
    use math_tiles::sim::GameEvent;
    use math_tiles::ui::MenuButton;
    use math_tiles::{App, GameConfig, InputEvent};

    const FRAME_DT: f32 = 1.0 / 60.0;

    #[derive(Parser, Debug)]
    #[command(name = "math-tiles", about = "Headless autoplay demo of Math Tiles")]
    struct Args {
        /// JSON config file; defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Save file (overrides the config)
        #[arg(long)]
        save: Option<PathBuf>,
        /// Simulated seconds to play
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,
        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Probability that the bot clicks a wrong answer
        #[arg(long, default_value_t = 0.1)]
        error_rate: f64,
    }

    #[derive(Debug, Default, Serialize)]
    struct Summary {
        seed: u64,
        seconds: f32,
        correct: u32,
        wrong: u32,
        missed: u32,
        shields_used: u32,
        game_overs: u32,
        final_score: u32,
        high_score: u32,
        coins: u32,
    }

    impl Summary {
        fn record(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Correct { .. } => self.correct += 1,
                GameEvent::Wrong { .. } => self.wrong += 1,
                GameEvent::Missed { .. } => self.missed += 1,
                GameEvent::ShieldAbsorbed => self.shields_used += 1,
                GameEvent::GameOver { .. } => self.game_overs += 1,
                _ => {}
            }
        }
    }

    /// Answers the head tile after a random reaction time
    struct Bot {
        rng: Pcg32,
        error_rate: f64,
        target: Option<u32>,
        waited: f32,
        reaction: f32,
    }

    impl Bot {
        fn new(seed: u64, error_rate: f64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
                error_rate: error_rate.clamp(0.0, 1.0),
                target: None,
                waited: 0.0,
                reaction: 0.0,
            }
        }

        fn next_input(&mut self, app: &App, dt: f32) -> Option<InputEvent> {
            let session = app.session()?;
            if session.is_game_over() {
                // Any click restarts
                return Some(InputEvent::click(0.0, 0.0));
            }
            let head = session.head()?;

            if self.target != Some(head.id) {
                self.target = Some(head.id);
                self.waited = 0.0;
                self.reaction = self.rng.random_range(0.4..2.5);
            }
            self.waited += dt;
            if self.waited < self.reaction {
                return None;
            }

            let value = if self.rng.random_bool(self.error_rate) {
                head.choices
                    .iter()
                    .copied()
                    .find(|c| *c != head.answer())
                    .unwrap_or(head.answer())
            } else {
                head.answer()
            };
            let slot = head.choices.iter().position(|c| *c == value)?;
            let pos = app.layout().answer_slots()[slot].center();
            Some(InputEvent::click(pos.x, pos.y))
        }
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();

        let mut config = args
            .config
            .as_deref()
            .map(GameConfig::load)
            .unwrap_or_default();
        if let Some(save) = args.save {
            config.save_path = save;
        }
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Math Tiles (native) starting with seed {}", seed);

        let store = FileStore::new(config.save_path.clone());
        let mut app = App::new(config, Box::new(store), seed);
        let play = app.layout().menu_button(MenuButton::Play).center();
        app.frame([InputEvent::click(play.x, play.y)], 0.0);

        let mut bot = Bot::new(seed, args.error_rate);
        let mut summary = Summary {
            seed,
            seconds: args.seconds.max(0.0),
            ..Default::default()
        };
        let frames = (summary.seconds / FRAME_DT).round() as u32;
        for _ in 0..frames {
            let input = bot.next_input(&app, FRAME_DT);
            app.frame(input, FRAME_DT);
            for event in app.drain_events() {
                summary.record(&event);
            }
        }

        summary.final_score = app.session().map(|s| s.score()).unwrap_or(0);
        app.frame([InputEvent::WindowClose], 0.0);
        summary.high_score = app.high_score();
        summary.coins = app.ledger().coins();

        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not print summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
