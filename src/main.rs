//! Flappy Edge entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use flappy_edge::audio::AudioManager;
    use flappy_edge::input::{ClickTarget, route_click};
    use flappy_edge::persistence::{LocalStore, MemoryStore, Store};
    use flappy_edge::sim::{GamePhase, GameState, TickInput, tick};
    use flappy_edge::{EffectHandler, Tuning};

    /// LocalStorage when available, otherwise a throwaway map
    enum AnyStore {
        Local(LocalStore),
        Memory(MemoryStore),
    }

    impl Store for AnyStore {
        fn get(&self, key: &str) -> Result<Option<String>, flappy_edge::persistence::StorageError> {
            match self {
                AnyStore::Local(s) => s.get(key),
                AnyStore::Memory(s) => s.get(key),
            }
        }

        fn set(
            &mut self,
            key: &str,
            value: &str,
        ) -> Result<(), flappy_edge::persistence::StorageError> {
            match self {
                AnyStore::Local(s) => s.set(key, value),
                AnyStore::Memory(s) => s.set(key, value),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        effects: EffectHandler<AnyStore, AudioManager>,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store = match LocalStore::open() {
                Ok(store) => AnyStore::Local(store),
                Err(e) => {
                    log::warn!("{e} - scores will not persist");
                    AnyStore::Memory(MemoryStore::new())
                }
            };
            let effects = EffectHandler::new(store, AudioManager::new());
            // Built-in preset, always valid
            let state = GameState::new(Tuning::default(), seed, effects.profile.high_score)
                .expect("default tuning is valid");
            Self {
                state,
                effects,
                input: TickInput::default(),
            }
        }

        /// One animation frame
        fn update(&mut self) {
            let events = tick(&mut self.state, &self.input);
            self.effects.apply(&events);
            // Flap is one-shot
            self.input.flap = false;
        }

        fn click(&mut self, pos: Vec2) {
            match route_click(self.state.phase, self.state.tuning.screen_width, pos) {
                ClickTarget::SoundToggle => self.effects.toggle_sound(),
                ClickTarget::Flap => self.input.flap = true,
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let profile = &self.effects.profile;

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&self.state.high_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-sound") {
                el.set_text_content(Some(if profile.sounds_enabled {
                    "Sound: ON"
                } else {
                    "Sound: OFF"
                }));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    let recent = profile
                        .history
                        .recent(5)
                        .iter()
                        .enumerate()
                        .map(|(i, e)| format!("{}. {}  {}", i + 1, e.score, e.date))
                        .collect::<Vec<_>>()
                        .join("\n");
                    if let Some(list) = document.get_element_by_id("recent-scores") {
                        list.set_text_content(Some(&recent));
                    }
                    if let Some(banner) = document.get_element_by_id("new-high-score") {
                        let class = if self.state.new_high_score { "" } else { "hidden" };
                        let _ = banner.set_attribute("class", class);
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Edge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click - sound toggle or flap
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let pos = Vec2::new(
                    (event.client_x() as f64 - rect.left()) as f32,
                    (event.client_y() as f64 - rect.top()) as f32,
                );
                game.borrow_mut().click(pos);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().input.flap = true;
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_edge::EffectHandler;
    use flappy_edge::audio::LogSink;
    use flappy_edge::demo::{DEMO_MAX_FRAMES, load_tuning, play_runs};
    use flappy_edge::persistence::MemoryStore;
    use flappy_edge::sim::GameState;

    env_logger::init();
    log::info!("Flappy Edge (native) starting...");
    log::info!("Native mode runs headless autopilot demos - serve the wasm build to play");

    // Usage: flappy-edge [runs] [classic | compact | tuning.json]
    let mut args = std::env::args().skip(1);
    let runs: u32 = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(3);
    let preset = args.next().unwrap_or_else(|| "classic".to_string());
    let seed = 0x5eed;

    let tuning = match load_tuning(&preset) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut effects = EffectHandler::new(MemoryStore::new(), LogSink);
    let mut state = match GameState::new(tuning, seed, effects.profile.high_score) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("Playing {runs} runs with `{preset}` tuning");

    for (i, run) in play_runs(&mut state, &mut effects, runs, DEMO_MAX_FRAMES)
        .iter()
        .enumerate()
    {
        let outcome = if run.finished { "crashed" } else { "abandoned" };
        println!(
            "Run {}: score {} after {} frames ({outcome})",
            i + 1,
            run.score,
            run.frames
        );
    }
    println!("Best: {}", effects.profile.high_score);

    println!("\nRecent scores:");
    for (i, entry) in effects.profile.history.recent(5).iter().enumerate() {
        println!("{}. {} ({})", i + 1, entry.score, entry.date);
    }
}
