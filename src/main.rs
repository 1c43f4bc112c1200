//! Barnyard Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use barnyard_dash::audio::{AudioManager, SoundEffect};
    use barnyard_dash::persistence::LocalStorage;
    use barnyard_dash::platform::{InputLatch, Key, TouchZone};
    use barnyard_dash::renderer::CanvasRenderer;
    use barnyard_dash::sim::{Arena, GameEvent};
    use barnyard_dash::{Session, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorage>,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        input: InputLatch,
        canvas: HtmlCanvasElement,
        overlay_visible: bool,
    }

    impl Game {
        /// Run one simulation tick and react to its events
        fn update(&mut self) {
            let input = self.input.take();
            for event in self.session.frame(&input) {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                if let GameEvent::GameOver { final_score } = event {
                    show_game_over(Some(final_score));
                    self.overlay_visible = true;
                }
            }
            if self.overlay_visible && !self.session.awaiting_restart() {
                show_game_over(None);
                self.overlay_visible = false;
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.session.snapshot());
            }
        }

        /// Match the canvas to the window and tell the simulation
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            if let Err(e) = self.session.resize(width as f32, height as f32) {
                log::warn!("Ignoring resize: {}", e);
            }
        }
    }

    /// Show the game-over overlay with the final score, or hide it
    fn show_game_over(final_score: Option<u64>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(el) = document.get_element_by_id("game-over") else {
            return;
        };
        match final_score {
            Some(score) => {
                let _ = el.set_attribute("class", "");
                if let Some(score_el) = document.get_element_by_id("final-score") {
                    score_el.set_text_content(Some(&score.to_string()));
                }
            }
            None => {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Barnyard Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let store = LocalStorage::new();
        let settings = Settings::load(&store);
        let mut tuning = Tuning::default();
        settings.apply_to(&mut tuning);

        let seed = js_sys::Date::now() as u64;
        let arena = Arena::new(width as f32, height as f32).expect("canvas has no area");
        let session = Session::new(seed, arena, tuning, store).expect("invalid game setup");

        let renderer = CanvasRenderer::new(&canvas, settings.sprites);
        if renderer.is_none() {
            log::error!("Canvas 2D context unavailable - nothing will be drawn");
        }

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            audio: AudioManager::new(&settings),
            input: InputLatch::new(),
            canvas: canvas.clone(),
            overlay_visible: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Barnyard Dash running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.input.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let mut g = game.borrow_mut();
                g.audio.resume();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.item(i) {
                        let x = touch.client_x() as f32 - rect.left() as f32;
                        let zone = TouchZone::from_position(x, rect.width() as f32);
                        g.input.touch_start(zone);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let mut g = game.borrow_mut();
                if event.touches().length() == 0 {
                    g.input.release_all();
                    return;
                }
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.item(i) {
                        let x = touch.client_x() as f32 - rect.left() as f32;
                        g.input.touch_end(TouchZone::from_position(x, rect.width() as f32));
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.key_down(Key::Restart);
                log::info!("Restart requested");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One tick per display refresh
    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
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

/// Headless run: a scripted player against the real simulation
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use barnyard_dash::persistence::MemoryStore;
    use barnyard_dash::sim::{Arena, GameEvent, TickInput};
    use barnyard_dash::{Session, Tuning, consts::TICK_RATE};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Barnyard Dash (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Cannot use tuning file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let arena = match Arena::new(800.0, 600.0) {
        Ok(arena) => arena,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let mut session = match Session::new(2024, arena, tuning, MemoryStore::new()) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Two minutes of play: weave left and right, hop now and then
    let total_ticks = 120 * TICK_RATE;
    let mut games = 0;
    for t in 0..total_ticks {
        let phase = t % 240;
        let input = TickInput {
            move_left: phase < 100,
            move_right: (120..220).contains(&phase),
            jump_held: t % 90 < 12,
            jump_pressed: t % 90 == 0,
            restart: session.awaiting_restart(),
        };
        for event in session.frame(&input) {
            match event {
                GameEvent::GameOver { final_score } => {
                    games += 1;
                    log::info!("Game {} over with score {}", games, final_score);
                }
                GameEvent::ObstacleHit { lives } => log::debug!("Hit! {} lives left", lives),
                GameEvent::PowerUpCollected(kind) => log::debug!("Picked up {:?}", kind),
                _ => {}
            }
        }
    }

    log::info!(
        "Finished {} ticks: {} completed games, high score {}",
        total_ticks,
        games,
        session.snapshot().high_score
    );
    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
