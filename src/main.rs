//! Circle Chase entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use circle_chase::renderer::{Palette, RenderState, scene_vertices};
    use circle_chase::sim::{Bounds, GameEvent, GameState, MoveKey, TickInput, tick};
    use circle_chase::{HighScores, RenderError, Settings, Toggle};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        palette: Palette,
        high_scores: HighScores,
        input: TickInput,
        /// rAF timestamp of the first frame of the current run
        run_start: Option<f64>,
        /// Rank reached by the finished run, if it made the board
        last_rank: Option<usize>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, bounds: Bounds) -> Self {
            Self {
                state: GameState::new(seed, settings.tuning(), bounds),
                render_state: None,
                palette: Palette::new(settings.high_contrast),
                settings,
                high_scores: HighScores::load(),
                input: TickInput::default(),
                run_start: None,
                last_rank: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation tick for this animation frame
        fn update(&mut self, time: f64) {
            let start = *self.run_start.get_or_insert(time);
            self.input.now_ms = time - start;

            tick(&mut self.state, &self.input);
            // Fire is one-shot; key repeat re-arms it while Space is held
            self.input.fire = false;

            for event in self.state.drain_events() {
                match event {
                    GameEvent::PlayerHit { health, .. } => {
                        log::debug!("Player hit, health {}", health);
                    }
                    GameEvent::GameOver { score, ticks } => {
                        self.last_rank =
                            self.high_scores.add_score(score, ticks, js_sys::Date::now());
                        if self.last_rank.is_some() {
                            self.high_scores.save();
                        }
                    }
                    _ => {}
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene_vertices(&self.state, &self.palette);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices, self.palette.background) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud") {
                let class = if self.settings.show_hud { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            let combat = self.state.tuning.has_combat();
            for id in ["hud-health", "hud-score"] {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = if combat { "hud-item" } else { "hud-item hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }

            if combat {
                if let Some(el) = document.query_selector("#hud-health .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.state.health.max(0).to_string()));
                }
                if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.is_game_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let Some(rank_el) = document.get_element_by_id("final-rank") {
                        let text = match (self.last_rank, self.high_scores.best()) {
                            (Some(1), _) => "New best on this browser!".to_string(),
                            (Some(rank), _) => format!("#{} on this browser", rank),
                            (None, Some(best)) => format!("Best: {}", best.describe()),
                            (None, None) => String::new(),
                        };
                        rank_el.set_text_content(Some(&text));
                    }
                    if let Some(board_el) = document.get_element_by_id("final-board") {
                        board_el.set_inner_html(&self.board_html());
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// `<li>` rows for the leaderboard, marking the run that just ended
        fn board_html(&self) -> String {
            self.high_scores
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let class = if self.last_rank == Some(i + 1) {
                        " class=\"current\""
                    } else {
                        ""
                    };
                    format!("<li{}>{}</li>", class, entry.describe())
                })
                .collect()
        }

        /// Flip a preference, persist it and refresh what depends on it
        fn apply_toggle(&mut self, toggle: Toggle) {
            let on = self.settings.toggle(toggle);
            self.settings.save();
            if toggle == Toggle::HighContrast {
                self.palette = Palette::new(on);
            }
        }

        /// Start a fresh run, keeping canvas size and settings
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed, self.settings.tuning(), self.state.bounds);
            self.input = TickInput {
                aim: self.input.aim,
                ..Default::default()
            };
            self.run_start = None;
            self.last_rank = None;
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Circle Chase starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut settings = Settings::load();
        if let Ok(query) = window.location().search() {
            settings.apply_query(&query);
        }
        log::info!("Variant: {}", settings.variant.as_str());

        let (width, height, view) = canvas_size(&window, &canvas);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            settings,
            Bounds::new(view.x, view.y),
        )));
        log::info!("Game initialized with seed: {}", seed);

        match init_renderer(&canvas, width, height, view).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer unavailable, running without graphics: {}", e),
        }

        setup_input_handlers(game.clone());
        setup_resize(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Circle Chase running!");
    }

    /// Size the canvas backing store for the device pixel ratio
    ///
    /// Returns (physical width, physical height, CSS size).
    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32, Vec2) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height, Vec2::new(client_w as f32, client_h as f32))
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        view: Vec2,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, view).await
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Key down: movement, fire, restart, preference toggles
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                match key.as_str() {
                    " " => {
                        event.prevent_default();
                        g.input.fire = true;
                    }
                    "r" | "R" if g.state.is_game_over() => {
                        let seed = js_sys::Date::now() as u64;
                        g.restart(seed);
                    }
                    _ => {
                        if let Some(move_key) = MoveKey::from_key(&key) {
                            g.state.press_key(move_key);
                        } else if let Some(toggle) = Toggle::from_key(&key) {
                            if !event.repeat() {
                                g.apply_toggle(toggle);
                            }
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(move_key) = MoveKey::from_key(&event.key()) {
                    game.borrow_mut().state.release_key(move_key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - aim relative to the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(canvas) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id("game-canvas"))
                else {
                    return;
                };
                let rect = canvas.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().input.aim = Some(Vec2::new(x, y));
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - keyup events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().state.release_all_keys();
                log::debug!("Window blur, movement keys released");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height, view) = canvas_size(&window, &canvas);
            let mut g = game.borrow_mut();
            g.state.resize(view.x, view.y);
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height, view);
            }
            log::info!("Canvas resized to {}x{}", view.x, view.y);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Circle Chase (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the playable web version");

    let mut args = std::env::args().skip(1);
    let variant = args
        .next()
        .and_then(|s| circle_chase::Variant::from_str(&s))
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    headless::run(variant, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use circle_chase::Variant;
    use circle_chase::consts::*;
    use circle_chase::sim::{Bounds, GameEvent, GameState, MoveKey, TickInput, tick};

    /// One simulated minute at 60 Hz
    const DEMO_TICKS: u64 = 60 * 60;

    /// Play a scripted run: circle the arena and shoot the nearest enemy
    pub fn run(variant: Variant, seed: u64) {
        let bounds = Bounds::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT);
        let mut state = GameState::new(seed, circle_chase::sim::Tuning::for_variant(variant), bounds);
        log::info!("Variant {} with seed {}", variant.as_str(), seed);

        let route = [MoveKey::Right, MoveKey::Down, MoveKey::Left, MoveKey::Up];
        let mut leg = 0;
        state.press_key(route[leg]);

        let (mut kills, mut hits, mut shots) = (0u32, 0u32, 0u32);

        for frame in 1..=DEMO_TICKS {
            // Switch direction every two seconds
            if frame % 120 == 0 {
                state.release_key(route[leg]);
                leg = (leg + 1) % route.len();
                state.press_key(route[leg]);
            }

            let aim = nearest_enemy(&state).unwrap_or(Vec2::new(bounds.width, bounds.height / 2.0));
            let input = TickInput {
                now_ms: frame as f64 * FRAME_MS,
                fire: true,
                aim: Some(aim),
            };
            tick(&mut state, &input);

            for event in state.drain_events() {
                match event {
                    GameEvent::ParticleFired { .. } => shots += 1,
                    GameEvent::EnemyKilled { enemy_id, .. } => {
                        kills += 1;
                        log::debug!("Tick {}: enemy {} destroyed", frame, enemy_id);
                    }
                    GameEvent::PlayerHit { health, .. } => {
                        hits += 1;
                        log::info!("Tick {}: player hit, health {}", frame, health);
                    }
                    GameEvent::EnemySpawned { .. } => {}
                    GameEvent::GameOver { score, ticks } => {
                        log::info!("Game over at tick {} with score {}", ticks, score);
                    }
                }
            }

            if state.is_game_over() {
                break;
            }
        }

        println!(
            "{}: {} ticks, {} shots, {} kills, {} hits taken, score {}, health {}",
            variant.as_str(),
            state.time_ticks,
            shots,
            kills,
            hits,
            state.score,
            state.health
        );
    }

    fn nearest_enemy(state: &GameState) -> Option<Vec2> {
        let from = state.player.pos;
        state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .min_by(|a, b| {
                a.pos
                    .distance(from)
                    .partial_cmp(&b.pos.distance(from))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.pos)
    }
}
