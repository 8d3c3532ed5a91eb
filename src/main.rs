//! Duel Pong entry point
//!
//! In the browser this wires keyboard, audio, particles, and WebGPU around a
//! [`MatchController`](duel_pong::MatchController). Natively it plays a
//! scripted headless match.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use duel_pong::Settings;
    use duel_pong::audio::AudioManager;
    use duel_pong::consts::*;
    use duel_pong::effects::ParticleSystem;
    use duel_pong::hud;
    use duel_pong::input::{KeyBindings, KeyboardState};
    use duel_pong::renderer::{FrameRecovery, RenderState, build_scene};
    use duel_pong::sim::{EventSink, GameEvent, GamePhase, MatchController, Side, dispatch};

    /// Game instance holding all state
    struct Game {
        controller: MatchController,
        keyboard: KeyboardState,
        particles: ParticleSystem,
        /// Created on the first start (needs a user gesture)
        audio: Option<AudioManager>,
        settings: Settings,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        document: Document,
        last_time: f64,
        /// Pause requested by focus loss, applied next frame
        auto_pause: bool,
        // FPS tracking
        frame_count: u32,
        fps_time: f64,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, document: Document) -> Self {
            let settings = Settings::load();
            let mut particles = ParticleSystem::new(FIELD_WIDTH, seed.wrapping_add(1));
            particles.set_enabled(settings.particles);

            Self {
                controller: MatchController::new(settings.match_config(), seed),
                keyboard: KeyboardState::new(KeyBindings::default()),
                particles,
                audio: None,
                settings,
                render_state: None,
                canvas,
                document,
                last_time: 0.0,
                auto_pause: false,
                frame_count: 0,
                fps_time: 0.0,
                fps: 0,
            }
        }

        fn update(&mut self, dt: f32) {
            if self.keyboard.take_toggle_sound() {
                let enabled = self.settings.toggle_sound();
                if let Some(audio) = self.audio.as_mut() {
                    audio.set_volume(self.settings.effective_volume());
                }
                self.settings.save();
                log::info!("Sound: {}", if enabled { "on" } else { "off" });
            }

            let mut input = self.keyboard.take_tick_input();
            input.pause |= std::mem::take(&mut self.auto_pause);

            let events = self.controller.update(dt, &input);

            if self.audio.is_none() && events.contains(&GameEvent::SessionStarted) {
                self.audio = Some(AudioManager::new(self.settings.effective_volume()));
            }

            let mut sinks: Vec<&mut dyn EventSink> = vec![&mut self.particles];
            if let Some(audio) = self.audio.as_mut() {
                sinks.push(audio);
            }
            dispatch(&events, &mut sinks);

            self.particles.update(dt);
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_count += 1;
            if time - self.fps_time >= 1000.0 {
                self.fps = self.frame_count;
                self.frame_count = 0;
                self.fps_time = time;
            }
        }

        fn fit_canvas(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let dpr = window.device_pixel_ratio();
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            if width == 0 || height == 0 {
                return;
            }
            if self.canvas.width() != width || self.canvas.height() != height {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
            }
            if let Some(rs) = self.render_state.as_mut() {
                rs.resize(width, height);
            }
        }

        fn render(&mut self) {
            let snapshot = self.controller.snapshot();
            let vertices = build_scene(&snapshot, self.particles.particles());

            let Some(rs) = self.render_state.as_mut() else { return };
            match rs.render(&vertices) {
                Ok(()) => {}
                Err(e) => match FrameRecovery::for_error(&e) {
                    FrameRecovery::Reconfigure => rs.reconfigure(),
                    FrameRecovery::OutOfMemory => log::error!("Out of GPU memory"),
                    FrameRecovery::Skip => log::warn!("Render error: {e:?}"),
                },
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }

        fn update_hud(&self) {
            let snap = self.controller.snapshot();

            self.set_text("score-left", &hud::side_score_text(&snap, Side::Left));
            self.set_text("score-right", &hud::side_score_text(&snap, Side::Right));
            self.set_text("target", &hud::target_text(&snap));

            let status = hud::status_text(&snap);
            self.set_visible("status", !status.is_empty());
            self.set_text("status", &status);
            self.set_text("prompt", hud::prompt_text(&snap));
            if snap.phase == GamePhase::GameOver {
                self.set_text("final-score", &hud::score_text(&snap));
            }
            self.set_visible("final-score", snap.phase == GamePhase::GameOver);

            self.set_visible("hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                self.set_text("hud-fps", &format!("FPS: {}", self.fps));
            }

            self.set_visible("debug", snap.show_debug);
            if snap.show_debug {
                let lines = hud::debug_lines(
                    &snap,
                    self.fps,
                    self.particles.len(),
                    self.settings.sound_enabled,
                );
                self.set_text("debug", &lines.join("\n"));
            }
        }

        fn request_auto_pause(&mut self, reason: &str) {
            self.keyboard.clear();
            if self.controller.phase == GamePhase::Playing {
                self.auto_pause = true;
                log::info!("Auto-paused ({reason})");
            }
        }
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Duel Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;

        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone(), document.clone())));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (FIELD_WIDTH, FIELD_HEIGHT),
        )
        .await
        .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        if let Some(el) = document.get_element_by_id("controls") {
            el.set_text_content(Some(hud::CONTROLS));
        }

        setup_input_handlers(&window, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Duel Pong running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if g.keyboard.bindings().wants_prevent_default(&code) {
                    event.prevent_default();
                }
                g.keyboard.key_down(&code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keyboard.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) as f32).min(MAX_FRAME_MS)
            } else {
                FRAME_MS
            };
            g.last_time = time;

            g.track_fps(time);
            g.fit_canvas();
            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().request_auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside); held keys would otherwise stick
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().request_auto_pause("window blur");
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use duel_pong::consts::*;
    use duel_pong::effects::ParticleSystem;
    use duel_pong::sim::{EventSink, GameEvent, GamePhase, MatchController, TickInput, dispatch};
    use duel_pong::{Settings, hud};

    const SEED: u64 = 0x5eed;
    /// Twenty minutes of play at 60 fps
    const FRAME_CAP: u64 = 60 * 60 * 20;
    /// Length of the scripted input cycle
    const PATTERN_FRAMES: u64 = 90;

    /// Counts and logs everything the match reports
    #[derive(Default)]
    struct EventLog {
        wall_hits: u32,
        paddle_hits: u32,
        points: u32,
    }

    impl EventSink for EventLog {
        fn on_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::WallHit { .. } => self.wall_hits += 1,
                GameEvent::PaddleHit { side, .. } => {
                    self.paddle_hits += 1;
                    log::debug!("{} returns the ball", side.player_name());
                }
                GameEvent::Score { side, pos } => {
                    self.points += 1;
                    log::info!(
                        "{} scores (ball out at {:.0}, {:.0})",
                        side.player_name(),
                        pos.x,
                        pos.y
                    );
                }
                GameEvent::Win { side } => log::info!("{} wins", side.player_name()),
                other => log::debug!("{other:?}"),
            }
        }
    }

    /// Both paddles sweep the field on offset cycles
    fn scripted_input(frame: u64) -> TickInput {
        let phase = frame % PATTERN_FRAMES;
        let right_phase = (frame + PATTERN_FRAMES / 3) % PATTERN_FRAMES;
        TickInput {
            left_up: phase < PATTERN_FRAMES / 2,
            left_down: phase >= PATTERN_FRAMES / 2,
            right_up: right_phase >= PATTERN_FRAMES / 2,
            right_down: right_phase < PATTERN_FRAMES / 2,
            start: frame == 0,
            ..Default::default()
        }
    }

    pub fn run() {
        let settings = Settings::load();
        let mut controller = MatchController::new(settings.match_config(), SEED);
        let mut particles = ParticleSystem::new(FIELD_WIDTH, SEED);
        let mut event_log = EventLog::default();

        let mut frame = 0;
        while controller.phase != GamePhase::GameOver && frame < FRAME_CAP {
            let events = controller.update(FRAME_MS, &scripted_input(frame));
            dispatch(&events, &mut [&mut particles, &mut event_log]);
            particles.update(FRAME_MS);
            frame += 1;
        }

        let snapshot = controller.snapshot();
        log::info!(
            "Finished after {frame} frames: {} ({} paddle hits, {} wall hits, {} points)",
            hud::score_text(&snapshot),
            event_log.paddle_hits,
            event_log.wall_hits,
            event_log.points,
        );
        if snapshot.phase != GamePhase::GameOver {
            log::warn!("Frame cap reached before a winner");
        }

        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Duel Pong (native) running a headless match");
    log::info!("Build for wasm32 to play in the browser");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
