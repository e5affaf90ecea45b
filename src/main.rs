//! Canvas Platformer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use canvas_platformer::consts::*;
    use canvas_platformer::renderer::{Palette, RenderState, build_frame};
    use canvas_platformer::sim::{GameState, GameStatus, Level};
    use canvas_platformer::{Game, Settings, Toggle};

    /// Browser-side wrapper: harness, renderer, and HUD bookkeeping
    struct App {
        game: Game,
        settings: Settings,
        palette: Palette,
        render_state: Option<RenderState>,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(settings: Settings) -> Self {
            let state = GameState::new(Level::classic(), settings.tuning);
            Self {
                game: Game::new(state),
                palette: Palette::for_settings(settings.high_contrast),
                settings,
                render_state: None,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let summary = self.game.update(dt);
            if summary.won {
                log::info!("YOU WIN!");
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
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_frame(&self.game.state, &self.palette);
                match render_state.render(&vertices, self.palette.letterbox) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Flip a preference, apply it and persist it
        fn toggle_preference(&mut self, toggle: Toggle) {
            let enabled = self.settings.toggle(toggle);
            if toggle == Toggle::HighContrast {
                self.palette = Palette::for_settings(enabled);
            }
            log::info!("{toggle:?} set to {enabled}");
            self.settings.save();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    el.set_text_content(Some(&format!("{} FPS", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("hud-progress") {
                let extent = self.game.state.level().extent();
                let pct = (self.game.state.player.pos.x / extent * 100.0).clamp(0.0, 100.0);
                el.set_text_content(Some(&format!("{pct:.0}%")));
            }

            let status = self.game.status();
            set_visible(&document, "win-prompt", status == GameStatus::Won);
            set_visible(&document, "stopped-banner", status == GameStatus::Stopped);
            set_visible(
                &document,
                "pause-overlay",
                self.game.is_paused() && status == GameStatus::Running,
            );
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Canvas Platformer starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (VIEW_WIDTH as f64 * dpr) as u32;
        let height = (VIEW_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let app = Rc::new(RefCell::new(App::new(settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, (VIEW_WIDTH, VIEW_HEIGHT)).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Renderer unavailable: {e}");
                return;
            }
        }

        setup_input_handlers(app.clone());
        setup_win_prompt(app.clone());
        setup_auto_pause(app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(app);

        log::info!("Canvas Platformer running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Key down: win prompt shortcuts, preferences, pause toggle, then movement/jump
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut a = app.borrow_mut();
                let key = event.key();

                if a.game.status() == GameStatus::Won {
                    match key.as_str() {
                        "Enter" => a.game.restart(),
                        "Escape" => a.game.stop(),
                        _ => {}
                    }
                    return;
                }

                if let Some(toggle) = Toggle::from_key(&key) {
                    a.toggle_preference(toggle);
                    return;
                }

                match key.as_str() {
                    "p" | "P" => a.game.toggle_pause(),
                    _ => {
                        if a.game.input.key_down(&key) {
                            event.prevent_default();
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
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if app.borrow_mut().game.input.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let stopped = {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt, time);
            a.render();
            a.update_hud();
            a.game.status() == GameStatus::Stopped
        };

        // A stopped run leaves its last frame on screen
        if stopped {
            log::info!("Game loop halted");
            return;
        }
        request_animation_frame(app);
    }

    fn setup_win_prompt(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let Some(document) = window.document() else {
            return;
        };

        // Play again
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Stop
        if let Some(btn) = document.get_element_by_id("stop-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.stop();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut a = app.borrow_mut();
                    if a.settings.pause_on_blur && a.game.status() == GameStatus::Running {
                        a.game.set_paused(true);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.settings.pause_on_blur && a.game.status() == GameStatus::Running {
                    a.game.set_paused(true);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
    log::info!("Canvas Platformer (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run through the real harness: hold right, hop whenever grounded
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use canvas_platformer::consts::SIM_DT;
    use canvas_platformer::sim::{GameState, Level};
    use canvas_platformer::{Action, Game, Settings};

    const DEMO_SECONDS: f32 = 30.0;

    let settings = Settings::load();
    let mut game = Game::new(GameState::new(Level::classic(), settings.tuning));
    game.input.press(Action::MoveRight);

    let ticks = (DEMO_SECONDS / SIM_DT) as u32;
    for _ in 0..ticks {
        if game.state.player.grounded {
            game.input.press(Action::Jump);
        }
        let report = match game.tick() {
            Ok(report) => report,
            Err(e) => {
                log::warn!("Demo ended early: {e}");
                break;
            }
        };
        game.input.release(Action::Jump);

        if let Some(index) = report.landed_on {
            log::debug!("Landed on platform {index} at x={:.1}", game.state.player.pos.x);
        }
        if report.won {
            break;
        }
    }

    let state = &game.state;
    log::info!(
        "Demo finished: {:?} after {} steps, {} respawns, x={:.1}",
        state.status(),
        state.steps,
        state.respawns,
        state.player.pos.x
    );
}
