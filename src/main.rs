//! Star Skirmish entry point
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

    use star_skirmish::audio::WebAudioSink;
    use star_skirmish::platform::{InputEvent, InputState, Key};
    use star_skirmish::renderer::{GpuRenderer, RenderError, RenderState};
    use star_skirmish::{FrameOutcome, Session, Settings};

    #[derive(Debug, thiserror::Error)]
    pub enum StartupError {
        #[error("no browser window")]
        NoWindow,
        #[error("no #canvas element")]
        NoCanvas,
        #[error("failed to create surface: {0}")]
        Surface(#[from] wgpu::CreateSurfaceError),
        #[error(transparent)]
        Render(#[from] RenderError),
    }

    /// Game instance holding all state
    struct Game {
        session: Session<WebAudioSink>,
        renderer: GpuRenderer,
        input: InputState,
        /// Logical screen size divided by the canvas client size
        pointer_scale: Vec2,
    }

    impl Game {
        /// Canvas client coordinates to game screen pixels
        fn to_screen(&self, x: i32, y: i32) -> Vec2 {
            Vec2::new(x as f32, y as f32) * self.pointer_scale
        }

        /// Returns false once the session has quit
        fn frame(&mut self, time: f64) -> bool {
            match self
                .session
                .frame(&mut self.input, time as u64, &mut self.renderer)
            {
                Ok(FrameOutcome::Continue) => true,
                Ok(FrameOutcome::Quit) => {
                    log::info!("Quit requested, stopping frame loop");
                    false
                }
                Err(e) => {
                    log::warn!("Render error: {}", e);
                    true
                }
            }
        }
    }

    pub async fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Star Skirmish starting...");

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoWindow)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(StartupError::NoCanvas)?;

        let settings = Settings::default();
        let logical = Vec2::new(settings.display.width, settings.display.height);

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderError::from)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let state = RenderState::new(surface, &adapter, width, height, logical).await?;

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(settings, seed, WebAudioSink::new()),
            renderer: GpuRenderer::new(state),
            input: InputState::new(),
            pointer_scale: logical / Vec2::new(client_w as f32, client_h as f32),
        }));

        setup_input_handlers(&window, &canvas, game.clone());
        request_animation_frame(game);

        log::info!("Star Skirmish running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_screen(event.offset_x(), event.offset_y());
                g.input.push(InputEvent::MouseMove(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - fire, and unlock audio on the first gesture
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_screen(event.offset_x(), event.offset_y());
                g.input.push(InputEvent::MouseMove(pos));
                g.input.push(InputEvent::MouseDown);
                g.session.audio().sink().resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up (on the window so releasing outside the canvas still counts)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.push(InputEvent::MouseUp);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().input.push(InputEvent::KeyDown(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().input.push(InputEvent::KeyUp(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = game.borrow_mut().frame(time);
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use glam::Vec2;

    use star_skirmish::audio::LogSink;
    use star_skirmish::platform::{Autopilot, Clock, ManualClock, SystemClock};
    use star_skirmish::renderer::{RectBatch, RenderError};
    use star_skirmish::{FrameOutcome, Session, Settings, SettingsError};

    /// A scrolling starfield arcade shooter (headless autopilot runner)
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Settings JSON file; defaults are used when omitted
        pub settings: Option<PathBuf>,
        /// Run seed (overrides the settings file)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Frames to run before quitting
        #[arg(long, default_value_t = 1200)]
        pub frames: u64,
        /// Pace frames to the tick rate against the wall clock
        #[arg(long)]
        pub realtime: bool,
    }

    #[derive(Debug, thiserror::Error)]
    pub enum RunError {
        #[error(transparent)]
        Settings(#[from] SettingsError),
        #[error(transparent)]
        Render(#[from] RenderError),
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }

    pub fn run(args: Args) -> Result<(), RunError> {
        let settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
        let screen = Vec2::new(settings.display.width, settings.display.height);
        let step_ms = (1000 / settings.display.tick_rate.max(1)).max(1) as u64;

        let mut session = Session::new(settings, seed, LogSink);
        let mut pilot = Autopilot::new(screen, Some(args.frames));
        let mut batch = RectBatch::new();

        let wall = SystemClock::new();
        let mut sim_clock = ManualClock::new(0);
        loop {
            let started = wall.now_millis();
            let now = if args.realtime {
                started
            } else {
                sim_clock.now_millis()
            };
            if session.frame(&mut pilot, now, &mut batch)? == FrameOutcome::Quit {
                break;
            }
            sim_clock.advance(step_ms);

            if args.realtime {
                let spent = wall.now_millis().saturating_sub(started);
                if spent < step_ms {
                    std::thread::sleep(Duration::from_millis(step_ms - spent));
                }
            }
        }

        let stats = &session.world.stats;
        log::info!(
            "Ran {} ticks ({:.1}s simulated, seed {})",
            session.world.ticks,
            session.world.time,
            session.seed()
        );
        log::info!(
            "Shots {} / enemy shots {} / hits landed {} / hits taken {} / particles {}",
            stats.shots_fired,
            stats.enemy_shots,
            stats.enemy_hits,
            stats.player_hits_taken,
            stats.particles_spawned
        );
        log::info!(
            "Last frame: {} live entities, {} rectangles",
            session.world.entities.len(),
            batch.last_frame_rects()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Star Skirmish (native) starting...");

    let args = native::Args::parse();
    if let Err(e) = native::run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
