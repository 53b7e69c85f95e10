//! One running game
//!
//! Owns everything a front end needs between frames and runs the frame
//! loop body: drain input, check for quit, compute dt, tick, play sounds,
//! render and present. Native and browser front ends only differ in where
//! the clock reading, input and renderer come from.

use crate::audio::{AudioManager, AudioSink};
use crate::platform::{FrameClock, InputEvent, InputSource, Key, read_controls};
use crate::renderer::{RenderError, Renderer, render_frame};
use crate::settings::Settings;
use crate::sim::{Backdrop, SimRng, World, tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

pub struct Session<S: AudioSink> {
    pub settings: Settings,
    pub world: World,
    pub backdrop: Backdrop,
    rng: SimRng,
    frames: FrameClock,
    audio: AudioManager<S>,
    quit: bool,
}

impl<S: AudioSink> Session<S> {
    pub fn new(settings: Settings, seed: u64, sink: S) -> Self {
        let mut rng = SimRng::new(seed);
        let screen = glam::Vec2::new(settings.display.width, settings.display.height);
        let backdrop = Backdrop::generate(&mut rng, screen, settings.display.backdrop_panels);
        let world = World::new(&settings);
        let frames = FrameClock::new(settings.display.max_frame_dt);
        let audio = AudioManager::new(sink, &settings.audio);

        log::info!("Session started with seed {}", seed);
        Self {
            settings,
            world,
            backdrop,
            rng,
            frames,
            audio,
            quit: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    /// Run one frame at clock reading `now_millis`
    pub fn frame(
        &mut self,
        input: &mut dyn InputSource,
        now_millis: u64,
        renderer: &mut dyn Renderer,
    ) -> Result<FrameOutcome, RenderError> {
        for event in input.poll_events() {
            if matches!(event, InputEvent::Quit | InputEvent::KeyDown(Key::Escape)) {
                self.quit = true;
            }
        }
        if self.quit {
            return Ok(FrameOutcome::Quit);
        }

        let dt = self.frames.tick(now_millis);
        let controls = read_controls(input);
        let report = tick(&mut self.world, &controls, dt, &self.settings, &mut self.rng);
        if report.player_damaged || report.enemy_damaged {
            log::debug!(
                "Tick {}: player hit {}, enemy hit {}",
                self.world.ticks,
                report.player_damaged,
                report.enemy_damaged
            );
        }
        self.audio.handle_events(&self.world.events);

        render_frame(renderer, &self.world, &self.backdrop)?;
        Ok(FrameOutcome::Continue)
    }
}
