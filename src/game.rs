//! Frame driver
//!
//! Owns the simulation plus its collaborators. Each host frame runs exactly
//! one tick, then routes the tick's events: cues to the audio sink, phase
//! transitions to the progress store. Collaborator failures are logged and
//! swallowed here.

use crate::audio::{AudioCue, AudioSink};
use crate::input::{HostCommand, TickInput};
use crate::persistence::ProgressStore;
use crate::platform::{FrameClock, now_ms};
use crate::sim::{GameEvent, GamePhase, GameState, advance_level, tick};
use crate::tuning::Tuning;
use crate::view::RenderSnapshot;

/// Map a simulation event to its sound, if it has one
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::Shot { .. } => Some(AudioCue::Shoot),
        GameEvent::EnemyDestroyed { .. } => Some(AudioCue::Explosion),
        GameEvent::PlayerHit { .. } => Some(AudioCue::PlayerHit),
        GameEvent::BuffCollected { .. } => Some(AudioCue::BuffPickup),
        GameEvent::LevelComplete { .. } => Some(AudioCue::LevelUp),
        GameEvent::GameOver { .. } => Some(AudioCue::GameOver),
        GameEvent::EnemyHit { .. } | GameEvent::BuffDropped { .. } => None,
    }
}

/// A running game wired to its collaborators
pub struct Game {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
    store: Box<dyn ProgressStore>,
    audio: Box<dyn AudioSink>,
}

impl Game {
    /// Build a run, resuming from the store when it holds usable progress.
    /// Unreadable or corrupt saves count as no save.
    pub fn new(
        seed: u64,
        tuning: Tuning,
        store: Box<dyn ProgressStore>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let clock = FrameClock::new(tuning.max_frame_dt);
        let state = match store.load() {
            Ok(Some(snapshot)) => GameState::resume(seed, tuning, &snapshot),
            Ok(None) => {
                log::info!("No saved progress, starting fresh");
                GameState::new(seed, tuning)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable save: {}", e);
                GameState::new(seed, tuning)
            }
        };
        Self {
            state,
            clock,
            input: TickInput::default(),
            store,
            audio,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for debug tooling and scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn audio(&self) -> &dyn AudioSink {
        self.audio.as_ref()
    }

    /// Replace the held-input snapshot used by subsequent frames
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    /// Host frame callback: one tick with clamped delta time
    pub fn frame(&mut self, timestamp_ms: f64) {
        let dt = self.clock.delta(timestamp_ms);
        self.step(dt);
    }

    /// One tick with an explicit delta time
    pub fn step(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, self.state.tuning.max_frame_dt.max(0.0));
        let input = self.input;
        tick(&mut self.state, &input, dt);
        self.dispatch_events();
    }

    /// Handle a discrete host event
    pub fn command(&mut self, command: HostCommand) {
        match command {
            HostCommand::AdvanceLevel => {
                if advance_level(&mut self.state) {
                    self.clock.reset();
                }
            }
            HostCommand::ToggleMute => {
                let enabled = self.audio.toggle_mute();
                log::info!("Sound {}", if enabled { "on" } else { "off" });
            }
            HostCommand::SetVolume(volume) => self.audio.set_volume(volume),
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    fn dispatch_events(&mut self) {
        let events: Vec<GameEvent> = self.state.drain_events().collect();
        for event in &events {
            if let Some(cue) = cue_for(event) {
                self.audio.play(cue);
            }
            match event {
                GameEvent::LevelComplete { .. } => self.save_progress(),
                GameEvent::GameOver { high_score, .. } => self.save_high_score(*high_score),
                _ => {}
            }
        }
    }

    fn save_progress(&mut self) {
        let snapshot = self.state.progress_snapshot(now_ms());
        if let Err(e) = self.store.save(&snapshot) {
            log::warn!("Failed to save progress: {}", e);
        }
    }

    fn save_high_score(&mut self, high_score: u64) {
        if let Err(e) = self.store.clear_keeping_high_score(high_score, now_ms()) {
            log::warn!("Failed to save high score: {}", e);
        }
    }
}
