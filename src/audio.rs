//! Sound cues
//!
//! The simulation never plays sound itself. The game driver turns tick
//! events into `AudioCue`s and hands them to an `AudioSink`. In the browser
//! that sink is `WebAudio`, which synthesizes short tones - no external
//! files needed!

use std::cell::RefCell;
use std::rc::Rc;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Player fired
    Shoot,
    /// Enemy destroyed
    Explosion,
    /// Player lost a life
    PlayerHit,
    /// Level target reached
    LevelUp,
    GameOver,
    /// Power-up collected
    BuffPickup,
}

/// Audio collaborator. Fire-and-forget: playback failures stay inside the sink.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
    /// Master volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;

    /// Flip mute; returns true when sound is now enabled
    fn toggle_mute(&mut self) -> bool {
        let muted = !self.is_muted();
        self.set_muted(muted);
        !muted
    }
}

/// Mute/volume bookkeeping shared by every sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    pub volume: f32,
    pub muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            volume: 0.8,
            muted: false,
        }
    }
}

impl Mixer {
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Volume actually applied (0 while muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }
}

/// Sink for headless hosts; cues only reach the log
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    mixer: Mixer,
}

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: AudioCue) {
        log::trace!("cue {:?} (volume {:.2})", cue, self.mixer.effective_volume());
    }

    fn set_muted(&mut self, muted: bool) {
        self.mixer.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.mixer.muted
    }

    fn set_volume(&mut self, volume: f32) {
        self.mixer.set_volume(volume);
    }

    fn volume(&self) -> f32 {
        self.mixer.volume
    }
}

/// Records every cue played while unmuted. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct CueRecorder {
    cues: Rc<RefCell<Vec<AudioCue>>>,
    mixer: Mixer,
}

impl CueRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<AudioCue> {
        self.cues.borrow().clone()
    }

    pub fn count(&self, cue: AudioCue) -> usize {
        self.cues.borrow().iter().filter(|c| **c == cue).count()
    }
}

impl AudioSink for CueRecorder {
    fn play(&mut self, cue: AudioCue) {
        if self.mixer.effective_volume() > 0.0 {
            self.cues.borrow_mut().push(cue);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.mixer.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.mixer.muted
    }

    fn set_volume(&mut self, volume: f32) {
        self.mixer.set_volume(volume);
    }

    fn volume(&self) -> f32 {
        self.mixer.volume
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCue, AudioSink, Mixer};

    /// Web Audio sink. The context is created lazily on the first cue,
    /// since browsers only allow it after a user gesture.
    #[derive(Default)]
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master: Option<GainNode>,
        mixer: Mixer,
    }

    impl WebAudio {
        pub fn new() -> Self {
            Self::default()
        }

        fn context(&mut self) -> Option<AudioContext> {
            if self.ctx.is_none() {
                let ctx = match AudioContext::new() {
                    Ok(ctx) => ctx,
                    Err(_) => {
                        log::warn!("Failed to create AudioContext - audio disabled");
                        return None;
                    }
                };
                let master = ctx.create_gain().ok()?;
                master.gain().set_value(self.mixer.effective_volume());
                master.connect_with_audio_node(&ctx.destination()).ok()?;
                self.master = Some(master);
                self.ctx = Some(ctx);
            }
            let ctx = self.ctx.clone()?;
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }

        fn apply_gain(&self) {
            if let Some(master) = &self.master {
                master.gain().set_value(self.mixer.effective_volume());
            }
        }

        /// Create an oscillator routed through its own envelope gain
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let master = self.master.as_ref()?;
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(master).ok()?;

            Some((osc, gain))
        }

        /// One enveloped tone sweeping from `from` to `to` Hz
        #[allow(clippy::too_many_arguments)]
        fn sweep(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            peak: f32,
            start: f64,
            length: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            gain.gain().set_value_at_time(peak, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, start + length)
                .ok();
            osc.frequency().set_value_at_time(from, start).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, start + length)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + length + 0.02).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: AudioCue) {
            if self.mixer.effective_volume() <= 0.0 {
                return;
            }
            let Some(ctx) = self.context() else { return };
            let t = ctx.current_time();

            match cue {
                AudioCue::Shoot => {
                    self.sweep(&ctx, OscillatorType::Square, 880.0, 440.0, 0.25, t, 0.08)
                }
                AudioCue::Explosion => {
                    self.sweep(&ctx, OscillatorType::Sawtooth, 180.0, 40.0, 0.5, t, 0.18)
                }
                AudioCue::PlayerHit => {
                    self.sweep(&ctx, OscillatorType::Square, 300.0, 80.0, 0.4, t, 0.3)
                }
                AudioCue::BuffPickup => {
                    self.sweep(&ctx, OscillatorType::Sine, 600.0, 1200.0, 0.3, t, 0.12)
                }
                AudioCue::LevelUp => {
                    // Rising arpeggio
                    for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
                        let start = t + i as f64 * 0.1;
                        self.sweep(&ctx, OscillatorType::Triangle, freq, freq, 0.3, start, 0.15);
                    }
                }
                AudioCue::GameOver => {
                    for (i, freq) in [392.0, 330.0, 262.0].into_iter().enumerate() {
                        let start = t + i as f64 * 0.2;
                        self.sweep(&ctx, OscillatorType::Triangle, freq, freq * 0.9, 0.35, start, 0.3);
                    }
                }
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.mixer.muted = muted;
            self.apply_gain();
        }

        fn is_muted(&self) -> bool {
            self.mixer.muted
        }

        fn set_volume(&mut self, volume: f32) {
            self.mixer.set_volume(volume);
            self.apply_gain();
        }

        fn volume(&self) -> f32 {
            self.mixer.volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamped() {
        let mut audio = SilentAudio::default();
        audio.set_volume(1.7);
        assert_eq!(audio.volume(), 1.0);
        audio.set_volume(-0.2);
        assert_eq!(audio.volume(), 0.0);
    }

    #[test]
    fn test_mute_keeps_volume() {
        let mut audio = CueRecorder::new();
        audio.set_volume(0.5);
        assert!(!audio.toggle_mute());
        assert!(audio.is_muted());
        assert_eq!(audio.volume(), 0.5);
        audio.play(AudioCue::Shoot);
        assert!(audio.cues().is_empty());

        assert!(audio.toggle_mute());
        audio.play(AudioCue::Shoot);
        assert_eq!(audio.count(AudioCue::Shoot), 1);
    }
}
