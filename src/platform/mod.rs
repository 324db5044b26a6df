//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall clock time
//! - Frame timing (host timestamps → clamped delta time)
//! - The wasm32 entry binding

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Wall clock in Unix milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Wall clock in Unix milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Converts host frame timestamps into simulation delta time.
///
/// There is no fixed-step accumulator: each frame is one tick, and the step
/// is clamped so a long pause (e.g. a suspended tab) cannot produce a huge
/// jump.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt: max_dt.max(0.0),
        }
    }

    /// Seconds since the previous timestamp; 0 on the first frame
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the previous timestamp (e.g. after the loop was stopped)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
