//! Host input: held-key snapshots and discrete commands

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Held inputs for a single tick (a snapshot, not an event stream)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire button held
    pub fire: bool,
}

impl TickInput {
    /// Unit step per axis (screen space, y down); opposing keys cancel
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| f32::from(pos as u8) - f32::from(neg as u8);
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Discrete host events, applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HostCommand {
    /// Acknowledge a completed level and start the next one
    AdvanceLevel,
    ToggleMute,
    /// Master volume (clamped to 0.0 - 1.0)
    SetVolume(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        let input = TickInput {
            left: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(-1.0, 1.0));

        let opposed = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(opposed.direction(), Vec2::ZERO);
    }
}
