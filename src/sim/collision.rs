//! Axis-aligned bounding boxes
//!
//! Every entity in the playfield is a rectangle in screen space (y grows
//! downward), so all collision tests reduce to box overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(pos: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w,
            h,
        }
    }

    /// Strict overlap test: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Playfield bounds shared by every pooled entity's update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a box's top-left corner so the whole box stays on screen
    pub fn clamp_box(&self, pos: Vec2, w: f32, h: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, (self.width - w).max(0.0)),
            pos.y.clamp(0.0, (self.height - h).max(0.0)),
        )
    }
}
