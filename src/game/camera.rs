//! # Camera
//!
//! A viewport into the current room that follows the hero.
//!
//! The camera eases toward its target each tick and snaps straight to it
//! after a room change or a load, so a teleport never shows as a long pan.

use crate::config;
use crate::game::Rect;
use serde::{Deserialize, Serialize};

/// Viewport into a room. `(x, y)` is the room coordinate of the top-left visible pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub view_w: f32,
    pub view_h: f32,
    /// Fraction of the remaining distance covered per tick
    pub smoothing: f32,
}

impl Camera {
    pub fn new(view_w: f32, view_h: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            view_w,
            view_h,
            smoothing: config::CAMERA_SMOOTHING,
        }
    }

    /// Top-left position that centers `target`, clamped to the room.
    fn target_for(&self, target: &Rect, room_w: f32, room_h: f32) -> (f32, f32) {
        let x = target.x + target.w / 2.0 - self.view_w / 2.0;
        let y = target.y + target.h / 2.0 - self.view_h / 2.0;
        (
            x.clamp(0.0, (room_w - self.view_w).max(0.0)),
            y.clamp(0.0, (room_h - self.view_h).max(0.0)),
        )
    }

    /// Moves part of the way toward centering `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::{Camera, Rect};
    ///
    /// let mut camera = Camera::new(1024.0, 576.0);
    /// let hero = Rect::new(1000.0, 416.0, 64.0, 64.0);
    /// camera.follow(&hero, 1600.0, 600.0);
    /// // 10% of the way from 0 to 520
    /// assert!((camera.x - 52.0).abs() < 1e-3);
    /// ```
    pub fn follow(&mut self, target: &Rect, room_w: f32, room_h: f32) {
        let (tx, ty) = self.target_for(target, room_w, room_h);
        self.x += (tx - self.x) * self.smoothing;
        self.y += (ty - self.y) * self.smoothing;
        self.clamp(room_w, room_h);
    }

    /// Jumps straight to centering `target`.
    pub fn snap_to(&mut self, target: &Rect, room_w: f32, room_h: f32) {
        let (tx, ty) = self.target_for(target, room_w, room_h);
        self.x = tx;
        self.y = ty;
    }

    fn clamp(&mut self, room_w: f32, room_h: f32) {
        self.x = self.x.clamp(0.0, (room_w - self.view_w).max(0.0));
        self.y = self.y.clamp(0.0, (room_h - self.view_h).max(0.0));
    }

    /// Converts a room position to a screen position.
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.x, y - self.y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1024.0, 576.0)
    }
}
