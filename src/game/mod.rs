//! # Game Module
//!
//! Core run state, actors and the per-frame simulation.
//!
//! This module contains the fundamental building blocks of a run:
//! - Geometry shared by every actor and room object
//! - Heroes, enemies, projectiles and platforms
//! - The room transition state machine and camera
//! - The run state, its frame step and persistence

pub mod actors;
pub mod camera;
pub mod enemy;
pub mod events;
pub mod hero;
pub mod persistence;
pub mod platforms;
pub mod projectiles;
pub mod simulation;
pub mod state;
pub mod transition;

pub use actors::*;
pub use camera::*;
pub use enemy::*;
pub use events::*;
pub use hero::*;
pub use persistence::*;
pub use platforms::*;
pub use projectiles::*;
pub use simulation::*;
pub use state::*;
pub use transition::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Axis-aligned rectangle in room pixel space, anchored at its top-left corner.
///
/// # Examples
///
/// ```
/// use dungeon_heroes::Rect;
///
/// let body = Rect::new(10.0, 20.0, 64.0, 64.0);
/// assert_eq!(body.right(), 74.0);
/// assert_eq!(body.bottom(), 84.0);
///
/// let feet = body.feet_band(16.0);
/// assert_eq!(feet, Rect::new(26.0, 68.0, 32.0, 16.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Checks whether two rectangles overlap with positive area.
    ///
    /// Rectangles that only share an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    /// assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    /// assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Narrow band at the bottom of the box, inset a quarter of the width on each side.
    pub fn feet_band(&self, height: f32) -> Rect {
        Rect::new(
            self.x + self.w / 4.0,
            self.bottom() - height,
            self.w / 2.0,
            height,
        )
    }

    /// Returns a copy shrunk by the given fractions of width and height.
    pub fn inset(&self, fx: f32, fy: f32) -> Rect {
        Rect::new(
            self.x + self.w * fx,
            self.y + self.h * fy,
            self.w * (1.0 - 2.0 * fx),
            self.h * (1.0 - fy),
        )
    }
}

/// Horizontal facing of an actor or projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Unit sign along the x axis.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Unique identifier for enemies and projectiles.
pub type EntityId = Uuid;
