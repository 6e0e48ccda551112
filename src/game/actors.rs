//! # Actor Interface
//!
//! The capability set every living thing in a room shares: a bounding box,
//! velocity, health and an animation state. Heroes and enemies both implement
//! [`Actor`], so the simulation never has to probe for optional fields.

use crate::config;
use crate::game::{Facing, Rect};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Animation state exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationState {
    Idle,
    Walking,
    Jumping,
    Falling,
    /// Melee swing, with the combo step 1 to 3
    Attacking(u8),
    Special,
    Hurt,
    Dead,
}

/// Health bookkeeping shared by all actors.
///
/// # Examples
///
/// ```
/// use dungeon_heroes::Vitals;
///
/// let mut vitals = Vitals::new(100);
/// assert!(vitals.apply_damage(30));
/// assert_eq!(vitals.health, 70);
/// // Invulnerable right after a hit
/// assert!(!vitals.apply_damage(30));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: u32,
    pub max_health: u32,
    pub alive: bool,
    /// Seconds of invulnerability left
    pub invulnerable_timer: f32,
}

impl Vitals {
    /// Creates full-health vitals.
    pub fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            alive: max_health > 0,
            invulnerable_timer: 0.0,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    /// Applies a hit. Returns false when dead or invulnerable.
    ///
    /// Health saturates at zero, and zero health always means dead.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if !self.alive || self.is_invulnerable() {
            return false;
        }

        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
        } else {
            self.invulnerable_timer = config::INVULNERABILITY_TIME;
        }
        true
    }

    /// Restores health up to the maximum and returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Sets health directly, clamped, keeping the alive flag consistent.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
        self.alive = self.health > 0;
    }

    /// Fraction of maximum health remaining.
    pub fn fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.invulnerable_timer > 0.0 {
            self.invulnerable_timer = (self.invulnerable_timer - dt).max(0.0);
        }
    }
}

/// Uniform capability set for heroes and enemies.
pub trait Actor {
    /// Full bounding box, top-left anchored.
    fn bounds(&self) -> Rect;

    /// Current velocity in pixels per 60 Hz frame.
    fn velocity(&self) -> (f32, f32);

    fn vitals(&self) -> &Vitals;

    fn facing(&self) -> Facing;

    fn animation_state(&self) -> AnimationState;

    /// Advances timers and animation by `dt` seconds.
    fn tick(&mut self, dt: f32);

    /// Applies a hit. Returns whether it landed.
    fn take_damage(&mut self, amount: u32) -> bool;

    /// Body hitbox, smaller than the sprite box.
    fn hitbox(&self) -> Rect {
        self.bounds().inset(0.2, 0.2)
    }

    fn is_alive(&self) -> bool {
        self.vitals().alive
    }

    fn health(&self) -> u32 {
        self.vitals().health
    }
}

/// Applies the critical hit roll to a base damage value.
pub fn roll_critical<R: Rng>(base: u32, rng: &mut R) -> u32 {
    if rng.gen_bool(config::CRITICAL_CHANCE) {
        scale_damage(base, config::CRITICAL_MULTIPLIER)
    } else {
        base
    }
}

/// Multiplies damage, truncating toward zero like integer damage rolls do.
pub fn scale_damage(base: u32, multiplier: f32) -> u32 {
    (base as f32 * multiplier) as u32
}

/// Reach box of a melee attack extending from the facing edge.
pub fn melee_reach(bounds: Rect, facing: Facing, reach: f32) -> Rect {
    let x = match facing {
        Facing::Right => bounds.x + bounds.w * 0.8,
        Facing::Left => bounds.x - reach,
    };
    Rect::new(x, bounds.y + bounds.h * 0.2, reach, bounds.h * 0.6)
}
