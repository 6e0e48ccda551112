//! # Platforms
//!
//! Floating platforms the hero can land on. Moving platforms carry a hero
//! standing on them, breakable ones give way after a few landings, and
//! one-way platforms can be jumped through from below.

use crate::game::{Actor, Hero, Rect};
use serde::{Deserialize, Serialize};

/// Horizontal speed of a moving platform, per 60 Hz frame.
pub const MOVING_PLATFORM_SPEED: f32 = 2.0;

/// Distance a moving platform travels from its origin before reversing.
pub const MOVING_PLATFORM_DISTANCE: f32 = 100.0;

/// Landings a breakable platform survives.
pub const BREAKABLE_LANDINGS: u32 = 3;

/// Width of the strips used to push the hero out sideways.
const SIDE_STRIP: f32 = 10.0;

/// Height of the band at the top of a platform that counts as its surface.
const SURFACE_DEPTH: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    Moving,
    Breakable,
    OneWay,
}

impl PlatformKind {
    pub fn all() -> [PlatformKind; 4] {
        [
            PlatformKind::Normal,
            PlatformKind::Moving,
            PlatformKind::Breakable,
            PlatformKind::OneWay,
        ]
    }
}

/// A platform in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub kind: PlatformKind,
    pub rect: Rect,
    origin_x: f32,
    direction: f32,
    /// Horizontal distance moved during the last update
    last_dx: f32,
    landings: u32,
    broken: bool,
}

impl Platform {
    pub fn new(kind: PlatformKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            origin_x: rect.x,
            direction: 1.0,
            last_dx: 0.0,
            landings: 0,
            broken: false,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn landings(&self) -> u32 {
        self.landings
    }

    /// Whether the platform blocks the hero from the sides and below.
    pub fn is_solid(&self) -> bool {
        !self.broken && self.kind != PlatformKind::OneWay
    }

    fn surface(&self) -> Rect {
        Rect::new(self.rect.x, self.rect.y, self.rect.w, SURFACE_DEPTH)
    }

    /// Moves a moving platform along its track.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::{Platform, PlatformKind, Rect};
    ///
    /// let mut platform = Platform::new(PlatformKind::Moving, Rect::new(300.0, 360.0, 200.0, 20.0));
    /// platform.update(1.0 / 60.0);
    /// assert!((platform.rect.x - 302.0).abs() < 1e-3);
    /// ```
    pub fn update(&mut self, dt: f32) {
        self.last_dx = 0.0;
        if self.kind != PlatformKind::Moving || self.broken {
            return;
        }

        let before = self.rect.x;
        let mut x = self.rect.x + MOVING_PLATFORM_SPEED * self.direction * dt * 60.0;
        let offset = x - self.origin_x;
        if offset.abs() >= MOVING_PLATFORM_DISTANCE {
            x = self.origin_x + MOVING_PLATFORM_DISTANCE * offset.signum();
            self.direction = -self.direction;
        }
        self.rect.x = x;
        self.last_dx = x - before;
    }

    /// Counts a landing. Returns true if this landing broke the platform.
    pub fn register_landing(&mut self) -> bool {
        self.landings += 1;
        if self.kind == PlatformKind::Breakable && !self.broken && self.landings >= BREAKABLE_LANDINGS {
            self.broken = true;
            return true;
        }
        false
    }
}

/// Outcome of resolving the hero against the platforms of a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformContact {
    /// Index of a platform the hero newly landed on
    pub landed: Option<usize>,
    /// Whether that landing broke it
    pub broke: bool,
}

/// Resolves the hero against every platform in the room.
///
/// `previous` is the hero's box before this tick's movement and decides
/// which side a collision came from.
pub fn resolve_platform_collisions(
    platforms: &mut [Platform],
    hero: &mut Hero,
    previous: Rect,
) -> PlatformContact {
    let mut contact = PlatformContact::default();
    let was_on = hero.standing_on();

    if let Some(index) = was_on {
        if let Some(platform) = platforms.get(index) {
            if !platform.is_broken() && platform.last_dx != 0.0 {
                hero.shift_x(platform.last_dx);
            }
        }
    }
    hero.set_standing_on(None);

    for (index, platform) in platforms.iter_mut().enumerate() {
        if platform.is_broken() {
            continue;
        }
        let body = hero.bounds();
        let feet = Rect::new(body.x + body.w / 4.0, body.bottom() - 5.0, body.w / 2.0, 10.0);

        let falling = hero.vertical_velocity() >= 0.0;
        let came_from_above = previous.bottom() <= platform.rect.y + SURFACE_DEPTH;
        if falling && came_from_above && feet.intersects(&platform.surface()) {
            hero.land_on(platform.rect.y);
            hero.set_standing_on(Some(index));
            if was_on != Some(index) {
                contact.landed = Some(index);
                contact.broke = platform.register_landing();
                log::debug!("Hero landed on {:?} platform {}", platform.kind, index);
            }
            continue;
        }

        if !platform.is_solid() || !body.intersects(&platform.rect) {
            continue;
        }

        let left_strip = Rect::new(platform.rect.x, platform.rect.y, SIDE_STRIP, platform.rect.h);
        let right_strip = Rect::new(
            platform.rect.right() - SIDE_STRIP,
            platform.rect.y,
            SIDE_STRIP,
            platform.rect.h,
        );

        if hero.vertical_velocity() < 0.0 && previous.y >= platform.rect.bottom() - 0.5 {
            hero.bump_head(platform.rect.bottom());
        } else if body.intersects(&left_strip) && previous.right() <= platform.rect.x + SIDE_STRIP {
            hero.set_x(platform.rect.x - body.w);
        } else if body.intersects(&right_strip) && previous.x >= platform.rect.right() - SIDE_STRIP {
            hero.set_x(platform.rect.right());
        }
    }

    contact
}
