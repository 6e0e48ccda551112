//! # Enemies
//!
//! Skeletons, gorgons and the demon boss. Every enemy walks toward the hero
//! along the floor and swings when the hero is inside its reach. The attack
//! rate is limited by the enemy's own cooldown, so the orchestrator can ask
//! every tick.

use crate::config;
use crate::game::{scale_damage, Actor, AnimationState, EntityId, Facing, Rect, Vitals};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Size of a regular enemy in pixels.
pub const ENEMY_SIZE: f32 = 60.0;

/// Size of the demon boss in pixels.
pub const BOSS_SIZE: f32 = 128.0;

/// Health fraction under which the boss enrages.
pub const ENRAGE_THRESHOLD: f32 = 0.3;

const ENRAGE_DAMAGE: f32 = 1.5;
const ENRAGE_SPEED: f32 = 1.2;
const CLEAVE_DAMAGE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    SkeletonArcher,
    SkeletonSpearman,
    SkeletonWarrior,
    Gorgon,
    DemonBoss,
}

/// Base statistics of an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_health: u32,
    pub speed: f32,
    pub damage: u32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
}

impl EnemyKind {
    /// Kinds that can appear in a normal room.
    pub fn regular() -> [EnemyKind; 4] {
        [
            EnemyKind::SkeletonArcher,
            EnemyKind::SkeletonSpearman,
            EnemyKind::SkeletonWarrior,
            EnemyKind::Gorgon,
        ]
    }

    pub fn stats(self) -> EnemyStats {
        let (max_health, speed, damage, attack_range, attack_cooldown) = match self {
            EnemyKind::SkeletonArcher => (50, 10.0, 50, 100.0, 2.0),
            EnemyKind::SkeletonSpearman => (70, 15.0, 40, 70.0, 1.5),
            EnemyKind::SkeletonWarrior => (95, 20.0, 30, 45.0, 1.2),
            EnemyKind::Gorgon => (100, 75.0, 35, 40.0, 1.0),
            EnemyKind::DemonBoss => (500, 30.0, 25, 120.0, 1.5),
        };
        EnemyStats {
            max_health,
            speed,
            damage,
            attack_range,
            attack_cooldown,
        }
    }

    /// Relative weight in the random spawn draw. The boss is never drawn.
    pub fn spawn_weight(self) -> u32 {
        match self {
            EnemyKind::SkeletonArcher => 10,
            EnemyKind::SkeletonSpearman => 15,
            EnemyKind::SkeletonWarrior => 20,
            EnemyKind::Gorgon => 15,
            EnemyKind::DemonBoss => 0,
        }
    }

    pub fn is_undead(self) -> bool {
        matches!(
            self,
            EnemyKind::SkeletonArcher | EnemyKind::SkeletonSpearman | EnemyKind::SkeletonWarrior
        )
    }

    pub fn is_boss(self) -> bool {
        self == EnemyKind::DemonBoss
    }

    pub fn size(self) -> f32 {
        if self.is_boss() {
            BOSS_SIZE
        } else {
            ENEMY_SIZE
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::SkeletonArcher => "Skeleton Archer",
            EnemyKind::SkeletonSpearman => "Skeleton Spearman",
            EnemyKind::SkeletonWarrior => "Skeleton Warrior",
            EnemyKind::Gorgon => "Gorgon",
            EnemyKind::DemonBoss => "Demon Boss",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hit an enemy landed this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyAttack {
    pub enemy: EntityId,
    pub damage: u32,
    pub cleave: bool,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    id: EntityId,
    kind: EnemyKind,
    stats: EnemyStats,
    x: f32,
    y: f32,
    size: f32,
    facing: Facing,
    vitals: Vitals,
    moving: bool,
    attack_cooldown: f32,
    attack_timer: f32,
    stun_timer: f32,
    enraged: bool,
    attacks_made: u32,
}

impl Enemy {
    /// Creates an enemy standing on `floor_y` with its left edge at `x`.
    pub fn spawn(kind: EnemyKind, x: f32, floor_y: f32) -> Self {
        let stats = kind.stats();
        let size = kind.size();
        Self {
            id: Uuid::new_v4(),
            kind,
            stats,
            x,
            y: floor_y - size,
            size,
            facing: Facing::Left,
            vitals: Vitals::new(stats.max_health),
            moving: false,
            attack_cooldown: 0.0,
            attack_timer: 0.0,
            stun_timer: 0.0,
            enraged: false,
            attacks_made: 0,
        }
    }

    /// Creates the boss centered in a room.
    pub fn boss(room_width: f32, floor_y: f32) -> Self {
        Self::spawn(EnemyKind::DemonBoss, room_width / 2.0 - BOSS_SIZE / 2.0, floor_y)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer > 0.0
    }

    pub fn stun(&mut self, seconds: f32) {
        if self.is_alive() {
            self.stun_timer = self.stun_timer.max(seconds);
        }
    }

    fn speed(&self) -> f32 {
        if self.enraged {
            self.stats.speed * ENRAGE_SPEED
        } else {
            self.stats.speed
        }
    }

    fn damage(&self) -> u32 {
        if self.enraged {
            scale_damage(self.stats.damage, ENRAGE_DAMAGE)
        } else {
            self.stats.damage
        }
    }

    /// Area an attack covers: from the body center toward the facing side.
    pub fn reach_box(&self) -> Rect {
        let body = self.bounds();
        let width = body.w / 2.0 + self.stats.attack_range;
        let x = match self.facing {
            Facing::Right => body.center_x(),
            Facing::Left => body.center_x() - width,
        };
        Rect::new(x, body.y, width, body.h)
    }

    /// Re-acquires `target`, walks toward it and swings if it is in reach.
    pub fn pursue(&mut self, dt: f32, target: &Rect) -> Option<EnemyAttack> {
        self.moving = false;
        if !self.is_alive() {
            return None;
        }

        if self.kind.is_boss() && !self.enraged && self.vitals.fraction() < ENRAGE_THRESHOLD {
            self.enraged = true;
            log::info!("{} is enraged", self.kind);
        }

        let dx = target.center_x() - self.bounds().center_x();
        if dx != 0.0 {
            self.facing = if dx < 0.0 { Facing::Left } else { Facing::Right };
        }

        if !self.is_stunned() && !self.is_attacking() && dx.abs() > config::ENEMY_STOP_DISTANCE {
            let step = self.speed() * config::SPEED_SCALE * dt * 60.0;
            self.x += step.min(dx.abs() - config::ENEMY_STOP_DISTANCE) * dx.signum();
            self.moving = true;
        }

        self.try_attack(target)
    }

    /// Swings at `target` if off cooldown and in reach.
    pub fn try_attack(&mut self, target: &Rect) -> Option<EnemyAttack> {
        if !self.is_alive() || self.is_stunned() || self.attack_cooldown > 0.0 {
            return None;
        }
        if !self.reach_box().intersects(target) {
            return None;
        }

        self.attack_cooldown = self.stats.attack_cooldown;
        self.attack_timer = config::ATTACK_DURATION;
        self.attacks_made += 1;

        let cleave = self.kind.is_boss() && self.attacks_made % 2 == 0;
        let damage = if cleave {
            scale_damage(self.damage(), CLEAVE_DAMAGE)
        } else {
            self.damage()
        };
        Some(EnemyAttack {
            enemy: self.id,
            damage,
            cleave,
        })
    }

    /// Keeps the enemy inside the room horizontally.
    pub fn clamp_to_room(&mut self, width: f32) {
        self.x = self.x.clamp(0.0, (width - self.size).max(0.0));
    }
}

impl Actor for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    fn velocity(&self) -> (f32, f32) {
        if self.moving {
            (self.speed() * config::SPEED_SCALE * self.facing.sign(), 0.0)
        } else {
            (0.0, 0.0)
        }
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn facing(&self) -> Facing {
        self.facing
    }

    fn animation_state(&self) -> AnimationState {
        if !self.is_alive() {
            AnimationState::Dead
        } else if self.is_attacking() {
            AnimationState::Attacking(1 + (self.attacks_made % 2) as u8)
        } else if self.vitals.is_invulnerable() || self.is_stunned() {
            AnimationState::Hurt
        } else if self.moving {
            AnimationState::Walking
        } else {
            AnimationState::Idle
        }
    }

    fn tick(&mut self, dt: f32) {
        self.vitals.tick(dt);
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.stun_timer = (self.stun_timer - dt).max(0.0);
    }

    fn take_damage(&mut self, amount: u32) -> bool {
        let landed = self.vitals.apply_damage(amount);
        if landed && !self.is_alive() {
            log::debug!("{} {} defeated", self.kind, self.id);
        }
        landed
    }
}
