//! # Projectiles
//!
//! Arrows and fireballs in flight, and the manager that owns them for the
//! current room.

use crate::game::{Actor, Enemy, EntityId, Facing, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Arrow speed per 60 Hz frame.
pub const ARROW_SPEED: f32 = 12.0;
/// Distance an arrow travels before it drops.
pub const ARROW_RANGE: f32 = 500.0;
/// Fireball speed per 60 Hz frame.
pub const FIREBALL_SPEED: f32 = 8.0;
/// Distance a fireball travels before it fizzles.
pub const FIREBALL_RANGE: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Arrow,
    Fireball,
}

impl ProjectileKind {
    /// Width and height in pixels.
    pub fn size(self) -> (f32, f32) {
        match self {
            ProjectileKind::Arrow => (32.0, 8.0),
            ProjectileKind::Fireball => (32.0, 32.0),
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            ProjectileKind::Arrow => ARROW_SPEED,
            ProjectileKind::Fireball => FIREBALL_SPEED,
        }
    }

    pub fn range(self) -> f32 {
        match self {
            ProjectileKind::Arrow => ARROW_RANGE,
            ProjectileKind::Fireball => FIREBALL_RANGE,
        }
    }
}

/// A projectile in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub kind: ProjectileKind,
    pub rect: Rect,
    pub facing: Facing,
    pub damage: u32,
    pub piercing: bool,
    /// Who fired it. Attribution only, the shooter may be gone.
    pub owner: Option<EntityId>,
    speed: f32,
    range: f32,
    travelled: f32,
    active: bool,
    hits: HashSet<EntityId>,
}

impl Projectile {
    /// Creates a projectile leaving the facing edge of `shooter`, vertically centered on it.
    pub fn fired_from(
        kind: ProjectileKind,
        shooter: Rect,
        facing: Facing,
        damage: u32,
        piercing: bool,
        owner: Option<EntityId>,
    ) -> Self {
        let (w, h) = kind.size();
        let x = match facing {
            Facing::Right => shooter.right(),
            Facing::Left => shooter.x - w,
        };
        let y = shooter.y + shooter.h / 2.0 - h / 2.0;
        Self {
            id: Uuid::new_v4(),
            kind,
            rect: Rect::new(x, y, w, h),
            facing,
            damage,
            piercing,
            owner,
            speed: kind.speed(),
            range: kind.range(),
            travelled: 0.0,
            active: true,
            hits: HashSet::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn travelled(&self) -> f32 {
        self.travelled
    }

    /// Moves the projectile and deactivates it once spent or outside the room.
    pub fn update(&mut self, dt: f32, room_width: f32) {
        if !self.active {
            return;
        }
        let step = self.speed * dt * 60.0;
        self.rect.x += step * self.facing.sign();
        self.travelled += step;

        if self.travelled >= self.range || self.rect.right() < 0.0 || self.rect.x > room_width {
            self.active = false;
        }
    }
}

/// A projectile hit that landed on an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile: EntityId,
    pub owner: Option<EntityId>,
    pub enemy: EntityId,
    pub damage: u32,
    pub killed: bool,
}

/// Owns every projectile in the current room.
#[derive(Debug, Clone, Default)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
}

impl ProjectileManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a projectile and returns its id.
    pub fn spawn(&mut self, projectile: Projectile) -> EntityId {
        let id = projectile.id;
        log::debug!("Spawned {:?} {}", projectile.kind, id);
        self.projectiles.push(projectile);
        id
    }

    /// Moves every projectile and drops the inactive ones.
    pub fn update(&mut self, dt: f32, room_width: f32) {
        for projectile in &mut self.projectiles {
            projectile.update(dt, room_width);
        }
        self.projectiles.retain(Projectile::is_active);
    }

    /// Applies projectile hits to enemies.
    ///
    /// A non-piercing projectile stops at the first enemy it touches. A
    /// piercing one damages each enemy at most once.
    pub fn resolve_hits(&mut self, enemies: &mut [Enemy]) -> Vec<ProjectileHit> {
        let mut hits = Vec::new();
        for projectile in self.projectiles.iter_mut().filter(|p| p.active) {
            for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
                if projectile.hits.contains(&enemy.id()) || !projectile.rect.intersects(&enemy.hitbox()) {
                    continue;
                }
                if enemy.take_damage(projectile.damage) {
                    hits.push(ProjectileHit {
                        projectile: projectile.id,
                        owner: projectile.owner,
                        enemy: enemy.id(),
                        damage: projectile.damage,
                        killed: !enemy.is_alive(),
                    });
                }
                if projectile.piercing {
                    projectile.hits.insert(enemy.id());
                } else {
                    projectile.active = false;
                    break;
                }
            }
        }
        self.projectiles.retain(Projectile::is_active);
        hits
    }

    /// Removes every projectile. Called on room change.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EnemyKind;

    const FRAME: f32 = 1.0 / 60.0;

    fn arrow(piercing: bool) -> Projectile {
        Projectile::fired_from(
            ProjectileKind::Arrow,
            Rect::new(100.0, 416.0, 64.0, 64.0),
            Facing::Right,
            40,
            piercing,
            None,
        )
    }

    fn skeleton_at(x: f32) -> Enemy {
        Enemy::spawn(EnemyKind::SkeletonWarrior, x, 480.0)
    }

    #[test]
    fn test_spawns_at_facing_edge() {
        let right = arrow(false);
        assert_eq!(right.rect.x, 164.0);
        assert_eq!(right.rect.y, 444.0);

        let left = Projectile::fired_from(
            ProjectileKind::Fireball,
            Rect::new(100.0, 416.0, 64.0, 64.0),
            Facing::Left,
            10,
            true,
            None,
        );
        assert_eq!(left.rect.x, 68.0);
    }

    #[test]
    fn test_deactivates_after_range() {
        let mut manager = ProjectileManager::new();
        manager.spawn(arrow(false));
        // 500 px at 12 px per frame takes 42 frames
        for _ in 0..41 {
            manager.update(FRAME, 10_000.0);
        }
        assert_eq!(manager.len(), 1);
        manager.update(FRAME, 10_000.0);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_deactivates_leaving_room() {
        let mut projectile = arrow(false);
        projectile.update(FRAME, 150.0);
        assert!(!projectile.is_active());
    }

    #[test]
    fn test_non_piercing_stops_at_first_enemy() {
        let mut manager = ProjectileManager::new();
        manager.spawn(arrow(false));
        let mut enemies = vec![skeleton_at(170.0), skeleton_at(175.0)];

        let hits = manager.resolve_hits(&mut enemies);
        assert_eq!(hits.len(), 1);
        assert!(manager.is_empty());
        assert_eq!(enemies[0].health(), 55);
        assert_eq!(enemies[1].health(), 95);
    }

    #[test]
    fn test_piercing_hits_each_enemy_once() {
        let mut manager = ProjectileManager::new();
        manager.spawn(arrow(true));
        let mut enemies = vec![skeleton_at(170.0), skeleton_at(175.0)];

        let hits = manager.resolve_hits(&mut enemies);
        assert_eq!(hits.len(), 2);
        assert_eq!(manager.len(), 1);

        // Still overlapping next tick, but already in the hit set
        enemies.iter_mut().for_each(|e| e.tick(1.0));
        assert!(manager.resolve_hits(&mut enemies).is_empty());
        assert_eq!(enemies[0].health(), 55);
    }

    #[test]
    fn test_clear() {
        let mut manager = ProjectileManager::new();
        manager.spawn(arrow(false));
        manager.spawn(arrow(true));
        manager.clear();
        assert!(manager.is_empty());
    }
}
