//! # Heroes
//!
//! The three playable classes. Each kind shares the same body, physics and
//! cooldown bookkeeping; what differs is dispatched on [`HeroKind`]:
//!
//! - **Knight**: heavy melee, bonus damage when wounded, Shield Bash stuns
//! - **Cleric**: melee that punishes the undead, a healing fireball special
//! - **Archer**: every attack is an arrow, Piercing Shot passes through enemies

use crate::game::{
    melee_reach, roll_critical, scale_damage, Actor, AnimationState, EntityId, Facing,
    Projectile, ProjectileKind, Rect, Vitals,
};
use crate::{config, DungeonError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Hero sprite size in pixels.
pub const HERO_SIZE: f32 = 64.0;

/// Stun applied by a Shield Bash.
pub const SHIELD_BASH_STUN: f32 = 2.0;

/// Damage taken while the Knight's shield is raised.
pub const SHIELD_DAMAGE_FACTOR: f32 = 0.75;

/// Health restored by the Cleric's special.
pub const CLERIC_SPECIAL_HEAL: u32 = 20;

/// Health fraction under which the Knight hits harder.
pub const KNIGHT_LOW_HEALTH: f32 = 0.3;

/// Playable hero classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroKind {
    Knight,
    Cleric,
    Archer,
}

/// Base statistics of a hero class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroStats {
    pub max_health: u32,
    pub speed: f32,
    pub damage: u32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub special_cooldown: f32,
}

impl HeroKind {
    pub fn all() -> [HeroKind; 3] {
        [HeroKind::Knight, HeroKind::Cleric, HeroKind::Archer]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeroKind::Knight => "knight",
            HeroKind::Cleric => "cleric",
            HeroKind::Archer => "archer",
        }
    }

    pub fn stats(self) -> HeroStats {
        match self {
            HeroKind::Knight => HeroStats {
                max_health: 375,
                speed: 50.0,
                damage: 55,
                attack_range: 40.0,
                attack_cooldown: 0.6,
                special_cooldown: 15.0,
            },
            HeroKind::Cleric => HeroStats {
                max_health: 250,
                speed: 35.0,
                damage: 85,
                attack_range: 75.0,
                attack_cooldown: 0.8,
                special_cooldown: 12.0,
            },
            HeroKind::Archer => HeroStats {
                max_health: 150,
                speed: 20.0,
                damage: 40,
                attack_range: 150.0,
                attack_cooldown: 0.7,
                special_cooldown: 10.0,
            },
        }
    }

    pub fn special_name(self) -> &'static str {
        match self {
            HeroKind::Knight => "Shield Bash",
            HeroKind::Cleric => "Divine Fire",
            HeroKind::Archer => "Piercing Shot",
        }
    }
}

impl fmt::Display for HeroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeroKind {
    type Err = DungeonError;

    /// Parses a hero tag, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::HeroKind;
    ///
    /// assert_eq!("Knight".parse::<HeroKind>().unwrap(), HeroKind::Knight);
    /// assert!("wizard".parse::<HeroKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "knight" => Ok(HeroKind::Knight),
            "cleric" => Ok(HeroKind::Cleric),
            "archer" => Ok(HeroKind::Archer),
            other => Err(DungeonError::InvalidStateTransition(format!(
                "Unknown hero type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Swing {
    Basic,
    Special,
}

/// What an attack or special produced, for the orchestrator to apply.
#[derive(Debug, Clone, Default)]
pub struct AttackOutcome {
    pub special: bool,
    /// Whether the swing has a melee hitbox
    pub melee: bool,
    pub projectile: Option<Projectile>,
    pub healed: u32,
}

/// The player-controlled hero.
#[derive(Debug, Clone)]
pub struct Hero {
    id: EntityId,
    kind: HeroKind,
    stats: HeroStats,
    x: f32,
    y: f32,
    vy: f32,
    on_ground: bool,
    standing_on: Option<usize>,
    facing: Facing,
    move_dir: f32,
    vitals: Vitals,
    attack_cooldown: f32,
    special_cooldown: f32,
    attack_timer: f32,
    swing: Option<Swing>,
    special_active: bool,
    combo: u8,
    /// Enemies already struck by the active swing
    hit_set: HashSet<EntityId>,
    potions: u32,
}

impl Hero {
    /// Creates a full-health hero standing at `(x, y)`.
    pub fn new(kind: HeroKind, x: f32, y: f32) -> Self {
        let stats = kind.stats();
        Self {
            id: Uuid::new_v4(),
            kind,
            stats,
            x,
            y,
            vy: 0.0,
            on_ground: true,
            standing_on: None,
            facing: Facing::Right,
            move_dir: 0.0,
            vitals: Vitals::new(stats.max_health),
            attack_cooldown: 0.0,
            special_cooldown: 0.0,
            attack_timer: 0.0,
            swing: None,
            special_active: false,
            combo: 0,
            hit_set: HashSet::new(),
            potions: 0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> HeroKind {
        self.kind
    }

    pub fn stats(&self) -> HeroStats {
        self.stats
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn potions(&self) -> u32 {
        self.potions
    }

    pub fn add_potions(&mut self, count: u32) {
        self.potions += count;
    }

    pub fn attack_cooldown_remaining(&self) -> f32 {
        self.attack_cooldown
    }

    pub fn special_cooldown_remaining(&self) -> f32 {
        self.special_cooldown
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer > 0.0
    }

    /// Whether the Knight's shield is raised.
    pub fn is_shielded(&self) -> bool {
        self.kind == HeroKind::Knight && self.special_active && self.is_attacking()
    }

    pub fn combo(&self) -> u8 {
        self.combo
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vy
    }

    pub(crate) fn standing_on(&self) -> Option<usize> {
        self.standing_on
    }

    pub(crate) fn set_standing_on(&mut self, platform: Option<usize>) {
        self.standing_on = platform;
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub(crate) fn shift_x(&mut self, dx: f32) {
        self.x += dx;
    }

    /// Sets the horizontal intent for this tick: -1, 0 or 1.
    pub fn set_movement(&mut self, direction: f32) {
        if !self.is_alive() {
            self.move_dir = 0.0;
            return;
        }
        self.move_dir = direction.clamp(-1.0, 1.0);
        if self.move_dir < 0.0 {
            self.facing = Facing::Left;
        } else if self.move_dir > 0.0 {
            self.facing = Facing::Right;
        }
    }

    /// Starts a jump if standing on something.
    pub fn jump(&mut self) -> bool {
        if !self.is_alive() || !self.on_ground {
            return false;
        }
        self.vy = -config::JUMP_VELOCITY;
        self.on_ground = false;
        self.standing_on = None;
        true
    }

    /// Applies horizontal intent and gravity for one tick.
    pub fn apply_movement(&mut self, dt: f32) {
        if !self.is_alive() {
            return;
        }
        let frames = dt * 60.0;
        self.x += self.move_dir * self.stats.speed * config::SPEED_SCALE * frames;
        self.vy = (self.vy + config::GRAVITY * frames).min(config::MAX_FALL_SPEED);
        self.y += self.vy * frames;
        self.on_ground = false;
    }

    /// Puts the feet on a surface at `top_y`.
    pub fn land_on(&mut self, top_y: f32) {
        self.y = top_y - HERO_SIZE;
        self.vy = 0.0;
        self.on_ground = true;
    }

    pub(crate) fn bump_head(&mut self, bottom_y: f32) {
        self.y = bottom_y;
        self.vy = 0.0;
    }

    /// Keeps the hero above the floor. Returns true on contact.
    pub fn land_on_floor(&mut self, floor_y: f32) -> bool {
        if self.y + HERO_SIZE >= floor_y {
            self.land_on(floor_y);
            self.standing_on = None;
            return true;
        }
        false
    }

    /// Clamps the hero into a room horizontally and above its floor.
    pub fn clamp_to_room(&mut self, width: f32, floor_y: f32) {
        self.x = self.x.clamp(0.0, (width - HERO_SIZE).max(0.0));
        if self.y + HERO_SIZE > floor_y {
            self.land_on(floor_y);
        }
    }

    /// Teleports the hero, used on room change and load.
    pub fn place(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.vy = 0.0;
        self.on_ground = true;
        self.standing_on = None;
    }

    /// Sets health and potion stash from a saved run.
    pub fn restore(&mut self, health: u32, potions: u32) {
        self.vitals.set_health(health);
        self.potions = potions;
    }

    fn begin_swing(&mut self, swing: Option<Swing>, special: bool) {
        self.hit_set.clear();
        self.attack_timer = config::ATTACK_DURATION;
        self.swing = swing;
        self.special_active = special;
    }

    fn projectile(&self, kind: ProjectileKind, damage: u32, piercing: bool) -> Projectile {
        Projectile::fired_from(kind, self.bounds(), self.facing, damage, piercing, Some(self.id))
    }

    /// Basic attack. Blocked while dead or on cooldown.
    pub fn attack<R: Rng>(&mut self, rng: &mut R) -> Option<AttackOutcome> {
        if !self.is_alive() || self.attack_cooldown > 0.0 {
            return None;
        }
        self.attack_cooldown = self.stats.attack_cooldown;
        self.combo = self.combo % 3 + 1;

        let outcome = match self.kind {
            HeroKind::Archer => {
                self.begin_swing(None, false);
                let damage = roll_critical(self.stats.damage, rng);
                AttackOutcome {
                    projectile: Some(self.projectile(ProjectileKind::Arrow, damage, false)),
                    ..AttackOutcome::default()
                }
            }
            HeroKind::Knight | HeroKind::Cleric => {
                self.begin_swing(Some(Swing::Basic), false);
                AttackOutcome {
                    melee: true,
                    ..AttackOutcome::default()
                }
            }
        };
        log::debug!("{} attacks (combo {})", self.kind, self.combo);
        Some(outcome)
    }

    /// Class special. Blocked while dead or on cooldown.
    pub fn special<R: Rng>(&mut self, rng: &mut R) -> Option<AttackOutcome> {
        if !self.is_alive() || self.special_cooldown > 0.0 {
            return None;
        }
        self.special_cooldown = self.stats.special_cooldown;

        let outcome = match self.kind {
            HeroKind::Knight => {
                self.begin_swing(Some(Swing::Special), true);
                AttackOutcome {
                    special: true,
                    melee: true,
                    ..AttackOutcome::default()
                }
            }
            HeroKind::Cleric => {
                self.begin_swing(None, true);
                let healed = self.vitals.heal(CLERIC_SPECIAL_HEAL);
                let damage = roll_critical(self.stats.damage * 2, rng);
                AttackOutcome {
                    special: true,
                    healed,
                    projectile: Some(self.projectile(ProjectileKind::Fireball, damage, true)),
                    ..AttackOutcome::default()
                }
            }
            HeroKind::Archer => {
                self.begin_swing(None, true);
                let damage = roll_critical(self.stats.damage * 2, rng);
                AttackOutcome {
                    special: true,
                    projectile: Some(self.projectile(ProjectileKind::Arrow, damage, true)),
                    ..AttackOutcome::default()
                }
            }
        };
        log::debug!("{} uses {}", self.kind, self.kind.special_name());
        Some(outcome)
    }

    /// Reach box of the active melee swing, if any.
    pub fn melee_hitbox(&self) -> Option<Rect> {
        if self.swing.is_none() || !self.is_attacking() {
            return None;
        }
        let reach = (HERO_SIZE * 0.8).max(self.stats.attack_range);
        Some(melee_reach(self.bounds(), self.facing, reach))
    }

    /// Records `enemy` as struck by the active swing. False if it already was.
    pub fn register_hit(&mut self, enemy: EntityId) -> bool {
        self.hit_set.insert(enemy)
    }

    pub fn has_hit(&self, enemy: EntityId) -> bool {
        self.hit_set.contains(&enemy)
    }

    /// Melee damage against a target, with class bonuses and the critical roll.
    pub fn melee_damage<R: Rng>(&self, target_undead: bool, rng: &mut R) -> u32 {
        let mut damage = self.stats.damage;
        match self.kind {
            HeroKind::Knight if self.vitals.fraction() < KNIGHT_LOW_HEALTH => {
                damage = scale_damage(damage, 1.5);
            }
            HeroKind::Cleric if target_undead => {
                damage *= 2;
            }
            _ => {}
        }
        roll_critical(damage, rng)
    }

    /// Stun the active swing applies to enemies it strikes.
    pub fn swing_stun(&self) -> Option<f32> {
        (self.swing == Some(Swing::Special) && self.kind == HeroKind::Knight)
            .then_some(SHIELD_BASH_STUN)
    }

    /// Drinks a potion. Returns the amount healed, or None with an empty stash.
    pub fn use_potion(&mut self) -> Option<u32> {
        if !self.is_alive() || self.potions == 0 {
            return None;
        }
        self.potions -= 1;
        Some(self.vitals.heal(config::POTION_HEAL))
    }
}

impl Actor for Hero {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, HERO_SIZE, HERO_SIZE)
    }

    fn velocity(&self) -> (f32, f32) {
        (self.move_dir * self.stats.speed * config::SPEED_SCALE, self.vy)
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
        } else if self.is_attacking() && self.special_active {
            AnimationState::Special
        } else if self.is_attacking() {
            AnimationState::Attacking(self.combo)
        } else if self.vitals.is_invulnerable() {
            AnimationState::Hurt
        } else if !self.on_ground && self.vy < 0.0 {
            AnimationState::Jumping
        } else if !self.on_ground && self.vy > config::GRAVITY {
            AnimationState::Falling
        } else if self.move_dir != 0.0 {
            AnimationState::Walking
        } else {
            AnimationState::Idle
        }
    }

    fn tick(&mut self, dt: f32) {
        self.vitals.tick(dt);
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.special_cooldown = (self.special_cooldown - dt).max(0.0);
        if self.attack_timer > 0.0 {
            self.attack_timer = (self.attack_timer - dt).max(0.0);
            if self.attack_timer == 0.0 {
                self.swing = None;
                self.special_active = false;
            }
        }
        if !self.is_alive() {
            self.move_dir = 0.0;
        }
    }

    fn take_damage(&mut self, amount: u32) -> bool {
        let amount = if self.is_shielded() {
            scale_damage(amount, SHIELD_DAMAGE_FACTOR)
        } else {
            amount
        };
        let landed = self.vitals.apply_damage(amount);
        if landed && !self.is_alive() {
            log::info!("{} has fallen", self.kind);
        }
        landed
    }
}
