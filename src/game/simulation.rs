//! # Simulation Step
//!
//! One fixed pass over the run per frame. Within a tick the order is:
//!
//! 1. Resolve input intent (movement, jump, attacks, potion)
//! 2. Apply physics and keep the hero inside the room
//! 3. Check doors; a crossing hands the tick over to the transition
//! 4. Pick up pillars and potions, unlocking the boss room at four pillars
//! 5. Advance timers, platforms and projectiles
//! 6. Resolve melee, projectile, platform and floor collisions
//! 7. Let enemies pursue and strike the hero
//! 8. Move the camera
//! 9. Decide victory or defeat
//!
//! While a transition is running, input is ignored and only the transition
//! advances. The room swap happens once, at the transition midpoint.

use crate::game::{
    resolve_platform_collisions, Actor, AttackOutcome, Enemy, GameEvent, GameState, Hero,
    Phase, ProjectileManager, RoomChange, HERO_SIZE,
};
use crate::generation::{DungeonGraph, EncounterGenerator};
use crate::input::InputState;
use crate::config;
use rand::rngs::StdRng;

/// Longest tick accepted, in seconds. Longer frames are clamped.
pub const MAX_STEP: f32 = 0.25;

impl GameState {
    /// Advances the run by `dt` seconds and returns what happened.
    ///
    /// Does nothing outside [`Phase::Playing`] except honoring a pause press.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::{GameConfig, GameState, InputState};
    ///
    /// let mut state = GameState::new(GameConfig::for_testing(3));
    /// state.select_hero("archer").unwrap();
    ///
    /// let walk = InputState { move_right: true, ..InputState::idle() };
    /// let before = state.hero().unwrap().position().0;
    /// state.step(1.0 / 60.0, &walk);
    /// assert!(state.hero().unwrap().position().0 > before);
    /// ```
    pub fn step(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_STEP) } else { 0.0 };

        if input.pause && !self.transition.is_active() {
            events.extend(self.toggle_pause());
            return events;
        }
        if self.phase != Phase::Playing {
            return events;
        }

        self.play_time += dt as f64;
        if self.transition.is_active() {
            self.advance_transition(dt, &mut events);
        } else {
            self.tick_room(dt, input, &mut events);
        }

        for event in &events {
            self.statistics.update_from_event(event);
        }
        events
    }

    fn advance_transition(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        if let Some(change) = self.transition.update(dt) {
            self.complete_room_change(change, events);
        }
        self.snap_camera();
    }

    /// Swaps the current room at the transition midpoint.
    fn complete_room_change(&mut self, change: RoomChange, events: &mut Vec<GameEvent>) {
        let Some(dungeon) = self.dungeon.as_mut() else {
            return;
        };
        let first_visit = dungeon
            .room(change.target)
            .map(|room| !room.visited)
            .unwrap_or(false);
        if !dungeon.move_to(change.target) {
            log::warn!("Transition to missing room {} dropped", change.target);
            return;
        }
        let entry = dungeon.entry_direction();
        let Some(room) = dungeon.current_room() else {
            return;
        };

        if let Some(hero) = self.hero.as_mut() {
            let (x, y) = DungeonGraph::spawn_position_for_room(room, HERO_SIZE, HERO_SIZE, entry);
            hero.place(x, y);
        }
        self.projectiles.clear();
        self.enemies = EncounterGenerator::for_room(room)
            .spawn(&mut self.rng)
            .unwrap_or_else(|e| {
                log::warn!("No encounter for room {}: {}", room.coord, e);
                Vec::new()
            });
        self.door_notice = false;

        log::info!(
            "Entered room {} ({} enemies{})",
            room.coord,
            self.enemies.len(),
            if first_visit { ", first visit" } else { "" }
        );
        events.push(GameEvent::RoomEntered {
            room: room.coord,
            first_visit,
        });
        if room.is_boss_room() && !self.boss_encountered {
            self.boss_encountered = true;
            events.push(GameEvent::BossEncountered);
        }
    }

    fn tick_room(&mut self, dt: f32, input: &InputState, events: &mut Vec<GameEvent>) {
        let (Some(dungeon), Some(hero)) = (self.dungeon.as_mut(), self.hero.as_mut()) else {
            return;
        };

        // 1. Intent
        resolve_intent(hero, input, &mut self.rng, &mut self.projectiles, events);

        // 2. Physics
        let previous = hero.bounds();
        hero.apply_movement(dt);
        if let Some(room) = dungeon.current_room() {
            hero.clamp_to_room(room.width, room.floor_y());
        }

        // 3. Doors
        let body = hero.bounds();
        if let Some((direction, target)) = dungeon.find_door_crossing(&body, input.interact) {
            let from = dungeon.current();
            let change = RoomChange { target };
            if self
                .transition
                .start(self.config.transition_kind, self.config.transition_duration, change)
            {
                hero.set_movement(0.0);
                log::debug!("Leaving {} for {} ({:?})", from, target, direction);
                events.push(GameEvent::TransitionStarted {
                    from,
                    to: target,
                    direction,
                });
                return;
            }
        }
        match dungeon.locked_door_at(&body) {
            Some(door) if !self.door_notice => {
                self.door_notice = true;
                events.push(GameEvent::DoorLocked {
                    message: door
                        .lock_message()
                        .unwrap_or(config::BOSS_DOOR_MESSAGE)
                        .to_string(),
                });
            }
            Some(_) => {}
            None => self.door_notice = false,
        }

        // 4. Pickups
        if let Some(room) = dungeon.current_room_mut() {
            for kind in room.collect_pillars(&body) {
                if self.collected_pillars.insert(kind) {
                    log::info!("Collected the pillar of {}", kind);
                    events.push(GameEvent::PillarCollected {
                        kind,
                        total: self.collected_pillars.len(),
                    });
                }
            }
            let picked = room.collect_potions(&body);
            if picked > 0 {
                hero.add_potions(picked);
                events.push(GameEvent::PotionCollected { count: picked });
            }
        }
        if self.collected_pillars.len() >= config::BOSS_UNLOCK_PILLARS
            && dungeon.unlock_boss_doors()
        {
            log::info!("Boss room unlocked");
            events.push(GameEvent::BossDoorsUnlocked);
        }

        let Some(room) = dungeon.current_room_mut() else {
            return;
        };
        let (width, height, floor_y) = (room.width, room.height, room.floor_y());

        // 5. Timers and movers
        hero.tick(dt);
        for enemy in &mut self.enemies {
            enemy.tick(dt);
        }
        for platform in &mut room.platforms {
            platform.update(dt);
        }
        self.projectiles.update(dt, width);

        // 6. Collisions
        resolve_melee(hero, &mut self.enemies, &mut self.rng, events);
        for hit in self.projectiles.resolve_hits(&mut self.enemies) {
            events.push(GameEvent::EnemyDamaged {
                id: hit.enemy,
                damage: hit.damage,
            });
            if hit.killed {
                if let Some(enemy) = self.enemies.iter().find(|enemy| enemy.id() == hit.enemy) {
                    log::info!("{} defeated", enemy.kind());
                    events.push(GameEvent::EnemyKilled {
                        id: hit.enemy,
                        kind: enemy.kind(),
                    });
                }
            }
        }
        let contact = resolve_platform_collisions(&mut room.platforms, hero, previous);
        if contact.broke {
            events.push(GameEvent::PlatformBroke);
        }
        hero.land_on_floor(floor_y);

        // 7. Enemies
        resolve_enemy_attacks(hero, &mut self.enemies, dt, width, events);

        // 8. Camera
        self.camera.follow(&hero.bounds(), width, height);

        // 9. Outcome
        let hero_alive = hero.is_alive();
        let room_cleared =
            !self.enemies.is_empty() && self.enemies.iter().all(|enemy| !enemy.is_alive());
        if !hero_alive {
            events.extend(self.set_phase(Phase::GameOver));
        } else if room_cleared {
            events.extend(self.set_phase(Phase::Victory));
        }
    }
}

fn resolve_intent(
    hero: &mut Hero,
    input: &InputState,
    rng: &mut StdRng,
    projectiles: &mut ProjectileManager,
    events: &mut Vec<GameEvent>,
) {
    if !hero.is_alive() {
        hero.set_movement(0.0);
        return;
    }
    hero.set_movement(input.horizontal());
    if input.jump {
        hero.jump();
    }
    if input.attack {
        if let Some(outcome) = hero.attack(rng) {
            apply_outcome(outcome, projectiles, events);
        }
    }
    if input.special {
        if let Some(outcome) = hero.special(rng) {
            apply_outcome(outcome, projectiles, events);
        }
    }
    if input.use_potion {
        if let Some(healed) = hero.use_potion() {
            events.push(GameEvent::PotionUsed { healed });
        }
    }
}

fn apply_outcome(
    outcome: AttackOutcome,
    projectiles: &mut ProjectileManager,
    events: &mut Vec<GameEvent>,
) {
    events.push(GameEvent::AttackStarted {
        special: outcome.special,
    });
    if outcome.healed > 0 {
        events.push(GameEvent::HeroHealed {
            amount: outcome.healed,
        });
    }
    if let Some(projectile) = outcome.projectile {
        let kind = projectile.kind;
        let id = projectiles.spawn(projectile);
        events.push(GameEvent::ProjectileFired { id, kind });
    }
}

/// Applies the active swing to every enemy it reaches, once per enemy.
fn resolve_melee(
    hero: &mut Hero,
    enemies: &mut [Enemy],
    rng: &mut StdRng,
    events: &mut Vec<GameEvent>,
) {
    let Some(reach) = hero.melee_hitbox() else {
        return;
    };
    for enemy in enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
        if hero.has_hit(enemy.id()) || !reach.intersects(&enemy.hitbox()) {
            continue;
        }
        let damage = hero.melee_damage(enemy.kind().is_undead(), rng);
        // An invulnerable enemy stays eligible for the rest of the swing
        if !enemy.take_damage(damage) {
            continue;
        }
        hero.register_hit(enemy.id());
        events.push(GameEvent::EnemyDamaged {
            id: enemy.id(),
            damage,
        });
        if !enemy.is_alive() {
            log::info!("{} defeated", enemy.kind());
            events.push(GameEvent::EnemyKilled {
                id: enemy.id(),
                kind: enemy.kind(),
            });
        }
        if let Some(stun) = hero.swing_stun() {
            enemy.stun(stun);
            events.push(GameEvent::EnemyStunned { id: enemy.id() });
        }
    }
}

/// Lets every enemy chase the hero and applies the blows that land.
fn resolve_enemy_attacks(
    hero: &mut Hero,
    enemies: &mut [Enemy],
    dt: f32,
    room_width: f32,
    events: &mut Vec<GameEvent>,
) {
    let target = hero.hitbox();
    for enemy in enemies.iter_mut() {
        let attack = if hero.is_alive() {
            enemy.pursue(dt, &target)
        } else {
            None
        };
        enemy.clamp_to_room(room_width);

        let Some(attack) = attack else {
            continue;
        };
        let before = hero.health();
        if hero.take_damage(attack.damage) {
            let health = hero.health();
            log::debug!(
                "{} hits for {}{}",
                enemy.kind(),
                before - health,
                if attack.cleave { " (cleave)" } else { "" }
            );
            events.push(GameEvent::HeroDamaged {
                damage: before - health,
                health,
            });
            if !hero.is_alive() {
                events.push(GameEvent::HeroDied);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EnemyKind, TransitionKind};
    use crate::generation::{Direction, DungeonTemplate, GridCoord, PillarKind};
    use crate::settings::GameConfig;

    const FRAME: f32 = 1.0 / 60.0;

    fn run(config: GameConfig, hero: &str) -> GameState {
        let mut state = GameState::new(config);
        state.select_hero(hero).unwrap();
        state
    }

    fn idle(state: &mut GameState, frames: usize) -> Vec<GameEvent> {
        (0..frames)
            .flat_map(|_| state.step(FRAME, &InputState::idle()))
            .collect()
    }

    fn press(action: impl Fn(&mut InputState)) -> InputState {
        let mut input = InputState::idle();
        action(&mut input);
        input
    }

    /// A square dungeon with instant transitions, hero standing on the floor.
    fn square_run(hero: &str) -> GameState {
        let mut config = GameConfig::for_testing(11);
        config.template = DungeonTemplate::Square;
        config.transition_kind = TransitionKind::Instant;
        let mut state = run(config, hero);
        idle(&mut state, 1);
        state
    }

    #[test]
    fn test_step_does_nothing_before_hero_select() {
        let mut state = GameState::new(GameConfig::for_testing(1));
        let events = state.step(FRAME, &press(|i| i.move_right = true));
        assert!(events.is_empty());
        assert_eq!(state.phase(), Phase::HeroSelect);
    }

    #[test]
    fn test_pause_freezes_the_world() {
        let mut state = run(GameConfig::for_testing(1), "knight");
        state.step(FRAME, &press(|i| i.pause = true));
        assert_eq!(state.phase(), Phase::Paused);

        let before = state.hero().unwrap().position();
        state.step(FRAME, &press(|i| i.move_right = true));
        assert_eq!(state.hero().unwrap().position(), before);

        state.step(FRAME, &press(|i| i.pause = true));
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_hero_rests_on_floor() {
        let mut state = run(GameConfig::for_testing(1), "cleric");
        idle(&mut state, 30);
        let hero = state.hero().unwrap();
        assert!(hero.on_ground());
        assert_eq!(hero.bounds().bottom(), 480.0);
    }

    #[test]
    fn test_jump_leaves_and_returns_to_floor() {
        let mut state = run(GameConfig::for_testing(1), "knight");
        idle(&mut state, 1);
        state.step(FRAME, &press(|i| i.jump = true));
        assert!(state.hero().unwrap().bounds().bottom() < 480.0);

        idle(&mut state, 120);
        assert_eq!(state.hero().unwrap().bounds().bottom(), 480.0);
    }

    #[test]
    fn test_hero_stays_inside_room() {
        let mut state = run(GameConfig::for_testing(1), "knight");
        for _ in 0..600 {
            state.step(FRAME, &press(|i| i.move_left = true));
        }
        assert_eq!(state.hero().unwrap().position().0, 0.0);
    }

    #[test]
    fn test_walk_through_door_changes_room() {
        let mut state = square_run("knight");
        let start = state.dungeon().unwrap().current();

        let mut entered = None;
        for _ in 0..1200 {
            for event in state.step(FRAME, &press(|i| i.move_left = true)) {
                if let GameEvent::RoomEntered { room, first_visit } = event {
                    entered = Some((room, first_visit));
                }
            }
            if entered.is_some() {
                break;
            }
        }

        let (room, first_visit) = entered.unwrap();
        assert_eq!(room, GridCoord::new(start.col - 1, start.row));
        assert!(first_visit);
        assert_eq!(state.dungeon().unwrap().previous(), Some(start));

        // Entered through the RIGHT wall, spawned clear of that door
        let door = state.current_room().unwrap().door(Direction::Right).unwrap().rect;
        let hero = state.hero().unwrap().bounds();
        assert_eq!(hero.right(), door.x - config::DOOR_SPAWN_OFFSET);
        assert_eq!(state.statistics().rooms_visited, 2);
    }

    #[test]
    fn test_interactive_door_needs_interact() {
        let mut state = square_run("knight");
        let up = state.current_room().unwrap().door(Direction::Up).unwrap().rect;
        state.hero.as_mut().unwrap().set_x(up.x);

        let events = idle(&mut state, 1);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::TransitionStarted { .. })));

        let events = state.step(FRAME, &press(|i| i.interact = true));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::TransitionStarted {
                direction: Direction::Up,
                ..
            }
        )));
    }

    #[test]
    fn test_fade_swaps_room_at_midpoint() {
        let mut config = GameConfig::for_testing(11);
        config.template = DungeonTemplate::Square;
        let mut state = run(config, "knight");
        idle(&mut state, 1);
        let start = state.dungeon().unwrap().current();
        let up = state.current_room().unwrap().door(Direction::Up).unwrap().rect;
        state.hero.as_mut().unwrap().set_x(up.x);

        state.step(FRAME, &press(|i| i.interact = true));
        assert!(state.is_transitioning());

        // 0.8 s fade: still in the old room just before the midpoint
        for _ in 0..20 {
            state.step(FRAME, &press(|i| i.move_right = true));
        }
        assert_eq!(state.dungeon().unwrap().current(), start);

        let events = idle(&mut state, 10);
        let entered: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RoomEntered { .. }))
            .collect();
        assert_eq!(entered.len(), 1);
        assert_ne!(state.dungeon().unwrap().current(), start);

        idle(&mut state, 30);
        assert!(!state.is_transitioning());
    }

    #[test]
    fn test_locked_boss_door_announces_once() {
        let mut state = run(GameConfig::for_testing(5), "knight");
        let door = state.current_room().unwrap().door(Direction::Right).unwrap().rect;
        state.hero.as_mut().unwrap().set_x(door.x);
        // Pillars in the start room would unlock the door on pickup
        state.dungeon.as_mut().unwrap().current_room_mut().unwrap().pillars.clear();

        let events = idle(&mut state, 5);
        let notices = events
            .iter()
            .filter(|e| matches!(e, GameEvent::DoorLocked { .. }))
            .count();
        assert_eq!(notices, 1);
        assert_eq!(state.dungeon().unwrap().current(), GridCoord::new(1, 1));
    }

    #[test]
    fn test_four_pillars_unlock_the_boss_room() {
        let mut state = run(GameConfig::for_testing(5), "knight");
        let pillars: Vec<_> = state
            .current_room()
            .unwrap()
            .pillars
            .iter()
            .map(|pillar| pillar.rect)
            .collect();
        assert_eq!(pillars.len(), 4);

        let mut unlocked = false;
        for rect in pillars {
            state.hero.as_mut().unwrap().set_x(rect.x);
            for event in idle(&mut state, 1) {
                unlocked |= event == GameEvent::BossDoorsUnlocked;
            }
        }
        assert!(unlocked);
        assert_eq!(state.collected_pillars().len(), 4);
        assert!(!state.collected_pillars().contains(&PillarKind::Composition));
        assert!(!state.dungeon().unwrap().boss_doors_locked());
    }

    #[test]
    fn test_melee_hits_each_enemy_once_per_swing() {
        let mut state = run(GameConfig::for_testing(2), "knight");
        let (x, _) = state.hero().unwrap().position();
        state.enemies = vec![Enemy::spawn(EnemyKind::SkeletonWarrior, x + 70.0, 480.0)];

        let mut damaged = 0;
        for event in state.step(FRAME, &press(|i| i.attack = true)) {
            damaged += matches!(event, GameEvent::EnemyDamaged { .. }) as usize;
        }
        for event in idle(&mut state, 20) {
            damaged += matches!(event, GameEvent::EnemyDamaged { .. }) as usize;
        }
        assert_eq!(damaged, 1);
        assert!(state.statistics().damage_dealt >= 55);
    }

    #[test]
    fn test_swing_lands_once_invulnerability_ends() {
        let mut state = run(GameConfig::for_testing(2), "knight");
        let (x, _) = state.hero().unwrap().position();
        let mut enemy = Enemy::spawn(EnemyKind::SkeletonWarrior, x + 70.0, 480.0);
        assert!(enemy.take_damage(1));
        enemy.tick(0.3);
        let before = enemy.health();
        state.enemies = vec![enemy];

        let mut damaged = 0;
        for event in state.step(FRAME, &press(|i| i.attack = true)) {
            damaged += matches!(event, GameEvent::EnemyDamaged { .. }) as usize;
        }
        assert_eq!(damaged, 0);
        for event in idle(&mut state, 25) {
            damaged += matches!(event, GameEvent::EnemyDamaged { .. }) as usize;
        }
        assert_eq!(damaged, 1);
        assert!(state.enemies()[0].health() < before);
    }

    #[test]
    fn test_shield_bash_skips_invulnerable_enemies() {
        let mut state = run(GameConfig::for_testing(2), "knight");
        let (x, _) = state.hero().unwrap().position();
        let mut enemy = Enemy::spawn(EnemyKind::Gorgon, x + 70.0, 480.0);
        assert!(enemy.take_damage(1));
        state.enemies = vec![enemy];

        let events = state.step(FRAME, &press(|i| i.special = true));
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyStunned { .. })));
        assert!(!state.enemies()[0].is_stunned());
    }

    #[test]
    fn test_shield_bash_stuns() {
        let mut state = run(GameConfig::for_testing(2), "knight");
        let (x, _) = state.hero().unwrap().position();
        state.enemies = vec![Enemy::spawn(EnemyKind::Gorgon, x + 70.0, 480.0)];

        let events = state.step(FRAME, &press(|i| i.special = true));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyStunned { .. })));
        assert!(state.enemies()[0].is_stunned());
    }

    #[test]
    fn test_arrow_flies_and_hits() {
        let mut state = run(GameConfig::for_testing(2), "archer");
        let (x, _) = state.hero().unwrap().position();
        state.enemies = vec![Enemy::spawn(EnemyKind::SkeletonWarrior, x + 300.0, 480.0)];

        let events = state.step(FRAME, &press(|i| i.attack = true));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ProjectileFired { .. })));

        let events = idle(&mut state, 60);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyDamaged { .. })));
        assert!(state.projectiles().is_empty());
    }

    #[test]
    fn test_clearing_a_room_is_victory() {
        let mut state = run(GameConfig::for_testing(2), "knight");
        let (x, _) = state.hero().unwrap().position();
        let mut enemy = Enemy::spawn(EnemyKind::SkeletonWarrior, x + 70.0, 480.0);
        enemy.take_damage(enemy.health() - 1);
        enemy.tick(1.0);
        state.enemies = vec![enemy];

        let events = state.step(FRAME, &press(|i| i.attack = true));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyKilled { .. })));
        assert_eq!(state.phase(), Phase::Victory);
        assert_eq!(state.statistics().enemies_defeated, 1);

        // Terminal: further steps change nothing
        assert!(idle(&mut state, 5).is_empty());
    }

    #[test]
    fn test_death_is_game_over() {
        let mut state = run(GameConfig::for_testing(2), "archer");
        let (x, _) = state.hero().unwrap().position();
        state.enemies = vec![Enemy::spawn(EnemyKind::SkeletonWarrior, x + 20.0, 480.0)];
        state.hero.as_mut().unwrap().restore(1, 0);

        let events = idle(&mut state, 5);
        assert!(events.contains(&GameEvent::HeroDied));
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.hero().unwrap().health(), 0);

        // Stays over whatever the player presses
        let position = state.hero().unwrap().position();
        let played = state.play_time();
        let inputs = [
            press(|i| i.move_right = true),
            press(|i| i.attack = true),
            press(|i| i.pause = true),
            press(|i| i.use_potion = true),
        ];
        for input in &inputs {
            for _ in 0..10 {
                assert!(state.step(FRAME, input).is_empty());
            }
        }
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.hero().unwrap().position(), position);
        assert_eq!(state.hero().unwrap().health(), 0);
        assert_eq!(state.play_time(), played);

        assert_eq!(
            state.reset(),
            Some(GameEvent::PhaseChanged {
                from: Phase::GameOver,
                to: Phase::HeroSelect
            })
        );
        assert_eq!(state.phase(), Phase::HeroSelect);
        assert!(state.hero().is_none());

        state.select_hero("knight").unwrap();
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.hero().unwrap().health(), 375);
    }

    #[test]
    fn test_potion_heals() {
        let mut state = run(GameConfig::for_testing(2), "cleric");
        let hero = state.hero.as_mut().unwrap();
        hero.restore(100, 1);

        let events = state.step(FRAME, &press(|i| i.use_potion = true));
        assert!(events.contains(&GameEvent::PotionUsed { healed: 50 }));
        assert_eq!(state.hero().unwrap().health(), 150);
        assert_eq!(state.hero().unwrap().potions(), 0);
        assert_eq!(state.statistics().potions_used, 1);
    }

    #[test]
    fn test_huge_frame_is_clamped() {
        let mut state = run(GameConfig::for_testing(2), "knight");
        state.step(1000.0, &InputState::idle());
        state.step(f32::NAN, &InputState::idle());
        assert!((state.play_time() - MAX_STEP as f64).abs() < 1e-6);
    }
}
