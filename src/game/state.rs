//! # Game State Module
//!
//! Central run state and its lifecycle.
//!
//! [`GameState`] owns everything a run needs: the dungeon, the hero, the
//! enemies and projectiles of the current room, the transition machine, the
//! camera and the seeded RNG. It moves between phases through
//! [`GameState::select_hero`], [`GameState::toggle_pause`] and
//! [`GameState::reset`]; the per-frame tick lives in the simulation module.

use crate::game::{
    Actor, AnimationState, Camera, Enemy, EnemyKind, EntityId, Facing, GameEvent, Hero, HeroKind,
    ProjectileKind, ProjectileManager, Rect, SaveRecord, SaveService, TransitionManager,
    HERO_SIZE,
};
use crate::generation::{
    utils, DungeonGenerator, DungeonGraph, EncounterGenerator, GenerationConfig, Generator,
    GridCoord, PillarKind, Room,
};
use crate::settings::GameConfig;
use crate::{config, DungeonError, DungeonResult, LoadError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to pick a class
    HeroSelect,
    Playing,
    Paused,
    /// The hero died. Terminal until reset.
    GameOver,
    /// A populated room was cleared. Terminal until reset.
    Victory,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Victory)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::HeroSelect => "Hero Select",
            Phase::Playing => "Playing",
            Phase::Paused => "Paused",
            Phase::GameOver => "Game Over",
            Phase::Victory => "Victory",
        };
        f.write_str(name)
    }
}

/// Statistics tracking the player's progress through a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Number of enemies defeated
    pub enemies_defeated: u32,
    /// Total damage dealt
    pub damage_dealt: u64,
    /// Total damage taken
    pub damage_taken: u64,
    /// Distinct rooms entered, the start room included
    pub rooms_visited: u32,
    /// Unique pillars collected
    pub pillars_collected: u32,
    /// Potions drunk
    pub potions_used: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::EnemyDamaged { damage, .. } => {
                self.damage_dealt += *damage as u64;
            }
            GameEvent::EnemyKilled { .. } => {
                self.enemies_defeated += 1;
            }
            GameEvent::HeroDamaged { damage, .. } => {
                self.damage_taken += *damage as u64;
            }
            GameEvent::RoomEntered { first_visit: true, .. } => {
                self.rooms_visited += 1;
            }
            GameEvent::PillarCollected { .. } => {
                self.pillars_collected += 1;
            }
            GameEvent::PotionUsed { .. } => {
                self.potions_used += 1;
            }
            _ => {}
        }
    }
}

/// Deferred room swap carried by the transition machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomChange {
    pub target: GridCoord,
}

/// Central state of a run.
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) phase: Phase,
    pub(crate) dungeon: Option<DungeonGraph>,
    pub(crate) hero: Option<Hero>,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) projectiles: ProjectileManager,
    pub(crate) transition: TransitionManager<RoomChange>,
    pub(crate) camera: Camera,
    pub(crate) rng: StdRng,
    pub(crate) statistics: GameStatistics,
    pub(crate) collected_pillars: BTreeSet<PillarKind>,
    pub(crate) play_time: f64,
    pub(crate) boss_encountered: bool,
    /// Whether the hero is standing at a locked door already announced
    pub(crate) door_notice: bool,
    persistence: Option<SaveService>,
}

impl GameState {
    /// Creates a state waiting in hero select.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::{GameConfig, GameState, Phase};
    ///
    /// let mut state = GameState::new(GameConfig::for_testing(1));
    /// assert_eq!(state.phase(), Phase::HeroSelect);
    ///
    /// state.select_hero("knight").unwrap();
    /// assert_eq!(state.phase(), Phase::Playing);
    /// ```
    pub fn new(config: GameConfig) -> Self {
        let camera = Camera::new(config.view_width, config.view_height);
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            phase: Phase::HeroSelect,
            dungeon: None,
            hero: None,
            enemies: Vec::new(),
            projectiles: ProjectileManager::new(),
            transition: TransitionManager::new(),
            camera,
            rng,
            statistics: GameStatistics::new(),
            collected_pillars: BTreeSet::new(),
            play_time: 0.0,
            boss_encountered: false,
            door_notice: false,
            persistence: None,
        }
    }

    /// Creates a state with a save service for the run.
    pub fn with_persistence(config: GameConfig, service: SaveService) -> Self {
        let mut state = Self::new(config);
        state.persistence = Some(service);
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }

    pub fn dungeon(&self) -> Option<&DungeonGraph> {
        self.dungeon.as_ref()
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.dungeon.as_ref()?.current_room()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &ProjectileManager {
        &self.projectiles
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    pub fn collected_pillars(&self) -> &BTreeSet<PillarKind> {
        &self.collected_pillars
    }

    pub fn play_time(&self) -> f64 {
        self.play_time
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_active()
    }

    pub fn transition_progress(&self) -> f32 {
        self.transition.progress()
    }

    pub(crate) fn set_phase(&mut self, to: Phase) -> Option<GameEvent> {
        if self.phase == to {
            return None;
        }
        let from = self.phase;
        self.phase = to;
        log::info!("Phase changed: {} -> {}", from, to);
        Some(GameEvent::PhaseChanged { from, to })
    }

    /// Starts a run with the hero named by `tag`: "knight", "cleric" or "archer".
    ///
    /// Only valid in hero select. Builds the dungeon and places the hero in
    /// the start room. Nothing changes if the tag or the dungeon is invalid.
    pub fn select_hero(&mut self, tag: &str) -> DungeonResult<Vec<GameEvent>> {
        if self.phase != Phase::HeroSelect {
            return Err(DungeonError::InvalidStateTransition(format!(
                "Cannot select a hero while {}",
                self.phase
            )));
        }
        let kind: HeroKind = tag.parse()?;

        let generation = self.config.generation_config();
        let mut rng = utils::create_rng(&generation);
        let dungeon = DungeonGenerator::new().generate_validated(&generation, &mut rng)?;
        let room = dungeon.current_room().ok_or_else(|| {
            DungeonError::Configuration("Dungeon has no start room".to_string())
        })?;

        let (x, y) = DungeonGraph::spawn_position_for_room(room, HERO_SIZE, HERO_SIZE, None);
        let hero = Hero::new(kind, x, y);
        let enemies = EncounterGenerator::for_room(room).spawn(&mut rng)?;
        let start = room.coord;

        self.begin_run(dungeon, hero, enemies, rng);
        log::info!("Started a run as {} (seed {})", kind, generation.seed);

        let mut events = vec![GameEvent::RunStarted { hero: kind }];
        events.extend(self.set_phase(Phase::Playing));
        events.push(GameEvent::RoomEntered {
            room: start,
            first_visit: true,
        });
        for event in &events {
            self.statistics.update_from_event(event);
        }
        Ok(events)
    }

    fn begin_run(&mut self, dungeon: DungeonGraph, hero: Hero, enemies: Vec<Enemy>, rng: StdRng) {
        self.dungeon = Some(dungeon);
        self.hero = Some(hero);
        self.enemies = enemies;
        self.rng = rng;
        self.projectiles.clear();
        self.transition = TransitionManager::new();
        self.statistics = GameStatistics::new();
        self.collected_pillars.clear();
        self.play_time = 0.0;
        self.boss_encountered = false;
        self.door_notice = false;
        self.snap_camera();
    }

    /// Ends the run and returns to hero select, from any phase.
    pub fn reset(&mut self) -> Option<GameEvent> {
        self.dungeon = None;
        self.hero = None;
        self.enemies.clear();
        self.projectiles.clear();
        self.transition = TransitionManager::new();
        self.collected_pillars.clear();
        self.play_time = 0.0;
        self.boss_encountered = false;
        self.door_notice = false;
        self.camera = Camera::new(self.config.view_width, self.config.view_height);
        log::info!("Run reset");
        self.set_phase(Phase::HeroSelect)
    }

    /// Switches between playing and paused. Does nothing in other phases.
    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        match self.phase {
            Phase::Playing => self.set_phase(Phase::Paused),
            Phase::Paused => self.set_phase(Phase::Playing),
            _ => None,
        }
    }

    pub(crate) fn snap_camera(&mut self) {
        if let (Some(hero), Some(room)) = (
            self.hero.as_ref(),
            self.dungeon.as_ref().and_then(|d| d.current_room()),
        ) {
            self.camera.snap_to(&hero.bounds(), room.width, room.height);
        }
    }

    /// Prompt for an interactive door under the hero's feet.
    pub fn interaction_prompt(&self) -> Option<String> {
        let hero = self.hero.as_ref()?;
        let room = self.current_room()?;
        let feet = hero.bounds().feet_band(config::FEET_BAND_HEIGHT);
        let door = room.interactive_door_at(&feet)?;
        Some(match door.lock_message() {
            Some(message) if door.is_locked() => message.to_string(),
            _ => config::DOOR_PROMPT.to_string(),
        })
    }

    /// Builds the persisted shape of the run.
    pub fn to_save_record(&self) -> DungeonResult<SaveRecord> {
        let (Some(hero), Some(dungeon)) = (self.hero.as_ref(), self.dungeon.as_ref()) else {
            return Err(DungeonError::InvalidStateTransition(
                "No run in progress".to_string(),
            ));
        };
        let (hero_x, hero_y) = hero.position();
        Ok(SaveRecord {
            hero_kind: hero.kind(),
            hero_x,
            hero_y,
            hero_health: hero.health(),
            current_room: dungeon.current(),
            template: dungeon.template(),
            play_time: self.play_time,
            seed: self.config.seed,
            grid_size: dungeon.grid_size(),
            collected_pillars: self.collected_pillars.iter().copied().collect(),
            visited_rooms: dungeon.visited_rooms(),
            potions: hero.potions(),
        })
    }

    /// Replaces the live run with a saved one.
    ///
    /// The dungeon is rebuilt from the record's template, grid size and seed
    /// and the record is checked against it first. On any error the live run
    /// is left exactly as it was.
    pub fn apply_save(&mut self, record: SaveRecord) -> DungeonResult<()> {
        let invalid = |reason: String| DungeonError::Load(LoadError::Invalid(reason));

        let mut generation = GenerationConfig::new(record.seed)
            .with_template(record.template)
            .with_grid_size(record.grid_size);
        generation.platforms = self.config.platforms;
        let mut rng = utils::create_rng(&generation);
        let mut dungeon = DungeonGenerator::new()
            .generate_validated(&generation, &mut rng)
            .map_err(|e| invalid(format!("dungeon cannot be rebuilt: {}", e)))?;

        let room = dungeon
            .room(record.current_room)
            .ok_or_else(|| invalid(format!("no room at {}", record.current_room)))?;
        let max_health = record.hero_kind.stats().max_health;
        if record.hero_health == 0 || record.hero_health > max_health {
            return Err(invalid(format!(
                "hero health {} outside 1..={}",
                record.hero_health, max_health
            )));
        }
        if !record.hero_x.is_finite() || !record.hero_y.is_finite() {
            return Err(invalid("hero position is not finite".to_string()));
        }
        if !record.play_time.is_finite() || record.play_time < 0.0 {
            return Err(invalid("play time is not a valid duration".to_string()));
        }
        let enemies = EncounterGenerator::for_room(room).spawn(&mut rng)?;
        let is_boss_room = room.is_boss_room();
        let (width, floor_y) = (room.width, room.floor_y());

        for coord in &record.visited_rooms {
            let visited = dungeon
                .room_mut(*coord)
                .ok_or_else(|| invalid(format!("visited room {} does not exist", coord)))?;
            visited.visited = true;
        }
        let collected: BTreeSet<PillarKind> = record.collected_pillars.iter().copied().collect();
        for kind in &collected {
            for coord in dungeon.rooms().map(|r| r.coord).collect::<Vec<_>>() {
                if let Some(room) = dungeon.room_mut(coord) {
                    room.mark_pillar_collected(*kind);
                }
            }
        }
        if collected.len() >= config::BOSS_UNLOCK_PILLARS {
            dungeon.unlock_boss_doors();
        }
        dungeon.set_current(record.current_room);

        let mut hero = Hero::new(record.hero_kind, record.hero_x, record.hero_y);
        hero.restore(record.hero_health, record.potions);
        hero.clamp_to_room(width, floor_y);

        self.begin_run(dungeon, hero, enemies, rng);
        self.collected_pillars = collected;
        self.play_time = record.play_time;
        self.boss_encountered = is_boss_room;
        self.statistics.rooms_visited = record.visited_rooms.len() as u32;
        self.statistics.pillars_collected = self.collected_pillars.len() as u32;
        self.phase = Phase::Playing;
        log::info!(
            "Restored {} in room {} ({:.0}s played)",
            record.hero_kind,
            record.current_room,
            record.play_time
        );
        Ok(())
    }

    /// Saves the run to `slot` through the attached save service.
    pub fn save(&self, slot: &str) -> DungeonResult<PathBuf> {
        let service = self.persistence.as_ref().ok_or_else(|| {
            DungeonError::Configuration("No save service attached".to_string())
        })?;
        let record = self.to_save_record()?;
        service.save(slot, &record)
    }

    /// Loads `slot` through the attached save service, replacing the live run.
    pub fn load(&mut self, slot: &str) -> DungeonResult<()> {
        let service = self.persistence.as_ref().ok_or_else(|| {
            DungeonError::Configuration("No save service attached".to_string())
        })?;
        let record = service.load(slot).map_err(|e| {
            log::warn!("Rejected save '{}': {}", slot, e);
            DungeonError::Load(e)
        })?;
        self.apply_save(record).map_err(|e| {
            log::warn!("Rejected save '{}': {}", slot, e);
            e
        })
    }

    /// Read-only view of the run for the presentation pass.
    pub fn snapshot(&self) -> GameSnapshot {
        let room = self.current_room().cloned();
        let hero = self.hero.as_ref().map(|hero| ActorView::of(hero, None, hero.kind().as_str()));
        let hud = self.hero.as_ref().map(|hero| HudView {
            hero: hero.kind(),
            health: hero.health(),
            max_health: hero.vitals().max_health,
            potions: hero.potions(),
            pillars: self.collected_pillars.len(),
            attack_cooldown: hero.attack_cooldown_remaining(),
            special_cooldown: hero.special_cooldown_remaining(),
            special_name: hero.kind().special_name(),
            play_time: self.play_time,
        });

        GameSnapshot {
            phase: self.phase,
            room,
            current_room: self.dungeon.as_ref().map(|d| d.current()),
            boss_room: self.dungeon.as_ref().map(|d| d.boss()),
            grid_size: self
                .dungeon
                .as_ref()
                .map(|d| d.grid_size())
                .unwrap_or(self.config.grid_size),
            visited_rooms: self
                .dungeon
                .as_ref()
                .map(|d| d.visited_rooms())
                .unwrap_or_default(),
            hero,
            enemies: self
                .enemies
                .iter()
                .filter(|enemy| enemy.is_alive())
                .map(|enemy| EnemyView {
                    kind: enemy.kind(),
                    stunned: enemy.is_stunned(),
                    enraged: enemy.is_enraged(),
                    actor: ActorView::of(enemy, Some(enemy.id()), enemy.kind().name()),
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    kind: p.kind,
                    rect: p.rect,
                    facing: p.facing,
                })
                .collect(),
            prompt: self.interaction_prompt(),
            camera: self.camera,
            transition_progress: self.transition.progress(),
            overlay_alpha: self.transition.overlay_alpha(),
            slide_offset: self.transition.slide_offset(),
            hud,
            statistics: self.statistics.clone(),
        }
    }
}

/// Drawable view of one actor.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorView {
    pub id: Option<EntityId>,
    pub label: &'static str,
    pub bounds: Rect,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    pub animation: AnimationState,
}

impl ActorView {
    fn of(actor: &dyn Actor, id: Option<EntityId>, label: &'static str) -> Self {
        Self {
            id,
            label,
            bounds: actor.bounds(),
            facing: actor.facing(),
            health: actor.health(),
            max_health: actor.vitals().max_health,
            animation: actor.animation_state(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub actor: ActorView,
    pub stunned: bool,
    pub enraged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub rect: Rect,
    pub facing: Facing,
}

/// Values for the heads-up display.
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub hero: HeroKind,
    pub health: u32,
    pub max_health: u32,
    pub potions: u32,
    pub pillars: usize,
    pub attack_cooldown: f32,
    pub special_cooldown: f32,
    pub special_name: &'static str,
    pub play_time: f64,
}

/// Everything the presentation layer draws for one frame.
#[derive(Debug, Clone)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub room: Option<Room>,
    pub current_room: Option<GridCoord>,
    pub boss_room: Option<GridCoord>,
    pub grid_size: (u32, u32),
    pub visited_rooms: Vec<GridCoord>,
    pub hero: Option<ActorView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub prompt: Option<String>,
    pub camera: Camera,
    pub transition_progress: f32,
    pub overlay_alpha: u8,
    pub slide_offset: f32,
    pub hud: Option<HudView>,
    pub statistics: GameStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Direction, DungeonTemplate};

    fn playing(tag: &str) -> GameState {
        let mut state = GameState::new(GameConfig::for_testing(42));
        state.select_hero(tag).unwrap();
        state
    }

    #[test]
    fn test_new_state_waits_for_hero() {
        let state = GameState::new(GameConfig::for_testing(1));
        assert_eq!(state.phase(), Phase::HeroSelect);
        assert!(state.hero().is_none());
        assert!(state.current_room().is_none());
    }

    #[test]
    fn test_select_hero_places_hero_in_start_room() {
        let state = playing("Cleric");
        let hero = state.hero().unwrap();
        let room = state.current_room().unwrap();

        assert_eq!(hero.kind(), HeroKind::Cleric);
        assert!(room.is_start_room());
        assert_eq!(hero.bounds().bottom(), room.floor_y());
        assert_eq!(hero.bounds().x, 768.0);
        assert!(state.enemies().is_empty());
        assert_eq!(state.statistics().rooms_visited, 1);
    }

    #[test]
    fn test_unknown_hero_is_rejected_without_change() {
        let mut state = GameState::new(GameConfig::for_testing(1));
        let result = state.select_hero("bard");
        assert!(matches!(result, Err(DungeonError::InvalidStateTransition(_))));
        assert_eq!(state.phase(), Phase::HeroSelect);
        assert!(state.dungeon().is_none());
    }

    #[test]
    fn test_select_hero_only_in_hero_select() {
        let mut state = playing("knight");
        assert!(matches!(
            state.select_hero("archer"),
            Err(DungeonError::InvalidStateTransition(_))
        ));
        assert_eq!(state.hero().unwrap().kind(), HeroKind::Knight);
    }

    #[test]
    fn test_bad_template_fails_before_any_room() {
        let mut config = GameConfig::for_testing(1);
        config.template = DungeonTemplate::Cross;
        config.grid_size = (1, 1);
        let mut state = GameState::new(config);
        assert!(matches!(
            state.select_hero("knight"),
            Err(DungeonError::Configuration(_))
        ));
        assert_eq!(state.phase(), Phase::HeroSelect);
    }

    #[test]
    fn test_pause_toggles() {
        let mut state = playing("archer");
        assert!(state.toggle_pause().is_some());
        assert_eq!(state.phase(), Phase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_reset_returns_to_hero_select() {
        let mut state = playing("archer");
        state.reset();
        assert_eq!(state.phase(), Phase::HeroSelect);
        assert!(state.hero().is_none());
        assert!(state.toggle_pause().is_none());
    }

    #[test]
    fn test_boss_door_prompt() {
        let mut state = playing("knight");
        // The demo start room only has its RIGHT door, which is walk-through
        assert!(state.interaction_prompt().is_none());

        let mut config = GameConfig::for_testing(42);
        config.template = DungeonTemplate::Square;
        let mut square = GameState::new(config);
        square.select_hero("knight").unwrap();
        let up = square
            .current_room()
            .unwrap()
            .door(Direction::Up)
            .unwrap()
            .rect;
        square.hero.as_mut().unwrap().set_x(up.x);
        assert_eq!(square.interaction_prompt().as_deref(), Some(config::DOOR_PROMPT));
    }

    #[test]
    fn test_save_record_shape() {
        let state = playing("knight");
        let record = state.to_save_record().unwrap();
        assert_eq!(record.hero_kind, HeroKind::Knight);
        assert_eq!(record.hero_health, 375);
        assert_eq!(record.template, DungeonTemplate::Demo);
        assert_eq!(record.current_room, GridCoord::new(1, 1));
        assert_eq!(record.seed, 42);
    }

    #[test]
    fn test_apply_save_rejects_bad_records_without_change() {
        let mut state = playing("knight");
        let mut record = state.to_save_record().unwrap();
        record.current_room = GridCoord::new(0, 0);
        assert!(matches!(
            state.apply_save(record.clone()),
            Err(DungeonError::Load(LoadError::Invalid(_)))
        ));

        record.current_room = GridCoord::new(1, 1);
        record.hero_health = 10_000;
        assert!(state.apply_save(record.clone()).is_err());

        record.hero_health = 100;
        record.hero_x = f32::NAN;
        assert!(state.apply_save(record).is_err());

        assert_eq!(state.hero().unwrap().health(), 375);
        assert_eq!(state.dungeon().unwrap().current(), GridCoord::new(1, 1));
    }

    #[test]
    fn test_apply_save_restores_run() {
        let mut state = playing("knight");
        let mut record = state.to_save_record().unwrap();
        record.hero_x = 300.0;
        record.hero_health = 120;
        record.current_room = GridCoord::new(2, 1);
        record.collected_pillars = vec![
            PillarKind::Encapsulation,
            PillarKind::Inheritance,
            PillarKind::Polymorphism,
            PillarKind::Abstraction,
        ];
        record.potions = 2;

        state.apply_save(record).unwrap();
        let hero = state.hero().unwrap();
        assert_eq!(hero.position().0, 300.0);
        assert_eq!(hero.health(), 120);
        assert_eq!(hero.potions(), 2);
        assert_eq!(state.dungeon().unwrap().current(), GridCoord::new(2, 1));
        assert!(!state.dungeon().unwrap().boss_doors_locked());
        assert_eq!(state.enemies().len(), 1);
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_save_without_service() {
        let state = playing("knight");
        assert!(matches!(
            state.save("slot1"),
            Err(DungeonError::Configuration(_))
        ));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = playing("cleric");
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Playing);
        assert_eq!(snapshot.hero.as_ref().unwrap().health, 250);
        assert_eq!(snapshot.hud.as_ref().unwrap().special_name, "Divine Fire");
        assert_eq!(snapshot.current_room, Some(GridCoord::new(1, 1)));
        assert_eq!(snapshot.overlay_alpha, 0);
        assert!(snapshot.room.unwrap().is_start_room());
    }

    #[test]
    fn test_statistics_from_events() {
        let mut stats = GameStatistics::new();
        stats.update_from_event(&GameEvent::HeroDamaged {
            damage: 30,
            health: 70,
        });
        stats.update_from_event(&GameEvent::RoomEntered {
            room: GridCoord::new(0, 0),
            first_visit: false,
        });
        assert_eq!(stats.damage_taken, 30);
        assert_eq!(stats.rooms_visited, 0);
    }
}
