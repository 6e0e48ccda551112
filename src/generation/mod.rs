//! # Generation Module
//!
//! Procedural content for a run: the templated dungeon graph, enemy
//! encounters, and the collectibles and platforms placed in each room.
//!
//! Layout is fully determined by the template and grid size; decoration and
//! encounters draw from a seeded RNG so a run is reproducible from its seed.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::{config, DungeonError, DungeonResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls the dungeon template, grid dimensions and room size, plus the
/// seed every random decision is drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Dungeon layout template
    pub template: DungeonTemplate,
    /// Grid dimensions as (columns, rows)
    pub grid_size: (u32, u32),
    /// Room width in pixels
    pub room_width: f32,
    /// Room height in pixels
    pub room_height: f32,
    /// Minimum number of normal rooms that receive potions
    pub min_potion_rooms: u32,
    /// Maximum number of normal rooms that receive potions
    pub max_potion_rooms: u32,
    /// Whether non-boss rooms get platforms
    pub platforms: bool,
}

impl GenerationConfig {
    /// Creates the default generation configuration for a seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::{DungeonTemplate, GenerationConfig};
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.template, DungeonTemplate::Square);
    /// assert_eq!(config.grid_size, (3, 3));
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            template: DungeonTemplate::Square,
            grid_size: config::DEFAULT_GRID_SIZE,
            room_width: config::ROOM_WIDTH,
            room_height: config::ROOM_HEIGHT,
            min_potion_rooms: 2,
            max_potion_rooms: 4,
            platforms: true,
        }
    }

    /// Creates a configuration for testing: the two-room demo layout without platforms.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            template: DungeonTemplate::Demo,
            platforms: false,
            ..Self::new(seed)
        }
    }

    /// Replaces the template.
    pub fn with_template(mut self, template: DungeonTemplate) -> Self {
        self.template = template;
        self
    }

    /// Replaces the grid size.
    pub fn with_grid_size(mut self, grid_size: (u32, u32)) -> Self {
        self.grid_size = grid_size;
        self
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// All generation systems implement this trait, giving a consistent
/// generate-then-validate flow.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DungeonResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DungeonResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;

    /// Generates and validates in one call.
    fn generate_validated(&self, config: &GenerationConfig, rng: &mut StdRng) -> DungeonResult<T> {
        let content = self.generate(config, rng)?;
        self.validate(&content, config)?;
        log::debug!("{} produced validated content", self.generator_type());
        Ok(content)
    }
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use std::collections::HashSet;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Validates the structural invariants of a dungeon graph.
    ///
    /// Checks that there is exactly one start and one boss room, that every
    /// door has a matching door on the other side, and that every room,
    /// the boss room included, is reachable from the start.
    pub fn validate_dungeon(dungeon: &DungeonGraph) -> DungeonResult<()> {
        if dungeon.room_count() == 0 {
            return Err(DungeonError::Configuration(
                "Dungeon has no rooms".to_string(),
            ));
        }

        let starts = dungeon
            .rooms()
            .filter(|room| room.kind == RoomKind::Start)
            .count();
        let bosses = dungeon
            .rooms()
            .filter(|room| room.kind == RoomKind::Boss)
            .count();
        if starts != 1 || bosses != 1 {
            return Err(DungeonError::Configuration(format!(
                "Expected one start and one boss room, found {} and {}",
                starts, bosses
            )));
        }

        if !dungeon.doors_are_symmetric() {
            return Err(DungeonError::Configuration(
                "Door graph is not symmetric".to_string(),
            ));
        }

        let reachable: HashSet<GridCoord> = dungeon.reachable_from(dungeon.start());
        if !reachable.contains(&dungeon.boss()) {
            return Err(DungeonError::Configuration(
                "Boss room is not reachable from the start room".to_string(),
            ));
        }
        if reachable.len() != dungeon.room_count() {
            return Err(DungeonError::Configuration(format!(
                "{} of {} rooms are unreachable",
                dungeon.room_count() - reachable.len(),
                dungeon.room_count()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.room_width, config::ROOM_WIDTH);
        assert!(config.min_potion_rooms <= config.max_potion_rooms);
    }

    #[test]
    fn test_testing_config_is_demo() {
        let config = GenerationConfig::for_testing(1);
        assert_eq!(config.template, DungeonTemplate::Demo);
        assert!(!config.platforms);
    }

    #[test]
    fn test_builder_overrides() {
        let config = GenerationConfig::new(1)
            .with_template(DungeonTemplate::Cross)
            .with_grid_size((5, 5));
        assert_eq!(config.template, DungeonTemplate::Cross);
        assert_eq!(config.grid_size, (5, 5));
    }

    #[test]
    fn test_utils_rng_is_seeded() {
        use rand::Rng;
        let config = GenerationConfig::new(12345);
        let a: u64 = utils::create_rng(&config).gen();
        let b: u64 = utils::create_rng(&config).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_accepts_every_template() -> DungeonResult<()> {
        for template in DungeonTemplate::all() {
            let dungeon = DungeonGraph::build(template, (3, 3))?;
            utils::validate_dungeon(&dungeon)?;
        }
        Ok(())
    }
}
