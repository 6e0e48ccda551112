//! # Encounter Generation
//!
//! Enemy spawn policy for a room: none in the start room, the demon alone in
//! the boss room, and one to three regular enemies drawn by weight anywhere
//! else.

use crate::game::{Enemy, EnemyKind};
use crate::generation::{GenerationConfig, Generator, Room, RoomKind};
use crate::{DungeonError, DungeonResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::Rng;

/// Horizontal margin kept free of spawns on each side of a room.
const SPAWN_MARGIN: f32 = 100.0;

/// Spawns the enemies of one room.
#[derive(Debug, Clone)]
pub struct EncounterGenerator {
    kind: RoomKind,
    width: f32,
    floor_y: f32,
    min_enemies: usize,
    max_enemies: usize,
}

impl EncounterGenerator {
    pub fn for_room(room: &Room) -> Self {
        Self {
            kind: room.kind,
            width: room.width,
            floor_y: room.floor_y(),
            min_enemies: 1,
            max_enemies: 3,
        }
    }

    /// Draws the room's enemies from `rng`.
    pub fn spawn(&self, rng: &mut StdRng) -> DungeonResult<Vec<Enemy>> {
        match self.kind {
            RoomKind::Start => Ok(Vec::new()),
            RoomKind::Boss => Ok(vec![Enemy::boss(self.width, self.floor_y)]),
            RoomKind::Normal => {
                let kinds = EnemyKind::regular();
                let weights = WeightedIndex::new(kinds.iter().map(|kind| kind.spawn_weight()))
                    .map_err(|e| DungeonError::Configuration(format!("Bad spawn weights: {}", e)))?;
                let count = rng.gen_range(self.min_enemies..=self.max_enemies);

                let max_x = (self.width - SPAWN_MARGIN).max(SPAWN_MARGIN);
                Ok((0..count)
                    .map(|_| {
                        let kind = kinds[weights.sample(rng)];
                        let x = rng.gen_range(SPAWN_MARGIN..=max_x);
                        Enemy::spawn(kind, x.min(self.width - kind.size()).max(0.0), self.floor_y)
                    })
                    .collect())
            }
        }
    }
}

impl Generator<Vec<Enemy>> for EncounterGenerator {
    fn generate(&self, _config: &GenerationConfig, rng: &mut StdRng) -> DungeonResult<Vec<Enemy>> {
        self.spawn(rng)
    }

    fn validate(&self, content: &Vec<Enemy>, _config: &GenerationConfig) -> DungeonResult<()> {
        let valid = match self.kind {
            RoomKind::Start => content.is_empty(),
            RoomKind::Boss => content.len() == 1 && content[0].kind().is_boss(),
            RoomKind::Normal => {
                (self.min_enemies..=self.max_enemies).contains(&content.len())
                    && content.iter().all(|enemy| !enemy.kind().is_boss())
            }
        };
        if valid {
            Ok(())
        } else {
            Err(DungeonError::Configuration(format!(
                "{} enemies do not fit a {:?} room",
                content.len(),
                self.kind
            )))
        }
    }

    fn generator_type(&self) -> &'static str {
        "EncounterGenerator"
    }
}
