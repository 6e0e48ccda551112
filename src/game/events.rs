//! Events emitted during a simulation step.
//! The presentation layer consumes these for messages, sound and effects.

use crate::game::{EnemyKind, EntityId, HeroKind, Phase, ProjectileKind};
use crate::generation::{Direction, GridCoord, PillarKind};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted { hero: HeroKind },
    PhaseChanged { from: Phase, to: Phase },
    TransitionStarted { from: GridCoord, to: GridCoord, direction: Direction },
    RoomEntered { room: GridCoord, first_visit: bool },
    BossEncountered,
    DoorLocked { message: String },
    PillarCollected { kind: PillarKind, total: usize },
    BossDoorsUnlocked,
    PotionCollected { count: u32 },
    PotionUsed { healed: u32 },
    AttackStarted { special: bool },
    ProjectileFired { id: EntityId, kind: ProjectileKind },
    EnemyDamaged { id: EntityId, damage: u32 },
    EnemyKilled { id: EntityId, kind: EnemyKind },
    EnemyStunned { id: EntityId },
    HeroDamaged { damage: u32, health: u32 },
    HeroHealed { amount: u32 },
    HeroDied,
    PlatformBroke,
}

impl GameEvent {
    /// Short line for the message log, if the event is worth showing.
    pub fn message(&self) -> Option<String> {
        match self {
            GameEvent::RunStarted { hero } => Some(format!("The {} enters the dungeon", hero)),
            GameEvent::BossEncountered => Some("The demon awakens!".to_string()),
            GameEvent::DoorLocked { message } => Some(message.clone()),
            GameEvent::PillarCollected { kind, total } => {
                Some(format!("Collected the pillar of {} ({}/5)", kind, total))
            }
            GameEvent::BossDoorsUnlocked => Some("The boss room is open".to_string()),
            GameEvent::PotionCollected { count } => Some(format!("Picked up {} potion(s)", count)),
            GameEvent::PotionUsed { healed } => Some(format!("Healed {} health", healed)),
            GameEvent::EnemyKilled { kind, .. } => Some(format!("{} defeated", kind)),
            GameEvent::HeroDied => Some("You have fallen".to_string()),
            GameEvent::PlatformBroke => Some("The platform crumbles".to_string()),
            _ => None,
        }
    }
}
