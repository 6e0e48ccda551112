//! # Dungeon Heroes
//!
//! A side-scrolling dungeon crawler: pick a Knight, Cleric or Archer, walk a
//! grid of rooms joined by doors, gather the pillars that open the boss room,
//! and defeat the demon waiting inside.
//!
//! ## Architecture Overview
//!
//! The crate is split so the simulation can run without a window:
//!
//! - **Generation**: templated dungeon graphs, enemy encounters, pillars, potions and platforms
//! - **Game**: actor state, the room transition state machine, and the per-frame `step`
//! - **Input**: a per-tick map of logical actions, filled from the keyboard by the binary
//! - **Rendering**: a read-only macroquad pass over [`GameSnapshot`]s
//!
//! A frame is always three passes: input resolution, one simulation tick,
//! then presentation. Only the middle pass mutates state.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod settings;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use settings::*;

use std::path::PathBuf;

/// Core error type for the Dungeon Heroes engine.
#[derive(thiserror::Error, Debug)]
pub enum DungeonError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Dungeon template or layout cannot produce a playable run
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request not valid for the current phase or with the given arguments
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Persisted run could not be restored
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
}

/// Reasons a saved run is rejected.
///
/// A load that fails with any of these leaves the live run untouched.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// No save exists at the given path
    #[error("no save file at {}", .0.display())]
    Missing(PathBuf),

    /// Reading the save file failed
    #[error("failed to read save: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a well-formed save envelope
    #[error("corrupt save: {0}")]
    Corrupt(String),

    /// The stored checksum does not match the stored record
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// Saved by an incompatible format version
    #[error("unsupported save version {0}")]
    UnsupportedVersion(u32),

    /// The record is well formed but does not fit the rebuilt dungeon
    #[error("invalid save contents: {0}")]
    Invalid(String),
}

/// Result type used throughout the Dungeon Heroes codebase.
pub type DungeonResult<T> = Result<T, DungeonError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Frames per second target for the game loop
    pub const TARGET_FPS: u64 = 60;

    /// Default room width in pixels
    pub const ROOM_WIDTH: f32 = 1600.0;

    /// Default room height in pixels
    pub const ROOM_HEIGHT: f32 = 600.0;

    /// Fraction of the room height where the walkable floor begins
    pub const FLOOR_RATIO: f32 = 0.8;

    /// Door width in pixels
    pub const DOOR_WIDTH: f32 = 64.0;

    /// Door height in pixels
    pub const DOOR_HEIGHT: f32 = 96.0;

    /// Horizontal distance of the UP and DOWN doors from the room center
    pub const VERTICAL_DOOR_OFFSET: f32 = 80.0;

    /// Gap between a side door and a hero spawned through it
    pub const DOOR_SPAWN_OFFSET: f32 = 100.0;

    /// Height of the feet band used for door triggers
    pub const FEET_BAND_HEIGHT: f32 = 16.0;

    /// Default dungeon grid (columns, rows)
    pub const DEFAULT_GRID_SIZE: (u32, u32) = (3, 3);

    /// Unique pillar kinds needed to open the boss room
    pub const BOSS_UNLOCK_PILLARS: usize = 4;

    /// Message on doors leading to a locked boss room
    pub const BOSS_DOOR_MESSAGE: &str = "Need 4 pillars to enter the boss room";

    /// Prompt shown at an unlocked interactive door
    pub const DOOR_PROMPT: &str = "Press E to enter";

    /// Scale from speed stats to pixels per 60 Hz frame
    pub const SPEED_SCALE: f32 = 0.1;

    /// Downward acceleration per 60 Hz frame
    pub const GRAVITY: f32 = 0.8;

    /// Initial upward velocity of a jump
    pub const JUMP_VELOCITY: f32 = 15.0;

    /// Terminal fall speed
    pub const MAX_FALL_SPEED: f32 = 20.0;

    /// Length of a melee swing in seconds
    pub const ATTACK_DURATION: f32 = 0.5;

    /// Invulnerability after taking a hit, in seconds
    pub const INVULNERABILITY_TIME: f32 = 0.5;

    /// Chance of a critical hit
    pub const CRITICAL_CHANCE: f64 = 0.1;

    /// Damage multiplier of a critical hit
    pub const CRITICAL_MULTIPLIER: f32 = 1.5;

    /// Health restored by a healing potion
    pub const POTION_HEAL: u32 = 50;

    /// Room transition length used by the run, in seconds
    pub const TRANSITION_DURATION: f32 = 0.8;

    /// Camera smoothing factor
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// Enemies stop closing in within this horizontal distance
    pub const ENEMY_STOP_DISTANCE: f32 = 10.0;
}
