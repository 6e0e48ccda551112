//! # Runtime Settings
//!
//! Settings chosen at startup: which dungeon to build, how the camera and
//! transitions behave, and where saves go. Read from an optional JSON file;
//! any field the file leaves out falls back to its default.

use crate::game::TransitionKind;
use crate::generation::{DungeonTemplate, GenerationConfig};
use crate::{config, DungeonError, DungeonResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_seed() -> u64 {
    12345
}

fn default_template() -> DungeonTemplate {
    DungeonTemplate::Square
}

fn default_grid_size() -> (u32, u32) {
    config::DEFAULT_GRID_SIZE
}

fn default_view_width() -> f32 {
    1024.0
}

fn default_view_height() -> f32 {
    576.0
}

fn default_transition_kind() -> TransitionKind {
    TransitionKind::Fade
}

fn default_transition_duration() -> f32 {
    config::TRANSITION_DURATION
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

fn default_platforms() -> bool {
    true
}

/// Runtime configuration for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_template")]
    pub template: DungeonTemplate,
    #[serde(default = "default_grid_size")]
    pub grid_size: (u32, u32),
    #[serde(default = "default_view_width")]
    pub view_width: f32,
    #[serde(default = "default_view_height")]
    pub view_height: f32,
    #[serde(default = "default_transition_kind")]
    pub transition_kind: TransitionKind,
    #[serde(default = "default_transition_duration")]
    pub transition_duration: f32,
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
    #[serde(default = "default_platforms")]
    pub platforms: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            template: default_template(),
            grid_size: default_grid_size(),
            view_width: default_view_width(),
            view_height: default_view_height(),
            transition_kind: default_transition_kind(),
            transition_duration: default_transition_duration(),
            save_dir: default_save_dir(),
            platforms: default_platforms(),
        }
    }
}

impl GameConfig {
    /// Small deterministic setup: the two-room demo, no platforms.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            template: DungeonTemplate::Demo,
            platforms: false,
            ..Self::default()
        }
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dungeon_heroes::GameConfig;
    ///
    /// let config = GameConfig::load("dungeon.json").unwrap_or_default();
    /// println!("seed {}", config.seed);
    /// ```
    pub fn load(path: impl AsRef<Path>) -> DungeonResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Rejects settings no run can start with.
    pub fn validate(&self) -> DungeonResult<()> {
        if self.grid_size.0 == 0 || self.grid_size.1 == 0 {
            return Err(DungeonError::Configuration(format!(
                "Grid size {}x{} has no cells",
                self.grid_size.0, self.grid_size.1
            )));
        }
        if !(self.view_width > 0.0 && self.view_height > 0.0) {
            return Err(DungeonError::Configuration(
                "View size must be positive".to_string(),
            ));
        }
        if !(self.transition_duration.is_finite() && self.transition_duration >= 0.0) {
            return Err(DungeonError::Configuration(
                "Transition duration must be finite and not negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Generation settings derived from this config.
    pub fn generation_config(&self) -> GenerationConfig {
        let mut generation = GenerationConfig::new(self.seed)
            .with_template(self.template)
            .with_grid_size(self.grid_size);
        generation.platforms = self.platforms;
        generation
    }
}
