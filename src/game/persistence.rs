//! # Persistence
//!
//! Saved runs on disk. Each slot is one JSON file holding a versioned
//! envelope around the [`SaveRecord`], with a SHA-256 checksum of the record
//! so tampered or truncated files are rejected instead of half-loaded.

use crate::game::HeroKind;
use crate::generation::{DungeonTemplate, GridCoord, PillarKind};
use crate::{config, DungeonError, DungeonResult, LoadError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// File extension of save slots.
pub const SAVE_EXTENSION: &str = "save";

fn default_grid_size() -> (u32, u32) {
    config::DEFAULT_GRID_SIZE
}

/// Persisted shape of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub hero_kind: HeroKind,
    pub hero_x: f32,
    pub hero_y: f32,
    pub hero_health: u32,
    pub current_room: GridCoord,
    pub template: DungeonTemplate,
    /// Seconds played
    pub play_time: f64,
    /// Seed the dungeon is rebuilt from
    pub seed: u64,
    #[serde(default = "default_grid_size")]
    pub grid_size: (u32, u32),
    #[serde(default)]
    pub collected_pillars: Vec<PillarKind>,
    #[serde(default)]
    pub visited_rooms: Vec<GridCoord>,
    #[serde(default)]
    pub potions: u32,
}

/// On-disk wrapper around a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub checksum: String,
    pub data: Value,
}

/// SHA-256 of the compact JSON form of `data`, as lowercase hex.
///
/// Object keys serialize in sorted order, so the digest does not depend on
/// how the file was formatted.
pub fn record_checksum(data: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.to_string().as_bytes());
    let hash = hasher.finalize();
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}

impl SaveEnvelope {
    /// Wraps a record with the current version and its checksum.
    pub fn seal(record: &SaveRecord) -> DungeonResult<Self> {
        let data = serde_json::to_value(record)?;
        Ok(Self {
            version: SAVE_VERSION,
            checksum: record_checksum(&data),
            data,
        })
    }

    /// Checks version and checksum, then decodes the record.
    pub fn open(self) -> Result<SaveRecord, LoadError> {
        if self.version != SAVE_VERSION {
            return Err(LoadError::UnsupportedVersion(self.version));
        }
        if record_checksum(&self.data) != self.checksum {
            return Err(LoadError::ChecksumMismatch);
        }
        serde_json::from_value(self.data).map_err(|e| LoadError::Corrupt(e.to_string()))
    }
}

/// Reads and writes save slots in one directory.
///
/// # Examples
///
/// ```no_run
/// use dungeon_heroes::SaveService;
///
/// let saves = SaveService::new("saves");
/// for slot in saves.list_slots().unwrap() {
///     println!("{}", slot);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SaveService {
    dir: PathBuf,
}

impl SaveService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Slot names are kept to a plain file stem.
    fn is_valid_slot(slot: &str) -> bool {
        !slot.is_empty()
            && slot.len() <= 64
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Path of the file backing `slot`, or None for an unusable slot name.
    pub fn path_for(&self, slot: &str) -> Option<PathBuf> {
        Self::is_valid_slot(slot)
            .then(|| self.dir.join(format!("{}.{}", slot, SAVE_EXTENSION)))
    }

    /// Writes `record` to `slot`, replacing any previous save there.
    ///
    /// The file is written beside its final name and renamed into place, so
    /// a crash mid-write leaves the old save intact.
    pub fn save(&self, slot: &str, record: &SaveRecord) -> DungeonResult<PathBuf> {
        let path = self.path_for(slot).ok_or_else(|| {
            DungeonError::Configuration(format!("Invalid save slot name '{}'", slot))
        })?;
        fs::create_dir_all(&self.dir)?;

        let envelope = SaveEnvelope::seal(record)?;
        let text = serde_json::to_string_pretty(&envelope)?;
        let staging = path.with_extension(format!("{}.tmp", SAVE_EXTENSION));
        fs::write(&staging, text)?;
        fs::rename(&staging, &path)?;

        log::info!("Saved run to {}", path.display());
        Ok(path)
    }

    /// Reads the record in `slot`.
    pub fn load(&self, slot: &str) -> Result<SaveRecord, LoadError> {
        let path = self
            .path_for(slot)
            .ok_or_else(|| LoadError::Invalid(format!("invalid save slot name '{}'", slot)))?;
        if !path.exists() {
            return Err(LoadError::Missing(path));
        }
        let text = fs::read_to_string(&path)?;
        let envelope: SaveEnvelope =
            serde_json::from_str(&text).map_err(|e| LoadError::Corrupt(e.to_string()))?;
        let record = envelope.open()?;
        log::info!("Loaded run from {}", path.display());
        Ok(record)
    }

    pub fn has_save(&self, slot: &str) -> bool {
        self.path_for(slot).map(|path| path.is_file()).unwrap_or(false)
    }

    /// Deletes `slot`. Returns false if there was nothing to delete.
    pub fn delete(&self, slot: &str) -> DungeonResult<bool> {
        match self.path_for(slot) {
            Some(path) if path.is_file() => {
                fs::remove_file(&path)?;
                log::info!("Deleted save {}", path.display());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Names of all saved slots, sorted.
    pub fn list_slots(&self) -> DungeonResult<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if Self::is_valid_slot(stem) {
                    slots.push(stem.to_string());
                }
            }
        }
        slots.sort();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SaveRecord {
        SaveRecord {
            hero_kind: HeroKind::Archer,
            hero_x: 123.456,
            hero_y: 416.0,
            hero_health: 90,
            current_room: GridCoord::new(2, 1),
            template: DungeonTemplate::Cross,
            play_time: 61.5,
            seed: 7,
            grid_size: (3, 3),
            collected_pillars: vec![PillarKind::Abstraction],
            visited_rooms: vec![GridCoord::new(1, 1), GridCoord::new(2, 1)],
            potions: 1,
        }
    }

    #[test]
    fn test_save_and_load() -> DungeonResult<()> {
        let dir = tempfile::tempdir()?;
        let saves = SaveService::new(dir.path());

        saves.save("slot1", &record())?;
        assert!(saves.has_save("slot1"));
        assert_eq!(saves.load("slot1")?, record());
        Ok(())
    }

    #[test]
    fn test_missing_slot() -> DungeonResult<()> {
        let dir = tempfile::tempdir()?;
        let saves = SaveService::new(dir.path());
        assert!(matches!(saves.load("nothing"), Err(LoadError::Missing(_))));
        Ok(())
    }

    #[test]
    fn test_slot_names_are_plain() {
        let saves = SaveService::new("saves");
        assert!(saves.path_for("../escape").is_none());
        assert!(saves.path_for("").is_none());
        assert!(saves.path_for("run_2").is_some());
    }

    #[test]
    fn test_tampered_record_fails_checksum() -> DungeonResult<()> {
        let dir = tempfile::tempdir()?;
        let saves = SaveService::new(dir.path());
        let path = saves.save("slot1", &record())?;

        let text = fs::read_to_string(&path)?;
        fs::write(&path, text.replace("\"hero_health\": 90", "\"hero_health\": 150"))?;
        assert!(matches!(saves.load("slot1"), Err(LoadError::ChecksumMismatch)));
        Ok(())
    }

    #[test]
    fn test_unsupported_version() -> DungeonResult<()> {
        let mut envelope = SaveEnvelope::seal(&record())?;
        envelope.version = 99;
        assert!(matches!(
            envelope.open(),
            Err(LoadError::UnsupportedVersion(99))
        ));
        Ok(())
    }

    #[test]
    fn test_missing_required_field_is_corrupt() {
        let mut data = serde_json::to_value(record()).unwrap();
        data.as_object_mut().unwrap().remove("hero_kind");
        let envelope = SaveEnvelope {
            version: SAVE_VERSION,
            checksum: record_checksum(&data),
            data,
        };
        assert!(matches!(envelope.open(), Err(LoadError::Corrupt(_))));
    }

    #[test]
    fn test_record_without_seed_is_corrupt() {
        let mut data = serde_json::to_value(record()).unwrap();
        data.as_object_mut().unwrap().remove("seed");
        let envelope = SaveEnvelope {
            version: SAVE_VERSION,
            checksum: record_checksum(&data),
            data,
        };
        assert!(matches!(envelope.open(), Err(LoadError::Corrupt(_))));
    }

    #[test]
    fn test_optional_fields_default() {
        let mut data = serde_json::to_value(record()).unwrap();
        let object = data.as_object_mut().unwrap();
        object.remove("potions");
        object.remove("grid_size");
        let envelope = SaveEnvelope {
            version: SAVE_VERSION,
            checksum: record_checksum(&data),
            data,
        };
        let restored = envelope.open().unwrap();
        assert_eq!(restored.potions, 0);
        assert_eq!(restored.grid_size, (3, 3));
    }

    #[test]
    fn test_garbage_file_is_corrupt() -> DungeonResult<()> {
        let dir = tempfile::tempdir()?;
        let saves = SaveService::new(dir.path());
        fs::write(dir.path().join("slot1.save"), "{ not json")?;
        assert!(matches!(saves.load("slot1"), Err(LoadError::Corrupt(_))));
        Ok(())
    }

    #[test]
    fn test_list_and_delete() -> DungeonResult<()> {
        let dir = tempfile::tempdir()?;
        let saves = SaveService::new(dir.path());
        saves.save("b", &record())?;
        saves.save("a", &record())?;
        fs::write(dir.path().join("notes.txt"), "x")?;

        assert_eq!(saves.list_slots()?, vec!["a".to_string(), "b".to_string()]);
        assert!(saves.delete("a")?);
        assert!(!saves.delete("a")?);
        assert_eq!(saves.list_slots()?, vec!["b".to_string()]);
        Ok(())
    }
}
