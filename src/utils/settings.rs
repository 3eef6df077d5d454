use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::*;
use crate::core::{BlockType, VoxelError, VoxelResult};
use crate::world::TerrainPreset;

const MAGIC_HEADER: &[u8; 4] = b"MCST";
const VERSION: u32 = 1;

pub const SETTINGS_FILE: &str = "settings.bin";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("Not a settings file")]
    BadMagic,
    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),
}

/// Startup configuration. Immutable once a session is created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct GameSettings {
    pub world: WorldSettings,
    pub hotbar: HotbarSettings,
    pub player: PlayerSettings,
}

impl GameSettings {
    pub fn validate(&self) -> VoxelResult<()> {
        if self.world.extent_x < 0 || self.world.extent_z < 0 {
            return Err(VoxelError::InvalidConfig(format!(
                "world extent must not be negative, got {}x{}",
                self.world.extent_x, self.world.extent_z
            )));
        }
        if self.world.max_stack <= 0 {
            return Err(VoxelError::InvalidConfig(format!(
                "max_stack must be positive, got {}",
                self.world.max_stack
            )));
        }
        if self.hotbar.slots.is_empty() {
            return Err(VoxelError::InvalidConfig(
                "hotbar needs at least one slot".to_string(),
            ));
        }
        if !(self.player.reach.is_finite() && self.player.reach > 0.0) {
            return Err(VoxelError::InvalidConfig(format!(
                "reach must be positive and finite, got {}",
                self.player.reach
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WorldSettings {
    pub extent_x: i32,
    pub extent_z: i32,
    pub max_stack: i32,
    pub terrain: TerrainPreset,
    pub seed: u32,
    /// Generate around the origin instead of starting at (0, 0).
    pub centered: bool,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            extent_x: WORLD_SIZE,
            extent_z: WORLD_SIZE,
            max_stack: MAX_STACK,
            terrain: TerrainPreset::Waves,
            seed: DEFAULT_SEED,
            centered: false,
        }
    }
}

impl WorldSettings {
    /// Single grass layer, 30x30.
    pub fn flat() -> Self {
        Self {
            extent_x: FLAT_WORLD_SIZE,
            extent_z: FLAT_WORLD_SIZE,
            terrain: TerrainPreset::Flat,
            ..Self::default()
        }
    }

    /// Lowest corner of the generated region.
    pub fn origin(&self) -> (i32, i32) {
        if self.centered {
            (-self.extent_x.div_euclid(2), -self.extent_z.div_euclid(2))
        } else {
            (0, 0)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HotbarSettings {
    pub slots: Vec<BlockType>,
}

impl Default for HotbarSettings {
    fn default() -> Self {
        Self::full()
    }
}

impl HotbarSettings {
    /// Every block type, one per number key.
    pub fn full() -> Self {
        Self {
            slots: BlockType::ALL[..HOTBAR_SLOTS].to_vec(),
        }
    }

    pub fn palette() -> Self {
        let slots = vec![
            BlockType::Grass,
            BlockType::Dirt,
            BlockType::Stone,
            BlockType::Wood,
        ];
        debug_assert_eq!(slots.len(), PALETTE_SLOTS);
        Self { slots }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerSettings {
    pub reach: f32,
    pub base_speed: f32,
    pub sprint_speed: f32,
    pub fly_speed: f32,
    pub double_press_threshold: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            reach: REACH_DISTANCE,
            base_speed: PLAYER_BASE_SPEED,
            sprint_speed: PLAYER_SPRINT_SPEED,
            fly_speed: FLY_VERTICAL_SPEED,
            double_press_threshold: DOUBLE_PRESS_THRESHOLD,
        }
    }
}

/// `settings.bin` inside the platform config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "minicraft")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &GameSettings) -> Result<(), SettingsError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(MAGIC_HEADER)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    bincode::serialize_into(&mut writer, settings)?;
    writer.flush()?;
    Ok(())
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<GameSettings, SettingsError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC_HEADER {
        return Err(SettingsError::BadMagic);
    }

    let mut version_bytes = [0u8; 4];
    reader.read_exact(&mut version_bytes)?;
    let version = u32::from_le_bytes(version_bytes);
    if version != VERSION {
        return Err(SettingsError::UnsupportedVersion(version));
    }

    Ok(bincode::deserialize_from(&mut reader)?)
}

/// Loads settings from `path`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> GameSettings {
    let path = path.as_ref();
    match load_settings(path) {
        Ok(settings) => {
            tracing::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings at {}, using defaults", path.display());
            GameSettings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            GameSettings::default()
        }
    }
}
