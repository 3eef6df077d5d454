// Core module with fundamental types
pub mod core;

// Player module with hotbar, input events, movement, and picking
pub mod player;

// World module with block storage and terrain
pub mod world;

// Session context tying world, hotbar and movement together
pub mod session;

// Settings and other helpers
pub mod utils;

// Other modules
pub mod constants;

// Re-exports
pub use constants::*;
pub use core::{Appearance, BlockType, Face, VoxelCoord, VoxelError, VoxelResult};
pub use player::{Aabb, BlockHit, Hotbar, InputEvent, Key, Movement, raycast};
pub use session::{Outcome, Session};
pub use utils::{GameSettings, HotbarSettings, PlayerSettings, SettingsError, WorldSettings};
pub use world::{SharedWorld, TerrainGenerator, TerrainPreset, VoxelWorld, WorldSnapshot};
