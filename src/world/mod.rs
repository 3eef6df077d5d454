//! World storage and generation modules
//! Contains the block map and the column terrain generator.

pub mod terrain;
pub mod voxel_world;

// Re-export commonly used types
pub use terrain::{
    ConstantHeight, HeightSource, NoiseHeight, TerrainGenerator, TerrainPreset, WaveHeight,
};
pub use voxel_world::{SharedWorld, VoxelWorld, WorldSnapshot, snapshot_shared};
