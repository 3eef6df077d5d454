//! Deterministic column terrain
//!
//! Heights come from a pluggable [`HeightSource`] and are always clamped to
//! `[0, max_stack)`. Each column is layered surface / fill / bedrock.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::core::{BlockType, VoxelCoord, VoxelError, VoxelResult};

pub const SURFACE_BLOCK: BlockType = BlockType::Grass;
pub const FILL_BLOCK: BlockType = BlockType::Dirt;
pub const BEDROCK_BLOCK: BlockType = BlockType::Stone;

/// Maps a column to a raw height. The generator clamps the result, so
/// implementations may return anything.
pub trait HeightSource: Send + Sync {
    fn height(&self, x: i32, z: i32, max_stack: i32) -> i32;
}

impl HeightSource for Box<dyn HeightSource> {
    fn height(&self, x: i32, z: i32, max_stack: i32) -> i32 {
        (**self).height(x, z, max_stack)
    }
}

/// Three overlapping sine/cosine waves centred on the middle of the stack.
#[derive(Clone, Copy, Debug)]
pub struct WaveHeight {
    pub freq_x: f64,
    pub freq_z: f64,
    pub freq_diagonal: f64,
    pub amplitude: f64,
}

impl Default for WaveHeight {
    fn default() -> Self {
        Self {
            freq_x: WAVE_FREQ_X,
            freq_z: WAVE_FREQ_Z,
            freq_diagonal: WAVE_FREQ_DIAGONAL,
            amplitude: WAVE_AMPLITUDE,
        }
    }
}

impl HeightSource for WaveHeight {
    fn height(&self, x: i32, z: i32, max_stack: i32) -> i32 {
        let fx = x as f64;
        let fz = z as f64;
        let wave = ((fx * self.freq_x).sin()
            + (fz * self.freq_z).cos()
            + ((fx + fz) * self.freq_diagonal).sin())
            * self.amplitude;
        let center = (max_stack - 1) as f64 / 2.0;
        (wave + center).round_ties_even() as i32
    }
}

/// Same height everywhere. Height 0 gives the flat single-layer world.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantHeight(pub i32);

impl HeightSource for ConstantHeight {
    fn height(&self, _x: i32, _z: i32, _max_stack: i32) -> i32 {
        self.0
    }
}

/// Seeded fractal noise scaled onto the stack range.
pub struct NoiseHeight {
    noise: FastNoiseLite,
}

impl NoiseHeight {
    pub fn new(seed: u32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(3));
        noise.set_frequency(Some(NOISE_FREQUENCY));
        Self { noise }
    }
}

impl HeightSource for NoiseHeight {
    fn height(&self, x: i32, z: i32, max_stack: i32) -> i32 {
        let n = self.noise.get_noise_2d(x as f32, z as f32);
        let normalized = ((n + 1.0) * 0.5).clamp(0.0, 1.0);
        (normalized * max_stack as f32).floor() as i32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainPreset {
    #[default]
    Waves,
    Flat,
    Noise,
}

impl TerrainPreset {
    pub fn height_source(&self, seed: u32) -> Box<dyn HeightSource> {
        match self {
            TerrainPreset::Waves => Box::new(WaveHeight::default()),
            TerrainPreset::Flat => Box::new(ConstantHeight(0)),
            TerrainPreset::Noise => Box::new(NoiseHeight::new(seed)),
        }
    }
}

impl std::str::FromStr for TerrainPreset {
    type Err = VoxelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "waves" => Ok(TerrainPreset::Waves),
            "flat" => Ok(TerrainPreset::Flat),
            "noise" => Ok(TerrainPreset::Noise),
            other => Err(VoxelError::InvalidConfig(format!(
                "unknown terrain preset '{}'",
                other
            ))),
        }
    }
}

pub struct TerrainGenerator<H = Box<dyn HeightSource>> {
    source: H,
    max_stack: i32,
}

impl TerrainGenerator {
    pub fn from_preset(preset: TerrainPreset, max_stack: i32, seed: u32) -> VoxelResult<Self> {
        Self::new(preset.height_source(seed), max_stack)
    }
}

impl<H: HeightSource> TerrainGenerator<H> {
    pub fn new(source: H, max_stack: i32) -> VoxelResult<Self> {
        if max_stack <= 0 {
            return Err(VoxelError::InvalidConfig(format!(
                "max_stack must be positive, got {}",
                max_stack
            )));
        }
        Ok(Self { source, max_stack })
    }

    pub fn max_stack(&self) -> i32 {
        self.max_stack
    }

    /// Column height in `[0, max_stack)`.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        self.source
            .height(x, z, self.max_stack)
            .clamp(0, self.max_stack - 1)
    }

    /// Layer type for `y` in a column whose top block sits at `height`.
    pub fn column_block_type(y: i32, height: i32) -> BlockType {
        if y == height {
            SURFACE_BLOCK
        } else if y < BEDROCK_LAYERS {
            BEDROCK_BLOCK
        } else {
            FILL_BLOCK
        }
    }

    /// Blocks for every column with x in `[0, extent_x)` and z in `[0, extent_z)`.
    pub fn generate(
        &self,
        extent_x: i32,
        extent_z: i32,
    ) -> impl Iterator<Item = (VoxelCoord, BlockType)> + '_ {
        self.generate_region(0, 0, extent_x, extent_z)
    }

    /// Same as [`generate`](Self::generate) but starting at `(min_x, min_z)`.
    pub fn generate_region(
        &self,
        min_x: i32,
        min_z: i32,
        extent_x: i32,
        extent_z: i32,
    ) -> impl Iterator<Item = (VoxelCoord, BlockType)> + '_ {
        let extent_x = extent_x.max(0);
        let extent_z = extent_z.max(0);
        (min_x..min_x + extent_x).flat_map(move |x| {
            (min_z..min_z + extent_z).flat_map(move |z| {
                let height = self.height_at(x, z);
                (0..=height)
                    .map(move |y| (IVec3::new(x, y, z), Self::column_block_type(y, height)))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn waves(max_stack: i32) -> TerrainGenerator<WaveHeight> {
        TerrainGenerator::new(WaveHeight::default(), max_stack).unwrap()
    }

    #[test]
    fn test_height_is_deterministic_and_in_range() {
        for max_stack in [1, 2, 4, 9] {
            let terrain = waves(max_stack);
            for x in -40..40 {
                for z in -40..40 {
                    let h = terrain.height_at(x, z);
                    assert_eq!(h, terrain.height_at(x, z));
                    assert!((0..max_stack).contains(&h), "height {} out of range", h);
                }
            }
        }
    }

    #[test]
    fn test_wave_height_known_values() {
        let terrain = waves(MAX_STACK);
        // (sin 0 + cos 0 + sin 0) * 0.5 + 1.5 = 2.0
        assert_eq!(terrain.height_at(0, 0), 2);
        let h = terrain.height_at(5, -3);
        let raw = ((5.0f64 * 0.35).sin() + (-3.0f64 * 0.35).cos() + (2.0f64 * 0.25).sin()) * 0.5
            + 1.5;
        assert_eq!(h, (raw.round_ties_even() as i32).clamp(0, MAX_STACK - 1));
    }

    #[test]
    fn test_column_layers() {
        type T = TerrainGenerator<ConstantHeight>;
        assert_eq!(T::column_block_type(4, 4), BlockType::Grass);
        assert_eq!(T::column_block_type(3, 4), BlockType::Dirt);
        assert_eq!(T::column_block_type(2, 4), BlockType::Dirt);
        assert_eq!(T::column_block_type(1, 4), BlockType::Stone);
        assert_eq!(T::column_block_type(0, 4), BlockType::Stone);
        assert_eq!(T::column_block_type(0, 0), BlockType::Grass);
        assert_eq!(T::column_block_type(1, 1), BlockType::Grass);
    }

    #[test]
    fn test_generate_stays_in_bounds_with_single_surface() {
        let (w, d, m) = (7, 5, 4);
        let terrain = waves(m);
        let blocks: Vec<_> = terrain.generate(w, d).collect();

        let mut columns: HashMap<(i32, i32), Vec<(i32, BlockType)>> = HashMap::new();
        for (pos, block) in &blocks {
            assert!((0..w).contains(&pos.x));
            assert!((0..d).contains(&pos.z));
            assert!((0..m).contains(&pos.y));
            columns.entry((pos.x, pos.z)).or_default().push((pos.y, *block));
        }
        assert_eq!(columns.len(), (w * d) as usize);

        for ((x, z), layers) in columns {
            let top = layers.iter().map(|(y, _)| *y).max().unwrap();
            assert_eq!(top, terrain.height_at(x, z));
            let surfaces: Vec<_> = layers
                .iter()
                .filter(|(_, block)| *block == SURFACE_BLOCK)
                .collect();
            assert_eq!(surfaces.len(), 1);
            assert_eq!(surfaces[0].0, top);
            assert_eq!(layers.len() as i32, top + 1);
        }
    }

    #[test]
    fn test_constant_height_two_by_two() {
        let terrain = TerrainGenerator::new(ConstantHeight(1), 2).unwrap();
        let blocks: Vec<_> = terrain.generate(2, 2).collect();
        assert_eq!(blocks.len(), 8);
        for (pos, block) in blocks {
            match pos.y {
                0 => assert_eq!(block, BEDROCK_BLOCK),
                1 => assert_eq!(block, SURFACE_BLOCK),
                y => panic!("unexpected layer {}", y),
            }
        }
    }

    #[test]
    fn test_heights_are_clamped() {
        let tall = TerrainGenerator::new(ConstantHeight(50), 4).unwrap();
        assert_eq!(tall.height_at(3, 3), 3);
        let deep = TerrainGenerator::new(ConstantHeight(-8), 4).unwrap();
        assert_eq!(deep.height_at(3, 3), 0);
    }

    #[test]
    fn test_flat_preset_is_one_grass_layer() {
        let terrain = TerrainGenerator::from_preset(TerrainPreset::Flat, MAX_STACK, 0).unwrap();
        let blocks: Vec<_> = terrain.generate(FLAT_WORLD_SIZE, FLAT_WORLD_SIZE).collect();
        assert_eq!(blocks.len(), (FLAT_WORLD_SIZE * FLAT_WORLD_SIZE) as usize);
        assert!(blocks
            .iter()
            .all(|(pos, block)| pos.y == 0 && *block == BlockType::Grass));
    }

    #[test]
    fn test_noise_preset_is_reproducible() {
        let a = TerrainGenerator::from_preset(TerrainPreset::Noise, 6, 99).unwrap();
        let b = TerrainGenerator::from_preset(TerrainPreset::Noise, 6, 99).unwrap();
        for x in 0..16 {
            for z in 0..16 {
                let h = a.height_at(x, z);
                assert_eq!(h, b.height_at(x, z));
                assert!((0..6).contains(&h));
            }
        }
    }

    #[test]
    fn test_region_offsets_columns() {
        let terrain = TerrainGenerator::new(ConstantHeight(0), 1).unwrap();
        let coords: Vec<_> = terrain.generate_region(-2, -2, 4, 4).map(|(p, _)| p).collect();
        assert_eq!(coords.len(), 16);
        assert!(coords.iter().all(|p| (-2..2).contains(&p.x) && (-2..2).contains(&p.z)));
    }

    #[test]
    fn test_rejects_empty_stack() {
        assert!(matches!(
            TerrainGenerator::new(ConstantHeight(0), 0),
            Err(VoxelError::InvalidConfig(_))
        ));
        assert!("caves".parse::<TerrainPreset>().is_err());
        assert_eq!("FLAT".parse::<TerrainPreset>(), Ok(TerrainPreset::Flat));
    }
}
