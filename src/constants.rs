// World constants
pub const WORLD_SIZE: i32 = 24;
pub const FLAT_WORLD_SIZE: i32 = 30;
pub const MAX_STACK: i32 = 4;
pub const BEDROCK_LAYERS: i32 = 2;

// Terrain wave frequencies
pub const WAVE_FREQ_X: f64 = 0.35;
pub const WAVE_FREQ_Z: f64 = 0.35;
pub const WAVE_FREQ_DIAGONAL: f64 = 0.25;
pub const WAVE_AMPLITUDE: f64 = 0.5;
pub const NOISE_FREQUENCY: f32 = 0.08;
pub const DEFAULT_SEED: u32 = 2147;

// Hotbar constants
pub const HOTBAR_SLOTS: usize = 9;
pub const PALETTE_SLOTS: usize = 4;

// Player constants
pub const PLAYER_BASE_SPEED: f32 = 5.0;
pub const PLAYER_SPRINT_SPEED: f32 = 7.0;
pub const PLAYER_GRAVITY: f32 = 0.5;
pub const FLY_VERTICAL_SPEED: f32 = 5.0;
pub const DOUBLE_PRESS_THRESHOLD: f32 = 0.35;
pub const REACH_DISTANCE: f32 = 8.0;
pub const SPAWN_CLEARANCE: i32 = 3;
