use serde::{Deserialize, Serialize};

/// Appearance record handed to the renderer for a block type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub texture: &'static str,
    pub tint: [f32; 3],
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum BlockType {
    #[default]
    Grass,
    Stone,
    Wood,
    Plank,
    Dirt,
    Glass,
    Brick,
    Diamond,
    Leaf,
}

impl BlockType {
    pub const ALL: [BlockType; 9] = [
        BlockType::Grass,
        BlockType::Stone,
        BlockType::Wood,
        BlockType::Plank,
        BlockType::Dirt,
        BlockType::Glass,
        BlockType::Brick,
        BlockType::Diamond,
        BlockType::Leaf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BlockType::Grass => "Grass",
            BlockType::Stone => "Stone",
            BlockType::Wood => "Wood",
            BlockType::Plank => "Plank",
            BlockType::Dirt => "Dirt",
            BlockType::Glass => "Glass",
            BlockType::Brick => "Brick",
            BlockType::Diamond => "Diamond",
            BlockType::Leaf => "Leaf",
        }
    }

    pub fn texture(&self) -> &'static str {
        match self {
            BlockType::Grass => "grass.jpg",
            BlockType::Stone => "stone.jpg",
            BlockType::Wood => "wood.jpg",
            BlockType::Plank => "plank.png",
            BlockType::Dirt => "dirt.jpg",
            BlockType::Glass => "glass.png",
            BlockType::Brick => "brick.jpg",
            BlockType::Diamond => "dia.png",
            BlockType::Leaf => "leaf.jpg",
        }
    }

    pub fn color(&self) -> [f32; 3] {
        match self {
            BlockType::Grass => [0.45, 0.75, 0.30],
            BlockType::Stone => [0.55, 0.55, 0.55],
            BlockType::Wood => [0.6, 0.4, 0.2],
            BlockType::Plank => [0.76, 0.6, 0.38],
            BlockType::Dirt => [0.55, 0.27, 0.07],
            BlockType::Glass => [0.85, 0.92, 0.95],
            BlockType::Brick => [0.65, 0.25, 0.2],
            BlockType::Diamond => [0.4, 0.9, 0.9],
            BlockType::Leaf => [0.3, 0.6, 0.2],
        }
    }

    pub fn appearance(&self) -> Appearance {
        Appearance {
            texture: self.texture(),
            tint: self.color(),
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, BlockType::Glass | BlockType::Leaf)
    }

    /// Parses a block name case-insensitively.
    pub fn from_name(name: &str) -> Option<BlockType> {
        Self::ALL
            .into_iter()
            .find(|block| block.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(BlockType::from_name("grass"), Some(BlockType::Grass));
        assert_eq!(BlockType::from_name("DIAMOND"), Some(BlockType::Diamond));
        assert_eq!(BlockType::from_name("lava"), None);
    }

    #[test]
    fn test_appearance_matches_texture_table() {
        let look = BlockType::Plank.appearance();
        assert_eq!(look.texture, "plank.png");
        assert_eq!(look.tint, BlockType::Plank.color());
        assert!(BlockType::Glass.is_transparent());
        assert!(!BlockType::Stone.is_transparent());
    }
}
