//! Block types and cosmetic effects the plugin layer deals with

use serde::{Deserialize, Serialize};

/// Block types known to the plugin layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Air,
    Stone,
    Dirt,
    GrassBlock,
    Farmland,
    OakSapling,
    JungleSapling,
    OakLog,
    JungleLog,
    OakLeaves,
    JungleLeaves,
}

impl BlockType {
    /// Sapling-like blocks, used as the marker of a planted seed
    pub fn is_sapling(self) -> bool {
        matches!(self, Self::OakSapling | Self::JungleSapling)
    }

    pub fn is_leaves(self) -> bool {
        matches!(self, Self::OakLeaves | Self::JungleLeaves)
    }

    /// Blocks a seed can be planted on
    pub fn is_plantable_soil(self) -> bool {
        matches!(self, Self::Dirt | Self::GrassBlock | Self::Farmland)
    }

    pub fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Namespaced identifier, as used in logs
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Air => "minecraft:air",
            Self::Stone => "minecraft:stone",
            Self::Dirt => "minecraft:dirt",
            Self::GrassBlock => "minecraft:grass_block",
            Self::Farmland => "minecraft:farmland",
            Self::OakSapling => "minecraft:oak_sapling",
            Self::JungleSapling => "minecraft:jungle_sapling",
            Self::OakLog => "minecraft:oak_log",
            Self::JungleLog => "minecraft:jungle_log",
            Self::OakLeaves => "minecraft:oak_leaves",
            Self::JungleLeaves => "minecraft:jungle_leaves",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Vanilla tree shapes the host can grow on request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeKind {
    Oak,
    Jungle,
}

/// Visual feedback with no effect on world state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// A planted seed advanced one growth stage
    GrowthProgress { stage: u8 },
    /// A tree finished growing; `height` is the trunk height when known
    TreeGrown { height: Option<u8> },
    /// A player ate a mango
    MangoEaten,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_categories() {
        assert!(BlockType::JungleSapling.is_sapling());
        assert!(BlockType::OakSapling.is_sapling());
        assert!(!BlockType::JungleLog.is_sapling());

        assert!(BlockType::JungleLeaves.is_leaves());
        assert!(BlockType::OakLeaves.is_leaves());
        assert!(!BlockType::Air.is_leaves());

        assert!(BlockType::Dirt.is_plantable_soil());
        assert!(BlockType::GrassBlock.is_plantable_soil());
        assert!(BlockType::Farmland.is_plantable_soil());
        assert!(!BlockType::Stone.is_plantable_soil());
    }
}
