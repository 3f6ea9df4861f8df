use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockId {
    #[default]
    Dirt,
    Grass,
    Stone,
    Sand,
    Gravel,
    Water,
    /// Underwater plant; the cell still counts as water.
    Seagrass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockHitbox {
    FullBlock,
    None,
}

impl BlockId {
    pub fn is_water(&self) -> bool {
        matches!(self, BlockId::Water | BlockId::Seagrass)
    }

    pub fn get_hitbox(&self) -> BlockHitbox {
        match self {
            BlockId::Water | BlockId::Seagrass => BlockHitbox::None,
            BlockId::Dirt
            | BlockId::Grass
            | BlockId::Stone
            | BlockId::Sand
            | BlockId::Gravel => BlockHitbox::FullBlock,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.get_hitbox() == BlockHitbox::FullBlock
    }
}
