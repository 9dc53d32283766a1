//! Tile records for the grid layer and the off-grid decoration layer

use serde::{Deserialize, Serialize};

use crate::spatial::coordinates::{GridCoordinate, PixelPosition};

/// Material or role of a tile
///
/// Grid tiles use the solid materials, water and spawnpoints; the off-grid
/// layer uses the decoration kinds. Serialized names match the persisted
/// tilemap format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileKind {
    /// Grass-topped ground
    #[serde(rename = "grass")]
    Grass,
    /// Bare stone ground
    #[serde(rename = "stone")]
    Stone,
    /// Stone with grass patches
    #[serde(rename = "grassystone")]
    GrassyStone,
    /// Water surface and body
    #[serde(rename = "water")]
    Water,
    /// Entity placeholder consumed by the spawner
    #[serde(rename = "spawnpoint")]
    Spawnpoint,
    /// Foreground decoration resting on a surface
    #[serde(rename = "decor")]
    Decor,
    /// Background trees and hanging foliage
    #[serde(rename = "bg_foliage")]
    BgFoliage,
    /// Background grass clumps (auto-tiled)
    #[serde(rename = "bg_grass")]
    BgGrass,
}

impl TileKind {
    /// Materials a surface column or platform can be made of
    pub const SOLID: [Self; 3] = [Self::Grass, Self::Stone, Self::GrassyStone];

    /// Kinds whose variant is chosen from neighbor configuration
    pub const fn is_autotiled(self) -> bool {
        matches!(
            self,
            Self::Grass | Self::Stone | Self::GrassyStone | Self::BgGrass
        )
    }

    /// Kinds that block or slow entities
    pub const fn is_physics(self) -> bool {
        matches!(
            self,
            Self::Grass | Self::Stone | Self::GrassyStone | Self::Water
        )
    }

    /// Solid walkable ground
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Grass | Self::Stone | Self::GrassyStone)
    }

    /// Persisted name of the kind
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Stone => "stone",
            Self::GrassyStone => "grassystone",
            Self::Water => "water",
            Self::Spawnpoint => "spawnpoint",
            Self::Decor => "decor",
            Self::BgFoliage => "bg_foliage",
            Self::BgGrass => "bg_grass",
        }
    }
}

/// Entity encoded by a spawnpoint tile's variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpawnKind {
    /// Player start
    Player,
    /// Level exit
    Portal,
    /// Normal chest
    Chest,
    /// Rare chest on the highest row
    RareChest,
    /// Common enemy tier
    EnemyCommon,
    /// Uncommon enemy tier
    EnemyUncommon,
    /// Rare enemy tier
    EnemyRare,
}

impl SpawnKind {
    /// Every spawn kind in variant order
    pub const ALL: [Self; 7] = [
        Self::Player,
        Self::Portal,
        Self::Chest,
        Self::RareChest,
        Self::EnemyCommon,
        Self::EnemyUncommon,
        Self::EnemyRare,
    ];

    /// Enemy tiers, aligned with the tier weights
    pub const ENEMIES: [Self; 3] = [Self::EnemyCommon, Self::EnemyUncommon, Self::EnemyRare];

    /// Tile variant that encodes this kind
    pub const fn variant(self) -> u8 {
        match self {
            Self::Player => 0,
            Self::Portal => 1,
            Self::Chest => 2,
            Self::RareChest => 3,
            Self::EnemyCommon => 4,
            Self::EnemyUncommon => 5,
            Self::EnemyRare => 6,
        }
    }

    /// Decode a spawnpoint variant
    pub const fn from_variant(variant: u8) -> Option<Self> {
        match variant {
            0 => Some(Self::Player),
            1 => Some(Self::Portal),
            2 => Some(Self::Chest),
            3 => Some(Self::RareChest),
            4 => Some(Self::EnemyCommon),
            5 => Some(Self::EnemyUncommon),
            6 => Some(Self::EnemyRare),
            _ => None,
        }
    }

    /// Whether the kind is one of the enemy tiers
    pub const fn is_enemy(self) -> bool {
        matches!(
            self,
            Self::EnemyCommon | Self::EnemyUncommon | Self::EnemyRare
        )
    }

    /// The (kind, variant) pair used to extract this spawnpoint
    pub const fn extraction_pair(self) -> (TileKind, u8) {
        (TileKind::Spawnpoint, self.variant())
    }
}

impl std::fmt::Display for SpawnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Player => "player",
            Self::Portal => "portal",
            Self::Chest => "chest",
            Self::RareChest => "rare chest",
            Self::EnemyCommon => "common enemy",
            Self::EnemyUncommon => "uncommon enemy",
            Self::EnemyRare => "rare enemy",
        };
        f.write_str(name)
    }
}

/// A tile occupying one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Material or role
    #[serde(rename = "type")]
    pub kind: TileKind,
    /// Visual variant (spawn kind for spawnpoints)
    pub variant: u8,
    /// Cell position
    pub pos: GridCoordinate,
}

impl Tile {
    /// Create a grid tile
    pub const fn new(kind: TileKind, variant: u8, pos: GridCoordinate) -> Self {
        Self { kind, variant, pos }
    }

    /// Create a spawnpoint marker
    pub const fn spawnpoint(spawn: SpawnKind, pos: GridCoordinate) -> Self {
        Self::new(TileKind::Spawnpoint, spawn.variant(), pos)
    }

    /// Spawn kind if this tile is a spawnpoint with a known variant
    pub const fn spawn_kind(&self) -> Option<SpawnKind> {
        match self.kind {
            TileKind::Spawnpoint => SpawnKind::from_variant(self.variant),
            _ => None,
        }
    }

    /// Copy of the tile expressed in pixel space
    pub const fn to_pixel_space(&self) -> OffgridTile {
        OffgridTile::new(self.kind, self.variant, self.pos.to_pixel())
    }
}

/// A freely positioned tile drawn independently of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffgridTile {
    /// Decoration kind
    #[serde(rename = "type")]
    pub kind: TileKind,
    /// Visual variant
    pub variant: u8,
    /// Pixel position of the top-left corner
    pub pos: PixelPosition,
}

impl OffgridTile {
    /// Create an off-grid tile
    pub const fn new(kind: TileKind, variant: u8, pos: PixelPosition) -> Self {
        Self { kind, variant, pos }
    }
}
