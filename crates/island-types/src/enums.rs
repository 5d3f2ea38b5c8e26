//! Enumeration types for the island builder.
//!
//! Terrain tags are closed enums rather than free-form strings so that the
//! biome-to-difficulty and biome-to-flora rules in `island-world` are
//! exhaustive matches checked by the compiler.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Terrain tags
// ---------------------------------------------------------------------------

/// The dominant landscape of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Biome {
    /// Open sand along the shoreline.
    Beach,
    /// A cleared campsite.
    Camp,
    /// Thin palm and fern woodland.
    LightForest,
    /// Closed-canopy rainforest.
    Jungle,
    /// Dense stands of bamboo.
    BambooGrove,
    /// Knotted, hanging vines.
    VineThicket,
    /// Shallow running water.
    Stream,
    /// A falling water course.
    Waterfall,
    /// Sheer rock faces.
    Cliff,
    /// Broken stony ground.
    Rocky,
    /// A cave entrance and its surroundings.
    Cave,
    /// Open water beyond the island band.
    Ocean,
}

/// Broad area of the island a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Region {
    /// The landing shore.
    Shore,
    /// Low coastal woodland.
    Lowland,
    /// The island's wet interior.
    Interior,
    /// The high northern ground.
    Highland,
    /// The surrounding sea.
    Sea,
}

/// Coarse height band of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Elevation {
    /// Water level.
    SeaLevel,
    /// Just above the tide line.
    Low,
    /// Rolling interior ground.
    Mid,
    /// Ridges and summits.
    High,
}

// ---------------------------------------------------------------------------
// Difficulty and safety
// ---------------------------------------------------------------------------

/// How hard a cell is to cross.
///
/// Ordered; [`TerrainDifficulty::index`] gives the integer ordinal used for
/// neighbor-delta comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TerrainDifficulty {
    /// Flat, open ground.
    Easy,
    /// Ordinary walking.
    Normal,
    /// Slow going.
    Hard,
    /// Barely passable.
    Extreme,
}

impl TerrainDifficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Extreme];

    /// Highest valid ordinal.
    pub const MAX_INDEX: u8 = 3;

    /// Ordinal from 0 (`Easy`) to 3 (`Extreme`).
    pub const fn index(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Normal => 1,
            Self::Hard => 2,
            Self::Extreme => 3,
        }
    }

    /// Inverse of [`index`](Self::index); ordinals above 3 clamp to `Extreme`.
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Easy,
            1 => Self::Normal,
            2 => Self::Hard,
            _ => Self::Extreme,
        }
    }

    /// One step easier, never below `Normal`.
    ///
    /// `Easy` and `Normal` are returned unchanged.
    pub const fn eased(self) -> Self {
        match self {
            Self::Extreme => Self::Hard,
            Self::Hard | Self::Normal => Self::Normal,
            Self::Easy => Self::Easy,
        }
    }

    /// Minutes needed to cross one cell of this difficulty.
    pub const fn time_cost(self) -> u32 {
        match self {
            Self::Easy => 5,
            Self::Normal => 10,
            Self::Hard => 20,
            Self::Extreme => 30,
        }
    }
}

/// Whether a cell can be entered and survived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TileSafety {
    /// Safe to enter.
    Normal,
    /// Entering is fatal.
    Dead,
    /// Entry is blocked outright.
    Impossible,
}

// ---------------------------------------------------------------------------
// Features and flora
// ---------------------------------------------------------------------------

/// A discrete terrain feature overlaid on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TerrainFeature {
    /// A worn walking path.
    Path,
    /// A sheer drop.
    CliffFace,
    /// The lip of a waterfall.
    WaterfallDrop,
    /// A vertical wall of rock.
    RockWall,
    /// The mouth of a cave.
    CaveMouth,
    /// Vines that snag and slow.
    TangleVines,
    /// Wet, slick stone.
    SlipperyRocks,
}

impl TerrainFeature {
    /// Whether a sudden change in difficulty here is intentional. Cells
    /// carrying an abrupt feature are exempt from difficulty smoothing.
    pub const fn is_abrupt(self) -> bool {
        matches!(self, Self::CliffFace | Self::WaterfallDrop | Self::RockWall)
    }
}

/// A plant community growing on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum FloraKind {
    /// Coconut and fan palms.
    Palm,
    /// Salt-tolerant grasses.
    DuneGrass,
    /// Low shrubs.
    Shrub,
    /// Ground ferns.
    Fern,
    /// Bamboo culms.
    Bamboo,
    /// Climbing vines.
    Vine,
    /// Reeds along water.
    Reed,
    /// Moss on wet stone.
    Moss,
    /// Lichen on dry rock.
    Lichen,
    /// Nothing grows here.
    Barren,
}

/// How thickly a cell is overgrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum FloraDensity {
    /// No vegetation.
    Barren,
    /// Scattered plants.
    Sparse,
    /// Regular cover.
    Moderate,
    /// Thick growth.
    Dense,
}

impl FloraDensity {
    /// One step thinner, bottoming out at `Sparse` unless already `Barren`.
    pub const fn thinner(self) -> Self {
        match self {
            Self::Dense => Self::Moderate,
            Self::Moderate | Self::Sparse => Self::Sparse,
            Self::Barren => Self::Barren,
        }
    }

    /// One step thicker; `Barren` stays `Barren`.
    pub const fn thicker(self) -> Self {
        match self {
            Self::Sparse => Self::Moderate,
            Self::Moderate | Self::Dense => Self::Dense,
            Self::Barren => Self::Barren,
        }
    }
}

// ---------------------------------------------------------------------------
// Provenance and classification
// ---------------------------------------------------------------------------

/// Where a tile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TileKind {
    /// A hand-authored landmark from the anchor manifest.
    Anchor,
    /// Synthesized from nearby anchors.
    Gardened,
    /// The impassable ring between the island band and the world edge.
    Boundary,
}

/// Classification of a coordinate against the island geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PlotClass {
    /// Outside the world envelope.
    OffWorld,
    /// Inside the envelope but outside the island band.
    Boundary,
    /// Inside the island band; may hold a walkable tile.
    IslandEligible,
}
