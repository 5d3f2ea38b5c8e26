//! Core entity structs: anchors, island tiles, and their narrative context.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    Biome, Elevation, FloraDensity, FloraKind, Region, TerrainDifficulty, TerrainFeature,
    TileKind, TileSafety,
};
use crate::ids::TileId;
use crate::position::{Direction8, Position};

// ---------------------------------------------------------------------------
// Anchors
// ---------------------------------------------------------------------------

/// Role flags carried by an anchor.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AnchorRoles {
    /// The player starts here. Exactly one anchor per manifest.
    pub is_spawn: bool,
    /// A candidate for leaving the island.
    pub is_exit_candidate: bool,
    /// A dangerous landmark.
    pub is_hazard: bool,
    /// Hidden until discovered.
    pub is_secret: bool,
    /// A crossroads many routes pass through.
    pub is_hub: bool,
}

/// A hand-authored landmark with a fixed position and neighbor graph.
///
/// Anchors are immutable once a manifest is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AnchorTile {
    /// Stable slug, reused as the anchor tile's [`TileId`].
    pub id: TileId,
    /// Display name.
    pub name: String,
    /// Authored description.
    pub description: String,
    /// Fixed grid position.
    pub position: Position,
    /// Landscape tag.
    pub biome: Biome,
    /// Island region tag.
    pub region: Region,
    /// Height band tag.
    pub elevation: Elevation,
    /// Role flags.
    pub roles: AnchorRoles,
    /// Explicit compass links to other anchors.
    pub neighbors: BTreeMap<Direction8, TileId>,
}

impl AnchorTile {
    /// The anchor linked in `direction`, if any.
    pub fn neighbor(&self, direction: Direction8) -> Option<&TileId> {
        self.neighbors.get(&direction)
    }
}

// ---------------------------------------------------------------------------
// Tiles
// ---------------------------------------------------------------------------

/// Narrative text attached to a tile.
///
/// `history` is append-only; `current_description` always reflects the
/// base text plus the most recent entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TileContext {
    /// The description the tile was created with.
    pub base_description: String,
    /// What narrators should read now.
    pub current_description: String,
    /// Every change recorded against the tile, oldest first.
    pub history: Vec<String>,
}

impl TileContext {
    /// Create a context whose current text equals the base text.
    pub fn new(base_description: impl Into<String>) -> Self {
        let base_description = base_description.into();
        Self {
            current_description: base_description.clone(),
            base_description,
            history: Vec::new(),
        }
    }

    /// Append an entry to the history and refresh the current description.
    pub fn record(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        self.current_description = format!("{} {entry}", self.base_description);
        self.history.push(entry);
    }
}

/// One cell of the island grid.
///
/// Anchors, gardened cells and boundary cells share this record; only
/// [`kind`](Self::kind) tells them apart. Tiles are treated as values: a
/// pass that changes a cell builds a new tile with the `with_*` methods and
/// writes it back whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IslandTile {
    /// Unique identifier.
    pub tile_id: TileId,
    /// Provenance.
    pub kind: TileKind,
    /// Grid position (unique per map).
    pub position: Position,
    /// Landscape tag.
    pub biome: Biome,
    /// Island region tag.
    pub region: Region,
    /// Height band tag.
    pub elevation: Elevation,
    /// Crossing difficulty.
    pub difficulty: TerrainDifficulty,
    /// Survivability.
    pub safety: TileSafety,
    /// Whether the cell can be entered at all.
    pub walkable: bool,
    /// Overlaid terrain features.
    pub features: BTreeSet<TerrainFeature>,
    /// Dominant plant community.
    pub flora_primary: FloraKind,
    /// Secondary plant community, if any.
    pub flora_secondary: Option<FloraKind>,
    /// How overgrown the cell is.
    pub flora_density: FloraDensity,
    /// Narrative text.
    pub context: TileContext,
}

impl IslandTile {
    /// Whether the cell counts toward coverage: Normal safety and walkable.
    pub fn is_walkable_plot(&self) -> bool {
        self.safety == TileSafety::Normal && self.walkable
    }

    /// Whether any overlaid feature is abrupt.
    pub fn has_abrupt_feature(&self) -> bool {
        self.features.iter().any(|f| f.is_abrupt())
    }

    /// Whether the cell takes part in difficulty smoothing: Normal safety
    /// and no abrupt feature.
    pub fn is_smoothing_candidate(&self) -> bool {
        self.safety == TileSafety::Normal && !self.has_abrupt_feature()
    }

    /// Whether the cell carries `feature`.
    pub fn has_feature(&self, feature: TerrainFeature) -> bool {
        self.features.contains(&feature)
    }

    /// Copy with a new difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: TerrainDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Copy with a new safety. Walkability follows: only `Impossible`
    /// cells are closed.
    #[must_use]
    pub fn with_safety(mut self, safety: TileSafety) -> Self {
        self.safety = safety;
        self.walkable = safety != TileSafety::Impossible;
        self
    }

    /// Copy with `feature` added.
    #[must_use]
    pub fn with_feature(mut self, feature: TerrainFeature) -> Self {
        self.features.insert(feature);
        self
    }

    /// Copy with an entry appended to the context history.
    #[must_use]
    pub fn with_note(mut self, entry: impl Into<String>) -> Self {
        self.context.record(entry);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tile() -> IslandTile {
        IslandTile {
            tile_id: TileId::gardened(Position::new(1, 1)),
            kind: TileKind::Gardened,
            position: Position::new(1, 1),
            biome: Biome::LightForest,
            region: Region::Lowland,
            elevation: Elevation::Low,
            difficulty: TerrainDifficulty::Normal,
            safety: TileSafety::Normal,
            walkable: true,
            features: BTreeSet::new(),
            flora_primary: FloraKind::Palm,
            flora_secondary: Some(FloraKind::Fern),
            flora_density: FloraDensity::Moderate,
            context: TileContext::new("Palms lean over soft ground."),
        }
    }

    #[test]
    fn context_history_is_append_only() {
        let mut context = TileContext::new("A clearing.");
        context.record("A path was cut.");
        context.record("Vines were trimmed.");
        assert_eq!(context.history.len(), 2);
        assert_eq!(context.base_description, "A clearing.");
        assert_eq!(context.current_description, "A clearing. Vines were trimmed.");
    }

    #[test]
    fn safety_drives_walkability() {
        let closed = sample_tile().with_safety(TileSafety::Impossible);
        assert!(!closed.walkable);
        assert!(!closed.is_walkable_plot());

        let deadly = sample_tile().with_safety(TileSafety::Dead);
        assert!(deadly.walkable);
        assert!(!deadly.is_walkable_plot());
    }

    #[test]
    fn abrupt_feature_excludes_from_smoothing() {
        let tile = sample_tile();
        assert!(tile.is_smoothing_candidate());
        let tile = tile.with_feature(TerrainFeature::CliffFace);
        assert!(tile.has_abrupt_feature());
        assert!(!tile.is_smoothing_candidate());
    }

    #[test]
    fn with_methods_leave_identity_alone() {
        let tile = sample_tile();
        let id = tile.tile_id.clone();
        let changed = tile
            .with_difficulty(TerrainDifficulty::Hard)
            .with_feature(TerrainFeature::Path)
            .with_note("Trail widened.");
        assert_eq!(changed.tile_id, id);
        assert_eq!(changed.difficulty, TerrainDifficulty::Hard);
        assert!(changed.has_feature(TerrainFeature::Path));
        assert_eq!(changed.context.history, vec!["Trail widened.".to_owned()]);
    }
}
