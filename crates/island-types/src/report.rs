//! Build reports: the gardener pass outcome and the full creation report.
//!
//! Reports are produced once per world build and never mutated afterwards.
//! Every collection is ordered (`Vec` in traversal order or `BTreeMap` by
//! key) so that two builds of the same manifest serialize identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{FloraDensity, FloraKind, Region, TerrainDifficulty, TerrainFeature};
use crate::ids::TileId;
use crate::position::{Bounds, Position};

// ---------------------------------------------------------------------------
// Gardener pass
// ---------------------------------------------------------------------------

/// Outcome of the coverage walk and hazard relaxation, plus the counters of
/// the repair passes that ran before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GardenerWorldReport {
    /// Cells dequeued by the final coverage walk.
    pub plots_visited: u32,
    /// Distinct anchors reached by the final coverage walk.
    pub anchors_visited: u32,
    /// Cells whose difficulty the smoothing sweep changed.
    pub difficulty_fixes: u32,
    /// Path applications that eased a cell's difficulty.
    pub path_cells_smoothed: u32,
    /// Impossible cells flipped to Normal by relaxation.
    pub impossible_relaxed: u32,
    /// Relax-and-retry cycles performed (0 or 1).
    pub relax_cycles: u32,
    /// Normal, walkable cells on the map.
    pub total_walkable_plots: u32,
    /// Normal, walkable cells the final walk reached.
    pub visited_walkable_plots: u32,
    /// Cells in the order the final walk visited them.
    pub coverage_path: Vec<Position>,
    /// Normal, walkable cells the final walk never reached.
    pub unvisited_walkable_plots: Vec<Position>,
    /// Cells converted by relaxation, in conversion order.
    pub relaxed_plots: Vec<Position>,
    /// Every walkable plot was reached.
    pub has_full_coverage: bool,
    /// Notes about concessions made during the pass.
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Creation report sections
// ---------------------------------------------------------------------------

/// Shape of the built grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeometrySummary {
    /// World envelope.
    pub world: Bounds,
    /// Island band.
    pub island: Bounds,
    /// Configured spawn position.
    pub spawn: Position,
    /// Positions classified as island-eligible.
    pub eligible_positions: u32,
    /// Positions classified as boundary.
    pub boundary_positions: u32,
    /// Tiles of kind `Anchor`.
    pub anchor_tiles: u32,
    /// Tiles of kind `Gardened`.
    pub gardened_tiles: u32,
    /// Tiles of kind `Boundary`.
    pub boundary_tiles: u32,
    /// All tiles on the map.
    pub total_tiles: u32,
}

/// Distance and effort from spawn to one anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AnchorSummary {
    /// Anchor identifier.
    pub id: TileId,
    /// Display name.
    pub name: String,
    /// Grid position.
    pub position: Position,
    /// Straight-line Chebyshev distance from spawn.
    pub chebyshev_from_spawn: u32,
    /// Fewest steps over walkable cells, if reachable.
    pub steps_from_spawn: Option<u32>,
    /// Least total crossing time in minutes, if reachable.
    pub min_effort_minutes: Option<u32>,
    /// Reachable without entering a Dead cell.
    pub safe_path: bool,
}

/// Reachability from spawn over every walkable cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ConnectivitySummary {
    /// Normal, walkable cells on the map.
    pub walkable_plot_count: u32,
    /// Walkable cells of any safety.
    pub walkable_tile_count: u32,
    /// Walkable cells reached from spawn.
    pub reachable_walkable_count: u32,
    /// Walkable cells not reached from spawn.
    pub unreachable_walkable: Vec<Position>,
    /// Anchors not reached from spawn.
    pub unreachable_prime_plots: Vec<TileId>,
}

/// Where the dangerous cells are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HazardSummary {
    /// Dead cells per region.
    pub dead_by_region: BTreeMap<Region, u32>,
    /// Impossible cells per region.
    pub impossible_by_region: BTreeMap<Region, u32>,
    /// All Dead cells.
    pub dead_total: u32,
    /// All Impossible cells.
    pub impossible_total: u32,
    /// Anchors that can only be reached through a Dead cell, or not at all.
    pub anchors_without_safe_path: Vec<TileId>,
}

/// A pair of smoothing-candidate neighbors whose difficulty differs by
/// more than one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DifficultyViolation {
    /// The smaller position of the pair.
    pub a: Position,
    /// The larger position of the pair.
    pub b: Position,
    /// Absolute difference of difficulty ordinals.
    pub delta: u8,
}

/// Difficulty distribution and residual smoothing violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DifficultySummary {
    /// Tiles per difficulty.
    pub counts: BTreeMap<TerrainDifficulty, u32>,
    /// Number of violating neighbor pairs.
    pub violation_count: u32,
    /// Largest delta seen among violating pairs (0 when none).
    pub max_delta: u8,
    /// Each violating pair, counted once.
    pub violations: Vec<DifficultyViolation>,
}

/// Feature distribution and main path integrity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FeatureSummary {
    /// Tiles carrying each feature.
    pub counts: BTreeMap<TerrainFeature, u32>,
    /// Cells of the designated main path.
    pub main_path: Vec<Position>,
    /// Every main path cell exists, is walkable, and carries `Path`.
    pub main_path_intact: bool,
    /// Main path cells that fail the check.
    pub main_path_breaks: Vec<Position>,
}

/// Flora distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FloraSummary {
    /// Tiles per primary flora.
    pub primary_counts: BTreeMap<FloraKind, u32>,
    /// Tiles per secondary flora.
    pub secondary_counts: BTreeMap<FloraKind, u32>,
    /// Tiles per density.
    pub density_counts: BTreeMap<FloraDensity, u32>,
}

/// The go/no-go judgment on a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Verdict {
    /// Safe to hand to the gameplay layer.
    pub ready_for_cosmos: bool,
    /// Reasons the world is not ready.
    pub blocking_issues: Vec<String>,
    /// Problems worth logging that do not block play.
    pub non_blocking_warnings: Vec<String>,
}

/// Everything known about a finished world build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IslandCreationReport {
    /// Grid shape.
    pub geometry: GeometrySummary,
    /// Per-anchor distances, in manifest order.
    pub anchors: Vec<AnchorSummary>,
    /// Reachability from spawn.
    pub connectivity: ConnectivitySummary,
    /// Hazard distribution.
    pub hazards: HazardSummary,
    /// Difficulty distribution and violations.
    pub difficulty: DifficultySummary,
    /// Feature distribution and main path.
    pub features: FeatureSummary,
    /// Flora distribution.
    pub flora: FloraSummary,
    /// Gardener pass outcome.
    pub gardener: GardenerWorldReport,
    /// Final judgment.
    pub verdict: Verdict,
}

impl IslandCreationReport {
    /// Shorthand for `verdict.ready_for_cosmos`.
    pub const fn is_ready(&self) -> bool {
        self.verdict.ready_for_cosmos
    }
}
