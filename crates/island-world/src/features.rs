//! Feature overlay: hand-specified terrain features written onto the grid.
//!
//! A [`FeaturePlan`] is an ordered list of assignments. Each assignment
//! targets either one anchor or a line of cells. Every application of
//! [`TerrainFeature::Path`] eases the cell one difficulty step (floored at
//! `Normal`), so a line that crosses an `Extreme` cell twice leaves it at
//! `Normal`.

use island_types::{Position, TerrainFeature, TileId};
use tracing::{debug, warn};

use crate::error::WorldError;
use crate::island_map::IslandMap;
use crate::manifest::AnchorManifest;

/// What an assignment writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureTarget {
    /// A single anchor, by id.
    Anchor(TileId),
    /// Every cell on the line from `from` to `to`, both ends included.
    Line {
        /// First cell.
        from: Position,
        /// Last cell.
        to: Position,
    },
}

/// One `(target, feature)` pair of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureAssignment {
    /// Where the feature goes.
    pub target: FeatureTarget,
    /// Which feature.
    pub feature: TerrainFeature,
}

impl FeatureAssignment {
    /// Assign `feature` to the anchor with slug `id`.
    pub fn anchor(id: &str, feature: TerrainFeature) -> Self {
        Self {
            target: FeatureTarget::Anchor(TileId::from(id)),
            feature,
        }
    }

    /// Assign `feature` to every cell from `from` to `to`.
    pub const fn line(from: Position, to: Position, feature: TerrainFeature) -> Self {
        Self {
            target: FeatureTarget::Line { from, to },
            feature,
        }
    }
}

/// An ordered list of feature assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturePlan {
    assignments: Vec<FeatureAssignment>,
}

impl FeaturePlan {
    /// Wrap a list of assignments.
    pub const fn new(assignments: Vec<FeatureAssignment>) -> Self {
        Self { assignments }
    }

    /// The assignments in application order.
    pub fn assignments(&self) -> &[FeatureAssignment] {
        &self.assignments
    }

    /// Cells of the designated main path: the first `Path` line in the plan.
    pub fn main_path(&self) -> Vec<Position> {
        self.assignments
            .iter()
            .find_map(|a| match a.target {
                FeatureTarget::Line { from, to } if a.feature == TerrainFeature::Path => {
                    Some(line_cells(from, to))
                }
                _ => None,
            })
            .unwrap_or_default()
    }
}

/// Cells from `from` to `to`, stepping the sign of the remaining
/// displacement on each axis (diagonal first, then straight).
pub fn line_cells(from: Position, to: Position) -> Vec<Position> {
    let mut cells = vec![from];
    let mut current = from;
    while current != to {
        let dx = to.x.saturating_sub(current.x).signum();
        let dy = to.y.saturating_sub(current.y).signum();
        current = Position::new(current.x.saturating_add(dx), current.y.saturating_add(dy));
        cells.push(current);
    }
    cells
}

/// Counters from one overlay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayOutcome {
    /// Feature applications written to the map.
    pub applied: u32,
    /// Path applications that eased a cell's difficulty.
    pub path_cells_smoothed: u32,
    /// Assignments or cells that could not be resolved.
    pub skipped: u32,
}

/// Write every assignment of `plan` onto `map`, in order.
///
/// Unknown anchors and cells missing from the map are skipped with a
/// warning; the creation report catches a resulting broken main path.
///
/// # Errors
///
/// Returns [`WorldError`] only if writing a resolved tile back fails.
pub fn apply_features(
    map: &mut IslandMap,
    manifest: &AnchorManifest,
    plan: &FeaturePlan,
) -> Result<OverlayOutcome, WorldError> {
    let mut outcome = OverlayOutcome::default();

    for assignment in plan.assignments() {
        let cells = match &assignment.target {
            FeatureTarget::Anchor(id) => {
                let Some(anchor) = manifest.anchor(id) else {
                    warn!(anchor = %id, feature = ?assignment.feature, "feature targets unknown anchor");
                    outcome.skipped = outcome.skipped.saturating_add(1);
                    continue;
                };
                vec![anchor.position]
            }
            FeatureTarget::Line { from, to } => line_cells(*from, *to),
        };

        for position in cells {
            let Some(tile) = map.get(position).cloned() else {
                warn!(%position, feature = ?assignment.feature, "feature targets empty cell");
                outcome.skipped = outcome.skipped.saturating_add(1);
                continue;
            };

            let mut updated = tile
                .with_feature(assignment.feature)
                .with_note(feature_note(assignment.feature));

            if assignment.feature == TerrainFeature::Path {
                let eased = updated.difficulty.eased();
                if eased != updated.difficulty {
                    debug!(%position, from = ?updated.difficulty, to = ?eased, "path eased difficulty");
                    updated = updated.with_difficulty(eased);
                    outcome.path_cells_smoothed = outcome.path_cells_smoothed.saturating_add(1);
                }
            }

            map.replace(updated)?;
            outcome.applied = outcome.applied.saturating_add(1);
        }
    }

    Ok(outcome)
}

const fn feature_note(feature: TerrainFeature) -> &'static str {
    match feature {
        TerrainFeature::Path => "A worn path threads through here.",
        TerrainFeature::CliffFace => "The ground ends at a sheer cliff face.",
        TerrainFeature::WaterfallDrop => "Water thunders over the drop.",
        TerrainFeature::RockWall => "A wall of rock closes in on one side.",
        TerrainFeature::CaveMouth => "A cave mouth yawns in the rock.",
        TerrainFeature::TangleVines => "Vines snag at every step.",
        TerrainFeature::SlipperyRocks => "The rocks underfoot are slick.",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use island_types::{TerrainDifficulty, TileKind};

    use super::*;
    use crate::gardening::plant_island;
    use crate::geometry::IslandGeometry;
    use crate::starting_island::{anchor_ids, create_starting_manifest, starting_feature_plan};

    fn planted() -> (IslandMap, AnchorManifest) {
        let geometry = IslandGeometry::default();
        let manifest = create_starting_manifest(&geometry).unwrap();
        let map = plant_island(&geometry, &manifest).unwrap();
        (map, manifest)
    }

    #[test]
    fn line_cells_are_inclusive() {
        let cells = line_cells(Position::new(0, 0), Position::new(0, 4));
        assert_eq!(cells.len(), 5);
        assert_eq!(cells.first(), Some(&Position::new(0, 0)));
        assert_eq!(cells.last(), Some(&Position::new(0, 4)));
    }

    #[test]
    fn line_cells_step_diagonally_first() {
        let cells = line_cells(Position::new(0, 0), Position::new(2, 4));
        assert_eq!(
            cells,
            vec![
                Position::new(0, 0),
                Position::new(1, 1),
                Position::new(2, 2),
                Position::new(2, 3),
                Position::new(2, 4),
            ]
        );
        assert_eq!(line_cells(Position::new(3, 3), Position::new(3, 3)).len(), 1);
    }

    #[test]
    fn main_path_is_first_path_line() {
        let plan = starting_feature_plan();
        let path = plan.main_path();
        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|p| p.x == 0));
        assert!(FeaturePlan::default().main_path().is_empty());
    }

    #[test]
    fn stock_plan_tags_path_and_anchors() {
        let (mut map, manifest) = planted();
        let outcome = apply_features(&mut map, &manifest, &starting_feature_plan()).unwrap();
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.applied, 14);
        // The spur eases the creek ford from Hard.
        assert_eq!(outcome.path_cells_smoothed, 1);
        let ford = map.get_by_id(&TileId::from(anchor_ids::CREEK_FORD)).unwrap();
        assert_eq!(ford.difficulty, TerrainDifficulty::Normal);
        assert!(ford.has_feature(TerrainFeature::Path));

        for y in 0..=4 {
            let tile = map.get(Position::new(0, y));
            assert!(tile.is_some_and(|t| t.has_feature(TerrainFeature::Path)));
        }
        let falls = map.get_by_id(&TileId::from(anchor_ids::FALLS_LEDGE));
        assert!(falls.is_some_and(|t| t.has_feature(TerrainFeature::WaterfallDrop)));
        let cave = map.get_by_id(&TileId::from(anchor_ids::HIDDEN_CAVE));
        assert!(cave.is_some_and(|t| {
            t.has_feature(TerrainFeature::CaveMouth) && t.has_feature(TerrainFeature::RockWall)
        }));
    }

    #[test]
    fn repeated_path_eases_extreme_to_normal() {
        let (mut map, manifest) = planted();
        let target = Position::new(1, 1);
        let tile = map.get(target).cloned().unwrap();
        assert_eq!(tile.kind, TileKind::Gardened);
        map.replace(tile.with_difficulty(TerrainDifficulty::Extreme))
            .unwrap();

        let plan = FeaturePlan::new(vec![
            FeatureAssignment::line(target, target, TerrainFeature::Path),
            FeatureAssignment::line(target, target, TerrainFeature::Path),
            FeatureAssignment::line(target, target, TerrainFeature::Path),
        ]);
        let outcome = apply_features(&mut map, &manifest, &plan).unwrap();
        assert_eq!(outcome.path_cells_smoothed, 2);
        assert_eq!(
            map.get(target).map(|t| t.difficulty),
            Some(TerrainDifficulty::Normal)
        );
        assert_eq!(map.get(target).map(|t| t.context.history.len()), Some(3));
    }

    #[test]
    fn unknown_targets_are_skipped() {
        let (mut map, manifest) = planted();
        let plan = FeaturePlan::new(vec![
            FeatureAssignment::anchor("sunken_temple", TerrainFeature::CaveMouth),
            FeatureAssignment::line(Position::new(20, 0), Position::new(21, 0), TerrainFeature::Path),
        ]);
        let outcome = apply_features(&mut map, &manifest, &plan).unwrap();
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 3);
    }
}
