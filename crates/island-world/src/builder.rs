//! The island build pipeline.
//!
//! [`IslandBuilder::build`] runs every pass once, in order:
//!
//! 1. Plant anchors, gardened cells and the sea ring.
//! 2. Overlay the feature plan.
//! 3. Smooth difficulty.
//! 4. Run the gardener's coverage walk and relaxation.
//! 5. Build the creation report.
//!
//! The build always runs to completion. An island that fails its checks is
//! still returned; the report's verdict says whether it is ready.

use island_types::IslandCreationReport;
use tracing::info;

use crate::creation_report::{ReportInputs, build_creation_report};
use crate::error::WorldError;
use crate::features::{FeaturePlan, apply_features};
use crate::gardener::{EarlierFixes, tend_island};
use crate::gardening::plant_island;
use crate::geometry::IslandGeometry;
use crate::island_map::IslandMap;
use crate::manifest::AnchorManifest;
use crate::smoothing::smooth_difficulty;

/// A finished island: the grid and its creation report.
#[derive(Debug, Clone)]
pub struct IslandWorld {
    /// The finished grid.
    pub map: IslandMap,
    /// Statistics and verdict for the build.
    pub report: IslandCreationReport,
}

/// Runs the build pipeline over one geometry, manifest and feature plan.
#[derive(Debug, Clone, Copy)]
pub struct IslandBuilder<'a> {
    geometry: IslandGeometry,
    manifest: &'a AnchorManifest,
    features: &'a FeaturePlan,
}

impl<'a> IslandBuilder<'a> {
    /// Set up a build.
    pub const fn new(
        geometry: IslandGeometry,
        manifest: &'a AnchorManifest,
        features: &'a FeaturePlan,
    ) -> Self {
        Self {
            geometry,
            manifest,
            features,
        }
    }

    /// Run every pass and return the finished island.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the geometry is invalid, the manifest does
    /// not fit it, or a pass fails to write a tile back. Incomplete coverage
    /// is not an error.
    pub fn build(self) -> Result<IslandWorld, WorldError> {
        self.geometry.validate()?;
        self.manifest.validate_against(&self.geometry)?;

        let mut map = plant_island(&self.geometry, self.manifest)?;
        info!(tiles = map.len(), anchors = self.manifest.len(), "island planted");

        let overlay = apply_features(&mut map, self.manifest, self.features)?;
        info!(
            applied = overlay.applied,
            path_cells_smoothed = overlay.path_cells_smoothed,
            skipped = overlay.skipped,
            "features overlaid"
        );

        let smoothing = smooth_difficulty(&mut map)?;
        info!(
            adjusted = smoothing.cells_adjusted,
            conflicts = smoothing.conflicts,
            "difficulty smoothed"
        );

        let gardener = tend_island(
            &mut map,
            self.manifest.start_tile().position,
            EarlierFixes {
                difficulty_fixes: smoothing.cells_adjusted,
                path_cells_smoothed: overlay.path_cells_smoothed,
            },
        )?;

        let report = build_creation_report(
            &ReportInputs {
                geometry: &self.geometry,
                manifest: self.manifest,
                map: &map,
                features: self.features,
            },
            gardener,
        );
        info!(ready = report.is_ready(), "island build complete");

        Ok(IslandWorld { map, report })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use island_types::{Position, TerrainFeature, TileKind};

    use super::*;
    use crate::features::FeatureAssignment;
    use crate::starting_island::{create_starting_manifest, starting_feature_plan};

    fn stock_manifest() -> AnchorManifest {
        create_starting_manifest(&IslandGeometry::default()).unwrap()
    }

    #[test]
    fn stock_build_matches_expected_counters() {
        let manifest = stock_manifest();
        let plan = starting_feature_plan();
        let world = IslandBuilder::new(IslandGeometry::default(), &manifest, &plan)
            .build()
            .unwrap();

        let gardener = &world.report.gardener;
        assert!(gardener.has_full_coverage);
        assert_eq!(gardener.total_walkable_plots, 44);
        assert_eq!(gardener.plots_visited, 44);
        assert_eq!(gardener.anchors_visited, 12);
        assert_eq!(gardener.difficulty_fixes, 2);
        assert_eq!(gardener.path_cells_smoothed, 1);
        assert_eq!(gardener.impossible_relaxed, 0);
        assert_eq!(gardener.relax_cycles, 0);
        assert_eq!(world.map.count_where(|t| t.kind == TileKind::Anchor), 12);
    }

    #[test]
    fn empty_plan_still_builds_but_warns() {
        let manifest = stock_manifest();
        let plan = FeaturePlan::default();
        let world = IslandBuilder::new(IslandGeometry::default(), &manifest, &plan)
            .build()
            .unwrap();
        assert!(!world.report.features.main_path_intact);
        assert!(
            world
                .report
                .verdict
                .non_blocking_warnings
                .iter()
                .any(|w| w.contains("main path"))
        );
        assert_eq!(world.report.gardener.path_cells_smoothed, 0);
    }

    #[test]
    fn path_across_the_interior_is_recorded() {
        let manifest = stock_manifest();
        let plan = FeaturePlan::new(vec![FeatureAssignment::line(
            Position::new(-3, 3),
            Position::new(3, 3),
            TerrainFeature::Path,
        )]);
        let world = IslandBuilder::new(IslandGeometry::default(), &manifest, &plan)
            .build()
            .unwrap();
        assert_eq!(world.report.features.main_path.len(), 7);
        assert!(world.report.features.main_path_intact);
        assert!(world.report.gardener.path_cells_smoothed >= 1);
    }

    #[test]
    fn geometry_with_another_spawn_is_rejected() {
        let manifest = stock_manifest();
        let plan = starting_feature_plan();
        let moved = IslandGeometry {
            spawn: Position::new(1, 1),
            ..IslandGeometry::default()
        };
        let result = IslandBuilder::new(moved, &manifest, &plan).build();
        assert!(matches!(
            result,
            Err(WorldError::SpawnMismatch { position, expected, .. })
                if position == Position::new(0, 0) && expected == Position::new(1, 1)
        ));
    }
}
