//! Creation report: read-only statistics over the finished island.
//!
//! The report builder never edits the map. It re-walks the grid to measure
//! connectivity and per-anchor distance, tallies hazards, difficulty,
//! features and flora, folds in the gardener's own findings, and reduces
//! everything to a [`Verdict`].

use std::collections::{BTreeMap, BTreeSet};

use island_types::{
    AnchorSummary, ConnectivitySummary, DifficultySummary, FeatureSummary, FloraSummary,
    GardenerWorldReport, GeometrySummary, HazardSummary, IslandCreationReport, IslandTile,
    Position, TerrainFeature, TileId, TileKind, TileSafety, Verdict,
};
use tracing::{info, warn};

use crate::features::FeaturePlan;
use crate::geometry::IslandGeometry;
use crate::island_map::IslandMap;
use crate::manifest::AnchorManifest;
use crate::smoothing::difficulty_violations;

/// Everything the report builder reads.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    /// The build's geometry.
    pub geometry: &'a IslandGeometry,
    /// The anchors the island was planted from.
    pub manifest: &'a AnchorManifest,
    /// The finished grid.
    pub map: &'a IslandMap,
    /// The feature plan, for the main path.
    pub features: &'a FeaturePlan,
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn bump<K: Ord>(counts: &mut BTreeMap<K, u32>, key: K) {
    let entry = counts.entry(key).or_insert(0);
    *entry = entry.saturating_add(1);
}

fn is_island(tile: &IslandTile) -> bool {
    tile.kind != TileKind::Boundary
}

fn summarize_geometry(geometry: &IslandGeometry, map: &IslandMap) -> GeometrySummary {
    let island_area = geometry.island.width().saturating_mul(geometry.island.height());
    let world_area = geometry.world.width().saturating_mul(geometry.world.height());
    GeometrySummary {
        world: geometry.world,
        island: geometry.island,
        spawn: geometry.spawn,
        eligible_positions: island_area,
        boundary_positions: world_area.saturating_sub(island_area),
        anchor_tiles: map.count_where(|t| t.kind == TileKind::Anchor),
        gardened_tiles: map.count_where(|t| t.kind == TileKind::Gardened),
        boundary_tiles: map.count_where(|t| t.kind == TileKind::Boundary),
        total_tiles: count_u32(map.len()),
    }
}

fn summarize_anchors(inputs: &ReportInputs<'_>) -> Vec<AnchorSummary> {
    let spawn = inputs.geometry.spawn;
    let steps = inputs.map.step_distances(spawn, |t| t.walkable);
    let effort = inputs.map.effort_distances(spawn, |t| t.walkable);
    let safe: BTreeSet<Position> = inputs
        .map
        .reachable_from(spawn, IslandTile::is_walkable_plot)
        .into_iter()
        .collect();

    inputs
        .manifest
        .anchors()
        .map(|anchor| AnchorSummary {
            id: anchor.id.clone(),
            name: anchor.name.clone(),
            position: anchor.position,
            chebyshev_from_spawn: anchor.position.chebyshev(spawn),
            steps_from_spawn: steps.get(&anchor.position).copied(),
            min_effort_minutes: effort.get(&anchor.position).copied(),
            safe_path: safe.contains(&anchor.position),
        })
        .collect()
}

fn summarize_connectivity(inputs: &ReportInputs<'_>) -> ConnectivitySummary {
    let map = inputs.map;
    let reached: BTreeSet<Position> = map
        .reachable_from(inputs.geometry.spawn, |t| t.walkable)
        .into_iter()
        .collect();

    let unreachable_walkable: Vec<Position> = map
        .tiles()
        .filter(|t| t.walkable && !reached.contains(&t.position))
        .map(|t| t.position)
        .collect();

    let unreachable_prime_plots: Vec<TileId> = inputs
        .manifest
        .anchors()
        .filter(|a| !reached.contains(&a.position))
        .map(|a| a.id.clone())
        .collect();

    ConnectivitySummary {
        walkable_plot_count: map.count_where(IslandTile::is_walkable_plot),
        walkable_tile_count: map.count_where(|t| t.walkable),
        reachable_walkable_count: count_u32(reached.len()),
        unreachable_walkable,
        unreachable_prime_plots,
    }
}

fn summarize_hazards(map: &IslandMap, anchors: &[AnchorSummary]) -> HazardSummary {
    let mut summary = HazardSummary::default();
    for tile in map.tiles().filter(|t| is_island(t)) {
        match tile.safety {
            TileSafety::Dead => {
                bump(&mut summary.dead_by_region, tile.region);
                summary.dead_total = summary.dead_total.saturating_add(1);
            }
            TileSafety::Impossible => {
                bump(&mut summary.impossible_by_region, tile.region);
                summary.impossible_total = summary.impossible_total.saturating_add(1);
            }
            TileSafety::Normal => {}
        }
    }
    summary.anchors_without_safe_path = anchors
        .iter()
        .filter(|a| !a.safe_path)
        .map(|a| a.id.clone())
        .collect();
    summary
}

fn summarize_difficulty(map: &IslandMap) -> DifficultySummary {
    let mut counts = BTreeMap::new();
    for tile in map.tiles().filter(|t| is_island(t)) {
        bump(&mut counts, tile.difficulty);
    }
    let violations = difficulty_violations(map);
    DifficultySummary {
        counts,
        violation_count: count_u32(violations.len()),
        max_delta: violations.iter().map(|v| v.delta).max().unwrap_or(0),
        violations,
    }
}

fn summarize_features(map: &IslandMap, plan: &FeaturePlan) -> FeatureSummary {
    let mut counts = BTreeMap::new();
    for tile in map.tiles() {
        for feature in &tile.features {
            bump(&mut counts, *feature);
        }
    }

    let main_path = plan.main_path();
    let main_path_breaks: Vec<Position> = main_path
        .iter()
        .copied()
        .filter(|p| {
            !map
                .get(*p)
                .is_some_and(|t| t.walkable && t.has_feature(TerrainFeature::Path))
        })
        .collect();

    FeatureSummary {
        counts,
        main_path_intact: !main_path.is_empty() && main_path_breaks.is_empty(),
        main_path,
        main_path_breaks,
    }
}

fn summarize_flora(map: &IslandMap) -> FloraSummary {
    let mut summary = FloraSummary::default();
    for tile in map.tiles().filter(|t| is_island(t)) {
        bump(&mut summary.primary_counts, tile.flora_primary);
        if let Some(secondary) = tile.flora_secondary {
            bump(&mut summary.secondary_counts, secondary);
        }
        bump(&mut summary.density_counts, tile.flora_density);
    }
    summary
}

fn render_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_ids(ids: &[TileId]) -> String {
    ids.iter()
        .map(TileId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn decide(
    connectivity: &ConnectivitySummary,
    hazards: &HazardSummary,
    difficulty: &DifficultySummary,
    features: &FeatureSummary,
    gardener: &GardenerWorldReport,
) -> Verdict {
    let mut blocking_issues = Vec::new();
    if !connectivity.unreachable_prime_plots.is_empty() {
        blocking_issues.push(format!(
            "anchors unreachable from spawn: {}",
            render_ids(&connectivity.unreachable_prime_plots)
        ));
    }
    if !connectivity.unreachable_walkable.is_empty() {
        blocking_issues.push(format!(
            "{} walkable cells unreachable from spawn: {}",
            connectivity.unreachable_walkable.len(),
            render_positions(&connectivity.unreachable_walkable)
        ));
    }
    if !gardener.has_full_coverage {
        blocking_issues.push(format!(
            "gardener visited {} of {} walkable plots",
            gardener.visited_walkable_plots, gardener.total_walkable_plots
        ));
    }

    let mut non_blocking_warnings = Vec::new();
    if !hazards.anchors_without_safe_path.is_empty() {
        non_blocking_warnings.push(format!(
            "anchors reachable only through hazards: {}",
            render_ids(&hazards.anchors_without_safe_path)
        ));
    }
    if difficulty.violation_count > 0 {
        non_blocking_warnings.push(format!(
            "{} adjacent cell pairs differ by more than one difficulty step (max {})",
            difficulty.violation_count, difficulty.max_delta
        ));
    }
    if !features.main_path_intact {
        non_blocking_warnings.push(if features.main_path.is_empty() {
            "no main path was laid".to_owned()
        } else {
            format!(
                "main path broken at {}",
                render_positions(&features.main_path_breaks)
            )
        });
    }
    non_blocking_warnings.extend(gardener.warnings.iter().cloned());

    Verdict {
        ready_for_cosmos: blocking_issues.is_empty(),
        blocking_issues,
        non_blocking_warnings,
    }
}

/// Build the creation report for a finished island.
pub fn build_creation_report(
    inputs: &ReportInputs<'_>,
    gardener: GardenerWorldReport,
) -> IslandCreationReport {
    let geometry = summarize_geometry(inputs.geometry, inputs.map);
    let anchors = summarize_anchors(inputs);
    let connectivity = summarize_connectivity(inputs);
    let hazards = summarize_hazards(inputs.map, &anchors);
    let difficulty = summarize_difficulty(inputs.map);
    let features = summarize_features(inputs.map, inputs.features);
    let flora = summarize_flora(inputs.map);
    let verdict = decide(&connectivity, &hazards, &difficulty, &features, &gardener);

    IslandCreationReport {
        geometry,
        anchors,
        connectivity,
        hazards,
        difficulty,
        features,
        flora,
        gardener,
        verdict,
    }
}

/// Log the outcome of a build.
pub fn log_creation_report(report: &IslandCreationReport) {
    info!(
        tiles = report.geometry.total_tiles,
        anchors = report.geometry.anchor_tiles,
        walkable_plots = report.connectivity.walkable_plot_count,
        violations = report.difficulty.violation_count,
        relaxed = report.gardener.impossible_relaxed,
        ready = report.verdict.ready_for_cosmos,
        "--- island creation summary ---"
    );

    for anchor in &report.anchors {
        info!(
            anchor = %anchor.id,
            steps = ?anchor.steps_from_spawn,
            effort_minutes = ?anchor.min_effort_minutes,
            safe = anchor.safe_path,
            "anchor distance from spawn"
        );
    }

    for issue in &report.verdict.blocking_issues {
        warn!(issue = %issue, "blocking issue");
    }
    for warning in &report.verdict.non_blocking_warnings {
        warn!(warning = %warning, "non-blocking warning");
    }

    if report.verdict.ready_for_cosmos {
        info!("island is ready");
    } else {
        warn!(
            issues = report.verdict.blocking_issues.len(),
            "island is not ready"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use island_types::{Region, TerrainDifficulty};

    use super::*;
    use crate::builder::IslandBuilder;
    use crate::gardening::plant_island;
    use crate::starting_island::{anchor_ids, create_starting_manifest, starting_feature_plan};

    fn stock_report() -> IslandCreationReport {
        let geometry = IslandGeometry::default();
        let manifest = create_starting_manifest(&geometry).unwrap();
        let plan = starting_feature_plan();
        IslandBuilder::new(geometry, &manifest, &plan)
            .build()
            .unwrap()
            .report
    }

    #[test]
    fn stock_island_is_ready() {
        let report = stock_report();
        assert!(report.is_ready());
        assert!(report.verdict.blocking_issues.is_empty());
        assert!(report.connectivity.unreachable_walkable.is_empty());
        assert!(report.connectivity.unreachable_prime_plots.is_empty());
        assert!(report.features.main_path_intact);
    }

    #[test]
    fn stock_geometry_counts() {
        let report = stock_report();
        assert_eq!(report.geometry.total_tiles, 81);
        assert_eq!(report.geometry.anchor_tiles, 12);
        assert_eq!(report.geometry.gardened_tiles, 37);
        assert_eq!(report.geometry.boundary_tiles, 32);
        assert_eq!(report.geometry.eligible_positions, 49);
    }

    #[test]
    fn stock_hazards_by_region() {
        let report = stock_report();
        assert_eq!(report.hazards.dead_total, 4);
        assert_eq!(report.hazards.impossible_total, 1);
        assert_eq!(report.hazards.impossible_by_region.get(&Region::Highland), Some(&1));
        assert!(report.hazards.anchors_without_safe_path.is_empty());
    }

    #[test]
    fn spawn_summary_is_zero() {
        let report = stock_report();
        let camp = report
            .anchors
            .iter()
            .find(|a| a.id.as_str() == anchor_ids::CAMP_LANDING);
        assert!(camp.is_some_and(|a| {
            a.steps_from_spawn == Some(0) && a.min_effort_minutes == Some(0) && a.safe_path
        }));
        let summit = report
            .anchors
            .iter()
            .find(|a| a.id.as_str() == anchor_ids::SUMMIT_PASS);
        assert!(summit.is_some_and(|a| a.chebyshev_from_spawn == 4 && a.steps_from_spawn == Some(4)));
    }

    #[test]
    fn difficulty_counts_cover_the_island() {
        let report = stock_report();
        let total: u32 = report.difficulty.counts.values().sum();
        assert_eq!(total, 49);
        assert_eq!(report.difficulty.violation_count, 0);
        assert!(report.difficulty.counts.contains_key(&TerrainDifficulty::Easy));
    }

    #[test]
    fn walled_off_anchor_is_named_unreachable() {
        let geometry = IslandGeometry::default();
        let manifest = create_starting_manifest(&geometry).unwrap();
        let mut map = plant_island(&geometry, &manifest).unwrap();
        // Seal the palm grove behind impossible ground.
        for (x, y) in [(-2, 1), (-2, 2), (-2, 3), (-3, 1), (-3, 3)] {
            let tile = map.get(Position::new(x, y)).cloned().unwrap();
            map.replace(tile.with_safety(TileSafety::Impossible)).unwrap();
        }
        let plan = starting_feature_plan();
        let report = build_creation_report(
            &ReportInputs {
                geometry: &geometry,
                manifest: &manifest,
                map: &map,
                features: &plan,
            },
            GardenerWorldReport::default(),
        );

        let grove = TileId::from(anchor_ids::PALM_GROVE);
        assert_eq!(report.connectivity.unreachable_prime_plots, vec![grove.clone()]);
        assert_eq!(
            report.connectivity.unreachable_walkable,
            vec![Position::new(-3, 2)]
        );
        let summary = report.anchors.iter().find(|a| a.id == grove).unwrap();
        assert_eq!(summary.steps_from_spawn, None);
        assert!(!summary.safe_path);
        assert!(!report.is_ready());
        assert!(
            report
                .verdict
                .blocking_issues
                .iter()
                .any(|issue| issue.contains(anchor_ids::PALM_GROVE))
        );
    }

    #[test]
    fn incomplete_gardener_blocks_verdict() {
        let connectivity = ConnectivitySummary::default();
        let gardener = GardenerWorldReport {
            total_walkable_plots: 3,
            visited_walkable_plots: 2,
            ..GardenerWorldReport::default()
        };
        let verdict = decide(
            &connectivity,
            &HazardSummary::default(),
            &DifficultySummary::default(),
            &FeatureSummary {
                main_path: vec![Position::new(0, 0)],
                main_path_intact: true,
                ..FeatureSummary::default()
            },
            &gardener,
        );
        assert!(!verdict.ready_for_cosmos);
        assert_eq!(verdict.blocking_issues.len(), 1);
        assert!(verdict.non_blocking_warnings.is_empty());
    }

    #[test]
    fn broken_path_is_only_a_warning() {
        let gardener = GardenerWorldReport {
            has_full_coverage: true,
            ..GardenerWorldReport::default()
        };
        let verdict = decide(
            &ConnectivitySummary::default(),
            &HazardSummary::default(),
            &DifficultySummary::default(),
            &FeatureSummary {
                main_path: vec![Position::new(0, 0), Position::new(0, 1)],
                main_path_intact: false,
                main_path_breaks: vec![Position::new(0, 1)],
                ..FeatureSummary::default()
            },
            &gardener,
        );
        assert!(verdict.ready_for_cosmos);
        assert_eq!(verdict.non_blocking_warnings, vec!["main path broken at (0, 1)".to_owned()]);
    }
}
