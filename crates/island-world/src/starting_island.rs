//! Default starting island.
//!
//! Twelve hand-authored anchors across the shore, lowland, interior and
//! highland regions, linked by compass neighbors, plus the stock feature
//! plan that cuts the main path from the landing camp to the summit pass.

use std::collections::BTreeMap;

use island_types::{
    AnchorRoles, AnchorTile, Biome, Direction8, Elevation, Position, Region, TerrainFeature,
    TileId,
};

use crate::builder::{IslandBuilder, IslandWorld};
use crate::config::IslandConfig;
use crate::error::WorldError;
use crate::features::{FeatureAssignment, FeaturePlan};
use crate::geometry::IslandGeometry;
use crate::manifest::AnchorManifest;

/// Slugs of the stock anchors, usable as [`TileId`]s.
pub mod anchor_ids {
    /// Spawn: the landing camp on the south shore.
    pub const CAMP_LANDING: &str = "camp_landing";
    /// Driftwood-strewn beach west of the camp.
    pub const DRIFTWOOD_BEACH: &str = "driftwood_beach";
    /// Sheltered lagoon beach east of the camp.
    pub const LAGOON_BEACH: &str = "lagoon_beach";
    /// Slick tide pools on the eastern shore.
    pub const TIDE_POOLS: &str = "tide_pools";
    /// Palm grove on the western lowland.
    pub const PALM_GROVE: &str = "palm_grove";
    /// Clearing at the middle of the main trail.
    pub const TRAIL_CLEARING: &str = "trail_clearing";
    /// Bamboo stand in the interior.
    pub const BAMBOO_STAND: &str = "bamboo_stand";
    /// Ford across the interior creek.
    pub const CREEK_FORD: &str = "creek_ford";
    /// Hidden cave in the northern rock.
    pub const HIDDEN_CAVE: &str = "hidden_cave";
    /// Summit pass at the end of the main trail.
    pub const SUMMIT_PASS: &str = "summit_pass";
    /// Ledge at the top of the falls.
    pub const FALLS_LEDGE: &str = "falls_ledge";
    /// Sheer northern ridge.
    pub const NORTH_RIDGE: &str = "north_ridge";
}

use anchor_ids::{
    BAMBOO_STAND, CAMP_LANDING, CREEK_FORD, DRIFTWOOD_BEACH, FALLS_LEDGE, HIDDEN_CAVE,
    LAGOON_BEACH, NORTH_RIDGE, PALM_GROVE, SUMMIT_PASS, TIDE_POOLS, TRAIL_CLEARING,
};

/// Start of the stock main path (the landing camp).
pub const MAIN_PATH_START: Position = Position::new(0, 0);

/// End of the stock main path (the summit pass).
pub const MAIN_PATH_END: Position = Position::new(0, 4);

/// Helper to build an [`AnchorTile`].
#[allow(clippy::too_many_arguments)]
fn anchor(
    id: &str,
    name: &str,
    position: (i32, i32),
    biome: Biome,
    region: Region,
    elevation: Elevation,
    roles: AnchorRoles,
    description: &str,
    links: &[(Direction8, &str)],
) -> AnchorTile {
    AnchorTile {
        id: TileId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        position: Position::new(position.0, position.1),
        biome,
        region,
        elevation,
        roles,
        neighbors: links
            .iter()
            .map(|&(direction, target)| (direction, TileId::from(target)))
            .collect::<BTreeMap<_, _>>(),
    }
}

const fn plain() -> AnchorRoles {
    AnchorRoles {
        is_spawn: false,
        is_exit_candidate: false,
        is_hazard: false,
        is_secret: false,
        is_hub: false,
    }
}

/// The twelve stock anchors in authored order.
#[allow(clippy::too_many_lines)]
pub fn starting_anchors() -> Vec<AnchorTile> {
    use Direction8::{East, North, NorthEast, NorthWest, South, SouthEast, SouthWest, West};

    vec![
        // ---------------------------------------------------------------
        // Region: Shore
        // ---------------------------------------------------------------
        anchor(
            CAMP_LANDING,
            "Camp Landing",
            (0, 0),
            Biome::Camp,
            Region::Shore,
            Elevation::Low,
            AnchorRoles {
                is_spawn: true,
                is_hub: true,
                ..plain()
            },
            "A ring of stones around old ashes above the tide line. The wreck's salvage is stacked under a tarp.",
            &[
                (North, TRAIL_CLEARING),
                (West, DRIFTWOOD_BEACH),
                (East, LAGOON_BEACH),
            ],
        ),
        anchor(
            DRIFTWOOD_BEACH,
            "Driftwood Beach",
            (-2, 0),
            Biome::Beach,
            Region::Shore,
            Elevation::Low,
            plain(),
            "Bleached logs lie half-buried in the sand, piled by years of winter storms.",
            &[
                (East, CAMP_LANDING),
                (NorthWest, PALM_GROVE),
                (NorthEast, TRAIL_CLEARING),
            ],
        ),
        anchor(
            LAGOON_BEACH,
            "Lagoon Beach",
            (2, 0),
            Biome::Beach,
            Region::Shore,
            Elevation::Low,
            plain(),
            "A crescent of white sand wrapped around a calm, green lagoon.",
            &[
                (West, CAMP_LANDING),
                (NorthEast, TIDE_POOLS),
                (NorthWest, TRAIL_CLEARING),
                (North, CREEK_FORD),
            ],
        ),
        anchor(
            TIDE_POOLS,
            "Tide Pools",
            (3, 2),
            Biome::Rocky,
            Region::Shore,
            Elevation::Low,
            AnchorRoles {
                is_hazard: true,
                ..plain()
            },
            "Black rock shelves full of pools and weed. The footing is treacherous when the tide runs.",
            &[(SouthWest, LAGOON_BEACH), (NorthWest, CREEK_FORD)],
        ),
        // ---------------------------------------------------------------
        // Region: Lowland
        // ---------------------------------------------------------------
        anchor(
            PALM_GROVE,
            "Palm Grove",
            (-3, 2),
            Biome::LightForest,
            Region::Lowland,
            Elevation::Low,
            plain(),
            "Tall palms rattle overhead. Fallen coconuts litter the shade.",
            &[
                (SouthEast, DRIFTWOOD_BEACH),
                (East, TRAIL_CLEARING),
                (NorthEast, BAMBOO_STAND),
                (North, FALLS_LEDGE),
            ],
        ),
        anchor(
            TRAIL_CLEARING,
            "Trail Clearing",
            (0, 2),
            Biome::LightForest,
            Region::Lowland,
            Elevation::Mid,
            AnchorRoles {
                is_hub: true,
                ..plain()
            },
            "A sunny gap in the canopy where every trail on the island seems to cross.",
            &[
                (South, CAMP_LANDING),
                (North, SUMMIT_PASS),
                (West, PALM_GROVE),
                (East, TIDE_POOLS),
                (NorthWest, BAMBOO_STAND),
                (NorthEast, CREEK_FORD),
                (SouthWest, DRIFTWOOD_BEACH),
                (SouthEast, LAGOON_BEACH),
            ],
        ),
        // ---------------------------------------------------------------
        // Region: Interior
        // ---------------------------------------------------------------
        anchor(
            BAMBOO_STAND,
            "Bamboo Stand",
            (-1, 3),
            Biome::BambooGrove,
            Region::Interior,
            Elevation::Mid,
            plain(),
            "Green culms crowd so close together that the wind makes them knock like wooden chimes.",
            &[
                (SouthEast, TRAIL_CLEARING),
                (SouthWest, PALM_GROVE),
                (North, HIDDEN_CAVE),
                (NorthEast, SUMMIT_PASS),
                (NorthWest, FALLS_LEDGE),
            ],
        ),
        anchor(
            CREEK_FORD,
            "Creek Ford",
            (2, 3),
            Biome::Stream,
            Region::Interior,
            Elevation::Mid,
            plain(),
            "A knee-deep creek runs fast over round stones. A line of boulders marks the crossing.",
            &[
                (South, LAGOON_BEACH),
                (SouthWest, TRAIL_CLEARING),
                (SouthEast, TIDE_POOLS),
                (North, NORTH_RIDGE),
                (NorthWest, SUMMIT_PASS),
            ],
        ),
        // ---------------------------------------------------------------
        // Region: Highland
        // ---------------------------------------------------------------
        anchor(
            HIDDEN_CAVE,
            "Hidden Cave",
            (-1, 5),
            Biome::Cave,
            Region::Highland,
            Elevation::High,
            AnchorRoles {
                is_secret: true,
                ..plain()
            },
            "A low opening behind a curtain of ferns. Cold air breathes out of the dark.",
            &[
                (South, BAMBOO_STAND),
                (SouthEast, SUMMIT_PASS),
                (West, FALLS_LEDGE),
            ],
        ),
        anchor(
            SUMMIT_PASS,
            "Summit Pass",
            (0, 4),
            Biome::Rocky,
            Region::Highland,
            Elevation::High,
            AnchorRoles {
                is_exit_candidate: true,
                ..plain()
            },
            "A saddle between two peaks. From here the whole island and the sea beyond are visible.",
            &[
                (South, TRAIL_CLEARING),
                (SouthWest, BAMBOO_STAND),
                (SouthEast, CREEK_FORD),
                (NorthWest, HIDDEN_CAVE),
                (NorthEast, NORTH_RIDGE),
            ],
        ),
        anchor(
            FALLS_LEDGE,
            "Falls Ledge",
            (-3, 5),
            Biome::Waterfall,
            Region::Highland,
            Elevation::High,
            AnchorRoles {
                is_hazard: true,
                ..plain()
            },
            "The river pours over a lip of mossy stone and vanishes into spray far below.",
            &[
                (East, HIDDEN_CAVE),
                (South, PALM_GROVE),
                (SouthEast, BAMBOO_STAND),
            ],
        ),
        anchor(
            NORTH_RIDGE,
            "North Ridge",
            (2, 5),
            Biome::Cliff,
            Region::Highland,
            Elevation::High,
            AnchorRoles {
                is_exit_candidate: true,
                is_hazard: true,
                ..plain()
            },
            "A knife-edge of rock above the northern sea. A signal fire here would be seen for miles.",
            &[(South, CREEK_FORD), (SouthWest, SUMMIT_PASS)],
        ),
    ]
}

/// The stock feature plan: the main path first, then anchor features.
pub fn starting_feature_plan() -> FeaturePlan {
    FeaturePlan::new(vec![
        FeatureAssignment::line(MAIN_PATH_START, MAIN_PATH_END, TerrainFeature::Path),
        // Spur from the trail clearing to the creek ford.
        FeatureAssignment::line(Position::new(0, 2), Position::new(2, 3), TerrainFeature::Path),
        FeatureAssignment::anchor(FALLS_LEDGE, TerrainFeature::WaterfallDrop),
        FeatureAssignment::anchor(HIDDEN_CAVE, TerrainFeature::CaveMouth),
        FeatureAssignment::anchor(HIDDEN_CAVE, TerrainFeature::RockWall),
        FeatureAssignment::anchor(BAMBOO_STAND, TerrainFeature::TangleVines),
        FeatureAssignment::anchor(TIDE_POOLS, TerrainFeature::SlipperyRocks),
        FeatureAssignment::anchor(NORTH_RIDGE, TerrainFeature::CliffFace),
    ])
}

/// Validate the stock anchors against `geometry`.
///
/// # Errors
///
/// Returns [`WorldError`] if the geometry cannot hold the stock anchors
/// (for example, a configured island band that excludes one of them).
pub fn create_starting_manifest(geometry: &IslandGeometry) -> Result<AnchorManifest, WorldError> {
    AnchorManifest::new(starting_anchors(), geometry)
}

/// Build the stock island with the configured geometry.
///
/// # Errors
///
/// Returns [`WorldError`] if the configured geometry is invalid or cannot
/// hold the stock anchors.
pub fn create_starting_island(config: &IslandConfig) -> Result<IslandWorld, WorldError> {
    let geometry = config.geometry;
    geometry.validate()?;
    let manifest = create_starting_manifest(&geometry)?;
    let plan = starting_feature_plan();
    IslandBuilder::new(geometry, &manifest, &plan).build()
}
