//! Tile synthesis: planting every eligible cell from nearby anchors.
//!
//! Each non-anchor island cell takes its biome, region and elevation by a
//! weighted vote of the anchors around it. Difficulty and flora follow from
//! the winning biome. The ring between the island band and the world
//! envelope becomes open sea.

use std::collections::BTreeSet;

use island_types::{
    AnchorTile, Biome, Elevation, FloraDensity, FloraKind, IslandTile, PlotClass, Position, Region,
    TerrainDifficulty, TileContext, TileId, TileKind, TileSafety,
};
use tracing::debug;

use crate::error::WorldError;
use crate::geometry::IslandGeometry;
use crate::island_map::IslandMap;
use crate::manifest::AnchorManifest;

/// Anchors farther than this (Chebyshev) do not vote, unless none are closer.
pub const VOTE_RADIUS: u32 = 2;

/// Baseline difficulty of a biome.
pub const fn default_difficulty(biome: Biome) -> TerrainDifficulty {
    match biome {
        Biome::Beach | Biome::Camp => TerrainDifficulty::Easy,
        Biome::LightForest | Biome::Jungle | Biome::Rocky | Biome::Cave => {
            TerrainDifficulty::Normal
        }
        Biome::BambooGrove | Biome::VineThicket | Biome::Stream => TerrainDifficulty::Hard,
        Biome::Waterfall | Biome::Cliff | Biome::Ocean => TerrainDifficulty::Extreme,
    }
}

/// Safety of a gardened cell, decided by where it sits in the island band.
///
/// The two southern corners of the band are dead ground (tidal flats); the
/// two northern corners are sheer and impossible.
pub const fn safety_for_position(geometry: &IslandGeometry, position: Position) -> TileSafety {
    let island = geometry.island;
    if position.y == island.min_y
        && (position.x <= island.min_x.saturating_add(1)
            || position.x >= island.max_x.saturating_sub(1))
    {
        TileSafety::Dead
    } else if position.y == island.max_y
        && (position.x == island.min_x || position.x == island.max_x)
    {
        TileSafety::Impossible
    } else {
        TileSafety::Normal
    }
}

/// Primary flora, secondary flora, and density for a biome in a region.
pub const fn flora_for(biome: Biome, region: Region) -> (FloraKind, Option<FloraKind>, FloraDensity) {
    let (primary, secondary, density) = match biome {
        Biome::Beach => (FloraKind::Palm, Some(FloraKind::DuneGrass), FloraDensity::Sparse),
        Biome::Camp => (FloraKind::DuneGrass, Some(FloraKind::Shrub), FloraDensity::Sparse),
        Biome::LightForest => (FloraKind::Palm, Some(FloraKind::Fern), FloraDensity::Moderate),
        Biome::Jungle => (FloraKind::Vine, Some(FloraKind::Fern), FloraDensity::Dense),
        Biome::BambooGrove => (FloraKind::Bamboo, Some(FloraKind::Fern), FloraDensity::Dense),
        Biome::VineThicket => (FloraKind::Vine, Some(FloraKind::Bamboo), FloraDensity::Dense),
        Biome::Stream => (FloraKind::Reed, Some(FloraKind::Moss), FloraDensity::Moderate),
        Biome::Waterfall => (FloraKind::Moss, Some(FloraKind::Fern), FloraDensity::Moderate),
        Biome::Cliff => (FloraKind::Lichen, None, FloraDensity::Sparse),
        Biome::Rocky => (FloraKind::Lichen, Some(FloraKind::Shrub), FloraDensity::Sparse),
        Biome::Cave => (FloraKind::Moss, None, FloraDensity::Sparse),
        Biome::Ocean => (FloraKind::Barren, None, FloraDensity::Barren),
    };
    let density = match region {
        Region::Highland => density.thinner(),
        Region::Interior => density.thicker(),
        Region::Shore | Region::Lowland | Region::Sea => density,
    };
    (primary, secondary, density)
}

const fn biome_phrase(biome: Biome) -> &'static str {
    match biome {
        Biome::Beach => "Pale sand runs",
        Biome::Camp => "Trampled ground spreads",
        Biome::LightForest => "Open palm woods stand",
        Biome::Jungle => "Dense jungle crowds",
        Biome::BambooGrove => "Bamboo creaks",
        Biome::VineThicket => "A thicket of vines knots",
        Biome::Stream => "A shallow stream winds",
        Biome::Waterfall => "Spray hangs in the air",
        Biome::Cliff => "Bare rock drops away",
        Biome::Rocky => "Broken rock lies scattered",
        Biome::Cave => "Dark stone overhangs",
        Biome::Ocean => "Open water stretches",
    }
}

/// Weight of an anchor's vote at Chebyshev distance `distance`.
const fn vote_weight(distance: u32) -> u32 {
    match distance {
        0 | 1 => 3,
        2 => 2,
        _ => 1,
    }
}

/// Weighted plurality over `(value, weight)` pairs. Ties go to the value
/// seen first.
fn plurality<T: Copy + PartialEq>(votes: impl IntoIterator<Item = (T, u32)>) -> Option<T> {
    let mut tally: Vec<(T, u32)> = Vec::new();
    for (value, weight) in votes {
        if let Some(entry) = tally.iter_mut().find(|(v, _)| *v == value) {
            entry.1 = entry.1.saturating_add(weight);
        } else {
            tally.push((value, weight));
        }
    }

    let mut best: Option<(T, u32)> = None;
    for (value, total) in tally {
        if best.is_none_or(|(_, top)| total > top) {
            best = Some((value, total));
        }
    }
    best.map(|(value, _)| value)
}

/// Build the tile for an eligible, non-anchor cell.
///
/// Returns `None` for anchor cells, cells outside the island band, and an
/// empty manifest.
pub fn synthesize_tile(
    geometry: &IslandGeometry,
    manifest: &AnchorManifest,
    position: Position,
) -> Option<IslandTile> {
    if geometry.classify(position) != PlotClass::IslandEligible
        || manifest.anchor_at(position).is_some()
    {
        return None;
    }

    // Stable sort keeps manifest order among equidistant anchors.
    let mut ranked: Vec<(&AnchorTile, u32)> = manifest
        .anchors()
        .map(|a| (a, a.position.chebyshev(position)))
        .collect();
    ranked.sort_by_key(|&(_, distance)| distance);

    let near: Vec<(&AnchorTile, u32)> = ranked
        .iter()
        .copied()
        .filter(|&(_, distance)| distance <= VOTE_RADIUS)
        .collect();
    let voters = if near.is_empty() { &ranked } else { &near };

    let biome = plurality(voters.iter().map(|(a, d)| (a.biome, vote_weight(*d))))?;
    let region = plurality(voters.iter().map(|(a, d)| (a.region, vote_weight(*d))))?;
    let elevation = plurality(voters.iter().map(|(a, d)| (a.elevation, vote_weight(*d))))?;

    let description = match ranked.as_slice() {
        [] => return None,
        [(only, _)] => format!("{} near {}.", biome_phrase(biome), only.name),
        [(first, _), (second, _), ..] => format!(
            "{} between {} and {}.",
            biome_phrase(biome),
            first.name,
            second.name
        ),
    };

    let safety = safety_for_position(geometry, position);
    let (flora_primary, flora_secondary, flora_density) = flora_for(biome, region);

    Some(IslandTile {
        tile_id: TileId::gardened(position),
        kind: TileKind::Gardened,
        position,
        biome,
        region,
        elevation,
        difficulty: default_difficulty(biome),
        safety,
        walkable: safety != TileSafety::Impossible,
        features: BTreeSet::new(),
        flora_primary,
        flora_secondary,
        flora_density,
        context: TileContext::new(description),
    })
}

/// The tile for an anchor cell. Anchors are always safe ground.
pub fn anchor_tile(anchor: &AnchorTile) -> IslandTile {
    let (flora_primary, flora_secondary, flora_density) = flora_for(anchor.biome, anchor.region);
    IslandTile {
        tile_id: anchor.id.clone(),
        kind: TileKind::Anchor,
        position: anchor.position,
        biome: anchor.biome,
        region: anchor.region,
        elevation: anchor.elevation,
        difficulty: default_difficulty(anchor.biome),
        safety: TileSafety::Normal,
        walkable: true,
        features: BTreeSet::new(),
        flora_primary,
        flora_secondary,
        flora_density,
        context: TileContext::new(anchor.description.clone()),
    }
}

/// The tile for a boundary cell: impassable open sea.
pub fn boundary_tile(position: Position) -> IslandTile {
    IslandTile {
        tile_id: TileId::boundary(position),
        kind: TileKind::Boundary,
        position,
        biome: Biome::Ocean,
        region: Region::Sea,
        elevation: Elevation::SeaLevel,
        difficulty: TerrainDifficulty::Extreme,
        safety: TileSafety::Impossible,
        walkable: false,
        features: BTreeSet::new(),
        flora_primary: FloraKind::Barren,
        flora_secondary: None,
        flora_density: FloraDensity::Barren,
        context: TileContext::new("Open water stretches past the reef."),
    }
}

/// Plant the whole envelope: anchors, gardened cells, and the sea ring.
///
/// # Errors
///
/// Returns [`WorldError`] if two tiles collide, which a validated manifest
/// rules out.
pub fn plant_island(
    geometry: &IslandGeometry,
    manifest: &AnchorManifest,
) -> Result<IslandMap, WorldError> {
    let mut map = IslandMap::new();

    for anchor in manifest.anchors() {
        map.insert(anchor_tile(anchor))?;
    }

    let mut gardened = 0_u32;
    for position in geometry.eligible_positions() {
        if let Some(tile) = synthesize_tile(geometry, manifest, position) {
            map.insert(tile)?;
            gardened = gardened.saturating_add(1);
        }
    }

    let mut boundary = 0_u32;
    for position in geometry.boundary_positions() {
        map.insert(boundary_tile(position))?;
        boundary = boundary.saturating_add(1);
    }

    debug!(
        anchors = manifest.len(),
        gardened,
        boundary,
        "island planted"
    );
    Ok(map)
}
