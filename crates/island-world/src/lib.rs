//! Island generation: geometry, anchors, gardening, and connectivity repair.
//!
//! This crate turns a small set of hand-authored anchor tiles into a fully
//! populated island grid and proves the result is traversable. The pipeline
//! runs once per island, synchronously:
//!
//! anchor manifest -> weighted tile synthesis -> feature overlay and
//! difficulty smoothing -> coverage walk and relaxation -> creation report.
//!
//! # Modules
//!
//! - [`builder`] -- [`IslandBuilder`] runs every pass in order and returns
//!   an [`IslandWorld`].
//! - [`config`] -- YAML configuration with environment overrides.
//! - [`creation_report`] -- Read-only statistics and the readiness verdict.
//! - [`error`] -- Error types for manifest validation and map edits.
//! - [`features`] -- Hand-specified terrain features and the main path.
//! - [`gardener`] -- Coverage walk from spawn with bounded hazard
//!   relaxation.
//! - [`gardening`] -- Weighted synthesis of every non-anchor cell.
//! - [`geometry`] -- World envelope, island band, and plot classification.
//! - [`island_map`] -- The grid: tiles by position and id, with BFS and
//!   least-effort queries.
//! - [`manifest`] -- Validated, immutable anchor set.
//! - [`smoothing`] -- Single-sweep neighbor difficulty clamp.
//! - [`starting_island`] -- Default 12-anchor island and feature plan.

pub mod builder;
pub mod config;
pub mod creation_report;
pub mod error;
pub mod features;
pub mod gardener;
pub mod gardening;
pub mod geometry;
pub mod island_map;
pub mod manifest;
pub mod smoothing;
pub mod starting_island;

// Re-export primary types at crate root.
pub use builder::{IslandBuilder, IslandWorld};
pub use config::{ConfigError, IslandConfig};
pub use creation_report::{build_creation_report, log_creation_report};
pub use error::WorldError;
pub use features::{FeatureAssignment, FeaturePlan, FeatureTarget};
pub use gardener::{MAX_RELAX_CYCLES, RELAX_BUDGET};
pub use geometry::IslandGeometry;
pub use island_map::IslandMap;
pub use manifest::AnchorManifest;
pub use starting_island::{create_starting_island, create_starting_manifest};
