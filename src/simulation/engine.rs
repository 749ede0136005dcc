//! High-level runtime engine settings
//!
//! Selects how pairs are enumerated, how the octree is built and how wall
//! time becomes physics updates

use serde::Deserialize;

use super::clock::ClockMode;
use super::octree::OctreeConfig;
use super::states::BodyHandle;

/// How the step driver enumerates body pairs
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    /// Plain i < j scan over the registry
    BruteForce,
    /// Octree traversal, same pair set
    #[default]
    Octree,
}

/// Where the octree root cube is centred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeCenter {
    #[default]
    Origin,
    Focus(BodyHandle),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Engine {
    pub pairing: Pairing, // brute force or octree
    pub octree: OctreeConfig, // partitioner settings
    pub center: TreeCenter, // octree root placement
    pub clock: ClockMode, // fixed or variable step
}
