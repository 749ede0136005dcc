//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – pairing mode, physics clock and octree settings
//! - [`ParametersConfig`] – physical constants and the global speed modifier
//! - [`BodyConfig`]       – initial state and policies of each body
//! - [`ScenarioConfig`]   – top-level wrapper loaded from YAML
//!
//! # YAML format
//! Two equal spheres about to collide head-on:
//!
//! ```yaml
//! engine:
//!   pairing: octree          # or brute_force
//!   clock:
//!     mode: fixed            # or variable (with max_dt)
//!     step: 0.01
//!     max_substeps: 10
//!   octree:
//!     max_depth: 5
//!     max_body_count: 4
//!     root_range: 50.0       # half extent of the root cube
//!     rebuild_interval: 1    # rebuild every N physics updates
//!     focus: 0               # centre the tree on body 0 (omit for origin)
//!
//! parameters:
//!   grav_constant: 0.0
//!   speed_modifier: 1.0
//!   softening: 0.0
//!
//! bodies:
//!   - x: [ -1.5, 0.0, 0.0 ]
//!     v: [  1.0, 0.0, 0.0 ]
//!     m: 1.0
//!     radius: 1.0
//!     restitution: 1.0
//!     collision: impulse     # elastic_ke | impulse | inelastic_hack
//!     integration: semi_implicit
//!   - x: [  1.5, 0.0, 0.0 ]
//!     v: [ -1.0, 0.0, 0.0 ]
//!     m: 1.0
//!     radius: 1.0
//! ```
//!
//! Omitted body policies fall back to restitution 0, `elastic_ke` and
//! `semi_implicit`.

use serde::Deserialize;

use crate::simulation::clock::{DEFAULT_MAX_DT, DEFAULT_MAX_SUBSTEPS};
use crate::simulation::engine::Pairing;
use crate::simulation::states::{CollisionModel, IntegrationScheme};

/// Physics clock selection
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClockConfig {
    /// One update per frame, clamped to `max_dt`
    Variable {
        #[serde(default = "default_max_dt")]
        max_dt: f64,
    },
    /// Accumulator drained in `step` sized updates
    Fixed {
        step: f64,
        #[serde(default = "default_max_substeps")]
        max_substeps: u32,
    },
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig::Variable { max_dt: DEFAULT_MAX_DT }
    }
}

fn default_max_dt() -> f64 {
    DEFAULT_MAX_DT
}

fn default_max_substeps() -> u32 {
    DEFAULT_MAX_SUBSTEPS
}

/// Octree partitioner settings; every field is optional
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OctreeSettings {
    pub max_depth: Option<usize>, // deepest node level
    pub max_body_count: Option<usize>, // bodies per node before splitting
    pub root_range: Option<f64>, // half extent of the root cube
    pub rebuild_interval: Option<u32>, // rebuild cadence in physics updates
    pub focus: Option<usize>, // index of the body to centre the root on
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub pairing: Pairing, // `octree` or `brute_force`
    #[serde(default)]
    pub clock: ClockConfig, // fixed or variable physics step
    #[serde(default)]
    pub octree: OctreeSettings, // partitioner knobs
}

/// Global physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    pub grav_constant: f64, // gravitational constant
    #[serde(default = "default_speed_modifier")]
    pub speed_modifier: f64, // scale on every integration step
    #[serde(default)]
    pub softening: f64, // extra minimum distance for gravity
}

fn default_speed_modifier() -> f64 {
    1.0
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position in simulation units
    #[serde(default)]
    pub v: Vec<f64>, // initial velocity, zero when omitted
    pub m: f64, // mass
    pub radius: f64, // collision radius
    #[serde(default)]
    pub restitution: f64, // bounce effect in [0, 1]
    #[serde(default)]
    pub collision: CollisionModel, // response model when this body is first in a pair
    #[serde(default)]
    pub integration: IntegrationScheme, // semi_implicit or explicit
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // pairing, clock and octree
    pub parameters: ParametersConfig, // physical constants
    pub bodies: Vec<BodyConfig>, // initial bodies, in registry order
}
