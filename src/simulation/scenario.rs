//! Build a ready-to-step `Simulation` from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime context:
//! - engine settings (`Engine`: pairing, octree, clock)
//! - physical parameters (`Parameters`)
//! - every configured body registered in file order
//! - the octree focus, once the focus body exists

use crate::configuration::config::{BodyConfig, ClockConfig, ScenarioConfig};
use crate::simulation::clock::ClockMode;
use crate::simulation::engine::{Engine, TreeCenter};
use crate::simulation::error::SimError;
use crate::simulation::octree::OctreeConfig;
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyHandle, BodySpec, NVec3};
use crate::simulation::world::Simulation;

pub fn build_simulation(cfg: ScenarioConfig) -> Result<Simulation, SimError> {
    // Engine (runtime) from EngineConfig
    let e_cfg = cfg.engine;
    let defaults = OctreeConfig::default();
    let octree = OctreeConfig {
        max_depth: e_cfg.octree.max_depth.unwrap_or(defaults.max_depth),
        max_body_count: e_cfg.octree.max_body_count.unwrap_or(defaults.max_body_count),
        root_range: e_cfg.octree.root_range.unwrap_or(defaults.root_range),
        rebuild_interval: e_cfg.octree.rebuild_interval.unwrap_or(defaults.rebuild_interval),
    };
    let clock = match e_cfg.clock {
        ClockConfig::Variable { max_dt } => ClockMode::Variable { max_dt },
        ClockConfig::Fixed { step, max_substeps } => ClockMode::Fixed { step, max_substeps },
    };
    let engine = Engine {
        pairing: e_cfg.pairing,
        octree,
        center: TreeCenter::Origin,
        clock,
    };

    // Parameters (runtime) from ParametersConfig
    let parameters = Parameters {
        grav_constant: cfg.parameters.grav_constant,
        speed_modifier: cfg.parameters.speed_modifier,
        softening: cfg.parameters.softening,
    };

    let mut sim = Simulation::new(engine, parameters)?;

    // Bodies: map `BodyConfig` -> `BodySpec` using nalgebra vectors
    for bc in &cfg.bodies {
        sim.create_body(body_spec(bc)?)?;
    }

    if let Some(focus) = e_cfg.octree.focus {
        sim.set_focus(Some(BodyHandle(focus)))?;
    }

    Ok(sim)
}

fn body_spec(bc: &BodyConfig) -> Result<BodySpec, SimError> {
    let velocity = if bc.v.is_empty() { NVec3::zeros() } else { vec3("v", &bc.v)? };
    Ok(BodySpec {
        mass: bc.m,
        radius: bc.radius,
        position: vec3("x", &bc.x)?,
        velocity,
        restitution: bc.restitution,
        collision: bc.collision,
        integration: bc.integration,
    })
}

fn vec3(field: &'static str, values: &[f64]) -> Result<NVec3, SimError> {
    match values {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::MalformedVector { field, len: values.len() }),
    }
}
