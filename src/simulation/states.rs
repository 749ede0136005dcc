//! Core state types for the simulation.
//!
//! - `Body`       physical state of one sphere plus its per-body policies
//! - `BodySpec`   the validated-on-creation input used to register a body
//! - `BodyHandle` stable index of a body inside the simulation registry
//!
//! Positions live purely in simulation space; any render scale is the
//! renderer's business.

use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::Deserialize;

use super::error::SimError;

pub type NVec3 = Vector3<f64>;

/// Index into the body registry. Bodies are never removed, so a handle stays
/// valid for the lifetime of the simulation that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Velocity response applied when two bodies overlap and approach
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionModel {
    /// Only the normal components exchange momentum (1-D restitution formula)
    #[default]
    ElasticKe,
    /// Single impulse along the contact normal
    Impulse,
    /// Merge to the common velocity, then add a restitution-scaled impulse
    InelasticHack,
}

/// How a body turns acceleration into motion
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationScheme {
    /// v then x (symplectic)
    #[default]
    SemiImplicit,
    /// x then v (forward Euler)
    Explicit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub a: NVec3, // acceleration, rebuilt every physics update
    pub m: f64, // mass
    pub radius: f64, // collision radius, also the gravity distance floor
    pub restitution: f64, // bounce effect in [0, 1]
    pub collision: CollisionModel,
    pub integration: IntegrationScheme,
}

impl Body {
    pub fn new(spec: BodySpec) -> Result<Self, SimError> {
        if !(spec.mass.is_finite() && spec.mass > 0.0) {
            return Err(SimError::InvalidMass(spec.mass));
        }
        if !(spec.radius.is_finite() && spec.radius > 0.0) {
            return Err(SimError::InvalidRadius(spec.radius));
        }
        check_restitution(spec.restitution)?;
        if !finite(&spec.position) {
            return Err(SimError::NonFiniteVector { field: "position" });
        }
        if !finite(&spec.velocity) {
            return Err(SimError::NonFiniteVector { field: "velocity" });
        }

        Ok(Self {
            x: spec.position,
            v: spec.velocity,
            a: NVec3::zeros(),
            m: spec.mass,
            radius: spec.radius,
            restitution: spec.restitution,
            collision: spec.collision,
            integration: spec.integration,
        })
    }

    /// Mass over sphere volume. Informational only
    pub fn density(&self) -> f64 {
        self.m / (4.0 / 3.0 * PI * self.radius.powi(3))
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn momentum(&self) -> NVec3 {
        self.m * self.v
    }
}

fn finite(v: &NVec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

pub(crate) fn check_restitution(value: f64) -> Result<f64, SimError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimError::InvalidRestitution(value))
    }
}

/// Everything needed to register a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub mass: f64,
    pub radius: f64,
    pub position: NVec3,
    pub velocity: NVec3,
    pub restitution: f64,
    pub collision: CollisionModel,
    pub integration: IntegrationScheme,
}

impl BodySpec {
    /// Body at rest at the origin with the default policies
    pub fn new(mass: f64, radius: f64) -> Self {
        Self {
            mass,
            radius,
            position: NVec3::zeros(),
            velocity: NVec3::zeros(),
            restitution: 0.0,
            collision: CollisionModel::default(),
            integration: IntegrationScheme::default(),
        }
    }

    pub fn at(mut self, position: NVec3) -> Self {
        self.position = position;
        self
    }

    pub fn moving(mut self, velocity: NVec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn collision(mut self, model: CollisionModel) -> Self {
        self.collision = model;
        self
    }

    pub fn integration(mut self, scheme: IntegrationScheme) -> Self {
        self.integration = scheme;
        self
    }
}
