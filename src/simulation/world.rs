//! The simulation context and its step driver
//!
//! `Simulation` owns the body registry, the octree and the physics clock.
//! One call to [`Simulation::step`] per rendered frame:
//!
//! 1. the clock turns elapsed time into zero or more physics updates,
//! 2. each update zeroes accelerations, rebuilds the octree when due,
//!    evaluates gravity and collisions for every pair, then integrates
//!    every body with `dt * speed_modifier`,
//! 3. [`Simulation::step_with`] finally reports each body to a `FrameSink`.
//!
//! All pair contributions of an update are accumulated before any body is
//! integrated.

use log::warn;

use super::clock::{ClockMode, PhysicsClock};
use super::collision::{resolve_collision, Contact};
use super::engine::{Engine, Pairing, TreeCenter};
use super::error::SimError;
use super::forces::{for_each_pair_brute, pair_mut, NewtonianGravity};
use super::integrator::integrate;
use super::observer::FrameSink;
use super::octree::{NodeBox, Octree};
use super::params::Parameters;
use super::states::{check_restitution, Body, BodyHandle, BodySpec, CollisionModel, IntegrationScheme, NVec3};

/// Counters for one call to `step`/`advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub updates: u32, // physics updates run
    pub pairs: usize, // pair evaluations
    pub collisions: usize, // overlapping pairs resolved
    pub skipped_pairs: usize, // collisions skipped as invalid
}

impl StepReport {
    fn absorb(&mut self, other: StepReport) {
        self.updates += other.updates;
        self.pairs += other.pairs;
        self.collisions += other.collisions;
        self.skipped_pairs += other.skipped_pairs;
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    engine: Engine,
    parameters: Parameters,
    bodies: Vec<Body>,
    clock: PhysicsClock,
    octree: Option<Octree>, // None forces a rebuild on the next update
    updates_since_rebuild: u32,
    t: f64, // physics time, already scaled by speed_modifier
}

impl Simulation {
    pub fn new(engine: Engine, parameters: Parameters) -> Result<Self, SimError> {
        parameters.validate()?;
        engine.octree.validate()?;
        if let TreeCenter::Focus(handle) = engine.center {
            // registry is still empty
            return Err(SimError::UnknownBody(handle));
        }
        let clock = PhysicsClock::new(engine.clock)?;

        Ok(Self {
            engine,
            parameters,
            bodies: Vec::new(),
            clock,
            octree: None,
            updates_since_rebuild: 0,
            t: 0.0,
        })
    }

    /// Register a body; it joins the pair set from the next update on
    pub fn create_body(&mut self, spec: BodySpec) -> Result<BodyHandle, SimError> {
        let body = Body::new(spec)?;
        let handle = BodyHandle(self.bodies.len());
        self.bodies.push(body);
        self.octree = None;
        Ok(handle)
    }

    // stepping ===========================================================================

    /// Advance by `elapsed` seconds of wall time through the physics clock
    pub fn step(&mut self, elapsed: f64) -> StepReport {
        let ticks = self.clock.advance(elapsed);
        let mut report = StepReport::default();
        for _ in 0..ticks.count {
            report.absorb(self.advance(ticks.dt));
        }
        report
    }

    /// [`Simulation::step`], then report every body to `sink`
    pub fn step_with<S>(&mut self, elapsed: f64, sink: &mut S) -> StepReport
    where
        S: FrameSink + ?Sized,
    {
        let report = self.step(elapsed);
        for (i, body) in self.bodies.iter().enumerate() {
            sink.body_updated(BodyHandle(i), body);
        }
        sink.frame_finished();
        report
    }

    /// Run exactly one physics update of `dt` seconds, bypassing the clock
    pub fn advance(&mut self, dt: f64) -> StepReport {
        let mut report = StepReport { updates: 1, ..Default::default() };

        for b in self.bodies.iter_mut() {
            b.a = NVec3::zeros();
        }

        let gravity = self.gravity();
        match self.engine.pairing {
            Pairing::BruteForce => {
                let bodies = &mut self.bodies;
                for_each_pair_brute(bodies.len(), |i, j| interact(bodies, &gravity, i, j, &mut report));
            }
            Pairing::Octree => {
                self.refresh_octree();
                let bodies = &mut self.bodies;
                if let Some(tree) = self.octree.as_ref() {
                    tree.for_each_pair(|i, j| interact(bodies, &gravity, i, j, &mut report));
                }
            }
        }

        let dt = dt * self.parameters.speed_modifier;
        for b in self.bodies.iter_mut() {
            integrate(b, dt);
        }
        self.t += dt;

        report
    }

    fn refresh_octree(&mut self) {
        let due = self.octree.is_none() || self.updates_since_rebuild >= self.engine.octree.rebuild_interval;
        if due {
            let center = self.tree_center();
            self.octree = Some(Octree::build(&self.bodies, &self.engine.octree, center));
            self.updates_since_rebuild = 0;
        }
        self.updates_since_rebuild += 1;
    }

    fn tree_center(&self) -> NVec3 {
        match self.engine.center {
            TreeCenter::Origin => NVec3::zeros(),
            TreeCenter::Focus(handle) => self.bodies.get(handle.0).map(|b| b.x).unwrap_or_else(NVec3::zeros),
        }
    }

    fn gravity(&self) -> NewtonianGravity {
        NewtonianGravity {
            grav_constant: self.parameters.grav_constant,
            softening: self.parameters.softening,
        }
    }

    // runtime tuning =====================================================================

    pub fn set_grav_constant(&mut self, value: f64) -> Result<(), SimError> {
        if !value.is_finite() {
            return Err(SimError::InvalidParameter { name: "grav_constant", value });
        }
        self.parameters.grav_constant = value;
        Ok(())
    }

    pub fn set_speed_modifier(&mut self, value: f64) -> Result<(), SimError> {
        if !(value.is_finite() && value >= 0.0) {
            return Err(SimError::InvalidParameter { name: "speed_modifier", value });
        }
        self.parameters.speed_modifier = value;
        Ok(())
    }

    pub fn set_max_depth(&mut self, value: usize) {
        self.engine.octree.max_depth = value;
        self.octree = None;
    }

    pub fn set_max_body_count(&mut self, value: usize) -> Result<(), SimError> {
        if value < 1 {
            return Err(SimError::InvalidMaxBodyCount(value));
        }
        self.engine.octree.max_body_count = value;
        self.octree = None;
        Ok(())
    }

    pub fn set_rebuild_interval(&mut self, value: u32) -> Result<(), SimError> {
        if value < 1 {
            return Err(SimError::InvalidRebuildInterval(value));
        }
        self.engine.octree.rebuild_interval = value;
        Ok(())
    }

    pub fn set_root_range(&mut self, value: f64) -> Result<(), SimError> {
        if !(value.is_finite() && value > 0.0) {
            return Err(SimError::InvalidParameter { name: "root_range", value });
        }
        self.engine.octree.root_range = value;
        self.octree = None;
        Ok(())
    }

    pub fn set_pairing(&mut self, pairing: Pairing) {
        self.engine.pairing = pairing;
        self.octree = None;
    }

    /// Centre the octree on a body, or on the origin with `None`
    pub fn set_focus(&mut self, focus: Option<BodyHandle>) -> Result<(), SimError> {
        self.engine.center = match focus {
            Some(handle) => {
                self.body(handle)?;
                TreeCenter::Focus(handle)
            }
            None => TreeCenter::Origin,
        };
        self.octree = None;
        Ok(())
    }

    /// Swap the clock mode; any fixed-step backlog is discarded
    pub fn set_clock(&mut self, mode: ClockMode) -> Result<(), SimError> {
        self.clock = PhysicsClock::new(mode)?;
        self.engine.clock = mode;
        Ok(())
    }

    pub fn set_collision_model(&mut self, handle: BodyHandle, model: CollisionModel) -> Result<(), SimError> {
        self.body_mut(handle)?.collision = model;
        Ok(())
    }

    pub fn set_restitution(&mut self, handle: BodyHandle, value: f64) -> Result<(), SimError> {
        let value = check_restitution(value)?;
        self.body_mut(handle)?.restitution = value;
        Ok(())
    }

    pub fn set_integration_scheme(&mut self, handle: BodyHandle, scheme: IntegrationScheme) -> Result<(), SimError> {
        self.body_mut(handle)?.integration = scheme;
        Ok(())
    }

    // accessors ==========================================================================

    pub fn body(&self, handle: BodyHandle) -> Result<&Body, SimError> {
        self.bodies.get(handle.0).ok_or(SimError::UnknownBody(handle))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, SimError> {
        self.bodies.get_mut(handle.0).ok_or(SimError::UnknownBody(handle))
    }

    pub fn position(&self, handle: BodyHandle) -> Result<NVec3, SimError> {
        self.body(handle).map(|b| b.x)
    }

    pub fn velocity(&self, handle: BodyHandle) -> Result<NVec3, SimError> {
        self.body(handle).map(|b| b.v)
    }

    pub fn mass(&self, handle: BodyHandle) -> Result<f64, SimError> {
        self.body(handle).map(|b| b.m)
    }

    pub fn radius(&self, handle: BodyHandle) -> Result<f64, SimError> {
        self.body(handle).map(|b| b.radius)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> {
        (0..self.bodies.len()).map(BodyHandle)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Physics time simulated so far
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Position of the focus body, for a camera to follow
    pub fn focus_position(&self) -> Option<NVec3> {
        match self.engine.center {
            TreeCenter::Focus(handle) => self.position(handle).ok(),
            TreeCenter::Origin => None,
        }
    }

    /// Current octree, if pairing through one has run since the last change
    pub fn octree(&self) -> Option<&Octree> {
        self.octree.as_ref()
    }

    /// Node cubes of the current octree, for debug drawing only
    pub fn octree_boxes(&self) -> Vec<NodeBox> {
        self.octree.as_ref().map(|t| t.boxes().collect()).unwrap_or_default()
    }

    // diagnostics ========================================================================

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn potential_energy(&self) -> f64 {
        let gravity = self.gravity();
        let mut total = 0.0;
        for_each_pair_brute(self.bodies.len(), |i, j| {
            total += gravity.pair_potential(&self.bodies[i], &self.bodies[j]);
        });
        total
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    pub fn momentum(&self) -> NVec3 {
        self.bodies.iter().map(Body::momentum).sum()
    }
}

/// Gravity then collision for one pair, `i < j`
fn interact(bodies: &mut [Body], gravity: &NewtonianGravity, i: usize, j: usize, report: &mut StepReport) {
    let (b1, b2) = pair_mut(bodies, i, j);
    gravity.accumulate_pair(b1, b2);

    match resolve_collision(b1, b2, (i, j)) {
        Ok(Contact::Apart) => {}
        Ok(Contact::Separating | Contact::Resolved) => report.collisions += 1,
        Err(err) => {
            warn!("skipping collision this tick: {err}");
            report.skipped_pairs += 1;
        }
    }
    report.pairs += 1;
}
