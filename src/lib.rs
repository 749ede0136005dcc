pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, BodyHandle, BodySpec, CollisionModel, IntegrationScheme, NVec3};
pub use simulation::error::SimError;
pub use simulation::params::Parameters;
pub use simulation::engine::{Engine, Pairing, TreeCenter};
pub use simulation::clock::{ClockMode, PhysicsClock, Ticks};
pub use simulation::forces::NewtonianGravity;
pub use simulation::collision::{resolve_collision, Contact};
pub use simulation::octree::{NodeBox, Octree, OctreeConfig, OctreeNode};
pub use simulation::observer::{FrameSink, TrailRecorder};
pub use simulation::world::{Simulation, StepReport};
pub use simulation::scenario::build_simulation;

pub use configuration::config::{ClockConfig, EngineConfig, OctreeSettings, ParametersConfig, BodyConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_pairing, bench_pairing_curve};
