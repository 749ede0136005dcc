pub mod states;
pub mod params;
pub mod engine;
pub mod error;
pub mod forces;
pub mod collision;
pub mod integrator;
pub mod octree;
pub mod clock;
pub mod observer;
pub mod world;
pub mod scenario;
