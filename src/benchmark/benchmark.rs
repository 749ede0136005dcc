use std::time::Instant;

use crate::simulation::engine::{Engine, Pairing};
use crate::simulation::error::SimError;
use crate::simulation::octree::OctreeConfig;
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodySpec, NVec3};
use crate::simulation::world::Simulation;

/// Helper to build a simulation of size `n` with the given pairing
fn make_simulation(n: usize, pairing: Pairing) -> Result<Simulation, SimError> {
    let engine = Engine {
        pairing,
        octree: OctreeConfig {
            max_depth: 6,
            max_body_count: 8,
            root_range: 8.0,
            rebuild_interval: 1,
        },
        ..Default::default()
    };
    let parameters = Parameters {
        grav_constant: 0.1,
        speed_modifier: 1.0,
        softening: 1e-2,
    };

    let mut sim = Simulation::new(engine, parameters)?;

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        sim.create_body(BodySpec::new(1.0, 0.01).at(x))?;
    }
    Ok(sim)
}

/// Time one physics update with brute-force and octree pairing
pub fn bench_pairing() -> Result<(), SimError> {
    let ns = [200, 400, 800, 1600, 3200];
    let steps = 3;

    for n in ns {
        let mut direct = make_simulation(n, Pairing::BruteForce)?;
        let mut tree = make_simulation(n, Pairing::Octree)?;

        // Warm up
        direct.advance(0.001);
        tree.advance(0.001);

        let t0 = Instant::now();
        for _ in 0..steps {
            direct.advance(0.001);
        }
        let direct_per_step = t0.elapsed().as_secs_f64() / steps as f64;

        let t1 = Instant::now();
        let mut pairs = 0;
        for _ in 0..steps {
            pairs = tree.advance(0.001).pairs;
        }
        let tree_per_step = t1.elapsed().as_secs_f64() / steps as f64;

        let nodes = tree.octree().map(|t| t.nodes().len()).unwrap_or(0);
        println!(
            "N = {n:5}, pairs = {pairs:8}, nodes = {nodes:5}, direct step = {direct_per_step:8.6} s, octree step = {tree_per_step:8.6} s"
        );
    }
    Ok(())
}

/// CSV of per-step cost over a finer range of N
pub fn bench_pairing_curve() -> Result<(), SimError> {
    println!("N,direct_ms,octree_ms");

    for n in (200..=3200).step_by(200) {
        let mut direct = make_simulation(n, Pairing::BruteForce)?;
        let mut tree = make_simulation(n, Pairing::Octree)?;

        let t0 = Instant::now();
        direct.advance(0.001);
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0;

        let t1 = Instant::now();
        tree.advance(0.001);
        let ms_tree = t1.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_tree);
    }
    Ok(())
}
