use octsim::{build_simulation, ScenarioConfig, TrailRecorder};
use octsim::{bench_pairing, bench_pairing_curve};

use clap::Parser;
use anyhow::{Context, Result};
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Frames to run
    #[arg(long, default_value_t = 1000)]
    steps: u32,

    /// Wall time fed to the physics clock per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Points kept per trail
    #[arg(long, default_value_t = TrailRecorder::DEFAULT_TRAIL_LENGTH)]
    trail_length: usize,

    /// Run the pairing benchmark instead of a scenario
    #[arg(long)]
    bench: bool,

    /// Print the benchmark as CSV
    #[arg(long)]
    curve: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        if args.curve {
            bench_pairing_curve()?;
        } else {
            bench_pairing()?;
        }
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut sim = build_simulation(scenario_cfg)?;
    info!("loaded {} with {} bodies", args.file_name, sim.len());

    let mut trails = TrailRecorder::new(args.trail_length);
    let e0 = sim.total_energy();
    let p0 = sim.momentum();

    let mut updates = 0;
    let mut collisions = 0;
    for _ in 0..args.steps {
        let report = sim.step_with(args.dt, &mut trails);
        updates += report.updates;
        collisions += report.collisions;
    }

    let e1 = sim.total_energy();
    let p1 = sim.momentum();
    println!("t = {:.4}, updates = {updates}, collisions = {collisions}", sim.time());
    println!("energy {e0:.6} -> {e1:.6} (drift {:.3e})", e1 - e0);
    println!("momentum drift {:.3e}", (p1 - p0).norm());

    for handle in sim.handles() {
        let body = sim.body(handle)?;
        let trail_points = trails.trail(handle).map_or(0, |t| t.len());
        println!(
            "body {:3}: x = [{:9.4}, {:9.4}, {:9.4}]  v = [{:9.4}, {:9.4}, {:9.4}]  trail = {}",
            handle.index(),
            body.x.x, body.x.y, body.x.z,
            body.v.x, body.v.y, body.v.z,
            trail_points,
        );
    }

    Ok(())
}
