use solsim::{ScenarioConfig, Scenario, BodyCategory};
use solsim::{bench_gravity, bench_nbody_step, bench_kepler};
use solsim::simulation::constants::{AU, DAY};
use solsim::simulation::scenario::MAX_STEPS;

use clap::Parser;
use anyhow::{bail, Context, Result};
use tracing::{info, Level};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "solar_system.yaml")]
    file_name: String,

    /// Override the number of steps from the scenario
    #[arg(long)]
    steps: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run the benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if args.bench {
        bench_gravity();
        bench_nbody_step();
        bench_kepler();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;
    let steps = args.steps.unwrap_or(scenario.steps);
    if steps > MAX_STEPS {
        bail!("{steps} steps requested, the limit is {MAX_STEPS}");
    }

    let trajectory = scenario.simulation.run(steps);

    for track in trajectory.tracks.iter().filter(|t| t.category == BodyCategory::Primary) {
        if let Some(last) = track.points.last() {
            info!(
                body = %track.name,
                x_au = last.x / AU,
                y_au = last.y / AU,
                z_au = last.z / AU,
                "final position"
            );
        }
    }
    info!(
        days = trajectory.times.last().copied().unwrap_or(0.0) / DAY,
        central_mass = scenario.simulation.constants().central_mass,
        "done"
    );

    Ok(())
}
