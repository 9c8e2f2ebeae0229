use gravsim::{bench_euler, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Step an n-body scenario with explicit Euler integration")]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Override the scenario's step count
    #[arg(long)]
    steps: Option<usize>,

    /// Time the integrator instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_yaml_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_euler()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    if let Some(steps) = args.steps {
        scenario.steps = steps;
    }

    scenario.run().context("simulation step failed")?;

    info!(t = scenario.system.t, "finished");
    for body in &scenario.system.bodies {
        let (x, v) = (body.position(), body.velocity());
        info!(
            body = %body.label(),
            m = body.mass(),
            x = ?[x.x, x.y, x.z],
            v = ?[v.x, v.y, v.z],
            "final state"
        );
    }

    Ok(())
}
