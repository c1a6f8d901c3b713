use vlmsim::{Scenario, ScenarioConfig};
use vlmsim::{bench_accumulation, bench_relaxation_curve};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "tandem.yaml")]
    file_name: String,

    /// Time the accumulation pass instead of running a scenario
    #[arg(long)]
    bench: bool,
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
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_accumulation();
        bench_relaxation_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    log::info!(
        "running {} relaxation steps on {} panels",
        scenario.parameters.iterations,
        scenario.lattice.len()
    );

    let summary = scenario.run()?;

    println!("panel,strength");
    for (i, s) in summary.strengths.iter().enumerate() {
        println!("{},{:.9}", i, s);
    }
    if let Some(r) = summary.final_residual() {
        log::info!("final max residual = {:.6e}", r);
    }

    Ok(())
}
