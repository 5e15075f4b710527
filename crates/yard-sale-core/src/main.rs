//! Yard Sale Simulation
//!
//! Runs the extended yard sale model from a TOML config and command line
//! overrides, prints a summary and optionally exports a JSON report.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use yard_sale_core::config::{consecutive_seeds, DEFAULT_CONFIG_PATH};
use yard_sale_core::output::{
    build_batch_report, build_run_report, write_batch_report, write_run_report,
};
use yard_sale_core::{run_batch, SaleConfig, YardSaleEngine};
use yard_sale_events::DistributionMetrics;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "yard_sale")]
#[command(about = "Extended yard sale wealth simulation")]
struct Args {
    /// TOML config file (defaults to yard_sale.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to simulate
    #[arg(long)]
    rounds: Option<u64>,

    /// Rounds between wealth snapshots
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Do not record snapshots
    #[arg(long)]
    no_snapshots: bool,

    /// Number of agents in a uniform population
    #[arg(long)]
    agents: Option<usize>,

    /// Starting wealth of every agent in a uniform population
    #[arg(long)]
    initial_wealth: Option<f64>,

    /// Share of the poorer agent's wealth exchanged per trade
    #[arg(long)]
    win_percentage: Option<f64>,

    /// Wealth tax rate for agents above the mean
    #[arg(long)]
    chi: Option<f64>,

    /// Bias towards the richer agent per unit of wealth gap
    #[arg(long)]
    zeta: Option<f64>,

    /// Debt floor as a multiple of mean wealth
    #[arg(long)]
    kappa: Option<f64>,

    /// Run this many independent seeds starting at --seed
    #[arg(long)]
    batch: Option<u64>,

    /// Write the JSON report to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn load_config(&self) -> Result<SaleConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SaleConfig::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    SaleConfig::from_file(&default_path)?
                } else {
                    SaleConfig::default()
                }
            }
        };

        if let Some(seed) = self.seed {
            config.run.seed = seed;
        }
        if let Some(rounds) = self.rounds {
            config.run.rounds = rounds;
        }
        if let Some(interval) = self.snapshot_interval {
            config.run.snapshot_interval = interval;
        }
        if self.no_snapshots {
            config.run.collect_snapshots = false;
        }
        if let Some(agents) = self.agents {
            config.population.agents = agents;
        }
        if let Some(wealth) = self.initial_wealth {
            config.population.initial_wealth = wealth;
        }
        if let Some(win_percentage) = self.win_percentage {
            config.model.win_percentage = win_percentage;
        }
        if let Some(chi) = self.chi {
            config.model.chi = chi;
        }
        if let Some(zeta) = self.zeta {
            config.model.zeta = zeta;
        }
        if let Some(kappa) = self.kappa {
            config.model.kappa = kappa;
        }
        if let Some(batch) = self.batch {
            config.run.batch_seeds = consecutive_seeds(config.run.seed, batch)?;
        }
        Ok(config)
    }
}

fn print_metrics(label: &str, metrics: &DistributionMetrics) {
    let gini = metrics
        .gini
        .map(|g| format!("{:.4}", g))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "  {:<8} gini {}  mean {:.2}  median {:.2}  min {:.2}  max {:.2}  in debt {}",
        label,
        gini,
        metrics.mean_wealth,
        metrics.median_wealth,
        metrics.min_wealth,
        metrics.max_wealth,
        metrics.agents_in_debt
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.load_config()?;
    let params = config.model_params();
    let ledger = config.build_ledger()?;

    println!("Extended Yard Sale");
    println!("==================");
    println!("Agents: {}", ledger.len());
    println!("Rounds: {}", params.rounds);
    println!(
        "win_percentage {}  chi {}  zeta {}  kappa {}",
        params.win_percentage, params.chi, params.zeta, params.kappa
    );
    println!();

    let run = &config.run;
    if !run.batch_seeds.is_empty() {
        info!(seeds = run.batch_seeds.len(), "running batch");
        let runs = run_batch(
            &ledger,
            params,
            &run.batch_seeds,
            run.snapshot_interval,
            run.collect_snapshots,
        )?;
        let report = build_batch_report(&params, &ledger, &runs);

        for run_report in &report.runs {
            print_metrics(&format!("seed {}", run_report.parameters.seed), &run_report.final_metrics);
        }
        if let Some(mean) = report.mean_final_gini() {
            println!("Mean final gini: {:.4}", mean);
        }

        if let Some(path) = &args.output {
            write_batch_report(&report, path)?;
            println!("Wrote batch report to {}", path.display());
        }
        return Ok(());
    }

    let initial_metrics = ledger.metrics();
    let mut engine = YardSaleEngine::new(ledger, params)?;
    let history = engine.run_configured(run.snapshot_interval, run.collect_snapshots)?;
    let report = build_run_report(
        &params,
        initial_metrics,
        engine.ledger(),
        engine.rounds_completed(),
        &history,
    );

    print_metrics("start", &report.initial_metrics);
    for snapshot in &report.snapshots {
        print_metrics(&format!("r{}", snapshot.round), &snapshot.metrics);
    }
    print_metrics("final", &report.final_metrics);

    if let Some(path) = &args.output {
        write_run_report(&report, path)?;
        println!("Wrote report to {}", path.display());
    }
    Ok(())
}
