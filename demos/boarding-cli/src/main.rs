//! Command-line front end for the rust_boarding simulator.
//!
//! ```text
//! boarding run --rows 33 --seats 6 --policy 2 --late-percent 10 --seed 7
//! boarding run --policy four-groups --trace > trace.csv
//! boarding compare --trials 20 > summary.csv
//! ```

mod logger;
mod output;


use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use bd_order::{BagModel, BoardingPolicy, LateMode};
use bd_sim::{
    initialize, BinModel, BoardingConfig, NoopObserver, SeatInterference, StowModel, StowPoint,
};

use output::{RunObserver, RunSummary, TrialStats};

#[derive(Parser)]
#[command(name = "boarding")]
#[command(about = "Tick-based airplane boarding simulator", long_about = None)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Board one flight and report the tick count
    Run {
        #[command(flatten)]
        cabin: CabinArgs,

        /// Boarding policy: 0-5 or its name (e.g. "window-to-aisle")
        #[arg(long, default_value = "0")]
        policy: BoardingPolicy,

        /// Master RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Print a per-tick CSV of every passenger to stdout
        #[arg(long, conflicts_with = "json")]
        trace: bool,

        /// Print the configuration and final report as JSON
        #[arg(long)]
        json: bool,

        /// Sleep this many milliseconds between ticks
        #[arg(long, default_value_t = 0)]
        pace_ms: u64,
    },

    /// Run every policy over several seeds and print a CSV summary
    Compare {
        #[command(flatten)]
        cabin: CabinArgs,

        /// Seeds per policy
        #[arg(long, default_value_t = 10)]
        trials: u64,

        /// First seed; trial `k` uses `seed + k`
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

/// Settings shared by every subcommand.
#[derive(Args)]
struct CabinArgs {
    #[arg(long, default_value_t = 33)]
    rows: u16,

    /// Seats per row (even)
    #[arg(long, default_value_t = 6)]
    seats: u8,

    /// Percentage of passengers arriving late (0-100)
    #[arg(long, default_value_t = 0.0)]
    late_percent: f64,

    /// "immediate" (interleaved) or "after" (after everyone else)
    #[arg(long, default_value = "immediate")]
    late_mode: LateMode,

    /// Carry-on bags per passenger are drawn from 0..=max-bags
    #[arg(long, default_value_t = 2)]
    max_bags: u8,

    #[arg(long, default_value_t = 2)]
    ticks_per_bag: u32,

    /// Where bags are stowed: "seat" or "aisle"
    #[arg(long, default_value = "seat")]
    stow_at: StowPoint,

    /// Ticks lost per seated passenger between the aisle and one's seat
    #[arg(long, default_value_t = 1)]
    interference_ticks: u32,

    /// Overhead-bin capacity per row in bags, with `--stow-at aisle`
    /// (unlimited when omitted)
    #[arg(long)]
    bin_capacity: Option<u32>,
}

impl CabinArgs {
    fn config(&self, policy: BoardingPolicy, seed: u64) -> BoardingConfig {
        BoardingConfig {
            rows:          self.rows,
            seats_per_row: self.seats,
            policy:        policy.id(),
            late_fraction: self.late_percent / 100.0,
            late_mode:     self.late_mode,
            seed,
            bags:          BagModel { max_bags: self.max_bags },
            stow:          StowModel { ticks_per_bag: self.ticks_per_bag },
            stow_point:    self.stow_at,
            interference:  SeatInterference { ticks_per_seated: self.interference_ticks },
            bins:          BinModel { bags_per_row: self.bin_capacity },
            ..BoardingConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose).context("installing logger")?;

    match cli.command {
        Commands::Run { cabin, policy, seed, trace, json, pace_ms } => {
            let config = cabin.config(policy, seed);
            run(&config, policy, trace, json, pace_ms)
        }
        Commands::Compare { cabin, trials, seed } => compare(&cabin, trials, seed),
    }
}

fn run(config: &BoardingConfig, policy: BoardingPolicy, trace: bool, json: bool, pace_ms: u64) -> Result<()> {
    let mut sim = initialize(config).context("setting up the run")?;
    let late_count = sim.passengers().iter().filter(|p| p.spec.is_late).count();

    let pace = (pace_ms > 0).then(|| Duration::from_millis(pace_ms));
    let mut observer = RunObserver::new(trace.then(io::stdout), pace)?;

    let t0 = Instant::now();
    let total = sim.run(&mut observer).context("boarding failed")?;
    let elapsed = t0.elapsed();
    observer.finish().context("writing trace")?;

    if json {
        let report = sim.last_report().context("run produced no report")?;
        let summary = RunSummary {
            config,
            policy: policy.name(),
            total_ticks: total.0,
            late_count,
            final_report: report,
        };
        serde_json::to_writer_pretty(io::stdout(), &summary)?;
        println!();
    } else if !trace {
        println!(
            "policy {policy}: {}x{} cabin, {} passengers ({late_count} late, {}), seed {}",
            config.rows,
            config.seats_per_row,
            sim.passengers().len(),
            config.late_mode,
            config.seed,
        );
        println!("boarding complete in {} ticks ({:.3} s)", total.0, elapsed.as_secs_f64());
    }
    Ok(())
}

fn compare(cabin: &CabinArgs, trials: u64, seed: u64) -> Result<()> {
    let mut rows = Vec::with_capacity(BoardingPolicy::ALL.len());
    for policy in BoardingPolicy::ALL {
        let mut totals = Vec::with_capacity(trials as usize);
        for k in 0..trials {
            let config = cabin.config(policy, seed.wrapping_add(k));
            let mut sim = initialize(&config)
                .with_context(|| format!("setting up {policy}, seed {}", config.seed))?;
            let total = sim
                .run(&mut NoopObserver)
                .with_context(|| format!("boarding {policy}, seed {}", config.seed))?;
            totals.push(total.0);
        }
        let stats = TrialStats::from_totals(&totals).context("--trials must be at least 1")?;
        log::info!("{policy}: mean {:.1} ticks over {trials} seeds", stats.mean);
        rows.push((policy, stats));
    }
    output::write_comparison(io::stdout(), &rows)?;
    Ok(())
}
