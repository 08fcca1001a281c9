//! Annualized LTV gain for each answer-rate step
//!
//! Usage: cargo run --bin ltv_sweep -- --max-step 20 --output ltv_sweep.csv

use anyhow::{Context, Result};
use clap::Parser;
use retention_insights::{cli::LtvArgs, config::DEFAULT_SWEEP_MAX_STEP, report::format_currency, LtvParams};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ltv_sweep", about = "Annualized LTV gain per answer-rate increase")]
struct Args {
    #[arg(long, default_value = "ltv_sweep.csv")]
    output: PathBuf,

    /// Last answer-rate step, in percentage points
    #[arg(long, default_value_t = DEFAULT_SWEEP_MAX_STEP)]
    max_step: u32,

    #[command(flatten)]
    ltv: LtvArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut params = LtvParams::default();
    args.ltv.apply(&mut params);

    let points = params.sweep(0..=args.max_step).context("Invalid LTV parameters")?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for point in &points {
        writer.serialize(point)?;
    }
    writer.flush()?;

    println!("{:>10} {:>14} {:>14}", "Increase", "ExtraRetained", "AnnualLTV");
    println!("{}", "-".repeat(40));
    for point in &points {
        println!(
            "{:>9.0}% {:>14.1} {:>14}",
            point.answer_rate_increase,
            point.additional_retained,
            format_currency(point.annual_ltv_gain)
        );
    }
    println!("\nOutput written to {}", args.output.display());

    Ok(())
}
