//! Write the synthetic dialer sample to CSV
//!
//! Usage: cargo run --bin generate_sample -- --output sample_calls.csv

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use retention_insights::{
    calls::{generate_sample, CallRecord, SampleParams},
    retention::retention_by_call_result_par,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "generate_sample", about = "Write the synthetic dialer sample to CSV")]
struct Args {
    #[arg(long, default_value = "sample_calls.csv")]
    output: PathBuf,

    #[arg(long, default_value_t = 5000)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Rows per partition for the summary aggregation
    #[arg(long, default_value_t = 1000)]
    chunk_size: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let params = SampleParams { rows: args.rows, seed: args.seed, ..SampleParams::default() };
    let records = generate_sample(&params);
    info!("Generated {} calls in {:?}", records.len(), start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    println!("Wrote {} calls to {}", records.len(), args.output.display());

    let partitions: Vec<&[CallRecord]> = records.chunks(args.chunk_size.max(1)).collect();
    let summary = retention_by_call_result_par(&partitions);

    println!("\nRetention by call result:");
    for group in summary.groups() {
        if let Some(rate) = group.retention_rate {
            println!("  {:<12} {:>6} calls  {:.4}", group.call_result, group.rows, rate);
        }
    }

    Ok(())
}
