//! Retention Insights CLI
//!
//! Prints the campaign report for a dialer export, or for the synthetic
//! sample when no export is given.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use retention_insights::{
    calls::{generate_sample, DatasetCache, LoadMode},
    cli::LtvArgs,
    report::render_text,
    retention::retention_by_call_result_strict,
    AnalysisConfig, CampaignReport,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "retention_report", version, about = "Mortgage retention campaign insights")]
struct Args {
    /// Dialer export CSV (call_result, retained, ...). Uses the synthetic sample if omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Seed for the synthetic sample
    #[arg(long)]
    seed: Option<u64>,

    /// Reject rows missing call_result or retained
    #[arg(long)]
    strict: bool,

    /// JSON file with analysis parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Answer-rate increase to project, in percentage points
    #[arg(long)]
    answer_rate_increase: Option<f64>,

    #[command(flatten)]
    ltv: LtvArgs,

    /// Illustrative effect method label (Propensity Score Matching, Instrumental Variables)
    #[arg(long)]
    effect: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Args {
    fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => AnalysisConfig::default(),
        };

        if let Some(v) = self.answer_rate_increase { config.answer_rate_increase = v; }
        self.ltv.apply(&mut config.ltv);
        if let Some(v) = &self.effect { config.effect_method = v.clone(); }
        if let Some(v) = self.seed { config.sample.seed = v; }

        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.resolve_config()?;

    let mode = if args.strict { LoadMode::Strict } else { LoadMode::Lenient };
    let mut cache = DatasetCache::new();

    let (records, source) = match &args.data {
        Some(path) => {
            let records = cache
                .load(path, mode)
                .with_context(|| format!("Failed to load calls from {}", path.display()))?;
            (records.to_vec(), path.display().to_string())
        }
        None => {
            warn!("No --data given, using synthetic sample (seed {})", config.sample.seed);
            (generate_sample(&config.sample), format!("synthetic sample (seed {})", config.sample.seed))
        }
    };
    info!("Loaded {} calls from {}", records.len(), source);

    if args.strict {
        retention_by_call_result_strict(&records).context("Strict validation failed")?;
    }

    let report = CampaignReport::build(&records, source, &config).context("Failed to build report")?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
