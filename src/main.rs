use anyhow::{Context, Result};
use clap::Parser;
use gold_layer::frames;
use gold_layer::ingestion::SilverLoader;
use gold_layer::{GoldConfig, GoldPipeline, QualityReport};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gold-build")]
#[command(about = "Build the Gold star schema from Silver extracts")]
struct Args {
    /// Directory holding the Silver CSV extracts
    #[arg(short, long, default_value = "data/silver")]
    data_dir: PathBuf,

    /// Directory the Gold CSV outputs are written to
    #[arg(short, long, default_value = "data/gold")]
    out_dir: PathBuf,

    /// JSON build configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail on precondition violations instead of resolving them best-effort
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GoldConfig::load(path)?,
        None => GoldConfig::default(),
    };
    config.strict |= args.strict;

    info!("Loading silver extracts from {}", args.data_dir.display());
    let inputs = SilverLoader::new(&args.data_dir, config.sources.clone()).load()?;

    let (schema, build_report) = GoldPipeline::new(config).build_with_report(&inputs)?;
    info!("Build report: {}", serde_json::to_string(&build_report)?);

    let report = QualityReport::evaluate(&schema);
    if !report.is_clean() {
        warn!("Gold quality checks reported issues");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let outputs = [
        ("dim_customers.csv", frames::customers_frame(&schema.customers)?),
        ("dim_products.csv", frames::products_frame(&schema.products)?),
        ("fact_sales.csv", frames::sales_frame(&schema.sales)?),
        ("sales_star.csv", frames::sales_star_view(&schema)?),
    ];
    for (name, mut df) in outputs {
        let path = args.out_dir.join(name);
        frames::write_csv(&mut df, &path)?;
        info!("Wrote {} rows to {}", df.height(), path.display());
    }

    Ok(())
}
