use anyhow::Context;
use clap::Parser;
use episcope::models::DiagnosisCatalog;
use episcope::utils::{read_parquet, write_parquet};
use episcope::{AnalysisConfig, export, run_analysis};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Co-occurrence analysis of ICD-10 diagnoses in RIPS discharge data
#[derive(Debug, Parser)]
#[command(name = "episcope", version, about)]
struct Cli {
    /// Parquet file with the discharge table (patient id + diagnosis columns)
    #[arg(long)]
    input: PathBuf,

    /// Parquet file with the ICD-10 description catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory for the result tables
    #[arg(long, default_value = "resultados")]
    out_dir: PathBuf,

    /// JSON file overriding the default analysis configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let start = Instant::now();

    let config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            serde_json::from_str::<AnalysisConfig>(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };

    info!("Reading discharge table from {}", cli.input.display());
    let batches = read_parquet(&cli.input)
        .with_context(|| format!("reading input table {}", cli.input.display()))?;

    let catalog = match &cli.catalog {
        Some(path) => {
            info!("Reading ICD-10 catalog from {}", path.display());
            let catalog_batches = read_parquet(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            DiagnosisCatalog::from_record_batches(&catalog_batches)?
        }
        None => {
            info!("No catalog supplied; descriptions will use the placeholder");
            DiagnosisCatalog::new()
        }
    };

    let output = run_analysis(&batches, &catalog, &config)?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating output directory {}", cli.out_dir.display()))?;

    let consolidated_path = cli.out_dir.join("consolidado_por_usuario_4dig.parquet");
    write_parquet(
        &export::consolidated_to_batch(&output.consolidated)?,
        &consolidated_path,
    )?;
    info!("Consolidated diagnoses exported to {}", consolidated_path.display());

    let frequency_path = cli.out_dir.join("frecuencia_diagnosticos_CIE4.parquet");
    write_parquet(
        &export::frequencies_to_batch(&output.frequencies)?,
        &frequency_path,
    )?;
    info!("Diagnosis frequencies exported to {}", frequency_path.display());

    let significant = export::significant_associations(&output.associations, config.significance);
    let associations_path = cli
        .out_dir
        .join("analisis_coocurrencias_significativas.parquet");
    write_parquet(
        &export::associations_to_batch(&significant)?,
        &associations_path,
    )?;
    info!(
        "Significant co-occurrences exported to {}",
        associations_path.display()
    );

    info!("Process completed in {:.2?}", start.elapsed());
    Ok(())
}
