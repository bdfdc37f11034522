use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vaultspec_build::{BatchOrchestrator, BuildConfig, RunOutput};
use vaultspec_core::{ClassificationModel, ColumnCatalog, Error as CoreError, DOCUMENT_VERSION};

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid model file: {0}")]
    Model(#[from] serde_json::Error),
    #[error("failed to write artifact: {0}")]
    Artifact(#[from] serde_yaml::Error),
    #[error("{0} entities failed to build")]
    EntitiesFailed(u32),
}

#[derive(Parser, Debug)]
#[command(name = "vaultspec", version, about = "Data Vault load specification builder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Build(BuildArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Classification model (JSON).
    #[arg(long, value_name = "FILE")]
    model: PathBuf,
    /// Source column catalog (CSV).
    #[arg(long, value_name = "FILE")]
    catalog: PathBuf,
    /// Output directory for load documents and the run summary.
    #[arg(long, default_value = "output")]
    out: PathBuf,
    /// Target schema stamped into every document.
    #[arg(long, default_value = "integration")]
    target_schema: String,
    /// Collision code stamped into every document.
    #[arg(long, default_value = "mdm")]
    collision_code: String,
    /// Default length for bounded string types without a declared length.
    #[arg(long, default_value_t = 255)]
    default_length: u32,
    /// Replace mismatched dependent keys with the parent's declared keys.
    #[arg(long, default_value_t = false)]
    auto_reconcile_keys: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => run_build(args),
    }
}

fn run_build(args: BuildArgs) -> Result<(), CliError> {
    let BuildArgs {
        model,
        catalog,
        out,
        target_schema,
        collision_code,
        default_length,
        auto_reconcile_keys,
    } = args;

    let model: ClassificationModel = serde_json::from_str(&fs::read_to_string(&model)?)?;
    let catalog = ColumnCatalog::from_csv_path(&catalog)?;

    let config = BuildConfig {
        version: DOCUMENT_VERSION.to_string(),
        target_schema,
        collision_code,
        default_string_length: default_length,
        auto_reconcile_keys,
    };
    let output = BatchOrchestrator::new(config).run(&model, &catalog);

    write_artifacts(&out, &output)?;

    let errors = output.summary.error_count();
    if errors > 0 {
        return Err(CliError::EntitiesFailed(errors));
    }
    Ok(())
}

fn write_artifacts(out: &Path, output: &RunOutput) -> Result<(), CliError> {
    fs::create_dir_all(out)?;

    for document in &output.documents {
        let path = out.join(format!(
            "{}_metadata.yaml",
            document.target_table.to_lowercase()
        ));
        fs::write(&path, serde_yaml::to_string(document)?)?;
        info!(path = %path.display(), "wrote load document");
    }

    let summary_path = out.join("processing_summary.yaml");
    fs::write(&summary_path, serde_yaml::to_string(&output.summary)?)?;
    info!(
        path = %summary_path.display(),
        documents = output.documents.len(),
        errors = output.summary.error_count(),
        "wrote run summary"
    );
    Ok(())
}
