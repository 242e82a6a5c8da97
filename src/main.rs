//! `docuprox` - run DocuProx batches described in manifest files

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use docuprox_batch::config::Config;
use docuprox_batch::utils::logging::init_logging;
use docuprox_batch::{
    BatchManifest, DocuProxApiCredential, DocuProxNode, ReqwestTransport, node_description,
};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "docuprox",
    version = docuprox_batch::LONG_VERSION,
    about = "Process document batches with the DocuProx API"
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "DOCUPROX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a batch manifest and write the output collection as JSON
    Run {
        /// Manifest file (.json, otherwise YAML)
        manifest: PathBuf,

        /// Record item failures instead of aborting
        #[arg(long)]
        continue_on_failure: bool,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the node and credential descriptions as JSON
    Describe,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).await?;
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Describe => {
            let description = json!({
                "node": node_description(),
                "credentials": [DocuProxApiCredential::describe()],
            });
            println!("{}", serde_json::to_string_pretty(&description)?);
            Ok(())
        }
        Commands::Run {
            manifest,
            continue_on_failure,
            output,
            pretty,
        } => {
            config.validate()?;

            let manifest = BatchManifest::from_path(&manifest).await?;
            let continue_on_failure = continue_on_failure
                || config.batch.continue_on_failure
                || manifest.continue_on_failure;
            let manifest = manifest.with_continue_on_failure(continue_on_failure);

            let node = DocuProxNode::from_config(ReqwestTransport::new()?, &config.api)?;
            let report = node.execute_with_summary(&manifest).await?;
            info!(
                total = report.summary.total,
                succeeded = report.summary.succeeded,
                failed = report.summary.failed,
                duration_ms = report.summary.total_duration.as_millis() as u64,
                "Batch finished"
            );

            let rendered = if pretty {
                serde_json::to_string_pretty(&report.outputs)?
            } else {
                serde_json::to_string(&report.outputs)?
            };

            match output {
                Some(path) => tokio::fs::write(&path, rendered)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{}", rendered),
            }
            Ok(())
        }
    }
}

async fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path).await?,
        None => Config::default(),
    };
    Ok(config.with_env_overrides()?)
}
