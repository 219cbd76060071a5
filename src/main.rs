use anyhow::Result;
use catalog_translate::batch::{self, BatchOrchestrator, CancelFlag};
use catalog_translate::config::Config;
use catalog_translate::locales::LocaleTable;
use catalog_translate::openai::OpenAiClient;
use clap::Parser;
use std::process::ExitCode;
use tracing::{info, warn};

/// Translate a message catalog into every configured locale
#[derive(Debug, Parser)]
#[command(name = "catalog-translate", version)]
struct Cli {
    /// Only process this locale code
    #[arg(long)]
    locale: Option<String>,

    /// Top-level key to translate (overrides SUBTREE_KEY)
    #[arg(long)]
    subtree: Option<String>,

    /// Count leaves and check destinations without translating
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("catalog_translate=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let table = match &config.locales_file {
        Some(path) => LocaleTable::from_file(path)?,
        None => LocaleTable::builtin(),
    };
    let targets = table.select(cli.locale.as_deref())?;
    let subtree_key = cli.subtree.clone().or_else(|| config.subtree_key.clone());

    if cli.dry_run {
        let reports = batch::dry_run(
            &targets,
            &config.source_file,
            subtree_key.as_deref(),
            &config.messages_dir,
        )?;

        let broken = reports
            .iter()
            .filter(|report| report.destination_error.is_some())
            .count();
        info!(
            "Dry run: {} locale(s) checked, {} with unreadable destinations",
            reports.len(),
            broken
        );
        return Ok(if broken == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let client = OpenAiClient::new(
        reqwest::Client::new(),
        config.require_api_key()?,
        config.openai_model.clone(),
        config.openai_api_url.clone(),
    );

    let cancel = CancelFlag::new();
    let ctrl_c_flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current leaf");
            ctrl_c_flag.cancel();
        }
    });

    let orchestrator =
        BatchOrchestrator::new(client, config.batch_settings()).with_cancel_flag(cancel);
    let summary = orchestrator
        .run(&targets, &config.source_file, subtree_key.as_deref())
        .await?;

    Ok(if summary.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
