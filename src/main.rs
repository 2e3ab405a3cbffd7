use anyhow::Context;
use clap::Parser;
use quake_map::core::ConfigProvider;
use quake_map::utils::{logger, validation::Validate};
use quake_map::{
    CliConfig, LocalStorage, QuakeMapEngine, QuakePipeline, TomlConfig, UsgsFeedClient,
};
use std::time::Duration;

fn load_toml_config(path: &str) -> anyhow::Result<TomlConfig> {
    TomlConfig::from_file(path).with_context(|| format!("Failed to load config file '{}'", path))
}

/// Runs one fetch-and-render pass and returns the process exit code.
async fn run<C: ConfigProvider + Validate + std::fmt::Debug>(config: C) -> i32 {
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        return e.exit_code();
    }

    let feed_url = config.feed_url();
    let source = match UsgsFeedClient::new(
        feed_url.clone(),
        Duration::from_secs(config.timeout_seconds()),
    ) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("Could not build HTTP client: {}", e);
            eprintln!("{}", e.user_friendly_message());
            return e.exit_code();
        }
    };
    tracing::info!("Feed: {}", feed_url);

    let storage = LocalStorage::new(config.output_path().to_string());
    tracing::debug!("Writing output under {}", storage.base_path());
    let pipeline = QuakePipeline::new(source, storage, config);
    let engine = QuakeMapEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => match &summary.fetch_error {
            None => {
                println!(
                    "Map with {} earthquakes saved to: {}",
                    summary.rendered, summary.output_path
                );
                if let Some(path) = &summary.geojson_path {
                    println!("Styled GeoJSON saved to: {}", path);
                }
                if summary.skipped > 0 {
                    println!("{} incomplete records were skipped", summary.skipped);
                }
                0
            }
            Some(error) => {
                eprintln!("Earthquake feed unavailable: {}", error);
                eprintln!("A map without markers was saved to: {}", summary.output_path);
                2
            }
        },
        Err(e) => {
            tracing::error!(
                "Run failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            e.exit_code()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let format = if cli.log_json {
        logger::LogFormat::Json
    } else {
        logger::LogFormat::Compact
    };
    logger::init_logger(cli.verbose, format);
    tracing::info!("Starting quake-map");

    let exit_code = match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            let config = load_toml_config(&path)?;
            run(config).await
        }
        None => run(cli).await,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
