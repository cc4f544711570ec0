#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::{fs::File, io::BufReader};

use anyhow::{bail, Context};
use clap::Parser as _;
use cli::Cli;
use tracing_subscriber::Layer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sample_generator::build;
use sample_generator::config::GeneratorConfig;
use sample_generator::generator::SampleGenerator;

mod cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize log tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            ),
        )
        .init();

    tracing::info!(
        "Welcome to the OTLP sample generator! version: v{}  commit: {}  buildtime: {}",
        build::PKG_VERSION,
        build::COMMIT_HASH,
        build::BUILD_TIME
    );

    let fut = async {
        // Load config
        let mut config: GeneratorConfig = match (cli.config_file, cli.config_content) {
            (Some(_), Some(_)) => {
                bail!("Cannot set both --config-file and --config-content at the same time")
            }
            (None, None) => GeneratorConfig::default(),
            (None, Some(s)) => serde_json::from_str(&s).context("Failed to load config")?,
            (Some(path), None) => {
                tracing::info!("Loading config from: {path:?}");
                let file = File::open(path).context("Failed to load config")?;
                let reader = BufReader::new(file);
                serde_json::from_reader(reader).context("Failed to load config")?
            }
        };

        if cli.endpoint.is_some() {
            config.endpoint = cli.endpoint;
        }

        tracing::debug!("Generator config: {config:#?}");

        SampleGenerator::new(config).run()?;

        tracing::info!("All samples exported, exiting now");

        Ok::<_, anyhow::Error>(())
    };

    if let Err(error) = fut.await {
        tracing::error!(error = format!("{error:#}"));
        std::process::exit(1);
    }
}
