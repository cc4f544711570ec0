use std::path::PathBuf;

use clap::Parser;

use crate::build::CLAP_LONG_VERSION;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[clap(long_version = CLAP_LONG_VERSION)]
pub struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,

    /// Inline JSON config
    #[arg(long)]
    pub config_content: Option<String>,

    /// OTLP endpoint to send the samples to. Overrides both the config and
    /// the OTEL_EXPORTER_OTLP_ENDPOINT environment variable.
    #[arg(short, long)]
    pub endpoint: Option<String>,
}
