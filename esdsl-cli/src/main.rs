mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "esdsl")]
#[command(about = "esdsl - render Elasticsearch request bodies from definitions")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.esdsl/config.toml)
    #[arg(short, long, global = true, env = "ESDSL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a definition file into a request body
    Render {
        /// Definition file (.yaml, .yml or .json)
        #[arg(short, long)]
        definition: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line output, overriding the config
        #[arg(long)]
        compact: bool,
    },

    /// Check that a definition translates and renders
    Validate {
        /// Definition file (.yaml, .yml or .json)
        #[arg(short, long)]
        definition: PathBuf,
    },
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(config.log_filter());

    // stdout carries only the rendered body
    if config.log_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config);

    let result = match cli.command {
        Commands::Render {
            definition,
            output,
            compact,
        } => {
            tracing::info!("Rendering {:?}", definition);
            let pretty = config.output.pretty && !compact;
            commands::run_render(&definition, pretty, output.as_deref())
        }
        Commands::Validate { definition } => {
            tracing::info!("Validating {:?}", definition);
            commands::run_validate(&definition)
        }
    };

    if let Err(err) = &result {
        if let Some(dsl) = err.downcast_ref::<esdsl::DslError>() {
            tracing::error!(error_type = dsl.error_type(), "{}", dsl);
        }
    }
    result
}
