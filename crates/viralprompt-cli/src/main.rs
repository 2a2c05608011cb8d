mod collect;
mod extract;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use viralprompt_extract::{Heuristics, Variant};

use crate::collect::CollectCommands;

#[derive(Debug, Parser)]
#[command(name = "viralprompt")]
#[command(about = "Collect viral AI-generated posts and recover their prompts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a platform and save matching posts as timestamped JSON
    Collect {
        #[command(subcommand)]
        command: CollectCommands,
    },
    /// Run the classifier and prompt extractor over a piece of text
    Extract {
        /// Pattern set to apply
        #[arg(long, value_enum, default_value_t = VariantArg::Description)]
        variant: VariantArg,

        /// Caption, description, or tweet text
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// Video descriptions and tweets; hashtags kept
    Description,
    /// Instagram captions; trailing hashtags stripped
    Caption,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Description => Variant::Description,
            VariantArg::Caption => Variant::Caption,
        }
    }
}

fn load_heuristics(config: &viralprompt_core::AppConfig) -> anyhow::Result<Heuristics> {
    match &config.heuristics_path {
        Some(path) => {
            let heuristics = viralprompt_extract::load_heuristics(path)?;
            tracing::info!(path = %path.display(), "loaded heuristics");
            Ok(heuristics)
        }
        None => Ok(Heuristics::builtin()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = viralprompt_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let heuristics = load_heuristics(&config)?;

    match cli.command {
        Commands::Collect { command } => collect::run(&config, &heuristics, command).await?,
        Commands::Extract { variant, text } => {
            extract::run_extract(&heuristics, variant.into(), &text);
        }
    }

    Ok(())
}
