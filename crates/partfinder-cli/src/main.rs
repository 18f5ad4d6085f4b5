mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "partfinder-cli")]
#[command(about = "Find purchase options for a part from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Full search: shopping listings, organic top-up and page enrichment
    Search {
        /// Part name, e.g. "6205 bearing"
        part_name: String,

        #[arg(long)]
        part_number: Option<String>,

        #[arg(long)]
        manufacturer: Option<String>,

        /// Defaults to PARTFINDER_DEFAULT_LOCATION
        #[arg(long)]
        location: Option<String>,

        #[arg(long, default_value_t = partfinder_core::DEFAULT_MAX_RESULTS,
              value_parser = clap::value_parser!(u32).range(1..=i64::from(partfinder_core::MAX_RESULTS_LIMIT)))]
        max_results: u32,

        /// Skip page enrichment (fast path only)
        #[arg(long)]
        no_scraping: bool,
    },
    /// Fast-path lookup capped at five results
    Quick {
        part_name: String,

        #[arg(long)]
        location: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = partfinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON response.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let request = match cli.command {
        Commands::Search {
            part_name,
            part_number,
            manufacturer,
            location,
            max_results,
            no_scraping,
        } => partfinder_core::PartSearchRequest {
            part_name,
            part_number,
            manufacturer,
            location,
            max_results,
            include_scraping: !no_scraping,
        },
        Commands::Quick {
            part_name,
            location,
        } => partfinder_core::PartSearchRequest::quick(part_name, location),
    };

    search::run_search(&config, &request).await
}
