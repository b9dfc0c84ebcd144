mod browse;
mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use jobmap_core::{normalize, AppConfig, DeepLink, ExperienceLevel, JobType, QueryState};
use jobmap_geocode::GeocodeResolver;
use jobmap_session::{CatalogLoader, Session};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jobmap")]
#[command(about = "Search job postings and see them on a map")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the catalog and print every job with its coordinates
    Catalog,
    /// Filter the catalog once and print the matches
    Search {
        /// Substring of the title or company
        #[arg(long)]
        keyword: Option<String>,
        /// Substring of the normalized location
        #[arg(long)]
        location: Option<String>,
        /// Job type (e.g., tech, finance)
        #[arg(long)]
        job_type: Option<JobType>,
        /// Experience level (junior, mid, senior, lead)
        #[arg(long)]
        experience: Option<ExperienceLevel>,
    },
    /// Print the first catalog jobs with links that open the map on each
    Trending {
        /// Number of jobs to show
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Normalize and geocode a single location
    Resolve {
        /// Free-text location (e.g., "phoenix, az")
        location: String,
    },
    /// Interactive session over the map view
    Browse {
        /// Deep link to open with (e.g., "/jobs?search=Data&location=Phoenix")
        #[arg(long)]
        link: Option<String>,
    },
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("no command given; run `jobmap --help`");
        return Ok(());
    };

    let config = jobmap_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config)?;
    tracing::debug!(env = %config.env, offline = config.offline, "configuration loaded");

    let resolver = Arc::new(GeocodeResolver::from_config(&config)?);

    match command {
        Commands::Catalog => {
            let catalog = CatalogLoader::from_config(&config, Arc::clone(&resolver))?
                .load_catalog()
                .await;
            render::print_catalog(&catalog);
        }
        Commands::Search {
            keyword,
            location,
            job_type,
            experience,
        } => {
            let query = QueryState {
                keyword: keyword.unwrap_or_default(),
                location: location.unwrap_or_default(),
                job_type,
                experience,
            };
            let catalog = CatalogLoader::from_config(&config, Arc::clone(&resolver))?
                .load_catalog()
                .await;
            render::print_listing(&jobmap_core::filter_jobs(&catalog, &query));
        }
        Commands::Trending { limit } => {
            let catalog = CatalogLoader::from_config(&config, Arc::clone(&resolver))?
                .load_catalog()
                .await;
            render::print_trending(&jobmap_session::trending(&catalog, limit));
        }
        Commands::Resolve { location } => {
            let normalized = normalize(&location);
            match resolver.resolve(&normalized).await {
                Some(position) => println!("{normalized}: {position}"),
                None => println!("{normalized}: could not be geocoded"),
            }
        }
        Commands::Browse { link } => {
            let query = link
                .map(|l| DeepLink::parse(&l).into_query())
                .unwrap_or_default();
            let catalog = CatalogLoader::from_config(&config, Arc::clone(&resolver))?
                .load_catalog()
                .await;
            let session = Session::with_initial_query(catalog, Arc::clone(&resolver), query);
            browse::run(session).await?;
        }
    }

    resolver.flush().await;
    Ok(())
}
