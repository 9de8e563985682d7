mod analyze;
mod directory;
mod search;
mod shell;

use std::path::PathBuf;

use carefind_core::{Directory, ProviderFilter, ProviderKind, SearchRequest};
use carefind_locator::LocationQueryService;
use carefind_rx::DocumentExtractionService;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "carefind")]
#[command(about = "Find healthcare providers and read prescription photos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for doctors, clinics and hospitals
    Search {
        /// Symptom or specialty, e.g. "skin clinic"
        symptom: Option<String>,
        /// City or area to search in
        #[arg(long, short, default_value = "")]
        location: String,
        /// Search around the current position instead of a typed location
        #[arg(long)]
        near_me: bool,
        /// Latitude of the current position (with --near-me)
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude of the current position (with --near-me)
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract medicines from a prescription photo
    Analyze {
        /// Path to the image file
        path: PathBuf,
        /// Override the mime type guessed from the file extension
        #[arg(long)]
        mime: Option<String>,
        /// Print the raw report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse the local provider directory
    Directory {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// Case-insensitive match on name, specialty, facility or bio
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Read searches from stdin, one per line; only the latest answer is shown
    Shell,
    /// Print the effective configuration (secrets redacted)
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Doctor,
    Hospital,
}

impl From<KindArg> for ProviderKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Doctor => ProviderKind::Doctor,
            KindArg::Hospital => ProviderKind::Hospital,
        }
    }
}

/// Assemble a [`SearchRequest`] from command-line flags.
fn search_request(
    symptom: Option<String>,
    location: String,
    near_me: bool,
    coordinates: Option<(f64, f64)>,
) -> SearchRequest {
    let request = SearchRequest::new(symptom.unwrap_or_default(), location);
    if near_me {
        request.near_me(coordinates)
    } else {
        request
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = carefind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            symptom,
            location,
            near_me,
            lat,
            lon,
            json,
        } => {
            let service = LocationQueryService::from_config(&config)?;
            let request = search_request(symptom, location, near_me, lat.zip(lon));
            search::run_search(&service, &request, json).await?;
        }
        Commands::Analyze { path, mime, json } => {
            let service = DocumentExtractionService::from_config(&config)?;
            let image = analyze::read_image(&path, mime.as_deref(), config.max_image_bytes)?;
            analyze::run_analyze(&service, &image, json).await?;
        }
        Commands::Directory { kind, query, json } => {
            let directory = Directory::load_or_builtin(config.directory_path.as_deref())?;
            let filter = ProviderFilter {
                kind: kind.map(ProviderKind::from),
                term: query.unwrap_or_default(),
            };
            directory::run_directory(&directory, &filter, json)?;
        }
        Commands::Shell => {
            let service = LocationQueryService::from_config(&config)?;
            shell::run_shell(service).await?;
        }
        Commands::Config => println!("{config:#?}"),
    }

    Ok(())
}
