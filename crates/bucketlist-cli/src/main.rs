mod passcode;
mod places;

use bucketlist_store::LocationStore;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bucketlist")]
#[command(about = "Private list of places you want to visit")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List saved places
    List,
    /// Add a place (defaults to the configured map centre)
    Add {
        /// Latitude in degrees
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Edit the name or description of a place
    Edit {
        /// Position shown by `list` (1-based)
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete places by position
    Delete {
        /// Positions shown by `list` (1-based)
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Look up Wikipedia pages near a place
    Nearby {
        /// Position shown by `list` (1-based)
        index: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bucketlist_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("bucketlist ready; run `bucketlist --help` for commands");
        return Ok(());
    };

    if !passcode::unlock(config.passcode.clone()).await? {
        tracing::warn!("authentication cancelled; places stay locked");
        anyhow::bail!("places stay locked");
    }

    let mut store = LocationStore::open_file(config.saved_places_path());
    match command {
        Commands::List => places::list(&store),
        Commands::Add { lat, lon } => places::add(&mut store, &config, lat.zip(lon))?,
        Commands::Edit {
            index,
            name,
            description,
        } => places::edit(&mut store, &config, index, name, description)?,
        Commands::Delete { indices } => places::delete(&mut store, &indices)?,
        Commands::Nearby { index } => places::nearby(&store, &config, index).await?,
    }

    Ok(())
}
