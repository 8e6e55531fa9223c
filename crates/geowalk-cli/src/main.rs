use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geowalk_cli::commands::nearest::handle_nearest_command;
use geowalk_cli::commands::route::{handle_route_command, RouteCommandArgs};
use geowalk_cli::commands::search::{handle_search_command, SearchCommandArgs};
use geowalk_cli::commands::sort::{handle_sort_command, SortCommandArgs};
use geowalk_cli::commands::stats::handle_stats_command;
use geowalk_cli::commands::{CommandContext, Endpoint};
use geowalk_cli::output::OutputFormat;
use geowalk_lib::{
    Coordinate, GraphConfig, SearchAlgorithm, SelectionStrategy, SortAlgorithm, SortKey,
    DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_PRIMARY_RADIUS_KM, MAX_SEARCH_ITERATIONS,
    RELEVANCE_RADIUS_FACTOR,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Walking routes and saved-place tools")]
struct Cli {
    /// Walking network JSON file or directory (defaults to $GEOWALK_NETWORK,
    /// then the platform data directory).
    #[arg(long)]
    network: Option<PathBuf>,

    /// Saved locations JSON file or directory (defaults to $GEOWALK_LOCATIONS,
    /// then the platform data directory).
    #[arg(long)]
    locations: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Radius in kilometres for the first nearest-vertex pass.
    #[arg(long, default_value_t = DEFAULT_PRIMARY_RADIUS_KM)]
    primary_radius: f64,

    /// Multiplier on the primary radius bounding which vertices a route may use.
    #[arg(long, default_value_t = RELEVANCE_RADIUS_FACTOR)]
    relevance_factor: f64,

    /// Maximum vertex selections per route search.
    #[arg(long, default_value_t = MAX_SEARCH_ITERATIONS)]
    max_iterations: usize,

    /// How the route search picks the next vertex (linear, frontier).
    #[arg(long, default_value = "linear")]
    strategy: SelectionStrategy,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a walking route between two points.
    Route {
        /// Start as `LAT,LON` or a saved location name.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: Endpoint,
        /// Destination as `LAT,LON` or a saved location name.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: Endpoint,
    },
    /// Find the network vertex closest to a coordinate.
    Nearest {
        /// Query point as `LAT,LON`.
        #[arg(long, allow_hyphen_values = true)]
        at: Coordinate,
    },
    /// Look up a saved location by name.
    Search {
        /// Text to look for.
        query: String,
        /// Matching algorithm (boyer-moore, kmp, fuzzy).
        #[arg(long, default_value = "boyer-moore")]
        algorithm: SearchAlgorithm,
        /// Edit-distance threshold for fuzzy matching.
        #[arg(long, default_value_t = DEFAULT_MAX_EDIT_DISTANCE)]
        max_distance: usize,
        /// List every match instead of the first.
        #[arg(long)]
        all: bool,
    },
    /// List saved locations in sorted order.
    Sort {
        /// Field to sort by (name, created).
        #[arg(long = "by", default_value = "name")]
        by: SortKey,
        /// Sorting algorithm (bubble, quick, merge, heap).
        #[arg(long, default_value = "merge")]
        algorithm: SortAlgorithm,
        /// Reverse the order.
        #[arg(long)]
        descending: bool,
        /// Only list locations saved by this owner.
        #[arg(long)]
        owner: Option<String>,
    },
    /// Summarise the walking network and saved locations.
    Stats,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let ctx = CommandContext {
        network: cli.network,
        locations: cli.locations,
        format: cli.format,
        config: GraphConfig {
            primary_radius_km: cli.primary_radius,
            relevance_factor: cli.relevance_factor,
            max_iterations: cli.max_iterations,
            strategy: cli.strategy,
        },
    };

    match cli.command {
        Command::Route { from, to } => handle_route_command(&ctx, &RouteCommandArgs { from, to }),
        Command::Nearest { at } => handle_nearest_command(&ctx, at),
        Command::Search {
            query,
            algorithm,
            max_distance,
            all,
        } => handle_search_command(
            &ctx,
            &SearchCommandArgs {
                query,
                algorithm,
                max_distance,
                all,
            },
        ),
        Command::Sort {
            by,
            algorithm,
            descending,
            owner,
        } => handle_sort_command(
            &ctx,
            &SortCommandArgs {
                key: by,
                algorithm,
                descending,
                owner,
            },
        ),
        Command::Stats => handle_stats_command(&ctx),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
