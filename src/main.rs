use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use aswa::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Discover a batch of random tracks
    Discover(DiscoverOptions),

    /// Show one random track
    Random,

    /// Look up a track by its Deezer id
    Track(TrackOptions),

    /// Show one random track of a genre
    Genre(GenreOptions),

    /// Show the most relevant track for a search query
    Search(SearchOptions),

    /// Browse tracks interactively (next, previous, random)
    Browse,

    /// Print sample search queries for each strategy
    Queries(QueriesOptions),

    /// Serve the discovery JSON API
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverOptions {
    /// Number of tracks to fetch (defaults to ASWA_PRELOAD_COUNT)
    #[clap(long)]
    pub count: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    /// Deezer track id
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct GenreOptions {
    /// Deezer genre name, e.g. "deep house"
    pub genre: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search terms
    #[clap(required = true)]
    pub query: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct QueriesOptions {
    /// Number of queries to print
    #[clap(long, default_value_t = 10)]
    pub count: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment, using defaults. Err: {}", e);
    }

    let args = Cli::parse();

    match args.command {
        Command::Discover(opt) => cli::discover(opt.count).await,
        Command::Random => cli::random().await,
        Command::Track(opt) => cli::track(opt.id).await,
        Command::Genre(opt) => cli::genre(opt.genre).await,
        Command::Search(opt) => cli::search(opt.query.join(" ")).await,
        Command::Browse => cli::browse().await,
        Command::Queries(opt) => cli::queries(opt.count).await,
        Command::Serve => cli::serve().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
