//! Aswa Track Discovery Library
//!
//! This library turns the Deezer catalog search API, which only answers
//! keyword searches with bounded pagination, into an endless, de-duplicated
//! stream of "random" tracks that can be navigated back and forth. It includes
//! the HTTP gateway, the query strategies, the discovery engine and the thin
//! HTTP and CLI front ends built on top of it.
//!
//! # Modules
//!
//! - `api` - JSON endpoints exposing the discovery engine
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `deezer` - Deezer catalog gateway and record normalization
//! - `discovery` - Strategies, de-duplication, history and the engine
//! - `error` - Upstream and lookup error types
//! - `server` - Local HTTP server hosting the `api` routes
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use aswa::{config, deezer::DeezerClient, discovery::DiscoveryEngine};
//!
//! #[tokio::main]
//! async fn main() -> aswa::Res<()> {
//!     config::load_env().await?;
//!     let cfg = config::discovery_config();
//!     let client = DeezerClient::new(config::deezer_api_url(), cfg.retry.request_timeout)?;
//!     let mut engine = DiscoveryEngine::new(client, cfg);
//!     engine.preload(10).await;
//!     println!("{}", engine.next().await.title());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod deezer;
pub mod discovery;
pub mod error;
pub mod server;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the binary and the CLI layer where any error is simply reported
/// to the user. Library components return their own typed errors from
/// [`error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Preloading {} tracks...", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Loaded {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command-line layer uses this macro. Library code never
/// terminates the hosting process.
///
/// # Example
///
/// ```
/// error!("Failed to bind server address: {}", addr);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Track {} not found", id);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
