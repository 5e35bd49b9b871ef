//! Spotify Now-Playing Bridge Library
//!
//! This library implements a small backend server that sits between a client
//! application and the Spotify Web API. It drives the OAuth2 authorization-code
//! flow (or works from a statically provisioned refresh token), keeps the
//! resulting bearer token fresh in process memory, and re-exposes a narrow set
//! of read endpoints so callers never have to deal with OAuth themselves.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the bridge server endpoints
//! - `config` - Configuration loading from environment variables
//! - `management` - Shared runtime state: token store and analysis cache
//! - `server` - Router construction and server startup
//! - `spotify` - Spotify Web API protocol: authorization, tokens, player data
//! - `types` - Data structures and error types
//!
//! # Example
//!
//! ```
//! use nowbridge::{config, server};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env();
//!     // Build state and start the server...
//! }
//! ```

pub mod api;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for setup code using a boxed
/// dynamic error trait object, keeping Send + Sync bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable startup errors; request handlers and background
/// tasks must report failures through their own channels instead.
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
/// Used for recoverable issues such as a failed scheduled token refresh or an
/// upstream request error that has already been translated into a response.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
