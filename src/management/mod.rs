//! High-level runtime state shared across requests.
//!
//! The two components here are the only shared mutable state in the process:
//! the [`TokenStore`] holding the live Spotify credential, and the
//! [`AnalysisCache`] holding the last fetched audio-analysis document. Both
//! are cheap to clone (internally `Arc`) and safe under concurrent use.

mod cache;
mod token;

pub use cache::AnalysisCache;
pub use token::TokenStore;
pub use token::refresh_now;
pub use token::spawn_scheduled_refresh;
