//! # API Module
//!
//! HTTP handlers for the bridge server. The surface is deliberately narrow:
//! the OAuth endpoints seed and maintain the credential, and the read
//! endpoints re-expose upstream player data without requiring callers to
//! handle OAuth themselves.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the browser to the Spotify authorization page.
//! - [`callback`] - Completes the authorization-code exchange and stores the
//!   resulting token. Answers plain text; failures are non-2xx (`400` for a
//!   missing code, `502` for a rejected exchange).
//! - [`refresh`] - Forces a token refresh and reports `{success: bool}`.
//!
//! ### Player data
//!
//! - [`now_playing`] - Passes the upstream currently-playing document
//!   through; `204` when nothing is playing.
//! - [`audio_analysis`] - Audio analysis for the current track, served from
//!   the single-slot cache where possible.
//!
//! ### Monitoring
//!
//! - [`health`] - Health check returning status and version.
//!
//! ## Error policy
//!
//! Handlers isolate failures to their own response. Upstream error details
//! are logged server-side but never forwarded; clients get a fixed message
//! per endpoint. Calls made before any authorization completed answer `401`
//! without contacting the upstream at all.

mod auth;
mod health;
mod playback;

pub use auth::callback;
pub use auth::login;
pub use auth::refresh;
pub use health::health;
pub use playback::audio_analysis;
pub use playback::now_playing;
