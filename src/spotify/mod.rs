//! # Spotify Integration Module
//!
//! This module implements the upstream side of the bridge: the OAuth 2.0
//! authorization-code protocol against the Spotify accounts service and the
//! read-only player calls against the Spotify Web API.
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 authorization-code flow:
//! - **Authorize URL**: Deterministic construction of the browser redirect URL
//! - **Code Exchange**: One-shot exchange of an authorization code for a token
//!   pair using HTTP Basic client credentials
//! - **Token Refresh**: Obtains a fresh access token from a refresh token,
//!   honoring refresh-token rotation when Spotify supplies a new one
//!
//! ### Player Module
//!
//! [`player`] - Read-only player resource calls:
//! - **Currently Playing**: Fetches the playback state, distinguishing the
//!   "nothing playing" case from errors
//! - **Audio Analysis**: Fetches the immutable per-track analysis document
//!
//! ## Error Handling
//!
//! All functions return [`crate::types::ApiError`]. Timeouts are mapped to
//! their own variant so handlers never hang on a stuck upstream; token
//! endpoint rejections carry the upstream body for server-side logging only
//! and are never forwarded to clients.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Token exchange and refresh operations
//! - `GET /me/player/currently-playing` - Current playback state
//! - `GET /audio-analysis/{id}` - Per-track audio analysis

pub mod auth;
pub mod player;
