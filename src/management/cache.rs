use std::{future::Future, sync::Arc, time::Duration};

use serde_json::Value;
use tokio::{sync::Mutex, time::Instant};

use crate::types::ApiError;

/// How long a cached analysis document is served before being refetched.
const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheSlot {
    track_id: String,
    payload: Value,
    fetched_at: Instant,
}

/// Single-slot, time-boxed cache for the current track's audio analysis.
///
/// Only the currently playing track's analysis is ever relevant, so this is
/// deliberately one slot rather than a map: a different track or an expired
/// entry overwrites the slot wholesale. A fetch racing a track change is not
/// synchronized against; the last fetch to complete wins the slot, and the
/// cache self-corrects on the next request.
#[derive(Clone)]
pub struct AnalysisCache {
    slot: Arc<Mutex<Option<CacheSlot>>>,
    ttl: Duration,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        AnalysisCache {
            slot: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    /// Returns the cached payload for `track_id`, or fetches and caches it.
    ///
    /// With no current track this fails with [`ApiError::NoActiveTrack`]
    /// without invoking `fetch`. A cached entry is served only when it is for
    /// the same track and younger than the TTL. On a miss, `fetch` runs
    /// outside the slot lock; its success replaces the slot, its failure
    /// leaves the previous slot untouched and propagates — stale data is not
    /// discarded on a failed refetch, but it is not served either.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        track_id: Option<&str>,
        fetch: F,
    ) -> Result<Value, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        let Some(track_id) = track_id else {
            return Err(ApiError::NoActiveTrack);
        };

        {
            let slot = self.slot.lock().await;
            if let Some(entry) = slot.as_ref() {
                if entry.track_id == track_id && entry.fetched_at.elapsed() < self.ttl {
                    return Ok(entry.payload.clone());
                }
            }
        }

        let payload = fetch().await?;

        let mut slot = self.slot.lock().await;
        *slot = Some(CacheSlot {
            track_id: track_id.to_string(),
            payload: payload.clone(),
            fetched_at: Instant::now(),
        });
        Ok(payload)
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new()
    }
}
