//! Graceful degradation for individual fetches.
//!
//! A report is assembled from many independent fetches. Apart from
//! credential problems, a failed fetch should cost the report one section,
//! not the whole run. [`with_default`] turns a failed fetch into its
//! default value, logs a warning and leaves a note in the gateway's
//! diagnostics.

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

use crate::gateway::Gateway;

/// Awaits `fetch`, substituting `default` on error.
///
/// `label` names the fetch in the warning and the diagnostics note.
pub async fn with_default<T, E, F>(gateway: &Gateway, label: &str, fetch: F, default: T) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) => {
            warn!(fetch = label, error = %e, "Fetch failed, continuing with default");
            gateway.record_note(format!("{label}: {e}"));
            default
        }
    }
}

/// [`with_default`] with `T::default()` as the fallback.
pub async fn or_default<T, E, F>(gateway: &Gateway, label: &str, fetch: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    with_default(gateway, label, fetch, T::default()).await
}
