//! Trait definitions for `RankScope`.
//!
//! The report engine hands finished reports to a persistence collaborator.
//! Implementations live outside the core (see `rankscope-store`).

use crate::models::StoredReport;

/// Persistence collaborator for generated reports.
///
/// A store must return exactly the record it was given: the report value,
/// field for field, including the call log and credit totals.
pub trait ReportStore: Send + Sync {
    /// Error produced by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Saves (or replaces) the record stored under `id`.
    fn save(
        &self,
        id: &str,
        record: &StoredReport,
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;

    /// Loads the record stored under `id`.
    ///
    /// Returns `Ok(None)` when nothing is stored under that id.
    fn load(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<StoredReport>, Self::Error>> + Send;
}
