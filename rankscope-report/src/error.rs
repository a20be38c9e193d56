//! Report generation errors.

use rankscope_fetch::GatewayError;
use thiserror::Error;

/// Errors that end a report run.
///
/// Individual fetch failures never surface here; they degrade to defaults
/// inside the orchestrator. Only these conditions fail the whole run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No usable credential, an invalid target, or a gateway that cannot be
    /// built.
    #[error("Fatal configuration error: {0}")]
    FatalConfiguration(String),

    /// A gateway error that escaped a fetch wrapper.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// A failure in the orchestrator's own logic.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The persistence collaborator rejected the record.
    #[error("Store error: {0}")]
    Store(String),
}

impl ReportError {
    /// Returns true for configuration problems the caller must fix.
    pub fn is_fatal_configuration(&self) -> bool {
        matches!(self, Self::FatalConfiguration(_))
    }
}
