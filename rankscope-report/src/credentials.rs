//! API key resolution.
//!
//! A run uses the first key found in this order: the caller's own key, the
//! `RANKSCOPE_API_KEY` environment variable, the shared fallback key from
//! settings. Blank values count as absent. When nothing resolves the run
//! fails with a fatal configuration error instead of degrading.

use std::fmt;

use crate::error::ReportError;

/// Environment variable holding an API key.
pub const API_KEY_ENV: &str = "RANKSCOPE_API_KEY";

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialOrigin {
    /// Supplied with the request.
    Caller,
    /// Read from [`API_KEY_ENV`].
    Environment,
    /// The shared fallback key.
    Shared,
}

impl fmt::Display for CredentialOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Caller => "caller",
            Self::Environment => "environment",
            Self::Shared => "shared",
        })
    }
}

/// A resolved API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key: String,
    origin: CredentialOrigin,
}

impl Credential {
    /// The key itself.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Where the key came from.
    pub fn origin(&self) -> CredentialOrigin {
        self.origin
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("origin", &self.origin)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Candidate keys for a run.
#[derive(Default, Clone)]
pub struct CredentialSource {
    caller: Option<String>,
    environment: Option<String>,
    shared: Option<String>,
}

impl CredentialSource {
    /// A source with no candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the caller-supplied key.
    pub fn caller(mut self, key: Option<String>) -> Self {
        self.caller = key;
        self
    }

    /// Sets the shared fallback key.
    pub fn shared(mut self, key: Option<String>) -> Self {
        self.shared = key;
        self
    }

    /// Sets the environment candidate explicitly.
    pub fn environment(mut self, key: Option<String>) -> Self {
        self.environment = key;
        self
    }

    /// Reads the environment candidate from [`API_KEY_ENV`].
    pub fn from_env(self) -> Self {
        let key = std::env::var(API_KEY_ENV).ok();
        self.environment(key)
    }

    /// Picks the first usable key.
    pub fn resolve(&self) -> Result<Credential, ReportError> {
        [
            (&self.caller, CredentialOrigin::Caller),
            (&self.environment, CredentialOrigin::Environment),
            (&self.shared, CredentialOrigin::Shared),
        ]
        .into_iter()
        .find_map(|(key, origin)| {
            key.as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| Credential {
                    key: k.to_string(),
                    origin,
                })
        })
        .ok_or_else(|| {
            ReportError::FatalConfiguration(format!(
                "no API key: pass one explicitly, set {API_KEY_ENV}, or configure shared_api_key"
            ))
        })
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSource")
            .field("caller", &self.caller.is_some())
            .field("environment", &self.environment.is_some())
            .field("shared", &self.shared.is_some())
            .finish()
    }
}
