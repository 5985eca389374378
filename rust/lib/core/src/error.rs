use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Scripts driving the CLI match on
// these, never on the human-readable message string.

/// Stable error code constants.
///
/// With `--output json` the CLI prints `{"code": "NOT_FOUND", "message": "..."}`.
/// Codes never change; messages may be reworded.
pub mod error_code {
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const NO_OPTIONS_AVAILABLE: &str = "NO_OPTIONS_AVAILABLE";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified error type for the unit tracker.
///
/// Each variant maps to a stable error code (see [`error_code`]) and a
/// process exit code.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The external store cannot be read or written (network, auth,
    /// missing resource). Fatal on load, non-fatal on save.
    #[error("{0}")]
    StoreUnavailable(String),

    /// A selection resolves to no record in the current table.
    #[error("{0}")]
    NotFound(String),

    /// A tower/floor combination yields no units.
    #[error("{0}")]
    NoOptionsAvailable(String),

    /// Input could not be parsed into a known value.
    #[error("{0}")]
    Validation(String),

    /// Unexpected internal error.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::StoreUnavailable(_) => error_code::STORE_UNAVAILABLE,
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::NoOptionsAvailable(_) => error_code::NO_OPTIONS_AVAILABLE,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceError::StoreUnavailable(_) => 3,
            ServiceError::NotFound(_) => 4,
            ServiceError::NoOptionsAvailable(_) => 5,
            ServiceError::Validation(_) => 2,
            ServiceError::Internal(_) => 1,
        }
    }

    /// Warnings abort the current action but leave the session usable.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ServiceError::NotFound(_) | ServiceError::NoOptionsAvailable(_)
        )
    }

    /// JSON body: `{"code": ..., "message": ...}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        })
    }
}
