use thiserror::Error;

/// Shared error taxonomy for the Attestia kernel.
///
/// Every component crate either returns this directly or wraps it with
/// `#[from]` plus a handful of component-local variants. The variant groups
/// below mirror the error codes enumerated in the core specification
/// one-to-one; HTTP-facing layers map each group to a fixed status code.
#[derive(Debug, Error)]
pub enum AttestiaError {
    // ── Input validation ─────────────────────────────────────────────────────
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // ── Optimistic concurrency ───────────────────────────────────────────────
    #[error("concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    // ── Illegal state transitions ────────────────────────────────────────────
    #[error("invalid state transition: {0}")]
    StateTransition(String),

    // ── Tamper / integrity failures ──────────────────────────────────────────
    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    // ── Observer / submitter lifecycle ───────────────────────────────────────
    #[error("not connected: {0}")]
    NotConnected(String),

    // ── Lookup misses ────────────────────────────────────────────────────────
    #[error("not found: {0}")]
    NotFound(String),

    // ── Duplicate / already-exists ───────────────────────────────────────────
    #[error("conflict: {0}")]
    Conflict(String),

    // ── Multi-sig threshold ──────────────────────────────────────────────────
    #[error("quorum not met: {0}")]
    QuorumNotMet(String),

    // ── Schema catalog ───────────────────────────────────────────────────────
    #[error("schema migration error: {0}")]
    SchemaMigration(String),

    // ── External RPC / chain failures ────────────────────────────────────────
    #[error("operation timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    NetworkError(String),

    // ── Catch-all for serialization/storage plumbing ────────────────────────
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AttestiaError {
    /// The short error-code tag used in external interfaces, independent of
    /// the human-readable message carried in the `Display` impl.
    pub fn code(&self) -> &'static str {
        match self {
            AttestiaError::InvalidInput(_) => "INVALID_INPUT",
            AttestiaError::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            AttestiaError::StateTransition(_) => "STATE_TRANSITION",
            AttestiaError::IntegrityViolation(_) => "INTEGRITY_VIOLATION",
            AttestiaError::NotConnected(_) => "NOT_CONNECTED",
            AttestiaError::NotFound(_) => "NOT_FOUND",
            AttestiaError::Conflict(_) => "CONFLICT",
            AttestiaError::QuorumNotMet(_) => "QUORUM_NOT_MET",
            AttestiaError::SchemaMigration(_) => "SCHEMA_MIGRATION",
            AttestiaError::Timeout(_) => "TIMEOUT",
            AttestiaError::NetworkError(_) => "NETWORK_ERROR",
            AttestiaError::Serialization(_) => "SERIALIZATION_ERROR",
            AttestiaError::Storage(_) => "STORAGE_ERROR",
        }
    }
}
