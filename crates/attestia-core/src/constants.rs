//! ─── Attestia kernel constants ──────────────────────────────────────────────

/// Sentinel previous-hash for the first event ever appended to a stream.
///
/// Fixed to the SHA-256 of the empty byte string, per the open question in
/// the core specification ("the implementer must fix one 64-char hex
/// value and document it").
pub const GENESIS_HASH: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b85";

/// Maximum recursion depth accepted when parsing nested log/program
/// invocations (e.g. inner instructions on an observed chain). Chosen as a
/// small, generous bound per the design notes' open question.
pub const MAX_LOG_NESTING_DEPTH: usize = 32;
