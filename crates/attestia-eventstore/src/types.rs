use serde::{Deserialize, Serialize};

/// Optimistic-concurrency precondition for `append`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedVersion {
    /// The stream must currently be exactly this version.
    Exact(u64),
    /// The stream must not exist yet.
    NoStream,
    /// No check is performed.
    Any,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AppendOptions {
    pub expected_version: Option<ExpectedVersion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendResult {
    pub stream_id: String,
    pub from_version: u64,
    pub to_version: u64,
    pub count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ReadOptions {
    pub from_version: Option<u64>,
    pub max_count: Option<usize>,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ReadAllOptions {
    pub from_position: Option<u64>,
    pub max_count: Option<usize>,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainError {
    pub position: u64,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    pub valid: bool,
    pub last_verified_position: u64,
    pub errors: Vec<ChainError>,
}
