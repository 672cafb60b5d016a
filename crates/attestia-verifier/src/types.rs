use attestia_core::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubsystemCheck {
    pub subsystem: String,
    pub expected: String,
    pub actual: String,
    pub matches: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationOptions {
    pub verifier_id: String,
    pub label: Option<String>,
    #[serde(default)]
    pub strict_mode: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifierReport {
    pub report_id: String,
    pub verifier_id: String,
    pub verdict: Verdict,
    pub bundle_hash: String,
    pub subsystem_checks: Vec<SubsystemCheck>,
    pub discrepancies: Vec<String>,
    pub verified_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayVerification {
    pub hash: String,
    pub matches_expected: Option<bool>,
    pub discrepancies: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub verdict: Verdict,
    pub quorum_reached: bool,
    pub dissenters: Vec<String>,
    pub agreement_ratio: f64,
}
