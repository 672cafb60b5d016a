use crate::types::{ConsensusResult, Verdict, VerifierReport};

/// Consensus over N reports for the same `bundleHash` (C10). Callers are
/// responsible for passing in reports that actually share a `bundleHash`;
/// this function does not itself group by it.
pub fn compute_consensus(reports: &[VerifierReport], minimum_verifiers: usize) -> ConsensusResult {
    let n = reports.len();
    if n == 0 {
        return ConsensusResult {
            verdict: Verdict::Fail,
            quorum_reached: false,
            dissenters: Vec::new(),
            agreement_ratio: 0.0,
        };
    }

    let pass_count = reports.iter().filter(|r| r.verdict == Verdict::Pass).count();
    let verdict = if pass_count == n { Verdict::Pass } else { Verdict::Fail };

    let majority = if pass_count * 2 >= n { Verdict::Pass } else { Verdict::Fail };
    let majority_count = reports.iter().filter(|r| r.verdict == majority).count();

    let dissenters: Vec<String> = reports
        .iter()
        .filter(|r| r.verdict != majority)
        .map(|r| r.verifier_id.clone())
        .collect();

    ConsensusResult {
        verdict,
        quorum_reached: n >= minimum_verifiers,
        dissenters,
        agreement_ratio: majority_count as f64 / n as f64,
    }
}
