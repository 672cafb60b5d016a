pub mod reconciler;
pub mod types;

pub use reconciler::reconcile;
pub use types::{
    Attestation, Discrepancy, DiscrepancyKind, Intent, IntentStatus, MatchedRecord,
    ReconciliationOutput, ReconciliationReport, ReconciliationTotals, ReconcilerInput,
};
