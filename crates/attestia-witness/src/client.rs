use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use attestia_core::AttestiaError;

/// Mock external-chain client standing in for the opaque per-chain RPC
/// client a real witness submitter would hold. `submit_outcomes` lets
/// tests queue a sequence of failures followed by a success to exercise
/// the retry policy.
#[derive(Default)]
pub struct MockWitnessClient {
    chain_id: String,
    submit_outcomes: Mutex<VecDeque<Result<(String, u64), AttestiaError>>>,
    ledger: Mutex<HashMap<String, crate::types::WitnessMemo>>,
}

impl MockWitnessClient {
    pub fn new(chain_id: &str) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            submit_outcomes: Mutex::new(VecDeque::new()),
            ledger: Mutex::new(HashMap::new()),
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Queues the outcome of the next `submit` call, in order.
    pub fn queue_outcome(&self, outcome: Result<(String, u64), AttestiaError>) {
        self.submit_outcomes.lock().unwrap().push_back(outcome);
    }

    pub async fn submit(&self, memo: &crate::types::WitnessMemo) -> Result<(String, u64), AttestiaError> {
        let outcome = self
            .submit_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AttestiaError::NetworkError("no outcome queued".into())));
        if let Ok((tx_hash, _)) = &outcome {
            self.ledger.lock().unwrap().insert(tx_hash.clone(), memo.clone());
        }
        outcome
    }

    pub fn fetch_memo(&self, tx_hash: &str) -> Option<crate::types::WitnessMemo> {
        self.ledger.lock().unwrap().get(tx_hash).cloned()
    }
}
