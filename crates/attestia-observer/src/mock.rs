use attestia_core::AttestiaError;

use crate::types::TransferEvent;

/// Outcome of a single raw record in a mocked RPC transfer batch. Models
/// the shapes a real EVM/Solana/XRPL RPC client can hand back: a clean
/// transfer, a dropped/null transaction the backend silently skips, or a
/// failure partway through detail-fetching that must fail the entire
/// batch (fail-closed contract).
#[derive(Clone, Debug)]
pub enum MockRecord {
    Transfer(TransferEvent),
    /// A null/dropped transaction in the batch; skipped without erroring.
    Dropped,
    /// An unrecognised instruction/log shape; skipped without erroring.
    Unrecognised,
    /// The underlying fetch for this record failed; fails the whole call.
    FetchFailed(String),
}

/// Stand-in for an opaque per-chain RPC client. Real deployments would
/// replace this with an actual EVM/Solana/XRPL JSON-RPC client; this kernel
/// only specifies the uniform `Observer` port each backend must expose, so
/// the mock holds pre-seeded responses a caller injects via
/// `with_balance`/`with_transfers` for tests and demos.
#[derive(Default)]
pub struct MockChainData {
    pub latest_block: Option<u64>,
    pub finalized_block: Option<u64>,
    pub safe_block: Option<u64>,
    pub balance: Option<(String, u32, String, u64)>,
    pub token_balances: std::collections::HashMap<String, (String, u32, String, u64)>,
    pub transfer_records: Vec<MockRecord>,
}

impl MockChainData {
    pub fn with_status(mut self, latest: u64, finalized: u64, safe: u64) -> Self {
        self.latest_block = Some(latest);
        self.finalized_block = Some(finalized);
        self.safe_block = Some(safe);
        self
    }

    pub fn with_balance(mut self, balance: &str, decimals: u32, symbol: &str, at_block: u64) -> Self {
        self.balance = Some((balance.to_string(), decimals, symbol.to_string(), at_block));
        self
    }

    pub fn with_token_balance(
        mut self,
        token: &str,
        balance: &str,
        decimals: u32,
        symbol: &str,
        at_block: u64,
    ) -> Self {
        self.token_balances.insert(
            token.to_string(),
            (balance.to_string(), decimals, symbol.to_string(), at_block),
        );
        self
    }

    pub fn with_records(mut self, records: Vec<MockRecord>) -> Self {
        self.transfer_records = records;
        self
    }
}

/// Applies the batch-level fail-closed rule used by every backend's
/// `get_transfers`: any `FetchFailed` record fails the whole call; dropped
/// and unrecognised records are silently skipped; survivors are returned
/// unsorted (callers sort by `(blockNumber, txHash)`).
pub fn resolve_records(records: &[MockRecord]) -> Result<Vec<TransferEvent>, AttestiaError> {
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        match record {
            MockRecord::Transfer(event) => out.push(event.clone()),
            MockRecord::Dropped | MockRecord::Unrecognised => continue,
            MockRecord::FetchFailed(reason) => {
                return Err(AttestiaError::NetworkError(format!(
                    "transfer detail fetch failed: {reason}"
                )))
            }
        }
    }
    Ok(out)
}
