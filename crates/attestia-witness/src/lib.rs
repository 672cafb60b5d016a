pub mod client;
pub mod memo;
pub mod retry;
pub mod types;
pub mod witness;

pub use client::MockWitnessClient;
pub use memo::{decode_memo, encode_memo, MEMO_FORMAT, MEMO_TYPE};
pub use retry::{is_transient, retry_with_backoff};
pub use types::{RetryPolicy, WitnessMemo, WitnessRecord, WitnessSubmitError, WitnessVerification};
pub use witness::{submit_multi_sig, submit_single_sig, verify_witness};
