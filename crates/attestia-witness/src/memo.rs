use attestia_core::{canonical_json, AttestiaError};
use serde_json::Value as Json;

use crate::types::{WitnessMemo, MEMO_FORMAT, MEMO_TYPE};

/// Builds the three hex-encoded memo fields attached to a witness
/// transaction: `MemoType = hex("attestia/witness/v1")`,
/// `MemoFormat = hex("application/json")`, `MemoData = hex(canonical(payload))`.
pub fn encode_memo(payload: &Json) -> WitnessMemo {
    WitnessMemo {
        memo_type: hex::encode(MEMO_TYPE.as_bytes()),
        memo_format: hex::encode(MEMO_FORMAT.as_bytes()),
        memo_data: hex::encode(canonical_json(payload).as_bytes()),
    }
}

/// Decodes a memo back into its payload, rejecting anything whose type
/// field does not match the Attestia witness memo type.
pub fn decode_memo(memo: &WitnessMemo) -> Result<Json, AttestiaError> {
    let type_bytes = hex::decode(&memo.memo_type)
        .map_err(|e| AttestiaError::InvalidInput(format!("memo type is not valid hex: {e}")))?;
    let memo_type = String::from_utf8(type_bytes)
        .map_err(|e| AttestiaError::InvalidInput(format!("memo type is not valid utf-8: {e}")))?;
    if memo_type != MEMO_TYPE {
        return Err(AttestiaError::InvalidInput(format!(
            "unrecognised memo type: {memo_type}"
        )));
    }

    let data_bytes = hex::decode(&memo.memo_data)
        .map_err(|e| AttestiaError::InvalidInput(format!("memo data is not valid hex: {e}")))?;
    serde_json::from_slice(&data_bytes)
        .map_err(|e| AttestiaError::Serialization(format!("memo data is not valid JSON: {e}")))
}
