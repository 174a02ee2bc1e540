//! # Block Result Decoder
//!
//! Decodes the node's `/block` response:
//!
//! ```json
//! {"jsonrpc": "2.0", "id": -1, "result": {"block": {"last_commit": {
//!     "height": "1", "round": 0,
//!     "signatures": [{"block_id_flag": 2, "validator_address": "<hex>",
//!                     "timestamp": "...", "signature": "<base64>"}]}}}}
//! ```
//!
//! or the error-shaped envelope `{"jsonrpc", "id", "error": {code, message, data?}}`.
//! Unknown fields are ignored. Anything else is [`BlockQueryError::Malformed`]
//! and nothing is returned half-decoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer};

use crate::domain::{
    BlockIdFlag, BlockQueryError, BlockResultEnvelope, CommitSignature, CommitSignatureSet,
    EnvelopeOutcome, RpcErrorPayload,
};

const JSONRPC_VERSION: &str = "2.0";

#[derive(Deserialize)]
struct WireEnvelope {
    jsonrpc: Option<String>,
    id: Option<i64>,
    result: Option<WireResult>,
    error: Option<WireError>,
}

#[derive(Deserialize)]
struct WireResult {
    block: Option<WireBlock>,
}

#[derive(Deserialize)]
struct WireBlock {
    last_commit: Option<WireCommit>,
}

#[derive(Deserialize)]
struct WireCommit {
    height: Option<WireHeight>,
    round: Option<u32>,
    /// `None` when the key is missing, `Some(None)` for an explicit `null`.
    #[serde(default, deserialize_with = "present")]
    signatures: Option<Option<Vec<WireSignature>>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireHeight {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct WireSignature {
    block_id_flag: Option<u8>,
    validator_address: Option<String>,
    signature: Option<String>,
    timestamp: Option<String>,
}

#[derive(Deserialize)]
struct WireError {
    code: i64,
    message: String,
    data: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn malformed(reason: impl Into<String>) -> BlockQueryError {
    BlockQueryError::Malformed(reason.into())
}

/// Decode a raw `/block` response body.
///
/// An error envelope decodes successfully; use
/// [`BlockResultEnvelope::into_signatures`] to turn it into
/// [`BlockQueryError::Rpc`].
pub fn decode_block_result(raw: &[u8]) -> Result<BlockResultEnvelope, BlockQueryError> {
    let wire: WireEnvelope = serde_json::from_slice(raw).map_err(|e| malformed(e.to_string()))?;

    let jsonrpc = wire.jsonrpc.ok_or_else(|| malformed("missing jsonrpc"))?;
    if jsonrpc != JSONRPC_VERSION {
        return Err(malformed(format!("unsupported jsonrpc version {:?}", jsonrpc)));
    }
    let id = wire.id.ok_or_else(|| malformed("missing id"))?;

    let outcome = match (wire.result, wire.error) {
        (Some(result), None) => EnvelopeOutcome::Block(decode_commit(result)?),
        (None, Some(error)) => EnvelopeOutcome::Error(RpcErrorPayload {
            code: error.code,
            message: error.message,
            data: error.data,
        }),
        (Some(_), Some(_)) => return Err(malformed("both result and error present")),
        (None, None) => return Err(malformed("neither result nor error present")),
    };

    Ok(BlockResultEnvelope {
        jsonrpc,
        id,
        outcome,
    })
}

fn decode_commit(result: WireResult) -> Result<CommitSignatureSet, BlockQueryError> {
    let commit = result
        .block
        .ok_or_else(|| malformed("missing result.block"))?
        .last_commit
        .ok_or_else(|| malformed("missing result.block.last_commit"))?;

    let height = commit.height.map(decode_height).transpose()?;
    let wire_signatures = commit
        .signatures
        .ok_or_else(|| malformed("missing last_commit.signatures"))?
        .unwrap_or_default();

    let signatures = wire_signatures
        .into_iter()
        .enumerate()
        .map(|(index, sig)| decode_signature(index, sig))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CommitSignatureSet {
        height,
        round: commit.round,
        signatures,
    })
}

fn decode_height(height: WireHeight) -> Result<u64, BlockQueryError> {
    match height {
        WireHeight::Number(n) => Ok(n),
        WireHeight::Text(text) => text
            .parse::<u64>()
            .map_err(|_| malformed(format!("last_commit.height {:?} is not an integer", text))),
    }
}

fn decode_signature(index: usize, sig: WireSignature) -> Result<CommitSignature, BlockQueryError> {
    let address = sig
        .validator_address
        .ok_or_else(|| malformed(format!("signatures[{}]: missing validator_address", index)))?;
    let validator_address = hex::decode(&address).map_err(|e| {
        malformed(format!(
            "signatures[{}]: validator_address is not hex: {}",
            index, e
        ))
    })?;

    let signature = match sig.signature {
        Some(encoded) => STANDARD.decode(encoded.as_bytes()).map_err(|e| {
            malformed(format!("signatures[{}]: signature is not base64: {}", index, e))
        })?,
        None => Vec::new(),
    };

    Ok(CommitSignature {
        block_id_flag: sig.block_id_flag.map(BlockIdFlag::from).unwrap_or(BlockIdFlag::Unknown(0)),
        validator_address,
        signature,
        timestamp: sig.timestamp,
    })
}
