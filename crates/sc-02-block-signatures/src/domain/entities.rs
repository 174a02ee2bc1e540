//! # Domain Entities
//!
//! Decoded block result envelope and the commit signatures it carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::BlockQueryError;

/// Which block a commit signature votes for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockIdFlag {
    /// No vote received from this validator.
    Absent,
    /// Voted for the committed block.
    Commit,
    /// Voted nil.
    Nil,
    /// Flag value this crate does not know.
    Unknown(u8),
}

impl From<u8> for BlockIdFlag {
    fn from(raw: u8) -> Self {
        match raw {
            1 => Self::Absent,
            2 => Self::Commit,
            3 => Self::Nil,
            other => Self::Unknown(other),
        }
    }
}

impl From<BlockIdFlag> for u8 {
    fn from(flag: BlockIdFlag) -> Self {
        match flag {
            BlockIdFlag::Absent => 1,
            BlockIdFlag::Commit => 2,
            BlockIdFlag::Nil => 3,
            BlockIdFlag::Unknown(other) => other,
        }
    }
}

/// One validator's signature on a block's commit.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSignature {
    /// Vote kind.
    pub block_id_flag: BlockIdFlag,
    /// Raw validator address bytes (hex on the wire).
    pub validator_address: Vec<u8>,
    /// Raw signature bytes (base64 on the wire). Empty for absent votes.
    pub signature: Vec<u8>,
    /// Vote timestamp as sent by the node.
    pub timestamp: Option<String>,
}

impl CommitSignature {
    /// Validator address as uppercase hex, the way nodes print it.
    pub fn validator_address_hex(&self) -> String {
        hex::encode_upper(&self.validator_address)
    }

    /// Whether a signature is attached.
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }
}

impl fmt::Debug for CommitSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitSignature")
            .field("block_id_flag", &self.block_id_flag)
            .field("validator_address", &self.validator_address_hex())
            .field("signature", &hex::encode(&self.signature))
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

/// Signatures of `result.block.last_commit`, in block order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSignatureSet {
    /// Height of the commit (the previous block).
    pub height: Option<u64>,
    /// Consensus round of the commit.
    pub round: Option<u32>,
    /// Signatures in the order the block lists them.
    pub signatures: Vec<CommitSignature>,
}

impl CommitSignatureSet {
    /// Number of signatures.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether there are no signatures.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Iterate in block order.
    pub fn iter(&self) -> std::slice::Iter<'_, CommitSignature> {
        self.signatures.iter()
    }

    /// First signature from `validator_address`.
    pub fn find_by_validator(&self, validator_address: &[u8]) -> Option<&CommitSignature> {
        self.signatures
            .iter()
            .find(|sig| sig.validator_address == validator_address)
    }

    /// Whether `validator_address` appears in the set.
    pub fn contains_validator(&self, validator_address: &[u8]) -> bool {
        self.find_by_validator(validator_address).is_some()
    }

    /// Validators present in both sets whose signature bytes differ.
    ///
    /// See [`conflicting_signers`](crate::algorithms::conflicting_signers).
    pub fn conflicting_signers(&self, other: &CommitSignatureSet) -> Vec<Vec<u8>> {
        crate::algorithms::conflicting_signers(self, other)
    }
}

impl<'a> IntoIterator for &'a CommitSignatureSet {
    type Item = &'a CommitSignature;
    type IntoIter = std::slice::Iter<'a, CommitSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for CommitSignatureSet {
    type Item = CommitSignature;
    type IntoIter = std::vec::IntoIter<CommitSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.signatures.into_iter()
    }
}

/// Error payload of a JSON-RPC error envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorPayload {
    /// JSON-RPC error code.
    pub code: i64,
    /// Short message.
    pub message: String,
    /// Optional detail.
    pub data: Option<String>,
}

/// What the node answered with. Exactly one of the two.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvelopeOutcome {
    /// A block; only its commit signatures are kept.
    Block(CommitSignatureSet),
    /// An error payload.
    Error(RpcErrorPayload),
}

/// Decoded `/block` response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockResultEnvelope {
    /// Protocol version, always `"2.0"` once decoded.
    pub jsonrpc: String,
    /// Request id echoed by the node.
    pub id: i64,
    /// Block or error.
    pub outcome: EnvelopeOutcome,
}

impl BlockResultEnvelope {
    /// Whether the node answered with an error payload.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, EnvelopeOutcome::Error(_))
    }

    /// Signatures of the block, or the node's error as [`BlockQueryError::Rpc`].
    pub fn into_signatures(self) -> Result<CommitSignatureSet, BlockQueryError> {
        match self.outcome {
            EnvelopeOutcome::Block(set) => Ok(set),
            EnvelopeOutcome::Error(RpcErrorPayload {
                code,
                message,
                data,
            }) => Err(BlockQueryError::Rpc {
                code,
                message,
                data,
            }),
        }
    }
}
