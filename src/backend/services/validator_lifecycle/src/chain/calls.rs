//! Calldata encoding for the validator-manager entry points.
//!
//! The manager, the proof-of-authority manager, and the staking manager all
//! expose the same entry-point shapes, so one encoding serves every routing
//! target.

use chain_models::ids::{NodeId, ValidationId};

/// Typed entry-point calls on a validator-manager contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerCall {
    InitiateRegistration {
        node_id: NodeId,
        bls_public_key: Vec<u8>,
        weight: u64,
    },
    InitiateRemoval {
        validation_id: ValidationId,
    },
    /// Idempotent alternate entry point for a removal whose first initiate
    /// reverted
    ResendRemoval {
        validation_id: ValidationId,
    },
    InitiateWeightUpdate {
        validation_id: ValidationId,
        new_weight: u64,
    },
    CompleteRegistration {
        message_index: u32,
    },
    CompleteRemoval {
        message_index: u32,
    },
    CompleteWeightUpdate {
        message_index: u32,
    },
}

impl ManagerCall {
    pub fn selector(&self) -> [u8; 4] {
        match self {
            ManagerCall::InitiateRegistration { .. } => [0x5a, 0xb0, 0x3a, 0x4d],
            ManagerCall::InitiateRemoval { .. } => [0x97, 0xfb, 0x70, 0xd4],
            ManagerCall::ResendRemoval { .. } => [0x0c, 0xf6, 0x7d, 0xb9],
            ManagerCall::InitiateWeightUpdate { .. } => [0xb6, 0xe6, 0xa2, 0x8f],
            ManagerCall::CompleteRegistration { .. } => [0xa3, 0xa6, 0x5e, 0x28],
            ManagerCall::CompleteRemoval { .. } => [0x67, 0x0b, 0x96, 0x80],
            ManagerCall::CompleteWeightUpdate { .. } => [0x46, 0x2b, 0x8e, 0xf6],
        }
    }

    /// ABI-encode the call: 4-byte selector followed by 32-byte-word args
    pub fn encode(&self) -> Vec<u8> {
        let tokens: Vec<Token> = match self {
            ManagerCall::InitiateRegistration {
                node_id,
                bls_public_key,
                weight,
            } => vec![
                Token::Bytes(node_id.as_str().as_bytes().to_vec()),
                Token::Bytes(bls_public_key.clone()),
                Token::Uint(u128::from(*weight)),
            ],
            ManagerCall::InitiateRemoval { validation_id }
            | ManagerCall::ResendRemoval { validation_id } => {
                vec![Token::FixedBytes(validation_id.0)]
            }
            ManagerCall::InitiateWeightUpdate {
                validation_id,
                new_weight,
            } => vec![
                Token::FixedBytes(validation_id.0),
                Token::Uint(u128::from(*new_weight)),
            ],
            ManagerCall::CompleteRegistration { message_index }
            | ManagerCall::CompleteRemoval { message_index }
            | ManagerCall::CompleteWeightUpdate { message_index } => {
                vec![Token::Uint(u128::from(*message_index))]
            }
        };

        let mut out = Vec::with_capacity(4 + tokens.len() * 32);
        out.extend_from_slice(&self.selector());
        out.extend_from_slice(&encode_tokens(&tokens));
        out
    }
}

enum Token {
    Uint(u128),
    FixedBytes([u8; 32]),
    Bytes(Vec<u8>),
}

fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Standard head/tail ABI encoding: static args inline, dynamic args as
/// offsets into a tail of length-prefixed padded data.
fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * 32;
    let mut head = Vec::with_capacity(head_len);
    let mut tail: Vec<u8> = Vec::new();

    for token in tokens {
        match token {
            Token::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            Token::FixedBytes(bytes) => head.extend_from_slice(bytes),
            Token::Bytes(data) => {
                head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
                tail.extend_from_slice(&uint_word(data.len() as u128));
                tail.extend_from_slice(data);
                let rem = data.len() % 32;
                if rem != 0 {
                    tail.resize(tail.len() + (32 - rem), 0);
                }
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_call_encodes_selector_and_words() {
        let mut raw = [0u8; 32];
        raw[31] = 7;
        let call = ManagerCall::InitiateWeightUpdate {
            validation_id: ValidationId(raw),
            new_weight: 42,
        };
        let encoded = call.encode();
        assert_eq!(&encoded[..4], &call.selector());
        assert_eq!(encoded.len(), 4 + 64);
        assert_eq!(&encoded[4..36], &raw);
        assert_eq!(encoded[67], 42);
    }

    #[test]
    fn dynamic_args_are_offset_encoded() {
        let call = ManagerCall::InitiateRegistration {
            node_id: NodeId("NodeID-abc".to_string()),
            bls_public_key: vec![0xaa; 48],
            weight: 100,
        };
        let encoded = call.encode();
        let body = &encoded[4..];
        // Three head words, then the two dynamic tails.
        assert_eq!(&body[..32], &uint_word(96));
        // "NodeID-abc" pads to one word, plus its length word.
        assert_eq!(&body[32..64], &uint_word(96 + 64));
        assert_eq!(&body[64..96], &uint_word(100));
        // First tail: length 10, then the bytes.
        assert_eq!(&body[96..128], &uint_word(10));
        assert_eq!(&body[128..138], b"NodeID-abc");
        // Second tail: length 48, then 48 bytes padded to 64.
        assert_eq!(&body[160..192], &uint_word(48));
        assert_eq!(body.len(), 96 + 64 + 96);
    }

    #[test]
    fn removal_and_resend_use_distinct_selectors() {
        let id = ValidationId([1u8; 32]);
        let initiate = ManagerCall::InitiateRemoval { validation_id: id };
        let resend = ManagerCall::ResendRemoval { validation_id: id };
        assert_ne!(initiate.selector(), resend.selector());
        // Same argument encoding either way.
        assert_eq!(initiate.encode()[4..], resend.encode()[4..]);
    }
}
