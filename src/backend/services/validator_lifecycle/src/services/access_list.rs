//! Packs a signed warp message into the access-list wire format the
//! destination chain's verification precompile reads alongside a
//! transaction.
//!
//! The message bytes are terminated with a delimiter, zero-padded to a
//! 32-byte multiple, and split into storage keys under the precompile's
//! address. Unpacking a packed entry yields the exact original bytes.

use chain_models::message::AccessListEntry;

use crate::chain::constants::WARP_PRECOMPILE_ADDRESS;
use crate::utils::errors::{LifecycleError, Result};

/// Terminator separating the message from zero padding
const PREDICATE_DELIMITER: u8 = 0xff;

pub fn pack(signed_message: &[u8]) -> Vec<AccessListEntry> {
    let mut buf = Vec::with_capacity(signed_message.len() + 33);
    buf.extend_from_slice(signed_message);
    buf.push(PREDICATE_DELIMITER);
    let rem = buf.len() % 32;
    if rem != 0 {
        buf.resize(buf.len() + (32 - rem), 0);
    }

    let storage_keys = buf
        .chunks_exact(32)
        .map(|chunk| {
            let mut key = [0u8; 32];
            key.copy_from_slice(chunk);
            key
        })
        .collect();

    vec![AccessListEntry {
        address: WARP_PRECOMPILE_ADDRESS,
        storage_keys,
    }]
}

pub fn unpack(entries: &[AccessListEntry]) -> Result<Vec<u8>> {
    let entry = entries
        .iter()
        .find(|entry| entry.address == WARP_PRECOMPILE_ADDRESS)
        .ok_or(LifecycleError::MalformedAccessList)?;

    let mut buf: Vec<u8> = Vec::with_capacity(entry.storage_keys.len() * 32);
    for key in &entry.storage_keys {
        buf.extend_from_slice(key);
    }

    while buf.last() == Some(&0) {
        buf.pop();
    }
    if buf.pop() != Some(PREDICATE_DELIMITER) {
        return Err(LifecycleError::MalformedAccessList);
    }

    Ok(buf)
}
