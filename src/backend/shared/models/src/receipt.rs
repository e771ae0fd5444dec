use serde::{Deserialize, Serialize};

use crate::ids::Address;
use crate::message::AccessListEntry;

/// One log record emitted by a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Address of the emitting contract
    pub address: Address,
    /// Indexed topics; `topics[0]` is the event signature hash
    pub topics: Vec<[u8; 32]>,
    /// Unindexed event data
    pub data: Vec<u8>,
}

/// Execution status of a mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

/// A mined transaction's receipt, reduced to the fields this client reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub status: ReceiptStatus,
    pub logs: Vec<LogRecord>,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }
}

/// An unsigned transaction handed to the wallet for signing and broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub to: Address,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
}
