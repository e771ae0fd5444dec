use serde::{Deserialize, Serialize};

use crate::ids::{NodeId, SubnetId, ValidationId};

/// Registration status of a validator as reported by the manager contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    Unknown,
    PendingAdded,
    Active,
    PendingRemoved,
    Removed,
}

/// One validator's cross-chain-registered state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub validation_id: ValidationId,
    pub node_id: NodeId,
    pub subnet_id: SubnetId,
    pub weight: u64,
    pub status: ValidationStatus,
}
