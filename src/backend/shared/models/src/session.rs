use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::ids::{Address, NodeId, SubnetId, TxHash, ValidationId};
use crate::Timestamped;

/// The three supported lifecycle operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Register,
    Remove,
    ChangeWeight,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Register => "register",
            OperationKind::Remove => "remove",
            OperationKind::ChangeWeight => "change_weight",
        };
        f.write_str(s)
    }
}

/// User-supplied parameters for one lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationRequest {
    Register {
        node_id: NodeId,
        bls_public_key: Vec<u8>,
        weight: u64,
    },
    Remove {
        node_id: NodeId,
    },
    ChangeWeight {
        node_id: NodeId,
        new_weight: u64,
    },
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Register { .. } => OperationKind::Register,
            OperationRequest::Remove { .. } => OperationKind::Remove,
            OperationRequest::ChangeWeight { .. } => OperationKind::ChangeWeight,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        match self {
            OperationRequest::Register { node_id, .. }
            | OperationRequest::Remove { node_id }
            | OperationRequest::ChangeWeight { node_id, .. } => node_id,
        }
    }
}

/// Phases of one lifecycle session, strictly forward-only.
///
/// Each phase's artifact is a required input to the next, so no transition
/// may skip a phase and nothing rolls back after completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecyclePhase {
    NotStarted,
    Initiated,
    Submitted,
    Completed,
}

impl LifecyclePhase {
    pub fn next(&self) -> Option<LifecyclePhase> {
        match self {
            LifecyclePhase::NotStarted => Some(LifecyclePhase::Initiated),
            LifecyclePhase::Initiated => Some(LifecyclePhase::Submitted),
            LifecyclePhase::Submitted => Some(LifecyclePhase::Completed),
            LifecyclePhase::Completed => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == LifecyclePhase::Completed
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecyclePhase::NotStarted => "not_started",
            LifecyclePhase::Initiated => "initiated",
            LifecyclePhase::Submitted => "submitted",
            LifecyclePhase::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Per-phase outputs collected as a session advances.
///
/// None of this is authoritative; every artifact is re-derivable from the
/// recorded transaction ids and chain state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionArtifacts {
    /// Hash of the execution-chain transaction that initiated the operation
    pub initiate_tx_hash: Option<TxHash>,
    /// Unsigned warp message payload extracted from the initiate receipt
    pub warp_message: Option<Vec<u8>>,
    /// Platform-chain transaction id recorded after the user's manual relay
    pub platform_tx_id: Option<String>,
    /// Hash of the execution-chain completion transaction
    pub complete_tx_hash: Option<TxHash>,
}

/// One in-flight lifecycle operation for one validator.
///
/// Sessions hold no authoritative state; the chains do. A lost session is
/// recoverable by re-deriving artifacts from the known transaction ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleSession {
    pub id: Uuid,
    /// Validator-manager contract on the execution chain
    pub manager: Address,
    /// Subnet the managed L1 belongs to on the platform chain
    pub subnet_id: SubnetId,
    pub request: OperationRequest,
    pub phase: LifecyclePhase,
    /// Resolved for removal and weight-change operations during initiation
    pub validation_id: Option<ValidationId>,
    pub artifacts: SessionArtifacts,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LifecycleSession {
    pub fn new(manager: Address, subnet_id: SubnetId, request: OperationRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            manager,
            subnet_id,
            request,
            phase: LifecyclePhase::NotStarted,
            validation_id: None,
            artifacts: SessionArtifacts::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn operation_kind(&self) -> OperationKind {
        self.request.kind()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Timestamped for LifecycleSession {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_forward_only() {
        assert_eq!(LifecyclePhase::NotStarted.next(), Some(LifecyclePhase::Initiated));
        assert_eq!(LifecyclePhase::Initiated.next(), Some(LifecyclePhase::Submitted));
        assert_eq!(LifecyclePhase::Submitted.next(), Some(LifecyclePhase::Completed));
        assert_eq!(LifecyclePhase::Completed.next(), None);
        assert!(LifecyclePhase::Completed.is_terminal());
    }

    #[test]
    fn new_session_starts_empty() {
        let session = LifecycleSession::new(
            Address::ZERO,
            SubnetId("subnet".to_string()),
            OperationRequest::Remove {
                node_id: NodeId("NodeID-1".to_string()),
            },
        );
        assert_eq!(session.phase, LifecyclePhase::NotStarted);
        assert_eq!(session.operation_kind(), OperationKind::Remove);
        assert!(session.artifacts.initiate_tx_hash.is_none());
        assert!(session.validation_id.is_none());
    }
}
