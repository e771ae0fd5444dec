use serde::{Deserialize, Serialize};

/// Kind of cross-chain message carried through a lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Registration,
    Removal,
    WeightUpdate,
}

/// An unsigned cross-chain message extracted from transaction logs.
///
/// Immutable once extracted; the payload bytes are exactly what the emitting
/// chain produced, with no re-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedMessage {
    pub kind: MessageKind,
    pub payload: Vec<u8>,
}

impl UnsignedMessage {
    pub fn new(kind: MessageKind, payload: Vec<u8>) -> Self {
        Self { kind, payload }
    }
}

impl From<crate::session::OperationKind> for MessageKind {
    fn from(kind: crate::session::OperationKind) -> Self {
        match kind {
            crate::session::OperationKind::Register => MessageKind::Registration,
            crate::session::OperationKind::Remove => MessageKind::Removal,
            crate::session::OperationKind::ChangeWeight => MessageKind::WeightUpdate,
        }
    }
}

/// Evidence tying a validation ID back to its originating registration event.
///
/// Required when attesting every message kind except initial registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Justification {
    pub payload: Vec<u8>,
}

impl Justification {
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }
}

/// A quorum-weighted BLS aggregate signature produced by the external
/// aggregation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedSignature {
    /// The signed message bytes, ready for access-list packing
    pub signed_payload: Vec<u8>,
    /// Percentage of signing weight represented by the aggregate
    pub quorum_percentage: u8,
}

/// One entry of the transaction access list read by the verification
/// precompile on the destination chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessListEntry {
    pub address: crate::ids::Address,
    pub storage_keys: Vec<[u8; 32]>,
}
