use serde::{Deserialize, Serialize};

use crate::ids::Address;

/// What kind of contract (if any) lives at an owner address, as probed on
/// chain. Classification policy on top of this lives in the lifecycle
/// service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorityContractKind {
    /// Plain account with no recognized contract code
    Account,
    /// A recognized proof-of-authority multisig manager contract
    PoaManager,
    /// A recognized staking manager contract
    StakingManager,
}

/// Classification of the validator-manager contract's controlling authority.
///
/// Exhaustive and mutually exclusive; there is no fifth category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerKind {
    /// The connected wallet owns the manager and may sign directly
    Eoa,
    /// A proof-of-authority multisig manager owns the manager; calls are
    /// routed through it
    PoaManager,
    /// A staking manager owns the manager; calls are routed through it and
    /// validation-ID lookups target the underlying manager it wraps
    StakingManager,
    /// Some other account owns the manager; every mutating call must be
    /// rejected before any chain write
    NotAuthorized,
}

/// Resolved ownership of a validator-manager contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipInfo {
    pub owner_kind: OwnerKind,
    pub owner_address: Address,
    /// For `StakingManager` owners, the distinct validator-manager instance
    /// the staking contract wraps. Resolved by a secondary read before any
    /// validation-ID lookup.
    pub underlying_manager_address: Option<Address>,
}
