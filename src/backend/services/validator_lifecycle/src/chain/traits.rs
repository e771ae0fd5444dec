use async_trait::async_trait;

use chain_models::ids::{Address, NodeId, SubnetId, TxHash, ValidationId};
use chain_models::ownership::AuthorityContractKind;
use chain_models::receipt::{TransactionReceipt, TransactionRequest};
use chain_models::validator::ValidationRecord;

use crate::utils::errors::Result;

/// Read access to the execution chain ("L1") whose validator set is being
/// mutated. Implementations wrap an RPC endpoint; this client never holds
/// chain state of its own.
#[async_trait]
pub trait ExecutionChainClient: Send + Sync {
    /// Receipt of a mined transaction, or `None` while unmined/unindexed
    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionReceipt>>;

    /// Owner of a validator-manager contract
    async fn owner_of(&self, manager: Address) -> Result<Address>;

    /// Probe what kind of recognized authority contract lives at an address
    async fn authority_kind(&self, address: Address) -> Result<AuthorityContractKind>;

    /// The validator-manager instance a staking manager contract wraps,
    /// read from the staking contract's settings
    async fn underlying_validator_manager(&self, staking_manager: Address) -> Result<Address>;

    /// Validation ID registered for a node, or the all-zero sentinel when
    /// the node has no registration
    async fn registered_validation_id(
        &self,
        manager: Address,
        node_id: NodeId,
    ) -> Result<ValidationId>;

    /// Full registration record for a validation ID
    async fn validation_record(
        &self,
        manager: Address,
        validation_id: ValidationId,
    ) -> Result<ValidationRecord>;

    /// Total validator weight currently registered on the L1
    async fn total_weight(&self, manager: Address) -> Result<u64>;
}

/// Read access to the platform chain holding authoritative stake records
#[async_trait]
pub trait PlatformChainClient: Send + Sync {
    /// Decode the registration confirmation message emitted for a platform
    /// transaction
    async fn registration_confirmation(&self, platform_tx_id: String) -> Result<Vec<u8>>;

    /// Decode the weight-update confirmation message emitted for a platform
    /// transaction (weight zero confirms a removal)
    async fn weight_update_confirmation(&self, platform_tx_id: String) -> Result<Vec<u8>>;

    /// Locate the original registration message for a validation ID, used to
    /// justify non-registration attestations
    async fn registration_justification(
        &self,
        validation_id: ValidationId,
        subnet_id: SubnetId,
    ) -> Result<Option<Vec<u8>>>;
}

/// An opaque transaction signer. No key material crosses this boundary.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    async fn request_addresses(&self) -> Result<Vec<Address>>;

    async fn sign_and_send(&self, tx: TransactionRequest) -> Result<TxHash>;
}
