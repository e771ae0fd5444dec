#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;

use chain_models::ids::{Address, NodeId, SubnetId, TxHash, ValidationId};
use chain_models::message::AggregatedSignature;
use chain_models::ownership::AuthorityContractKind;
use chain_models::receipt::{LogRecord, ReceiptStatus, TransactionReceipt, TransactionRequest};
use chain_models::validator::ValidationRecord;

use validator_lifecycle::chain::constants::{WARP_MESSAGE_SENT_TOPIC, WARP_PRECOMPILE_ADDRESS};
use validator_lifecycle::chain::traits::{
    ExecutionChainClient, PlatformChainClient, WalletSigner,
};
use validator_lifecycle::services::aggregator_client::SignatureAggregator;
use validator_lifecycle::OrchestratorConfig;
use validator_lifecycle::Result;

mock! {
    pub ExecutionChain {}

    #[async_trait]
    impl ExecutionChainClient for ExecutionChain {
        async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionReceipt>>;
        async fn owner_of(&self, manager: Address) -> Result<Address>;
        async fn authority_kind(&self, address: Address) -> Result<AuthorityContractKind>;
        async fn underlying_validator_manager(&self, staking_manager: Address) -> Result<Address>;
        async fn registered_validation_id(&self, manager: Address, node_id: NodeId) -> Result<ValidationId>;
        async fn validation_record(&self, manager: Address, validation_id: ValidationId) -> Result<ValidationRecord>;
        async fn total_weight(&self, manager: Address) -> Result<u64>;
    }
}

mock! {
    pub PlatformChain {}

    #[async_trait]
    impl PlatformChainClient for PlatformChain {
        async fn registration_confirmation(&self, platform_tx_id: String) -> Result<Vec<u8>>;
        async fn weight_update_confirmation(&self, platform_tx_id: String) -> Result<Vec<u8>>;
        async fn registration_justification(
            &self,
            validation_id: ValidationId,
            subnet_id: SubnetId,
        ) -> Result<Option<Vec<u8>>>;
    }
}

mock! {
    pub Wallet {}

    #[async_trait]
    impl WalletSigner for Wallet {
        async fn request_addresses(&self) -> Result<Vec<Address>>;
        async fn sign_and_send(&self, tx: TransactionRequest) -> Result<TxHash>;
    }
}

mock! {
    pub Aggregator {}

    #[async_trait]
    impl SignatureAggregator for Aggregator {
        async fn aggregate(
            &self,
            message: Vec<u8>,
            justification: Option<Vec<u8>>,
            signing_subnet_id: SubnetId,
            quorum_percentage: u8,
        ) -> Result<AggregatedSignature>;
    }
}

pub fn addr(byte: u8) -> Address {
    Address([byte; 20])
}

pub fn tx_hash(byte: u8) -> TxHash {
    TxHash([byte; 32])
}

pub fn validation_id(byte: u8) -> ValidationId {
    ValidationId([byte; 32])
}

pub fn node_id(suffix: &str) -> NodeId {
    NodeId(format!("NodeID-{suffix}"))
}

pub fn subnet_id() -> SubnetId {
    SubnetId("2b175hLJhGdj3CzgXENso9CmwMgejaCQXhMFzBsm8hXbH2MF7".to_string())
}

/// Config with short waits so receipt polling never slows tests down
pub fn fast_config() -> OrchestratorConfig {
    OrchestratorConfig {
        receipt_timeout_ms: 500,
        receipt_poll_interval_ms: 5,
        ..OrchestratorConfig::default()
    }
}

pub fn warp_log(payload: &[u8]) -> LogRecord {
    LogRecord {
        address: WARP_PRECOMPILE_ADDRESS,
        topics: vec![WARP_MESSAGE_SENT_TOPIC],
        data: payload.to_vec(),
    }
}

pub fn unrelated_log(address: Address, payload: &[u8]) -> LogRecord {
    LogRecord {
        address,
        topics: vec![[0x11u8; 32]],
        data: payload.to_vec(),
    }
}

pub fn receipt(status: ReceiptStatus, logs: Vec<LogRecord>) -> TransactionReceipt {
    TransactionReceipt { status, logs }
}

pub fn success_receipt(logs: Vec<LogRecord>) -> TransactionReceipt {
    receipt(ReceiptStatus::Success, logs)
}

pub fn reverted_receipt() -> TransactionReceipt {
    receipt(ReceiptStatus::Reverted, vec![])
}
