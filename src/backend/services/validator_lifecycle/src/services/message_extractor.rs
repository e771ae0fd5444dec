use std::sync::Arc;

use chain_models::ids::TxHash;
use chain_models::receipt::TransactionReceipt;
use tracing::debug;

use crate::chain::constants::{WARP_MESSAGE_SENT_TOPIC, WARP_PRECOMPILE_ADDRESS};
use crate::chain::traits::ExecutionChainClient;
use crate::chain::wait_for_receipt;
use crate::config::OrchestratorConfig;
use crate::utils::errors::{LifecycleError, Result};

/// Ordered rules for locating the warp message inside receipt logs.
///
/// Log ordering is not identical between direct calls and multisig-proxied
/// calls (the proxy interleaves an authorization event before the real one),
/// so the match order is an explicit list rather than per-call-site guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogRule {
    /// Emitting address is the warp precompile and topic0 is the
    /// "message sent" event: the data field is the payload
    PrecompileEvent,
    /// With two or more logs, the second log's data (index shifted by a
    /// relayed authorization event)
    SecondLog,
    /// The first log's data
    FirstLog,
}

const MATCH_ORDER: [LogRule; 3] = [LogRule::PrecompileEvent, LogRule::SecondLog, LogRule::FirstLog];

/// Locates an unsigned cross-chain message inside a transaction's logs
pub struct MessageExtractor {
    execution: Arc<dyn ExecutionChainClient>,
    config: OrchestratorConfig,
}

impl MessageExtractor {
    pub fn new(execution: Arc<dyn ExecutionChainClient>, config: OrchestratorConfig) -> Self {
        Self { execution, config }
    }

    /// Wait for the transaction's receipt and pull the message payload out
    /// of its logs
    pub async fn extract(&self, tx_hash: TxHash) -> Result<Vec<u8>> {
        let receipt = wait_for_receipt(
            self.execution.as_ref(),
            tx_hash,
            self.config.receipt_timeout(),
            self.config.receipt_poll_interval(),
        )
        .await?;
        Self::extract_from_receipt(&receipt)
    }

    /// Pure log search; deterministic over a given receipt
    pub fn extract_from_receipt(receipt: &TransactionReceipt) -> Result<Vec<u8>> {
        for rule in MATCH_ORDER {
            match rule {
                LogRule::PrecompileEvent => {
                    if let Some(log) = receipt.logs.iter().find(|log| {
                        log.address == WARP_PRECOMPILE_ADDRESS
                            && log.topics.first() == Some(&WARP_MESSAGE_SENT_TOPIC)
                    }) {
                        return Ok(log.data.clone());
                    }
                }
                LogRule::SecondLog => {
                    if receipt.logs.len() >= 2 {
                        debug!("no precompile event log, falling back to second log");
                        return Ok(receipt.logs[1].data.clone());
                    }
                }
                LogRule::FirstLog => {
                    if let Some(log) = receipt.logs.first() {
                        debug!("single log receipt, using first log data");
                        return Ok(log.data.clone());
                    }
                }
            }
        }
        Err(LifecycleError::MessageNotFound)
    }
}
