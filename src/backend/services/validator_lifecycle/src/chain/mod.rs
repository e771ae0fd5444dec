pub mod calls;
pub mod constants;
pub mod traits;

use std::time::Duration;

use chain_models::ids::TxHash;
use chain_models::receipt::TransactionReceipt;

use crate::utils::errors::{LifecycleError, Result};
use traits::ExecutionChainClient;

/// Poll for a transaction receipt until it appears or the deadline passes.
///
/// The transaction may not yet be mined or indexed when polling starts, so
/// absence is retried; only the deadline turns into an error.
pub async fn wait_for_receipt(
    client: &dyn ExecutionChainClient,
    tx_hash: TxHash,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<TransactionReceipt> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(receipt) = client.transaction_receipt(tx_hash).await? {
            return Ok(receipt);
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(LifecycleError::Timeout(format!(
                "no receipt for transaction {tx_hash} within {}ms",
                timeout.as_millis()
            )));
        }
        tokio::time::sleep(poll_interval).await;
    }
}
