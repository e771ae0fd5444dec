use async_trait::async_trait;
use uuid::Uuid;

use chain_models::ids::TxHash;
use chain_models::session::LifecycleSession;

use crate::utils::errors::Result;

/// Persistence for lifecycle sessions.
///
/// Sessions are caches over chain-observable state, keyed by session id and
/// by the initiate transaction hash so an interrupted session can be found
/// again from the ids the user still has.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: LifecycleSession) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<LifecycleSession>>;
    async fn find_by_initiate_tx(&self, tx_hash: TxHash) -> Result<Option<LifecycleSession>>;
    async fn update(&self, session: &LifecycleSession) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn list_active(&self) -> Result<Vec<LifecycleSession>>;
}
