use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use chain_models::ids::TxHash;
use chain_models::session::LifecycleSession;

use crate::repositories::traits::SessionRepository;
use crate::utils::errors::Result;

/// In-memory session store for tests and single-process deployments
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<BTreeMap<Uuid, LifecycleSession>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: LifecycleSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<LifecycleSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id).cloned())
    }

    async fn find_by_initiate_tx(&self, tx_hash: TxHash) -> Result<Option<LifecycleSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .find(|session| session.artifacts.initiate_tx_hash == Some(tx_hash))
            .cloned())
    }

    async fn update(&self, session: &LifecycleSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id);
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<LifecycleSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|session| !session.phase.is_terminal())
            .cloned()
            .collect())
    }
}
