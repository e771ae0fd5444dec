mod common;

use anyhow::Result;

use chain_models::session::{LifecyclePhase, LifecycleSession, OperationRequest};
use validator_lifecycle::repositories::memory::InMemorySessionRepository;
use validator_lifecycle::repositories::traits::SessionRepository;

use common::*;

fn remove_session(suffix: &str) -> LifecycleSession {
    LifecycleSession::new(
        addr(0x10),
        subnet_id(),
        OperationRequest::Remove {
            node_id: node_id(suffix),
        },
    )
}

#[tokio::test]
async fn create_then_get_round_trips() -> Result<()> {
    let repo = InMemorySessionRepository::new();
    let session = remove_session("1");

    repo.create(session.clone()).await?;
    let fetched = repo.get(session.id).await?.unwrap();
    assert_eq!(fetched, session);
    Ok(())
}

#[tokio::test]
async fn get_unknown_id_is_none() -> Result<()> {
    let repo = InMemorySessionRepository::new();
    assert!(repo.get(uuid::Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn update_replaces_the_stored_session() -> Result<()> {
    let repo = InMemorySessionRepository::new();
    let mut session = remove_session("1");
    repo.create(session.clone()).await?;

    session.phase = LifecyclePhase::Initiated;
    session.artifacts.initiate_tx_hash = Some(tx_hash(0x01));
    session.touch();
    repo.update(&session).await?;

    let fetched = repo.get(session.id).await?.unwrap();
    assert_eq!(fetched.phase, LifecyclePhase::Initiated);
    assert_eq!(fetched.artifacts.initiate_tx_hash, Some(tx_hash(0x01)));
    Ok(())
}

#[tokio::test]
async fn find_by_initiate_tx_matches_only_the_owning_session() -> Result<()> {
    let repo = InMemorySessionRepository::new();

    let mut with_tx = remove_session("1");
    with_tx.artifacts.initiate_tx_hash = Some(tx_hash(0xaa));
    repo.create(with_tx.clone()).await?;
    repo.create(remove_session("2")).await?;

    let found = repo.find_by_initiate_tx(tx_hash(0xaa)).await?.unwrap();
    assert_eq!(found.id, with_tx.id);
    assert!(repo.find_by_initiate_tx(tx_hash(0xbb)).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_session() -> Result<()> {
    let repo = InMemorySessionRepository::new();
    let session = remove_session("1");
    repo.create(session.clone()).await?;

    repo.delete(session.id).await?;
    assert!(repo.get(session.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn list_active_excludes_completed_sessions() -> Result<()> {
    let repo = InMemorySessionRepository::new();

    let open = remove_session("1");
    repo.create(open.clone()).await?;

    let mut submitted = remove_session("2");
    submitted.phase = LifecyclePhase::Submitted;
    repo.create(submitted.clone()).await?;

    let mut completed = remove_session("3");
    completed.phase = LifecyclePhase::Completed;
    repo.create(completed).await?;

    let active = repo.list_active().await?;
    assert_eq!(active.len(), 2);
    assert!(active.iter().any(|s| s.id == open.id));
    assert!(active.iter().any(|s| s.id == submitted.id));
    Ok(())
}
