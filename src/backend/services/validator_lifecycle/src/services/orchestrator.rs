use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use chain_models::ids::{Address, NodeId, SubnetId, TxHash, ValidationId};
use chain_models::message::{Justification, UnsignedMessage};
use chain_models::receipt::TransactionReceipt;
use chain_models::session::{LifecyclePhase, LifecycleSession, OperationKind, OperationRequest};

use crate::chain::calls::ManagerCall;
use crate::chain::traits::{ExecutionChainClient, PlatformChainClient, WalletSigner};
use crate::chain::wait_for_receipt;
use crate::config::OrchestratorConfig;
use crate::repositories::traits::SessionRepository;
use crate::services::access_list;
use crate::services::aggregator_client::SignatureAggregator;
use crate::services::justification_resolver::JustificationResolver;
use crate::services::message_extractor::MessageExtractor;
use crate::services::ownership_resolver::{CompletionAuthority, OwnershipResolver};
use crate::utils::errors::{LifecycleError, Result, TransactionFailure};

/// Reject a weight change when the delta reaches 20% of total L1 weight.
///
/// Integer form of `|W' - W| / T >= 0.20`; widened to avoid overflow.
pub(crate) fn weight_change_within_limit(current: u64, proposed: u64, total: u64) -> bool {
    let delta = u128::from(current.abs_diff(proposed));
    delta * 5 < u128::from(total)
}

/// Sequences validator registration, removal, and weight-change operations
/// across the execution chain and the platform chain.
///
/// Each session is strictly sequential: every phase's output is a required
/// input to the next. Independent sessions share nothing mutable beyond
/// read-only chain queries and may run concurrently.
pub struct LifecycleOrchestrator {
    execution: Arc<dyn ExecutionChainClient>,
    platform: Arc<dyn PlatformChainClient>,
    wallet: Arc<dyn WalletSigner>,
    aggregator: Arc<dyn SignatureAggregator>,
    sessions: Arc<dyn SessionRepository>,
    ownership: OwnershipResolver,
    justifications: JustificationResolver,
    extractor: MessageExtractor,
    config: OrchestratorConfig,
}

impl LifecycleOrchestrator {
    pub fn new(
        execution: Arc<dyn ExecutionChainClient>,
        platform: Arc<dyn PlatformChainClient>,
        wallet: Arc<dyn WalletSigner>,
        aggregator: Arc<dyn SignatureAggregator>,
        sessions: Arc<dyn SessionRepository>,
        config: OrchestratorConfig,
    ) -> Self {
        let ownership = OwnershipResolver::new(execution.clone());
        let justifications = JustificationResolver::new(platform.clone());
        let extractor = MessageExtractor::new(execution.clone(), config.clone());
        Self {
            execution,
            platform,
            wallet,
            aggregator,
            sessions,
            ownership,
            justifications,
            extractor,
            config,
        }
    }

    /// Validate user input and open a new session in `NotStarted`
    pub async fn start_session(
        &self,
        manager: Address,
        subnet_id: SubnetId,
        request: OperationRequest,
    ) -> Result<LifecycleSession> {
        if request.node_id().is_empty() {
            return Err(LifecycleError::UserInput("node ID must not be empty".to_string()));
        }
        match &request {
            OperationRequest::Register {
                bls_public_key,
                weight,
                ..
            } => {
                if bls_public_key.is_empty() {
                    return Err(LifecycleError::UserInput(
                        "BLS public key must not be empty".to_string(),
                    ));
                }
                if *weight == 0 {
                    return Err(LifecycleError::UserInput(
                        "registration weight must be positive".to_string(),
                    ));
                }
            }
            OperationRequest::ChangeWeight { new_weight, .. } => {
                if *new_weight == 0 {
                    return Err(LifecycleError::UserInput(
                        "new weight must be positive".to_string(),
                    ));
                }
            }
            OperationRequest::Remove { .. } => {}
        }

        let session = LifecycleSession::new(manager, subnet_id, request);
        self.sessions.create(session.clone()).await?;
        info!(session = %session.id, operation = %session.operation_kind(), "lifecycle session opened");
        Ok(session)
    }

    /// Initiate phase: submit the operation-specific entry call on the
    /// execution chain and extract the emitted warp message from its receipt.
    pub async fn initiate(&self, session_id: Uuid) -> Result<TxHash> {
        let mut session = self.load(session_id).await?;
        ensure_phase(&session, LifecyclePhase::NotStarted)?;

        let authority = self.resolve_authority(&session).await?;

        let call = match session.request.clone() {
            OperationRequest::Register {
                node_id,
                bls_public_key,
                weight,
            } => ManagerCall::InitiateRegistration {
                node_id,
                bls_public_key,
                weight,
            },
            OperationRequest::Remove { node_id } => {
                let validation_id = self.lookup_validation_id(&authority, &node_id).await?;
                session.validation_id = Some(validation_id);
                ManagerCall::InitiateRemoval { validation_id }
            }
            OperationRequest::ChangeWeight { node_id, new_weight } => {
                let validation_id = self.lookup_validation_id(&authority, &node_id).await?;
                session.validation_id = Some(validation_id);
                let record = self
                    .execution
                    .validation_record(authority.lookup_target(), validation_id)
                    .await?;
                let total = self.execution.total_weight(authority.lookup_target()).await?;
                if total == 0 {
                    return Err(LifecycleError::ChainRpc(
                        "L1 reports zero total validator weight".to_string(),
                    ));
                }
                if !weight_change_within_limit(record.weight, new_weight, total) {
                    return Err(LifecycleError::WeightChangeTooLarge {
                        delta: record.weight.abs_diff(new_weight),
                        total,
                    });
                }
                ManagerCall::InitiateWeightUpdate {
                    validation_id,
                    new_weight,
                }
            }
        };

        let (tx_hash, receipt) = match self.send_and_confirm(&authority, call).await {
            Ok(confirmed) => confirmed,
            // A reverted removal initiate gets exactly one shot at the
            // idempotent resend entry point. No other failure is retried:
            // the remaining entry points are not idempotent.
            Err(LifecycleError::Transaction(TransactionFailure::Reverted))
                if session.operation_kind() == OperationKind::Remove =>
            {
                let validation_id = session.validation_id.ok_or(LifecycleError::ZeroValidationId)?;
                warn!(session = %session.id, "removal initiate reverted, retrying via resend entry point");
                self.send_and_confirm(&authority, ManagerCall::ResendRemoval { validation_id })
                    .await?
            }
            Err(e) => return Err(e),
        };

        let payload = MessageExtractor::extract_from_receipt(&receipt)?;
        session.artifacts.initiate_tx_hash = Some(tx_hash);
        session.artifacts.warp_message = Some(payload);
        session.phase = LifecyclePhase::Initiated;
        session.touch();
        self.sessions.update(&session).await?;
        info!(session = %session.id, tx = %tx_hash, "initiate phase confirmed");
        Ok(tx_hash)
    }

    /// Submit phase: the user relays the message to the platform chain out
    /// of band; only the resulting transaction id is recorded here.
    pub async fn record_submission(&self, session_id: Uuid, platform_tx_id: String) -> Result<()> {
        if platform_tx_id.trim().is_empty() {
            return Err(LifecycleError::UserInput(
                "platform transaction id must not be empty".to_string(),
            ));
        }

        let mut session = self.load(session_id).await?;
        ensure_phase(&session, LifecyclePhase::Initiated)?;

        session.artifacts.platform_tx_id = Some(platform_tx_id);
        session.phase = LifecyclePhase::Submitted;
        session.touch();
        self.sessions.update(&session).await?;
        info!(session = %session.id, "platform submission recorded");
        Ok(())
    }

    /// Complete phase: attest the platform chain's confirmation message and
    /// deliver it to the manager through the verification precompile.
    pub async fn complete(&self, session_id: Uuid) -> Result<TxHash> {
        let mut session = self.load(session_id).await?;
        ensure_phase(&session, LifecyclePhase::Submitted)?;

        let platform_tx_id = session
            .artifacts
            .platform_tx_id
            .clone()
            .ok_or_else(|| LifecycleError::UserInput("session has no platform transaction id".to_string()))?;

        let authority = self.resolve_authority(&session).await?;

        let kind = session.operation_kind();
        let confirmation = match kind {
            OperationKind::Register => self.platform.registration_confirmation(platform_tx_id).await?,
            OperationKind::Remove | OperationKind::ChangeWeight => {
                self.platform.weight_update_confirmation(platform_tx_id).await?
            }
        };

        // Initial registration needs no justification; everything else must
        // be tied back to its originating registration before the aggregator
        // is contacted.
        let justification: Option<Justification> = match kind {
            OperationKind::Register => None,
            OperationKind::Remove | OperationKind::ChangeWeight => {
                let validation_id = session.validation_id.ok_or(LifecycleError::ZeroValidationId)?;
                Some(
                    self.justifications
                        .resolve(validation_id, session.subnet_id.clone())
                        .await?,
                )
            }
        };

        let signature = self
            .aggregator
            .aggregate(
                confirmation,
                justification.map(|j| j.payload),
                session.subnet_id.clone(),
                self.config.quorum_percentage,
            )
            .await?;
        if signature.quorum_percentage < self.config.quorum_percentage {
            return Err(LifecycleError::QuorumNotMet {
                required: self.config.quorum_percentage,
                achieved: signature.quorum_percentage,
            });
        }

        let entries = access_list::pack(&signature.signed_payload);
        let call = match kind {
            OperationKind::Register => ManagerCall::CompleteRegistration { message_index: 0 },
            OperationKind::Remove => ManagerCall::CompleteRemoval { message_index: 0 },
            OperationKind::ChangeWeight => ManagerCall::CompleteWeightUpdate { message_index: 0 },
        };

        let tx_hash = authority.submit(call, entries).await?;
        let receipt = wait_for_receipt(
            self.execution.as_ref(),
            tx_hash,
            self.config.receipt_timeout(),
            self.config.receipt_poll_interval(),
        )
        .await?;
        if !receipt.is_success() {
            return Err(LifecycleError::Transaction(TransactionFailure::Reverted));
        }

        session.artifacts.complete_tx_hash = Some(tx_hash);
        session.phase = LifecyclePhase::Completed;
        session.touch();
        self.sessions.update(&session).await?;
        info!(session = %session.id, tx = %tx_hash, "lifecycle operation completed");
        Ok(tx_hash)
    }

    /// The warp message extracted during initiation, for the user's manual
    /// platform-chain relay
    pub async fn extracted_message(&self, session_id: Uuid) -> Result<UnsignedMessage> {
        let session = self.load(session_id).await?;
        let payload = session
            .artifacts
            .warp_message
            .clone()
            .ok_or(LifecycleError::InvalidPhase {
                expected: LifecyclePhase::Initiated,
                actual: session.phase,
            })?;
        Ok(UnsignedMessage::new(session.operation_kind().into(), payload))
    }

    /// Re-extract the warp message from a known initiate transaction, for
    /// sessions resumed after the original artifact was lost
    pub async fn reextract_message(&self, tx_hash: TxHash) -> Result<Vec<u8>> {
        self.extractor.extract(tx_hash).await
    }

    async fn load(&self, session_id: Uuid) -> Result<LifecycleSession> {
        self.sessions
            .get(session_id)
            .await?
            .ok_or(LifecycleError::SessionNotFound(session_id))
    }

    async fn resolve_authority(&self, session: &LifecycleSession) -> Result<CompletionAuthority> {
        let addresses = self.wallet.request_addresses().await?;
        let wallet_address = *addresses
            .first()
            .ok_or_else(|| LifecycleError::UserInput("wallet has no connected account".to_string()))?;
        let info = self.ownership.resolve(session.manager, wallet_address).await?;
        CompletionAuthority::new(session.manager, info, wallet_address, self.wallet.clone())
    }

    /// Validation-ID lookups go through the authority's lookup target, which
    /// for staking-manager ownership is the underlying manager instance.
    async fn lookup_validation_id(
        &self,
        authority: &CompletionAuthority,
        node_id: &NodeId,
    ) -> Result<ValidationId> {
        let validation_id = self
            .execution
            .registered_validation_id(authority.lookup_target(), node_id.clone())
            .await?;
        if validation_id.is_zero() {
            return Err(LifecycleError::ZeroValidationId);
        }
        Ok(validation_id)
    }

    async fn send_and_confirm(
        &self,
        authority: &CompletionAuthority,
        call: ManagerCall,
    ) -> Result<(TxHash, TransactionReceipt)> {
        let tx_hash = authority.submit(call, Vec::new()).await?;
        let receipt = wait_for_receipt(
            self.execution.as_ref(),
            tx_hash,
            self.config.receipt_timeout(),
            self.config.receipt_poll_interval(),
        )
        .await?;
        if !receipt.is_success() {
            return Err(LifecycleError::Transaction(TransactionFailure::Reverted));
        }
        Ok((tx_hash, receipt))
    }
}

fn ensure_phase(session: &LifecycleSession, expected: LifecyclePhase) -> Result<()> {
    if session.phase != expected {
        return Err(LifecycleError::InvalidPhase {
            expected,
            actual: session.phase,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_change_boundary_is_exact() {
        // Exactly 20% of total is rejected; just below passes.
        assert!(!weight_change_within_limit(100, 120, 100));
        assert!(weight_change_within_limit(100, 119, 100));
        assert!(!weight_change_within_limit(120, 100, 100));
        assert!(weight_change_within_limit(101, 120, 100));
    }

    #[test]
    fn weight_change_handles_extreme_values() {
        assert!(weight_change_within_limit(u64::MAX, u64::MAX, 1));
        assert!(!weight_change_within_limit(0, u64::MAX, u64::MAX));
        assert!(weight_change_within_limit(7, 7, 1));
    }
}
