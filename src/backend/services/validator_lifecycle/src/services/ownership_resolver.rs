use std::sync::Arc;

use tracing::{debug, warn};

use chain_models::ids::{Address, TxHash};
use chain_models::message::AccessListEntry;
use chain_models::ownership::{AuthorityContractKind, OwnerKind, OwnershipInfo};
use chain_models::receipt::TransactionRequest;

use crate::chain::calls::ManagerCall;
use crate::chain::traits::{ExecutionChainClient, WalletSigner};
use crate::utils::errors::{LifecycleError, Result};

/// Classifies the controlling authority of a validator-manager contract.
///
/// The classification is exhaustive and mutually exclusive: the owner is the
/// connected wallet, a recognized PoA multisig manager, a recognized staking
/// manager, or some other account the session cannot act for.
pub struct OwnershipResolver {
    execution: Arc<dyn ExecutionChainClient>,
}

impl OwnershipResolver {
    pub fn new(execution: Arc<dyn ExecutionChainClient>) -> Self {
        Self { execution }
    }

    pub async fn resolve(&self, manager: Address, wallet_address: Address) -> Result<OwnershipInfo> {
        let owner = self.execution.owner_of(manager).await?;
        let kind = self.execution.authority_kind(owner).await?;

        let info = match kind {
            AuthorityContractKind::PoaManager => OwnershipInfo {
                owner_kind: OwnerKind::PoaManager,
                owner_address: owner,
                underlying_manager_address: None,
            },
            AuthorityContractKind::StakingManager => {
                // The staking contract wraps a distinct manager instance;
                // validation-ID lookups must target that one, never the
                // staking contract itself.
                let underlying = self.execution.underlying_validator_manager(owner).await?;
                OwnershipInfo {
                    owner_kind: OwnerKind::StakingManager,
                    owner_address: owner,
                    underlying_manager_address: Some(underlying),
                }
            }
            AuthorityContractKind::Account if owner == wallet_address => OwnershipInfo {
                owner_kind: OwnerKind::Eoa,
                owner_address: owner,
                underlying_manager_address: None,
            },
            AuthorityContractKind::Account => {
                warn!(%owner, %wallet_address, "manager is owned by a different account");
                OwnershipInfo {
                    owner_kind: OwnerKind::NotAuthorized,
                    owner_address: owner,
                    underlying_manager_address: None,
                }
            }
        };

        debug!(%manager, kind = ?info.owner_kind, "resolved manager ownership");
        Ok(info)
    }
}

/// The single capability a session uses to execute manager calls, resolved
/// once per session so call sites never re-branch on owner kind.
pub struct CompletionAuthority {
    info: OwnershipInfo,
    wallet_address: Address,
    /// Contract the signed calls are addressed to
    call_target: Address,
    /// Contract validation-ID and weight lookups are addressed to
    lookup_target: Address,
    wallet: Arc<dyn WalletSigner>,
}

impl CompletionAuthority {
    pub fn new(
        manager: Address,
        info: OwnershipInfo,
        wallet_address: Address,
        wallet: Arc<dyn WalletSigner>,
    ) -> Result<Self> {
        let (call_target, lookup_target) = match info.owner_kind {
            OwnerKind::Eoa | OwnerKind::NotAuthorized => (manager, manager),
            // Calls are proposed through the multisig manager rather than
            // sent to the manager directly.
            OwnerKind::PoaManager => (info.owner_address, manager),
            OwnerKind::StakingManager => {
                let underlying = info.underlying_manager_address.ok_or_else(|| {
                    LifecycleError::ChainRpc(
                        "staking manager settings did not expose an underlying manager".to_string(),
                    )
                })?;
                (info.owner_address, underlying)
            }
        };

        Ok(Self {
            info,
            wallet_address,
            call_target,
            lookup_target,
            wallet,
        })
    }

    pub fn info(&self) -> &OwnershipInfo {
        &self.info
    }

    pub fn lookup_target(&self) -> Address {
        self.lookup_target
    }

    /// Sign and broadcast a manager call through the resolved authority.
    ///
    /// Rejected before any chain write when the session's wallet is not the
    /// authorized owner.
    pub async fn submit(
        &self,
        call: ManagerCall,
        access_list: Vec<AccessListEntry>,
    ) -> Result<TxHash> {
        if self.info.owner_kind == OwnerKind::NotAuthorized {
            return Err(LifecycleError::NotAuthorized {
                wallet: self.wallet_address,
                owner: self.info.owner_address,
            });
        }

        let tx = TransactionRequest {
            to: self.call_target,
            data: call.encode(),
            access_list,
        };
        self.wallet.sign_and_send(tx).await
    }
}
