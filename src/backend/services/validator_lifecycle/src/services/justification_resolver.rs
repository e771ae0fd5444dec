use std::sync::Arc;

use chain_models::ids::{SubnetId, ValidationId};
use chain_models::message::Justification;
use tracing::debug;

use crate::chain::traits::PlatformChainClient;
use crate::utils::errors::{LifecycleError, Result};

/// Retrieves the original registration message for a validation ID.
///
/// Removal and weight-change attestations cannot be produced without this
/// evidence, so a missing registration log is fatal to the session.
pub struct JustificationResolver {
    platform: Arc<dyn PlatformChainClient>,
}

impl JustificationResolver {
    pub fn new(platform: Arc<dyn PlatformChainClient>) -> Self {
        Self { platform }
    }

    pub async fn resolve(
        &self,
        validation_id: ValidationId,
        subnet_id: SubnetId,
    ) -> Result<Justification> {
        if validation_id.is_zero() {
            return Err(LifecycleError::ZeroValidationId);
        }

        debug!(%validation_id, %subnet_id, "resolving registration justification");
        let payload = self
            .platform
            .registration_justification(validation_id, subnet_id)
            .await?
            .ok_or(LifecycleError::JustificationNotFound(validation_id))?;

        Ok(Justification::new(payload))
    }
}
