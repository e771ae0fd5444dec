use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use chain_models::ids::SubnetId;
use chain_models::message::AggregatedSignature;

use crate::config::OrchestratorConfig;
use crate::utils::errors::{LifecycleError, Result};

/// Requests a quorum-weighted BLS aggregate signature over a message from
/// the signing chain's validators. The aggregation itself happens in an
/// external service; this client only speaks its wire format.
#[async_trait]
pub trait SignatureAggregator: Send + Sync {
    async fn aggregate(
        &self,
        message: Vec<u8>,
        justification: Option<Vec<u8>>,
        signing_subnet_id: SubnetId,
        quorum_percentage: u8,
    ) -> Result<AggregatedSignature>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AggregateRequest {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    justification: Option<String>,
    signing_subnet_id: String,
    quorum_percentage: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregateResponse {
    signed_message: String,
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn from_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
        .map_err(|e| LifecycleError::AggregationFailed(format!("invalid signed message hex: {e}")))
}

fn build_request(
    message: &[u8],
    justification: Option<&[u8]>,
    signing_subnet_id: &SubnetId,
    quorum_percentage: u8,
) -> AggregateRequest {
    AggregateRequest {
        message: to_hex(message),
        justification: justification.map(to_hex),
        signing_subnet_id: signing_subnet_id.as_str().to_string(),
        quorum_percentage,
    }
}

/// HTTP client for the signature aggregation service
pub struct HttpSignatureAggregator {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSignatureAggregator {
    pub fn new(config: &OrchestratorConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.aggregator_timeout())
            .build()
            .unwrap_or_default();
        let endpoint = format!(
            "{}/aggregate-signatures",
            config.aggregator_url.trim_end_matches('/')
        );
        Self { http, endpoint }
    }
}

#[async_trait]
impl SignatureAggregator for HttpSignatureAggregator {
    async fn aggregate(
        &self,
        message: Vec<u8>,
        justification: Option<Vec<u8>>,
        signing_subnet_id: SubnetId,
        quorum_percentage: u8,
    ) -> Result<AggregatedSignature> {
        let request = build_request(
            &message,
            justification.as_deref(),
            &signing_subnet_id,
            quorum_percentage,
        );
        debug!(subnet = %signing_subnet_id, quorum = quorum_percentage, "requesting aggregate signature");

        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LifecycleError::AggregationFailed(format!(
                "aggregator returned {status}: {body}"
            )));
        }

        let parsed: AggregateResponse = response
            .json()
            .await
            .map_err(|e| LifecycleError::AggregationFailed(format!("malformed response: {e}")))?;
        let signed_payload = from_hex(&parsed.signed_message)?;
        info!(bytes = signed_payload.len(), "aggregate signature collected");

        // The service refuses outright when quorum is unreachable, so a
        // successful response carries at least the requested weight.
        Ok(AggregatedSignature {
            signed_payload,
            quorum_percentage,
        })
    }
}
