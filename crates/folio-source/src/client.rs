use std::time::Duration;

use reqwest::Client;

use crate::{
    dto::{QueryParameters, SpotRequest, SpotRow, TransposeRequest, TransposeResponse},
    error::SourceError,
    query::HISTORICAL_SPOTS_SQL,
    traits::SpotSource,
};

pub const DEFAULT_ENDPOINT: &str = "https://api.transpose.io/sql";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_HEADER: &str = "X-API-KEY";

pub struct TransposeClient {
    http_client: Client,
    endpoint: String,
    api_key: String,
}

impl TransposeClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            http_client: http_client(timeout)?,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl SpotSource for TransposeClient {
    async fn fetch_spots(&self, request: &SpotRequest) -> Result<Vec<SpotRow>, SourceError> {
        let body = TransposeRequest {
            sql: HISTORICAL_SPOTS_SQL,
            parameters: QueryParameters {
                wallet: request.address.as_str(),
                interval: request.interval,
                samples: request.samples.to_string(),
            },
            options: serde_json::json!({}),
        };

        tracing::debug!(
            address = %request.address,
            interval = request.interval,
            samples = request.samples,
            "querying historical spots"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.text().await?;
        let parsed: TransposeResponse = serde_json::from_str(&payload).map_err(|e| {
            tracing::warn!(%status, error = %e, "undecodable upstream response");
            e
        })?;

        let rows = parsed.into_rows()?;
        tracing::debug!(address = %request.address, rows = rows.len(), "historical spots received");
        Ok(rows)
    }
}

fn http_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        SourceError::HttpError(e)
    })
}
