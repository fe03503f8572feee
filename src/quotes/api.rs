/// Stargate quote API client
///
/// One GET per call, no retries. Transport failures, non-success statuses and
/// unparseable bodies all surface as `ApiError` naming the endpoint.
use super::types::{QuotesResponse, TransferIntent};
use crate::config::ApiConfig;
use crate::errors::{BridgeError, ConfigurationError};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Bridging service HTTP surface used by the client
#[async_trait]
pub trait BridgeApi: Send + Sync {
    /// Candidate routes for a transfer; an empty list is not an error here
    async fn get_quotes(&self, intent: &TransferIntent) -> Result<QuotesResponse, BridgeError>;

    /// Raw chain listing as returned by the service
    async fn get_supported_chains(&self) -> Result<serde_json::Value, BridgeError>;
}

pub struct StargateApi {
    client: Client,
    base_url: String,
}

impl StargateApi {
    pub fn new(settings: &ApiConfig) -> Result<Self, ConfigurationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ConfigurationError::HttpClient {
                component: "quote API".to_string(),
                error: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn quotes_endpoint(&self) -> String {
        format!("{}/quotes", self.base_url)
    }

    pub fn chains_endpoint(&self) -> String {
        format!("{}/chains", self.base_url)
    }

    /// Build the quote request without sending it
    pub fn build_quotes_request(
        &self,
        intent: &TransferIntent,
    ) -> Result<reqwest::Request, BridgeError> {
        let endpoint = self.quotes_endpoint();
        self.client
            .get(&endpoint)
            .query(intent)
            .build()
            .map_err(|e| BridgeError::request_failed(endpoint, e))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
        endpoint: &str,
    ) -> Result<T, BridgeError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| BridgeError::request_failed(endpoint, e))?;

        let status = response.status();
        let body = match response.text().await {
            Ok(text) => text,
            Err(_) if !status.is_success() => "Unknown".to_string(),
            Err(e) => return Err(BridgeError::request_failed(endpoint, e)),
        };

        decode_response(endpoint, status, &body)
    }
}

/// Map a completed HTTP exchange to the parsed body or an `ApiError`
fn decode_response<T: DeserializeOwned>(
    endpoint: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, BridgeError> {
    if !status.is_success() {
        return Err(BridgeError::http_status(endpoint, status.as_u16(), body));
    }

    serde_json::from_str(body).map_err(|e| BridgeError::malformed_response(endpoint, e))
}

#[async_trait]
impl BridgeApi for StargateApi {
    async fn get_quotes(&self, intent: &TransferIntent) -> Result<QuotesResponse, BridgeError> {
        let start = Instant::now();
        let endpoint = self.quotes_endpoint();
        let request = self.build_quotes_request(intent)?;

        logger::debug(
            LogTag::Quotes,
            &format!(
                "Quote request: {} {} ({}) -> {} ({}), min out {}",
                intent.src_amount,
                intent.src_token,
                intent.src_chain_key,
                intent.dst_token,
                intent.dst_chain_key,
                intent.dst_amount_min
            ),
        );

        let quotes: QuotesResponse = self.fetch_json(request, &endpoint).await?;

        logger::info(
            LogTag::Quotes,
            &format!(
                "Received {} route(s) for {} -> {} in {:.2}s",
                quotes.quotes.len(),
                intent.src_chain_key,
                intent.dst_chain_key,
                start.elapsed().as_secs_f64()
            ),
        );

        Ok(quotes)
    }

    async fn get_supported_chains(&self) -> Result<serde_json::Value, BridgeError> {
        let endpoint = self.chains_endpoint();
        let request = self
            .client
            .get(&endpoint)
            .build()
            .map_err(|e| BridgeError::request_failed(&endpoint, e))?;

        self.fetch_json(request, &endpoint).await
    }
}
