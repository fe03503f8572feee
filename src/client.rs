/// High-level bridge client
///
/// [`BridgeClient`] ties the quote API, route selection and the transaction
/// executor together. [`BridgeClient::transfer`] is the one-call path:
/// quote, select, execute.
use crate::config::Config;
use crate::credentials::PrivateKey;
use crate::errors::{ApiError, BridgeError, DataError};
use crate::executor::TransactionExecutor;
use crate::logger::{self, LogTag};
use crate::quotes::{
    dst_amount_min, BridgeApi, QuotesResponse, Route, RouteSelector, StargateApi, TransferIntent,
};
use alloy::primitives::{Address, TxHash};
use std::sync::Arc;

/// One cross-chain transfer as requested by a caller
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub src_token: String,
    pub dst_token: String,
    pub src_chain_key: String,
    pub dst_chain_key: String,
    /// Smallest-unit decimal integer
    pub amount: String,
    /// Defaults to the signer's address
    pub src_address: Option<String>,
    /// Defaults to the signer's address
    pub dst_address: Option<String>,
    /// Defaults to the configured tolerance (0.05 = 5%)
    pub slippage_tolerance: Option<f64>,
}

impl TransferRequest {
    pub fn new(
        src_token: impl Into<String>,
        dst_token: impl Into<String>,
        src_chain_key: impl Into<String>,
        dst_chain_key: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            src_token: src_token.into(),
            dst_token: dst_token.into(),
            src_chain_key: src_chain_key.into(),
            dst_chain_key: dst_chain_key.into(),
            amount: amount.into(),
            src_address: None,
            dst_address: None,
            slippage_tolerance: None,
        }
    }

    pub fn with_src_address(mut self, address: impl Into<String>) -> Self {
        self.src_address = Some(address.into());
        self
    }

    pub fn with_dst_address(mut self, address: impl Into<String>) -> Self {
        self.dst_address = Some(address.into());
        self
    }

    pub fn with_slippage_tolerance(mut self, slippage_tolerance: f64) -> Self {
        self.slippage_tolerance = Some(slippage_tolerance);
        self
    }

    /// Quote parameters for this request
    ///
    /// Unset addresses default to `account`. Without an account the source
    /// address is required and the destination defaults to it.
    pub fn to_intent(
        &self,
        account: Option<Address>,
        default_slippage: f64,
    ) -> Result<TransferIntent, BridgeError> {
        let account = account.map(|a| a.to_string());
        let src_address = self
            .src_address
            .clone()
            .or_else(|| account.clone())
            .ok_or_else(|| DataError::MissingField {
                field: "src_address".to_string(),
            })?;
        let dst_address = self
            .dst_address
            .clone()
            .or(account)
            .unwrap_or_else(|| src_address.clone());
        let slippage = self.slippage_tolerance.unwrap_or(default_slippage);

        let intent = TransferIntent {
            src_token: self.src_token.clone(),
            dst_token: self.dst_token.clone(),
            src_address,
            dst_address,
            src_chain_key: self.src_chain_key.clone(),
            dst_chain_key: self.dst_chain_key.clone(),
            src_amount: self.amount.trim().to_string(),
            dst_amount_min: dst_amount_min(&self.amount, slippage)?,
        };
        intent.validate()?;
        Ok(intent)
    }
}

pub struct BridgeClient {
    api: Arc<dyn BridgeApi>,
    executor: TransactionExecutor,
    selector: Box<dyn RouteSelector>,
    default_slippage: f64,
}

impl BridgeClient {
    /// Build the HTTP clients and signer from configuration
    ///
    /// Fails with a configuration error before any network activity if the
    /// configuration or the key is invalid.
    pub fn new(config: &Config, key: PrivateKey) -> Result<Self, BridgeError> {
        config.validate()?;

        let api = StargateApi::new(&config.api)?;
        let executor = TransactionExecutor::connect(&config.chain, config.executor.clone(), &key)?;

        logger::info(
            LogTag::System,
            &format!(
                "Bridge client ready: account {} rpc {} api {}",
                executor.address(),
                config.chain.rpc_url,
                config.api.base_url
            ),
        );

        Ok(Self::from_parts(
            Arc::new(api),
            executor,
            config.transfer.route_selection.selector(),
            config.transfer.default_slippage_tolerance,
        ))
    }

    pub fn from_parts(
        api: Arc<dyn BridgeApi>,
        executor: TransactionExecutor,
        selector: Box<dyn RouteSelector>,
        default_slippage: f64,
    ) -> Self {
        Self {
            api,
            executor,
            selector,
            default_slippage,
        }
    }

    /// Replace the route selection policy
    pub fn with_route_selector(mut self, selector: Box<dyn RouteSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn address(&self) -> Address {
        self.executor.address()
    }

    pub fn executor(&self) -> &TransactionExecutor {
        &self.executor
    }

    pub async fn get_quotes(&self, intent: &TransferIntent) -> Result<QuotesResponse, BridgeError> {
        self.api.get_quotes(intent).await
    }

    pub async fn get_supported_chains(&self) -> Result<serde_json::Value, BridgeError> {
        self.api.get_supported_chains().await
    }

    /// Resolve defaults against the signer and compute the minimum destination amount
    pub fn build_intent(&self, request: &TransferRequest) -> Result<TransferIntent, BridgeError> {
        request.to_intent(Some(self.address()), self.default_slippage)
    }

    pub async fn execute_route(&self, route: &Route) -> Result<Vec<TxHash>, BridgeError> {
        self.executor.execute_route(route).await
    }

    /// Quote, select and execute a transfer, returning one hash per step
    pub async fn transfer(&self, request: &TransferRequest) -> Result<Vec<TxHash>, BridgeError> {
        let intent = self.build_intent(request)?;

        logger::info(
            LogTag::Transfer,
            &format!(
                "Requesting quotes: {} {} on {} -> {} on {} (min {})",
                intent.src_amount,
                intent.src_token,
                intent.src_chain_key,
                intent.dst_token,
                intent.dst_chain_key,
                intent.dst_amount_min
            ),
        );

        let quotes = self.api.get_quotes(&intent).await?;
        if quotes.is_empty() {
            return Err(ApiError::NoQuotes.into());
        }

        let route = self
            .selector
            .select(&quotes.quotes)
            .ok_or_else(|| ApiError::NoRouteSelected {
                policy: self.selector.name().to_string(),
                candidates: quotes.quotes.len(),
            })?;

        logger::info(
            LogTag::Transfer,
            &format!(
                "Selected route {} with {} steps ({} of {} candidates)",
                route.name().unwrap_or("unnamed"),
                route.steps.len(),
                self.selector.name(),
                quotes.quotes.len()
            ),
        );

        let hashes = self.executor.execute_route(route).await?;

        logger::info(
            LogTag::Transfer,
            &format!("Transfer complete: {} transactions", hashes.len()),
        );

        Ok(hashes)
    }

    /// Release the HTTP clients
    pub fn close(self) {
        logger::debug(LogTag::System, "Bridge client closed");
    }
}
