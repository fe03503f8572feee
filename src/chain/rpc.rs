/// JSON-RPC client for the source chain node
///
/// Plain JSON-RPC 2.0 over HTTP POST with reqwest. Quantities travel as `0x`
/// hex strings and are parsed here; callers only see typed values.
use super::types::{PreparedTransaction, ReceiptStatus, TransactionReceipt};
use super::ChainRpc;
use crate::config::ChainConfig;
use crate::errors::ConfigurationError;
use crate::logger::{self, LogTag};
use alloy::primitives::{hex, Address, Bytes, TxHash, B256};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RpcError {
    #[error("{method}: transport error: {cause}")]
    Transport { method: String, cause: String },

    #[error("{method}: HTTP {status}: {body}")]
    HttpStatus {
        method: String,
        status: u16,
        body: String,
    },

    #[error("{method}: node returned error {code}: {message}")]
    JsonRpc {
        method: String,
        code: i64,
        message: String,
    },

    #[error("{method}: malformed response: {cause}")]
    Malformed { method: String, cause: String },
}

impl RpcError {
    fn malformed(method: &str, cause: impl ToString) -> Self {
        RpcError::Malformed {
            method: method.to_string(),
            cause: cause.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// `eth_getTransactionReceipt` result as sent by the node
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    block_hash: Option<String>,
    #[serde(default)]
    gas_used: Option<String>,
    #[serde(default)]
    effective_gas_price: Option<String>,
}

pub struct JsonRpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(settings: &ChainConfig) -> Result<Self, ConfigurationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ConfigurationError::HttpClient {
                component: "chain RPC".to_string(),
                error: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: settings.rpc_url.clone(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call a method whose result may legitimately be `null`
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        logger::verbose(LogTag::Rpc, &format!("-> {}", payload));

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| RpcError::Transport {
                method: method.to_string(),
                cause: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(RpcError::HttpStatus {
                method: method.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| RpcError::Transport {
            method: method.to_string(),
            cause: e.to_string(),
        })?;

        logger::verbose(LogTag::Rpc, &format!("<- {}", text));

        parse_rpc_response(method, &text)
    }

    async fn call_required<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RpcError> {
        self.call(method, params)
            .await?
            .ok_or_else(|| RpcError::malformed(method, "missing result"))
    }
}

#[async_trait]
impl ChainRpc for JsonRpcClient {
    async fn chain_id(&self) -> Result<u64, RpcError> {
        let method = "eth_chainId";
        let raw: String = self.call_required(method, json!([])).await?;
        parse_quantity_u64(method, &raw)
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError> {
        let method = "eth_getTransactionCount";
        let raw: String = self
            .call_required(method, json!([hex::encode_prefixed(address), "pending"]))
            .await?;
        parse_quantity_u64(method, &raw)
    }

    async fn gas_price(&self) -> Result<u128, RpcError> {
        let method = "eth_gasPrice";
        let raw: String = self.call_required(method, json!([])).await?;
        parse_quantity_u128(method, &raw)
    }

    async fn estimate_gas(&self, tx: &PreparedTransaction) -> Result<u64, RpcError> {
        let method = "eth_estimateGas";
        let raw: String = self.call_required(method, json!([tx.call_object()])).await?;
        parse_quantity_u64(method, &raw)
    }

    async fn send_raw_transaction(&self, raw: &Bytes) -> Result<TxHash, RpcError> {
        let method = "eth_sendRawTransaction";
        let hash: String = self
            .call_required(method, json!([hex::encode_prefixed(raw)]))
            .await?;
        TxHash::from_str(&hash).map_err(|e| RpcError::malformed(method, e))
    }

    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        let method = "eth_getTransactionReceipt";
        let raw: Option<RawReceipt> = self
            .call(method, json!([hex::encode_prefixed(tx_hash)]))
            .await?;
        raw.map(|receipt| convert_receipt(method, receipt)).transpose()
    }
}

fn parse_rpc_response<T: DeserializeOwned>(method: &str, text: &str) -> Result<Option<T>, RpcError> {
    let envelope: RpcEnvelope<T> =
        serde_json::from_str(text).map_err(|e| RpcError::malformed(method, e))?;

    if let Some(error) = envelope.error {
        return Err(RpcError::JsonRpc {
            method: method.to_string(),
            code: error.code,
            message: error.message,
        });
    }

    Ok(envelope.result)
}

fn strip_hex_prefix<'a>(method: &str, raw: &'a str) -> Result<&'a str, RpcError> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::malformed(method, format!("quantity '{}' lacks 0x prefix", raw)))?;
    if digits.is_empty() {
        return Err(RpcError::malformed(method, "empty quantity"));
    }
    Ok(digits)
}

pub(crate) fn parse_quantity_u64(method: &str, raw: &str) -> Result<u64, RpcError> {
    let digits = strip_hex_prefix(method, raw)?;
    u64::from_str_radix(digits, 16).map_err(|e| RpcError::malformed(method, format!("'{}': {}", raw, e)))
}

pub(crate) fn parse_quantity_u128(method: &str, raw: &str) -> Result<u128, RpcError> {
    let digits = strip_hex_prefix(method, raw)?;
    u128::from_str_radix(digits, 16).map_err(|e| RpcError::malformed(method, format!("'{}': {}", raw, e)))
}

fn convert_receipt(method: &str, raw: RawReceipt) -> Result<TransactionReceipt, RpcError> {
    let transaction_hash =
        TxHash::from_str(&raw.transaction_hash).map_err(|e| RpcError::malformed(method, e))?;

    let status = match raw.status.as_deref() {
        Some(s) => match parse_quantity_u64(method, s)? {
            1 => ReceiptStatus::Success,
            0 => ReceiptStatus::Reverted,
            other => return Err(RpcError::malformed(method, format!("unexpected status {}", other))),
        },
        None => ReceiptStatus::Unknown,
    };

    let block_number = raw
        .block_number
        .as_deref()
        .map(|n| parse_quantity_u64(method, n))
        .transpose()?;
    let block_hash = raw
        .block_hash
        .as_deref()
        .map(|h| B256::from_str(h).map_err(|e| RpcError::malformed(method, e)))
        .transpose()?;
    let gas_used = raw
        .gas_used
        .as_deref()
        .map(|g| parse_quantity_u64(method, g))
        .transpose()?;
    let effective_gas_price = raw
        .effective_gas_price
        .as_deref()
        .map(|p| parse_quantity_u128(method, p))
        .transpose()?;

    Ok(TransactionReceipt {
        transaction_hash,
        status,
        block_number,
        block_hash,
        gas_used,
        effective_gas_price,
    })
}
