/// Stages of a single step: decode, prepare, sign, broadcast, confirm
///
/// Each stage maps its failure into the matching `TransactionError` variant
/// so callers can tell which part of the pipeline broke.
use crate::chain::{
    BroadcastTransaction, ChainRpc, PreparedTransaction, ReceiptStatus, SignedTransaction,
    TransactionReceipt, TransactionSigner,
};
use crate::config::ExecutorConfig;
use crate::errors::TransactionError;
use crate::logger::{self, LogTag};
use crate::quotes::TransactionDescriptor;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use std::str::FromStr;
use std::time::Duration;

/// Descriptor fields decoded into chain types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    pub to: Address,
    pub data: Bytes,
    /// `None` for absent or zero value
    pub value: Option<U256>,
}

fn invalid(field: &str, value: &str, reason: impl ToString) -> TransactionError {
    TransactionError::InvalidDescriptor {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Decode descriptor fields into chain types
///
/// Missing `data` decodes to empty calldata and missing `value` to zero, but an
/// empty `to` is rejected as `InvalidDescriptor`: signing it would produce a
/// contract creation carrying the route's calldata.
pub fn decode_descriptor(descriptor: &TransactionDescriptor) -> Result<DecodedCall, TransactionError> {
    let to_raw = descriptor.to.trim();
    if to_raw.is_empty() {
        return Err(invalid("to", to_raw, "missing destination address"));
    }
    let to = Address::from_str(to_raw).map_err(|e| invalid("to", to_raw, e))?;

    let data_raw = descriptor.data.trim();
    let data = if data_raw.is_empty() {
        Bytes::new()
    } else {
        Bytes::from_str(data_raw).map_err(|e| invalid("data", data_raw, e))?
    };

    let value_raw = descriptor.value.trim();
    let value = if value_raw.is_empty() {
        U256::ZERO
    } else if let Some(hex) = value_raw.strip_prefix("0x") {
        U256::from_str_radix(hex, 16).map_err(|e| invalid("value", value_raw, e))?
    } else {
        U256::from_str_radix(value_raw, 10).map_err(|e| invalid("value", value_raw, e))?
    };

    Ok(DecodedCall {
        to,
        data,
        value: (!value.is_zero()).then_some(value),
    })
}

/// `ceil(estimate * (100 + percent) / 100)`, saturating at `u64::MAX`
pub fn buffered_gas_limit(estimate: u64, buffer_percent: u64) -> u64 {
    let scaled = estimate as u128 * (100 + buffer_percent as u128);
    let limit = scaled.div_ceil(100);
    u64::try_from(limit).unwrap_or(u64::MAX)
}

/// Fill in nonce, gas price, chain id and gas limit
pub async fn prepare(
    rpc: &dyn ChainRpc,
    from: Address,
    call: DecodedCall,
    settings: &ExecutorConfig,
) -> Result<PreparedTransaction, TransactionError> {
    let nonce = rpc
        .transaction_count(from)
        .await
        .map_err(|e| TransactionError::NonceFetch {
            address: from.to_string(),
            cause: e.to_string(),
        })?;

    let gas_price = rpc
        .gas_price()
        .await
        .map_err(|e| TransactionError::GasPrice {
            cause: e.to_string(),
        })?;

    let chain_id = rpc.chain_id().await.map_err(|e| TransactionError::ChainId {
        cause: e.to_string(),
    })?;

    let mut tx = PreparedTransaction {
        from,
        to: call.to,
        data: call.data,
        value: call.value,
        nonce,
        gas_limit: settings.default_gas_limit,
        gas_price,
        chain_id,
    };

    match rpc.estimate_gas(&tx).await {
        Ok(estimate) => {
            tx.gas_limit = buffered_gas_limit(estimate, settings.gas_buffer_percent);
            logger::debug(
                LogTag::Executor,
                &format!(
                    "Gas estimate {} -> limit {} (+{}%)",
                    estimate, tx.gas_limit, settings.gas_buffer_percent
                ),
            );
        }
        Err(e) => {
            logger::warning(
                LogTag::Executor,
                &format!(
                    "Gas estimation failed, using default limit {}: {}",
                    settings.default_gas_limit, e
                ),
            );
        }
    }

    logger::debug(
        LogTag::Executor,
        &format!(
            "Prepared tx to={} nonce={} gas_limit={} gas_price={} chain_id={} value={}",
            tx.to,
            tx.nonce,
            tx.gas_limit,
            tx.gas_price,
            tx.chain_id,
            tx.value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
        ),
    );

    Ok(tx)
}

pub fn sign(
    signer: &dyn TransactionSigner,
    tx: &PreparedTransaction,
) -> Result<SignedTransaction, TransactionError> {
    signer.sign_transaction(tx).map_err(|e| TransactionError::Signing {
        cause: e.to_string(),
    })
}

pub async fn broadcast(
    rpc: &dyn ChainRpc,
    signed: SignedTransaction,
) -> Result<BroadcastTransaction, TransactionError> {
    let tx_hash = rpc
        .send_raw_transaction(&signed.raw)
        .await
        .map_err(|e| TransactionError::Broadcast {
            cause: e.to_string(),
        })?;

    if tx_hash != signed.hash {
        logger::warning(
            LogTag::Executor,
            &format!(
                "Node returned hash {} but signed hash was {}",
                tx_hash, signed.hash
            ),
        );
    }

    Ok(BroadcastTransaction {
        tx_hash,
        nonce: signed.nonce,
    })
}

/// Poll for a receipt until one appears or `timeout` elapses
pub async fn confirm(
    rpc: &dyn ChainRpc,
    tx_hash: TxHash,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<TransactionReceipt, TransactionError> {
    let poll = async {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            match rpc.transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => return Ok(receipt),
                Ok(None) => {
                    logger::verbose(
                        LogTag::Executor,
                        &format!("Receipt for {} not available yet (attempt {})", tx_hash, attempt),
                    );
                }
                Err(e) => {
                    return Err(TransactionError::Confirmation {
                        tx_hash: tx_hash.to_string(),
                        cause: e.to_string(),
                    })
                }
            }
            tokio::time::sleep(poll_interval).await;
        }
    };

    let receipt = match tokio::time::timeout(timeout, poll).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(TransactionError::Confirmation {
                tx_hash: tx_hash.to_string(),
                cause: format!("no receipt after {:.1}s", timeout.as_secs_f64()),
            })
        }
    };

    match receipt.status {
        ReceiptStatus::Success => logger::info(
            LogTag::Executor,
            &format!(
                "Transaction {} confirmed in block {}",
                tx_hash,
                receipt
                    .block_number
                    .map(|b| b.to_string())
                    .unwrap_or_else(|| "?".to_string())
            ),
        ),
        ReceiptStatus::Reverted => logger::warning(
            LogTag::Executor,
            &format!("Transaction {} was mined but reverted", tx_hash),
        ),
        ReceiptStatus::Unknown => logger::debug(
            LogTag::Executor,
            &format!("Transaction {} mined without a status field", tx_hash),
        ),
    }

    Ok(receipt)
}
