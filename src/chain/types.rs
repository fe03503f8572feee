/// Per-step transaction states
///
/// A step moves through `PreparedTransaction -> SignedTransaction ->
/// BroadcastTransaction -> TransactionReceipt`; each value is built once and
/// consumed by the next stage.
use alloy::primitives::{hex, Address, Bytes, TxHash, B256, U256};
use serde_json::{json, Value};

/// Descriptor enriched with account and network fields, ready to sign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransaction {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    /// `None` when the descriptor carried no value or zero
    pub value: Option<U256>,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub chain_id: u64,
}

impl PreparedTransaction {
    /// JSON call object for `eth_estimateGas`
    pub fn call_object(&self) -> Value {
        let mut call = json!({
            "from": hex::encode_prefixed(self.from),
            "to": hex::encode_prefixed(self.to),
            "data": hex::encode_prefixed(&self.data),
        });
        if let Some(value) = self.value {
            call["value"] = json!(format!("{:#x}", value));
        }
        call
    }
}

/// Raw EIP-2718 encoded bytes plus the hash they commit to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub hash: TxHash,
    pub raw: Bytes,
    pub nonce: u64,
}

/// Accepted by the node, not yet confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastTransaction {
    pub tx_hash: TxHash,
    pub nonce: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Reverted,
    /// Pre-Byzantium receipts carry no status
    Unknown,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptStatus::Success => "success",
            ReceiptStatus::Reverted => "reverted",
            ReceiptStatus::Unknown => "unknown",
        }
    }
}

/// Chain-confirmed outcome of a broadcast transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub status: ReceiptStatus,
    pub block_number: Option<u64>,
    pub block_hash: Option<B256>,
    pub gas_used: Option<u64>,
    pub effective_gas_price: Option<u128>,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }
}
