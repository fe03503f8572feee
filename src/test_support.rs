/// In-memory fakes for the chain, signer and quote API seams
use crate::chain::{
    ChainRpc, PreparedTransaction, ReceiptStatus, RpcError, SignedTransaction, SignerError,
    TransactionReceipt, TransactionSigner,
};
use crate::errors::BridgeError;
use crate::quotes::{BridgeApi, QuotesResponse, TransferIntent};
use alloy::primitives::{keccak256, Address, Bytes, TxHash};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

pub const ROUTER: &str = "0xc026395860db2d07ee33e05fe50ed7bd583189c7";
pub const ACCOUNT: &str = "0x1234567890123456789012345678901234567890";

fn rpc_failure(method: &str) -> RpcError {
    RpcError::JsonRpc {
        method: method.to_string(),
        code: -32000,
        message: "injected failure".to_string(),
    }
}

/// Node double that records every method call
pub struct FakeRpc {
    calls: Mutex<Vec<String>>,
    sent: Mutex<Vec<TxHash>>,
    pending_nonce: AtomicU64,
    sends: AtomicUsize,
    gas_estimate: Option<u64>,
    fail_nonce: bool,
    fail_send_at: Option<usize>,
    fail_receipt: bool,
    receipt_status: Option<ReceiptStatus>,
}

impl FakeRpc {
    pub const CHAIN_ID: u64 = 1;
    pub const GAS_PRICE: u128 = 20_000_000_000;

    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            pending_nonce: AtomicU64::new(0),
            sends: AtomicUsize::new(0),
            gas_estimate: Some(100_000),
            fail_nonce: false,
            fail_send_at: None,
            fail_receipt: false,
            receipt_status: Some(ReceiptStatus::Success),
        }
    }

    pub fn with_gas_estimate(mut self, estimate: u64) -> Self {
        self.gas_estimate = Some(estimate);
        self
    }

    pub fn with_failing_estimate(mut self) -> Self {
        self.gas_estimate = None;
        self
    }

    pub fn with_failing_nonce(mut self) -> Self {
        self.fail_nonce = true;
        self
    }

    /// Fail the n-th (1-based) broadcast
    pub fn with_failing_send_at(mut self, n: usize) -> Self {
        self.fail_send_at = Some(n);
        self
    }

    pub fn with_receipt_status(mut self, status: ReceiptStatus) -> Self {
        self.receipt_status = Some(status);
        self
    }

    pub fn with_failing_receipt(mut self) -> Self {
        self.fail_receipt = true;
        self
    }

    pub fn never_confirming(mut self) -> Self {
        self.receipt_status = None;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|m| *m == method).count()
    }

    pub fn sent_hashes(&self) -> Vec<TxHash> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }
}

#[async_trait]
impl ChainRpc for FakeRpc {
    async fn chain_id(&self) -> Result<u64, RpcError> {
        self.record("eth_chainId");
        Ok(Self::CHAIN_ID)
    }

    async fn transaction_count(&self, _address: Address) -> Result<u64, RpcError> {
        self.record("eth_getTransactionCount");
        if self.fail_nonce {
            return Err(rpc_failure("eth_getTransactionCount"));
        }
        Ok(self.pending_nonce.load(Ordering::SeqCst))
    }

    async fn gas_price(&self) -> Result<u128, RpcError> {
        self.record("eth_gasPrice");
        Ok(Self::GAS_PRICE)
    }

    async fn estimate_gas(&self, _tx: &PreparedTransaction) -> Result<u64, RpcError> {
        self.record("eth_estimateGas");
        self.gas_estimate.ok_or_else(|| rpc_failure("eth_estimateGas"))
    }

    async fn send_raw_transaction(&self, raw: &Bytes) -> Result<TxHash, RpcError> {
        self.record("eth_sendRawTransaction");
        let n = self.sends.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_send_at == Some(n) {
            return Err(rpc_failure("eth_sendRawTransaction"));
        }
        self.pending_nonce.fetch_add(1, Ordering::SeqCst);
        let hash = keccak256(raw);
        self.sent.lock().unwrap().push(hash);
        Ok(hash)
    }

    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        self.record("eth_getTransactionReceipt");
        if self.fail_receipt {
            return Err(rpc_failure("eth_getTransactionReceipt"));
        }
        Ok(self.receipt_status.map(|status| TransactionReceipt {
            transaction_hash: tx_hash,
            status,
            block_number: Some(1),
            block_hash: None,
            gas_used: Some(21_000),
            effective_gas_price: Some(Self::GAS_PRICE),
        }))
    }
}

/// Signer double: raw bytes are `nonce || to || data`
pub struct FakeSigner {
    address: Address,
    signed: Mutex<Vec<PreparedTransaction>>,
    fail: bool,
}

impl FakeSigner {
    pub fn new() -> Self {
        Self {
            address: ACCOUNT.parse().unwrap(),
            signed: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn signed(&self) -> Vec<PreparedTransaction> {
        self.signed.lock().unwrap().clone()
    }
}

impl TransactionSigner for FakeSigner {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_transaction(&self, tx: &PreparedTransaction) -> Result<SignedTransaction, SignerError> {
        if self.fail {
            return Err(SignerError("hardware wallet disconnected".to_string()));
        }
        self.signed.lock().unwrap().push(tx.clone());

        let mut raw = tx.nonce.to_be_bytes().to_vec();
        raw.extend_from_slice(tx.to.as_slice());
        raw.extend_from_slice(&tx.data);
        let raw = Bytes::from(raw);

        Ok(SignedTransaction {
            hash: keccak256(&raw),
            raw,
            nonce: tx.nonce,
        })
    }
}

/// Quote API double returning a canned response
pub struct FakeApi {
    response: QuotesResponse,
    intents: Mutex<Vec<TransferIntent>>,
}

impl FakeApi {
    pub fn new(response: QuotesResponse) -> Self {
        Self {
            response,
            intents: Mutex::new(Vec::new()),
        }
    }

    pub fn intents(&self) -> Vec<TransferIntent> {
        self.intents.lock().unwrap().clone()
    }
}

#[async_trait]
impl BridgeApi for FakeApi {
    async fn get_quotes(&self, intent: &TransferIntent) -> Result<QuotesResponse, BridgeError> {
        self.intents.lock().unwrap().push(intent.clone());
        Ok(self.response.clone())
    }

    async fn get_supported_chains(&self) -> Result<Value, BridgeError> {
        Ok(json!({"chains": [{"chainKey": "ethereum"}, {"chainKey": "polygon"}]}))
    }
}
