/// Source chain access: JSON-RPC reads and broadcasts, local signing
///
/// The executor only talks to the chain through [`ChainRpc`] and
/// [`TransactionSigner`], so both can be swapped for in-memory fakes.
pub mod rpc;
pub mod signer;
pub mod types;

use alloy::primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;

pub use rpc::{JsonRpcClient, RpcError};
pub use signer::{SignerError, TransactionSigner, WalletSigner};
pub use types::{
    BroadcastTransaction, PreparedTransaction, ReceiptStatus, SignedTransaction,
    TransactionReceipt,
};

/// Node operations the executor depends on
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// `eth_chainId`
    async fn chain_id(&self) -> Result<u64, RpcError>;

    /// Nonce for `address` at the `pending` block tag
    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError>;

    async fn gas_price(&self) -> Result<u128, RpcError>;

    async fn estimate_gas(&self, tx: &PreparedTransaction) -> Result<u64, RpcError>;

    async fn send_raw_transaction(&self, raw: &Bytes) -> Result<TxHash, RpcError>;

    /// `None` while the transaction is still pending
    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, RpcError>;
}
