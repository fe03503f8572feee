/// Route execution on the source chain
///
/// [`TransactionExecutor`] turns quote descriptors into signed, broadcast and
/// confirmed transactions, one step at a time. It keeps no nonce state; every
/// step reads a fresh `pending` nonce from the node.
pub mod pipeline;

use crate::chain::{ChainRpc, JsonRpcClient, TransactionReceipt, TransactionSigner, WalletSigner};
use crate::config::{ChainConfig, ExecutorConfig};
use crate::credentials::PrivateKey;
use crate::errors::{BridgeError, ConfigurationError, TransactionError};
use crate::logger::{self, LogTag};
use crate::quotes::{Route, TransactionDescriptor};
use alloy::primitives::{Address, TxHash};
use std::sync::Arc;
use std::time::Duration;

pub use pipeline::{buffered_gas_limit, decode_descriptor, DecodedCall};

pub struct TransactionExecutor {
    rpc: Arc<dyn ChainRpc>,
    signer: Arc<dyn TransactionSigner>,
    settings: ExecutorConfig,
}

impl TransactionExecutor {
    pub fn new(
        rpc: Arc<dyn ChainRpc>,
        signer: Arc<dyn TransactionSigner>,
        settings: ExecutorConfig,
    ) -> Self {
        Self {
            rpc,
            signer,
            settings,
        }
    }

    /// JSON-RPC node plus local key signer
    pub fn connect(
        chain: &ChainConfig,
        settings: ExecutorConfig,
        key: &PrivateKey,
    ) -> Result<Self, ConfigurationError> {
        let rpc = JsonRpcClient::new(chain)?;
        let signer = WalletSigner::from_private_key(key)?;

        logger::debug(
            LogTag::Executor,
            &format!("Executor for {} via {}", signer.address(), rpc.url()),
        );

        Ok(Self::new(Arc::new(rpc), Arc::new(signer), settings))
    }

    /// Signing account
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn settings(&self) -> &ExecutorConfig {
        &self.settings
    }

    /// Chain id reported by the node
    pub async fn chain_id(&self) -> Result<u64, BridgeError> {
        let chain_id = self
            .rpc
            .chain_id()
            .await
            .map_err(|e| TransactionError::ChainId {
                cause: e.to_string(),
            })?;
        Ok(chain_id)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.confirmation_timeout_secs)
    }

    /// Sign and broadcast one descriptor, returning the node's hash
    ///
    /// The descriptor is decoded before any network call. Gas estimation is
    /// advisory: a failed estimate keeps the configured default gas limit.
    pub async fn execute_transaction(
        &self,
        descriptor: &TransactionDescriptor,
    ) -> Result<TxHash, BridgeError> {
        Ok(self.send_step(descriptor).await?)
    }

    /// Wait for a receipt. A reverted receipt is returned, not an error.
    pub async fn wait_for_transaction(
        &self,
        tx_hash: TxHash,
        timeout: Duration,
    ) -> Result<TransactionReceipt, BridgeError> {
        let poll_interval = Duration::from_millis(self.settings.receipt_poll_interval_ms);
        Ok(pipeline::confirm(self.rpc.as_ref(), tx_hash, timeout, poll_interval).await?)
    }

    /// Execute every step of `route` in order, waiting for each to confirm
    ///
    /// Returns one hash per step. The first failure aborts the route and is
    /// reported with its 1-based step number; earlier steps stay on chain.
    pub async fn execute_route(&self, route: &Route) -> Result<Vec<TxHash>, BridgeError> {
        let total = route.steps.len();
        if total == 0 {
            return Err(TransactionError::EmptyRoute.into());
        }

        let timeout = self.confirmation_timeout();
        let step_delay = Duration::from_millis(self.settings.step_delay_ms);
        let mut hashes = Vec::with_capacity(total);

        for (index, step) in route.steps.iter().enumerate() {
            let number = index + 1;
            logger::info(
                LogTag::Executor,
                &format!("Executing step {}/{}", number, total),
            );

            let descriptor = step.descriptor();
            let tx_hash = self
                .send_step(&descriptor)
                .await
                .map_err(|e| BridgeError::from(e).at_step(number, total))?;

            logger::info(
                LogTag::Executor,
                &format!("Step {}/{} sent: {}", number, total, tx_hash),
            );

            self.wait_for_transaction(tx_hash, timeout)
                .await
                .map_err(|e| e.at_step(number, total))?;

            hashes.push(tx_hash);

            if number < total {
                tokio::time::sleep(step_delay).await;
            }
        }

        Ok(hashes)
    }

    async fn send_step(&self, descriptor: &TransactionDescriptor) -> Result<TxHash, TransactionError> {
        let call = pipeline::decode_descriptor(descriptor)?;
        let prepared =
            pipeline::prepare(self.rpc.as_ref(), self.signer.address(), call, &self.settings).await?;
        let signed = pipeline::sign(self.signer.as_ref(), &prepared)?;
        let sent = pipeline::broadcast(self.rpc.as_ref(), signed).await?;
        Ok(sent.tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ReceiptStatus;
    use crate::quotes::Step;
    use crate::test_support::{FakeRpc, FakeSigner, ROUTER};
    use alloy::primitives::U256;

    fn executor(rpc: Arc<FakeRpc>, signer: Arc<FakeSigner>) -> TransactionExecutor {
        TransactionExecutor::new(rpc, signer, ExecutorConfig::default())
    }

    fn approve_and_send() -> Route {
        Route::new(vec![
            Step::new(TransactionDescriptor::new(ROUTER, "0x095ea7b3", "0")),
            Step::new(TransactionDescriptor::new(ROUTER, "0xc7c7f5b3", "1000000000000000")),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn test_route_returns_one_hash_per_step_in_order() {
        let rpc = Arc::new(FakeRpc::new());
        let signer = Arc::new(FakeSigner::new());
        let hashes = executor(rpc.clone(), signer.clone())
            .execute_route(&approve_and_send())
            .await
            .unwrap();

        assert_eq!(hashes.len(), 2);
        assert_eq!(hashes, rpc.sent_hashes());
        assert_eq!(rpc.count("eth_sendRawTransaction"), 2);
        assert_eq!(rpc.count("eth_getTransactionReceipt"), 2);

        let signed = signer.signed();
        assert_eq!(signed[0].nonce, 0);
        assert_eq!(signed[1].nonce, 1);
    }

    #[tokio::test]
    async fn test_empty_route_makes_no_calls() {
        let rpc = Arc::new(FakeRpc::new());
        let err = executor(rpc.clone(), Arc::new(FakeSigner::new()))
            .execute_route(&Route::new(Vec::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, BridgeError::Transaction(TransactionError::EmptyRoute)));
        assert!(rpc.calls().is_empty());
    }

    #[tokio::test]
    async fn test_step_without_transaction_fails_before_network() {
        let rpc = Arc::new(FakeRpc::new());
        let route = Route::new(vec![Step::default()]);

        let err = executor(rpc.clone(), Arc::new(FakeSigner::new()))
            .execute_route(&route)
            .await
            .unwrap_err();

        assert_eq!(err.failed_step(), Some(1));
        assert!(err.to_string().contains("Invalid transaction field 'to'"));
        assert!(rpc.calls().is_empty());
    }

    #[tokio::test]
    async fn test_chain_id_from_node() {
        let rpc = Arc::new(FakeRpc::new());
        let exec = executor(rpc.clone(), Arc::new(FakeSigner::new()));
        assert_eq!(exec.chain_id().await.unwrap(), FakeRpc::CHAIN_ID);
        assert_eq!(rpc.calls(), vec!["eth_chainId"]);
    }

    #[tokio::test]
    async fn test_transaction_fields_from_chain() {
        let rpc = Arc::new(FakeRpc::new().with_gas_estimate(100_000));
        let signer = Arc::new(FakeSigner::new());
        let exec = executor(rpc.clone(), signer.clone());

        exec.execute_transaction(&TransactionDescriptor::new(ROUTER, "0x095ea7b3", "0"))
            .await
            .unwrap();

        let tx = &signer.signed()[0];
        assert_eq!(tx.from, exec.address());
        assert_eq!(tx.gas_limit, 120_000);
        assert_eq!(tx.gas_price, FakeRpc::GAS_PRICE);
        assert_eq!(tx.chain_id, FakeRpc::CHAIN_ID);
        assert_eq!(tx.value, None);
        assert_eq!(
            rpc.calls(),
            vec![
                "eth_getTransactionCount",
                "eth_gasPrice",
                "eth_chainId",
                "eth_estimateGas",
                "eth_sendRawTransaction",
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_estimate_keeps_default_gas_limit() {
        let rpc = Arc::new(FakeRpc::new().with_failing_estimate());
        let signer = Arc::new(FakeSigner::new());

        executor(rpc, signer.clone())
            .execute_transaction(&TransactionDescriptor::new(ROUTER, "0x", "0"))
            .await
            .unwrap();

        assert_eq!(signer.signed()[0].gas_limit, 300_000);
    }

    #[tokio::test]
    async fn test_value_included_only_when_non_zero() {
        let rpc = Arc::new(FakeRpc::new());
        let signer = Arc::new(FakeSigner::new());
        let exec = executor(rpc, signer.clone());

        exec.execute_transaction(&TransactionDescriptor::new(ROUTER, "0x", "0"))
            .await
            .unwrap();
        exec.execute_transaction(&TransactionDescriptor::new(ROUTER, "0x", ""))
            .await
            .unwrap();
        exec.execute_transaction(&TransactionDescriptor::new(
            ROUTER,
            "0x",
            "1000000000000000000",
        ))
        .await
        .unwrap();

        let signed = signer.signed();
        assert_eq!(signed[0].value, None);
        assert_eq!(signed[1].value, None);
        assert_eq!(signed[2].value, Some(U256::from(1_000_000_000_000_000_000u64)));
    }

    #[tokio::test]
    async fn test_bad_descriptor_fails_before_network() {
        let rpc = Arc::new(FakeRpc::new());
        let err = executor(rpc.clone(), Arc::new(FakeSigner::new()))
            .execute_transaction(&TransactionDescriptor::new("not-an-address", "0x", "0"))
            .await
            .unwrap_err();

        assert!(err.is_transaction());
        assert!(rpc.calls().is_empty());
    }

    #[tokio::test]
    async fn test_nonce_failure_is_transaction_error() {
        let rpc = Arc::new(FakeRpc::new().with_failing_nonce());
        let err = executor(rpc, Arc::new(FakeSigner::new()))
            .execute_transaction(&TransactionDescriptor::new(ROUTER, "0x", "0"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BridgeError::Transaction(TransactionError::NonceFetch { .. })
        ));
    }

    #[tokio::test]
    async fn test_signing_failure_is_transaction_error() {
        let rpc = Arc::new(FakeRpc::new());
        let err = executor(rpc.clone(), Arc::new(FakeSigner::failing()))
            .execute_transaction(&TransactionDescriptor::new(ROUTER, "0x", "0"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BridgeError::Transaction(TransactionError::Signing { .. })
        ));
        assert_eq!(rpc.count("eth_sendRawTransaction"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out_as_transaction_error() {
        let rpc = Arc::new(FakeRpc::new().never_confirming());
        let exec = executor(rpc.clone(), Arc::new(FakeSigner::new()));

        let err = exec
            .wait_for_transaction(TxHash::repeat_byte(0xab), Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BridgeError::Transaction(TransactionError::Confirmation { .. })
        ));
        assert!(err.to_string().contains("failed or timed out"));
        assert!(rpc.count("eth_getTransactionReceipt") >= 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_query_failure_ends_wait() {
        let rpc = Arc::new(FakeRpc::new().with_failing_receipt());
        let exec = executor(rpc.clone(), Arc::new(FakeSigner::new()));

        let err = exec
            .wait_for_transaction(TxHash::repeat_byte(0xcd), Duration::from_secs(300))
            .await
            .unwrap_err();

        match &err {
            BridgeError::Transaction(TransactionError::Confirmation { cause, .. }) => {
                assert!(cause.contains("injected failure"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(rpc.count("eth_getTransactionReceipt"), 1);
    }

    #[tokio::test]
    async fn test_reverted_receipt_is_returned() {
        let rpc = Arc::new(FakeRpc::new().with_receipt_status(ReceiptStatus::Reverted));
        let exec = executor(rpc, Arc::new(FakeSigner::new()));

        let receipt = exec
            .wait_for_transaction(TxHash::repeat_byte(0x01), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(receipt.status, ReceiptStatus::Reverted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_aborts_route_with_step_context() {
        let rpc = Arc::new(FakeRpc::new().with_failing_send_at(2));
        let route = Route::new(vec![
            Step::new(TransactionDescriptor::new(ROUTER, "0x01", "0")),
            Step::new(TransactionDescriptor::new(ROUTER, "0x02", "0")),
            Step::new(TransactionDescriptor::new(ROUTER, "0x03", "0")),
        ]);

        let err = executor(rpc.clone(), Arc::new(FakeSigner::new()))
            .execute_route(&route)
            .await
            .unwrap_err();

        assert_eq!(err.failed_step(), Some(2));
        assert!(err.to_string().contains("Step 2/3 failed"));
        assert_eq!(rpc.count("eth_sendRawTransaction"), 2);
        assert_eq!(rpc.count("eth_getTransactionReceipt"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_only_between_steps() {
        let rpc = Arc::new(FakeRpc::new());
        let exec = executor(rpc, Arc::new(FakeSigner::new()));
        let started = tokio::time::Instant::now();

        exec.execute_route(&approve_and_send()).await.unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1_000));
        assert!(elapsed < Duration::from_millis(2_000));
    }
}
