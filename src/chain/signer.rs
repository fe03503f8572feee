/// Local transaction signing
///
/// Transactions are encoded as legacy EIP-155 transactions, which every EVM
/// chain the bridge routes through accepts.
use super::types::{PreparedTransaction, SignedTransaction};
use crate::credentials::PrivateKey;
use crate::errors::ConfigurationError;
use crate::logger::{self, LogTag};
use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, TxKind, U256};
use alloy::signers::local::PrivateKeySigner;
use std::str::FromStr;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct SignerError(pub String);

/// Produces signed, broadcast-ready transactions for one account
pub trait TransactionSigner: Send + Sync {
    fn address(&self) -> Address;

    fn sign_transaction(&self, tx: &PreparedTransaction) -> Result<SignedTransaction, SignerError>;
}

/// Signer backed by an in-memory secp256k1 key
pub struct WalletSigner {
    inner: PrivateKeySigner,
}

impl WalletSigner {
    pub fn from_private_key(key: &PrivateKey) -> Result<Self, ConfigurationError> {
        let inner = PrivateKeySigner::from_str(key.as_hex()).map_err(|e| {
            ConfigurationError::InvalidPrivateKey {
                error: e.to_string(),
            }
        })?;
        Ok(Self { inner })
    }
}

impl std::fmt::Debug for WalletSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSigner")
            .field("address", &self.inner.address())
            .finish()
    }
}

impl TransactionSigner for WalletSigner {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn sign_transaction(&self, tx: &PreparedTransaction) -> Result<SignedTransaction, SignerError> {
        if tx.from != self.inner.address() {
            return Err(SignerError(format!(
                "transaction sender {} does not match signer {}",
                tx.from,
                self.inner.address()
            )));
        }

        let mut legacy = TxLegacy {
            chain_id: Some(tx.chain_id),
            nonce: tx.nonce,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            to: TxKind::Call(tx.to),
            value: tx.value.unwrap_or(U256::ZERO),
            input: tx.data.clone(),
        };

        let signature = self
            .inner
            .sign_transaction_sync(&mut legacy)
            .map_err(|e| SignerError(e.to_string()))?;

        let signed = legacy.into_signed(signature);
        let hash = *signed.hash();
        let envelope = TxEnvelope::from(signed);

        logger::debug(
            LogTag::Signer,
            &format!("Signed legacy tx nonce={} chain_id={} hash={}", tx.nonce, tx.chain_id, hash),
        );

        Ok(SignedTransaction {
            hash,
            raw: Bytes::from(envelope.encoded_2718()),
            nonce: tx.nonce,
        })
    }
}
