//! Client SDK for Stargate cross-chain transfers
//!
//! Fetches route quotes from the Stargate API and executes the returned
//! transactions on the source EVM chain, one confirmed step at a time.
//!
//! ```no_run
//! use stargate_bridge::config::Config;
//! use stargate_bridge::credentials::resolve_private_key;
//! use stargate_bridge::tokens::{ETHEREUM_USDC, POLYGON_USDC};
//! use stargate_bridge::{BridgeClient, TransferRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let key = resolve_private_key(None, &config.transfer.private_key_env)?;
//! let client = BridgeClient::new(&config, key)?;
//!
//! let request = TransferRequest::new(ETHEREUM_USDC, POLYGON_USDC, "ethereum", "polygon", "1000000")
//!     .with_slippage_tolerance(0.05);
//! let hashes = client.transfer(&request).await?;
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod client;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod executor;
pub mod logger;
pub mod quotes;
pub mod tokens;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{BridgeClient, TransferRequest};
pub use errors::BridgeError;
pub use executor::TransactionExecutor;
