/// Configuration schemas - all config structures defined once with defaults
use crate::config_struct;
use crate::quotes::RouteSelectionPolicy;

/// Stargate public API
pub const DEFAULT_API_BASE_URL: &str = "https://stargate.finance/api/v1";

/// Public Ethereum mainnet RPC endpoint
pub const DEFAULT_RPC_URL: &str = "https://eth.merkle.io";

/// Environment variable the binary reads the signing key from
pub const DEFAULT_PRIVATE_KEY_ENV: &str = "EVM_PRIVATE_KEY";

// ============================================================================
// QUOTE API CONFIGURATION
// ============================================================================

config_struct! {
    /// Bridging service HTTP API
    pub struct ApiConfig {
        base_url: String = DEFAULT_API_BASE_URL.to_string(),
        request_timeout_secs: u64 = 30,
    }
}

// ============================================================================
// CHAIN RPC CONFIGURATION
// ============================================================================

config_struct! {
    /// Source chain JSON-RPC endpoint
    pub struct ChainConfig {
        rpc_url: String = DEFAULT_RPC_URL.to_string(),
        request_timeout_secs: u64 = 30,
    }
}

// ============================================================================
// EXECUTOR CONFIGURATION
// ============================================================================

config_struct! {
    /// Route execution tuning
    pub struct ExecutorConfig {
        /// Gas limit used when estimation fails
        default_gas_limit: u64 = 300_000,
        /// Safety margin applied on top of a successful gas estimate
        gas_buffer_percent: u64 = 20,
        /// Receipt wait timeout per step
        confirmation_timeout_secs: u64 = 300,
        receipt_poll_interval_ms: u64 = 1_000,
        /// Pause between consecutive steps of a route
        step_delay_ms: u64 = 1_000,
    }
}

// ============================================================================
// TRANSFER CONFIGURATION
// ============================================================================

config_struct! {
    /// Defaults for the high-level transfer call
    pub struct TransferConfig {
        /// 0.05 = 5%
        default_slippage_tolerance: f64 = 0.05,
        route_selection: RouteSelectionPolicy = RouteSelectionPolicy::First,
        private_key_env: String = DEFAULT_PRIVATE_KEY_ENV.to_string(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    pub struct Config {
        api: ApiConfig = ApiConfig::default(),
        chain: ChainConfig = ChainConfig::default(),
        executor: ExecutorConfig = ExecutorConfig::default(),
        transfer: TransferConfig = TransferConfig::default(),
    }
}
