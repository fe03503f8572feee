/// Structured error handling for the bridge client
///
/// Every public operation returns `BridgeError`, which groups failures into the
/// four kinds a caller can act on: configuration, quote API, chain transaction
/// and input data. Each kind carries the underlying cause as text so errors stay
/// `Clone` and can be logged or stored without holding transport handles.
use thiserror::Error;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    #[error("Configuration Error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("API Error: {0}")]
    Api(#[from] ApiError),

    #[error("Transaction Error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Data Error: {0}")]
    Data(#[from] DataError),
}

// =============================================================================
// CONFIGURATION ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum ConfigurationError {
    #[error("Private key must be provided or set in {env_var} environment variable")]
    MissingPrivateKey { env_var: String },

    #[error("Invalid private key: {error}")]
    InvalidPrivateKey { error: String },

    #[error("Invalid URL '{url}': {error}")]
    InvalidUrl { url: String, error: String },

    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Failed to load config file '{path}': {error}")]
    FileError { path: String, error: String },

    #[error("Failed to build HTTP client for {component}: {error}")]
    HttpClient { component: String, error: String },
}

// =============================================================================
// QUOTE API ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {cause}")]
    RequestFailed { endpoint: String, cause: String },

    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {endpoint}: {cause}")]
    MalformedResponse { endpoint: String, cause: String },

    #[error("No quotes available for this transfer")]
    NoQuotes,

    #[error("Route selector '{policy}' did not pick any of {candidates} routes")]
    NoRouteSelected { policy: String, candidates: usize },
}

// =============================================================================
// TRANSACTION ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum TransactionError {
    #[error("No steps found in route data")]
    EmptyRoute,

    #[error("Invalid transaction field '{field}' ({value}): {reason}")]
    InvalidDescriptor {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to fetch nonce for {address}: {cause}")]
    NonceFetch { address: String, cause: String },

    #[error("Failed to read gas price: {cause}")]
    GasPrice { cause: String },

    #[error("Failed to read chain id: {cause}")]
    ChainId { cause: String },

    #[error("Failed to sign transaction: {cause}")]
    Signing { cause: String },

    #[error("Failed to broadcast transaction: {cause}")]
    Broadcast { cause: String },

    #[error("Transaction {tx_hash} failed or timed out: {cause}")]
    Confirmation { tx_hash: String, cause: String },

    #[error("Step {step}/{total} failed: {source}")]
    StepFailed {
        step: usize,
        total: usize,
        #[source]
        source: Box<TransactionError>,
    },
}

// =============================================================================
// DATA ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, Error)]
pub enum DataError {
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Invalid slippage tolerance {value}: {reason}")]
    InvalidSlippage { value: f64, reason: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: String },
}

// =============================================================================
// STRUCTURED ERROR BUILDERS
// =============================================================================

impl BridgeError {
    pub fn request_failed(endpoint: impl Into<String>, cause: impl ToString) -> Self {
        BridgeError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            cause: cause.to_string(),
        })
    }

    pub fn http_status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        BridgeError::Api(ApiError::HttpStatus {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        })
    }

    pub fn malformed_response(endpoint: impl Into<String>, cause: impl ToString) -> Self {
        BridgeError::Api(ApiError::MalformedResponse {
            endpoint: endpoint.into(),
            cause: cause.to_string(),
        })
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::Configuration(ConfigurationError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Attach 1-based step context to a transaction error raised while
    /// executing a route. Other error kinds pass through untouched.
    pub fn at_step(self, step: usize, total: usize) -> Self {
        match self {
            BridgeError::Transaction(source) => BridgeError::Transaction(TransactionError::StepFailed {
                step,
                total,
                source: Box::new(source),
            }),
            other => other,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, BridgeError::Configuration(_))
    }

    pub fn is_api(&self) -> bool {
        matches!(self, BridgeError::Api(_))
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self, BridgeError::Transaction(_))
    }

    pub fn is_data(&self) -> bool {
        matches!(self, BridgeError::Data(_))
    }

    /// Step number recorded on a failed route execution, if any
    pub fn failed_step(&self) -> Option<usize> {
        match self {
            BridgeError::Transaction(TransactionError::StepFailed { step, .. }) => Some(*step),
            _ => None,
        }
    }
}
