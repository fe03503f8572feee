/// Configuration system
///
/// - `macros`: `config_struct!` for single-source struct + defaults definitions
/// - `schemas`: the configuration sections
/// - `utils`: TOML loading and validation
pub mod macros;
mod schemas;
mod utils;

pub use schemas::{
    ApiConfig, ChainConfig, Config, ExecutorConfig, TransferConfig, DEFAULT_API_BASE_URL,
    DEFAULT_PRIVATE_KEY_ENV, DEFAULT_RPC_URL,
};
pub use utils::{load_config, load_config_from_path, parse_config, CONFIG_FILE_PATH};
