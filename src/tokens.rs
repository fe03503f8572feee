/// Well-known token addresses and chain ids
///
/// Only the stablecoins commonly bridged through Stargate are listed. Any
/// other token is passed to the quote API by address.

// ============================================================================
// CHAIN IDS
// ============================================================================

pub const ETHEREUM_CHAIN_ID: u64 = 1;
pub const POLYGON_CHAIN_ID: u64 = 137;
pub const ARBITRUM_CHAIN_ID: u64 = 42161;
pub const OPTIMISM_CHAIN_ID: u64 = 10;
pub const BASE_CHAIN_ID: u64 = 8453;
pub const AVALANCHE_CHAIN_ID: u64 = 43114;

const CHAIN_IDS: &[(&str, u64)] = &[
    ("ethereum", ETHEREUM_CHAIN_ID),
    ("polygon", POLYGON_CHAIN_ID),
    ("arbitrum", ARBITRUM_CHAIN_ID),
    ("optimism", OPTIMISM_CHAIN_ID),
    ("base", BASE_CHAIN_ID),
    ("avalanche", AVALANCHE_CHAIN_ID),
];

// ============================================================================
// STABLECOIN ADDRESSES
// ============================================================================

pub const ETHEREUM_USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
pub const ETHEREUM_USDT: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";

pub const POLYGON_USDC: &str = "0x3c499c542cef5e3811e1192ce70d8cc03d5c3359";
pub const POLYGON_USDT: &str = "0xc2132d05d31c914a87c6611c10748aeb04b58e8f";

pub const ARBITRUM_USDC: &str = "0xaf88d065e77c8cc2239327c5edb3a432268e5831";
pub const ARBITRUM_USDT: &str = "0xfd086bc7cd5c481dcc9c85ebe478a1c0b69fcbb9";

/// (chain key, symbol, address)
const TOKENS: &[(&str, &str, &str)] = &[
    ("ethereum", "USDC", ETHEREUM_USDC),
    ("ethereum", "USDT", ETHEREUM_USDT),
    ("polygon", "USDC", POLYGON_USDC),
    ("polygon", "USDT", POLYGON_USDT),
    ("arbitrum", "USDC", ARBITRUM_USDC),
    ("arbitrum", "USDT", ARBITRUM_USDT),
];

/// EVM chain id for a Stargate chain key
pub fn chain_id(chain_key: &str) -> Option<u64> {
    let key = chain_key.trim();
    CHAIN_IDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, id)| *id)
}

/// Known token address by chain key and symbol
pub fn token_address(chain_key: &str, symbol: &str) -> Option<&'static str> {
    let (chain_key, symbol) = (chain_key.trim(), symbol.trim());
    TOKENS
        .iter()
        .find(|(chain, sym, _)| chain.eq_ignore_ascii_case(chain_key) && sym.eq_ignore_ascii_case(symbol))
        .map(|(_, _, address)| *address)
}

/// Symbols registered for a chain key
pub fn symbols_for_chain(chain_key: &str) -> Vec<&'static str> {
    let chain_key = chain_key.trim();
    TOKENS
        .iter()
        .filter(|(chain, _, _)| chain.eq_ignore_ascii_case(chain_key))
        .map(|(_, symbol, _)| *symbol)
        .collect()
}

/// Accept either a `0x` address or a registered symbol
pub fn resolve_token(chain_key: &str, token: &str) -> Option<String> {
    let token = token.trim();
    if token.starts_with("0x") && token.len() == 42 {
        return Some(token.to_string());
    }
    token_address(chain_key, token).map(str::to_string)
}
