/// Log tags identifying the subsystem that emitted a message

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Quotes,
    Executor,
    Rpc,
    Signer,
    Transfer,
}

impl LogTag {
    pub const ALL: [LogTag; 7] = [
        LogTag::System,
        LogTag::Config,
        LogTag::Quotes,
        LogTag::Executor,
        LogTag::Rpc,
        LogTag::Signer,
        LogTag::Transfer,
    ];

    /// Key used by `--debug-<key>` / `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> &'static str {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Quotes => "quotes",
            LogTag::Executor => "executor",
            LogTag::Rpc => "rpc",
            LogTag::Signer => "signer",
            LogTag::Transfer => "transfer",
        }
    }

    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Quotes => "QUOTES",
            LogTag::Executor => "EXECUTOR",
            LogTag::Rpc => "RPC",
            LogTag::Signer => "SIGNER",
            LogTag::Transfer => "TRANSFER",
        }
    }

    pub fn from_debug_key(key: &str) -> Option<LogTag> {
        LogTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.to_debug_key() == key)
    }
}
