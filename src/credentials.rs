/// Private key handling
///
/// The key is resolved once at the boundary (explicit value first, then the
/// configured environment variable) and passed into the client as a
/// [`PrivateKey`]. Nothing below this module reads the environment.
use crate::errors::ConfigurationError;
use std::fmt;

/// Hex-encoded secp256k1 private key, normalized to carry a `0x` prefix
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Normalize and validate a raw key string
    ///
    /// Accepts 64 hex digits with or without a `0x` prefix, surrounding
    /// whitespace ignored.
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 64 {
            return Err(ConfigurationError::InvalidPrivateKey {
                error: format!("expected 64 hex digits, got {}", digits.len()),
            });
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigurationError::InvalidPrivateKey {
                error: "contains non-hex characters".to_string(),
            });
        }

        Ok(Self(format!("0x{}", digits)))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Resolve the signing key: explicit value wins, otherwise `env_var`
pub fn resolve_private_key(
    explicit: Option<&str>,
    env_var: &str,
) -> Result<PrivateKey, ConfigurationError> {
    let from_env;
    let raw = match explicit.filter(|k| !k.trim().is_empty()) {
        Some(key) => key,
        None => {
            from_env = std::env::var(env_var).unwrap_or_default();
            from_env.as_str()
        }
    };

    if raw.trim().is_empty() {
        return Err(ConfigurationError::MissingPrivateKey {
            env_var: env_var.to_string(),
        });
    }

    PrivateKey::parse(raw)
}
