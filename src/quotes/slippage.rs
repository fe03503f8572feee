/// Minimum destination amount computation
///
/// Slippage is taken at the decimal value it is written as (`0.05` is exactly
/// five hundredths, not the nearest binary double) and applied with 256-bit
/// integer arithmetic on smallest-unit amounts.
use crate::errors::DataError;
use alloy::primitives::U256;

/// Finest slippage resolution accepted, in decimal places
pub const MAX_SLIPPAGE_DECIMALS: usize = 18;

/// Parse a smallest-unit decimal integer string
pub fn parse_amount(amount: &str) -> Result<U256, DataError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(DataError::InvalidAmount {
            amount: amount.to_string(),
            reason: "expected a non-negative decimal integer in the token's smallest unit"
                .to_string(),
        });
    }

    U256::from_str_radix(trimmed, 10).map_err(|e| DataError::InvalidAmount {
        amount: amount.to_string(),
        reason: e.to_string(),
    })
}

/// Slippage tolerance as an exact fraction `numerator / 10^decimals`
///
/// Uses the shortest decimal form that round-trips to the same `f64`.
/// Values in `[0, 1]` needing more than [`MAX_SLIPPAGE_DECIMALS`] places are
/// rejected rather than rounded.
pub fn slippage_fraction(slippage_tolerance: f64) -> Result<(U256, U256), DataError> {
    let invalid = |reason: String| DataError::InvalidSlippage {
        value: slippage_tolerance,
        reason,
    };

    if !slippage_tolerance.is_finite() || !(0.0..=1.0).contains(&slippage_tolerance) {
        return Err(invalid("must be between 0 and 1 (0.05 = 5%)".to_string()));
    }

    if slippage_tolerance == 0.0 {
        return Ok((U256::ZERO, U256::from(1u64)));
    }

    // f64 Display never uses exponent notation
    let text = slippage_tolerance.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    if fraction.len() > MAX_SLIPPAGE_DECIMALS {
        return Err(invalid(format!(
            "more than {} decimal places",
            MAX_SLIPPAGE_DECIMALS
        )));
    }

    let digits = format!("{}{}", whole, fraction);
    let numerator =
        U256::from_str_radix(&digits, 10).map_err(|e| invalid(e.to_string()))?;
    let scale = U256::from(10u64).pow(U256::from(fraction.len()));

    Ok((numerator, scale))
}

/// `floor(amount * (1 - slippage_tolerance))` as a decimal string
pub fn dst_amount_min(amount: &str, slippage_tolerance: f64) -> Result<String, DataError> {
    let amount_value = parse_amount(amount)?;
    let (numerator, scale) = slippage_fraction(slippage_tolerance)?;

    let kept = scale - numerator;
    let scaled = amount_value
        .checked_mul(kept)
        .ok_or_else(|| DataError::InvalidAmount {
            amount: amount.to_string(),
            reason: "amount too large".to_string(),
        })?;

    Ok((scaled / scale).to_string())
}
