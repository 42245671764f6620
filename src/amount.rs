use std::str::FromStr;

use bigdecimal::{num_bigint::BigInt, BigDecimal, RoundingMode};
use tracing::warn;

/// Base-unit exponent of the chain's native token (umfx).
pub const NATIVE_EXPONENT: i64 = 6;

/// Fractional digits kept when shifting amounts for display.
pub const DEFAULT_DISPLAY_DECIMALS: i64 = 6;

fn pow10(exponent: i64) -> BigDecimal {
    BigDecimal::new(BigInt::from(1), -exponent)
}

/// Converts a human-entered decimal string into base units.
///
/// Multiplies by `10^exponent` and truncates towards zero past `exponent`
/// fractional digits. Unparseable input degrades to zero instead of failing,
/// so a bad form value never aborts the caller.
pub fn parse_decimal_to_base_units(input: &str, exponent: i64) -> BigInt {
    let dec = match BigDecimal::from_str(input.trim()) {
        Ok(dec) => dec,
        Err(e) => {
            warn!("Could not parse decimal amount {:?}: {}", input, e);
            return BigInt::from(0);
        },
    };

    let (int, _) = (dec * pow10(exponent))
        .with_scale_round(0, RoundingMode::Down)
        .into_bigint_and_exponent();

    int
}

/// Moves the decimal point of `amount` by `shift_by` places (negative shifts
/// divide), truncating towards zero at `rounding_decimals` fractional digits.
///
/// Returns the literal `"0"` for empty or unparseable input.
pub fn shift_decimal_places(
    amount: &str,
    shift_by: i64,
    rounding_decimals: i64,
) -> String {
    let dec = match BigDecimal::from_str(amount.trim()) {
        Ok(dec) => dec,
        Err(e) => {
            warn!("Could not shift amount {:?}: {}", amount, e);
            return String::from("0");
        },
    };

    (dec * pow10(shift_by))
        .with_scale_round(rounding_decimals, RoundingMode::Down)
        .normalized()
        .to_string()
}
