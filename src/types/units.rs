//! Fixed-point display conversions for base units.
//!
//! Ledger amounts are plain integers in base units. These helpers convert
//! between base units and human-readable decimal strings at a 10^8 scale,
//! for the demo binary and diagnostics. rust_decimal keeps the conversion
//! exact; no floating point is involved.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Base units per whole asset unit: 10^8
pub const SCALE: u64 = 100_000_000;

/// Parse a decimal string into base units
///
/// Returns `None` for negative, malformed, or out-of-range input.
///
/// # Example
///
/// ```
/// use chainbook::types::units::to_units;
///
/// assert_eq!(to_units("1"), Some(100_000_000));
/// assert_eq!(to_units("0.00000001"), Some(1));
/// assert_eq!(to_units("-1"), None);
/// ```
pub fn to_units(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    if decimal.is_sign_negative() {
        return None;
    }
    let scaled = decimal.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Format base units as a decimal string with trailing zeros trimmed
///
/// # Example
///
/// ```
/// use chainbook::types::units::from_units;
///
/// assert_eq!(from_units(100_000_000), "1");
/// assert_eq!(from_units(150_000_000), "1.5");
/// ```
pub fn from_units(value: u64) -> String {
    let decimal = Decimal::from(value) / Decimal::from(SCALE);
    format!("{}", decimal.normalize())
}
