//! Money arithmetic with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`. Currency figures are rounded to
//! 2 decimal places only at presentation/persistence boundaries; intermediate
//! results stay unrounded so rounding error never compounds across line items.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits for currency amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds a currency amount to 2 decimal places (half-up).
///
/// This is the presentation/persistence boundary. Call it on final figures
/// only, never on intermediate arithmetic.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes `amount * rate / 100` without rounding.
///
/// Used for tax rates and other percentage figures, which keep an
/// unconstrained scale until the final rounding boundary.
#[must_use]
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / Decimal::ONE_HUNDRED
}

/// Parses a currency amount from raw form input, degrading to zero.
///
/// A half-filled numeric field must never crash or error: empty, unparseable,
/// and negative input all coerce to `Decimal::ZERO`. Required/min/max checks
/// are a separate validation pass over the typed value, not part of parsing.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    match raw.trim().parse::<Decimal>() {
        Ok(value) if value.is_sign_negative() => Decimal::ZERO,
        Ok(value) => value,
        Err(_) => Decimal::ZERO,
    }
}

/// Parses a quantity from raw form input, degrading to zero.
///
/// Same defensive contract as [`parse_amount`]: negative and non-numeric
/// input are treated as zero.
#[must_use]
pub fn parse_quantity(raw: &str) -> Decimal {
    parse_amount(raw)
}

/// Clamps a currency amount to be non-negative.
///
/// Display figures are never presented negative; the unclamped value stays
/// available for audit at the call site.
#[must_use]
pub fn clamp_non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}
