//! Property-based tests for billing-cycle normalization.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::billing::{annual_value, monthly_value};
use super::types::BillingCycle;

/// Strategy for positive billed amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn any_cycle() -> impl Strategy<Value = BillingCycle> {
    prop_oneof![
        Just(BillingCycle::Monthly),
        Just(BillingCycle::Quarterly),
        Just(BillingCycle::Annual),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// monthly(x, monthly) == x exactly.
    #[test]
    fn prop_monthly_is_identity(amount in positive_amount()) {
        prop_assert_eq!(monthly_value(amount, BillingCycle::Monthly), amount);
    }

    /// monthly(x, quarterly) * 3 == x within rounding.
    #[test]
    fn prop_quarterly_round_trip(amount in positive_amount()) {
        let tripled = monthly_value(amount, BillingCycle::Quarterly) * Decimal::from(3u32);
        prop_assert_eq!(tripled.round_dp(2), amount);
    }

    /// monthly(x, annual) * 12 == x within rounding.
    #[test]
    fn prop_annual_round_trip(amount in positive_amount()) {
        let yearly = monthly_value(amount, BillingCycle::Annual) * Decimal::from(12u32);
        prop_assert_eq!(yearly.round_dp(2), amount);
    }

    /// Normalization is idempotent under re-application of the same inputs.
    #[test]
    fn prop_normalization_deterministic(amount in positive_amount(), cycle in any_cycle()) {
        prop_assert_eq!(
            monthly_value(amount, cycle),
            monthly_value(amount, cycle)
        );
    }

    /// ARR is always exactly 12x MRR.
    #[test]
    fn prop_arr_is_twelve_times_mrr(amount in positive_amount(), cycle in any_cycle()) {
        prop_assert_eq!(
            annual_value(amount, cycle),
            monthly_value(amount, cycle) * Decimal::from(12u32)
        );
    }
}
