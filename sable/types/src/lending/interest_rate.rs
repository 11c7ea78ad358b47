use {
    crate::{Bounded, ZeroExclusiveOneExclusive, ZeroInclusiveOneExclusive},
    borsh::{BorshDeserialize, BorshSerialize},
    sable_math::Udec128,
    serde::{Deserialize, Serialize},
};

/// Dual slope interest rate model, consisting of two linear functions.
///
/// This is based on Aave's interest rate model. The first slope is applied
/// when the utilization is below the optimal utilization rate, and the
/// second slope is applied when the utilization is above the optimal
/// utilization rate.
#[derive(
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
)]
pub struct InterestRateModel {
    /// The base interest rate. This is the interest rate that is applied
    /// when the utilization is 0%.
    pub base_rate: Bounded<Udec128, ZeroInclusiveOneExclusive>,
    /// The optimal utilization rate. This is the utilization rate after
    /// which the second slope is applied.
    pub optimal_utilization: Bounded<Udec128, ZeroExclusiveOneExclusive>,
    /// The slope of the first linear function. This is the slope that is
    /// applied when the utilization is below the optimal utilization rate.
    pub first_slope: Bounded<Udec128, ZeroExclusiveOneExclusive>,
    /// The slope of the second linear function. This is the slope that is
    /// applied when the utilization is above the optimal utilization rate.
    pub second_slope: Bounded<Udec128, ZeroExclusiveOneExclusive>,
}

impl Default for InterestRateModel {
    /// Default interest rate model used for testing.
    fn default() -> Self {
        Self {
            base_rate: Bounded::new_unchecked(Udec128::new_percent(1)),
            optimal_utilization: Bounded::new_unchecked(Udec128::new_percent(80)),
            first_slope: Bounded::new_unchecked(Udec128::new_percent(4)),
            second_slope: Bounded::new_unchecked(Udec128::new_percent(75)),
        }
    }
}
