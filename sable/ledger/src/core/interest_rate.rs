use {
    sable_math::{MathResult, Udec128},
    sable_types::lending::InterestRateModel,
};

/// Compute the annualized borrow rate for the given utilization under a
/// dual-slope model.
///
/// Below the optimal utilization, the rate climbs from the base rate along
/// the first slope; above it, the steeper second slope takes over:
///
/// ```plain
/// u <= optimal: rate = base + (u / optimal) * slope1
/// u >  optimal: rate = base + slope1 + ((u - optimal) / (1 - optimal)) * slope2
/// ```
pub fn calculate_borrow_rate(
    model: &InterestRateModel,
    utilization: Udec128,
) -> MathResult<Udec128> {
    if utilization <= *model.optimal_utilization {
        let scaled = utilization
            .checked_div(*model.optimal_utilization)?
            .checked_mul(*model.first_slope)?;

        model.base_rate.checked_add(scaled)
    } else {
        let excess = utilization
            .checked_sub(*model.optimal_utilization)?
            .checked_div(Udec128::ONE.checked_sub(*model.optimal_utilization)?)?
            .checked_mul(*model.second_slope)?;

        model
            .base_rate
            .checked_add(*model.first_slope)?
            .checked_add(excess)
    }
}

// ----------------------------------- tests -----------------------------------
