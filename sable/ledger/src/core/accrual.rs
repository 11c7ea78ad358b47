use {
    crate::calculate_borrow_rate,
    sable_math::{IsZero, MathResult, MultiplyFraction, Udec128},
    sable_types::{
        Timestamp,
        lending::{Market, SECONDS_PER_YEAR},
    },
};

/// Update the state of a `Market` to account for interest accrued since
/// the last update.
///
/// Interest is charged on the borrowed total at the rate the model yields
/// for the current utilization, prorated linearly over the elapsed time,
/// and credited to the deposited total in the same amount: what borrowers
/// owe extra is exactly what depositors may now redeem extra. Neither
/// total ever decreases here, and calling twice at the same timestamp
/// accrues nothing the second time.
///
/// A `current_time` earlier than the market's `last_update_time` (clock
/// skew in the execution environment) is treated as zero elapsed time and
/// leaves the stored timestamp untouched, so time never moves backwards.
pub fn accrue_interest(market: Market, current_time: Timestamp) -> MathResult<Market> {
    if current_time < market.last_update_time {
        return Ok(market);
    }

    // If nothing is borrowed, or no time has elapsed, there is no interest
    // to accrue.
    if market.total_borrowed.is_zero() || current_time == market.last_update_time {
        return Ok(market.set_last_update_time(current_time));
    }

    let utilization = market.utilization_rate()?;
    let borrow_rate = calculate_borrow_rate(&market.interest_rate_model, utilization)?;

    let time_delta = current_time - market.last_update_time;
    let time_out_of_year =
        Udec128::checked_from_ratio(time_delta.into_seconds(), SECONDS_PER_YEAR)?;

    // Floored, so repeated accrual can only ever round against the
    // borrowers' creditors by dust, never create unbacked debt.
    let interest = market
        .total_borrowed
        .checked_mul_dec_floor(borrow_rate.checked_mul(time_out_of_year)?)?;

    let mut market = market.set_last_update_time(current_time);
    market.total_borrowed.checked_add_assign(interest)?;
    market.total_deposited.checked_add_assign(interest)?;

    Ok(market)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        sable_math::Uint128,
        sable_types::{
            Bounded,
            lending::{InterestRateModel, MarketParams},
        },
    };

    fn market_with(deposited: u128, borrowed: u128, at: Timestamp) -> Market {
        let mut market = Market::new(MarketParams {
            interest_rate_model: InterestRateModel::default(),
            max_ltv: Bounded::new_unchecked(Udec128::new_percent(80)),
            liquidation_threshold: Bounded::new_unchecked(Udec128::new_percent(85)),
            liquidation_bonus: Bounded::new_unchecked(Udec128::new_percent(5)),
            liquidation_close_factor: Bounded::new_unchecked(Udec128::new_percent(50)),
        })
        .unwrap();

        market.total_deposited = Uint128::new(deposited);
        market.total_deposit_shares = Uint128::new(deposited);
        market.total_borrowed = Uint128::new(borrowed);
        market.total_borrow_shares = Uint128::new(borrowed);
        market.last_update_time = at;
        market
    }

    #[test]
    fn zero_elapsed_time_accrues_nothing() {
        let now = Timestamp::from_seconds(1000);
        let market = market_with(10_000, 5_000, now);

        let accrued = accrue_interest(market, now).unwrap();
        assert_eq!(accrued, market);
    }

    #[test]
    fn clock_skew_is_treated_as_zero_elapsed() {
        let market = market_with(10_000, 5_000, Timestamp::from_seconds(1000));

        let accrued = accrue_interest(market, Timestamp::from_seconds(500)).unwrap();
        assert_eq!(accrued, market);
        assert_eq!(accrued.last_update_time, Timestamp::from_seconds(1000));
    }

    #[test]
    fn idle_market_only_advances_the_clock() {
        let market = market_with(10_000, 0, Timestamp::from_seconds(0));
        let now = Timestamp::from_days(30);

        let accrued = accrue_interest(market, now).unwrap();
        assert_eq!(accrued.total_deposited, market.total_deposited);
        assert_eq!(accrued.last_update_time, now);
    }

    #[test]
    fn interest_lands_on_both_sides_equally() {
        // 50% utilization under the default model: rate = 1% + (0.5/0.8)*4% = 3.5%.
        // Over a full year on 5_000 borrowed: 175.
        let market = market_with(10_000, 5_000, Timestamp::from_seconds(0));
        let year = Timestamp::from_seconds(SECONDS_PER_YEAR);

        let accrued = accrue_interest(market, year).unwrap();
        assert_eq!(accrued.total_borrowed, Uint128::new(5_175));
        assert_eq!(accrued.total_deposited, Uint128::new(10_175));
        // Share totals are untouched; the exchange rate is what moved.
        assert_eq!(accrued.total_borrow_shares, market.total_borrow_shares);
        assert_eq!(accrued.total_deposit_shares, market.total_deposit_shares);
    }

    #[test]
    fn accrual_is_monotonic() {
        let mut market = market_with(10_000, 9_999, Timestamp::from_seconds(0));

        for day in 1..=365 {
            let next = accrue_interest(market, Timestamp::from_days(day)).unwrap();
            assert!(next.total_borrowed >= market.total_borrowed);
            assert!(next.total_deposited >= market.total_deposited);
            assert!(next.total_deposited >= next.total_borrowed);
            market = next;
        }
    }
}
