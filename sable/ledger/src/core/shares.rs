//! Conversions between _native_ asset amounts and _shares_.
//!
//! Each side of a market maintains a native-unit total and a share total;
//! their ratio is the side's exchange rate. A holder's claim (or debt) is
//! recorded in shares, so when interest moves the native total, every
//! holder's native balance moves proportionally without any per-holder
//! bookkeeping.
//!
//! ## On rounding errors
//!
//! A conversion rarely lands on a whole number, and incorrect rounding is
//! one of the most exploited vulnerability classes in lending markets.
//! See:
//!
//! - <https://www.dlnews.com/articles/defi/hackers-continue-to-profit-from-defi-developers-math-problem/>
//! - <https://osec.io/blog/2024-01-18-rounding-bugs>
//!
//! The principle throughout: **always round to the advantage of the pool,
//! and to the disadvantage of the user**. Amounts the pool owes a user are
//! rounded down; amounts a user owes the pool are rounded up.
//!
//! The functions here are the _source of truth_ for these conversions.
//! All other code that converts between shares and native amounts must go
//! through them.

use {
    sable_math::{IsZero, MathResult, Uint128},
    sable_types::lending::Market,
};

/// Shares to mint for depositing the given native amount.
///
/// NOTE: round down. The first deposit into an empty side establishes a
/// 1:1 rate.
pub fn shares_to_mint_for_deposit(amount: Uint128, market: &Market) -> MathResult<Uint128> {
    if market.total_deposit_shares.is_zero() {
        return Ok(amount);
    }

    amount.checked_multiply_ratio_floor(market.total_deposit_shares, market.total_deposited)
}

/// The native amount the pool owes for the given deposit shares.
///
/// NOTE: round down.
pub fn amount_of_deposit_shares(shares: Uint128, market: &Market) -> MathResult<Uint128> {
    if market.total_deposit_shares.is_zero() {
        return Ok(Uint128::ZERO);
    }

    shares.checked_multiply_ratio_floor(market.total_deposited, market.total_deposit_shares)
}

/// Shares to burn for withdrawing the given native amount.
///
/// NOTE: round up, so the pool never under-collects.
pub fn shares_to_burn_for_withdrawal(amount: Uint128, market: &Market) -> MathResult<Uint128> {
    amount.checked_multiply_ratio_ceil(market.total_deposit_shares, market.total_deposited)
}

/// Debt shares to mint for borrowing the given native amount.
///
/// NOTE: round up. The first borrow from an empty side establishes a 1:1
/// rate.
pub fn shares_to_mint_for_borrow(amount: Uint128, market: &Market) -> MathResult<Uint128> {
    if market.total_borrow_shares.is_zero() {
        return Ok(amount);
    }

    amount.checked_multiply_ratio_ceil(market.total_borrow_shares, market.total_borrowed)
}

/// The native amount a holder of the given debt shares owes the pool.
///
/// NOTE: round up.
pub fn amount_of_borrow_shares(shares: Uint128, market: &Market) -> MathResult<Uint128> {
    if market.total_borrow_shares.is_zero() {
        return Ok(Uint128::ZERO);
    }

    shares.checked_multiply_ratio_ceil(market.total_borrowed, market.total_borrow_shares)
}

/// Debt shares to burn for repaying the given native amount.
///
/// NOTE: round down, so any rounding remainder stays owed to the pool.
pub fn shares_to_burn_for_repay(amount: Uint128, market: &Market) -> MathResult<Uint128> {
    amount.checked_multiply_ratio_floor(market.total_borrow_shares, market.total_borrowed)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        proptest::prelude::*,
        sable_math::Udec128,
        sable_types::{
            Bounded, Timestamp,
            lending::{InterestRateModel, MarketParams},
        },
    };

    fn market_with(
        deposited: u128,
        deposit_shares: u128,
        borrowed: u128,
        borrow_shares: u128,
    ) -> Market {
        let mut market = Market::new(MarketParams {
            interest_rate_model: InterestRateModel::default(),
            max_ltv: Bounded::new_unchecked(Udec128::new_percent(80)),
            liquidation_threshold: Bounded::new_unchecked(Udec128::new_percent(85)),
            liquidation_bonus: Bounded::new_unchecked(Udec128::new_percent(5)),
            liquidation_close_factor: Bounded::new_unchecked(Udec128::new_percent(50)),
        })
        .unwrap();

        market.total_deposited = Uint128::new(deposited);
        market.total_deposit_shares = Uint128::new(deposit_shares);
        market.total_borrowed = Uint128::new(borrowed);
        market.total_borrow_shares = Uint128::new(borrow_shares);
        market.last_update_time = Timestamp::ZERO;
        market
    }

    #[test]
    fn first_deposit_establishes_one_to_one() {
        let market = market_with(0, 0, 0, 0);
        assert_eq!(
            shares_to_mint_for_deposit(Uint128::new(1000), &market).unwrap(),
            Uint128::new(1000),
        );
    }

    #[test]
    fn deposit_mint_rounds_down_withdraw_burn_rounds_up() {
        // Exchange rate 3/2: each share is worth 1.5 native.
        let market = market_with(3, 2, 0, 0);

        // Depositing 2 at rate 1.5 is worth 1.33 shares; user gets 1.
        assert_eq!(
            shares_to_mint_for_deposit(Uint128::new(2), &market).unwrap(),
            Uint128::ONE,
        );

        // Withdrawing 2 at rate 1.5 costs 1.33 shares; user is charged 2.
        assert_eq!(
            shares_to_burn_for_withdrawal(Uint128::new(2), &market).unwrap(),
            Uint128::new(2),
        );
    }

    #[test]
    fn debt_valuation_rounds_up_repay_burn_rounds_down() {
        // Borrow exchange rate 10/3.
        let market = market_with(20, 20, 10, 3);

        // One debt share owes ceil(10/3) = 4.
        assert_eq!(
            amount_of_borrow_shares(Uint128::ONE, &market).unwrap(),
            Uint128::new(4),
        );

        // Repaying 3 burns floor(3 * 3/10) = 0 shares: the payment is
        // credited to the pool total, the debt shares stay put.
        assert_eq!(
            shares_to_burn_for_repay(Uint128::new(3), &market).unwrap(),
            Uint128::ZERO,
        );
    }

    #[test]
    fn empty_side_values_to_zero() {
        let market = market_with(0, 0, 0, 0);
        assert_eq!(
            amount_of_deposit_shares(Uint128::new(5), &market).unwrap(),
            Uint128::ZERO,
        );
        assert_eq!(
            amount_of_borrow_shares(Uint128::new(5), &market).unwrap(),
            Uint128::ZERO,
        );
    }

    proptest! {
        /// Depositing then withdrawing the redeemable value must never let
        /// the user burn fewer shares than they were minted.
        #[test]
        fn round_trip_never_favors_the_user(
            pool_native in 1..1_000_000_000u128,
            pool_shares in 1..1_000_000_000u128,
            amount in 1..1_000_000_000u128,
        ) {
            let market = market_with(pool_native, pool_shares, 0, 0);

            let minted = shares_to_mint_for_deposit(Uint128::new(amount), &market).unwrap();

            let mut after = market;
            after.total_deposited = market.total_deposited + Uint128::new(amount);
            after.total_deposit_shares = market.total_deposit_shares + minted;

            let redeemable = amount_of_deposit_shares(minted, &after).unwrap();
            prop_assert!(redeemable <= Uint128::new(amount));

            if !redeemable.is_zero() {
                let burned = shares_to_burn_for_withdrawal(redeemable, &after).unwrap();
                prop_assert!(burned <= minted);
            }
        }
    }
}
