use {
    crate::{
        Bounded, StdError, StdResult, Timestamp, ZeroInclusiveOneExclusive,
        ZeroInclusiveOneInclusive,
        lending::InterestRateModel,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    sable_math::{IsZero, MathResult, Udec128, Uint128},
    serde::{Deserialize, Serialize},
};

/// Seconds in a year, assuming 365 days.
pub const SECONDS_PER_YEAR: u128 = 31536000;

/// Risk and rate parameters a market is created with.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketParams {
    pub interest_rate_model: InterestRateModel,
    /// Maximum loan-to-value allowed at borrow time. A stricter,
    /// forward-looking bound than the liquidation threshold.
    pub max_ltv: Bounded<Udec128, ZeroInclusiveOneExclusive>,
    /// Collateral ratio below which a position becomes eligible for
    /// liquidation.
    pub liquidation_threshold: Bounded<Udec128, ZeroInclusiveOneInclusive>,
    /// Discount a liquidator receives on seized collateral. Read by the
    /// external liquidation workflow; not used by the ledger itself.
    pub liquidation_bonus: Bounded<Udec128, ZeroInclusiveOneInclusive>,
    /// Greatest portion of a position's debt a single liquidation may
    /// close. Read by the external liquidation workflow.
    pub liquidation_close_factor: Bounded<Udec128, ZeroInclusiveOneInclusive>,
}

/// Configurations and state of a market: one pool of a single asset type,
/// accepting deposits and issuing borrows.
///
/// Each side tracks a native-unit total and a share total; their ratio is
/// the side's floating exchange rate. Interest moves the ratio, never the
/// recorded share counts, which is how yield is distributed without
/// iterating over holders.
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
pub struct Market {
    /// The current interest rate model of this market.
    pub interest_rate_model: InterestRateModel,
    /// The total amount of coins deposited into this market.
    pub total_deposited: Uint128,
    /// Shares outstanding against `total_deposited`.
    pub total_deposit_shares: Uint128,
    /// The total amount of coins borrowed from this market.
    pub total_borrowed: Uint128,
    /// Shares outstanding against `total_borrowed`.
    pub total_borrow_shares: Uint128,
    pub max_ltv: Bounded<Udec128, ZeroInclusiveOneExclusive>,
    pub liquidation_threshold: Bounded<Udec128, ZeroInclusiveOneInclusive>,
    pub liquidation_bonus: Bounded<Udec128, ZeroInclusiveOneInclusive>,
    pub liquidation_close_factor: Bounded<Udec128, ZeroInclusiveOneInclusive>,
    /// The last time interest was accrued on this market.
    pub last_update_time: Timestamp,
}

impl Market {
    pub fn new(params: MarketParams) -> StdResult<Self> {
        // A market whose max LTV exceeds its liquidation threshold would
        // admit borrows that are liquidatable the moment they settle.
        if *params.max_ltv > *params.liquidation_threshold {
            return Err(StdError::out_of_range(
                *params.max_ltv,
                ">",
                *params.liquidation_threshold,
            ));
        }

        Ok(Self {
            interest_rate_model: params.interest_rate_model,
            total_deposited: Uint128::ZERO,
            total_deposit_shares: Uint128::ZERO,
            total_borrowed: Uint128::ZERO,
            total_borrow_shares: Uint128::ZERO,
            max_ltv: params.max_ltv,
            liquidation_threshold: params.liquidation_threshold,
            liquidation_bonus: params.liquidation_bonus,
            liquidation_close_factor: params.liquidation_close_factor,
            last_update_time: Timestamp::ZERO,
        })
    }

    /// The amount of coins deposited but not currently lent out. This is
    /// the most that can be withdrawn or borrowed right now.
    pub fn available_liquidity(&self) -> MathResult<Uint128> {
        self.total_deposited.checked_sub(self.total_borrowed)
    }

    /// The market's utilization rate: borrowed over deposited, limited to
    /// 100%. Utilization can exceed 100% transiently if the entire supply
    /// is borrowed and interest then accrues faster on the borrow side's
    /// rounding; clamping keeps the rate model's input in its domain.
    pub fn utilization_rate(&self) -> MathResult<Udec128> {
        if self.total_deposited.is_zero() {
            return Ok(Udec128::ZERO);
        }

        let rate = Udec128::checked_from_ratio(self.total_borrowed, self.total_deposited)?;

        if rate > Udec128::ONE {
            return Ok(Udec128::ONE);
        }

        Ok(rate)
    }

    /// Immutably sets the last update time and returns the new market
    /// state.
    pub fn set_last_update_time(self, time: Timestamp) -> Self {
        Self {
            last_update_time: time,
            ..self
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::Bounded, sable_math::Udec128};

    fn params() -> MarketParams {
        MarketParams {
            interest_rate_model: InterestRateModel::default(),
            max_ltv: Bounded::new_unchecked(Udec128::new_percent(80)),
            liquidation_threshold: Bounded::new_unchecked(Udec128::new_percent(85)),
            liquidation_bonus: Bounded::new_unchecked(Udec128::new_percent(5)),
            liquidation_close_factor: Bounded::new_unchecked(Udec128::new_percent(50)),
        }
    }

    #[test]
    fn new_market_is_empty() {
        let market = Market::new(params()).unwrap();
        assert_eq!(market.total_deposited, Uint128::ZERO);
        assert_eq!(market.total_deposit_shares, Uint128::ZERO);
        assert_eq!(market.utilization_rate().unwrap(), Udec128::ZERO);
        assert_eq!(market.available_liquidity().unwrap(), Uint128::ZERO);
    }

    #[test]
    fn ltv_above_threshold_is_rejected() {
        let mut params = params();
        params.max_ltv = Bounded::new_unchecked(Udec128::new_percent(90));
        assert!(Market::new(params).is_err());
    }

    #[test]
    fn utilization_is_clamped() {
        let mut market = Market::new(params()).unwrap();
        market.total_deposited = Uint128::new(100);
        market.total_borrowed = Uint128::new(150);
        assert_eq!(market.utilization_rate().unwrap(), Udec128::ONE);
    }
}
