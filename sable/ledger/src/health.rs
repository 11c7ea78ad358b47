use {
    crate::{LedgerError, LedgerResult, amount_of_borrow_shares, amount_of_deposit_shares},
    sable_math::{IsZero, Udec128, Uint128},
    sable_types::{
        Denom,
        lending::{Market, Position},
        oracle::Price,
    },
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// The health of a position: its debts and collateral converted to native
/// amounts at the owning markets' current exchange rates, and valued in
/// the common unit at conservative oracle prices.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    /// Debt value over adjusted collateral value. Greater than one means
    /// the position is eligible for liquidation.
    pub utilization_rate: Udec128,
    /// Total debt, valued at each price's upper bound.
    pub total_debt_value: Udec128,
    /// Total collateral, valued at each price's lower bound, unweighted.
    pub total_collateral_value: Udec128,
    /// Collateral value weighted by each market's liquidation threshold.
    /// The boundary for withdrawals and for liquidation eligibility.
    pub total_adjusted_collateral_value: Udec128,
    /// Collateral value weighted by each market's max LTV. The boundary
    /// for new borrows; at most the adjusted value above.
    pub total_borrowable_value: Udec128,
    /// Native debt amounts per denom.
    pub debts: BTreeMap<Denom, Uint128>,
    /// Native collateral amounts per denom.
    pub collaterals: BTreeMap<Denom, Uint128>,
}

impl HealthResponse {
    /// Whether the position is below the liquidation boundary.
    pub fn is_liquidatable(&self) -> bool {
        self.total_debt_value > self.total_adjusted_collateral_value
    }
}

/// Compute the health of a position.
///
/// `markets` and `prices` must contain an entry for every denom the
/// position touches, with interest freshly accrued on each market; the
/// caller assembles them (possibly substituting staged, not-yet-committed
/// market states).
pub fn compute_health(
    position: &Position,
    markets: &BTreeMap<Denom, Market>,
    prices: &BTreeMap<Denom, Price>,
) -> LedgerResult<HealthResponse> {
    // ------------------------------- 1. Debts --------------------------------

    let mut debts = BTreeMap::new();
    let mut total_debt_value = Udec128::ZERO;

    for (denom, shares) in &position.borrowed_shares {
        let market = lookup(markets, denom)?;
        let price = lookup(prices, denom)?;

        // What the user owes, rounded against them.
        let debt = amount_of_borrow_shares(*shares, market)?;
        let value = price.debt_value_of_unit_amount(debt)?;

        debts.insert(denom.clone(), debt);
        total_debt_value.checked_add_assign(value)?;
    }

    // ---------------------------- 2. Collaterals -----------------------------

    let mut collaterals = BTreeMap::new();
    let mut total_collateral_value = Udec128::ZERO;
    let mut total_adjusted_collateral_value = Udec128::ZERO;
    let mut total_borrowable_value = Udec128::ZERO;

    for (denom, shares) in &position.collateral_shares {
        if shares.is_zero() {
            continue;
        }

        let market = lookup(markets, denom)?;
        let price = lookup(prices, denom)?;

        // What the pool owes the user, rounded against them.
        let collateral = amount_of_deposit_shares(*shares, market)?;
        let value = price.collateral_value_of_unit_amount(collateral)?;

        collaterals.insert(denom.clone(), collateral);
        total_collateral_value.checked_add_assign(value)?;
        total_adjusted_collateral_value
            .checked_add_assign(value.checked_mul(*market.liquidation_threshold)?)?;
        total_borrowable_value.checked_add_assign(value.checked_mul(*market.max_ltv)?)?;
    }

    // -------------------------- 3. Utilization rate --------------------------

    let utilization_rate = if total_debt_value.is_zero() {
        // The position has no debt. Utilization is zero in this case,
        // regardless of collateral value.
        Udec128::ZERO
    } else if total_adjusted_collateral_value.is_zero() {
        // The position has non-zero debt but zero collateral, e.g. after
        // its collateral was seized. Utilization is maximal.
        Udec128::MAX
    } else {
        total_debt_value.checked_div(total_adjusted_collateral_value)?
    };

    Ok(HealthResponse {
        utilization_rate,
        total_debt_value,
        total_collateral_value,
        total_adjusted_collateral_value,
        total_borrowable_value,
        debts,
        collaterals,
    })
}

fn lookup<'a, T>(map: &'a BTreeMap<Denom, T>, denom: &Denom) -> LedgerResult<&'a T> {
    map.get(denom).ok_or_else(|| LedgerError::UnknownMint {
        denom: denom.clone(),
    })
}

// ----------------------------------- tests -----------------------------------
