use {
    crate::{
        HealthResponse, LedgerError, LedgerResult, accrue_interest, amount_of_borrow_shares,
        amount_of_deposit_shares, compute_health, shares_to_burn_for_repay,
        shares_to_burn_for_withdrawal, shares_to_mint_for_borrow, shares_to_mint_for_deposit,
    },
    sable_math::{IsZero, Uint128},
    sable_oracle::PriceOracle,
    sable_types::{
        Addr, Coin, Denom, Duration, Timestamp,
        lending::{Borrowed, Deposited, Market, MarketParams, Position, Repaid, Withdrawn},
    },
    std::{
        collections::{BTreeMap, BTreeSet},
        ops::Bound,
    },
};

const DEFAULT_PAGE_LIMIT: u32 = 30;

/// The lending ledger: every market, every position, and the operations
/// that move value between them.
///
/// The ledger assumes the execution environment serializes operations:
/// each call runs to completion before the next touches the same records,
/// and the caller identity is already authenticated. Every operation
/// stages its changes on copies and commits only after all checks pass,
/// so an error means the ledger is exactly as it was.
///
/// The ledger never moves tokens. Each mutating operation returns an
/// event whose `Coin` is the exact amount the token-transfer collaborator
/// must move, atomically with the ledger mutation.
pub struct Ledger<O> {
    markets: BTreeMap<Denom, Market>,
    positions: BTreeMap<Addr, Position>,
    oracle: O,
    max_price_age: Duration,
}

impl<O> Ledger<O>
where
    O: PriceOracle,
{
    pub fn new(oracle: O, max_price_age: Duration) -> Self {
        Self {
            markets: BTreeMap::new(),
            positions: BTreeMap::new(),
            oracle,
            max_price_age,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    // -------------------------------- setup ---------------------------------

    /// Register a market for a denom. One-time initialization; parameter
    /// updates after creation are not supported.
    pub fn create_market(&mut self, denom: Denom, params: MarketParams) -> LedgerResult<Market> {
        if self.markets.contains_key(&denom) {
            return Err(LedgerError::MarketAlreadyExists { denom });
        }

        let market = Market::new(params)?;
        self.markets.insert(denom.clone(), market);

        tracing::info!(denom = %denom, "Market created");

        Ok(market)
    }

    // ------------------------------- queries ---------------------------------

    pub fn market(&self, denom: &Denom) -> LedgerResult<Market> {
        self.markets
            .get(denom)
            .copied()
            .ok_or_else(|| LedgerError::UnknownMint {
                denom: denom.clone(),
            })
    }

    pub fn markets(
        &self,
        start_after: Option<&Denom>,
        limit: Option<u32>,
    ) -> BTreeMap<Denom, Market> {
        let start = match start_after {
            Some(denom) => Bound::Excluded(denom.clone()),
            None => Bound::Unbounded,
        };
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        self.markets
            .range((start, Bound::Unbounded))
            .take(limit as usize)
            .map(|(denom, market)| (denom.clone(), *market))
            .collect()
    }

    /// The position of a user. A user that never interacted (or whose
    /// position emptied out) has the default, empty position.
    pub fn position(&self, user: &Addr) -> Position {
        self.positions.get(user).cloned().unwrap_or_default()
    }

    pub fn positions(
        &self,
        start_after: Option<Addr>,
        limit: Option<u32>,
    ) -> BTreeMap<Addr, Position> {
        let start = match start_after {
            Some(addr) => Bound::Excluded(addr),
            None => Bound::Unbounded,
        };
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        self.positions
            .range((start, Bound::Unbounded))
            .take(limit as usize)
            .map(|(addr, position)| (*addr, position.clone()))
            .collect()
    }

    /// The health of a user's position, on freshly accrued market copies
    /// and freshly fetched prices. Read-only; the accrual is not
    /// committed.
    pub fn health(&self, current_time: Timestamp, user: &Addr) -> LedgerResult<HealthResponse> {
        let position = self.position(user);
        self.position_health(current_time, &position, None)
    }

    /// Whether a user's position is below the liquidation boundary. Used
    /// by the external liquidation workflow; evaluating it mutates
    /// nothing.
    pub fn is_liquidatable(&self, current_time: Timestamp, user: &Addr) -> LedgerResult<bool> {
        let Some(position) = self.positions.get(user) else {
            return Ok(false);
        };

        // A position without debt can never be liquidated, so don't
        // bother with the oracle.
        if !position.has_debt() {
            return Ok(false);
        }

        let health = self.position_health(current_time, position, None)?;

        Ok(health.is_liquidatable())
    }

    // ------------------------------ operations -------------------------------

    /// Deposit coins into a market, crediting the user with deposit
    /// shares at the current exchange rate.
    ///
    /// Deposits only ever make a position safer, so there is no risk
    /// check and no oracle involvement.
    pub fn deposit(
        &mut self,
        current_time: Timestamp,
        user: Addr,
        coin: Coin,
    ) -> LedgerResult<Deposited> {
        ensure_non_zero(&coin)?;

        let mut market = accrue_interest(self.market(&coin.denom)?, current_time)?;

        let shares_minted = shares_to_mint_for_deposit(coin.amount, &market)?;
        market.total_deposited.checked_add_assign(coin.amount)?;
        market.total_deposit_shares.checked_add_assign(shares_minted)?;

        let mut position = self.position(&user);
        position.add_collateral_shares(coin.denom.clone(), shares_minted)?;

        self.commit(coin.denom.clone(), market, user, position);

        tracing::debug!(user = %user, coin = %coin, shares = %shares_minted, "Deposited");

        Ok(Deposited {
            user,
            deposited: coin,
            shares_minted,
        })
    }

    /// Withdraw coins from a market by burning deposit shares at the
    /// current exchange rate.
    ///
    /// If the position has outstanding debt, the withdrawal must leave it
    /// at or above the liquidation boundary, judged at conservative
    /// prices; a debt-free withdrawal cannot breach solvency and is not
    /// gated on the oracle.
    pub fn withdraw(
        &mut self,
        current_time: Timestamp,
        user: Addr,
        coin: Coin,
    ) -> LedgerResult<Withdrawn> {
        ensure_non_zero(&coin)?;

        let mut market = accrue_interest(self.market(&coin.denom)?, current_time)?;
        let mut position = self.position(&user);

        let redeemable =
            amount_of_deposit_shares(position.collateral_shares_of(&coin.denom), &market)?;
        if coin.amount > redeemable {
            return Err(LedgerError::OverWithdrawal {
                requested: coin.amount,
                withdrawable: redeemable,
            });
        }

        // Liquidity currently lent out cannot be withdrawn.
        let available = market.available_liquidity()?;
        if coin.amount > available {
            return Err(LedgerError::InsufficientLiquidity {
                requested: coin.amount,
                available,
            });
        }

        let shares_burned = shares_to_burn_for_withdrawal(coin.amount, &market)?;

        // A withdrawal may only empty the share supply by also emptying
        // the native total, otherwise value would be stranded with no
        // shares against it. In that window the user must either take
        // their full redemption or leave at least one share's worth.
        if shares_burned == market.total_deposit_shares && coin.amount < market.total_deposited {
            let one_share = Uint128::ONE
                .checked_multiply_ratio_ceil(market.total_deposited, market.total_deposit_shares)?;
            return Err(LedgerError::OverWithdrawal {
                requested: coin.amount,
                withdrawable: market.total_deposited.checked_sub(one_share)?,
            });
        }

        market.total_deposited.checked_sub_assign(coin.amount)?;
        market.total_deposit_shares.checked_sub_assign(shares_burned)?;
        position.sub_collateral_shares(&coin.denom, shares_burned)?;

        if position.has_debt() {
            let health =
                self.position_health(current_time, &position, Some((&coin.denom, &market)))?;
            if health.total_debt_value > health.total_adjusted_collateral_value {
                return Err(LedgerError::InsufficientCollateral {
                    debt_value: health.total_debt_value,
                    adjusted_collateral_value: health.total_adjusted_collateral_value,
                });
            }
        }

        self.commit(coin.denom.clone(), market, user, position);

        tracing::debug!(user = %user, coin = %coin, shares = %shares_burned, "Withdrawn");

        Ok(Withdrawn {
            user,
            withdrawn: coin,
            shares_burned,
        })
    }

    /// Borrow coins from a market against the position's collateral.
    ///
    /// The borrow is staged first, then the position's total debt value —
    /// at conservative prices, including the new borrow — must not exceed
    /// the max-LTV-weighted collateral value. Nothing is committed on
    /// rejection.
    pub fn borrow(
        &mut self,
        current_time: Timestamp,
        user: Addr,
        coin: Coin,
    ) -> LedgerResult<Borrowed> {
        ensure_non_zero(&coin)?;

        let mut market = accrue_interest(self.market(&coin.denom)?, current_time)?;

        // A pool cannot lend out more than it holds.
        let available = market.available_liquidity()?;
        if coin.amount > available {
            return Err(LedgerError::InsufficientLiquidity {
                requested: coin.amount,
                available,
            });
        }

        let shares_minted = shares_to_mint_for_borrow(coin.amount, &market)?;
        market.total_borrowed.checked_add_assign(coin.amount)?;
        market.total_borrow_shares.checked_add_assign(shares_minted)?;

        let mut position = self.position(&user);
        position.add_borrowed_shares(coin.denom.clone(), shares_minted)?;

        // The max-LTV bound is at most the liquidation-threshold bound on
        // every market, so passing this check also clears the liquidation
        // boundary.
        let health = self.position_health(current_time, &position, Some((&coin.denom, &market)))?;
        if health.total_debt_value > health.total_borrowable_value {
            return Err(LedgerError::InsufficientCollateral {
                debt_value: health.total_debt_value,
                adjusted_collateral_value: health.total_borrowable_value,
            });
        }

        self.commit(coin.denom.clone(), market, user, position);

        tracing::debug!(user = %user, coin = %coin, shares = %shares_minted, "Borrowed");

        Ok(Borrowed {
            user,
            borrowed: coin,
            shares_minted,
        })
    }

    /// Repay coins to a market, burning the user's debt shares at the
    /// current exchange rate.
    ///
    /// The amount must not exceed the outstanding debt: callers compute
    /// the exact debt first, the ledger never clamps. Repayments only
    /// ever make a position safer, so no oracle is involved.
    pub fn repay(
        &mut self,
        current_time: Timestamp,
        user: Addr,
        coin: Coin,
    ) -> LedgerResult<Repaid> {
        ensure_non_zero(&coin)?;

        let mut market = accrue_interest(self.market(&coin.denom)?, current_time)?;
        let mut position = self.position(&user);

        let shares_held = position.borrowed_shares_of(&coin.denom);
        let outstanding = amount_of_borrow_shares(shares_held, &market)?;
        if coin.amount > outstanding {
            return Err(LedgerError::OverRepayment {
                requested: coin.amount,
                outstanding,
            });
        }

        // Repaying the exact outstanding amount clears the whole share
        // balance, so debt cannot linger as unburnable dust.
        let shares_burned = if coin.amount == outstanding {
            shares_held
        } else {
            shares_to_burn_for_repay(coin.amount, &market)?
        };

        market.total_borrowed.checked_sub_assign(coin.amount)?;
        market.total_borrow_shares.checked_sub_assign(shares_burned)?;
        position.sub_borrowed_shares(&coin.denom, shares_burned)?;

        let remaining_shares = position.borrowed_shares_of(&coin.denom);

        self.commit(coin.denom.clone(), market, user, position);

        tracing::debug!(user = %user, coin = %coin, shares = %shares_burned, "Repaid");

        Ok(Repaid {
            user,
            repaid: coin,
            shares_burned,
            remaining_shares,
        })
    }

    // ------------------------------ internals --------------------------------

    /// Compute the health of a position against freshly accrued market
    /// copies and fresh prices. `staged` substitutes a not-yet-committed
    /// market state for its denom.
    fn position_health(
        &self,
        current_time: Timestamp,
        position: &Position,
        staged: Option<(&Denom, &Market)>,
    ) -> LedgerResult<HealthResponse> {
        let denoms: BTreeSet<&Denom> = position
            .collateral_shares
            .keys()
            .chain(position.borrowed_shares.keys())
            .collect();

        let mut markets = BTreeMap::new();
        let mut prices = BTreeMap::new();

        for denom in denoms {
            let market = match staged {
                Some((staged_denom, staged_market)) if staged_denom == denom => *staged_market,
                _ => accrue_interest(self.market(denom)?, current_time)?,
            };

            let price = self
                .oracle
                .query_price(denom, current_time, self.max_price_age)?;

            markets.insert(denom.clone(), market);
            prices.insert(denom.clone(), price);
        }

        compute_health(position, &markets, &prices)
    }

    fn commit(&mut self, denom: Denom, market: Market, user: Addr, position: Position) {
        self.markets.insert(denom, market);

        if position.is_empty() {
            self.positions.remove(&user);
        } else {
            self.positions.insert(user, position);
        }
    }
}

fn ensure_non_zero(coin: &Coin) -> LedgerResult<()> {
    if coin.amount.is_zero() {
        return Err(LedgerError::ZeroAmount);
    }
    Ok(())
}

// ----------------------------------- tests -----------------------------------
