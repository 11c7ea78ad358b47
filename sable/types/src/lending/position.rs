use {
    crate::Denom,
    borsh::{BorshDeserialize, BorshSerialize},
    sable_math::{IsZero, MathResult, Uint128},
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// One participant's balances across all markets they have touched,
/// recorded in shares. Native amounts are always derived through the
/// owning market's current exchange rate, never stored here.
///
/// The owner is the key the ledger stores the position under, not a field.
#[derive(
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
    Default,
    Debug,
    Clone,
    PartialEq,
    Eq,
)]
pub struct Position {
    pub collateral_shares: BTreeMap<Denom, Uint128>,
    pub borrowed_shares: BTreeMap<Denom, Uint128>,
}

impl Position {
    pub fn collateral_shares_of(&self, denom: &Denom) -> Uint128 {
        self.collateral_shares
            .get(denom)
            .copied()
            .unwrap_or_default()
    }

    pub fn borrowed_shares_of(&self, denom: &Denom) -> Uint128 {
        self.borrowed_shares.get(denom).copied().unwrap_or_default()
    }

    pub fn add_collateral_shares(&mut self, denom: Denom, shares: Uint128) -> MathResult<()> {
        add(&mut self.collateral_shares, denom, shares)
    }

    pub fn sub_collateral_shares(&mut self, denom: &Denom, shares: Uint128) -> MathResult<()> {
        sub(&mut self.collateral_shares, denom, shares)
    }

    pub fn add_borrowed_shares(&mut self, denom: Denom, shares: Uint128) -> MathResult<()> {
        add(&mut self.borrowed_shares, denom, shares)
    }

    pub fn sub_borrowed_shares(&mut self, denom: &Denom, shares: Uint128) -> MathResult<()> {
        sub(&mut self.borrowed_shares, denom, shares)
    }

    pub fn has_debt(&self) -> bool {
        !self.borrowed_shares.is_empty()
    }

    /// True if the position holds nothing on either side, meaning it can
    /// be pruned from the ledger.
    pub fn is_empty(&self) -> bool {
        self.collateral_shares.is_empty() && self.borrowed_shares.is_empty()
    }
}

fn add(map: &mut BTreeMap<Denom, Uint128>, denom: Denom, shares: Uint128) -> MathResult<()> {
    if shares.is_zero() {
        return Ok(());
    }

    let entry = map.entry(denom).or_default();
    entry.checked_add_assign(shares)
}

fn sub(map: &mut BTreeMap<Denom, Uint128>, denom: &Denom, shares: Uint128) -> MathResult<()> {
    let balance = map.get(denom).copied().unwrap_or_default();
    let remaining = balance.checked_sub(shares)?;

    if remaining.is_zero() {
        map.remove(denom);
    } else {
        map.insert(denom.clone(), remaining);
    }

    Ok(())
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn usdc() -> Denom {
        "uusdc".parse().unwrap()
    }

    #[test]
    fn zero_entries_are_pruned() {
        let mut position = Position::default();
        position
            .add_collateral_shares(usdc(), Uint128::new(100))
            .unwrap();
        position
            .sub_collateral_shares(&usdc(), Uint128::new(100))
            .unwrap();
        assert!(position.is_empty());
    }

    #[test]
    fn cannot_subtract_below_zero() {
        let mut position = Position::default();
        position
            .add_borrowed_shares(usdc(), Uint128::new(5))
            .unwrap();
        assert!(position
            .sub_borrowed_shares(&usdc(), Uint128::new(6))
            .is_err());
    }

    #[test]
    fn adding_zero_does_not_create_an_entry() {
        let mut position = Position::default();
        position.add_collateral_shares(usdc(), Uint128::ZERO).unwrap();
        assert!(position.is_empty());
    }
}
