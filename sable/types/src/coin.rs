use {
    crate::Denom,
    borsh::{BorshDeserialize, BorshSerialize},
    sable_math::Uint128,
    serde::{Deserialize, Serialize},
    std::fmt::{self, Display},
};

/// An amount of a single asset. This is what ledger operations hand to the
/// token-transfer collaborator: the exact amount that must move, and in
/// which denomination.
#[derive(
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Uint128,
}

impl Coin {
    pub fn new<D, A>(denom: D, amount: A) -> Self
    where
        D: Into<Denom>,
        A: Into<Uint128>,
    {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.denom, self.amount)
    }
}
