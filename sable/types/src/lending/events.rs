use {
    crate::{Addr, Coin},
    sable_math::Uint128,
    serde::{Deserialize, Serialize},
};

/// A user has deposited coins into a market.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Deposited {
    pub user: Addr,
    /// The exact amount the token-transfer collaborator must pull from the
    /// user into the pool's vault.
    pub deposited: Coin,
    pub shares_minted: Uint128,
}

/// A user has withdrawn coins from a market.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Withdrawn {
    pub user: Addr,
    /// The exact amount the token-transfer collaborator must pay out of
    /// the pool's vault to the user.
    pub withdrawn: Coin,
    pub shares_burned: Uint128,
}

/// A user has borrowed coins from a market.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Borrowed {
    pub user: Addr,
    /// The exact amount the token-transfer collaborator must pay out of
    /// the pool's vault to the user.
    pub borrowed: Coin,
    pub shares_minted: Uint128,
}

/// A user has repaid coins to a market.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Repaid {
    pub user: Addr,
    /// The exact amount the token-transfer collaborator must pull from the
    /// user into the pool's vault.
    pub repaid: Coin,
    pub shares_burned: Uint128,
    /// The user's debt shares in this market after the repayment.
    pub remaining_shares: Uint128,
}
