use {
    sable_math::{MathError, Udec128, Uint128},
    sable_oracle::OracleError,
    sable_types::{Denom, StdError},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("no market found for denom `{denom}`")]
    UnknownMint { denom: Denom },

    #[error("a market already exists for denom `{denom}`")]
    MarketAlreadyExists { denom: Denom },

    #[error("insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity {
        requested: Uint128,
        available: Uint128,
    },

    #[error(
        "insufficient collateral: debt value {debt_value} exceeds adjusted collateral value {adjusted_collateral_value}"
    )]
    InsufficientCollateral {
        debt_value: Udec128,
        adjusted_collateral_value: Udec128,
    },

    #[error("repayment of {requested} exceeds outstanding debt {outstanding}")]
    OverRepayment {
        requested: Uint128,
        outstanding: Uint128,
    },

    #[error("withdrawal of {requested} exceeds withdrawable {withdrawable}")]
    OverWithdrawal {
        requested: Uint128,
        withdrawable: Uint128,
    },
}

pub type LedgerResult<T> = Result<T, LedgerError>;
