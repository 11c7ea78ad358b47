use sable_types::Denom;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error(
        "stale price for `{denom}`: observed {age_seconds}s ago, maximum allowed {max_age_seconds}s"
    )]
    StalePrice {
        denom: Denom,
        age_seconds: u128,
        max_age_seconds: u128,
    },

    #[error("no price available for `{denom}`")]
    PriceUnavailable { denom: Denom },
}

pub type OracleResult<T> = Result<T, OracleError>;
