use sable_math::MathError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StdError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error("invalid address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid denom `{denom}`: {reason}")]
    InvalidDenom { denom: String, reason: &'static str },

    #[error("value out of range: {value} {comparator} {bound}")]
    OutOfRange {
        value: String,
        comparator: &'static str,
        bound: String,
    },
}

impl StdError {
    pub fn invalid_address<A, R>(address: A, reason: R) -> Self
    where
        A: ToString,
        R: ToString,
    {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_denom<D>(denom: D, reason: &'static str) -> Self
    where
        D: ToString,
    {
        Self::InvalidDenom {
            denom: denom.to_string(),
            reason,
        }
    }

    pub fn out_of_range<T>(value: T, comparator: &'static str, bound: T) -> Self
    where
        T: ToString,
    {
        Self::OutOfRange {
            value: value.to_string(),
            comparator,
            bound: bound.to_string(),
        }
    }
}

pub type StdResult<T> = Result<T, StdError>;
