use {
    crate::{Duration, Timestamp},
    borsh::{BorshDeserialize, BorshSerialize},
    sable_math::{MathResult, Udec128, Uint128},
    serde::{Deserialize, Serialize},
};

pub type Precision = u8;

/// A price observation for one asset, with a confidence interval.
///
/// The ledger never trusts the point estimate alone: admission checks use
/// the bound that is least favorable to the position being admitted.
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
pub struct Price {
    /// The price of the token in its humanized form, i.e. the price of
    /// 1 ATOM, rather than 1 uatom.
    pub humanized_price: Udec128,
    /// One-sided width of the confidence interval, in the same unit as
    /// `humanized_price`.
    pub confidence: Udec128,
    /// When the price was observed.
    pub timestamp: Timestamp,
    /// The number of decimal places of the token that is used to convert
    /// the price from its smallest unit to a humanized form. E.g. 1 ATOM
    /// is 10^6 uatom, so the precision is 6.
    precision: Precision,
}

impl Price {
    pub fn new(
        humanized_price: Udec128,
        confidence: Udec128,
        timestamp: Timestamp,
        precision: Precision,
    ) -> Self {
        Self {
            humanized_price,
            confidence,
            timestamp,
            precision,
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// How long ago the price was observed, as of `now`. A price observed
    /// in the future (clock skew between feed and environment) has age
    /// zero.
    pub fn age(&self, now: Timestamp) -> Duration {
        now.saturating_sub(self.timestamp)
    }

    /// The lowest plausible price given the confidence interval.
    pub fn lower_bound(&self) -> Udec128 {
        self.humanized_price.saturating_sub(self.confidence)
    }

    /// The highest plausible price given the confidence interval.
    pub fn upper_bound(&self) -> MathResult<Udec128> {
        self.humanized_price.checked_add(self.confidence)
    }

    /// Returns the value of a given unit amount at the point-estimate
    /// price, rounded down. E.g. if this price is the USD price of one
    /// ATOM, this returns the USD value of the given number of uatom.
    pub fn value_of_unit_amount(&self, unit_amount: Uint128) -> MathResult<Udec128> {
        Self::value_at(self.humanized_price, unit_amount, self.precision, false)
    }

    /// The value of a given unit amount of collateral, at the lowest
    /// plausible price, rounded down.
    pub fn collateral_value_of_unit_amount(&self, unit_amount: Uint128) -> MathResult<Udec128> {
        Self::value_at(self.lower_bound(), unit_amount, self.precision, false)
    }

    /// The value of a given unit amount of debt, at the highest plausible
    /// price, rounded up.
    pub fn debt_value_of_unit_amount(&self, unit_amount: Uint128) -> MathResult<Udec128> {
        Self::value_at(self.upper_bound()?, unit_amount, self.precision, true)
    }

    fn value_at(
        price: Udec128,
        unit_amount: Uint128,
        precision: Precision,
        ceil: bool,
    ) -> MathResult<Udec128> {
        let unit = Uint128::TEN.checked_pow(precision as u32)?;

        let numerator = if ceil {
            unit_amount.checked_multiply_ratio_ceil(price.numerator(), unit)?
        } else {
            unit_amount.checked_multiply_ratio_floor(price.numerator(), unit)?
        };

        Ok(Udec128::raw(numerator))
    }
}

// ----------------------------------- tests -----------------------------------
