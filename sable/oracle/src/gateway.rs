use {
    crate::OracleResult,
    sable_types::{Denom, Duration, Timestamp, oracle::Price},
};

/// A gateway to an external price feed.
///
/// The ledger calls this once per valuation step and holds the returned
/// snapshot only for the duration of the operation; prices are never
/// cached across operations. A lookup that cannot produce a fresh enough
/// price fails the whole calling operation.
pub trait PriceOracle {
    /// Query the price for a given denom.
    ///
    /// Fails with `PriceUnavailable` if no price is known for the denom,
    /// or `StalePrice` if the newest observation is older than `max_age`
    /// as of `now`.
    fn query_price(&self, denom: &Denom, now: Timestamp, max_age: Duration)
    -> OracleResult<Price>;
}
