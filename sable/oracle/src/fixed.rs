use {
    crate::{OracleError, OracleResult, PriceOracle},
    sable_types::{Denom, Duration, Timestamp, oracle::Price},
    std::collections::BTreeMap,
};

/// A price oracle backed by manually fed observations.
///
/// Each feed replaces the previous observation for the denom wholesale;
/// there is no aggregation. Staleness is judged against the stored
/// observation's timestamp at query time, so a price that was fresh when
/// fed can still be rejected later.
#[derive(Default, Debug, Clone)]
pub struct FixedOracle {
    prices: BTreeMap<Denom, Price>,
}

impl FixedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a price observation for a denom, replacing any previous one.
    pub fn feed_price(&mut self, denom: Denom, price: Price) {
        self.prices.insert(denom, price);
    }

    /// Drop the stored observation for a denom, if any.
    pub fn remove_price(&mut self, denom: &Denom) {
        self.prices.remove(denom);
    }
}

impl PriceOracle for FixedOracle {
    fn query_price(
        &self,
        denom: &Denom,
        now: Timestamp,
        max_age: Duration,
    ) -> OracleResult<Price> {
        let price = self
            .prices
            .get(denom)
            .ok_or_else(|| OracleError::PriceUnavailable {
                denom: denom.clone(),
            })?;

        let age = price.age(now);
        if age > max_age {
            return Err(OracleError::StalePrice {
                denom: denom.clone(),
                age_seconds: age.into_seconds(),
                max_age_seconds: max_age.into_seconds(),
            });
        }

        Ok(*price)
    }
}

// ----------------------------------- tests -----------------------------------
