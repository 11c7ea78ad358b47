use {
    sable_ledger::{Ledger, LedgerResult},
    sable_math::Udec128,
    sable_oracle::FixedOracle,
    sable_types::{
        Addr, Coin, Denom, Duration, Timestamp,
        lending::{
            Borrowed, Deposited, InterestRateModel, MarketParams, Repaid, Withdrawn,
        },
        oracle::{Precision, Price},
        Bounded,
    },
    std::{str::FromStr, sync::LazyLock},
};

pub use sable_types::ResultExt;

pub static USDC: LazyLock<Denom> = LazyLock::new(|| Denom::from_str("uusdc").unwrap());
pub static SOL: LazyLock<Denom> = LazyLock::new(|| Denom::from_str("usol").unwrap());

/// USDC amounts are whole dollars in tests: precision 0, price 1.
pub const USDC_PRECISION: Precision = 0;
/// SOL is $100 with precision 2, so one test unit of SOL is worth $1.
pub const SOL_PRECISION: Precision = 2;

/// How old a price may be before operations reject it.
pub const MAX_PRICE_AGE: Duration = Duration::from_seconds(60);

pub struct TestAccounts {
    pub alice: Addr,
    pub bob: Addr,
    pub carol: Addr,
}

/// A ledger with a mock clock and a manually fed oracle, plus two
/// pre-registered markets with fresh prices.
pub struct TestSuite {
    pub ledger: Ledger<FixedOracle>,
    pub block_time: Timestamp,
}

pub fn setup_test() -> (TestSuite, TestAccounts) {
    // Ignore the error if a subscriber is already set by another test.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init();

    let mut suite = TestSuite {
        ledger: Ledger::new(FixedOracle::new(), MAX_PRICE_AGE),
        block_time: Timestamp::from_days(1),
    };

    suite
        .ledger
        .create_market(USDC.clone(), default_market_params())
        .should_succeed();
    suite
        .ledger
        .create_market(SOL.clone(), default_market_params())
        .should_succeed();

    suite.feed_price(&USDC, Udec128::new(1), Udec128::ZERO, USDC_PRECISION);
    suite.feed_price(&SOL, Udec128::new(100), Udec128::ZERO, SOL_PRECISION);

    let accounts = TestAccounts {
        alice: Addr::mock(1),
        bob: Addr::mock(2),
        carol: Addr::mock(3),
    };

    (suite, accounts)
}

pub fn default_market_params() -> MarketParams {
    MarketParams {
        interest_rate_model: InterestRateModel::default(),
        max_ltv: Bounded::new_unchecked(Udec128::new_percent(80)),
        liquidation_threshold: Bounded::new_unchecked(Udec128::new_percent(85)),
        liquidation_bonus: Bounded::new_unchecked(Udec128::new_percent(5)),
        liquidation_close_factor: Bounded::new_unchecked(Udec128::new_percent(50)),
    }
}

impl TestSuite {
    pub fn advance_seconds(&mut self, seconds: u128) {
        self.block_time += Duration::from_seconds(seconds);
    }

    pub fn advance_days(&mut self, days: u128) {
        self.block_time += Duration::from_days(days);
    }

    /// Feed a price observed at the current block time.
    pub fn feed_price(
        &mut self,
        denom: &Denom,
        humanized_price: Udec128,
        confidence: Udec128,
        precision: Precision,
    ) {
        let price = Price::new(humanized_price, confidence, self.block_time, precision);
        self.ledger.oracle_mut().feed_price(denom.clone(), price);
    }

    /// Re-feed the default test prices, observed at the current block
    /// time. Call after advancing the clock past the staleness bound.
    pub fn refresh_prices(&mut self) {
        self.feed_price(&USDC, Udec128::new(1), Udec128::ZERO, USDC_PRECISION);
        self.feed_price(&SOL, Udec128::new(100), Udec128::ZERO, SOL_PRECISION);
    }

    pub fn deposit(&mut self, user: Addr, denom: &Denom, amount: u128) -> LedgerResult<Deposited> {
        self.ledger
            .deposit(self.block_time, user, Coin::new(denom.clone(), amount))
    }

    pub fn withdraw(
        &mut self,
        user: Addr,
        denom: &Denom,
        amount: u128,
    ) -> LedgerResult<Withdrawn> {
        self.ledger
            .withdraw(self.block_time, user, Coin::new(denom.clone(), amount))
    }

    pub fn borrow(&mut self, user: Addr, denom: &Denom, amount: u128) -> LedgerResult<Borrowed> {
        self.ledger
            .borrow(self.block_time, user, Coin::new(denom.clone(), amount))
    }

    pub fn repay(&mut self, user: Addr, denom: &Denom, amount: u128) -> LedgerResult<Repaid> {
        self.ledger
            .repay(self.block_time, user, Coin::new(denom.clone(), amount))
    }
}
