use {
    crate::{MathError, MathResult, Uint128},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser},
    std::{
        fmt::{self, Display},
        ops::{Add, Sub},
        str::FromStr,
    },
};

/// An unsigned fixed-point decimal with 18 decimal places, backed by a
/// 128-bit integer.
///
/// Used for everything that is a fraction or a rate rather than an asset
/// amount: loan-to-value ratios, interest rates, prices, utilization.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
pub struct Udec128(Uint128);

impl Udec128 {
    /// Number of decimal places.
    pub const DECIMAL_PLACES: u32 = 18;
    pub const MAX: Self = Self(Uint128::MAX);
    pub const ONE: Self = Self(Self::PRECISION);
    /// Ratio between the inner integer value and the decimal value it
    /// represents: `10 ^ DECIMAL_PLACES`.
    pub const PRECISION: Uint128 = Uint128::new(10_u128.pow(Self::DECIMAL_PLACES));
    pub const ZERO: Self = Self(Uint128::ZERO);

    /// Create a new [`Udec128`] from an integer, _adding_ decimal places.
    pub const fn new(whole: u128) -> Self {
        Self(Uint128::new(whole * 10_u128.pow(Self::DECIMAL_PLACES)))
    }

    /// Create a new [`Udec128`] representing the given number of percent.
    pub const fn new_percent(percent: u128) -> Self {
        Self(Uint128::new(percent * 10_u128.pow(Self::DECIMAL_PLACES - 2)))
    }

    /// Create a new [`Udec128`] representing the given number of basis
    /// points (1/100th of a percent).
    pub const fn new_bps(bps: u128) -> Self {
        Self(Uint128::new(bps * 10_u128.pow(Self::DECIMAL_PLACES - 4)))
    }

    /// Create a new [`Udec128`] _without_ adding decimal places.
    pub const fn raw(value: Uint128) -> Self {
        Self(value)
    }

    pub const fn numerator(&self) -> Uint128 {
        self.0
    }

    pub fn checked_from_ratio<N, D>(numerator: N, denominator: D) -> MathResult<Self>
    where
        N: Into<Uint128>,
        D: Into<Uint128>,
    {
        numerator
            .into()
            .checked_multiply_ratio_floor(Self::PRECISION, denominator.into())
            .map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> MathResult<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> MathResult<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn checked_mul(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_multiply_ratio_floor(rhs.0, Self::PRECISION)
            .map(Self)
    }

    pub fn checked_div(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_multiply_ratio_floor(Self::PRECISION, rhs.0)
            .map(Self)
    }

    pub fn checked_add_assign(&mut self, rhs: Self) -> MathResult<()> {
        *self = self.checked_add(rhs)?;
        Ok(())
    }

    /// The amount saturated at zero if `rhs` is greater than `self`.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(Uint128::new(self.0.inner().saturating_sub(rhs.0.inner())))
    }
}

impl Add for Udec128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match self.checked_add(rhs) {
            Ok(sum) => sum,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Sub for Udec128 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        match self.checked_sub(rhs) {
            Ok(diff) => diff,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Display for Udec128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0.inner() / Self::PRECISION.inner();
        let fractional = self.0.inner() % Self::PRECISION.inner();

        if fractional == 0 {
            write!(f, "{whole}")
        } else {
            let fractional = format!("{fractional:0width$}", width = Self::DECIMAL_PLACES as usize);
            write!(f, "{whole}.{}", fractional.trim_end_matches('0'))
        }
    }
}

impl FromStr for Udec128 {
    type Err = MathError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.splitn(3, '.');

        let whole = parts
            .next()
            .unwrap_or_default()
            .parse::<u128>()
            .map_err(|_| MathError::parse_number::<Self, _, _>(input, "error parsing whole"))?;

        let whole = whole
            .checked_mul(Self::PRECISION.inner())
            .ok_or_else(|| MathError::parse_number::<Self, _, _>(input, "value too big"))?;

        let value = match parts.next() {
            None | Some("") => whole,
            Some(fractional) => {
                if fractional.len() > Self::DECIMAL_PLACES as usize {
                    return Err(MathError::parse_number::<Self, _, _>(
                        input,
                        "too many fractional digits",
                    ));
                }

                let exp = Self::DECIMAL_PLACES - fractional.len() as u32;
                let fractional = fractional.parse::<u128>().map_err(|_| {
                    MathError::parse_number::<Self, _, _>(input, "error parsing fractional")
                })?;

                whole
                    .checked_add(fractional * 10_u128.pow(exp))
                    .ok_or_else(|| MathError::parse_number::<Self, _, _>(input, "value too big"))?
            },
        };

        if parts.next().is_some() {
            return Err(MathError::parse_number::<Self, _, _>(
                input,
                "more than one decimal point",
            ));
        }

        Ok(Self(Uint128::new(value)))
    }
}

impl ser::Serialize for Udec128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Udec128 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = <String as de::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, proptest::prelude::*, test_case::test_case};

    #[test_case("0", Udec128::ZERO ; "zero")]
    #[test_case("1", Udec128::ONE ; "one")]
    #[test_case("1.5", Udec128::new_percent(150) ; "one and a half")]
    #[test_case("0.0001", Udec128::new_bps(1) ; "one basis point")]
    #[test_case("123.456", Udec128::raw(Uint128::new(123_456_000_000_000_000_000)) ; "mixed")]
    fn parsing_works(input: &str, expect: Udec128) {
        assert_eq!(input.parse::<Udec128>().unwrap(), expect);
    }

    #[test_case("1.2.3" ; "two decimal points")]
    #[test_case("1.1234567890123456789" ; "too many fractional digits")]
    #[test_case("abc" ; "not a number")]
    fn parsing_rejects_garbage(input: &str) {
        assert!(input.parse::<Udec128>().is_err());
    }

    #[test]
    fn mul_rounds_down() {
        // 1/3 * 3 = 0.999999999999999999, not 1.
        let third = Udec128::checked_from_ratio(1u128, 3u128).unwrap();
        let product = third.checked_mul(Udec128::new(3)).unwrap();
        assert!(product < Udec128::ONE);
        assert_eq!(
            Udec128::ONE.checked_sub(product).unwrap(),
            Udec128::raw(Uint128::ONE),
        );
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Udec128::new_percent(150).to_string(), "1.5");
        assert_eq!(Udec128::new(42).to_string(), "42");
        assert_eq!(Udec128::raw(Uint128::ONE).to_string(), "0.000000000000000001");
    }

    proptest! {
        #[test]
        fn string_round_trip(raw in 0..u128::MAX) {
            let value = Udec128::raw(Uint128::new(raw));
            prop_assert_eq!(value.to_string().parse::<Udec128>().unwrap(), value);
        }
    }
}
