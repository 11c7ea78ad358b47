use {
    crate::{MathError, MathResult},
    bnum::types::U256,
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser},
    std::{
        fmt::{self, Display},
        iter::Sum,
        ops::{Add, AddAssign, Sub, SubAssign},
        str::FromStr,
    },
};

/// An unsigned 128-bit integer, the unit in which all native asset amounts
/// are accounted.
///
/// Arithmetic is exposed through checked methods returning [`MathResult`];
/// the `Add`/`Sub` operator impls panic on overflow and are intended for
/// tests and other places where overflow is a logic error.
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
    Hash,
)]
pub struct Uint128(u128);

impl Uint128 {
    pub const MAX: Self = Self(u128::MAX);
    pub const ONE: Self = Self(1);
    pub const TEN: Self = Self(10);
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn inner(&self) -> u128 {
        self.0
    }

    pub const fn into_inner(self) -> u128 {
        self.0
    }

    pub fn checked_add(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow_add(self, rhs))
    }

    pub fn checked_sub(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow_sub(self, rhs))
    }

    pub fn checked_mul(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_mul(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow_mul(self, rhs))
    }

    pub fn checked_div(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_div(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::division_by_zero(self))
    }

    pub fn checked_rem(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_rem(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::division_by_zero(self))
    }

    pub fn checked_pow(self, exp: u32) -> MathResult<Self> {
        self.0
            .checked_pow(exp)
            .map(Self)
            .ok_or_else(|| MathError::overflow_pow(self, exp))
    }

    pub fn checked_add_assign(&mut self, rhs: Self) -> MathResult<()> {
        *self = self.checked_add(rhs)?;
        Ok(())
    }

    pub fn checked_sub_assign(&mut self, rhs: Self) -> MathResult<()> {
        *self = self.checked_sub(rhs)?;
        Ok(())
    }

    /// Compute `self * numerator / denominator`, with the multiplication
    /// carried out in 256 bits so it cannot overflow, rounding the final
    /// division down.
    pub fn checked_multiply_ratio_floor(
        self,
        numerator: Self,
        denominator: Self,
    ) -> MathResult<Self> {
        self.multiply_ratio(numerator, denominator, false)
    }

    /// Same as [`checked_multiply_ratio_floor`](Self::checked_multiply_ratio_floor),
    /// but rounding the final division up.
    pub fn checked_multiply_ratio_ceil(
        self,
        numerator: Self,
        denominator: Self,
    ) -> MathResult<Self> {
        self.multiply_ratio(numerator, denominator, true)
    }

    fn multiply_ratio(self, numerator: Self, denominator: Self, ceil: bool) -> MathResult<Self> {
        if denominator.0 == 0 {
            return Err(MathError::division_by_zero(self));
        }

        // 128-bit * 128-bit always fits in 256 bits.
        let numer = U256::from(self.0) * U256::from(numerator.0);
        let denom = U256::from(denominator.0);

        let mut quot = numer / denom;
        if ceil && numer % denom != U256::ZERO {
            quot += U256::ONE;
        }

        u128::try_from(quot)
            .map(Self)
            .map_err(|_| MathError::overflow_conversion::<_, Self>(quot))
    }
}

impl Add for Uint128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match self.checked_add(rhs) {
            Ok(sum) => sum,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Sub for Uint128 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        match self.checked_sub(rhs) {
            Ok(diff) => diff,
            Err(err) => panic!("{err}"),
        }
    }
}

impl AddAssign for Uint128 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Uint128 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for Uint128 {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for Uint128 {
    fn from(value: u64) -> Self {
        Self(value as u128)
    }
}

impl From<u32> for Uint128 {
    fn from(value: u32) -> Self {
        Self(value as u128)
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> Self {
        value.0
    }
}

impl FromStr for Uint128 {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u128::from_str(s)
            .map(Self)
            .map_err(|err| MathError::parse_number::<Self, _, _>(s, err))
    }
}

impl Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ser::Serialize for Uint128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Uint128 {
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

    #[test]
    fn checked_ops_catch_overflow() {
        assert!(matches!(
            Uint128::MAX.checked_add(Uint128::ONE),
            Err(MathError::OverflowAdd { .. })
        ));
        assert!(matches!(
            Uint128::ZERO.checked_sub(Uint128::ONE),
            Err(MathError::OverflowSub { .. })
        ));
        assert!(matches!(
            Uint128::MAX.checked_mul(Uint128::TEN),
            Err(MathError::OverflowMul { .. })
        ));
        assert!(matches!(
            Uint128::ONE.checked_div(Uint128::ZERO),
            Err(MathError::DivisionByZero { .. })
        ));
    }

    #[test_case(100, 1, 3, 33, 34 ; "rounds thirds")]
    #[test_case(100, 2, 2, 100, 100 ; "exact division")]
    #[test_case(0, 5, 7, 0, 0 ; "zero base")]
    fn multiply_ratio_rounding(base: u128, numer: u128, denom: u128, floor: u128, ceil: u128) {
        let base = Uint128::new(base);
        assert_eq!(
            base.checked_multiply_ratio_floor(Uint128::new(numer), Uint128::new(denom))
                .unwrap(),
            Uint128::new(floor),
        );
        assert_eq!(
            base.checked_multiply_ratio_ceil(Uint128::new(numer), Uint128::new(denom))
                .unwrap(),
            Uint128::new(ceil),
        );
    }

    #[test]
    fn multiply_ratio_uses_wide_intermediate() {
        // `a * b` overflows 128 bits, but the final quotient fits.
        let a = Uint128::new(u128::MAX / 2);
        let product = a
            .checked_multiply_ratio_floor(Uint128::new(6), Uint128::new(3))
            .unwrap();
        assert_eq!(product, Uint128::new(u128::MAX - 1));
    }

    #[test]
    fn serde_round_trips_as_string() {
        let value = Uint128::new(123_456_789);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"123456789\"");
        assert_eq!(serde_json::from_str::<Uint128>(&json).unwrap(), value);
    }

    proptest! {
        #[test]
        fn floor_never_exceeds_ceil(base in 0..u128::MAX, numer in 0..10_000u128, denom in 1..10_000u128) {
            let base = Uint128::new(base);
            let numer = Uint128::new(numer);
            let denom = Uint128::new(denom);

            if let (Ok(floor), Ok(ceil)) = (
                base.checked_multiply_ratio_floor(numer, denom),
                base.checked_multiply_ratio_ceil(numer, denom),
            ) {
                prop_assert!(floor <= ceil);
                prop_assert!(ceil.inner() - floor.inner() <= 1);
            }
        }
    }
}
