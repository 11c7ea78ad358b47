use crate::{IsZero, MathError, MathResult, Udec128, Uint128};

/// Multiplication and division of an integer amount by a decimal fraction,
/// with the rounding direction stated explicitly at every call site.
///
/// Which direction is correct depends on who the result is owed to; see
/// the conversion module in `sable-ledger` for the policy.
pub trait MultiplyFraction: Sized {
    fn checked_mul_dec_floor(self, rhs: Udec128) -> MathResult<Self>;

    fn checked_mul_dec_ceil(self, rhs: Udec128) -> MathResult<Self>;

    fn checked_div_dec_floor(self, rhs: Udec128) -> MathResult<Self>;

    fn checked_div_dec_ceil(self, rhs: Udec128) -> MathResult<Self>;
}

impl MultiplyFraction for Uint128 {
    fn checked_mul_dec_floor(self, rhs: Udec128) -> MathResult<Self> {
        self.checked_multiply_ratio_floor(rhs.numerator(), Udec128::PRECISION)
    }

    fn checked_mul_dec_ceil(self, rhs: Udec128) -> MathResult<Self> {
        self.checked_multiply_ratio_ceil(rhs.numerator(), Udec128::PRECISION)
    }

    fn checked_div_dec_floor(self, rhs: Udec128) -> MathResult<Self> {
        if rhs.is_zero() {
            return Err(MathError::division_by_zero(self));
        }
        self.checked_multiply_ratio_floor(Udec128::PRECISION, rhs.numerator())
    }

    fn checked_div_dec_ceil(self, rhs: Udec128) -> MathResult<Self> {
        if rhs.is_zero() {
            return Err(MathError::division_by_zero(self));
        }
        self.checked_multiply_ratio_ceil(Udec128::PRECISION, rhs.numerator())
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, proptest::prelude::*, test_case::test_case};

    #[test_case(100, "0.333333333333333333", 33, 34 ; "a third")]
    #[test_case(100, "0.5", 50, 50 ; "exact half")]
    #[test_case(1, "0.000000000000000001", 0, 1 ; "one tick")]
    fn mul_dec_rounding(amount: u128, dec: &str, floor: u128, ceil: u128) {
        let amount = Uint128::new(amount);
        let dec = dec.parse::<Udec128>().unwrap();
        assert_eq!(amount.checked_mul_dec_floor(dec).unwrap(), Uint128::new(floor));
        assert_eq!(amount.checked_mul_dec_ceil(dec).unwrap(), Uint128::new(ceil));
    }

    #[test]
    fn div_by_zero_dec_is_rejected() {
        assert!(matches!(
            Uint128::ONE.checked_div_dec_floor(Udec128::ZERO),
            Err(MathError::DivisionByZero { .. })
        ));
        assert!(matches!(
            Uint128::ONE.checked_div_dec_ceil(Udec128::ZERO),
            Err(MathError::DivisionByZero { .. })
        ));
    }

    proptest! {
        #[test]
        fn mul_then_div_never_gains(amount in 1..u64::MAX as u128, rate in 1..1_000_000u128) {
            // Multiplying down (floor) then dividing back up (floor) must never
            // return more than the original amount.
            let amount = Uint128::new(amount);
            let rate = Udec128::checked_from_ratio(rate, 1_000_000u128).unwrap();

            let down = amount.checked_mul_dec_floor(rate).unwrap();
            let back = down.checked_div_dec_floor(rate).unwrap();
            prop_assert!(back <= amount);
        }
    }
}
