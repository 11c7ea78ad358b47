use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    sable_math::Udec128,
    serde::{de, ser},
    std::{
        cmp::Ordering,
        fmt::{self, Debug, Display},
        io,
        marker::PhantomData,
        ops::Deref,
    },
};

/// Describes the valid range for the wrapped value of a [`Bounded`].
pub trait Bounds<T> {
    fn check(value: &T) -> StdResult<()>;
}

/// A value validated against a range at construction and deserialization.
///
/// Risk parameters are fractions with known valid ranges; encoding the
/// range in the type means a `Market` that deserializes without error is
/// already configured sanely.
pub struct Bounded<T, B>(T, PhantomData<B>);

impl<T, B> Bounded<T, B>
where
    B: Bounds<T>,
{
    pub fn new(value: T) -> StdResult<Self> {
        B::check(&value)?;
        Ok(Self(value, PhantomData))
    }
}

impl<T, B> Bounded<T, B> {
    /// Wrap a value without checking the bounds. Only for values already
    /// known valid, e.g. constants.
    pub const fn new_unchecked(value: T) -> Self {
        Self(value, PhantomData)
    }

    pub fn inner(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, B> Deref for Bounded<T, B> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T, B> Debug for Bounded<T, B>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounded({:?})", self.0)
    }
}

impl<T, B> Display for Bounded<T, B>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T, B> Clone for Bounded<T, B>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T, B> Copy for Bounded<T, B> where T: Copy {}

impl<T, B> PartialEq for Bounded<T, B>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T, B> Eq for Bounded<T, B> where T: Eq {}

impl<T, B> PartialOrd for Bounded<T, B>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl<T, B> ser::Serialize for Bounded<T, B>
where
    T: ser::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T, B> de::Deserialize<'de> for Bounded<T, B>
where
    T: de::Deserialize<'de>,
    B: Bounds<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let value = T::deserialize(deserializer)?;
        Self::new(value).map_err(de::Error::custom)
    }
}

impl<T, B> BorshSerialize for Bounded<T, B>
where
    T: BorshSerialize,
{
    fn serialize<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        self.0.serialize(writer)
    }
}

impl<T, B> BorshDeserialize for Bounded<T, B>
where
    T: BorshDeserialize,
    B: Bounds<T>,
{
    fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
    where
        R: io::Read,
    {
        let value = T::deserialize_reader(reader)?;
        Self::new(value).map_err(io::Error::other)
    }
}

// --------------------------------- markers -----------------------------------

/// The range `0 <= value <= 1`.
pub struct ZeroInclusiveOneInclusive;

impl Bounds<Udec128> for ZeroInclusiveOneInclusive {
    fn check(value: &Udec128) -> StdResult<()> {
        if *value > Udec128::ONE {
            return Err(StdError::out_of_range(*value, ">", Udec128::ONE));
        }
        Ok(())
    }
}

/// The range `0 <= value < 1`.
pub struct ZeroInclusiveOneExclusive;

impl Bounds<Udec128> for ZeroInclusiveOneExclusive {
    fn check(value: &Udec128) -> StdResult<()> {
        if *value >= Udec128::ONE {
            return Err(StdError::out_of_range(*value, ">=", Udec128::ONE));
        }
        Ok(())
    }
}

/// The range `0 < value < 1`.
pub struct ZeroExclusiveOneExclusive;

impl Bounds<Udec128> for ZeroExclusiveOneExclusive {
    fn check(value: &Udec128) -> StdResult<()> {
        if *value == Udec128::ZERO {
            return Err(StdError::out_of_range(*value, "==", Udec128::ZERO));
        }
        if *value >= Udec128::ONE {
            return Err(StdError::out_of_range(*value, ">=", Udec128::ONE));
        }
        Ok(())
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case("0", true ; "zero is included")]
    #[test_case("1", true ; "one is included")]
    #[test_case("1.000000000000000001", false ; "above one")]
    fn zero_inclusive_one_inclusive(input: &str, ok: bool) {
        let value = input.parse::<Udec128>().unwrap();
        assert_eq!(
            Bounded::<_, ZeroInclusiveOneInclusive>::new(value).is_ok(),
            ok
        );
    }

    #[test]
    fn deserialization_validates() {
        let result =
            serde_json::from_str::<Bounded<Udec128, ZeroInclusiveOneExclusive>>("\"1\"");
        assert!(result.is_err());

        let result =
            serde_json::from_str::<Bounded<Udec128, ZeroInclusiveOneExclusive>>("\"0.8\"");
        assert_eq!(*result.unwrap(), Udec128::new_percent(80));
    }
}
