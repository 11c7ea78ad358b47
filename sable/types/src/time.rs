use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    std::ops::{Add, AddAssign, Sub},
};

/// The number of nanoseconds in a millisecond.
const NANOS_PER_MILLI: u128 = 1_000_000;
/// The number of milliseconds in a second.
const MILLIS_PER_SECOND: u128 = 1_000;
/// The number of seconds in a minute.
const SECONDS_PER_MINUTE: u128 = 60;
/// The number of minutes in an hour.
const MINUTES_PER_HOUR: u128 = 60;
/// The number of hours in a day.
const HOURS_PER_DAY: u128 = 24;

/// UNIX epoch timestamp, in nanosecond precision.
///
/// A timestamp is simply a duration between a point of time and the UNIX
/// epoch, so timestamp is an alias to [`Duration`].
pub type Timestamp = Duration;

/// A span of time, in nanosecond precision.
///
/// We don't use [`std::time::Duration`] because it doesn't implement the
/// Borsh traits, and serializes to JSON as a struct.
#[derive(
    Serialize,
    Deserialize,
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
pub struct Duration(u128);

impl Duration {
    pub const ZERO: Self = Self(0);

    pub const fn from_nanos(nanos: u128) -> Self {
        Self(nanos)
    }

    pub const fn from_millis(millis: u128) -> Self {
        Self::from_nanos(millis * NANOS_PER_MILLI)
    }

    pub const fn from_seconds(seconds: u128) -> Self {
        Self::from_millis(seconds * MILLIS_PER_SECOND)
    }

    pub const fn from_minutes(minutes: u128) -> Self {
        Self::from_seconds(minutes * SECONDS_PER_MINUTE)
    }

    pub const fn from_hours(hours: u128) -> Self {
        Self::from_minutes(hours * MINUTES_PER_HOUR)
    }

    pub const fn from_days(days: u128) -> Self {
        Self::from_hours(days * HOURS_PER_DAY)
    }

    pub const fn into_nanos(self) -> u128 {
        self.0
    }

    /// Truncates sub-second precision.
    pub const fn into_seconds(self) -> u128 {
        self.0 / (NANOS_PER_MILLI * MILLIS_PER_SECOND)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

// ----------------------------------- tests -----------------------------------
