use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser},
    std::{
        fmt::{self, Display},
        str::FromStr,
    },
};

/// A participant address: 20 bytes, rendered in hex with the `0x` prefix.
///
/// The ledger never derives or verifies addresses itself; the execution
/// environment supplies the authenticated caller identity. Validation here
/// is purely syntactic, so that an `Addr` deserialized without error is
/// always well-formed.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub struct Addr([u8; Self::LENGTH]);

impl Addr {
    pub const LENGTH: usize = 20;

    pub const fn from_array(array: [u8; Self::LENGTH]) -> Self {
        Self(array)
    }

    /// Generate a mock address for use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = index;
        Self(bytes)
    }
}

impl AsRef<[u8]> for Addr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Addr {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let Some(hex_str) = s.strip_prefix("0x") else {
            return Err(StdError::invalid_address(s, "missing `0x` prefix"));
        };

        let bytes = hex::decode(hex_str)
            .map_err(|err| StdError::invalid_address(s, err))?;

        bytes
            .try_into()
            .map(Self)
            .map_err(|_| StdError::invalid_address(s, "incorrect length"))
    }
}

impl Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl ser::Serialize for Addr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Addr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = <String as de::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ----------------------------------- tests -----------------------------------
