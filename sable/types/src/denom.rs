use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Serialize, de},
    std::{
        fmt::{self, Display},
        io,
        str::FromStr,
    },
};

/// Denomination of an asset, e.g. `uusdc` or `bridged/eth/usdc`.
///
/// A denom consists of one or more non-empty, ASCII-alphanumeric parts
/// separated by forward slashes. Validated during deserialization, so a
/// `Denom` in hand is always well-formed.
#[derive(BorshSerialize, Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    pub const MAX_LENGTH: usize = 128;

    pub fn new_unchecked<T>(s: T) -> Self
    where
        T: Into<String>,
    {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Denom {
    type Error = StdError;

    fn try_from(s: String) -> StdResult<Self> {
        if s.is_empty() {
            return Err(StdError::invalid_denom(s, "empty"));
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(StdError::invalid_denom(s, "too long"));
        }

        for part in s.split('/') {
            if part.is_empty() {
                return Err(StdError::invalid_denom(&s, "empty part"));
            }

            if part.chars().any(|ch| !ch.is_ascii_alphanumeric()) {
                return Err(StdError::invalid_denom(&s, "non-alphanumeric character"));
            }
        }

        Ok(Self(s))
    }
}

impl TryFrom<&str> for Denom {
    type Error = StdError;

    fn try_from(s: &str) -> StdResult<Self> {
        Self::try_from(s.to_string())
    }
}

impl FromStr for Denom {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        Self::try_from(s.to_string())
    }
}

impl Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> de::Deserialize<'de> for Denom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        <String as de::Deserialize>::deserialize(deserializer)?
            .try_into()
            .map_err(de::Error::custom)
    }
}

impl BorshDeserialize for Denom {
    fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
    where
        R: io::Read,
    {
        <String as BorshDeserialize>::deserialize_reader(reader)?
            .try_into()
            .map_err(io::Error::other)
    }
}

// ----------------------------------- tests -----------------------------------
