//! Identifier newtypes with strict ASCII token shapes; no I/O.
//!
//! All four identifiers share the registry token charset
//! `^[A-Za-z0-9_.:-]{1,64}$`. `TeamCode` is additionally canonicalized to
//! uppercase on parse, since raw data mixes cases freely.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors returned when validating or parsing identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    Empty,
    NonAscii,
    TooLong,
    BadShape,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::Empty => write!(f, "empty identifier"),
            IdError::NonAscii => write!(f, "identifier must be ASCII"),
            IdError::TooLong => write!(f, "identifier too long"),
            IdError::BadShape => write!(f, "identifier has invalid characters"),
        }
    }
}

const TOKEN_MAX_LEN: usize = 64;

/// Token charset check: `^[A-Za-z0-9_.:-]{1,64}$`, ASCII only.
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let bs = s.as_bytes();
    if bs.is_empty() || bs.len() > TOKEN_MAX_LEN {
        return false;
    }
    bs.iter().all(|&b| {
        b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b':' || b == b'-'
    })
}

#[inline]
fn check_token(s: &str) -> Result<(), IdError> {
    if s.is_empty() {
        return Err(IdError::Empty);
    }
    if !s.is_ascii() {
        return Err(IdError::NonAscii);
    }
    if s.len() > TOKEN_MAX_LEN {
        return Err(IdError::TooLong);
    }
    if !is_valid_token(s) {
        return Err(IdError::BadShape);
    }
    Ok(())
}

macro_rules! token_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

token_newtype!(
    /// Participant identifier ("chest number"), e.g. `SMD001`.
    ChestNumber
);
token_newtype!(
    /// Programme identifier.
    ProgrammeId
);
token_newtype!(
    /// Result document identifier.
    ResultId
);
token_newtype!(
    /// Short team code, canonically uppercase (e.g. `SMD`).
    TeamCode
);

impl FromStr for ChestNumber {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_token(s)?;
        Ok(ChestNumber(s.to_string()))
    }
}

impl FromStr for ProgrammeId {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_token(s)?;
        Ok(ProgrammeId(s.to_string()))
    }
}

impl FromStr for ResultId {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_token(s)?;
        Ok(ResultId(s.to_string()))
    }
}

impl FromStr for TeamCode {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_token(s)?;
        Ok(TeamCode(s.to_ascii_uppercase()))
    }
}

impl TeamCode {
    /// Uppercase copy of this code. Deserialized codes bypass `FromStr`,
    /// so loaders call this once during normalization.
    pub fn canonicalized(&self) -> TeamCode {
        TeamCode(self.0.to_ascii_uppercase())
    }
}

// === Tests ===
