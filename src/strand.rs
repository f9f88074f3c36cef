//! Strand orientation of a gene.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Strand orientation as reported by BioMart (`1` or `-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    #[must_use]
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }

    /// The BioMart integer encoding.
    #[must_use]
    pub fn direction(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

impl TryFrom<i32> for Strand {
    type Error = Error;

    fn try_from(direction: i32) -> Result<Self, Self::Error> {
        match direction {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Reverse),
            _ => Err(Error::Parse(format!(
                "invalid strand {direction}: expected 1 or -1"
            ))),
        }
    }
}

impl FromStr for Strand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let direction: i32 = s
            .trim()
            .parse()
            .map_err(|e| Error::Parse(format!("invalid strand '{s}': {e}")))?;
        Self::try_from(direction)
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.direction())
    }
}
