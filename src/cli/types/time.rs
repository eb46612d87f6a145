//! NFL season years and week numbers.
//!
//! Both serialize as bare numbers and render without decoration, so they drop
//! straight into Sleeper paths (`stats/nfl/regular/2024/7`) and PostgREST
//! filters (`week=eq.7`).

use crate::error::{FflError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU16, str::FromStr};

/// Season the CLI reports on when `--season` is omitted.
pub const DEFAULT_SEASON: u16 = 2024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(DEFAULT_SEASON)
    }
}

/// A week of the NFL calendar, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Season {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Week 0 does not exist, so it is rejected like any other bad number.
impl FromStr for Week {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        let week: NonZeroU16 = s.trim().parse()?;
        Ok(Self(week.get()))
    }
}
