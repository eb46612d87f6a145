//! Fantasy football position and roster-slot types.

use crate::error::FflError;
use std::fmt;
use std::str::FromStr;

/// Player positions as reported by Sleeper.
///
/// Offensive positions, kickers, team defenses and the three IDP groups.
///
/// # Examples
///
/// ```rust
/// use sleeper_ffl::Position;
///
/// let qb: Position = "qb".parse().unwrap();
/// assert_eq!(qb, Position::QB);
/// assert_eq!(Position::DEF.to_string(), "DEF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
    DL,
    LB,
    DB,
}

impl Position {
    /// Individual defensive player positions score from IDP stat lines.
    pub fn is_idp(&self) -> bool {
        matches!(self, Position::DL | Position::LB | Position::DB)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
            Position::DL => "DL",
            Position::LB => "LB",
            Position::DB => "DB",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            "DEF" | "D/ST" | "DST" => Ok(Position::DEF),
            "DL" | "DE" | "DT" => Ok(Position::DL),
            "LB" | "ILB" | "OLB" => Ok(Position::LB),
            "DB" | "CB" | "S" | "SS" | "FS" => Ok(Position::DB),
            _ => Err(FflError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

/// Lineup slots from a league's `roster_positions` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterSlot {
    Fixed(Position),
    Flex,
    SuperFlex,
    IdpFlex,
    RecFlex,
    /// WR or RB only.
    WrRbFlex,
    Bench,
    InjuredReserve,
    Taxi,
}

impl RosterSlot {
    /// Flex slots are filled only after every fixed slot.
    pub fn is_flex(&self) -> bool {
        matches!(
            self,
            RosterSlot::Flex
                | RosterSlot::SuperFlex
                | RosterSlot::IdpFlex
                | RosterSlot::RecFlex
                | RosterSlot::WrRbFlex
        )
    }

    /// Slots that never count toward a starting lineup.
    pub fn is_reserve(&self) -> bool {
        matches!(
            self,
            RosterSlot::Bench | RosterSlot::InjuredReserve | RosterSlot::Taxi
        )
    }

    /// Whether a player at `position` may start in this slot.
    pub fn accepts(&self, position: Position) -> bool {
        use Position::*;
        match self {
            RosterSlot::Fixed(p) => *p == position,
            RosterSlot::Flex => matches!(position, RB | WR | TE),
            RosterSlot::SuperFlex => matches!(position, QB | RB | WR | TE),
            RosterSlot::IdpFlex => position.is_idp(),
            RosterSlot::RecFlex => matches!(position, WR | TE),
            RosterSlot::WrRbFlex => matches!(position, WR | RB),
            RosterSlot::Bench | RosterSlot::InjuredReserve | RosterSlot::Taxi => false,
        }
    }

    /// Sleeper's spelling of the slot.
    pub fn base_name(&self) -> &'static str {
        match self {
            RosterSlot::Fixed(p) => p.as_str(),
            RosterSlot::Flex => "FLEX",
            RosterSlot::SuperFlex => "SUPER_FLEX",
            RosterSlot::IdpFlex => "IDP_FLEX",
            RosterSlot::RecFlex => "REC_FLEX",
            RosterSlot::WrRbFlex => "WRRB_FLEX",
            RosterSlot::Bench => "BN",
            RosterSlot::InjuredReserve => "IR",
            RosterSlot::Taxi => "TAXI",
        }
    }

    /// Compact label used in tables.
    pub fn short_name(&self) -> &'static str {
        match self {
            RosterSlot::SuperFlex => "SFLX",
            RosterSlot::IdpFlex => "IDPF",
            RosterSlot::RecFlex => "RFLX",
            RosterSlot::WrRbFlex => "WRRB",
            other => other.base_name(),
        }
    }
}

impl fmt::Display for RosterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_name())
    }
}

impl FromStr for RosterSlot {
    type Err = FflError;

    /// Trailing digits are ignored, so `"RB2"` parses like `"RB"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = s.trim().trim_end_matches(|c: char| c.is_ascii_digit());
        match base.to_uppercase().as_str() {
            "FLEX" => Ok(RosterSlot::Flex),
            "WRRB_FLEX" => Ok(RosterSlot::WrRbFlex),
            "SUPER_FLEX" => Ok(RosterSlot::SuperFlex),
            "IDP_FLEX" => Ok(RosterSlot::IdpFlex),
            "REC_FLEX" => Ok(RosterSlot::RecFlex),
            "BN" | "BE" | "BENCH" => Ok(RosterSlot::Bench),
            "IR" => Ok(RosterSlot::InjuredReserve),
            "TAXI" => Ok(RosterSlot::Taxi),
            other => other.parse::<Position>().map(RosterSlot::Fixed),
        }
    }
}
