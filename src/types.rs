//! Core prop and pick types
//!
//! Two input tables feed the engine: fixed-line props (the platform assumes a
//! 50% chance per side regardless of the true distribution) and market props
//! (a sportsbook line whose price encodes an implied probability). Everything
//! downstream works on [`MatchedProp`] rows produced by the edge calculator.

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the line the fixed-line assumption makes profitable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Over,
    Under,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Over => write!(f, "OVER"),
            Direction::Under => write!(f, "UNDER"),
        }
    }
}

/// A fixed-line prop as offered by the pick'em platform.
///
/// Immutable once fetched; lifetime is one fetch cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedLineProp {
    pub player: String,
    pub stat_type: String,
    pub line: Decimal,
    pub sport: String,
    /// Game identifier when the feed provides one; used only by the
    /// same-game correlation pass.
    #[serde(default)]
    pub game_id: Option<String>,
}

/// A sportsbook prop carrying a true-probability quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketProp {
    pub player: String,
    pub market_line: Decimal,
    /// Implied probability of the OVER at `market_line`, in [0, 1]
    pub implied_prob: Decimal,
}

impl MarketProp {
    /// Range-check the probability quote. Out-of-range values fail fast
    /// rather than flowing into the edge math.
    pub fn validate(&self) -> Result<()> {
        if self.implied_prob < Decimal::ZERO || self.implied_prob > Decimal::ONE {
            return Err(Error::invalid_input(
                "implied_prob",
                self.implied_prob,
                "must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// A fixed-line prop joined 1:1 with a market quote on player identity.
///
/// Invariant: `edge = implied_prob - 0.5` when `direction` is OVER
/// (inferred from `line < market_line`), else `(1 - implied_prob) - 0.5`.
/// Exactly one direction is ever chosen per matched pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedProp {
    pub player: String,
    pub stat_type: String,
    pub sport: String,
    #[serde(default)]
    pub game_id: Option<String>,
    /// The fixed-line platform's line
    pub line: Decimal,
    /// The sportsbook's line
    pub market_line: Decimal,
    /// Implied probability of the OVER at the market line
    pub implied_prob: Decimal,
    pub direction: Direction,
    /// Signed probability gap versus the assumed 50%; can be negative
    pub edge: Decimal,
    pub is_positive: bool,
    /// Absolute gap between the two lines, in stat units
    pub line_gap: Decimal,
}

impl MatchedProp {
    /// Probability that the recommended side hits
    pub fn win_probability(&self) -> Decimal {
        match self.direction {
            Direction::Over => self.implied_prob,
            Direction::Under => Decimal::ONE - self.implied_prob,
        }
    }

    pub fn grade(&self) -> ValueGrade {
        ValueGrade::from_edge(self.edge)
    }
}

/// Letter grade for an edge value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueGrade {
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl ValueGrade {
    pub fn from_edge(edge: Decimal) -> Self {
        if edge >= dec!(0.10) {
            ValueGrade::APlus
        } else if edge >= dec!(0.07) {
            ValueGrade::A
        } else if edge >= dec!(0.05) {
            ValueGrade::B
        } else if edge >= dec!(0.03) {
            ValueGrade::C
        } else if edge >= dec!(0.01) {
            ValueGrade::D
        } else {
            ValueGrade::F
        }
    }
}

impl fmt::Display for ValueGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueGrade::APlus => "A+",
            ValueGrade::A => "A",
            ValueGrade::B => "B",
            ValueGrade::C => "C",
            ValueGrade::D => "D",
            ValueGrade::F => "F",
        };
        write!(f, "{s}")
    }
}
