//! Edge calculation
//!
//! Joins the fixed-line board against sportsbook quotes and scores every
//! matched prop. The fixed-line platform prices every prop at an assumed
//! 50/50, so any market line that disagrees creates a measurable edge: if
//! the fixed line sits below the market line the OVER clears more easily
//! than a coin flip, and vice versa for the UNDER.

use crate::error::Result;
use crate::types::{Direction, FixedLineProp, MarketProp, MatchedProp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// The win probability the fixed-line platform assumes per side
pub const FIXED_LINE_PROB: Decimal = dec!(0.5);

/// Join fixed-line props with market quotes on exact player identity and
/// compute the edge for each match.
///
/// Empty inputs or zero matches return an empty Vec, not an error; the only
/// failure is a market quote outside [0, 1]. Output is sorted by edge
/// descending, ties preserving join order. Pure transform.
///
/// The join is an exact string match on `player`, mirroring the upstream
/// feeds. Case/whitespace-normalized matching would recover more rows but
/// is deliberately not the default.
pub fn compute_edges(
    fixed: &[FixedLineProp],
    market: &[MarketProp],
) -> Result<Vec<MatchedProp>> {
    if fixed.is_empty() || market.is_empty() {
        return Ok(Vec::new());
    }

    for quote in market {
        quote.validate()?;
    }

    // First quote per player wins, keeping the join 1:1
    let mut by_player: HashMap<&str, &MarketProp> = HashMap::new();
    for quote in market {
        by_player.entry(quote.player.as_str()).or_insert(quote);
    }

    let mut matched: Vec<MatchedProp> = fixed
        .iter()
        .filter_map(|prop| {
            let quote = by_player.get(prop.player.as_str()).copied()?;
            Some(score_pair(prop, quote))
        })
        .collect();

    // Stable sort keeps join order on equal edges
    matched.sort_by(|a, b| b.edge.cmp(&a.edge));
    Ok(matched)
}

fn score_pair(prop: &FixedLineProp, quote: &MarketProp) -> MatchedProp {
    let (direction, edge) = if prop.line < quote.market_line {
        // Fixed line is lower, the OVER clears more easily
        (Direction::Over, quote.implied_prob - FIXED_LINE_PROB)
    } else {
        (
            Direction::Under,
            (Decimal::ONE - quote.implied_prob) - FIXED_LINE_PROB,
        )
    };

    MatchedProp {
        player: prop.player.clone(),
        stat_type: prop.stat_type.clone(),
        sport: prop.sport.clone(),
        game_id: prop.game_id.clone(),
        line: prop.line,
        market_line: quote.market_line,
        implied_prob: quote.implied_prob,
        direction,
        edge,
        is_positive: edge > Decimal::ZERO,
        line_gap: (prop.line - quote.market_line).abs(),
    }
}
