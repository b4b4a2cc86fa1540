//! Arbitrage detection
//!
//! Scans pairs and triples of independent probability quotes for Dutch-book
//! combinations: when the implied probabilities of two bettable sides sum to
//! under 100%, splitting the stake proportionally locks in a profit
//! regardless of outcome.
//!
//! The scans are O(n^2) and O(n^3). They are meant for the small,
//! pre-filtered candidate set coming out of the edge calculator — NOT a raw
//! feed of thousands of rows. A hard cap truncates oversized input and logs
//! a warning; pre-filter by EV threshold before calling if the cap trips.

use crate::config::ArbitrageConfig;
use crate::correlation::{TeamLookup, UNKNOWN_TEAM};
use crate::types::{Direction, MatchedProp};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{debug, warn};

/// One side of an arbitrage combination
#[derive(Debug, Clone, Serialize)]
pub struct ArbLeg {
    pub player: String,
    pub stat_type: String,
    pub direction: Direction,
    pub implied_prob: Decimal,
    /// Fraction of the total stake placed on this leg; stakes sum to 1
    pub stake: Decimal,
}

/// A risk-free combination of 2 or 3 quotes
#[derive(Debug, Clone, Serialize)]
pub struct ArbitrageOpportunity {
    pub legs: Vec<ArbLeg>,
    /// Sum of implied probabilities, strictly under 1
    pub total_prob: Decimal,
    /// Guaranteed profit as a percentage of total stake
    pub profit_pct: Decimal,
    pub detected_at: DateTime<Utc>,
}

/// Advisory same-game pairing, not a guaranteed profit
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationCandidate {
    pub game_id: String,
    pub team: String,
    pub players: (String, String),
    pub stats: (String, String),
    pub directions: (Direction, Direction),
    pub average_edge: Decimal,
}

/// Pair/triple scanner over a pre-filtered quote set
#[derive(Debug, Clone)]
pub struct ArbitrageDetector {
    config: ArbitrageConfig,
}

impl ArbitrageDetector {
    pub fn new(config: ArbitrageConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ArbitrageConfig::default())
    }

    /// Scan all unordered pairs of distinct-player quotes.
    pub fn find_two_way(&self, quotes: &[MatchedProp]) -> Vec<ArbitrageOpportunity> {
        let quotes = self.guard(quotes);
        let mut opportunities = Vec::new();

        for i in 0..quotes.len() {
            for j in (i + 1)..quotes.len() {
                if quotes[i].player == quotes[j].player {
                    continue;
                }
                if let Some(opp) = self.qualify(&[&quotes[i], &quotes[j]]) {
                    opportunities.push(opp);
                }
            }
        }

        opportunities.sort_by(|a, b| b.profit_pct.cmp(&a.profit_pct));
        debug!(
            pairs_found = opportunities.len(),
            scanned = quotes.len(),
            "two-way arbitrage scan complete"
        );
        opportunities
    }

    /// Scan all unordered triples of distinct-player quotes.
    pub fn find_three_way(&self, quotes: &[MatchedProp]) -> Vec<ArbitrageOpportunity> {
        if !self.config.include_three_way {
            return Vec::new();
        }
        let quotes = self.guard(quotes);
        let mut opportunities = Vec::new();

        for i in 0..quotes.len() {
            for j in (i + 1)..quotes.len() {
                if quotes[i].player == quotes[j].player {
                    continue;
                }
                for k in (j + 1)..quotes.len() {
                    if quotes[k].player == quotes[i].player
                        || quotes[k].player == quotes[j].player
                    {
                        continue;
                    }
                    if let Some(opp) = self.qualify(&[&quotes[i], &quotes[j], &quotes[k]]) {
                        opportunities.push(opp);
                    }
                }
            }
        }

        opportunities.sort_by(|a, b| b.profit_pct.cmp(&a.profit_pct));
        opportunities
    }

    /// Looser heuristic pass: same game, same known team, opposite
    /// directions. Flagged as candidates only — no profit computation.
    pub fn find_correlation_candidates(
        &self,
        quotes: &[MatchedProp],
        lookup: &TeamLookup,
    ) -> Vec<CorrelationCandidate> {
        let mut candidates = Vec::new();

        for i in 0..quotes.len() {
            for j in (i + 1)..quotes.len() {
                let (a, b) = (&quotes[i], &quotes[j]);
                if a.player == b.player || a.direction == b.direction {
                    continue;
                }
                let (Some(game_a), Some(game_b)) = (&a.game_id, &b.game_id) else {
                    continue;
                };
                if game_a != game_b {
                    continue;
                }
                let team = lookup.team_of(&a.player);
                if team == UNKNOWN_TEAM || team != lookup.team_of(&b.player) {
                    continue;
                }
                candidates.push(CorrelationCandidate {
                    game_id: game_a.clone(),
                    team: team.to_string(),
                    players: (a.player.clone(), b.player.clone()),
                    stats: (a.stat_type.clone(), b.stat_type.clone()),
                    directions: (a.direction, b.direction),
                    average_edge: (a.edge + b.edge) / dec!(2),
                });
            }
        }

        candidates
    }

    /// Qualify a combination: distinct players already checked by callers;
    /// total probability must be strictly under 1 and the profit must clear
    /// the configured floor. Stakes follow the generalized Dutch-book
    /// allocation `stake_i = implied_prob_i / total_prob`, which sums to 1.
    fn qualify(&self, combo: &[&MatchedProp]) -> Option<ArbitrageOpportunity> {
        let total_prob: Decimal = combo.iter().map(|q| q.implied_prob).sum();
        if total_prob <= Decimal::ZERO || total_prob >= Decimal::ONE {
            return None;
        }

        let profit_pct = (Decimal::ONE / total_prob - Decimal::ONE) * dec!(100);
        if profit_pct < self.config.min_profit_pct {
            return None;
        }

        let legs = combo
            .iter()
            .map(|q| ArbLeg {
                player: q.player.clone(),
                stat_type: q.stat_type.clone(),
                direction: q.direction,
                implied_prob: q.implied_prob,
                stake: q.implied_prob / total_prob,
            })
            .collect();

        Some(ArbitrageOpportunity {
            legs,
            total_prob,
            profit_pct,
            detected_at: Utc::now(),
        })
    }

    /// Truncate oversized input to the cap. Input is expected to arrive
    /// sorted by edge descending, so truncation keeps the best candidates.
    fn guard<'a>(&self, quotes: &'a [MatchedProp]) -> &'a [MatchedProp] {
        if quotes.len() > self.config.max_scan_size {
            warn!(
                input = quotes.len(),
                cap = self.config.max_scan_size,
                "quote set exceeds scan cap, truncating; pre-filter by EV to avoid this"
            );
            &quotes[..self.config.max_scan_size]
        } else {
            quotes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_quote(player: &str, implied_prob: Decimal) -> MatchedProp {
        MatchedProp {
            player: player.to_string(),
            stat_type: "Points".to_string(),
            sport: "NBA".to_string(),
            game_id: None,
            line: dec!(20),
            market_line: dec!(22),
            implied_prob,
            direction: Direction::Over,
            edge: implied_prob - dec!(0.5),
            is_positive: implied_prob > dec!(0.5),
            line_gap: dec!(2),
        }
    }

    #[test]
    fn test_two_way_basic_opportunity() {
        let detector = ArbitrageDetector::with_defaults();
        let quotes = vec![make_quote("A", dec!(0.45)), make_quote("B", dec!(0.50))];
        let opps = detector.find_two_way(&quotes);

        assert_eq!(opps.len(), 1);
        let opp = &opps[0];
        assert_eq!(opp.total_prob, dec!(0.95));
        // (1/0.95 - 1) * 100 ~ 5.26%
        assert!((opp.profit_pct - dec!(5.26)).abs() < dec!(0.01));
    }

    #[test]
    fn test_two_way_no_opportunity_over_one() {
        let detector = ArbitrageDetector::with_defaults();
        let quotes = vec![make_quote("A", dec!(0.55)), make_quote("B", dec!(0.55))];
        assert!(detector.find_two_way(&quotes).is_empty());
    }

    #[test]
    fn test_two_way_exactly_one_is_not_arbitrage() {
        let detector = ArbitrageDetector::with_defaults();
        let quotes = vec![make_quote("A", dec!(0.50)), make_quote("B", dec!(0.50))];
        assert!(detector.find_two_way(&quotes).is_empty());
    }

    #[test]
    fn test_same_player_skipped() {
        let detector = ArbitrageDetector::with_defaults();
        let quotes = vec![make_quote("A", dec!(0.40)), make_quote("A", dec!(0.40))];
        assert!(detector.find_two_way(&quotes).is_empty());
    }

    #[test]
    fn test_profit_floor_filters() {
        let config = ArbitrageConfig {
            min_profit_pct: dec!(10),
            ..Default::default()
        };
        let detector = ArbitrageDetector::new(config);
        // ~5.26% profit, below the 10% floor
        let quotes = vec![make_quote("A", dec!(0.45)), make_quote("B", dec!(0.50))];
        assert!(detector.find_two_way(&quotes).is_empty());
    }

    #[test]
    fn test_stake_split_sums_to_one() {
        let detector = ArbitrageDetector::with_defaults();
        let quotes = vec![make_quote("A", dec!(0.45)), make_quote("B", dec!(0.50))];
        let opps = detector.find_two_way(&quotes);
        let stakes: Decimal = opps[0].legs.iter().map(|l| l.stake).sum();
        assert!((stakes - Decimal::ONE).abs() < dec!(0.0000001));
        // Heavier stake on the likelier side
        assert!(opps[0].legs[1].stake > opps[0].legs[0].stake);
    }

    #[test]
    fn test_three_way_with_exact_stakes() {
        let detector = ArbitrageDetector::with_defaults();
        let quotes = vec![
            make_quote("A", dec!(0.30)),
            make_quote("B", dec!(0.30)),
            make_quote("C", dec!(0.30)),
        ];
        let opps = detector.find_three_way(&quotes);

        assert_eq!(opps.len(), 1);
        let opp = &opps[0];
        assert_eq!(opp.total_prob, dec!(0.90));
        assert_eq!(opp.legs.len(), 3);
        // Equal quotes split evenly; stakes always sum to 1
        let stakes: Decimal = opp.legs.iter().map(|l| l.stake).sum();
        assert!((stakes - Decimal::ONE).abs() < dec!(0.0000001));
        for leg in &opp.legs {
            assert!((leg.stake - Decimal::ONE / dec!(3)).abs() < dec!(0.0000001));
        }
    }

    #[test]
    fn test_three_way_disabled() {
        let config = ArbitrageConfig {
            include_three_way: false,
            ..Default::default()
        };
        let detector = ArbitrageDetector::new(config);
        let quotes = vec![
            make_quote("A", dec!(0.30)),
            make_quote("B", dec!(0.30)),
            make_quote("C", dec!(0.30)),
        ];
        assert!(detector.find_three_way(&quotes).is_empty());
    }

    #[test]
    fn test_scan_cap_truncates() {
        let config = ArbitrageConfig {
            max_scan_size: 3,
            ..Default::default()
        };
        let detector = ArbitrageDetector::new(config);
        // Only the first three survive the cap; the profitable pair sits
        // beyond it and must not be found
        let quotes = vec![
            make_quote("A", dec!(0.60)),
            make_quote("B", dec!(0.60)),
            make_quote("C", dec!(0.60)),
            make_quote("D", dec!(0.40)),
            make_quote("E", dec!(0.40)),
        ];
        assert!(detector.find_two_way(&quotes).is_empty());
    }

    #[test]
    fn test_sorted_by_profit_descending() {
        let detector = ArbitrageDetector::with_defaults();
        let quotes = vec![
            make_quote("A", dec!(0.45)),
            make_quote("B", dec!(0.50)),
            make_quote("C", dec!(0.40)),
        ];
        let opps = detector.find_two_way(&quotes);
        assert_eq!(opps.len(), 3);
        assert!(opps[0].profit_pct >= opps[1].profit_pct);
        assert!(opps[1].profit_pct >= opps[2].profit_pct);
    }

    #[test]
    fn test_correlation_candidates() {
        let detector = ArbitrageDetector::with_defaults();
        let lookup = TeamLookup::from_pairs([("A", "LAL"), ("B", "LAL"), ("C", "GSW")]);

        let mut over = make_quote("A", dec!(0.6));
        over.game_id = Some("g1".to_string());
        let mut under = make_quote("B", dec!(0.4));
        under.direction = Direction::Under;
        under.game_id = Some("g1".to_string());
        let mut other_team = make_quote("C", dec!(0.4));
        other_team.direction = Direction::Under;
        other_team.game_id = Some("g1".to_string());
        let mut other_game = make_quote("B", dec!(0.4));
        other_game.direction = Direction::Under;
        other_game.game_id = Some("g2".to_string());

        let quotes = vec![over, under, other_team, other_game];
        let candidates = detector.find_correlation_candidates(&quotes, &lookup);

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.players, ("A".to_string(), "B".to_string()));
        assert_eq!(c.team, "LAL");
        assert_eq!(c.directions, (Direction::Over, Direction::Under));
    }

    #[test]
    fn test_correlation_candidates_need_opposite_directions() {
        let detector = ArbitrageDetector::with_defaults();
        let lookup = TeamLookup::from_pairs([("A", "LAL"), ("B", "LAL")]);

        let mut a = make_quote("A", dec!(0.6));
        a.game_id = Some("g1".to_string());
        let mut b = make_quote("B", dec!(0.6));
        b.game_id = Some("g1".to_string());

        assert!(detector
            .find_correlation_candidates(&[a, b], &lookup)
            .is_empty());
    }
}
