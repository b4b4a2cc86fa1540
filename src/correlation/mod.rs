//! Player correlation model
//!
//! Attaches a heuristic coefficient to every unordered pair of players based
//! on team membership: same known team is strongly negative (teammates share
//! a finite stat pool), two different known teams are slightly positive,
//! anything touching an unknown player is neutral. The roster table is
//! injected data, not code — it changes every season.
//!
//! The averaging-then-clamping penalty this feeds is a product heuristic,
//! not a rigorous joint-probability correction; see [`CorrelationModel::penalty`].

use crate::config::CorrelationConfig;
use crate::error::{Error, Result};
use crate::types::MatchedProp;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// Sentinel tag for players absent from the roster table
pub const UNKNOWN_TEAM: &str = "OTHER";

/// Injected player → team mapping.
///
/// Lookup tries an exact match first, then a substring match in either
/// direction so "LeBron James Jr." still resolves. Unknown players map to
/// [`UNKNOWN_TEAM`] and degrade to neutral correlation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TeamLookup {
    teams: HashMap<String, String>,
}

impl TeamLookup {
    pub fn new(teams: HashMap<String, String>) -> Self {
        Self { teams }
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            teams: pairs
                .into_iter()
                .map(|(p, t)| (p.into(), t.into()))
                .collect(),
        }
    }

    /// Load a `{"player": "TEAM", ...}` JSON document.
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let teams: HashMap<String, String> =
            serde_json::from_reader(reader).map_err(|e| Error::TeamMap(e.to_string()))?;
        Ok(Self { teams })
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Resolve a player to a team tag, falling back to [`UNKNOWN_TEAM`].
    pub fn team_of(&self, player: &str) -> &str {
        if let Some(team) = self.teams.get(player) {
            return team;
        }
        for (name, team) in &self.teams {
            if name.contains(player) || player.contains(name.as_str()) {
                return team;
            }
        }
        UNKNOWN_TEAM
    }

    pub fn is_known(&self, player: &str) -> bool {
        self.team_of(player) != UNKNOWN_TEAM
    }
}

/// Correlation model over an injected roster table
#[derive(Debug, Clone)]
pub struct CorrelationModel {
    lookup: TeamLookup,
    config: CorrelationConfig,
}

impl CorrelationModel {
    pub fn new(lookup: TeamLookup, config: CorrelationConfig) -> Self {
        Self { lookup, config }
    }

    pub fn lookup(&self) -> &TeamLookup {
        &self.lookup
    }

    /// Coefficient for an unordered player pair, in [-1, 1].
    ///
    /// Pairs touching an unknown player are exactly neutral — never the
    /// same-team or cross-team value.
    pub fn coefficient(&self, a: &str, b: &str) -> Decimal {
        let team_a = self.lookup.team_of(a);
        let team_b = self.lookup.team_of(b);
        if team_a == UNKNOWN_TEAM || team_b == UNKNOWN_TEAM {
            Decimal::ZERO
        } else if team_a == team_b {
            self.config.same_team
        } else {
            self.config.cross_team
        }
    }

    /// Penalty multiplier for a leg set: average the pairwise coefficients,
    /// scale by the configured weight and clamp to the configured bounds.
    ///
    /// Fewer than 2 legs means no pairs, so the penalty is exactly 1.
    pub fn penalty(&self, legs: &[MatchedProp]) -> Decimal {
        if legs.len() < 2 {
            return Decimal::ONE;
        }

        let mut sum = Decimal::ZERO;
        let mut pairs = 0u32;
        for i in 0..legs.len() {
            for j in (i + 1)..legs.len() {
                sum += self.coefficient(&legs[i].player, &legs[j].player);
                pairs += 1;
            }
        }
        if pairs == 0 {
            return Decimal::ONE;
        }

        let avg = sum / Decimal::from(pairs);
        let penalty = Decimal::ONE + avg * self.config.weight;
        penalty
            .max(self.config.min_penalty)
            .min(self.config.max_penalty)
    }

    /// Human-readable warning when legs share a known team.
    ///
    /// Names at most two offending pairs. Returns `None` for fewer than 2
    /// legs or when no pair is flagged.
    pub fn warning(&self, legs: &[MatchedProp]) -> Option<String> {
        if legs.len() < 2 {
            return None;
        }

        let mut flagged = Vec::new();
        for i in 0..legs.len() {
            for j in (i + 1)..legs.len() {
                let team_a = self.lookup.team_of(&legs[i].player);
                let team_b = self.lookup.team_of(&legs[j].player);
                if team_a == team_b && team_a != UNKNOWN_TEAM {
                    flagged.push(format!(
                        "{} & {} ({})",
                        legs[i].player, legs[j].player, team_a
                    ));
                }
            }
        }

        if flagged.is_empty() {
            return None;
        }
        Some(format!(
            "Same team detected: {}. This reduces parlay chance.",
            flagged[..flagged.len().min(2)].join(", ")
        ))
    }
}
