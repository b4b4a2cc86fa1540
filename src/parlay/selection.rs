//! Parlay leg selection and deduplication

use crate::config::DedupePolicy;
use crate::types::MatchedProp;
use std::collections::HashSet;

/// Deduplicate candidate legs, keeping the highest-edge occurrence per key.
///
/// Output is sorted by edge descending; ties keep input order.
pub fn dedupe_legs(props: &[MatchedProp], policy: DedupePolicy) -> Vec<MatchedProp> {
    let mut sorted: Vec<MatchedProp> = props.to_vec();
    sorted.sort_by(|a, b| b.edge.cmp(&a.edge));

    let mut seen: HashSet<String> = HashSet::new();
    sorted.retain(|prop| {
        let key = match policy {
            DedupePolicy::Player => prop.player.clone(),
            DedupePolicy::PlayerStat => format!("{}\u{0}{}", prop.player, prop.stat_type),
        };
        seen.insert(key)
    });
    sorted
}

/// Dedupe then take the top `num_legs` by edge.
pub fn select_legs(
    props: &[MatchedProp],
    num_legs: usize,
    policy: DedupePolicy,
) -> Vec<MatchedProp> {
    let mut legs = dedupe_legs(props, policy);
    legs.truncate(num_legs);
    legs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn make_prop(player: &str, stat: &str, edge: Decimal) -> MatchedProp {
        MatchedProp {
            player: player.to_string(),
            stat_type: stat.to_string(),
            sport: "NBA".to_string(),
            game_id: None,
            line: dec!(20),
            market_line: dec!(22),
            implied_prob: dec!(0.5) + edge,
            direction: Direction::Over,
            edge,
            is_positive: edge > Decimal::ZERO,
            line_gap: dec!(2),
        }
    }

    #[test]
    fn test_player_policy_keeps_highest_edge() {
        let props = vec![
            make_prop("X", "Points", dec!(0.04)),
            make_prop("X", "Rebounds", dec!(0.09)),
            make_prop("Y", "Points", dec!(0.06)),
        ];
        let legs = dedupe_legs(&props, DedupePolicy::Player);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].player, "X");
        assert_eq!(legs[0].stat_type, "Rebounds");
        assert_eq!(legs[1].player, "Y");
    }

    #[test]
    fn test_player_stat_policy_keeps_both_stats() {
        let props = vec![
            make_prop("X", "Points", dec!(0.04)),
            make_prop("X", "Rebounds", dec!(0.09)),
        ];
        let legs = dedupe_legs(&props, DedupePolicy::PlayerStat);
        assert_eq!(legs.len(), 2);
    }

    #[test]
    fn test_player_stat_policy_still_drops_exact_duplicates() {
        let props = vec![
            make_prop("X", "Points", dec!(0.04)),
            make_prop("X", "Points", dec!(0.09)),
        ];
        let legs = dedupe_legs(&props, DedupePolicy::PlayerStat);
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].edge, dec!(0.09));
    }

    #[test]
    fn test_select_truncates_to_num_legs() {
        let props = vec![
            make_prop("A", "Points", dec!(0.03)),
            make_prop("B", "Points", dec!(0.08)),
            make_prop("C", "Points", dec!(0.05)),
        ];
        let legs = select_legs(&props, 2, DedupePolicy::Player);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].player, "B");
        assert_eq!(legs[1].player, "C");
    }

    #[test]
    fn test_empty_input() {
        assert!(select_legs(&[], 6, DedupePolicy::Player).is_empty());
    }
}
