use crate::engine::types::RankedMarket;

/// Order markets by liquidity score, best first.
///
/// `sort_by` is stable, so markets with equal scores keep the order they came in.
pub fn rank_by_liquidity(mut markets: Vec<RankedMarket>) -> Vec<RankedMarket> {
    markets.sort_by(|a, b| b.score().total_cmp(&a.score()));
    markets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::liquidity::compute_liquidity;

    fn market(id: &str, score: f64) -> RankedMarket {
        let mut liquidity = compute_liquidity(&[], &[], 10);
        liquidity.liquidity_score = score;
        RankedMarket { market_id: id.to_string(), ticker: format!("{id}/USDT"), liquidity }
    }

    #[test]
    fn test_rank_descending_and_stable() {
        let input = vec![market("a", 3.1), market("b", 5.0), market("c", 5.0), market("d", 1.2)];
        let ranked = rank_by_liquidity(input);
        let ids: Vec<&str> = ranked.iter().map(|m| m.market_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a", "d"]);
        let scores: Vec<f64> = ranked.iter().map(|m| m.score()).collect();
        assert_eq!(scores, vec![5.0, 5.0, 3.1, 1.2]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_by_liquidity(Vec::new()).is_empty());
    }
}
