//! FILENAME: core/summary-engine/src/similarity.rs
//! Related-product recommendations.
//!
//! A candidate's score is a weighted sum of independent matches against the
//! target product. Candidates are ranked descending by score; ties keep
//! catalog order.

use engine::Product;

use crate::view::Ranked;

/// Allowed deviation from the target price for the price-band match.
pub const PRICE_BAND: f64 = 0.20;

/// Weight of each similarity criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    pub same_category: f64,
    pub same_provider: f64,
    pub price_band: f64,
    pub same_delivery_window: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        SimilarityWeights {
            same_category: 5.0,
            same_provider: 4.0,
            price_band: 3.0,
            same_delivery_window: 2.0,
        }
    }
}

fn same_category(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !a.trim().is_empty() && a.trim().eq_ignore_ascii_case(b.trim()),
        _ => false,
    }
}

/// Identifiers are case-sensitive.
fn same_id(a: Option<&str>, b: Option<&str>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if !a.is_empty() && a == b)
}

fn within_price_band(target: Option<f64>, candidate: Option<f64>) -> bool {
    match (target, candidate) {
        (Some(t), Some(c)) if t > 0.0 => (c - t).abs() <= t * PRICE_BAND,
        _ => false,
    }
}

/// Similarity of `candidate` to `target`. Missing data never matches.
pub fn similarity_score(target: &Product, candidate: &Product, weights: &SimilarityWeights) -> f64 {
    let mut score = 0.0;

    if same_category(target.category.as_deref(), candidate.category.as_deref()) {
        score += weights.same_category;
    }
    if same_id(target.provider_id.as_deref(), candidate.provider_id.as_deref()) {
        score += weights.same_provider;
    }
    if within_price_band(target.price, candidate.price) {
        score += weights.price_band;
    }
    if let (Some(a), Some(b)) = (target.delivery_days, candidate.delivery_days) {
        if a == b {
            score += weights.same_delivery_window;
        }
    }

    score
}

/// The `n` products most similar to `target`, excluding `target` itself.
pub fn related_products<'a, I>(target: &Product, candidates: I, n: usize) -> Vec<Ranked<'a, Product>>
where
    I: IntoIterator<Item = &'a Product>,
{
    let weights = SimilarityWeights::default();

    let mut ranked: Vec<Ranked<'a, Product>> = candidates
        .into_iter()
        .filter(|c| c.id != target.id)
        .map(|c| Ranked {
            record: c,
            score: similarity_score(target, c, &weights),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(id: &str, category: &str, provider: &str, price: f64, days: f64) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "nombre": format!("Producto {}", id),
            "categoria": category,
            "proveedor_id": provider,
            "precio": price,
            "tiempo_entrega": days,
        }))
        .unwrap()
    }

    #[test]
    fn test_score_weights() {
        let target = product("t", "Tornillería", "p1", 100.0, 3.0);
        let weights = SimilarityWeights::default();

        assert_eq!(similarity_score(&target, &product("a", "Tornillería", "p1", 120.0, 3.0), &weights), 14.0);
        assert_eq!(similarity_score(&target, &product("b", "Pintura", "p1", 121.0, 3.0), &weights), 6.0);
        assert_eq!(similarity_score(&target, &product("c", "Pintura", "p2", 80.0, 5.0), &weights), 3.0);
        assert_eq!(similarity_score(&target, &product("d", "Pintura", "p2", 10.0, 5.0), &weights), 0.0);
    }

    #[test]
    fn test_provider_match_is_case_sensitive() {
        let target = product("t", "Tornillería", "PRV-1", 100.0, 3.0);
        let weights = SimilarityWeights::default();

        assert_eq!(similarity_score(&target, &product("a", "Pintura", "PRV-1", 500.0, 9.0), &weights), 4.0);
        assert_eq!(similarity_score(&target, &product("b", "Pintura", "prv-1", 500.0, 9.0), &weights), 0.0);
        assert_eq!(similarity_score(&target, &product("d", "tornillería", "x", 500.0, 9.0), &weights), 5.0);
    }

    #[test]
    fn test_related_products_rank_and_exclude_target() {
        let target = product("t", "Tornillería", "p1", 100.0, 3.0);
        let catalog = vec![
            target.clone(),
            product("low", "Pintura", "p2", 10.0, 9.0),
            product("mid-1", "Pintura", "p1", 500.0, 9.0),
            product("high", "Tornillería", "p1", 100.0, 3.0),
            product("mid-2", "Pintura", "p1", 500.0, 9.0),
        ];

        let related = related_products(&target, &catalog, 3);
        let ids: Vec<&str> = related.iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid-1", "mid-2"]);
    }
}
