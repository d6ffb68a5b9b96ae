//! FILENAME: core/summary-engine/src/aggregate.rs
//! Summary Calculator - Statistics over a filtered record set.
//!
//! Every function here is pure and keeps input order wherever order is not
//! the point of the calculation: groups appear in first-seen order and
//! rankings break ties by input position.

use std::collections::BTreeMap;

use engine::{FieldValue, Record, RecordField, PLACEHOLDER};
use rustc_hash::FxHashMap;

use crate::definition::{ChartType, SummaryConfig};
use crate::view::{
    AggregateResult, ChartData, ChartPoint, GroupShare, GrowthDelta, RatingAverage, Ranked,
};

// ============================================================================
// SUMMARY
// ============================================================================

/// Runs every configured statistic over `records`.
pub fn summarize<'a, R: Record>(
    records: &[&'a R],
    config: &SummaryConfig<R::Field>,
) -> AggregateResult<'a, R> {
    let average = match config.rating {
        Some(field) => average_rating(records, field),
        None => RatingAverage::no_data(),
    };

    let total_score = records
        .iter()
        .map(|r| r.value(config.score).as_number().unwrap_or(0.0))
        .sum();

    let growth = config.growth.as_ref().map(|growth| {
        growth_delta(status_share(records, &growth.status), growth.baseline)
    });

    let result = AggregateResult {
        count: records.len(),
        average_rating: average,
        top_n: top_n(records, config.score, config.top_n),
        percentage_of_total: percentage_shares(group_counts(records, config.group_by)),
        growth_delta: growth,
        total_score,
    };

    log::debug!(
        "summarized {} {} records into {} groups",
        result.count,
        <R::Field as RecordField>::KIND,
        result.percentage_of_total.len()
    );
    result
}

// ============================================================================
// AVERAGES
// ============================================================================

/// Averages `field` over records where it is present and `> 0`.
pub fn average_rating<R: Record>(records: &[&R], field: R::Field) -> RatingAverage {
    let samples: Vec<f64> = records
        .iter()
        .filter_map(|r| r.value(field).as_number())
        .filter(|v| *v > 0.0)
        .collect();

    if samples.is_empty() {
        return RatingAverage::no_data();
    }

    RatingAverage {
        value: samples.iter().sum::<f64>() / samples.len() as f64,
        samples: samples.len(),
        has_data: true,
    }
}

// ============================================================================
// GROUPS AND PERCENTAGES
// ============================================================================

fn group_key(value: FieldValue) -> String {
    match value {
        FieldValue::Empty => PLACEHOLDER.to_string(),
        other => other.display_value(),
    }
}

/// Counts records per value of `field`, in first-seen order. Records with
/// no value are counted under the placeholder key.
pub fn group_counts<R: Record>(records: &[&R], field: R::Field) -> Vec<(String, usize)> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut groups: Vec<(String, usize)> = Vec::new();

    for record in records {
        let key = group_key(record.value(field));
        match index.get(&key) {
            Some(&i) => groups[i].1 += 1,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, 1));
            }
        }
    }

    groups
}

/// Converts group counts into whole percentages of the total.
///
/// Shares are apportioned by largest remainder: each group gets the floor of
/// `count * 100 / total`, then the points still missing go to the groups with
/// the largest remainders. Equal remainders favour later groups, so the last
/// group absorbs the rounding when every group is the same size. Non-empty
/// totals always sum to exactly 100; with a zero total every share is 0.
pub fn percentage_shares(groups: Vec<(String, usize)>) -> Vec<GroupShare> {
    let total: usize = groups.iter().map(|(_, c)| c).sum();

    let mut shares: Vec<GroupShare> = groups
        .into_iter()
        .map(|(key, count)| GroupShare {
            key,
            count,
            percentage: if total == 0 { 0 } else { (count * 100 / total) as u32 },
        })
        .collect();

    if total == 0 {
        return shares;
    }

    let assigned: u32 = shares.iter().map(|s| s.percentage).sum();
    let missing = 100u32.saturating_sub(assigned) as usize;

    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = shares[a].count * 100 % total;
        let rb = shares[b].count * 100 % total;
        rb.cmp(&ra).then(b.cmp(&a))
    });
    for &i in order.iter().take(missing) {
        shares[i].percentage += 1;
    }

    shares
}

// ============================================================================
// RANKINGS
// ============================================================================

/// The `n` highest scores of `field`, descending. Missing scores count as 0
/// and ties keep input order.
pub fn top_n<'a, R: Record>(records: &[&'a R], field: R::Field, n: usize) -> Vec<Ranked<'a, R>> {
    let mut ranked: Vec<Ranked<'a, R>> = records
        .iter()
        .map(|r| Ranked {
            record: *r,
            score: r.value(field).as_number().unwrap_or(0.0),
        })
        .collect();

    // `sort_by` is stable, so equal scores stay in input order.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(n);
    ranked
}

// ============================================================================
// GROWTH
// ============================================================================

/// Percentage (0..=100) of records whose status key equals `status`.
pub fn status_share<R: Record>(records: &[&R], status: &str) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let matching = records
        .iter()
        .filter(|r| r.status_key() == Some(status))
        .count();
    matching as f64 / records.len() as f64 * 100.0
}

/// `current - baseline` with a signed one-decimal display.
pub fn growth_delta(current: f64, baseline: f64) -> GrowthDelta {
    let delta = ((current - baseline) * 10.0).round() / 10.0;
    let display = if delta >= 0.0 {
        format!("+{:.1}%", delta.abs())
    } else {
        format!("{:.1}%", delta)
    };

    GrowthDelta {
        current,
        baseline,
        delta,
        display,
    }
}

// ============================================================================
// CHART SERIES
// ============================================================================

/// Builds the visual summary series.
///
/// - `Bar`: record count per group
/// - `Pie`: percentage share per group
/// - `Line`: record count per calendar month of `date_field`, chronological
///   (falls back to group counts when no date field is given)
pub fn chart_series<R: Record>(
    records: &[&R],
    chart_type: ChartType,
    group_by: R::Field,
    date_field: Option<R::Field>,
) -> ChartData {
    let points = match (chart_type, date_field) {
        (ChartType::Pie, _) => percentage_shares(group_counts(records, group_by))
            .into_iter()
            .map(|s| ChartPoint {
                label: s.key,
                value: s.percentage as f64,
            })
            .collect(),
        (ChartType::Line, Some(field)) => {
            let mut months: BTreeMap<String, usize> = BTreeMap::new();
            for record in records {
                if let Some(instant) = record.value(field).as_date() {
                    *months.entry(instant.format("%Y-%m").to_string()).or_default() += 1;
                }
            }
            months
                .into_iter()
                .map(|(label, count)| ChartPoint {
                    label,
                    value: count as f64,
                })
                .collect()
        }
        _ => group_counts(records, group_by)
            .into_iter()
            .map(|(label, count)| ChartPoint {
                label,
                value: count as f64,
            })
            .collect(),
    };

    ChartData { chart_type, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Order, OrderField, Provider, ProviderField};
    use serde_json::json;

    fn provider(id: &str, category: Option<&str>, rating: Option<f64>, active: bool) -> Provider {
        serde_json::from_value(json!({
            "id": id,
            "nombre": format!("Proveedor {}", id),
            "categoria": category,
            "calificacion": rating,
            "activo": active,
        }))
        .unwrap()
    }

    fn order(id: &str, date: &str, status: &str) -> Order {
        serde_json::from_value(json!({ "id": id, "fecha_pedido": date, "estado": status })).unwrap()
    }

    #[test]
    fn test_top_n_by_rating() {
        let providers: Vec<Provider> = [4.8, 4.2, 4.9, 3.0, 4.5]
            .iter()
            .enumerate()
            .map(|(i, r)| provider(&i.to_string(), None, Some(*r), true))
            .collect();
        let refs: Vec<&Provider> = providers.iter().collect();

        let top = top_n(&refs, ProviderField::Rating, 3);
        let scores: Vec<f64> = top.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![4.9, 4.8, 4.5]);
        assert_eq!(top[0].id(), "2");
    }

    #[test]
    fn test_top_n_ties_keep_first_seen() {
        let providers = vec![
            provider("a", None, Some(4.0), true),
            provider("b", None, Some(5.0), true),
            provider("c", None, Some(4.0), true),
        ];
        let refs: Vec<&Provider> = providers.iter().collect();
        let ids: Vec<&str> = top_n(&refs, ProviderField::Rating, 10).iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_top_n_with_nan_scores_does_not_panic() {
        let providers: Vec<Provider> = (0..40)
            .map(|i| {
                let mut p = provider(&i.to_string(), None, None, true);
                p.rating = Some(if i % 3 == 0 { f64::NAN } else { (i % 5) as f64 });
                p
            })
            .collect();
        let refs: Vec<&Provider> = providers.iter().collect();
        let top = top_n(&refs, ProviderField::Rating, 5);
        assert_eq!(top.len(), 5);
    }

    #[test]
    fn test_average_ignores_non_positive_ratings() {
        let providers = vec![
            provider("a", None, Some(4.0), true),
            provider("b", None, Some(0.0), true),
            provider("c", None, None, true),
            provider("d", None, Some(5.0), true),
        ];
        let refs: Vec<&Provider> = providers.iter().collect();
        let avg = average_rating(&refs, ProviderField::Rating);
        assert!(avg.has_data);
        assert_eq!(avg.samples, 2);
        assert_eq!(avg.value(), Some(4.5));
    }

    #[test]
    fn test_average_without_samples_is_flagged() {
        let providers = vec![provider("a", None, Some(0.0), true)];
        let refs: Vec<&Provider> = providers.iter().collect();
        let avg = average_rating(&refs, ProviderField::Rating);
        assert!(!avg.has_data);
        assert_eq!(avg.value, 0.0);
        assert_eq!(avg.value(), None);
    }

    #[test]
    fn test_percentages_zero_total() {
        let shares = percentage_shares(vec![("a".to_string(), 0), ("b".to_string(), 0)]);
        assert!(shares.iter().all(|s| s.percentage == 0));
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let partitions: Vec<Vec<usize>> = vec![
            vec![1, 1, 1],
            vec![1, 2, 3, 4, 5, 6, 7],
            vec![1, 1, 1, 1, 1, 1],
            vec![99, 1],
            vec![5],
            vec![3, 0, 3],
            vec![1; 40],
            vec![1; 7],
            (1..=30).collect(),
        ];
        for counts in partitions {
            let groups = counts
                .iter()
                .enumerate()
                .map(|(i, c)| (i.to_string(), *c))
                .collect();
            let sum: u32 = percentage_shares(groups).iter().map(|s| s.percentage).sum();
            assert_eq!(sum, 100, "counts {:?} summed to {}", counts, sum);
        }
    }

    #[test]
    fn test_percentages_many_equal_groups() {
        let groups = (0..40).map(|i| (i.to_string(), 1)).collect();
        let shares = percentage_shares(groups);
        let values: Vec<u32> = shares.iter().map(|s| s.percentage).collect();
        assert_eq!(values.iter().filter(|p| **p == 3).count(), 20);
        assert_eq!(values.iter().filter(|p| **p == 2).count(), 20);
        assert_eq!(values[0], 2);
        assert_eq!(values[39], 3);
    }

    #[test]
    fn test_percentages_largest_remainder_wins() {
        // 2/7 = 28.57, 4/7 = 57.14, 1/7 = 14.28
        let shares = percentage_shares(vec![
            ("a".to_string(), 2),
            ("b".to_string(), 4),
            ("c".to_string(), 1),
        ]);
        let values: Vec<u32> = shares.iter().map(|s| s.percentage).collect();
        assert_eq!(values, vec![29, 57, 14]);
    }

    #[test]
    fn test_percentages_round_each_group() {
        let shares = percentage_shares(vec![
            ("x".to_string(), 1),
            ("y".to_string(), 1),
            ("z".to_string(), 1),
        ]);
        let values: Vec<u32> = shares.iter().map(|s| s.percentage).collect();
        assert_eq!(values, vec![33, 33, 34]);
    }

    #[test]
    fn test_group_counts_use_placeholder_for_missing() {
        let providers = vec![
            provider("a", Some("Metales"), None, true),
            provider("b", None, None, true),
            provider("c", Some("Metales"), None, true),
        ];
        let refs: Vec<&Provider> = providers.iter().collect();
        assert_eq!(
            group_counts(&refs, ProviderField::Category),
            vec![("Metales".to_string(), 2), ("N/A".to_string(), 1)]
        );
    }

    #[test]
    fn test_growth_delta_display() {
        assert_eq!(growth_delta(80.0, 75.0).display, "+5.0%");
        assert_eq!(growth_delta(62.5, 75.0).display, "-12.5%");
        assert_eq!(growth_delta(75.0, 75.0).display, "+0.0%");
        assert_eq!(growth_delta(74.99, 75.0).display, "+0.0%");
    }

    #[test]
    fn test_summarize_orders() {
        let orders = vec![
            order("1", "2024-01-05", "pendiente"),
            order("2", "2024-02-10", "recibido"),
            order("3", "2024-03-20", "recibido"),
            order("4", "2024-03-22", "recibido"),
        ];
        let refs: Vec<&Order> = orders.iter().collect();
        let config = SummaryConfig::new(OrderField::Total, OrderField::Status)
            .with_top_n(2)
            .with_rating(OrderField::ProviderRating)
            .with_growth("recibido", 80.0);

        let result = summarize(&refs, &config);
        assert_eq!(result.count, 4);
        assert!(!result.average_rating.has_data);
        assert_eq!(result.top_n.len(), 2);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.percentage_of_total[0].key, "pendiente");
        assert_eq!(result.percentage_of_total[0].percentage, 25);
        assert_eq!(result.percentage_of_total[1].percentage, 75);
        assert_eq!(result.growth_delta.unwrap().display, "-5.0%");
    }

    #[test]
    fn test_line_chart_counts_per_month() {
        let orders = vec![
            order("1", "2024-03-02", "pendiente"),
            order("2", "2024-01-10", "recibido"),
            order("3", "2024-03-20", "recibido"),
        ];
        let refs: Vec<&Order> = orders.iter().collect();
        let chart = chart_series(&refs, ChartType::Line, OrderField::Status, Some(OrderField::OrderDate));
        let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-03"]);
        assert_eq!(chart.points[1].value, 2.0);

        let pie = chart_series(&refs, ChartType::Pie, OrderField::Status, None);
        assert_eq!(pie.points[0].label, "pendiente");
        assert_eq!(pie.points[0].value, 33.0);
    }
}
