//! FILENAME: core/engine/src/sort.rs
//! PURPOSE: The sort stage of the report pipeline.
//! CONTEXT: Ordering is stable: records with equal keys keep their input
//! order for both directions, which downstream pagination relies on.
//! Keys are resolved once per record according to the field's declared type.

use crate::collation::CollationKey;
use crate::error::EngineError;
use crate::record::{Record, RecordField};
use crate::value::FieldType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SORT SPEC
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(EngineError::InvalidSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: RecordField> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        SortSpec { field, direction }
    }

    /// Resolves a wire key into a sort spec. Unknown keys are an error,
    /// never a silent fallback to some default order.
    pub fn parse(key: &str, direction: SortDirection) -> Result<Self, EngineError> {
        let field = F::parse(key).ok_or_else(|| EngineError::InvalidSortField {
            field: key.to_string(),
            kind: F::KIND,
        })?;
        Ok(SortSpec { field, direction })
    }
}

// ============================================================================
// SORT KEYS
// ============================================================================

/// A resolved, type-aware sort key.
#[derive(Debug, Clone)]
enum SortKey {
    /// Missing numbers count as zero.
    Number(f64),
    /// Missing dates sort before every present date.
    Date(Option<NaiveDateTime>),
    Text(CollationKey),
    Bool(bool),
}

impl SortKey {
    fn resolve<R: Record>(record: &R, field: R::Field) -> SortKey {
        let value = record.value(field);
        match field.field_type() {
            FieldType::Number => SortKey::Number(value.as_number().unwrap_or(0.0)),
            FieldType::Date => SortKey::Date(value.as_date()),
            FieldType::Text => SortKey::Text(CollationKey::new(value.as_text().unwrap_or(""))),
            FieldType::Bool => SortKey::Bool(matches!(value, crate::value::FieldValue::Bool(true))),
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            // One field always yields one key variant.
            _ => Ordering::Equal,
        }
    }
}

/// Sorts records by one field. Stable in both directions; direction only
/// flips the comparator result.
pub fn apply<'a, R: Record>(records: Vec<&'a R>, spec: &SortSpec<R::Field>) -> Vec<&'a R> {
    let mut keyed: Vec<(SortKey, &'a R)> = records
        .into_iter()
        .map(|r| (SortKey::resolve(r, spec.field), r))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare(b);
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    log::debug!(
        "sorted {} records by {} {}",
        keyed.len(),
        spec.field.key(),
        spec.direction
    );
    keyed.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderField;
    use crate::provider::{Provider, ProviderField};
    use crate::record::RecordKind;

    fn provider(id: &str, name: Option<&str>, rating: Option<f64>, registered: Option<&str>) -> Provider {
        Provider {
            id: id.to_string(),
            name: name.map(str::to_string),
            contact: None,
            email: None,
            phone: None,
            address: None,
            category: None,
            rating,
            delivery_days: None,
            active: true,
            registered_at: registered.and_then(crate::timestamp::parse_timestamp),
        }
    }

    fn ids(records: &[&Provider]) -> Vec<String> {
        records.iter().map(|p| p.id.clone()).collect()
    }

    fn sample() -> Vec<Provider> {
        vec![
            provider("a", Some("Zeta"), Some(4.0), Some("2024-03-01")),
            provider("b", Some("Ésika"), None, None),
            provider("c", Some("alfa"), Some(4.0), Some("2023-12-31")),
            provider("d", Some("Beta"), Some(2.5), Some("2024-01-15")),
        ]
    }

    #[test]
    fn test_text_sort_is_accent_aware() {
        let providers = sample();
        let spec = SortSpec::new(ProviderField::Name, SortDirection::Asc);
        let sorted = apply(providers.iter().collect(), &spec);
        assert_eq!(ids(&sorted), vec!["c", "d", "b", "a"]);
    }

    #[test]
    fn test_missing_numbers_count_as_zero() {
        let providers = sample();
        let spec = SortSpec::new(ProviderField::Rating, SortDirection::Asc);
        let sorted = apply(providers.iter().collect(), &spec);
        assert_eq!(ids(&sorted), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let providers = sample();
        let desc = SortSpec::new(ProviderField::Rating, SortDirection::Desc);
        // "a" and "c" tie at 4.0 and keep their input order.
        assert_eq!(ids(&apply(providers.iter().collect(), &desc)), vec!["a", "c", "d", "b"]);

        let reversed_input: Vec<&Provider> = providers.iter().rev().collect();
        assert_eq!(ids(&apply(reversed_input, &desc)), vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_dates_compare_by_instant_with_missing_first() {
        let providers = sample();
        let spec = SortSpec::new(ProviderField::RegisteredAt, SortDirection::Asc);
        assert_eq!(ids(&apply(providers.iter().collect(), &spec)), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_nan_scores_sort_last_without_panicking() {
        let providers: Vec<Provider> = (0..40)
            .map(|i| {
                let rating = if i % 3 == 0 { f64::NAN } else { (i % 5) as f64 };
                provider(&i.to_string(), None, Some(rating), None)
            })
            .collect();
        let spec = SortSpec::new(ProviderField::Rating, SortDirection::Asc);
        let sorted = apply(providers.iter().collect(), &spec);

        assert_eq!(sorted.len(), 40);
        let ratings: Vec<f64> = sorted.iter().filter_map(|p| p.rating).collect();
        let finite: Vec<f64> = ratings.iter().copied().take_while(|r| !r.is_nan()).collect();
        assert_eq!(finite.len(), 26);
        assert!(finite.windows(2).all(|w| w[0] <= w[1]));
        assert!(ratings[26..].iter().all(|r| r.is_nan()));
    }

    #[test]
    fn test_unknown_sort_field_is_rejected() {
        let err = SortSpec::<ProviderField>::parse("fecha_pedido", SortDirection::Asc).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidSortField {
                field: "fecha_pedido".to_string(),
                kind: RecordKind::Provider,
            }
        );
        assert!(SortSpec::<OrderField>::parse("fecha_pedido", SortDirection::Desc).is_ok());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!(matches!(
            "down".parse::<SortDirection>(),
            Err(EngineError::InvalidSortDirection(_))
        ));
    }
}
