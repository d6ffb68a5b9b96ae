//! FILENAME: core/engine/src/filter.rs
//! PURPOSE: The filter stage of the report pipeline.
//! CONTEXT: A `FilterSpec` is a value object holding optional predicates.
//! All configured predicates are ANDed; there is no OR and no negation.
//! Unset predicates and the `"all"` sentinel never exclude a record, and a
//! record lacking the data a predicate needs simply does not match it.

use crate::error::EngineError;
use crate::record::{Record, RecordField};
use crate::value::{FieldType, FieldValue};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sentinel meaning "no constraint" in selections coming from settings.
pub const ALL: &str = "all";

// ============================================================================
// SELECTION
// ============================================================================

/// Equality constraint with an explicit "all" case.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Exact, case-sensitive match. A missing value only matches `All`.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => value == Some(expected.as_str()),
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL {
            Selection::All
        } else {
            Selection::Only(trimmed.to_string())
        }
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        match value {
            Selection::All => ALL.to_string(),
            Selection::Only(v) => v,
        }
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Selection::from(s.to_string()))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(v) => f.write_str(v),
        }
    }
}

// ============================================================================
// PREDICATES
// ============================================================================

/// Calendar-date range. Both ends are inclusive from the user's point of
/// view; internally `to` becomes the start of the following day.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange<F> {
    pub field: F,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl<F> DateRange<F> {
    fn lower_bound(&self) -> Option<NaiveDateTime> {
        self.from.and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn upper_bound_exclusive(&self) -> Option<NaiveDateTime> {
        self.to
            .and_then(|d| d.succ_opt())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn contains(&self, instant: NaiveDateTime) -> bool {
        let after_start = self.lower_bound().map_or(true, |start| start <= instant);
        let before_end = self.upper_bound_exclusive().map_or(true, |end| instant < end);
        after_start && before_end
    }

    fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Case-insensitive substring search over one or more fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeText<F> {
    pub query: String,
    pub fields: Vec<F>,
}

/// Inclusive numeric bounds on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericRange<F> {
    pub field: F,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

// ============================================================================
// FILTER SPEC
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec<F> {
    pub date_range: Option<DateRange<F>>,
    pub status: Selection,
    pub foreign_keys: Vec<(F, Selection)>,
    pub free_text: Option<FreeText<F>>,
    pub numeric_range: Option<NumericRange<F>>,
}

impl<F> Default for FilterSpec<F> {
    fn default() -> Self {
        FilterSpec {
            date_range: None,
            status: Selection::All,
            foreign_keys: Vec::new(),
            free_text: None,
            numeric_range: None,
        }
    }
}

impl<F: RecordField> FilterSpec<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, field: F, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_range = Some(DateRange { field, from, to });
        self
    }

    pub fn with_status(mut self, status: Selection) -> Self {
        self.status = status;
        self
    }

    pub fn with_foreign_key(mut self, field: F, selection: Selection) -> Self {
        self.foreign_keys.push((field, selection));
        self
    }

    pub fn with_free_text(mut self, query: impl Into<String>, fields: Vec<F>) -> Self {
        self.free_text = Some(FreeText {
            query: query.into(),
            fields,
        });
        self
    }

    pub fn with_numeric_range(mut self, field: F, min: Option<f64>, max: Option<f64>) -> Self {
        self.numeric_range = Some(NumericRange { field, min, max });
        self
    }

    /// Rejects predicates that target a field of the wrong type or carry
    /// inverted bounds. Runs before any record is looked at.
    pub fn validate(&self) -> Result<(), EngineError> {
        if let Some(range) = &self.date_range {
            expect_type(range.field, FieldType::Date)?;
            if let (Some(from), Some(to)) = (range.from, range.to) {
                if from > to {
                    return Err(EngineError::InvalidRange(format!(
                        "{} starts on {} after it ends on {}",
                        range.field.key(),
                        from,
                        to
                    )));
                }
            }
        }

        if let Some(range) = &self.numeric_range {
            expect_type(range.field, FieldType::Number)?;
            if let (Some(min), Some(max)) = (range.min, range.max) {
                if min > max {
                    return Err(EngineError::InvalidRange(format!(
                        "{} minimum {} exceeds maximum {}",
                        range.field.key(),
                        min,
                        max
                    )));
                }
            }
        }

        Ok(())
    }

    /// Whether a record passes every configured predicate.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Record<Field = F>,
    {
        self.matches_date(record)
            && self.status.matches(record.status_key())
            && self.matches_foreign_keys(record)
            && self.matches_free_text(record)
            && self.matches_numeric(record)
    }

    fn matches_date<R: Record<Field = F>>(&self, record: &R) -> bool {
        match &self.date_range {
            None => true,
            Some(range) if range.is_unbounded() => true,
            Some(range) => record
                .value(range.field)
                .as_date()
                .map_or(false, |instant| range.contains(instant)),
        }
    }

    fn matches_foreign_keys<R: Record<Field = F>>(&self, record: &R) -> bool {
        self.foreign_keys.iter().all(|(field, selection)| {
            selection.is_all() || selection.matches(record.value(*field).as_text())
        })
    }

    fn matches_free_text<R: Record<Field = F>>(&self, record: &R) -> bool {
        let Some(search) = &self.free_text else {
            return true;
        };
        let needle = search.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        search.fields.iter().any(|field| match record.value(*field) {
            FieldValue::Empty => false,
            value => value.display_value().to_lowercase().contains(&needle),
        })
    }

    fn matches_numeric<R: Record<Field = F>>(&self, record: &R) -> bool {
        let Some(range) = &self.numeric_range else {
            return true;
        };
        if range.min.is_none() && range.max.is_none() {
            return true;
        }

        match record.value(range.field).as_number() {
            Some(n) => range.min.map_or(true, |min| n >= min) && range.max.map_or(true, |max| n <= max),
            None => false,
        }
    }
}

fn expect_type<F: RecordField>(field: F, expected: FieldType) -> Result<(), EngineError> {
    let actual = field.field_type();
    if actual == expected {
        Ok(())
    } else {
        Err(EngineError::FieldTypeMismatch {
            field: field.key(),
            expected,
            actual,
        })
    }
}

/// Keeps the records that pass `spec`, preserving input order. Input records
/// are only borrowed.
pub fn apply<'a, R, I>(records: I, spec: &FilterSpec<R::Field>) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let kept: Vec<&'a R> = records.into_iter().filter(|r| spec.matches(*r)).collect();
    log::debug!("filter kept {} {} records", kept.len(), <R::Field as RecordField>::KIND);
    kept
}
