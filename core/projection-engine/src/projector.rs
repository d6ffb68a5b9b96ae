//! FILENAME: core/projection-engine/src/projector.rs
//! Projector - Maps records onto the selected columns.
//!
//! The column set depends only on the projection settings, never on the data, so every row
//! of one projection has the same ordered labels.

use engine::{RecordField, PLACEHOLDER};

use crate::columns::{Column, ColumnGroup, Projectable};
use crate::definition::ProjectionSpec;
use crate::view::{ProjectedCell, ProjectedRow, ProjectedValue, Projection};

/// Columns of `R` selected by `spec`, in display order.
pub fn selected_columns<R: Projectable>(spec: &ProjectionSpec) -> Vec<Column<R>> {
    R::columns()
        .into_iter()
        .filter(|c| match c.group {
            ColumnGroup::Base => true,
            ColumnGroup::Detail => spec.includes_detail(),
            ColumnGroup::Section(section) => spec.includes(section),
        })
        .collect()
}

/// Projects records into labelled rows.
pub fn project<R: Projectable>(records: &[&R], spec: &ProjectionSpec) -> Projection {
    let columns = selected_columns::<R>(spec);
    let labels: Vec<String> = columns.iter().map(|c| c.label.to_string()).collect();
    let mut placeholders = 0usize;

    let rows = records
        .iter()
        .map(|record| {
            let cells = columns
                .iter()
                .map(|column| {
                    let value = (column.extract)(record, spec.locale).unwrap_or_else(|| {
                        placeholders += 1;
                        ProjectedValue::Text(PLACEHOLDER.to_string())
                    });
                    ProjectedCell {
                        label: column.label.to_string(),
                        value,
                    }
                })
                .collect();
            ProjectedRow { cells }
        })
        .collect::<Vec<_>>();

    if placeholders > 0 {
        log::warn!(
            "{} missing values in {} {} rows rendered as {}",
            placeholders,
            rows.len(),
            <R::Field as RecordField>::KIND,
            PLACEHOLDER
        );
    }
    log::debug!("projected {} rows x {} columns", rows.len(), labels.len());

    Projection { labels, rows }
}
