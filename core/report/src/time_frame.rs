//! FILENAME: core/report/src/time_frame.rs
//! Reporting periods, resolved to calendar bounds against a given day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    #[default]
    All,
    Month,
    Quarter,
    Year,
    Custom,
}

/// Inclusive calendar bounds; `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateBounds {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

impl TimeFrame {
    /// Calendar bounds of the period that contains `today`. Period frames
    /// run from the first day of the period up to `today`; `Custom` uses the
    /// caller's dates as given.
    pub fn resolve(self, today: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateBounds {
        let period_start = match self {
            TimeFrame::All => return DateBounds::default(),
            TimeFrame::Custom => return DateBounds { from: start, to: end },
            TimeFrame::Month => today.with_day(1),
            TimeFrame::Quarter => {
                let first_month = (today.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), first_month, 1)
            }
            TimeFrame::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        };

        DateBounds {
            from: period_start,
            to: Some(today),
        }
    }
}
