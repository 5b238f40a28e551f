use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::report::Report;

/// Direction of the "updated" column. `Desc` shows the newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Asc => "oldest first",
            SortDirection::Desc => "newest first",
        }
    }
}

/// Return a copy of `reports` ordered by their `updated` timestamp.
///
/// Reports with a valid date always come before reports without one,
/// whichever the direction. Reports that tie (equal dates, or no date on
/// either side) keep their input order.
pub fn sort_by_updated(reports: &[Report], direction: SortDirection) -> Vec<Report> {
    let mut sorted = reports.to_vec();
    sorted.sort_by(|a, b| compare_updated(a, b, direction));
    sorted
}

fn compare_updated(a: &Report, b: &Report, direction: SortDirection) -> Ordering {
    match (a.updated_at, b.updated_at) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Asc => x.cmp(&y),
            SortDirection::Desc => y.cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
