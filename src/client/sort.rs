//! In-memory ordering of the summary table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{FieldValue, PitchTypeSummary, SummaryField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Which column the table is sorted by, and which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SummaryField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SummaryField::PitchCount,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Header click: the current field flips direction, a new field starts descending.
    pub fn select(&mut self, field: SummaryField) {
        if field == self.field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    pub fn apply(&self, rows: &[PitchTypeSummary]) -> Vec<PitchTypeSummary> {
        sort_summaries(rows, self.field, self.direction)
    }
}

/// Absent numbers go last in either direction.
fn compare(a: FieldValue<'_>, b: FieldValue<'_>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => direction.apply(x.cmp(y)),
        (FieldValue::Number(Some(x)), FieldValue::Number(Some(y))) => {
            direction.apply(x.total_cmp(&y))
        }
        (FieldValue::Number(None), FieldValue::Number(Some(_))) => Ordering::Greater,
        (FieldValue::Number(Some(_)), FieldValue::Number(None)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Stable sort of `rows` by `field`; equal keys keep their input order.
pub fn sort_summaries(
    rows: &[PitchTypeSummary],
    field: SummaryField,
    direction: SortDirection,
) -> Vec<PitchTypeSummary> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| compare(a.field(field), b.field(field), direction));
    sorted
}
