//! Tri-state aggregation over a column of the preference matrix.
//!
//! Drives "select all" checkboxes: a column is checked when every row has
//! its flag on, indeterminate when only some do, unchecked otherwise.
//!
//! An empty row list is vacuously fully checked. That convention is
//! relied upon by callers and must not change.

use serde::{Deserialize, Serialize};

use super::{DeliveryMethod, PreferenceRow};

/// A column of the matrix: the master "enabled" flag or one delivery method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Enabled,
    Method(DeliveryMethod),
}

impl From<Option<DeliveryMethod>> for Column {
    fn from(method: Option<DeliveryMethod>) -> Self {
        match method {
            Some(method) => Column::Method(method),
            None => Column::Enabled,
        }
    }
}

impl From<DeliveryMethod> for Column {
    fn from(method: DeliveryMethod) -> Self {
        Column::Method(method)
    }
}

/// Visual state of a tri-state checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Checked,
    Unchecked,
    Indeterminate,
}

/// True iff every row has the column's flag on. Vacuously true when empty.
pub fn is_fully_checked(rows: &[PreferenceRow], column: Column) -> bool {
    rows.iter().all(|row| row.flag(column))
}

/// True iff at least one row has its master flag on.
pub fn has_any_checked(rows: &[PreferenceRow]) -> bool {
    rows.iter().any(|row| row.enabled)
}

/// True iff some, but not all, rows have the column's flag on.
pub fn is_indeterminate(rows: &[PreferenceRow], column: Column) -> bool {
    let checked = count_checked(rows, column);
    checked != 0 && checked != rows.len()
}

/// Collapses the predicates above into a single checkbox state.
pub fn check_state(rows: &[PreferenceRow], column: Column) -> CheckState {
    if is_fully_checked(rows, column) {
        CheckState::Checked
    } else if is_indeterminate(rows, column) {
        CheckState::Indeterminate
    } else {
        CheckState::Unchecked
    }
}

fn count_checked(rows: &[PreferenceRow], column: Column) -> usize {
    rows.iter().filter(|row| row.flag(column)).count()
}
