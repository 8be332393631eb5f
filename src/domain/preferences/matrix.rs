//! PreferenceMatrix - the editable (notification type x delivery method) grid.
//!
//! # Invariants
//!
//! - Row names are unique.
//! - Every row's method map holds exactly the catalog's methods.
//! - Writes are computed on a cloned row list and committed in one swap,
//!   so a reader never sees a half-applied batch.

use super::aggregate::{self, CheckState, Column};
use super::codec::first_duplicate;
use super::{DeliveryMethod, DeliveryMethodCatalog, PreferenceError, PreferenceRow};

/// Ordered preference rows plus an unsaved-changes flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceMatrix {
    catalog: DeliveryMethodCatalog,
    rows: Vec<PreferenceRow>,
    dirty: bool,
}

impl PreferenceMatrix {
    /// Creates an empty, pristine matrix over `catalog`.
    pub fn new(catalog: DeliveryMethodCatalog) -> Self {
        Self {
            catalog,
            rows: Vec::new(),
            dirty: false,
        }
    }

    pub fn rows(&self) -> &[PreferenceRow] {
        &self.rows
    }

    pub fn row(&self, name: &str) -> Option<&PreferenceRow> {
        self.rows.iter().find(|row| row.name == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_pristine(&mut self) {
        self.dirty = false;
    }

    /// Swaps in a whole new row list.
    ///
    /// The input is validated first; on error the current rows are kept.
    /// The dirty flag is left as is.
    ///
    /// # Errors
    ///
    /// - `DuplicateName` when two rows share a name.
    /// - `MalformedSettings` when a row's method map differs from the catalog.
    pub fn replace_all(&mut self, rows: Vec<PreferenceRow>) -> Result<(), PreferenceError> {
        if let Some(name) = first_duplicate(&rows) {
            return Err(PreferenceError::DuplicateName(name.to_string()));
        }
        if let Some(row) = rows.iter().find(|row| !row.matches_catalog(&self.catalog)) {
            return Err(PreferenceError::malformed(
                row.name.as_str(),
                "delivery methods do not match the editable catalog",
            ));
        }
        self.rows = rows;
        Ok(())
    }

    /// Sets one row's master switch.
    pub fn set_row_enabled(&mut self, name: &str, value: bool) -> Result<(), PreferenceError> {
        self.set_cell(name, Column::Enabled, value)
    }

    /// Sets one row's flag for a single delivery method.
    pub fn set_cell_enabled(
        &mut self,
        name: &str,
        method: DeliveryMethod,
        value: bool,
    ) -> Result<(), PreferenceError> {
        self.ensure_editable(method)?;
        self.set_cell(name, Column::Method(method), value)
    }

    /// Sets `column` to `value` on every row.
    pub fn set_column_enabled(
        &mut self,
        column: Column,
        value: bool,
    ) -> Result<(), PreferenceError> {
        if let Column::Method(method) = column {
            self.ensure_editable(method)?;
        }
        let mut next = self.rows.clone();
        for row in &mut next {
            row.set_flag(column, value);
        }
        self.commit(next);
        Ok(())
    }

    pub fn is_fully_checked(&self, column: Column) -> bool {
        aggregate::is_fully_checked(&self.rows, column)
    }

    pub fn has_any_checked(&self) -> bool {
        aggregate::has_any_checked(&self.rows)
    }

    pub fn is_indeterminate(&self, column: Column) -> bool {
        aggregate::is_indeterminate(&self.rows, column)
    }

    pub fn check_state(&self, column: Column) -> CheckState {
        aggregate::check_state(&self.rows, column)
    }

    fn set_cell(&mut self, name: &str, column: Column, value: bool) -> Result<(), PreferenceError> {
        let index = self
            .rows
            .iter()
            .position(|row| row.name == name)
            .ok_or_else(|| PreferenceError::UnknownRow(name.to_string()))?;
        let mut next = self.rows.clone();
        next[index].set_flag(column, value);
        self.commit(next);
        Ok(())
    }

    fn ensure_editable(&self, method: DeliveryMethod) -> Result<(), PreferenceError> {
        if self.catalog.contains(method) {
            Ok(())
        } else {
            Err(PreferenceError::UnsupportedMethod(method))
        }
    }

    fn commit(&mut self, rows: Vec<PreferenceRow>) {
        self.rows = rows;
        self.dirty = true;
    }
}
