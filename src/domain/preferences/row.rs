//! PreferenceRow - one notification type in the preference matrix.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Column, DeliveryMethod, DeliveryMethodCatalog};

/// Enablement of a single notification type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRow {
    /// Notification type name; unique within a matrix and used as wire key.
    pub name: String,
    /// Master switch for the type.
    pub enabled: bool,
    /// Per-method enablement, one entry per catalog method.
    pub enabled_delivery_methods: BTreeMap<DeliveryMethod, bool>,
}

impl PreferenceRow {
    /// Creates a row with every flag on.
    pub fn fully_enabled(name: impl Into<String>, catalog: &DeliveryMethodCatalog) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            enabled_delivery_methods: catalog.default_enablement(),
        }
    }

    /// Returns the flag behind `column`. A method missing from the map reads as `false`.
    pub fn flag(&self, column: Column) -> bool {
        match column {
            Column::Enabled => self.enabled,
            Column::Method(method) => self
                .enabled_delivery_methods
                .get(&method)
                .copied()
                .unwrap_or(false),
        }
    }

    /// Sets the flag behind `column`.
    pub fn set_flag(&mut self, column: Column, value: bool) {
        match column {
            Column::Enabled => self.enabled = value,
            Column::Method(method) => {
                self.enabled_delivery_methods.insert(method, value);
            }
        }
    }

    /// True when the method map holds exactly the catalog's methods.
    pub fn matches_catalog(&self, catalog: &DeliveryMethodCatalog) -> bool {
        self.enabled_delivery_methods.len() == catalog.methods().len()
            && catalog
                .methods()
                .iter()
                .all(|method| self.enabled_delivery_methods.contains_key(method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_enabled_row_has_every_catalog_method_on() {
        let catalog = DeliveryMethodCatalog::standard();
        let row = PreferenceRow::fully_enabled("ALARM", catalog);

        assert!(row.enabled);
        assert!(row.matches_catalog(catalog));
        assert!(catalog
            .methods()
            .iter()
            .all(|method| row.flag(Column::Method(*method))));
    }

    #[test]
    fn missing_method_reads_as_unchecked() {
        let mut row = PreferenceRow::fully_enabled("ALARM", DeliveryMethodCatalog::standard());
        row.enabled_delivery_methods.remove(&DeliveryMethod::Sms);

        assert!(!row.flag(Column::Method(DeliveryMethod::Sms)));
        assert!(!row.matches_catalog(DeliveryMethodCatalog::standard()));
    }

    #[test]
    fn set_flag_targets_the_right_column() {
        let mut row = PreferenceRow::fully_enabled("ALARM", DeliveryMethodCatalog::standard());

        row.set_flag(Column::Enabled, false);
        row.set_flag(Column::Method(DeliveryMethod::Email), false);

        assert!(!row.enabled);
        assert!(!row.flag(Column::Method(DeliveryMethod::Email)));
        assert!(row.flag(Column::Method(DeliveryMethod::Web)));
    }
}
