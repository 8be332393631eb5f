//! SettingsCodec - keyed wire format <-> ordered editable rows.
//!
//! The store exchanges `{ "prefs": { "<type>": { "enabled", "enabledDeliveryMethods" } } }`.
//! Editing happens on an ordered list of [`PreferenceRow`]s instead. Row
//! order follows the order of keys in the wire object.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::HashSet;

use super::{DeliveryMethod, DeliveryMethodCatalog, PreferenceError, PreferenceRow};

/// Wire mapping from notification type name to its raw preference record.
pub type WirePrefs = Map<String, Value>;

/// Envelope exchanged with the settings store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationUserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefs: Option<WirePrefs>,
}

impl NotificationUserSettings {
    pub fn new(prefs: WirePrefs) -> Self {
        Self { prefs: Some(prefs) }
    }
}

/// One notification type as it appears on the wire, without its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPreference {
    pub enabled: bool,
    #[serde(default, deserialize_with = "known_methods")]
    pub enabled_delivery_methods: BTreeMap<DeliveryMethod, bool>,
}

/// Keeps the method names this build knows and drops the rest, so a channel
/// added on the server does not fail the whole payload.
fn known_methods<'de, D>(deserializer: D) -> Result<BTreeMap<DeliveryMethod, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let methods = BTreeMap::<String, bool>::deserialize(deserializer)?;
    Ok(methods
        .into_iter()
        .filter_map(|(name, enabled)| {
            DeliveryMethod::from_wire_name(&name).map(|method| (method, enabled))
        })
        .collect())
}

/// Converts between the wire mapping and the editable row list.
#[derive(Debug, Clone, Default)]
pub struct SettingsCodec {
    catalog: DeliveryMethodCatalog,
}

impl SettingsCodec {
    pub fn new(catalog: DeliveryMethodCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DeliveryMethodCatalog {
        &self.catalog
    }

    /// Decodes every entry of `prefs` into a row, completing each method map
    /// with the catalog defaults.
    ///
    /// # Errors
    ///
    /// `PreferenceError::MalformedSettings` for the first value that is not a
    /// well-formed preference record. Nothing is skipped.
    pub fn decode(&self, prefs: &WirePrefs) -> Result<Vec<PreferenceRow>, PreferenceError> {
        prefs
            .iter()
            .map(|(name, value)| {
                let raw = RawPreference::deserialize(value)
                    .map_err(|e| PreferenceError::malformed(name.as_str(), e.to_string()))?;
                Ok(self.complete_row(name, raw))
            })
            .collect()
    }

    /// Decodes a settings envelope. Missing `prefs` yields no rows.
    pub fn decode_settings(
        &self,
        settings: &NotificationUserSettings,
    ) -> Result<Vec<PreferenceRow>, PreferenceError> {
        match &settings.prefs {
            Some(prefs) => self.decode(prefs),
            None => Ok(Vec::new()),
        }
    }

    /// Encodes rows back into the wire mapping, keyed by row name.
    ///
    /// # Errors
    ///
    /// `PreferenceError::DuplicateName` if two rows share a name.
    pub fn encode(&self, rows: &[PreferenceRow]) -> Result<WirePrefs, PreferenceError> {
        let mut prefs = WirePrefs::new();
        for row in rows {
            if prefs.contains_key(&row.name) {
                return Err(PreferenceError::DuplicateName(row.name.clone()));
            }
            let raw = RawPreference {
                enabled: row.enabled,
                enabled_delivery_methods: row.enabled_delivery_methods.clone(),
            };
            let value = serde_json::to_value(&raw)
                .map_err(|e| PreferenceError::Serialization(e.to_string()))?;
            prefs.insert(row.name.clone(), value);
        }
        Ok(prefs)
    }

    /// Encodes rows into a settings envelope ready for the store.
    pub fn encode_settings(
        &self,
        rows: &[PreferenceRow],
    ) -> Result<NotificationUserSettings, PreferenceError> {
        self.encode(rows).map(NotificationUserSettings::new)
    }

    /// Source values win, catalog defaults fill gaps, non-catalog methods are dropped.
    fn complete_row(&self, name: &str, raw: RawPreference) -> PreferenceRow {
        let mut methods = self.catalog.default_enablement();
        for (method, enabled) in raw.enabled_delivery_methods {
            if let Some(slot) = methods.get_mut(&method) {
                *slot = enabled;
            }
        }
        PreferenceRow {
            name: name.to_string(),
            enabled: raw.enabled,
            enabled_delivery_methods: methods,
        }
    }
}

/// Returns the first name that occurs more than once.
pub(crate) fn first_duplicate(rows: &[PreferenceRow]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .map(|row| row.name.as_str())
        .find(|name| !seen.insert(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn codec() -> SettingsCodec {
        SettingsCodec::default()
    }

    fn prefs(value: Value) -> WirePrefs {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn decode_merges_catalog_defaults_under_source_values() {
        let wire = prefs(json!({
            "A": { "enabled": true, "enabledDeliveryMethods": { "EMAIL": false } }
        }));

        let rows = codec().decode(&wire).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.name, "A");
        assert!(row.enabled);
        assert_eq!(row.enabled_delivery_methods.get(&DeliveryMethod::Email), Some(&false));
        assert_eq!(row.enabled_delivery_methods.get(&DeliveryMethod::Web), Some(&true));
        assert_eq!(row.enabled_delivery_methods.get(&DeliveryMethod::Sms), Some(&true));
        assert_eq!(row.enabled_delivery_methods.get(&DeliveryMethod::MobileApp), Some(&true));
    }

    #[test]
    fn decode_with_two_method_catalog_matches_scenario() {
        let codec = SettingsCodec::new(DeliveryMethodCatalog::excluding(&[
            DeliveryMethod::Web,
            DeliveryMethod::Sms,
            DeliveryMethod::Slack,
            DeliveryMethod::MicrosoftTeams,
        ]));
        let wire = prefs(json!({
            "A": { "enabled": true, "enabledDeliveryMethods": { "EMAIL": false } }
        }));

        let rows = codec.decode(&wire).unwrap();

        let expected: BTreeMap<_, _> =
            [(DeliveryMethod::Email, false), (DeliveryMethod::MobileApp, true)].into();
        assert_eq!(rows[0].enabled_delivery_methods, expected);
    }

    #[test]
    fn decode_drops_methods_outside_the_catalog() {
        let wire = prefs(json!({
            "A": { "enabled": false, "enabledDeliveryMethods": { "SLACK": true, "SMS": false } }
        }));

        let rows = codec().decode(&wire).unwrap();

        assert!(!rows[0].enabled_delivery_methods.contains_key(&DeliveryMethod::Slack));
        assert!(rows[0].matches_catalog(DeliveryMethodCatalog::standard()));
        assert_eq!(rows[0].enabled_delivery_methods.get(&DeliveryMethod::Sms), Some(&false));
    }

    #[test]
    fn decode_defaults_missing_method_map() {
        let wire = prefs(json!({ "A": { "enabled": false } }));

        let rows = codec().decode(&wire).unwrap();

        assert!(!rows[0].enabled);
        assert!(rows[0].enabled_delivery_methods.values().all(|on| *on));
    }

    #[test]
    fn decode_preserves_wire_key_order() {
        let wire = prefs(json!({
            "RULE_ENGINE": { "enabled": true },
            "ALARM": { "enabled": true },
            "GENERAL": { "enabled": true }
        }));

        let names: Vec<_> = codec()
            .decode(&wire)
            .unwrap()
            .into_iter()
            .map(|row| row.name)
            .collect();

        assert_eq!(names, vec!["RULE_ENGINE", "ALARM", "GENERAL"]);
    }

    #[test]
    fn decode_rejects_non_object_value() {
        let wire = prefs(json!({ "A": { "enabled": true }, "B": 42 }));

        let err = codec().decode(&wire).unwrap_err();
        assert!(matches!(err, PreferenceError::MalformedSettings { ref name, .. } if name == "B"));
    }

    #[test]
    fn decode_rejects_missing_enabled_flag() {
        let wire = prefs(json!({ "A": { "enabledDeliveryMethods": {} } }));

        let err = codec().decode(&wire).unwrap_err();
        assert!(matches!(err, PreferenceError::MalformedSettings { .. }));
    }

    #[test]
    fn decode_drops_unknown_method_names() {
        let wire = prefs(json!({
            "A": {
                "enabled": true,
                "enabledDeliveryMethods": { "CARRIER_PIGEON": true, "EMAIL": false }
            }
        }));

        let rows = codec().decode(&wire).unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].matches_catalog(DeliveryMethodCatalog::standard()));
        assert_eq!(rows[0].enabled_delivery_methods.get(&DeliveryMethod::Email), Some(&false));
        assert_eq!(rows[0].enabled_delivery_methods.get(&DeliveryMethod::Web), Some(&true));
    }

    #[test]
    fn decode_rejects_non_boolean_method_flag() {
        let wire = prefs(json!({
            "A": { "enabled": true, "enabledDeliveryMethods": { "EMAIL": "yes" } }
        }));

        assert!(matches!(
            codec().decode(&wire),
            Err(PreferenceError::MalformedSettings { .. })
        ));
    }

    #[test]
    fn decode_settings_without_prefs_is_empty() {
        let rows = codec()
            .decode_settings(&NotificationUserSettings::default())
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn encode_strips_name_and_keys_by_it() {
        let row = PreferenceRow::fully_enabled("ALARM", DeliveryMethodCatalog::standard());

        let wire = codec().encode(&[row]).unwrap();

        assert_eq!(
            Value::Object(wire),
            json!({
                "ALARM": {
                    "enabled": true,
                    "enabledDeliveryMethods": {
                        "WEB": true, "EMAIL": true, "SMS": true, "MOBILE_APP": true
                    }
                }
            })
        );
    }

    #[test]
    fn encode_rejects_duplicate_names() {
        let catalog = DeliveryMethodCatalog::standard();
        let rows = vec![
            PreferenceRow::fully_enabled("ALARM", catalog),
            PreferenceRow::fully_enabled("ALARM", catalog),
        ];

        let err = codec().encode(&rows).unwrap_err();
        assert_eq!(err, PreferenceError::DuplicateName("ALARM".to_string()));
    }

    #[test]
    fn settings_envelope_omits_absent_prefs() {
        let json = serde_json::to_value(NotificationUserSettings::default()).unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn first_duplicate_finds_repeated_name() {
        let catalog = DeliveryMethodCatalog::standard();
        let rows = vec![
            PreferenceRow::fully_enabled("A", catalog),
            PreferenceRow::fully_enabled("B", catalog),
            PreferenceRow::fully_enabled("A", catalog),
        ];
        assert_eq!(first_duplicate(&rows), Some("A"));
        assert_eq!(first_duplicate(&rows[..2]), None);
    }

    fn method_strategy() -> impl Strategy<Value = DeliveryMethod> {
        prop::sample::select(DeliveryMethodCatalog::standard().methods().to_vec())
    }

    proptest! {
        #[test]
        fn encode_decode_round_trip_completes_method_maps(
            entries in prop::collection::btree_map(
                "[A-Z_]{1,12}",
                (any::<bool>(), prop::collection::btree_map(method_strategy(), any::<bool>(), 0..4)),
                0..8,
            )
        ) {
            let codec = codec();
            let mut wire = WirePrefs::new();
            for (name, (enabled, methods)) in &entries {
                let raw = RawPreference { enabled: *enabled, enabled_delivery_methods: methods.clone() };
                wire.insert(name.clone(), serde_json::to_value(raw).unwrap());
            }

            let encoded = codec.encode(&codec.decode(&wire).unwrap()).unwrap();

            prop_assert_eq!(encoded.len(), wire.len());
            for (name, (enabled, methods)) in &entries {
                let raw = RawPreference::deserialize(&encoded[name]).unwrap();
                prop_assert_eq!(raw.enabled, *enabled);
                for method in DeliveryMethodCatalog::standard().methods() {
                    let expected = methods.get(method).copied().unwrap_or(true);
                    prop_assert_eq!(raw.enabled_delivery_methods.get(method).copied(), Some(expected));
                }
            }
        }
    }
}
