//! Delivery methods and the catalog of user-editable methods.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A channel a notification can be delivered through.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    Web,
    Email,
    Sms,
    Slack,
    MicrosoftTeams,
    MobileApp,
}

/// Methods that are configured by administrators, never toggled per user.
const NON_EDITABLE: [DeliveryMethod; 2] = [DeliveryMethod::Slack, DeliveryMethod::MicrosoftTeams];

static STANDARD_CATALOG: Lazy<DeliveryMethodCatalog> =
    Lazy::new(|| DeliveryMethodCatalog::excluding(&NON_EDITABLE));

impl DeliveryMethod {
    /// Returns every delivery method in canonical order.
    pub fn all() -> &'static [DeliveryMethod] {
        &[
            DeliveryMethod::Web,
            DeliveryMethod::Email,
            DeliveryMethod::Sms,
            DeliveryMethod::Slack,
            DeliveryMethod::MicrosoftTeams,
            DeliveryMethod::MobileApp,
        ]
    }

    /// Returns the wire name (`WEB`, `MOBILE_APP`, ...).
    pub fn wire_name(&self) -> &'static str {
        match self {
            DeliveryMethod::Web => "WEB",
            DeliveryMethod::Email => "EMAIL",
            DeliveryMethod::Sms => "SMS",
            DeliveryMethod::Slack => "SLACK",
            DeliveryMethod::MicrosoftTeams => "MICROSOFT_TEAMS",
            DeliveryMethod::MobileApp => "MOBILE_APP",
        }
    }

    /// Parses a wire name. `None` for channels this build does not know.
    pub fn from_wire_name(name: &str) -> Option<DeliveryMethod> {
        DeliveryMethod::all()
            .iter()
            .copied()
            .find(|method| method.wire_name() == name)
    }

    /// Returns the translation key used to label this method.
    pub fn translation_key(&self) -> &'static str {
        match self {
            DeliveryMethod::Web => "notification.delivery-method.web",
            DeliveryMethod::Email => "notification.delivery-method.email",
            DeliveryMethod::Sms => "notification.delivery-method.sms",
            DeliveryMethod::Slack => "notification.delivery-method.slack",
            DeliveryMethod::MicrosoftTeams => "notification.delivery-method.microsoft-teams",
            DeliveryMethod::MobileApp => "notification.delivery-method.mobile-app",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Ordered set of delivery methods a user may toggle per notification type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryMethodCatalog {
    methods: Vec<DeliveryMethod>,
}

impl DeliveryMethodCatalog {
    /// The catalog used by the settings editor: everything except Slack and
    /// Microsoft Teams.
    pub fn standard() -> &'static DeliveryMethodCatalog {
        &STANDARD_CATALOG
    }

    /// Builds a catalog from the full enumeration minus `excluded`.
    pub fn excluding(excluded: &[DeliveryMethod]) -> Self {
        let methods = DeliveryMethod::all()
            .iter()
            .copied()
            .filter(|method| !excluded.contains(method))
            .collect();
        Self { methods }
    }

    pub fn methods(&self) -> &[DeliveryMethod] {
        &self.methods
    }

    pub fn contains(&self, method: DeliveryMethod) -> bool {
        self.methods.contains(&method)
    }

    /// Every catalog method mapped to `true`.
    pub fn default_enablement(&self) -> BTreeMap<DeliveryMethod, bool> {
        self.methods.iter().map(|method| (*method, true)).collect()
    }
}

impl Default for DeliveryMethodCatalog {
    fn default() -> Self {
        Self::standard().clone()
    }
}
