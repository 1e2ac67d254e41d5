use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SettingKey {
    ShowAllergensInsteadOfHiding,
}

impl SettingKey {
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::ShowAllergensInsteadOfHiding => "Allergene nur anzeigen",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SettingKey::ShowAllergensInsteadOfHiding => {
                "Allergene nur anzeigen, statt Gerichte auszublenden"
            }
        }
    }

    pub fn default_value(&self) -> bool {
        match self {
            SettingKey::ShowAllergensInsteadOfHiding => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub name: String,
    pub description: String,
    pub value: bool,
}

impl From<SettingKey> for Setting {
    fn from(key: SettingKey) -> Self {
        Self {
            name: key.name().to_owned(),
            description: key.description().to_owned(),
            value: key.default_value(),
        }
    }
}

/// One entry per recognized [`SettingKey`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<SettingKey, Setting>);

impl Default for Settings {
    fn default() -> Self {
        Self(
            SettingKey::VARIANTS
                .iter()
                .map(|key| (*key, Setting::from(*key)))
                .collect(),
        )
    }
}

impl Settings {
    /// Applies persisted values over the defaults. Unrecognized keys are
    /// dropped, a malformed document leaves the defaults in place. Values may
    /// be stored as `{"value": bool, ...}` records or as bare booleans.
    pub fn parse(raw: &str) -> Self {
        let mut settings = Self::default();

        let persisted: BTreeMap<String, serde_json::Value> = match serde_json::from_str(raw) {
            Ok(persisted) => persisted,
            Err(err) => {
                tracing::warn!(%err, "ignoring malformed settings");
                return settings;
            }
        };

        for (key, value) in persisted {
            let Ok(key) = SettingKey::from_str(&key) else {
                tracing::debug!(%key, "dropping unrecognized setting");
                continue;
            };

            let value = value
                .as_bool()
                .or_else(|| value.get("value").and_then(serde_json::Value::as_bool));
            match value {
                Some(value) => {
                    settings.set(key, value);
                }
                None => tracing::warn!(%key, "ignoring setting without boolean value"),
            }
        }

        settings
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn get(&self, key: SettingKey) -> bool {
        self.0
            .get(&key)
            .map(|setting| setting.value)
            .unwrap_or_else(|| key.default_value())
    }

    /// Returns whether the value changed.
    pub fn set(&mut self, key: SettingKey, value: bool) -> bool {
        let setting = self.0.entry(key).or_insert_with(|| Setting::from(key));
        let changed = setting.value != value;
        setting.value = value;
        changed
    }

    pub fn just_mark_allergens(&self) -> bool {
        self.get(SettingKey::ShowAllergensInsteadOfHiding)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &Setting)> {
        self.0.iter().map(|(key, setting)| (*key, setting))
    }
}
