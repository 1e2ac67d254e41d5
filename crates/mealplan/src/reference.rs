use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{Allergen, ConsumerGroup, Location, date::serde_timestamp};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LastUpdate {
    #[serde(deserialize_with = "serde_timestamp::deserialize")]
    last_update: DateTime<Utc>,
}

/// Decodes a `{"lastUpdate": ...}` document.
pub fn decode_last_update(json: &str) -> mensaplan_shared::Result<DateTime<Utc>> {
    Ok(serde_json::from_str::<LastUpdate>(json)?.last_update)
}

/// Everything the filter catalogue is derived from, fully loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceData {
    pub allergens: Vec<Allergen>,
    pub locations: Vec<Location>,
    /// Empty when the schema has no per-group pricing.
    pub consumer_groups: Vec<ConsumerGroup>,
    pub last_updated: DateTime<Utc>,
}

impl ReferenceData {
    pub fn new(
        allergens: Vec<Allergen>,
        locations: Vec<Location>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            allergens,
            locations,
            consumer_groups: ConsumerGroup::standard(),
            last_updated,
        }
    }

    pub fn with_consumer_groups(mut self, consumer_groups: Vec<ConsumerGroup>) -> Self {
        self.consumer_groups = consumer_groups;
        self
    }

    pub fn decode_allergens(json: &str) -> mensaplan_shared::Result<Vec<Allergen>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn decode_locations(json: &str) -> mensaplan_shared::Result<Vec<Location>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn decode_consumer_groups(json: &str) -> mensaplan_shared::Result<Vec<ConsumerGroup>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Locations serving the given city; every location when no scope is set.
    pub fn locations_in<'a>(&'a self, scope: Option<&'a str>) -> impl Iterator<Item = &'a Location> {
        self.locations
            .iter()
            .filter(move |location| scope.is_none_or(|city| location.city == city))
    }

    /// Distinct cities in source order.
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = Vec::new();
        for location in &self.locations {
            if !cities.contains(&location.city.as_str()) {
                cities.push(&location.city);
            }
        }
        cities
    }
}
