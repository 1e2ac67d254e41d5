use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{Meal, date::serde_day};

/// A reference either sent as its bare code or as a record carrying one.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum CodeRef {
    Code(String),
    Record { code: String },
}

impl CodeRef {
    pub(crate) fn into_code(self) -> String {
        match self {
            CodeRef::Code(code) | CodeRef::Record { code } => code,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Accepts `3.5`, `"3.50"` and `"3,50 €"`.
    pub(crate) fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(value) => Some(*value),
            Amount::Text(text) => {
                let cleaned: String = text
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.' || *c == '-')
                    .map(|c| if c == ',' { '.' } else { c })
                    .collect();
                cleaned.parse().ok()
            }
        }
    }
}

/// Older revisions send a single display price, newer ones one column per
/// consumer group. Only the latter yields price-bearing columns.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum PriceRecord {
    ByGroup(BTreeMap<String, Option<Amount>>),
    Flat(Amount),
}

impl PriceRecord {
    pub(crate) fn into_columns(self) -> BTreeMap<String, f64> {
        match self {
            PriceRecord::ByGroup(columns) => columns
                .into_iter()
                .filter_map(|(group, amount)| Some((group, amount?.value()?)))
                .collect(),
            PriceRecord::Flat(_) => BTreeMap::new(),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct MealRecord {
    pub name: String,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    pub location: CodeRef,
    #[serde(default)]
    pub price: Option<PriceRecord>,
    #[serde(default)]
    pub allergens: Vec<CodeRef>,
    #[serde(default, deserialize_with = "serde_day::deserialize_option")]
    pub date: Option<NaiveDate>,
}

impl MealRecord {
    /// Builds the meal, dated by the record itself or else by its enclosing day.
    pub(crate) fn into_meal(self, day: Option<NaiveDate>) -> Option<Meal> {
        let date = self.date.or(day)?;

        let mut allergens: Vec<String> = Vec::with_capacity(self.allergens.len());
        for code in self.allergens.into_iter().map(CodeRef::into_code) {
            if !allergens.contains(&code) {
                allergens.push(code);
            }
        }

        Some(Meal {
            name: self.name,
            vegetarian: self.vegetarian,
            vegan: self.vegan,
            location: self.location.into_code(),
            price: self.price.map(PriceRecord::into_columns).unwrap_or_default(),
            allergens,
            date,
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct DayRecord {
    #[serde(deserialize_with = "serde_day::deserialize")]
    pub date: NaiveDate,
    pub meals: Vec<MealRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum MealsDocument {
    Days(Vec<DayRecord>),
    Meals(Vec<MealRecord>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_localized_text() {
        let amount: Amount = serde_json::from_str(r#""3,50 €""#).unwrap();
        assert_eq!(amount.value(), Some(3.5));

        let amount: Amount = serde_json::from_str("2.1").unwrap();
        assert_eq!(amount.value(), Some(2.1));

        let amount: Amount = serde_json::from_str(r#""n/a""#).unwrap();
        assert_eq!(amount.value(), None);
    }

    #[test]
    fn flat_price_has_no_group_columns() {
        let price: PriceRecord = serde_json::from_str(r#""3,50 €""#).unwrap();
        assert!(price.into_columns().is_empty());

        let price: PriceRecord =
            serde_json::from_str(r#"{"students": 2.5, "employees": "4,10", "guests": null}"#)
                .unwrap();
        let columns = price.into_columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.get("employees"), Some(&4.1));
        assert!(!columns.contains_key("guests"));
    }

    #[test]
    fn meal_without_any_date_is_dropped() {
        let record: MealRecord =
            serde_json::from_str(r#"{"name": "Suppe", "location": "Mensa"}"#).unwrap();
        assert!(record.into_meal(None).is_none());
    }

    #[test]
    fn duplicate_allergen_codes_collapse() {
        let record: MealRecord = serde_json::from_str(
            r#"{"name": "Suppe", "location": {"code": "Mensa"},
                "allergens": [{"code": "A1", "name": "Gluten"}, "A1", "C"]}"#,
        )
        .unwrap();
        let meal = record
            .into_meal(NaiveDate::from_ymd_opt(2024, 3, 4))
            .unwrap();
        assert_eq!(meal.allergens, vec!["A1".to_owned(), "C".to_owned()]);
        assert_eq!(meal.location, "Mensa");
    }
}
