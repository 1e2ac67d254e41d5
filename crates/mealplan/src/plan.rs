use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use crate::wire::{MealRecord, MealsDocument};

#[derive(Clone, Debug, PartialEq)]
pub struct Meal {
    pub name: String,
    pub vegetarian: bool,
    pub vegan: bool,
    /// Code of the serving [`crate::Location`].
    pub location: String,
    /// Amount per consumer group code. Empty when the source prices meals
    /// without distinguishing groups.
    pub price: BTreeMap<String, f64>,
    /// Allergen codes, unique, in source order.
    pub allergens: Vec<String>,
    pub date: NaiveDate,
}

impl Meal {
    pub fn contains_allergen(&self, code: &str) -> bool {
        self.allergens.iter().any(|allergen| allergen == code)
    }

    pub fn price_for(&self, group: &str) -> Option<f64> {
        self.price.get(group).copied()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Day {
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MealPlan {
    pub last_update: DateTime<Utc>,
    pub days: Vec<Day>,
}

impl MealPlan {
    /// Groups flat meal records by full calendar date. Days come out in date
    /// order, meals keep their relative source order.
    pub fn from_meals(last_update: DateTime<Utc>, meals: impl IntoIterator<Item = Meal>) -> Self {
        let mut grouped: BTreeMap<NaiveDate, Vec<Meal>> = BTreeMap::new();
        for meal in meals {
            grouped.entry(meal.date).or_default().push(meal);
        }

        Self {
            last_update,
            days: grouped
                .into_iter()
                .map(|(date, meals)| Day { date, meals })
                .collect(),
        }
    }

    /// Decodes a meals document, either a flat list of dated meal records or
    /// a list of `{date, meals}` days.
    pub fn decode(last_update: DateTime<Utc>, json: &str) -> mensaplan_shared::Result<Self> {
        let meals: Vec<Meal> = match serde_json::from_str::<MealsDocument>(json)? {
            MealsDocument::Days(days) => days
                .into_iter()
                .flat_map(|day| {
                    let date = day.date;
                    day.meals
                        .into_iter()
                        .filter_map(move |record| record.into_meal(Some(date)))
                })
                .collect(),
            MealsDocument::Meals(records) => records
                .into_iter()
                .filter_map(|record| {
                    let name = record.name.clone();
                    let meal = MealRecord::into_meal(record, None);
                    if meal.is_none() {
                        tracing::warn!(meal = %name, "dropping meal record without date");
                    }
                    meal
                })
                .collect(),
        };

        Ok(Self::from_meals(last_update, meals))
    }

    /// Finds the day by year, month and day-of-month.
    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.iter().find(|day| day.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meal(name: &str, on: NaiveDate) -> Meal {
        Meal {
            name: name.to_owned(),
            vegetarian: false,
            vegan: false,
            location: "Mensa".to_owned(),
            price: BTreeMap::new(),
            allergens: vec![],
            date: on,
        }
    }

    #[test]
    fn grouping_keeps_months_apart() {
        let plan = MealPlan::from_meals(
            Utc::now(),
            vec![
                meal("April", date(2024, 4, 4)),
                meal("March", date(2024, 3, 4)),
                meal("March again", date(2024, 3, 4)),
            ],
        );

        assert_eq!(plan.days.len(), 2);
        assert_eq!(plan.days[0].date, date(2024, 3, 4));
        let names: Vec<_> = plan.days[0].meals.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["March", "March again"]);
        assert_eq!(plan.day(date(2024, 4, 4)).unwrap().meals[0].name, "April");
        assert!(plan.day(date(2024, 5, 4)).is_none());
    }

    #[test]
    fn grouped_days_sharing_a_date_are_merged() {
        let json = r#"[
            {"date": "2024-03-04", "meals": [{"name": "a", "location": "Mensa"}]},
            {"date": "2024-03-04T10:00:00.000Z", "meals": [{"name": "b", "location": "Mensa"}]}
        ]"#;

        let plan = MealPlan::decode(Utc::now(), json).unwrap();
        assert_eq!(plan.days.len(), 1);
        let names: Vec<_> = plan.days[0].meals.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(plan.days[0].meals.iter().all(|m| m.date == date(2024, 3, 4)));
    }

    #[test]
    fn decodes_grouped_days() {
        let json = r#"[
            {"date": "2024-03-04T00:00:00.000Z", "week": "current", "open": true, "meals": [
                {"name": "Salad", "vegetarian": true, "vegan": true, "location": "Mensa",
                 "price": "2,50 €", "allergens": []}
            ]},
            {"date": "2024-03-05", "open": false, "meals": []}
        ]"#;

        let plan = MealPlan::decode(Utc::now(), json).unwrap();
        assert_eq!(plan.days.len(), 1);
        let salad = &plan.days[0].meals[0];
        assert_eq!(salad.date, date(2024, 3, 4));
        assert!(salad.price.is_empty());
    }

    #[test]
    fn decodes_flat_records() {
        let json = r#"[
            {"name": "Schnitzel", "vegetarian": false, "vegan": false,
             "location": {"code": "Mensa"},
             "price": {"students": 3.1, "employees": 4.6, "guests": 5.9},
             "allergens": [{"code": "A1", "name": "Gluten"}],
             "date": "2024-03-04"},
            {"name": "Suppe", "location": "Cafeteria", "date": "2024-03-05"}
        ]"#;

        let plan = MealPlan::decode(Utc::now(), json).unwrap();
        let schnitzel = &plan.day(date(2024, 3, 4)).unwrap().meals[0];
        assert_eq!(schnitzel.price_for("students"), Some(3.1));
        assert!(schnitzel.contains_allergen("A1"));
        assert_eq!(plan.days.len(), 2);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(MealPlan::decode(Utc::now(), r#"{"meals": 1}"#).is_err());
    }
}
