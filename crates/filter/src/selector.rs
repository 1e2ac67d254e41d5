use std::str::FromStr;

use chrono::NaiveDate;
use mensaplan_mealplan::{DietaryPreference, Meal, MealPlan};

use crate::{Filter, FilterCatalogue, FilterGroup};

/// Group predicates derived from a catalogue: AND across groups, OR within one.
#[derive(Debug)]
pub struct Criteria<'a> {
    locations: Option<Vec<&'a str>>,
    preferences: Vec<DietaryPreference>,
    excluded_allergens: Vec<&'a str>,
    consumer_groups: Option<Vec<&'a str>>,
}

impl<'a> Criteria<'a> {
    pub fn new(catalogue: &'a FilterCatalogue, just_mark_allergens: bool) -> Self {
        let codes = move |group| {
            catalogue
                .active(group)
                .map(|filter: &'a Filter| filter.code.as_str())
                .collect::<Vec<_>>()
        };

        Self {
            locations: catalogue
                .has_group(FilterGroup::Location)
                .then(|| codes(FilterGroup::Location)),
            preferences: catalogue
                .active(FilterGroup::DietaryPreference)
                .filter_map(|filter| DietaryPreference::from_str(&filter.code).ok())
                .collect(),
            excluded_allergens: if just_mark_allergens {
                Vec::new()
            } else {
                codes(FilterGroup::Allergen)
            },
            consumer_groups: catalogue
                .has_group(FilterGroup::ConsumerGroup)
                .then(|| codes(FilterGroup::ConsumerGroup)),
        }
    }

    pub fn admits(&self, meal: &Meal) -> bool {
        let location = self
            .locations
            .as_ref()
            .is_none_or(|codes| codes.contains(&meal.location.as_str()));

        let dietary = self
            .preferences
            .iter()
            .any(|preference| preference.matches(meal));

        let allergens = !self
            .excluded_allergens
            .iter()
            .any(|code| meal.contains_allergen(code));

        let consumer_group = self
            .consumer_groups
            .as_ref()
            .is_none_or(|codes| codes.iter().any(|code| meal.price.contains_key(*code)));

        location && dietary && allergens && consumer_group
    }
}

/// Meals of the given day passing the catalogue's active filters, in plan
/// order. A day missing from the plan yields nothing.
pub fn select<'p>(
    plan: &'p MealPlan,
    date: NaiveDate,
    catalogue: &FilterCatalogue,
    just_mark_allergens: bool,
) -> Vec<&'p Meal> {
    let Some(day) = plan.day(date) else {
        tracing::debug!(%date, "no meals planned");
        return Vec::new();
    };

    let criteria = Criteria::new(catalogue, just_mark_allergens);
    let meals: Vec<&Meal> = day.meals.iter().filter(|meal| criteria.admits(meal)).collect();

    tracing::debug!(%date, total = day.meals.len(), shown = meals.len(), "meals selected");
    meals
}

/// Active allergen filters matching allergens of the meal.
pub fn marked_allergens<'c>(meal: &Meal, catalogue: &'c FilterCatalogue) -> Vec<&'c Filter> {
    catalogue
        .active(FilterGroup::Allergen)
        .filter(|filter| meal.contains_allergen(&filter.code))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;

    fn meal(name: &str, location: &str, vegetarian: bool, vegan: bool) -> Meal {
        Meal {
            name: name.to_owned(),
            vegetarian,
            vegan,
            location: location.to_owned(),
            price: BTreeMap::new(),
            allergens: vec![],
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        }
    }

    fn catalogue(active: &[&str]) -> FilterCatalogue {
        let mut catalogue = FilterCatalogue::new();
        for (name, group, code) in [
            ("Alles", FilterGroup::DietaryPreference, "all"),
            ("Vegetarisch", FilterGroup::DietaryPreference, "vegetarian"),
            ("Vegan", FilterGroup::DietaryPreference, "vegan"),
            ("Mensa", FilterGroup::Location, "Mensa"),
            ("Cafeteria", FilterGroup::Location, "Cafeteria"),
            ("Gluten", FilterGroup::Allergen, "A1"),
        ] {
            catalogue.insert(Filter::new(name, group, code, active.contains(&code)));
        }
        catalogue
    }

    #[test]
    fn vegetarian_admits_vegan_flagged_vegetarian() {
        let criteria_catalogue = catalogue(&["vegetarian", "Mensa"]);
        let criteria = Criteria::new(&criteria_catalogue, false);
        assert!(criteria.admits(&meal("Tofu", "Mensa", true, true)));
        assert!(!criteria.admits(&meal("Wurst", "Mensa", false, false)));
        assert!(!criteria.admits(&meal("Tofu", "Cafeteria", true, true)));
    }

    #[test]
    fn no_active_preference_admits_nothing() {
        let catalogue = catalogue(&["Mensa"]);
        let criteria = Criteria::new(&catalogue, false);
        assert!(!criteria.admits(&meal("Tofu", "Mensa", true, true)));
    }

    #[test]
    fn without_location_filters_location_is_ignored() {
        let mut catalogue = FilterCatalogue::new();
        catalogue.insert(Filter::new("Alles", FilterGroup::DietaryPreference, "all", true));
        let criteria = Criteria::new(&catalogue, false);
        assert!(criteria.admits(&meal("Suppe", "Anywhere", false, false)));
    }

    #[test]
    fn consumer_group_needs_price_column() {
        let mut catalogue = catalogue(&["all", "Mensa"]);
        catalogue.insert(Filter::new("Gäste", FilterGroup::ConsumerGroup, "guests", true));
        let criteria = Criteria::new(&catalogue, false);

        let mut priced = meal("Suppe", "Mensa", false, false);
        assert!(!criteria.admits(&priced));
        priced.price.insert("guests".to_owned(), 4.2);
        assert!(criteria.admits(&priced));
    }

    #[test]
    fn marks_only_active_contained_allergens() {
        let catalogue = catalogue(&["all", "A1"]);
        let mut bread = meal("Brot", "Mensa", true, true);
        assert!(marked_allergens(&bread, &catalogue).is_empty());
        bread.allergens.push("A1".to_owned());
        let marks: Vec<_> = marked_allergens(&bread, &catalogue)
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(marks, ["Gluten"]);
    }

    #[test]
    fn missing_day_is_empty() {
        let plan = MealPlan::from_meals(Utc::now(), vec![meal("Suppe", "Mensa", false, false)]);
        let other = NaiveDate::from_ymd_opt(2024, 4, 4).unwrap();
        assert!(select(&plan, other, &catalogue(&["all", "Mensa"]), false).is_empty());
    }
}
