use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::Meal;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergen {
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub name: String,
}

impl Location {
    /// Display name, falling back to the code when the source sends none.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.code
        } else {
            &self.name
        }
    }
}

pub const STUDENTS: &str = "students";
pub const EMPLOYEES: &str = "employees";
pub const GUESTS: &str = "guests";

/// A price column of the meal plan. Codes are matched against the keys of
/// [`Meal::price`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerGroup {
    pub code: String,
    pub name: String,
}

impl ConsumerGroup {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    pub fn standard() -> Vec<ConsumerGroup> {
        vec![
            ConsumerGroup::new(STUDENTS, "Studierende"),
            ConsumerGroup::new(EMPLOYEES, "Bedienstete"),
            ConsumerGroup::new(GUESTS, "Gäste"),
        ]
    }
}

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DietaryPreference {
    #[default]
    All,
    Vegetarian,
    Vegan,
}

impl DietaryPreference {
    pub fn code(&self) -> &'static str {
        match self {
            DietaryPreference::All => "all",
            DietaryPreference::Vegetarian => "vegetarian",
            DietaryPreference::Vegan => "vegan",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DietaryPreference::All => "Alles",
            DietaryPreference::Vegetarian => "Vegetarisch",
            DietaryPreference::Vegan => "Vegan",
        }
    }

    pub fn matches(&self, meal: &Meal) -> bool {
        match self {
            DietaryPreference::All => true,
            DietaryPreference::Vegetarian => meal.vegetarian,
            DietaryPreference::Vegan => meal.vegan,
        }
    }
}
