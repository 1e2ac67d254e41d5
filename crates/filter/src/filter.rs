use strum::{AsRefStr, Display, EnumString, VariantArray};

/// How many filters of one group may be active together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupPolicy {
    AtMostOne,
    Unbounded,
}

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
    Hash,
    PartialOrd,
    Ord,
)]
#[strum(serialize_all = "kebab-case")]
pub enum FilterGroup {
    DietaryPreference,
    ConsumerGroup,
    Location,
    Allergen,
}

impl FilterGroup {
    pub fn policy(&self) -> GroupPolicy {
        match self {
            FilterGroup::DietaryPreference | FilterGroup::ConsumerGroup => GroupPolicy::AtMostOne,
            FilterGroup::Location | FilterGroup::Allergen => GroupPolicy::Unbounded,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterGroup::DietaryPreference => "Ernährung",
            FilterGroup::ConsumerGroup => "Preisgruppe",
            FilterGroup::Location => "Ort",
            FilterGroup::Allergen => "Allergene",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    pub group: FilterGroup,
    pub code: String,
    pub active: bool,
}

impl Filter {
    pub fn new(
        name: impl Into<String>,
        group: FilterGroup,
        code: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            name: name.into(),
            group,
            code: code.into(),
            active,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;

    #[test]
    fn exclusive_groups() {
        let exclusive: Vec<_> = FilterGroup::VARIANTS
            .iter()
            .filter(|group| group.policy() == GroupPolicy::AtMostOne)
            .collect();
        assert_eq!(
            exclusive,
            [&FilterGroup::DietaryPreference, &FilterGroup::ConsumerGroup]
        );
    }

    #[test]
    fn group_names_are_kebab_case() {
        assert_eq!(FilterGroup::DietaryPreference.as_ref(), "dietary-preference");
        assert_eq!(FilterGroup::Allergen.to_string(), "allergen");
    }
}
