use mensaplan_mealplan::{Allergen, DietaryPreference, ReferenceData, STUDENTS};
use strum::VariantArray;

use crate::{Filter, FilterCatalogue, FilterGroup};

/// Derives the full catalogue with first-run activation: dietary preference
/// "all", every in-scope location and the students price group are active,
/// allergens are not.
///
/// Static definitions are inserted before loaded ones, so on a code collision
/// the dietary preference or consumer group wins and the later entry is
/// dropped.
pub fn build(reference: &ReferenceData, scope: Option<&str>) -> FilterCatalogue {
    let mut catalogue = FilterCatalogue::new();
    let mut insert = |filter: Filter| {
        let code = filter.code.clone();
        let group = filter.group;
        if !catalogue.insert(filter) {
            tracing::warn!(%code, %group, "dropping filter with duplicate code");
        }
    };

    for preference in DietaryPreference::VARIANTS {
        insert(Filter::new(
            preference.name(),
            FilterGroup::DietaryPreference,
            preference.code(),
            *preference == DietaryPreference::All,
        ));
    }

    let default_group = reference
        .consumer_groups
        .iter()
        .find(|group| group.code == STUDENTS)
        .or_else(|| reference.consumer_groups.first())
        .map(|group| group.code.as_str());
    for group in &reference.consumer_groups {
        insert(Filter::new(
            &group.name,
            FilterGroup::ConsumerGroup,
            &group.code,
            Some(group.code.as_str()) == default_group,
        ));
    }

    for location in reference.locations_in(scope) {
        insert(Filter::new(
            location.display_name(),
            FilterGroup::Location,
            &location.code,
            true,
        ));
    }

    for allergen in sorted_allergens(&reference.allergens) {
        insert(Filter::new(
            &allergen.name,
            FilterGroup::Allergen,
            &allergen.code,
            false,
        ));
    }

    tracing::debug!(filters = catalogue.len(), ?scope, "filter catalogue built");
    catalogue
}

/// Orders allergens by display name, ignoring case and diacritics. Equal keys
/// keep their source order.
pub fn sorted_allergens(allergens: &[Allergen]) -> Vec<&Allergen> {
    let mut keyed: Vec<(String, &Allergen)> = allergens
        .iter()
        .map(|allergen| (collation_key(&allergen.name), allergen))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, allergen)| allergen).collect()
}

fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        match c {
            'ä' | 'à' | 'á' | 'â' | 'ã' | 'å' => key.push('a'),
            'ö' | 'ò' | 'ó' | 'ô' | 'õ' | 'ø' => key.push('o'),
            'ü' | 'ù' | 'ú' | 'û' => key.push('u'),
            'é' | 'è' | 'ê' | 'ë' => key.push('e'),
            'í' | 'ì' | 'î' | 'ï' => key.push('i'),
            'ç' => key.push('c'),
            'ñ' => key.push('n'),
            'ß' => key.push_str("ss"),
            c => key.push(c),
        }
    }
    key
}
