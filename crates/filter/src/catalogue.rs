use serde::{Deserialize, Serialize};

use crate::{Filter, FilterGroup, GroupPolicy};

/// The selectable filters of a session, unique by code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCatalogue {
    filters: Vec<Filter>,
}

impl FilterCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter unless its code is already taken. Returns whether it was added.
    pub fn insert(&mut self, filter: Filter) -> bool {
        if self.get(&filter.code).is_some() {
            return false;
        }

        self.filters.push(filter);
        true
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn get(&self, code: &str) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.code == code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|filter| filter.code.as_str())
    }

    pub fn group(&self, group: FilterGroup) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(move |filter| filter.group == group)
    }

    pub fn has_group(&self, group: FilterGroup) -> bool {
        self.group(group).next().is_some()
    }

    pub fn active(&self, group: FilterGroup) -> impl Iterator<Item = &Filter> {
        self.group(group).filter(|filter| filter.active)
    }

    pub fn is_active(&self, code: &str) -> bool {
        self.get(code).is_some_and(|filter| filter.active)
    }

    /// Flips the filter's flag. In an exclusive group every other filter is
    /// switched off first. Unknown codes leave the catalogue untouched and
    /// return `false`.
    pub fn toggle(&mut self, code: &str) -> bool {
        let Some(index) = self.position(code) else {
            tracing::debug!(code, "ignoring toggle of unknown filter");
            return false;
        };

        self.clear_exclusive_siblings(index);
        let filter = &mut self.filters[index];
        filter.active = !filter.active;

        tracing::debug!(code, active = filter.active, group = %filter.group, "filter toggled");
        true
    }

    /// Returns whether anything changed.
    pub fn activate(&mut self, code: &str) -> bool {
        let Some(index) = self.position(code) else {
            return false;
        };

        let cleared = self.clear_exclusive_siblings(index);
        let filter = &mut self.filters[index];
        let changed = cleared || !filter.active;
        filter.active = true;
        changed
    }

    /// Returns whether anything changed.
    pub fn deactivate(&mut self, code: &str) -> bool {
        let Some(index) = self.position(code) else {
            return false;
        };

        let filter = &mut self.filters[index];
        let changed = filter.active;
        filter.active = false;
        changed
    }

    pub fn snapshot(&self) -> PersistedFilterState {
        PersistedFilterState(
            self.filters
                .iter()
                .map(|filter| FilterActivation {
                    code: filter.code.clone(),
                    active: filter.active,
                })
                .collect(),
        )
    }

    pub(crate) fn filters_mut(&mut self) -> impl Iterator<Item = &mut Filter> {
        self.filters.iter_mut()
    }

    /// Keeps only the first active filter of every exclusive group.
    pub(crate) fn enforce_policies(&mut self) {
        let mut seen: Vec<FilterGroup> = Vec::new();
        for filter in self.filters.iter_mut() {
            if !filter.active || filter.group.policy() != GroupPolicy::AtMostOne {
                continue;
            }

            if seen.contains(&filter.group) {
                tracing::warn!(code = %filter.code, group = %filter.group, "deactivating surplus exclusive filter");
                filter.active = false;
            } else {
                seen.push(filter.group);
            }
        }
    }

    fn position(&self, code: &str) -> Option<usize> {
        self.filters.iter().position(|filter| filter.code == code)
    }

    fn clear_exclusive_siblings(&mut self, index: usize) -> bool {
        let group = self.filters[index].group;
        if group.policy() != GroupPolicy::AtMostOne {
            return false;
        }

        let mut cleared = false;
        for (i, filter) in self.filters.iter_mut().enumerate() {
            if i != index && filter.group == group && filter.active {
                filter.active = false;
                cleared = true;
            }
        }
        cleared
    }
}

impl<'a> IntoIterator for &'a FilterCatalogue {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterActivation {
    pub code: String,
    pub active: bool,
}

/// Durable `{code, active}` records of a catalogue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedFilterState(pub Vec<FilterActivation>);

impl PersistedFilterState {
    /// Anything that is not a sequence of `{code, active}` records yields
    /// `None`. Extra fields on a record are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw)
            .map_err(|err| tracing::warn!(%err, "ignoring malformed filter state"))
            .ok()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// First recorded flag for the code.
    pub fn get(&self, code: &str) -> Option<bool> {
        self.0
            .iter()
            .find(|activation| activation.code == code)
            .map(|activation| activation.active)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
