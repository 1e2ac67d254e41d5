use crate::{FilterCatalogue, PersistedFilterState};

/// Restores saved activation flags onto a freshly built catalogue.
///
/// Filters the saved state does not mention keep their built defaults, saved
/// codes missing from the fresh catalogue are dropped. Should the saved state
/// activate several filters of an exclusive group, only the first survives.
pub fn reconcile(fresh: FilterCatalogue, persisted: &PersistedFilterState) -> FilterCatalogue {
    let mut catalogue = fresh;
    let mut restored = 0usize;

    for filter in catalogue.filters_mut() {
        if let Some(active) = persisted.get(&filter.code) {
            filter.active = active;
            restored += 1;
        }
    }

    let stale = persisted
        .0
        .iter()
        .filter(|activation| catalogue.get(&activation.code).is_none())
        .count();
    if stale > 0 {
        tracing::debug!(stale, "discarding saved filters no longer offered");
    }

    catalogue.enforce_policies();

    tracing::debug!(restored, filters = catalogue.len(), "filter state reconciled");
    catalogue
}
