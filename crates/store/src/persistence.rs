use mensaplan_filter::PersistedFilterState;
use mensaplan_shared::Result;

use crate::{KeyValueStore, Settings, StoreKey};

/// Typed access to the recognized keys of a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Wraps the store, wiping every key when the stored schema version is
    /// missing or differs from `schema_version`.
    pub fn open(mut store: S, schema_version: &str) -> Result<Self> {
        let key = StoreKey::SchemaVersion.as_ref();
        let stored = store.get(key)?;

        if stored.as_deref() != Some(schema_version) {
            tracing::info!(
                stored = stored.as_deref().unwrap_or("none"),
                expected = schema_version,
                "schema version changed, clearing persisted state"
            );
            store.clear()?;
            store.set(key, schema_version.to_owned())?;
        }

        Ok(Self { store })
    }

    pub fn schema_version(&self) -> Result<Option<String>> {
        self.store.get(StoreKey::SchemaVersion.as_ref())
    }

    pub fn load_settings(&self) -> Result<Settings> {
        Ok(self
            .store
            .get(StoreKey::Settings.as_ref())?
            .map(|raw| Settings::parse(&raw))
            .unwrap_or_default())
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.store
            .set(StoreKey::Settings.as_ref(), settings.to_json()?)
    }

    /// Missing or malformed state reads as empty.
    pub fn load_filter_state(&self) -> Result<PersistedFilterState> {
        Ok(self
            .store
            .get(StoreKey::FilterState.as_ref())?
            .and_then(|raw| PersistedFilterState::parse(&raw))
            .unwrap_or_default())
    }

    pub fn save_filter_state(&mut self, state: &PersistedFilterState) -> Result<()> {
        self.store
            .set(StoreKey::FilterState.as_ref(), state.to_json()?)
    }

    /// Reads the scope stored either as a JSON string or as raw text.
    pub fn load_scope(&self) -> Result<Option<String>> {
        let Some(raw) = self.store.get(StoreKey::SelectedScope.as_ref())? else {
            return Ok(None);
        };

        let scope = serde_json::from_str::<Option<String>>(&raw).unwrap_or(Some(raw));
        Ok(scope.filter(|scope| !scope.is_empty()))
    }

    pub fn save_scope(&mut self, scope: Option<&str>) -> Result<()> {
        match scope {
            Some(scope) => self.store.set(
                StoreKey::SelectedScope.as_ref(),
                serde_json::to_string(scope)?,
            ),
            None => self.store.remove(StoreKey::SelectedScope.as_ref()),
        }
    }

    /// Removes everything, including the schema version.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
