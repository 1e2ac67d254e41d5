use chrono::{DateTime, NaiveDate, Utc};
use mensaplan_filter::{Filter, FilterCatalogue, build, marked_allergens, reconcile, select};
use mensaplan_mealplan::{Meal, MealPlan, ReferenceData, advance, retreat};
use mensaplan_shared::Result;
use mensaplan_store::{KeyValueStore, Persistence, SettingKey, Settings};

use crate::source::{LoadedData, ReferenceSource};

/// State of one user session: loaded data, reconciled filters, settings,
/// selected scope and date, and the meals currently shown.
///
/// Every mutation that touches persisted state writes it back before
/// returning.
pub struct Session<S> {
    persistence: Persistence<S>,
    data: LoadedData,
    catalogue: FilterCatalogue,
    settings: Settings,
    scope: Option<String>,
    date: NaiveDate,
    meals: Vec<Meal>,
}

impl<S: KeyValueStore> Session<S> {
    /// Loads the data for the persisted scope, falling back to
    /// `default_scope`, and starts the session.
    pub async fn open(
        mut persistence: Persistence<S>,
        source: &dyn ReferenceSource,
        default_scope: Option<&str>,
        date: NaiveDate,
    ) -> Result<Self> {
        let scope = match persistence.load_scope()? {
            Some(scope) => Some(scope),
            None => {
                let scope = default_scope.map(str::to_owned);
                persistence.save_scope(scope.as_deref())?;
                scope
            }
        };

        let data = source.load(scope.as_deref()).await?;
        Self::start(persistence, data, date)
    }

    /// Builds the catalogue for the persisted scope and restores saved
    /// filter and setting choices.
    pub fn start(persistence: Persistence<S>, data: LoadedData, date: NaiveDate) -> Result<Self> {
        let settings = persistence.load_settings()?;
        let scope = persistence.load_scope()?;

        let mut session = Self {
            persistence,
            data,
            catalogue: FilterCatalogue::new(),
            settings,
            scope,
            date,
            meals: Vec::new(),
        };
        session.rebuild()?;

        Ok(session)
    }

    /// Replaces the loaded data and rebuilds the catalogue from scratch.
    pub fn reload(&mut self, data: LoadedData) -> Result<()> {
        self.data = data;
        self.rebuild()
    }

    /// Loads fresh data for the current scope. On failure nothing changes.
    pub async fn refresh(&mut self, source: &dyn ReferenceSource) -> Result<()> {
        match source.load(self.scope.as_deref()).await {
            Ok(data) => self.reload(data),
            Err(err) => {
                tracing::warn!(%err, scope = ?self.scope, "refresh failed, keeping previous data");
                Err(err)
            }
        }
    }

    pub fn toggle(&mut self, code: &str) -> Result<bool> {
        let changed = self.catalogue.toggle(code);
        self.after_filter_change(changed)
    }

    pub fn activate(&mut self, code: &str) -> Result<bool> {
        let changed = self.catalogue.activate(code);
        self.after_filter_change(changed)
    }

    pub fn deactivate(&mut self, code: &str) -> Result<bool> {
        let changed = self.catalogue.deactivate(code);
        self.after_filter_change(changed)
    }

    pub fn set_setting(&mut self, key: SettingKey, value: bool) -> Result<bool> {
        if !self.settings.set(key, value) {
            return Ok(false);
        }

        self.persistence.save_settings(&self.settings)?;
        tracing::debug!(%key, value, "setting changed");
        self.reselect();
        Ok(true)
    }

    /// Loads the data of another scope and only then makes it current.
    /// On failure the previous scope, data and selection stay in place.
    pub async fn switch_scope(
        &mut self,
        scope: Option<&str>,
        source: &dyn ReferenceSource,
    ) -> Result<()> {
        let data = match source.load(scope).await {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(%err, from = ?self.scope, to = ?scope, "scope switch failed");
                return Err(err);
            }
        };

        self.persistence.save_scope(scope)?;
        self.scope = scope.map(str::to_owned);
        self.reload(data)
    }

    /// The city after the current one among the loaded locations, wrapping around.
    pub fn next_scope(&self) -> Option<String> {
        let cities = self.data.reference.cities();
        let next = match self
            .scope
            .as_deref()
            .and_then(|scope| cities.iter().position(|city| *city == scope))
        {
            Some(index) => cities.get((index + 1) % cities.len()),
            None => cities.first(),
        };
        next.map(|city| (*city).to_owned())
    }

    pub fn advance(&mut self) {
        self.set_date(advance(self.date));
    }

    pub fn retreat(&mut self) {
        self.set_date(retreat(self.date));
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.reselect();
    }

    pub fn catalogue(&self) -> &FilterCatalogue {
        &self.catalogue
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn plan(&self) -> &MealPlan {
        &self.data.plan
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.data.reference
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.data.plan.last_update
    }

    /// Active allergen filters the meal contains.
    pub fn marked_allergens(&self, meal: &Meal) -> Vec<&Filter> {
        marked_allergens(meal, &self.catalogue)
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    fn rebuild(&mut self) -> Result<()> {
        let fresh = build(&self.data.reference, self.scope.as_deref());
        let persisted = self.persistence.load_filter_state()?;
        self.catalogue = reconcile(fresh, &persisted);
        self.persistence
            .save_filter_state(&self.catalogue.snapshot())?;

        tracing::info!(
            scope = ?self.scope,
            filters = self.catalogue.len(),
            last_update = %self.data.plan.last_update,
            "filter catalogue rebuilt"
        );

        self.reselect();
        Ok(())
    }

    fn after_filter_change(&mut self, changed: bool) -> Result<bool> {
        if changed {
            self.persistence
                .save_filter_state(&self.catalogue.snapshot())?;
            self.reselect();
        }
        Ok(changed)
    }

    fn reselect(&mut self) {
        self.meals = select(
            &self.data.plan,
            self.date,
            &self.catalogue,
            self.settings.just_mark_allergens(),
        )
        .into_iter()
        .cloned()
        .collect();
    }
}
