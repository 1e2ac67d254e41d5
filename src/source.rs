use std::path::PathBuf;

use async_trait::async_trait;
use mensaplan_mealplan::{ConsumerGroup, MealPlan, ReferenceData, decode_last_update};
use mensaplan_shared::{Result, not_found};

/// Reference data and meal plan of one scope, fully resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedData {
    pub reference: ReferenceData,
    pub plan: MealPlan,
}

#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn load(&self, scope: Option<&str>) -> Result<LoadedData>;
}

/// Reads the JSON documents of the remote service from a directory.
///
/// Layout:
/// - `allergens.json`: `[{code, name}]`
/// - `locations.json`: `[{code, city, name}]`
/// - `meals.json`: flat meal records or `[{date, meals}]`
/// - `last-update.json`: `{lastUpdate}`
/// - `consumer-groups.json` (optional): `[{code, name}]`
///
/// Files in `<dir>/<scope>/` take precedence over those in `<dir>`.
#[derive(Clone, Debug)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_optional(&self, scope: Option<&str>, name: &str) -> Result<Option<String>> {
        let scoped = scope.map(|scope| self.dir.join(scope).join(name));
        for path in scoped.into_iter().chain(std::iter::once(self.dir.join(name))) {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    tracing::debug!(path = %path.display(), "reference document read");
                    return Ok(Some(content));
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(None)
    }

    async fn read(&self, scope: Option<&str>, name: &str) -> Result<String> {
        match self.read_optional(scope, name).await? {
            Some(content) => Ok(content),
            None => not_found!("{} in {}", name, self.dir.display()),
        }
    }
}

#[async_trait]
impl ReferenceSource for JsonDirSource {
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn load(&self, scope: Option<&str>) -> Result<LoadedData> {
        let last_update = decode_last_update(&self.read(scope, "last-update.json").await?)?;
        let allergens = ReferenceData::decode_allergens(&self.read(scope, "allergens.json").await?)?;
        let locations = ReferenceData::decode_locations(&self.read(scope, "locations.json").await?)?;
        let plan = MealPlan::decode(last_update, &self.read(scope, "meals.json").await?)?;

        let consumer_groups = match self.read_optional(scope, "consumer-groups.json").await? {
            Some(json) => ReferenceData::decode_consumer_groups(&json)?,
            None => infer_consumer_groups(&plan),
        };

        tracing::info!(
            allergens = allergens.len(),
            locations = locations.len(),
            days = plan.days.len(),
            consumer_groups = consumer_groups.len(),
            "reference data loaded"
        );

        Ok(LoadedData {
            reference: ReferenceData::new(allergens, locations, last_update)
                .with_consumer_groups(consumer_groups),
            plan,
        })
    }
}

/// Standard groups when any meal carries per-group prices, none otherwise.
fn infer_consumer_groups(plan: &MealPlan) -> Vec<ConsumerGroup> {
    let priced = plan
        .days
        .iter()
        .flat_map(|day| &day.meals)
        .any(|meal| !meal.price.is_empty());

    if priced {
        ConsumerGroup::standard()
    } else {
        Vec::new()
    }
}
