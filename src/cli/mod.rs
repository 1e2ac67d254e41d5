pub mod filter;
pub mod settings;
pub mod show;

use anyhow::Result;
use chrono::Local;
use mensaplan::{Config, JsonDirSource, Session};
use mensaplan_store::{JsonFileStore, Persistence};

pub fn open_persistence(config: &Config) -> Result<Persistence<JsonFileStore>> {
    let store = JsonFileStore::open(&config.store.path)?;
    Ok(Persistence::open(store, &config.store.schema_version)?)
}

pub async fn open_session(config: &Config) -> Result<Session<JsonFileStore>> {
    let persistence = open_persistence(config)?;
    let source = JsonDirSource::new(&config.data.dir);

    let session = Session::open(
        persistence,
        &source,
        config.session.default_scope.as_deref(),
        Local::now().date_naive(),
    )
    .await?;

    Ok(session)
}
