use anyhow::Result;
use mensaplan::{Config, JsonDirSource};
use mensaplan_store::SettingKey;

pub async fn set(config: Config, key: SettingKey, value: bool) -> Result<()> {
    let mut session = super::open_session(&config).await?;

    if session.set_setting(key, value)? {
        println!("{}: {}", key.name(), if value { "an" } else { "aus" });
    }

    Ok(())
}

pub async fn scope(config: Config, code: Option<String>) -> Result<()> {
    let mut session = super::open_session(&config).await?;

    let Some(scope) = code.or_else(|| session.next_scope()) else {
        tracing::error!("no scope available in {}", config.data.dir);
        return Ok(());
    };

    session
        .switch_scope(Some(&scope), &JsonDirSource::new(&config.data.dir))
        .await?;

    println!(
        "{scope}: {} Orte",
        session.reference().locations_in(Some(scope.as_str())).count()
    );

    Ok(())
}

pub fn reset(config: Config) -> Result<()> {
    let mut persistence = super::open_persistence(&config)?;
    persistence.reset()?;

    tracing::info!("persisted state removed from {}", config.store.path);

    Ok(())
}
