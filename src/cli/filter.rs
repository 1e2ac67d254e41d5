use anyhow::Result;
use mensaplan::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Toggle,
    Activate,
    Deactivate,
}

pub async fn change(config: Config, change: Change, code: String) -> Result<()> {
    let mut session = super::open_session(&config).await?;

    let changed = match change {
        Change::Toggle => session.toggle(&code)?,
        Change::Activate => session.activate(&code)?,
        Change::Deactivate => session.deactivate(&code)?,
    };

    let Some(filter) = session.catalogue().get(&code) else {
        tracing::error!("filter {code} not found");
        return Ok(());
    };

    if changed {
        let state = if filter.active { "aktiv" } else { "inaktiv" };
        println!("{} ist jetzt {state}, {} Gerichte heute", filter.name, session.meals().len());
    } else {
        println!("{} unverändert", filter.name);
    }

    Ok(())
}
