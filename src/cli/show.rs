use anyhow::Result;
use chrono::NaiveDate;
use mensaplan::{Config, Session};
use mensaplan_filter::FilterGroup;
use mensaplan_mealplan::{Meal, shift};
use mensaplan_store::KeyValueStore;
use strum::VariantArray;

pub async fn show(config: Config, date: Option<NaiveDate>, offset: i32) -> Result<()> {
    let mut session = super::open_session(&config).await?;

    let start = date.unwrap_or(session.date());
    let Some(target) = shift(start, offset) else {
        anyhow::bail!("{start} {offset:+} days is outside the calendar");
    };
    if target != session.date() {
        session.set_date(target);
    }

    println!(
        "{} · {} (Stand {})",
        session.scope().unwrap_or("alle Orte"),
        session.date().format("%a %d.%m.%Y"),
        session.last_update().format("%d.%m.%Y %H:%M"),
    );

    if session.meals().is_empty() {
        println!("  Keine Gerichte.");
        return Ok(());
    }

    for meal in session.meals() {
        println!("  {}", describe(&session, meal));
    }

    Ok(())
}

pub async fn filters(config: Config) -> Result<()> {
    let session = super::open_session(&config).await?;

    for group in FilterGroup::VARIANTS {
        let mut filters = session.catalogue().group(*group).peekable();
        if filters.peek().is_none() {
            continue;
        }

        println!("{}:", group.label());
        for filter in filters {
            let mark = if filter.active { "x" } else { " " };
            println!("  [{mark}] {:<24} {}", filter.name, filter.code);
        }
    }

    Ok(())
}

fn describe<S: KeyValueStore>(session: &Session<S>, meal: &Meal) -> String {
    let mut line = meal.name.clone();

    let location = session
        .reference()
        .locations
        .iter()
        .find(|location| location.code == meal.location)
        .map(|location| location.display_name())
        .unwrap_or(&meal.location);
    line.push_str(&format!(" [{location}]"));

    if meal.vegan {
        line.push_str(" (vegan)");
    } else if meal.vegetarian {
        line.push_str(" (vegetarisch)");
    }

    let price = session
        .catalogue()
        .active(FilterGroup::ConsumerGroup)
        .find_map(|group| meal.price_for(&group.code));
    if let Some(price) = price {
        line.push_str(&format!(" {price:.2} €"));
    }

    if session.settings().just_mark_allergens() {
        let marked: Vec<&str> = session
            .marked_allergens(meal)
            .into_iter()
            .map(|filter| filter.name.as_str())
            .collect();
        if !marked.is_empty() {
            line.push_str(&format!(" ! {}", marked.join(", ")));
        }
    }

    line
}
