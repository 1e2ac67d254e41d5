use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use mensaplan::{LoadedData, ReferenceSource};
use mensaplan_shared::{Error, Result};
use mensaplan_store::{MemoryStore, Persistence};

pub const SCHEMA_VERSION: &str = "3";

pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

pub fn persistence() -> Persistence<MemoryStore> {
    Persistence::open(MemoryStore::new(), SCHEMA_VERSION).unwrap()
}

pub struct FailingSource;

#[async_trait]
impl ReferenceSource for FailingSource {
    async fn load(&self, _scope: Option<&str>) -> Result<LoadedData> {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "service unavailable",
        )))
    }
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

/// Two cities: `th` with Mensa and Cafeteria, `mh` with its own cafeteria
/// and meal list.
pub fn seed(dir: &Path) {
    write(
        dir,
        "last-update.json",
        r#"{"lastUpdate": "2024-03-04T06:00:00.000Z"}"#,
    );
    write(
        dir,
        "allergens.json",
        r#"[{"code": "A1", "name": "Weizen"}, {"code": "C", "name": "Eier"}]"#,
    );
    write(
        dir,
        "locations.json",
        r#"[
            {"code": "Mensa", "city": "th", "name": "Mensa"},
            {"code": "Cafeteria", "city": "th", "name": "Cafeteria"},
            {"code": "Cafeteria-MH", "city": "mh", "name": "Cafeteria"}
        ]"#,
    );
    write(
        dir,
        "meals.json",
        r#"[
            {"date": "2024-03-04", "meals": [
                {"name": "Salad", "vegetarian": true, "vegan": true, "location": "Mensa",
                 "price": {"students": 2.0, "employees": 3.0, "guests": 4.0}, "allergens": []},
                {"name": "Schnitzel", "vegetarian": false, "vegan": false, "location": "Mensa",
                 "price": {"students": 3.5, "employees": 5.0, "guests": 6.0},
                 "allergens": [{"code": "A1", "name": "Weizen"}]},
                {"name": "Omelett", "vegetarian": true, "vegan": false, "location": "Cafeteria",
                 "price": {"students": 2.5, "employees": 3.5, "guests": 4.5},
                 "allergens": [{"code": "C", "name": "Eier"}]}
            ]},
            {"date": "2024-03-05", "meals": [
                {"name": "Eintopf", "vegetarian": true, "vegan": true, "location": "Cafeteria",
                 "price": {"students": 2.2, "employees": 3.2, "guests": 4.2}, "allergens": []}
            ]}
        ]"#,
    );
    write(
        &dir.join("mh"),
        "meals.json",
        r#"[{"name": "Curry", "vegetarian": true, "vegan": true, "location": "Cafeteria-MH",
             "price": {"students": 2.6, "employees": 4.1, "guests": 5.0}, "date": "2024-03-04"}]"#,
    );
}
