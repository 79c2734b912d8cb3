use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Record;

/// Typed view of a cleaned row, as consumed by the recommendation model.
///
/// Only meaningful after the pipeline has run: raw rows carry platform flags
/// as text and owner counts as ranges, which do not deserialize here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub short_description: String,
    pub detailed_description: String,
    #[serde(default)]
    pub short_description_clean: String,
    #[serde(default)]
    pub detailed_description_clean: String,
    pub header_image: String,
    #[serde(default)]
    pub supported_languages: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "tag_weights")]
    pub tags: Map<String, Value>,
    #[serde(default)]
    pub all_tags: Vec<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub windows: bool,
    #[serde(default)]
    pub mac: bool,
    #[serde(default)]
    pub linux: bool,
    #[serde(default)]
    pub estimated_owners: Option<i64>,
    #[serde(default)]
    pub developers: Option<Vec<String>>,
    #[serde(default)]
    pub publishers: Option<Vec<String>>,
}

impl GameRecord {
    pub fn from_record(record: &Record) -> Result<Self, serde_json::Error> {
        let mut game: GameRecord = serde_json::from_value(Value::Object(record.fields().clone()))?;
        game.key = record.key().to_string();
        Ok(game)
    }
}

// The storefront sends `[]` instead of `{}` for games without tags
fn tag_weights<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_game_from_clean_record() {
        let record = Record::new("730")
            .with("name", "Space Miner")
            .with("short_description", "Mine asteroids")
            .with("detailed_description", "Mine asteroids in deep space")
            .with("header_image", "https://example.com/h.jpg")
            .with("tags", json!([]))
            .with("all_tags", json!(["action", "indie", "space"]))
            .with("release_date", "2023-01-01")
            .with("windows", true)
            .with("estimated_owners", 20000)
            .with("developers", Value::Null)
            .with("price", 9.99);

        let game = GameRecord::from_record(&record).unwrap();
        assert_eq!(game.key, "730");
        assert_eq!(game.release_date, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert!(game.windows);
        assert!(!game.linux);
        assert_eq!(game.estimated_owners, Some(20000));
        assert!(game.tags.is_empty());
        assert_eq!(game.developers, None);
        assert_eq!(game.all_tags.len(), 3);
    }
}
