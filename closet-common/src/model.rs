//! Inventory data model
//!
//! One `ClothingItem` per row of the inventory table. The closed attribute
//! sets (`ItemType`, `Style`, `Condition`) are enums; the multi-valued
//! weather column keeps its raw persisted text next to the parsed set so the
//! filter engine can match against either.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Emoji variation selector that follows each condition symbol
const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Garment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Top,
    Bottom,
    Dress,
    Shoes,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [ItemType::Top, ItemType::Bottom, ItemType::Dress, ItemType::Shoes];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Top => "Top",
            ItemType::Bottom => "Bottom",
            ItemType::Dress => "Dress",
            ItemType::Shoes => "Shoes",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ItemType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Validation(format!("Unknown item type: '{}'", s)))
    }
}

/// Dress code of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    Casual,
    Fancy,
}

impl Style {
    pub const ALL: [Style; 2] = [Style::Casual, Style::Fancy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Casual => "Casual",
            Style::Fancy => "Fancy",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Style::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Validation(format!("Unknown style: '{}'", s)))
    }
}

/// Discrete weather condition used to tag items and live readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// ❄️
    Cold,
    /// ☀️
    Sunny,
    /// ☁️
    Cloudy,
    /// 🌧️
    Rainy,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::Cold,
        Condition::Sunny,
        Condition::Cloudy,
        Condition::Rainy,
    ];

    /// Symbol as persisted in the inventory file, variation selector included
    pub fn symbol(&self) -> &'static str {
        match self {
            Condition::Cold => "\u{2744}\u{FE0F}",
            Condition::Sunny => "\u{2600}\u{FE0F}",
            Condition::Cloudy => "\u{2601}\u{FE0F}",
            Condition::Rainy => "\u{1F327}\u{FE0F}",
        }
    }

    /// ASCII name, usable in URLs
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Cold => "cold",
            Condition::Sunny => "sunny",
            Condition::Cloudy => "cloudy",
            Condition::Rainy => "rainy",
        }
    }

    fn base_char(&self) -> char {
        match self {
            Condition::Cold => '\u{2744}',
            Condition::Sunny => '\u{2600}',
            Condition::Cloudy => '\u{2601}',
            Condition::Rainy => '\u{1F327}',
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Condition {
    type Err = Error;

    /// Accepts the symbol with or without its variation selector, or the
    /// ASCII name in any case.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let bare = trimmed.trim_end_matches(VARIATION_SELECTOR);
        let mut chars = bare.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(cond) = Condition::ALL.into_iter().find(|k| k.base_char() == c) {
                return Ok(cond);
            }
        }
        Condition::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::Validation(format!("Unknown weather condition: '{}'", trimmed)))
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Weather tags of an item: the raw comma-joined column plus its parsed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherTags {
    raw: String,
    conditions: Vec<Condition>,
}

impl WeatherTags {
    /// Parse a persisted weather column. At least one condition is required.
    pub fn parse(raw: &str) -> Result<Self> {
        let conditions = parse_condition_list(raw)?;
        if conditions.is_empty() {
            return Err(Error::Validation("Weather must list at least one condition".to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            conditions,
        })
    }

    /// Build tags from conditions, joining their symbols with commas
    pub fn from_conditions(conditions: &[Condition]) -> Result<Self> {
        let mut unique: Vec<Condition> = Vec::with_capacity(conditions.len());
        for c in conditions {
            if !unique.contains(c) {
                unique.push(*c);
            }
        }
        if unique.is_empty() {
            return Err(Error::Validation("Weather must list at least one condition".to_string()));
        }
        let raw = unique.iter().map(Condition::symbol).collect::<Vec<_>>().join(",");
        Ok(Self {
            raw,
            conditions: unique,
        })
    }

    /// The column text exactly as persisted
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn contains(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }
}

impl fmt::Display for WeatherTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for WeatherTags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Parse a comma-separated condition list, skipping empty segments
pub fn parse_condition_list(text: &str) -> Result<Vec<Condition>> {
    let mut out = Vec::new();
    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let cond: Condition = part.parse()?;
        if !out.contains(&cond) {
            out.push(cond);
        }
    }
    Ok(out)
}

/// One row of the inventory table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClothingItem {
    pub item_name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub style: Style,
    pub weather: WeatherTags,
    pub image_url: String,
}

/// Row shape of the inventory CSV file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item_name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub style: String,
    pub weather: String,
    pub image_url: String,
}

impl TryFrom<ItemRecord> for ClothingItem {
    type Error = Error;

    fn try_from(record: ItemRecord) -> Result<Self> {
        if record.item_name.trim().is_empty() {
            return Err(Error::Validation("Item name is empty".to_string()));
        }
        Ok(Self {
            item_type: record.item_type.parse()?,
            style: record.style.parse()?,
            weather: WeatherTags::parse(&record.weather)?,
            item_name: record.item_name,
            image_url: record.image_url,
        })
    }
}

impl From<&ClothingItem> for ItemRecord {
    fn from(item: &ClothingItem) -> Self {
        Self {
            item_name: item.item_name.clone(),
            item_type: item.item_type.to_string(),
            style: item.style.to_string(),
            weather: item.weather.raw().to_string(),
            image_url: item.image_url.clone(),
        }
    }
}

/// Add-item form submission
///
/// Every field is required. Closed-set fields arrive as text and are
/// checked here, before anything touches the inventory file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewItem {
    #[serde(default)]
    pub item_name: String,
    #[serde(default, rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub weather: Vec<String>,
    #[serde(default)]
    pub image_url: String,
}

impl TryFrom<NewItem> for ClothingItem {
    type Error = Error;

    fn try_from(form: NewItem) -> Result<Self> {
        let missing = form.item_name.trim().is_empty()
            || form.item_type.trim().is_empty()
            || form.style.trim().is_empty()
            || form.weather.iter().all(|w| w.trim().is_empty())
            || form.image_url.trim().is_empty();
        if missing {
            return Err(Error::Validation("Please fill in all fields".to_string()));
        }

        let conditions = form
            .weather
            .iter()
            .filter(|w| !w.trim().is_empty())
            .map(|w| w.parse::<Condition>())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            item_name: form.item_name.trim().to_string(),
            item_type: form.item_type.parse()?,
            style: form.style.parse()?,
            weather: WeatherTags::from_conditions(&conditions)?,
            image_url: form.image_url.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_symbols_round_trip() {
        for cond in Condition::ALL {
            assert_eq!(cond.symbol().parse::<Condition>().unwrap(), cond);
            assert_eq!(cond.name().parse::<Condition>().unwrap(), cond);
        }
    }

    #[test]
    fn test_condition_without_variation_selector() {
        assert_eq!("\u{2744}".parse::<Condition>().unwrap(), Condition::Cold);
        assert_eq!("\u{1F327}".parse::<Condition>().unwrap(), Condition::Rainy);
        assert_eq!(" SUNNY ".parse::<Condition>().unwrap(), Condition::Sunny);
    }

    #[test]
    fn test_unknown_condition_rejected() {
        assert!("hail".parse::<Condition>().is_err());
        assert!("".parse::<Condition>().is_err());
    }

    #[test]
    fn test_weather_tags_keep_raw_text() {
        let raw = "\u{2744}\u{FE0F}, \u{2601}\u{FE0F}";
        let tags = WeatherTags::parse(raw).unwrap();
        assert_eq!(tags.raw(), raw);
        assert_eq!(tags.conditions(), &[Condition::Cold, Condition::Cloudy]);
    }

    #[test]
    fn test_weather_tags_reject_empty() {
        assert!(WeatherTags::parse("").is_err());
        assert!(WeatherTags::parse(" , ").is_err());
        assert!(WeatherTags::from_conditions(&[]).is_err());
    }

    #[test]
    fn test_from_conditions_joins_symbols() {
        let tags = WeatherTags::from_conditions(&[Condition::Sunny, Condition::Rainy, Condition::Sunny]).unwrap();
        assert_eq!(tags.raw(), "\u{2600}\u{FE0F},\u{1F327}\u{FE0F}");
        assert_eq!(tags.conditions().len(), 2);
    }

    #[test]
    fn test_item_type_and_style_parse() {
        assert_eq!("Dress".parse::<ItemType>().unwrap(), ItemType::Dress);
        assert_eq!("shoes".parse::<ItemType>().unwrap(), ItemType::Shoes);
        assert_eq!("Fancy".parse::<Style>().unwrap(), Style::Fancy);
        assert!("Hat".parse::<ItemType>().is_err());
        assert!("Sporty".parse::<Style>().is_err());
    }

    #[test]
    fn test_new_item_requires_all_fields() {
        let form = NewItem {
            item_name: "Blouse".to_string(),
            item_type: "Top".to_string(),
            style: "Fancy".to_string(),
            weather: vec![],
            image_url: "https://img/blouse.png".to_string(),
        };
        let err = ClothingItem::try_from(form).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_new_item_rejects_unknown_type() {
        let form = NewItem {
            item_name: "Scarf".to_string(),
            item_type: "Accessory".to_string(),
            style: "Casual".to_string(),
            weather: vec!["cold".to_string()],
            image_url: "https://img/scarf.png".to_string(),
        };
        assert!(ClothingItem::try_from(form).is_err());
    }

    #[test]
    fn test_new_item_converts() {
        let form = NewItem {
            item_name: " Raincoat ".to_string(),
            item_type: "Top".to_string(),
            style: "Casual".to_string(),
            weather: vec!["\u{1F327}\u{FE0F}".to_string(), "cold".to_string()],
            image_url: "https://img/raincoat.png".to_string(),
        };
        let item = ClothingItem::try_from(form).unwrap();
        assert_eq!(item.item_name, "Raincoat");
        assert_eq!(item.item_type, ItemType::Top);
        assert_eq!(item.weather.raw(), "\u{1F327}\u{FE0F},\u{2744}\u{FE0F}");
    }
}
