//! Attribute filtering over the inventory table
//!
//! Categories combine with AND, values inside one category with OR, and an
//! empty category places no constraint. Results keep table order.
//!
//! Weather matching has two modes. `Substring` tests each selection as a
//! substring of the item's raw weather column, so a combined selection such
//! as `❄️,☁️` only matches items whose column contains that exact text.
//! `Strict` parses selections into conditions and tests set membership.

use serde::{Deserialize, Serialize};

use crate::model::{parse_condition_list, ClothingItem, Condition, ItemType, Style};
use crate::{Error, Result};

/// How weather selections are matched against an item's weather column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherMatch {
    /// Substring containment against the raw joined column
    #[default]
    Substring,
    /// Membership in the parsed condition set
    Strict,
}

/// Selected values for each filterable attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub types: Vec<ItemType>,
    pub styles: Vec<Style>,
    /// Free-text weather selections, usually raw column values
    pub weather: Vec<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.styles.is_empty() && self.weather.is_empty()
    }
}

/// Distinct attribute values present in the table, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub types: Vec<ItemType>,
    pub styles: Vec<Style>,
    pub weather: Vec<String>,
}

/// Compiled weather constraint
enum WeatherRule {
    Any,
    Substrings(Vec<String>),
    Members(Vec<Condition>),
}

impl WeatherRule {
    fn compile(selections: &[String], mode: WeatherMatch) -> Result<Self> {
        if selections.is_empty() {
            return Ok(WeatherRule::Any);
        }
        match mode {
            WeatherMatch::Substring => Ok(WeatherRule::Substrings(
                selections.iter().map(|s| substring_needle(s)).collect(),
            )),
            WeatherMatch::Strict => {
                let mut members = Vec::new();
                for sel in selections {
                    let parsed = parse_condition_list(sel)?;
                    if parsed.is_empty() {
                        return Err(Error::Validation(format!(
                            "Empty weather selection: '{}'",
                            sel
                        )));
                    }
                    members.extend(parsed);
                }
                Ok(WeatherRule::Members(members))
            }
        }
    }

    fn matches(&self, item: &ClothingItem) -> bool {
        match self {
            WeatherRule::Any => true,
            WeatherRule::Substrings(needles) => {
                let raw = item.weather.raw();
                needles.iter().any(|n| raw.contains(n.as_str()))
            }
            WeatherRule::Members(conds) => conds.iter().any(|c| item.weather.contains(*c)),
        }
    }
}

/// ASCII condition names stand in for their symbol; anything else is literal
fn substring_needle(selection: &str) -> String {
    let trimmed = selection.trim();
    Condition::ALL
        .into_iter()
        .find(|c| c.name().eq_ignore_ascii_case(trimmed))
        .map(|c| c.symbol().to_string())
        .unwrap_or_else(|| selection.to_string())
}

/// Items satisfying every non-empty category of `criteria`
pub fn filter_items<'a>(
    table: &'a [ClothingItem],
    criteria: &FilterCriteria,
    mode: WeatherMatch,
) -> Result<Vec<&'a ClothingItem>> {
    let weather = WeatherRule::compile(&criteria.weather, mode)?;

    Ok(table
        .iter()
        .filter(|item| criteria.types.is_empty() || criteria.types.contains(&item.item_type))
        .filter(|item| criteria.styles.is_empty() || criteria.styles.contains(&item.style))
        .filter(|item| weather.matches(item))
        .collect())
}

/// Items suitable for a single condition (weather view)
pub fn filter_by_condition(
    table: &[ClothingItem],
    condition: Condition,
    mode: WeatherMatch,
) -> Vec<&ClothingItem> {
    table
        .iter()
        .filter(|item| match mode {
            WeatherMatch::Substring => item.weather.raw().contains(condition.symbol()),
            WeatherMatch::Strict => item.weather.contains(condition),
        })
        .collect()
}

/// Distinct type, style and raw weather values for the filter widgets
pub fn filter_options(table: &[ClothingItem]) -> FilterOptions {
    let mut options = FilterOptions::default();
    for item in table {
        if !options.types.contains(&item.item_type) {
            options.types.push(item.item_type);
        }
        if !options.styles.contains(&item.style) {
            options.styles.push(item.style);
        }
        let raw = item.weather.raw();
        if !options.weather.iter().any(|w| w == raw) {
            options.weather.push(raw.to_string());
        }
    }
    options
}
