//! Outfit composition
//!
//! Two combinations are wearable: dress + shoes, or top + bottom + shoes.
//! Names are resolved against the inventory table per slot; when several
//! rows of the slot's type share a name the first one wins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ClothingItem, ItemType};

/// Message shown when the selection is neither legal combination
pub const COMBINATION_HINT: &str = "select either dress+shoes or top+bottom+shoes";

/// Outfit validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutfitError {
    #[error("{}", COMBINATION_HINT)]
    InvalidCombination,

    #[error("Unknown item: '{0}'")]
    UnknownItem(String),

    #[error("'{name}' is a {actual}, not a {expected}")]
    WrongType {
        name: String,
        expected: ItemType,
        actual: ItemType,
    },
}

/// Up to four named picks; blank names count as absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutfitSelection {
    #[serde(default)]
    pub dress: Option<String>,
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub bottom: Option<String>,
    #[serde(default)]
    pub shoes: Option<String>,
}

fn present(slot: &Option<String>) -> Option<&str> {
    slot.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl OutfitSelection {
    /// Slot order of a legal selection, without touching the inventory
    pub fn plan(&self) -> Result<Vec<(ItemType, &str)>, OutfitError> {
        let dress = present(&self.dress);
        let top = present(&self.top);
        let bottom = present(&self.bottom);
        let shoes = present(&self.shoes);

        match (dress, top, bottom, shoes) {
            (Some(d), None, None, Some(s)) => Ok(vec![(ItemType::Dress, d), (ItemType::Shoes, s)]),
            (None, Some(t), Some(b), Some(s)) => Ok(vec![
                (ItemType::Top, t),
                (ItemType::Bottom, b),
                (ItemType::Shoes, s),
            ]),
            _ => Err(OutfitError::InvalidCombination),
        }
    }
}

/// Validate the selection and resolve each pick to its inventory row
pub fn compose_outfit(
    table: &[ClothingItem],
    selection: &OutfitSelection,
) -> Result<Vec<ClothingItem>, OutfitError> {
    selection
        .plan()?
        .into_iter()
        .map(|(slot, name)| {
            if let Some(item) = table.iter().find(|i| i.item_name == name && i.item_type == slot) {
                return Ok(item.clone());
            }
            // named row exists, but only under another type
            match table.iter().find(|i| i.item_name == name) {
                Some(other) => Err(OutfitError::WrongType {
                    name: name.to_string(),
                    expected: slot,
                    actual: other.item_type,
                }),
                None => Err(OutfitError::UnknownItem(name.to_string())),
            }
        })
        .collect()
}

/// Item names per slot, in table order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutfitOptions {
    pub dresses: Vec<String>,
    pub tops: Vec<String>,
    pub bottoms: Vec<String>,
    pub shoes: Vec<String>,
}

pub fn outfit_options(table: &[ClothingItem]) -> OutfitOptions {
    let mut options = OutfitOptions::default();
    for item in table {
        let list = match item.item_type {
            ItemType::Dress => &mut options.dresses,
            ItemType::Top => &mut options.tops,
            ItemType::Bottom => &mut options.bottoms,
            ItemType::Shoes => &mut options.shoes,
        };
        list.push(item.item_name.clone());
    }
    options
}
