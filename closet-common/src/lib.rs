//! # Closet Common Library
//!
//! Shared code for the virtual closet:
//! - Inventory data model and CSV-backed store
//! - Weather condition classification
//! - Attribute filtering and outfit composition
//! - Configuration loading

pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod inventory;
pub mod model;
pub mod outfit;

pub use classifier::{classify, WeatherReading};
pub use error::{Error, Result};
pub use filter::{filter_by_condition, filter_items, filter_options, FilterCriteria, WeatherMatch};
pub use inventory::InventoryStore;
pub use model::{ClothingItem, Condition, ItemType, NewItem, Style, WeatherTags};
pub use outfit::{compose_outfit, outfit_options, OutfitError, OutfitSelection};
