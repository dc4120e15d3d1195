//! CSV-backed inventory store
//!
//! The file is read once when the store is loaded and then only appended to.
//! Rows that do not parse into a valid `ClothingItem` are skipped with a
//! warning; new items are validated before they reach the file.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::model::{ClothingItem, ItemRecord, NewItem};
use crate::{Error, Result};

/// Column order of the inventory file
pub const HEADER: [&str; 5] = ["item_name", "type", "style", "weather", "image_url"];

/// Owns the inventory table and its backing file
#[derive(Debug)]
pub struct InventoryStore {
    path: PathBuf,
    items: Vec<ClothingItem>,
}

impl InventoryStore {
    /// Load the table from `path`, creating a header-only file if none exists
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            create_empty(&path)?;
        }
        let items = read_items(&path)?;
        info!(path = %path.display(), count = items.len(), "Loaded inventory");
        Ok(Self { path, items })
    }

    /// Re-read the file, replacing the in-memory table
    pub fn reload(&mut self) -> Result<()> {
        self.items = read_items(&self.path)?;
        debug!(count = self.items.len(), "Reloaded inventory");
        Ok(())
    }

    pub fn all(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one item to the file, then to the in-memory table
    pub fn append(&mut self, item: ClothingItem) -> Result<()> {
        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;

        let len = file.metadata()?.len();
        if len == 0 {
            file.write_all(format!("{}\n", HEADER.join(",")).as_bytes())?;
        } else if !ends_with_newline(&mut file, len)? {
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(ItemRecord::from(&item))?;
        writer.flush()?;

        info!(item = %item.item_name, item_type = %item.item_type, "Appended inventory item");
        self.items.push(item);
        Ok(())
    }

    /// Validate an add-item form submission and append it
    pub fn add(&mut self, form: NewItem) -> Result<ClothingItem> {
        let item = ClothingItem::try_from(form)?;
        self.append(item.clone())?;
        Ok(item)
    }
}

fn create_empty(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(format!("{}\n", HEADER.join(",")).as_bytes())?;
    warn!(path = %path.display(), "Inventory file not found, created an empty one");
    Ok(())
}

fn ends_with_newline(file: &mut File, len: u64) -> Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn read_items(path: &Path) -> Result<Vec<ClothingItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    if !headers.is_empty() {
        for column in HEADER {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(Error::Format(format!(
                    "{}: missing column '{}'",
                    path.display(),
                    column
                )));
            }
        }
    }

    let mut items = Vec::new();
    for (index, row) in reader.deserialize::<ItemRecord>().enumerate() {
        // header is line 1
        let line = index + 2;
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                warn!(line, error = %e, "Skipping unreadable inventory row");
                continue;
            }
        };
        match ClothingItem::try_from(record) {
            Ok(item) => items.push(item),
            Err(e) => warn!(line, error = %e, "Skipping invalid inventory row"),
        }
    }
    Ok(items)
}
