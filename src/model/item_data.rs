use crate::model::item::{Item, Project};
use std::collections::HashMap;

/// Snapshot of every project and item held by the file store
pub struct ItemData {
    /// Format version for the TOML file (current: 1)
    pub format_version: u32,

    /// All projects, in file order
    pub(crate) projects: Vec<Project>,

    /// All items stored in a Vec
    ///
    /// Vec keeps file order stable so the TOML output produces small diffs when
    /// the data file is version-controlled.
    pub(crate) items: Vec<Item>,

    /// Item ID → position in `items`
    ///
    /// Items are only ever appended, so positions stay valid for the lifetime
    /// of the snapshot. Not serialized; rebuilt from `items` on load.
    pub(crate) item_index: HashMap<String, usize>,
}

impl Default for ItemData {
    fn default() -> Self {
        Self {
            format_version: 1,
            projects: Vec::new(),
            items: Vec::new(),
            item_index: HashMap::new(),
        }
    }
}

// Serialize/Deserialize implementations are in serde_impl.rs

impl ItemData {
    /// Create a new empty ItemData instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from projects and items
    pub fn from_parts(projects: Vec<Project>, items: Vec<Item>) -> Self {
        let mut data = Self {
            projects,
            ..Self::default()
        };
        for item in items {
            data.add_item(item);
        }
        data
    }

    /// All projects, in file order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// All items, in file order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Add an item to the collection
    ///
    /// The caller is responsible for ID uniqueness; a duplicate ID shadows the
    /// earlier item in the index (last one wins).
    pub fn add_item(&mut self, item: Item) {
        self.item_index.insert(item.id.clone(), self.items.len());
        self.items.push(item);
    }

    /// Find an item by its ID
    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.item_index.get(id).map(|&pos| &self.items[pos])
    }

    /// Find an item by its ID and return a mutable reference
    pub fn find_item_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.item_index.get(id).map(|&pos| &mut self.items[pos])
    }

    /// Rebuild the ID index from the item list
    pub(crate) fn rebuild_index(&mut self) {
        self.item_index = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id.clone(), pos))
            .collect();
    }
}
