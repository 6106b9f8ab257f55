//! Query methods for ItemData
//!
//! Lookups used by the file store to answer `ItemStore` calls.

use super::item::Item;
use super::item_data::ItemData;

impl ItemData {
    /// Return the ID of the first project with the given name
    ///
    /// Project names are not unique; when several share a name the first one
    /// in file order wins.
    pub fn find_project_id_by_name(&self, name: &str) -> Option<String> {
        let mut matches = self.projects.iter().filter(|p| p.name == name);
        let first = matches.next()?;
        if matches.next().is_some() {
            tracing::debug!(
                project = name,
                id = %first.id,
                "several projects share this name, using the first"
            );
        }
        Some(first.id.clone())
    }

    /// Return the ID of the inbox project
    ///
    /// A project flagged `inbox = true` takes precedence over one merely named
    /// like the fallback inbox name.
    pub fn inbox_project_id(&self, fallback_name: &str) -> Option<String> {
        self.projects
            .iter()
            .find(|p| p.inbox)
            .map(|p| p.id.clone())
            .or_else(|| self.find_project_id_by_name(fallback_name))
    }

    /// List the items of a project, optionally including completed ones
    pub fn items_in_project(&self, project_id: &str, include_checked: bool) -> Vec<Item> {
        self.items
            .iter()
            .filter(|i| i.project_id == project_id && (include_checked || !i.checked))
            .cloned()
            .collect()
    }

    /// Next free ordering key below a parent (or at a project's top level)
    pub fn next_child_order(&self, project_id: &str, parent_id: Option<&str>) -> i64 {
        self.items
            .iter()
            .filter(|i| i.project_id == project_id && i.parent_id.as_deref() == parent_id)
            .map(|i| i.child_order)
            .max()
            .map_or(1, |max| max + 1)
    }
}
