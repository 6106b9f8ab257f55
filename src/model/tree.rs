use super::item::Item;
use std::collections::{HashMap, HashSet};

/// Arena over an item snapshot, keyed by ID with a parent → children index
///
/// Built once per pass so that descendant walks and child counts do not rescan
/// the whole item list.
#[derive(Debug, Default)]
pub struct ItemTree {
    items: HashMap<String, Item>,
    /// Parent ID → child IDs, ordered by `child_order`
    children: HashMap<String, Vec<String>>,
}

/// An item together with its (filtered) descendants, in sibling order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtree {
    pub item: Item,
    pub children: Vec<Subtree>,
}

impl ItemTree {
    /// Build the arena from an item snapshot
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for item in &items {
            if let Some(parent_id) = &item.parent_id {
                children
                    .entry(parent_id.clone())
                    .or_default()
                    .push(item.id.clone());
            }
        }

        let items: HashMap<String, Item> =
            items.into_iter().map(|item| (item.id.clone(), item)).collect();

        for ids in children.values_mut() {
            // Stable sort keeps snapshot order for equal keys
            ids.sort_by_key(|id| items.get(id).map_or(i64::MAX, |i| i.child_order));
        }

        Self { items, children }
    }

    /// Direct children of an item, checked ones included, in sibling order
    pub fn children(&self, id: &str) -> impl Iterator<Item = &Item> {
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|child_id| self.items.get(child_id))
    }

    /// Collect the unchecked subtree rooted at `root_id`
    ///
    /// Returns `None` when the root is unknown or itself checked. Checked
    /// descendants are dropped together with everything below them.
    pub fn unchecked_subtree(&self, root_id: &str) -> Option<Subtree> {
        let mut visited = HashSet::new();
        self.collect_unchecked(root_id, &mut visited)
    }

    fn collect_unchecked(&self, id: &str, visited: &mut HashSet<String>) -> Option<Subtree> {
        let item = self.items.get(id)?;
        if item.checked || !visited.insert(id.to_string()) {
            return None;
        }

        let children = self
            .children(id)
            .filter_map(|child| self.collect_unchecked(&child.id, visited))
            .collect();

        Some(Subtree {
            item: item.clone(),
            children,
        })
    }
}
