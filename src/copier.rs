//! Recursive item-tree duplication
//!
//! Copies keep content, shape and sibling order of the source tree but get
//! fresh IDs; the source items are never modified. Completed items, and
//! everything below them, are left out.

use crate::model::{ItemTree, Subtree};
use crate::store::ItemStore;
use anyhow::{Context, Result};

/// Outcome of a copy operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Top-level items copied
    pub roots: usize,
    /// Items created in total, roots included
    pub items: usize,
}

/// Copy an item and its unchecked descendants below `parent_id`
///
/// With `parent_id = None` the copy lands at the top level of the inbox.
/// The tree must be a snapshot taken before any copy is made so that copies
/// are never themselves traversed. Returns the number of items created.
pub fn copy_subtree(
    store: &mut dyn ItemStore,
    tree: &ItemTree,
    root_id: &str,
    parent_id: Option<&str>,
) -> Result<usize> {
    let Some(subtree) = tree.unchecked_subtree(root_id) else {
        tracing::debug!(item = root_id, "nothing to copy: item missing or completed");
        return Ok(0);
    };
    create_copies(store, &subtree, parent_id)
}

fn create_copies(
    store: &mut dyn ItemStore,
    node: &Subtree,
    parent_id: Option<&str>,
) -> Result<usize> {
    let copy = store
        .create_item(&node.item.content, parent_id, Some(node.item.child_order))
        .with_context(|| format!("Failed to copy item '{}'", node.item.id))?;

    let mut created = 1;
    for child in &node.children {
        created += create_copies(store, child, Some(&copy.id))?;
    }
    Ok(created)
}

/// Copy every top-level unchecked item of a project, with its subtree, into the inbox
///
/// An unknown project name or an empty project copies nothing.
pub fn copy_project_contents_to_inbox(
    store: &mut dyn ItemStore,
    project_name: &str,
) -> Result<CopyReport> {
    let Some(project_id) = store.find_project_id_by_name(project_name) else {
        tracing::warn!(project = project_name, "project not found, nothing to copy");
        return Ok(CopyReport::default());
    };

    let mut roots: Vec<_> = store
        .list_items_in_project(&project_id, false)
        .into_iter()
        .filter(|item| item.is_root())
        .collect();
    roots.sort_by_key(|item| item.child_order);

    let tree = ItemTree::from_items(store.list_all_items());
    let mut report = CopyReport::default();
    for root in &roots {
        let created = copy_subtree(store, &tree, &root.id, None)?;
        if created > 0 {
            report.roots += 1;
            report.items += created;
        }
    }

    tracing::info!(
        project = project_name,
        roots = report.roots,
        items = report.items,
        "copied checklist into inbox"
    );
    Ok(report)
}
