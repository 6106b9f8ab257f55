//! Item domain models
//!
//! This module contains the data structures shared by the store and the rule engines:
//! - `item`: Item, Project, Due and Priority value types
//! - `item_data`: Snapshot container backing the file store
//! - `queries`: Lookup methods for ItemData
//! - `serde_impl`: Serialization/deserialization implementations
//! - `recurrence`: Due-string recurrence parsing and date advancing
//! - `tree`: ID-keyed arena with a parent → children index

mod item;
mod item_data;
mod queries;
mod recurrence;
mod serde_impl;
mod tree;

// Re-export all public types
pub use item::{Due, Item, Priority, Project, local_now};
pub use item_data::ItemData;
pub use recurrence::{Recurrence, is_workday, weekday_name};
pub use tree::{ItemTree, Subtree};
