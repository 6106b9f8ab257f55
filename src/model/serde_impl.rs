//! Serialization and deserialization implementations for ItemData
//!
//! The ID index is derived state, so it is skipped on the way out and rebuilt
//! from the item list on the way in.

use super::item::{Item, Project};
use super::item_data::ItemData;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn default_format_version() -> u32 {
    1
}

/// On-disk shape of the data file
#[derive(Deserialize)]
struct ItemDataHelper {
    #[serde(default = "default_format_version")]
    format_version: u32,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    items: Vec<Item>,
}

impl<'de> Deserialize<'de> for ItemData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = ItemDataHelper::deserialize(deserializer)?;

        let mut data = ItemData {
            format_version: helper.format_version,
            projects: helper.projects,
            items: helper.items,
            ..ItemData::default()
        };
        data.rebuild_index();
        Ok(data)
    }
}

impl Serialize for ItemData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ItemData", 3)?;
        state.serialize_field("format_version", &self.format_version)?;
        state.serialize_field("projects", &self.projects)?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}
