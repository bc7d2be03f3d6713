//! Menu definition loader.
//!
//! Menu files list `<item>` records under a single root element. Each item
//! carries `name`, `tags` and an optional `color`, either as attributes or as
//! `<property name="..." value="..."/>` children:
//!
//! ```xml
//! <menu>
//!   <item name="Enemies" tags="enemy" color="FF6060FF"/>
//!   <item>
//!     <property name="name" value="Ground"/>
//!     <property name="tags" value="ground;snow"/>
//!   </item>
//! </menu>
//! ```

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::LoadError;

use super::descriptor::{CategoryDescriptor, Rgba, TagSet};

#[derive(Debug, Deserialize)]
struct MenuDocument {
    #[serde(rename = "item", default)]
    items: Vec<ItemNode>,
}

#[derive(Debug, Deserialize)]
struct ItemNode {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "@tags")]
    tags: Option<String>,
    #[serde(rename = "@color")]
    color: Option<String>,
    #[serde(rename = "property", default)]
    properties: Vec<PropertyNode>,
}

#[derive(Debug, Deserialize)]
struct PropertyNode {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@value")]
    value: Option<String>,
}

impl ItemNode {
    /// Attribute value, falling back to a `<property>` child of the same name.
    fn field(&self, key: &str) -> Option<&str> {
        let attribute = match key {
            "name" => self.name.as_deref(),
            "tags" => self.tags.as_deref(),
            "color" => self.color.as_deref(),
            _ => None,
        };
        attribute.or_else(|| {
            self.properties
                .iter()
                .find(|p| p.name == key)
                .and_then(|p| p.value.as_deref())
        })
    }
}

/// Read and parse a menu definition file.
pub fn parse_menu_file(path: &Path) -> Result<Vec<CategoryDescriptor>, LoadError> {
    let xml = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_menu_str(&xml, &path.display().to_string())
}

/// Parse menu XML. `origin` names the source in error messages.
pub fn parse_menu_str(xml: &str, origin: &str) -> Result<Vec<CategoryDescriptor>, LoadError> {
    let document: MenuDocument = quick_xml::de::from_str(xml).map_err(|source| LoadError::Xml {
        origin: origin.to_string(),
        source,
    })?;

    let mut seen = HashSet::new();
    let mut descriptors = Vec::with_capacity(document.items.len());

    for (index, item) in document.items.iter().enumerate() {
        let missing = |attribute| LoadError::MissingAttribute {
            origin: origin.to_string(),
            index,
            attribute,
        };

        let name = item.field("name").ok_or_else(|| missing("name"))?;
        let tag_string = item.field("tags").ok_or_else(|| missing("tags"))?;

        // Header entries have no color property
        let color = match item.field("color") {
            Some(value) => Rgba::from_hex(value).ok_or_else(|| LoadError::InvalidColor {
                name: name.to_string(),
                value: value.to_string(),
            })?,
            None => Rgba::WHITE,
        };

        let descriptor = CategoryDescriptor::new(name, color, TagSet::parse(tag_string));
        if !descriptor.is_header && descriptor.required_tags.is_empty() {
            return Err(LoadError::EmptyTags {
                name: descriptor.name,
            });
        }
        if !seen.insert(descriptor.name.clone()) {
            return Err(LoadError::DuplicateName {
                name: descriptor.name,
            });
        }

        debug!(
            "Menu item '{}' (color {}, header: {})",
            descriptor.name, descriptor.color, descriptor.is_header
        );
        descriptors.push(descriptor);
    }

    info!("Parsed {} menu entries from {}", descriptors.len(), origin);
    Ok(descriptors)
}
