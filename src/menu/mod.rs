//! Editor menu definition: category descriptors, the XML loader and the tag matcher.

mod descriptor;
mod loader;
mod matcher;

#[cfg(test)]
mod tests;

pub use descriptor::{CategoryDescriptor, CategoryId, HEADER_TAG, Rgba, TAG_SEPARATOR, TagSet};
pub use loader::{parse_menu_file, parse_menu_str};
pub use matcher::find_categories;
