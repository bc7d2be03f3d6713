//! Tag matcher: which menu categories should list a given graphic.

use super::descriptor::{CategoryDescriptor, CategoryId, TagSet};

/// Return every category that targets at least one of `asset_tags`.
///
/// Results follow descriptor order and contain each category at most once,
/// however many tags intersect. Header entries never match. Editor master
/// tags (`level`, `world`) are not filtered here; menu files never list them
/// as required tags.
pub fn find_categories(asset_tags: &TagSet, categories: &[CategoryDescriptor]) -> Vec<CategoryId> {
    categories
        .iter()
        .enumerate()
        .filter(|(_, category)| !category.is_header)
        .filter(|(_, category)| category.required_tags.intersects(asset_tags))
        .map(|(index, _)| CategoryId(index))
        .collect()
}
