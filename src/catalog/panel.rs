//! Category panels: write-once stacks of labelled images.

use crate::constants::{ITEM_GAP, ITEM_IMAGE_SIZE, ITEM_LABEL_HEIGHT};
use crate::menu::CategoryId;

/// Vertical space consumed by one placed item.
pub const ITEM_STRIDE: f32 = ITEM_LABEL_HEIGHT + ITEM_IMAGE_SIZE + ITEM_GAP;

/// A graphic listed in a category panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    /// Display name from the graphic's settings
    pub label: String,
    /// Path relative to the pixmaps directory, `/` separated
    pub image_path: String,
    /// Unique texture handle name derived from `image_path`
    pub image_id: String,
    /// Top of the label, relative to the panel's content origin
    pub y_offset: f32,
}

impl PlacedItem {
    pub fn image_y(&self) -> f32 {
        self.y_offset + ITEM_LABEL_HEIGHT
    }
}

/// Turn a pixmap path into a resource name: path separators become `+`.
///
/// Literal `+` and `%` are percent-escaped first, so `a+b.png` and `a/b.png`
/// keep distinct ids.
pub fn sanitize_image_id(image_path: &str) -> String {
    let mut id = String::with_capacity(image_path.len());
    for c in image_path.chars() {
        match c {
            '/' | '\\' => id.push('+'),
            '+' => id.push_str("%2B"),
            '%' => id.push_str("%25"),
            c => id.push(c),
        }
    }
    id
}

/// Items listed under one menu entry.
#[derive(Debug, Clone)]
pub struct CategoryPanel {
    category: CategoryId,
    items: Vec<PlacedItem>,
    next_y: f32,
}

impl CategoryPanel {
    pub fn new(category: CategoryId) -> Self {
        Self {
            category,
            items: Vec::new(),
            next_y: 0.0,
        }
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    /// Append an item below the previous one.
    ///
    /// Returns false if this image is already listed in the panel.
    pub fn place(&mut self, label: &str, image_path: &str) -> bool {
        if self.items.iter().any(|item| item.image_path == image_path) {
            return false;
        }
        let image_id = sanitize_image_id(image_path);

        self.items.push(PlacedItem {
            label: label.to_string(),
            image_path: image_path.to_string(),
            image_id,
            y_offset: self.next_y,
        });
        self.next_y += ITEM_STRIDE;
        true
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Offset where the next item will be placed.
    pub fn next_y(&self) -> f32 {
        self.next_y
    }

    /// Height needed to show every item, without the trailing gap.
    pub fn content_height(&self) -> f32 {
        if self.items.is_empty() {
            0.0
        } else {
            self.next_y - ITEM_GAP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_image_id() {
        assert_eq!(sanitize_image_id("ground/green/stone.png"), "ground+green+stone.png");
        assert_eq!(sanitize_image_id("enemy\\boss.png"), "enemy+boss.png");
    }

    #[test]
    fn test_plus_in_file_name_does_not_collide_with_separator() {
        assert_eq!(sanitize_image_id("a+b.png"), "a%2Bb.png");
        assert_eq!(sanitize_image_id("100%/x.png"), "100%25+x.png");
        assert_ne!(sanitize_image_id("a+b.png"), sanitize_image_id("a/b.png"));

        let mut panel = CategoryPanel::new(CategoryId(0));
        assert!(panel.place("Joined", "a+b.png"));
        assert!(panel.place("Nested", "a/b.png"));
        assert_eq!(panel.len(), 2);
        assert_ne!(panel.items()[0].image_id, panel.items()[1].image_id);
    }

    #[test]
    fn test_offset_grows_by_stride() {
        let mut panel = CategoryPanel::new(CategoryId(0));
        for k in 0..5 {
            assert_eq!(panel.next_y(), k as f32 * ITEM_STRIDE);
            assert!(panel.place(&format!("Item {}", k), &format!("items/{}.png", k)));
        }
        assert_eq!(panel.next_y(), 5.0 * (ITEM_LABEL_HEIGHT + ITEM_IMAGE_SIZE + ITEM_GAP));
        assert_eq!(panel.len(), 5);
    }

    #[test]
    fn test_items_keep_placement_order() {
        let mut panel = CategoryPanel::new(CategoryId(3));
        panel.place("Stone", "ground/stone.png");
        panel.place("Boss", "enemy/boss.png");

        let items = panel.items();
        assert_eq!(items[0].label, "Stone");
        assert_eq!(items[0].y_offset, 0.0);
        assert_eq!(items[0].image_y(), ITEM_LABEL_HEIGHT);
        assert_eq!(items[1].label, "Boss");
        assert_eq!(items[1].y_offset, ITEM_STRIDE);
        assert_eq!(items[1].image_id, "enemy+boss.png");
        assert_eq!(panel.category(), CategoryId(3));
    }

    #[test]
    fn test_duplicate_image_is_refused() {
        let mut panel = CategoryPanel::new(CategoryId(0));
        assert!(panel.place("Stone", "ground/stone.png"));
        assert!(!panel.place("Stone again", "ground/stone.png"));
        assert_eq!(panel.len(), 1);
        assert_eq!(panel.next_y(), ITEM_STRIDE);
    }

    #[test]
    fn test_content_height() {
        let mut panel = CategoryPanel::new(CategoryId(0));
        assert_eq!(panel.content_height(), 0.0);
        panel.place("Stone", "ground/stone.png");
        assert_eq!(panel.content_height(), ITEM_LABEL_HEIGHT + ITEM_IMAGE_SIZE);
    }
}
