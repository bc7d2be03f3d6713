//! Category descriptor types shared by the loader, matcher and catalog.

use std::collections::HashSet;
use std::fmt;

use bevy_egui::egui;

/// Tag that marks a menu entry as a section heading.
pub const HEADER_TAG: &str = "header";

/// Separator used by both menu files and asset settings files.
pub const TAG_SEPARATOR: char = ';';

/// Index of a descriptor (and its panel) inside a [`crate::catalog::Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub usize);

impl CategoryId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A set of tags parsed once from a `;`-delimited string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: HashSet<String>,
}

impl TagSet {
    /// Split a raw tag string. Empty segments and surrounding whitespace are dropped.
    pub fn parse(raw: &str) -> Self {
        let tags = raw
            .split(TAG_SEPARATOR)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        Self { tags }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True when at least one tag is present in both sets.
    pub fn intersects(&self, other: &TagSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.tags.iter().any(|tag| large.tags.contains(tag))
    }
}

/// Color of a menu entry, stored as straight (non-premultiplied) RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    /// Parse an 8-hex-digit `RRGGBBAA` string, with or without a leading `#`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 8 || !hex.is_ascii() {
            return None;
        }

        let mut channels = [0u8; 4];
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Rgba(channels))
    }

    pub fn to_egui(self) -> egui::Color32 {
        let [r, g, b, a] = self.0;
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

/// One menu grouping as declared in the menu definition file.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDescriptor {
    pub name: String,
    pub color: Rgba,
    pub required_tags: TagSet,
    /// Section label only; never receives placed items.
    pub is_header: bool,
}

impl CategoryDescriptor {
    pub fn new(name: impl Into<String>, color: Rgba, required_tags: TagSet) -> Self {
        let is_header = required_tags.contains(HEADER_TAG);
        Self {
            name: name.into(),
            color,
            required_tags,
            is_header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_set_parse_drops_empty_segments() {
        let tags = TagSet::parse("level; ground;;snow;");
        assert_eq!(tags.len(), 3);
        assert!(tags.contains("level"));
        assert!(tags.contains("ground"));
        assert!(tags.contains("snow"));
    }

    #[test]
    fn test_tag_set_parse_empty() {
        assert!(TagSet::parse("").is_empty());
        assert!(TagSet::parse(" ; ;").is_empty());
    }

    #[test]
    fn test_tag_set_intersects() {
        let a = TagSet::parse("ground;snow");
        let b = TagSet::parse("level;snow");
        let c = TagSet::parse("enemy");
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&TagSet::default()));
    }

    #[test]
    fn test_rgba_from_hex() {
        assert_eq!(Rgba::from_hex("FF000080"), Some(Rgba([255, 0, 0, 128])));
        assert_eq!(Rgba::from_hex("#00ff00ff"), Some(Rgba([0, 255, 0, 255])));
        assert_eq!(Rgba::from_hex("FFFFFF"), None);
        assert_eq!(Rgba::from_hex("GGGGGGGG"), None);
    }

    #[test]
    fn test_rgba_display_is_hex() {
        assert_eq!(Rgba([1, 2, 171, 255]).to_string(), "0102ABFF");
    }

    #[test]
    fn test_header_flag_keeps_tag() {
        let descriptor =
            CategoryDescriptor::new("---Ground---", Rgba::WHITE, TagSet::parse("header"));
        assert!(descriptor.is_header);
        assert!(descriptor.required_tags.contains(HEADER_TAG));
    }
}
