//! Unit tests for the menu loader and tag matcher.

use std::io::Write;

use super::*;
use crate::error::LoadError;

const SAMPLE_MENU: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<menu>
  <item name="---Creatures---" tags="header"/>
  <item name="Enemies" tags="enemy" color="FF6060FF"/>
  <item>
    <property name="name" value="Ground"/>
    <property name="tags" value="ground;snow"/>
    <property name="color" value="80FF80FF"/>
  </item>
</menu>
"#;

fn names(descriptors: &[CategoryDescriptor]) -> Vec<&str> {
    descriptors.iter().map(|d| d.name.as_str()).collect()
}

// Loader tests
#[test]
fn test_parse_preserves_file_order() {
    let menu = parse_menu_str(SAMPLE_MENU, "sample").unwrap();
    assert_eq!(names(&menu), vec!["---Creatures---", "Enemies", "Ground"]);
}

#[test]
fn test_parse_attribute_and_property_forms() {
    let menu = parse_menu_str(SAMPLE_MENU, "sample").unwrap();

    assert_eq!(menu[1].color, Rgba([0xFF, 0x60, 0x60, 0xFF]));
    assert!(menu[1].required_tags.contains("enemy"));

    assert_eq!(menu[2].color, Rgba([0x80, 0xFF, 0x80, 0xFF]));
    assert!(menu[2].required_tags.contains("ground"));
    assert!(menu[2].required_tags.contains("snow"));
}

#[test]
fn test_parse_header_defaults_to_white() {
    let menu = parse_menu_str(SAMPLE_MENU, "sample").unwrap();
    assert!(menu[0].is_header);
    assert!(menu[0].required_tags.contains(HEADER_TAG));
    assert_eq!(menu[0].color, Rgba::WHITE);
    assert!(!menu[1].is_header);
}

#[test]
fn test_attribute_wins_over_property() {
    let xml = r#"<menu><item name="Direct" tags="a">
        <property name="name" value="Shadowed"/>
    </item></menu>"#;
    let menu = parse_menu_str(xml, "inline").unwrap();
    assert_eq!(menu[0].name, "Direct");
}

#[test]
fn test_empty_menu_is_valid() {
    let menu = parse_menu_str("<menu></menu>", "inline").unwrap();
    assert!(menu.is_empty());
}

#[test]
fn test_missing_name_fails() {
    let xml = r#"<menu><item tags="enemy"/></menu>"#;
    match parse_menu_str(xml, "inline") {
        Err(LoadError::MissingAttribute {
            index, attribute, ..
        }) => {
            assert_eq!(index, 0);
            assert_eq!(attribute, "name");
        }
        other => panic!("expected MissingAttribute, got {:?}", other),
    }
}

#[test]
fn test_missing_tags_fails() {
    let xml = r#"<menu><item name="Ok" tags="a"/><item name="Broken"/></menu>"#;
    match parse_menu_str(xml, "inline") {
        Err(LoadError::MissingAttribute {
            index, attribute, ..
        }) => {
            assert_eq!(index, 1);
            assert_eq!(attribute, "tags");
        }
        other => panic!("expected MissingAttribute, got {:?}", other),
    }
}

#[test]
fn test_invalid_color_fails() {
    let xml = r#"<menu><item name="Bad" tags="a" color="red"/></menu>"#;
    assert!(matches!(
        parse_menu_str(xml, "inline"),
        Err(LoadError::InvalidColor { .. })
    ));
}

#[test]
fn test_empty_tags_fail_for_regular_items() {
    let xml = r#"<menu><item name="Nothing" tags=";;"/></menu>"#;
    assert!(matches!(
        parse_menu_str(xml, "inline"),
        Err(LoadError::EmptyTags { .. })
    ));
}

#[test]
fn test_duplicate_names_fail() {
    let xml = r#"<menu><item name="Twice" tags="a"/><item name="Twice" tags="b"/></menu>"#;
    assert!(matches!(
        parse_menu_str(xml, "inline"),
        Err(LoadError::DuplicateName { .. })
    ));
}

#[test]
fn test_malformed_xml_fails() {
    assert!(matches!(
        parse_menu_str("<menu><item name=", "inline"),
        Err(LoadError::Xml { .. })
    ));
}

#[test]
fn test_parse_menu_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_menu_file(&dir.path().join("does_not_exist.xml"));
    assert!(matches!(result, Err(LoadError::Io { .. })));
}

#[test]
fn test_parse_menu_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level_items.xml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(SAMPLE_MENU.as_bytes()).unwrap();

    let menu = parse_menu_file(&path).unwrap();
    assert_eq!(menu.len(), 3);
}

// Matcher tests
fn enemies_and_ground() -> Vec<CategoryDescriptor> {
    vec![
        CategoryDescriptor::new("Enemies", Rgba::WHITE, TagSet::parse("enemy")),
        CategoryDescriptor::new("Ground", Rgba::WHITE, TagSet::parse("ground;snow")),
    ]
}

#[test]
fn test_match_single_category() {
    let found = find_categories(&TagSet::parse("level;ground"), &enemies_and_ground());
    assert_eq!(found, vec![CategoryId(1)]);
}

#[test]
fn test_match_multiple_categories_in_declaration_order() {
    let found = find_categories(&TagSet::parse("ground;level;enemy"), &enemies_and_ground());
    assert_eq!(found, vec![CategoryId(0), CategoryId(1)]);
}

#[test]
fn test_match_is_deduplicated_per_category() {
    let found = find_categories(&TagSet::parse("snow;ground"), &enemies_and_ground());
    assert_eq!(found, vec![CategoryId(1)]);
}

#[test]
fn test_match_nothing() {
    let found = find_categories(&TagSet::parse("level;water"), &enemies_and_ground());
    assert!(found.is_empty());
}

#[test]
fn test_headers_never_match() {
    let categories = vec![
        CategoryDescriptor::new("---Heading---", Rgba::WHITE, TagSet::parse("header;enemy")),
        CategoryDescriptor::new("Enemies", Rgba::WHITE, TagSet::parse("enemy")),
    ];
    let found = find_categories(&TagSet::parse("enemy;header"), &categories);
    assert_eq!(found, vec![CategoryId(1)]);
}
