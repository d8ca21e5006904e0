use blocksub_config::{format_mapping_text, parse_mapping_text};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn parses_both_separators() {
    let text = "crafter = crafting_table\ncopper_door -> iron_door\n";
    assert_eq!(
        parse_mapping_text(text),
        map(&[
            ("minecraft:copper_door", "minecraft:iron_door"),
            ("minecraft:crafter", "minecraft:crafting_table"),
        ])
    );
}

#[test]
fn skips_comments_and_blank_lines() {
    let text = "# header\n\n// note\n   \ncreate:gear = stone\n";
    assert_eq!(parse_mapping_text(text), map(&[("create:gear", "minecraft:stone")]));
}

#[test]
fn skips_lines_without_separator_or_sides() {
    let text = "just_a_name\n = stone\ndirt = \n";
    assert!(parse_mapping_text(text).is_empty());
}

#[test]
fn skips_invalid_identifiers() {
    let text = "Oak Log = stone\ndirt = gravel\n";
    assert_eq!(parse_mapping_text(text), map(&[("minecraft:dirt", "minecraft:gravel")]));
}

#[test]
fn later_line_wins() {
    let text = "dirt = gravel\nminecraft:dirt = sand\n";
    assert_eq!(parse_mapping_text(text), map(&[("minecraft:dirt", "minecraft:sand")]));
}

#[test]
fn handles_crlf() {
    let text = "dirt = gravel\r\nsand -> glass\r\n";
    assert_eq!(parse_mapping_text(text).len(), 2);
}

#[test]
fn format_then_parse_preserves_mappings() {
    let mappings = map(&[
        ("minecraft:crafter", "minecraft:crafting_table"),
        ("create:gear", "minecraft:stone"),
    ]);
    let text = format_mapping_text(&mappings);
    assert_eq!(text, "create:gear = minecraft:stone\nminecraft:crafter = minecraft:crafting_table");
    assert_eq!(parse_mapping_text(&text), mappings);
}
