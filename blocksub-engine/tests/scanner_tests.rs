use blocksub_engine::{
    DiagnosticDeduplicator, GridHost, IoStats, MemoryWorld, RegionScanner, RuleTable,
};
use blocksub_types::{
    AttributeValue, CellPos, CellState, CellType, CellTypeRegistry, Identifier, Payload, RegionPos,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn id(raw: &str) -> Identifier {
    Identifier::normalize(raw).unwrap()
}

fn registry() -> CellTypeRegistry {
    let mut registry = CellTypeRegistry::new();
    registry.register(
        CellType::builder(id("a:x"))
            .int("p", 0, 3, 0)
            .int("q", 0, 3, 0)
            .build()
            .unwrap(),
    );
    registry.register(CellType::builder(id("a:y")).int("p", 0, 3, 0).build().unwrap());
    registry.register(CellType::plain(id("stone")));
    registry.register(
        CellType::builder(id("crafter"))
            .symbol("orientation", &["north_up", "up_east"], "north_up")
            .boolean("crafting", false)
            .build()
            .unwrap(),
    );
    registry.register(CellType::plain(id("crafting_table")));
    registry
}

fn world() -> MemoryWorld {
    MemoryWorld::new("overworld", registry(), 0..4).unwrap()
}

fn state(world: &MemoryWorld, raw: &str, attrs: &[(&str, AttributeValue)]) -> CellState {
    attrs.iter().fold(
        world.registry().default_state(&id(raw)).unwrap(),
        |state, (name, value)| state.try_assign(name, value.clone()).unwrap(),
    )
}

const ORIGIN: RegionPos = RegionPos::new(0, 0);

// ── Substitution ─────────────────────────────────────────────────

#[test]
fn scenario_three_cells_one_missing_attribute() {
    let world = world();
    let a = CellPos::new(1, 0, 1);
    let b = CellPos::new(2, 1, 3);
    let c = CellPos::new(15, 3, 15);
    world.set_cell(a, state(&world, "a:x", &[("p", AttributeValue::Int(1))]));
    world.set_cell(b, state(&world, "a:x", &[("p", AttributeValue::Int(1))]));
    world.set_cell(c, state(&world, "a:x", &[("q", AttributeValue::Int(2))]));

    let rules = RuleTable::build([("a:x", "a:y")]);
    let dedup = DiagnosticDeduplicator::new();
    let summary = RegionScanner::new(&world, &rules, &dedup).scan(ORIGIN);

    for pos in [a, b, c] {
        assert_eq!(world.cell(pos).id(), &id("a:y"));
        assert!(world.cell(pos).get("q").is_none());
    }
    assert_eq!(world.cell(a).get("p"), Some(&AttributeValue::Int(1)));
    assert_eq!(world.cell(b).get("p"), Some(&AttributeValue::Int(1)));
    assert_eq!(world.cell(c).get("p"), Some(&AttributeValue::Int(0)));

    // `q` was missing on all three cells but reported once.
    assert_eq!(dedup.reported(&id("a:x"), &id("a:y")), vec!["q"]);
    assert!(!dedup.report_once(&id("a:x"), &id("a:y"), "q"));

    assert_eq!(summary.len(), 1);
    assert_eq!(summary.get("a:x -> a:y"), 3);
    assert!(world.is_region_dirty(ORIGIN));
}

#[test]
fn payload_survives_substitution_byte_identical() {
    let world = world();
    let pos = CellPos::new(4, 2, 9);
    let payload = Payload::new(
        "crafter",
        json!({
            "items": [{"slot": 0, "id": "minecraft:stick", "count": 2}],
            "disabled_slots": [3, 5]
        }),
    );
    world.set_cell(pos, state(&world, "crafter", &[]));
    world.set_payload(pos, payload.clone());

    let rules = RuleTable::build([("crafter", "crafting_table")]);
    let dedup = DiagnosticDeduplicator::new();
    RegionScanner::new(&world, &rules, &dedup).scan(ORIGIN);

    assert_eq!(world.cell(pos).id(), &id("crafting_table"));
    let after = world.payload(pos).unwrap();
    assert_eq!(after.to_bytes().unwrap(), payload.to_bytes().unwrap());
    assert!(world.payload_changed(pos));
}

#[test]
fn host_drops_payload_without_carry_over() {
    use blocksub_engine::NotifyFlags;

    let world = world();
    let pos = CellPos::new(0, 0, 0);
    world.set_cell(pos, state(&world, "crafter", &[]));
    world.set_payload(pos, Payload::new("crafter", json!({})));

    world.write_cell_state(ORIGIN, pos, state(&world, "stone", &[]), NotifyFlags::ALL);

    assert!(world.payload(pos).is_none());
}

#[test]
fn unmapped_cells_are_untouched() {
    let world = world();
    let pos = CellPos::new(3, 1, 3);
    let payload = Payload::new("sign", json!({"text": "hello"}));
    world.set_cell(pos, state(&world, "stone", &[]));
    world.set_payload(pos, payload.clone());

    let rules = RuleTable::build([("a:x", "a:y")]);
    let dedup = DiagnosticDeduplicator::new();
    let summary = RegionScanner::new(&world, &rules, &dedup).scan(ORIGIN);

    assert!(summary.is_empty());
    assert_eq!(world.cell(pos), state(&world, "stone", &[]));
    assert_eq!(world.payload(pos), Some(payload));
    assert!(!world.is_region_dirty(ORIGIN));
    assert!(!world.payload_changed(pos));
    let stats = world.stats();
    assert_eq!(stats.cell_writes, 0);
    assert_eq!(stats.payload_reads, 0);
}

#[test]
fn empty_rule_table_performs_no_io() {
    let world = world();
    world.set_cell(CellPos::new(0, 0, 0), state(&world, "a:x", &[]));

    let rules = RuleTable::new();
    let dedup = DiagnosticDeduplicator::new();
    let summary = RegionScanner::new(&world, &rules, &dedup).scan(ORIGIN);

    assert!(summary.is_empty());
    assert_eq!(world.stats(), IoStats::default());
    assert!(!world.is_region_dirty(ORIGIN));
}

#[test]
fn scan_reads_every_cell_of_the_column() {
    let world = world();
    let rules = RuleTable::build([("a:x", "a:y")]);
    let dedup = DiagnosticDeduplicator::new();
    RegionScanner::new(&world, &rules, &dedup).scan(RegionPos::new(-1, 2));

    assert_eq!(world.stats().cell_reads, 16 * 16 * 4);
}

#[test]
fn unaddressable_region_scans_no_cells() {
    let world = world();
    let rules = RuleTable::build([("a:x", "a:y")]);
    let dedup = DiagnosticDeduplicator::new();

    let summary = RegionScanner::new(&world, &rules, &dedup).scan(RegionPos::new(200_000_000, 0));

    assert!(summary.is_empty());
    assert_eq!(world.stats(), IoStats::default());
}

#[test]
fn writes_notify_neighbors_and_clients() {
    let world = world();
    world.set_cell(CellPos::new(0, 0, 0), state(&world, "a:x", &[]));

    let rules = RuleTable::build([("a:x", "a:y")]);
    let dedup = DiagnosticDeduplicator::new();
    RegionScanner::new(&world, &rules, &dedup).scan(ORIGIN);

    let stats = world.stats();
    assert_eq!(stats.cell_writes, 1);
    assert_eq!(stats.neighbor_updates, 1);
    assert_eq!(stats.client_updates, 1);
}

#[test]
fn only_the_scanned_region_changes() {
    let world = world();
    let inside = CellPos::new(5, 0, 5);
    let outside = CellPos::new(21, 0, 5);
    world.set_cell(inside, state(&world, "a:x", &[]));
    world.set_cell(outside, state(&world, "a:x", &[]));

    let rules = RuleTable::build([("a:x", "a:y")]);
    let dedup = DiagnosticDeduplicator::new();
    RegionScanner::new(&world, &rules, &dedup).scan(ORIGIN);

    assert_eq!(world.cell(inside).id(), &id("a:y"));
    assert_eq!(world.cell(outside).id(), &id("a:x"));
    assert!(!world.is_region_dirty(RegionPos::new(1, 0)));
}

// ── Unresolved replacements ──────────────────────────────────────

#[test]
fn unknown_replacement_type_skips_cells() {
    let world = world();
    let pos = CellPos::new(7, 2, 7);
    world.set_cell(pos, state(&world, "a:x", &[("p", AttributeValue::Int(2))]));
    world.set_cell(CellPos::new(8, 2, 7), state(&world, "a:x", &[]));

    let rules = RuleTable::build([("a:x", "a:missing")]);
    let dedup = DiagnosticDeduplicator::new();
    let summary = RegionScanner::new(&world, &rules, &dedup).scan(ORIGIN);

    assert!(summary.is_empty());
    assert_eq!(world.cell(pos).get("p"), Some(&AttributeValue::Int(2)));
    assert!(!world.is_region_dirty(ORIGIN));
    assert_eq!(world.stats().cell_writes, 0);
    assert!(!dedup.report_unresolved_once(&id("a:x"), &id("a:missing")));
}

#[test]
fn mixed_rules_count_per_pair() {
    let world = world();
    world.set_cell(CellPos::new(0, 0, 0), state(&world, "a:x", &[]));
    world.set_cell(CellPos::new(0, 1, 0), state(&world, "crafter", &[]));
    world.set_cell(CellPos::new(0, 2, 0), state(&world, "crafter", &[]));

    let rules = RuleTable::build([("a:x", "a:y"), ("crafter", "crafting_table")]);
    let dedup = DiagnosticDeduplicator::new();
    let summary = RegionScanner::new(&world, &rules, &dedup).scan(ORIGIN);

    let entries: Vec<(&str, usize)> = summary.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("a:x -> a:y", 1),
            ("minecraft:crafter -> minecraft:crafting_table", 2),
        ]
    );
    assert_eq!(summary.total(), 3);
}
