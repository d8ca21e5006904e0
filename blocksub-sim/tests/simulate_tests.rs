use blocksub_config::{ConfigStore, SubstitutionConfig};
use blocksub_sim::{SimulationReport, WorldFixture, simulate};
use blocksub_types::{AttributeValue, CellPos, Identifier, RegionPos};
use pretty_assertions::assert_eq;

const DEMO: &str = include_str!("../../demos/world.json");

fn id(raw: &str) -> Identifier {
    Identifier::normalize(raw).unwrap()
}

fn demo() -> WorldFixture {
    WorldFixture::from_json(DEMO).unwrap()
}

// ── Default rules ────────────────────────────────────────────────

#[test]
fn default_rules_rewrite_the_demo_world() {
    let sim = simulate(&demo(), &SubstitutionConfig::defaults()).unwrap();

    assert_eq!(
        sim.report,
        SimulationReport {
            startup_regions: 1,
            deferred_regions: 1,
            cells_replaced: 5,
            payloads_carried: 1,
            dirty_regions: 2,
        }
    );

    let door = sim.world.cell(CellPos::new(5, 2, 5));
    assert_eq!(door.id(), &id("iron_door"));
    assert_eq!(door.get("facing"), Some(&AttributeValue::symbol("west")));
    assert_eq!(door.get("half"), Some(&AttributeValue::symbol("upper")));
    assert_eq!(door.get("open"), Some(&AttributeValue::Bool(true)));

    assert_eq!(sim.world.cell(CellPos::new(3, 0, 4)).id(), &id("crafting_table"));
    assert_eq!(sim.world.cell(CellPos::new(0, -4, 0)).id(), &id("stone"));
    assert_eq!(sim.world.cell(CellPos::new(-8, 6, 40)).id(), &id("ochre_froglight"));
}

#[test]
fn crafter_payload_is_carried_over() {
    let fixture = demo();
    let before = fixture.build().unwrap().payload(CellPos::new(3, 0, 4)).unwrap();

    let sim = simulate(&fixture, &SubstitutionConfig::defaults()).unwrap();

    let after = sim.world.payload(CellPos::new(3, 0, 4)).unwrap();
    assert_eq!(after.to_bytes().unwrap(), before.to_bytes().unwrap());
    assert!(sim.world.payload_changed(CellPos::new(3, 0, 4)));
}

#[test]
fn missing_attributes_are_recorded_per_pair() {
    let sim = simulate(&demo(), &SubstitutionConfig::defaults()).unwrap();
    let diagnostics = sim.engine.diagnostics();

    assert_eq!(
        diagnostics.reported(&id("copper_bulb"), &id("ochre_froglight")),
        vec!["lit", "powered"]
    );
    assert_eq!(
        diagnostics.reported(&id("crafter"), &id("crafting_table")),
        vec!["crafting", "orientation", "triggered"]
    );
    assert!(diagnostics.reported(&id("copper_door"), &id("iron_door")).is_empty());
}

// ── Configuration ────────────────────────────────────────────────

#[test]
fn disabled_startup_scan_only_touches_deferred_regions() {
    let config = SubstitutionConfig {
        scan_overworld_on_startup: false,
        ..SubstitutionConfig::defaults()
    };
    let sim = simulate(&demo(), &config).unwrap();

    assert_eq!(sim.world.cell(CellPos::new(3, 0, 4)).id(), &id("crafter"));
    assert_eq!(sim.world.cell(CellPos::new(-3, 6, 33)).id(), &id("ochre_froglight"));
    assert_eq!(sim.report.cells_replaced, 2);
    assert!(!sim.world.is_region_dirty(RegionPos::new(0, 0)));
}

#[test]
fn config_loaded_from_disk_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path());
    let mut config = SubstitutionConfig::default();
    config.apply_mapping_text("copper_door -> stone\n# keep the rest default\n");
    store.save(&config).unwrap();

    let loaded = store.load();
    let sim = simulate(&demo(), &loaded).unwrap();

    // The user's door rule survives repair; the other defaults are merged in.
    assert_eq!(sim.world.cell(CellPos::new(5, 1, 5)).id(), &id("stone"));
    assert_eq!(sim.world.cell(CellPos::new(3, 0, 4)).id(), &id("crafting_table"));
}

#[test]
fn capture_reflects_the_rewritten_world() {
    let fixture = demo();
    let sim = simulate(&fixture, &SubstitutionConfig::defaults()).unwrap();

    let captured = fixture.capture(&sim.world);
    let reparsed = WorldFixture::from_json(&captured.to_json().unwrap()).unwrap();

    assert_eq!(reparsed, captured);
    assert!(reparsed.regions.iter().all(|region| region.available));
    let types: Vec<&str> = reparsed.regions[1]
        .cells
        .iter()
        .map(|cell| cell.cell_type.as_str())
        .collect();
    assert_eq!(types, vec!["minecraft:ochre_froglight", "minecraft:ochre_froglight"]);
}
