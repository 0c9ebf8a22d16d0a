//! Read-side tests: listing, lookup, survivor classes and rendered pages over the sample data.

use std::path::Path;

use ror2wiki::catalog::{
    CatalogStore, CatalogStoreBuilder, ImportSources, Importer, Item, Monster, Survivor,
};
use ror2wiki::web::{render_json, render_text, Page, Route, Views};
use tempfile::TempDir;

fn sample_sources() -> ImportSources {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("data-dump");
    ImportSources {
        monsters: root.join("monster-data.csv"),
        items: root.join("item-data.csv"),
        survivors: root.join("survivor-data.csv"),
    }
}

fn seeded_store(dir: &TempDir) -> CatalogStore {
    let store = CatalogStoreBuilder::new(dir.path().join("catalog"))
        .open()
        .expect("open store");
    Importer::new(&store)
        .import_all(&sample_sources())
        .expect("import samples");
    store
}

#[test]
fn list_returns_every_record() {
    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir);

    let survivors: Vec<Survivor> = store.list().expect("survivors");
    let monsters: Vec<Monster> = store.list().expect("monsters");
    let items: Vec<Item> = store.list().expect("items");
    assert_eq!(survivors.len(), 5);
    assert_eq!(monsters.len(), 6);
    assert_eq!(items.len(), 5);

    let mut names: Vec<&str> = monsters.iter().map(|m| m.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "Beetle",
            "Beetle Queen",
            "Lemurian",
            "Lesser Wisp",
            "Stone Golem",
            "Stone Titan"
        ]
    );
}

#[test]
fn get_is_exact_match_only() {
    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir);

    let huntress: Survivor = store.get("Huntress").expect("huntress");
    assert_eq!(huntress.class, "Ranged");

    assert!(store.get::<Survivor>("huntress").unwrap_err().is_not_found());
    assert!(store.get::<Survivor>("Huntress ").unwrap_err().is_not_found());
    assert!(store.get::<Monster>("Huntress").unwrap_err().is_not_found());
    assert!(store.find::<Item>("Goat Hoof").expect("find").is_none());
}

#[test]
fn survivor_classes_are_distinct_and_sorted() {
    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir);
    assert_eq!(
        store.survivor_classes().expect("classes"),
        vec!["Hybrid", "Melee", "Ranged"]
    );
}

#[test]
fn survivor_classes_empty_store() {
    let dir = TempDir::new().expect("tempdir");
    let store = CatalogStore::open(dir.path().join("empty")).expect("open");
    assert!(store.survivor_classes().expect("classes").is_empty());
}

#[test]
fn detail_page_by_path() {
    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir);
    let views = Views::new(&store, "Risk of Rain 2 Wiki");

    let page = views.page("/item/Soldier%27s%20Syringe/").expect("page");
    match &page {
        Page::ItemDetail(ctx) => {
            assert_eq!(ctx.record.tier, "Common");
            assert_eq!(ctx.site.survivor_classes, vec!["Hybrid", "Melee", "Ranged"]);
        }
        other => panic!("unexpected page: {other:?}"),
    }

    let text = render_text(&page);
    assert!(text.starts_with("=== Item: Soldier's Syringe ==="));
    assert!(text.contains("Cooldown: -"));
    assert!(text.contains("Survivor classes: Hybrid, Melee, Ranged"));
}

#[test]
fn detail_routes_round_trip_through_paths() {
    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir);
    let views = Views::new(&store, "Risk of Rain 2 Wiki");

    let survivors: Vec<Survivor> = store.list().expect("survivors");
    for survivor in survivors {
        let path = Route::SurvivorDetail(survivor.name.clone()).path();
        match views.page(&path).expect("page") {
            Page::SurvivorDetail(ctx) => assert_eq!(ctx.record, survivor),
            other => panic!("{path} rendered {other:?}"),
        }
    }
}

#[test]
fn unknown_detail_is_not_found_page() {
    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir);
    let views = Views::new(&store, "Risk of Rain 2 Wiki");

    let page = views.page("/monster/Imp%20Overlord/").expect("page");
    assert!(page.is_not_found());
    assert!(render_text(&page).starts_with("=== 404 Not Found ==="));
}

#[test]
fn home_page_lists_all_collections() {
    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir);
    let views = Views::new(&store, "Risk of Rain 2 Wiki");

    let text = render_text(&views.page("/").expect("home"));
    assert!(text.starts_with("=== Risk of Rain 2 Wiki ==="));
    assert!(text.contains("--- Survivors (5) /survivors/ ---"));
    assert!(text.contains("--- Monsters (6) /monsters/ ---"));
    assert!(text.contains("--- Items (5) /items/ ---"));
    assert!(text.contains("MUL-T (Hybrid)  /survivor/MUL-T/"));
}

#[test]
fn list_page_json() {
    let dir = TempDir::new().expect("tempdir");
    let store = seeded_store(&dir);
    let views = Views::new(&store, "Risk of Rain 2 Wiki");

    let json = render_json(&views.page("/monsters/").expect("page")).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value["page"], "monster_list");
    assert_eq!(value["context"]["records"].as_array().map(Vec::len), Some(6));
    assert_eq!(
        value["context"]["site"]["survivor_classes"],
        serde_json::json!(["Hybrid", "Melee", "Ranged"])
    );
}
