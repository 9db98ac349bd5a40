use patrimonio_api::persistence::ASSETS_KEY;
use patrimonio_api::{Asset, OutcomeKind, PersistenceGateway};
use patrimonio_core::storage::{FileStore, MemoryStore};
use patrimonio_core::{Inventory, InventoryError};
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;

fn open_memory() -> (Arc<MemoryStore>, Inventory) {
    let store = Arc::new(MemoryStore::new());
    let inventory = Inventory::open(store.clone()).unwrap();
    (store, inventory)
}

#[test]
fn test_partitions_cover_every_asset_once() {
    let (_, inventory) = open_memory();
    let assets = vec![
        Asset::new("1").with_unit("FIN"),
        Asset::new("2").with_unit("  "),
        Asset::new("3"),
        Asset::new("4").with_unit("RH"),
    ];
    let summary = inventory.import(assets.clone()).unwrap();
    assert_eq!((summary.total, summary.located, summary.pending), (4, 2, 2));

    let located = inventory.located(None);
    let pending = inventory.pending(None);
    for asset in &assets {
        let in_located = located.iter().any(|a| a.asset_id == asset.asset_id);
        let in_pending = pending.iter().any(|a| a.asset_id == asset.asset_id);
        assert!(in_located ^ in_pending);
        assert_eq!(in_located, asset.is_located());
    }
}

#[test]
fn test_lookup_after_rebuild() {
    let (_, inventory) = open_memory();
    inventory
        .import(vec![Asset::new("tb-01"), Asset::new("TB-02 ")])
        .unwrap();

    assert!(inventory.lookup("TB-01").is_some());
    assert!(inventory.lookup(" tb-02").is_some());
    assert!(inventory.lookup("tb-03").is_none());
}

#[test]
fn test_import_replaces_collection_but_keeps_marks() {
    let (_, inventory) = open_memory();
    inventory
        .import(vec![Asset::new("old").with_unit("FIN"), Asset::new("keep")])
        .unwrap();
    inventory.register("old").unwrap();
    inventory.register("keep").unwrap();

    inventory.import(vec![Asset::new("keep"), Asset::new("new")]).unwrap();

    assert!(inventory.lookup("old").is_none());
    let stats = inventory.stats();
    assert_eq!(stats.total, 2);
    // Marks outlive the assets they were made for
    assert_eq!(stats.registered, 2);
    assert_eq!(inventory.registered(None).len(), 1);
    assert_eq!(
        inventory.register("keep").unwrap().kind(),
        OutcomeKind::AlreadyRegistered
    );
    assert_eq!(inventory.recent(100).len(), 3);
}

#[test]
fn test_duplicates_are_reported() {
    let (_, inventory) = open_memory();
    let summary = inventory
        .import(vec![
            Asset::new("9").with_description("first"),
            Asset::new("9").with_description("second"),
        ])
        .unwrap();
    assert_eq!(summary.duplicates, vec!["9"]);
    assert_eq!(
        inventory.lookup("9").unwrap().description.as_deref(),
        Some("second")
    );
}

#[test]
fn test_invalid_payload_leaves_state_untouched() {
    let (_, inventory) = open_memory();
    inventory.import(vec![Asset::new("1")]).unwrap();

    let err = inventory
        .import_json(json!([{"assetId": "2"}, 42]))
        .unwrap_err();
    assert!(matches!(err, InventoryError::InvalidImportShape(_)));
    assert!(inventory.lookup("1").is_some());
    assert!(inventory.lookup("2").is_none());
}

#[test]
fn test_import_json_canonicalizes_headers() {
    let (_, inventory) = open_memory();
    let summary = inventory
        .import_json(json!([
            {"Patrimônio": "100", "Descrição": "Mesa de reunião", "Unidade": "FIN", "Grupo": "ADM"},
            {"tombamento": 200, "grupo": "ADM"},
            {"descricao": "sem número"}
        ]))
        .unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.located, 1);
    assert_eq!(inventory.group_keys(), vec!["ADM"]);
    assert_eq!(inventory.group_members("ADM").len(), 2);
    assert_eq!(inventory.located(Some("REUNIAO")).len(), 1);
}

#[test]
fn test_failed_import_write_keeps_previous_collection() {
    let (store, inventory) = open_memory();
    inventory.import(vec![Asset::new("1")]).unwrap();

    store.set_fail_writes(true);
    assert!(inventory.import(vec![Asset::new("2")]).is_err());
    store.set_fail_writes(false);

    assert!(inventory.lookup("1").is_some());
    assert_eq!(inventory.stats().total, 1);
}

#[test]
fn test_reset_clears_everything() {
    let (store, inventory) = open_memory();
    inventory.import(vec![Asset::new("1")]).unwrap();
    inventory.register("1").unwrap();

    inventory.reset().unwrap();

    assert_eq!(inventory.stats(), Default::default());
    assert!(inventory.recent(10).is_empty());
    assert!(!store.contains(ASSETS_KEY));
}

#[test]
fn test_clear_registrations_keeps_assets() {
    let (_, inventory) = open_memory();
    inventory.import(vec![Asset::new("1"), Asset::new("2")]).unwrap();
    inventory.register("1").unwrap();
    inventory.attach_observation("1", "idle", None).unwrap();

    assert_eq!(inventory.clear_registrations().unwrap(), 1);
    assert_eq!(inventory.stats().registered, 0);
    assert_eq!(inventory.stats().total, 2);
    assert!(inventory.observation("1").is_none());
    assert!(inventory.verify().is_empty());
    assert_eq!(inventory.register("1").unwrap().kind(), OutcomeKind::Success);
}

#[test]
fn test_state_survives_reopen_from_files() {
    let dir = tempdir().unwrap();
    {
        let store = Arc::new(FileStore::new(dir.path()).unwrap());
        let inventory = Inventory::open(store).unwrap();
        inventory
            .import(vec![Asset::new("1").with_unit("FIN"), Asset::new("2")])
            .unwrap();
        inventory.register("2").unwrap();
        inventory.attach_observation("2", "damaged", None).unwrap();
    }

    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let inventory = Inventory::open(store.clone()).unwrap();
    assert_eq!(inventory.stats().total, 2);
    assert_eq!(inventory.stats().registered, 1);
    assert_eq!(inventory.registered(None)[0].0.asset_id, "2");
    assert_eq!(inventory.observation("2").unwrap().note, "damaged");
    assert_eq!(inventory.recent(5).len(), 1);
    assert!(store.load(ASSETS_KEY).unwrap().is_some());
}

#[test]
fn test_corrupt_history_file_starts_empty() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("history.json"), b"[{broken").unwrap();

    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    let inventory = Inventory::open(store).unwrap();
    assert!(inventory.recent(10).is_empty());
}

#[test]
fn test_corrupt_registrations_file_refuses_to_open() {
    let dir = tempdir().unwrap();
    {
        let store = Arc::new(FileStore::new(dir.path()).unwrap());
        let inventory = Inventory::open(store).unwrap();
        inventory
            .import(vec![Asset::new("1"), Asset::new("2"), Asset::new("3")])
            .unwrap();
        inventory.register("1").unwrap();
        inventory.register("2").unwrap();
    }

    let path = dir.path().join("registrations.json");
    let original = std::fs::read(&path).unwrap();
    std::fs::write(&path, &original[..original.len() - 2]).unwrap();

    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    assert!(matches!(
        Inventory::open(store),
        Err(InventoryError::Persistence(_))
    ));
    // The damaged marks are left for the operator, not overwritten
    assert_eq!(std::fs::read(&path).unwrap(), &original[..original.len() - 2]);
}

#[test]
fn test_undecodable_assets_refuse_to_open() {
    let store = Arc::new(MemoryStore::new());
    store.save(ASSETS_KEY, &json!({"not": "a list"})).unwrap();
    assert!(matches!(
        Inventory::open(store),
        Err(InventoryError::Persistence(_))
    ));
}
