use std::path::PathBuf;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "blockray_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn pack_with(name: &str, rel: &str, bytes: &[u8]) -> PathBuf {
    let root = temp_dir(name);
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
    root
}

#[test]
fn normalize_rel_path_rejects_escape_attempts() {
    assert_eq!(
        normalize_rel_path("assets\\minecraft/./models//a.json").unwrap(),
        "assets/minecraft/models/a.json"
    );
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("assets/../secret").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn first_overlay_wins() {
    let rel = "assets/minecraft/models/block/thing.json";
    let a = pack_with("store_a", rel, b"A");
    let b = pack_with("store_b", rel, b"B");

    let store = AssetStore::from_packs(&[a.clone(), b.clone()], false).unwrap();
    assert_eq!(store.open(rel).unwrap().as_deref(), Some(&b"A"[..]));

    let store = AssetStore::from_packs(&[b, a], false).unwrap();
    assert_eq!(store.open(rel).unwrap().as_deref(), Some(&b"B"[..]));
}

#[test]
fn overlays_shadow_embedded_defaults() {
    let rel = "assets/minecraft/models/block/cube.json";
    let pack = pack_with("store_shadow", rel, b"{}");
    let store = AssetStore::from_packs(&[pack], true).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.open(rel).unwrap().as_deref(), Some(&b"{}"[..]));

    let internal_only = AssetStore::from_packs::<PathBuf>(&[], true).unwrap();
    let bundled = internal_only.open(rel).unwrap().unwrap();
    assert!(bundled.len() > 2);
}

#[test]
fn unsupported_overlay_fails_at_construction() {
    let root = temp_dir("store_unsupported");
    std::fs::create_dir_all(&root).unwrap();
    let rar = root.join("pack.rar");
    std::fs::write(&rar, b"x").unwrap();

    assert!(matches!(
        AssetStore::from_packs(&[rar], false),
        Err(BlockrayError::Config(_))
    ));
    assert!(matches!(
        AssetStore::from_packs(&[root.join("missing")], false),
        Err(BlockrayError::Config(_))
    ));
}

#[test]
fn missing_assets_report_kind_and_id() {
    let store = AssetStore::from_packs::<PathBuf>(&[], true).unwrap();
    let id = ResourceId::parse("block/does_not_exist").unwrap();

    match store.open_model(&id) {
        Err(BlockrayError::NotFound { kind, id }) => {
            assert_eq!(kind, AssetKind::Model);
            assert_eq!(id, "minecraft:block/does_not_exist");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        store.open_texture(&id),
        Err(BlockrayError::NotFound {
            kind: AssetKind::Texture,
            ..
        })
    ));
}
