use super::*;

#[test]
fn bare_path_gets_default_namespace() {
    let id = ResourceId::parse("block/stone").unwrap();
    assert_eq!(id.namespace(), "minecraft");
    assert_eq!(id.path(), "block/stone");
    assert_eq!(id.to_string(), "minecraft:block/stone");
}

#[test]
fn equality_goes_through_canonical_form() {
    let a: ResourceId = "stone".parse().unwrap();
    let b: ResourceId = "minecraft:stone".parse().unwrap();
    let c: ResourceId = ":stone".parse().unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_ne!(a, ResourceId::parse("mod:stone").unwrap());
}

#[test]
fn asset_paths_follow_bundle_layout() {
    let id = ResourceId::parse("nova:item/wrench").unwrap();
    assert_eq!(id.model_path(), "assets/nova/models/item/wrench.json");
    assert_eq!(id.texture_path(), "assets/nova/textures/item/wrench.png");
}

#[test]
fn illegal_ids_are_rejected() {
    assert!(matches!(
        ResourceId::parse("minecraft:"),
        Err(BlockrayError::InvalidId(_))
    ));
    assert!(matches!(
        ResourceId::parse("mine/craft:stone"),
        Err(BlockrayError::InvalidId(_))
    ));
    assert!(matches!(
        ResourceId::parse("minecraft:block stone"),
        Err(BlockrayError::InvalidId(_))
    ));
}

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 16).is_err());
    let c = Canvas::new(32, 16).unwrap();
    assert_eq!(c.pixel_count(), 512);
    assert_eq!(c.aspect_ratio(), 2.0);
}
