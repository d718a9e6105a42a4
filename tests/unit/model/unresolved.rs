use super::*;
use crate::foundation::math::Axis;

fn id(s: &str) -> ResourceId {
    ResourceId::parse(s).unwrap()
}

#[test]
fn dynamic_uv_of_full_cube_covers_texture() {
    for d in Direction::ALL {
        assert_eq!(dynamic_uv(DVec3::ZERO, DVec3::ONE, d), UvRect::FULL, "{d:?}");
    }
}

#[test]
fn dynamic_uv_follows_face_orientation() {
    // a slab occupying the lower half, left quarter
    let from = DVec3::new(0.0, 0.0, 0.0);
    let to = DVec3::new(0.25, 0.5, 1.0);

    // south faces read x left-to-right, y top-down
    assert_eq!(
        dynamic_uv(from, to, Direction::South),
        UvRect::new(0.0, 0.5, 0.25, 1.0)
    );
    // north faces mirror x
    assert_eq!(
        dynamic_uv(from, to, Direction::North),
        UvRect::new(0.75, 0.5, 1.0, 1.0)
    );
    // up faces keep z as v
    assert_eq!(
        dynamic_uv(from, to, Direction::Up),
        UvRect::new(0.0, 0.0, 0.25, 1.0)
    );
}

#[test]
fn parse_divides_coordinates_and_strips_hash() {
    let json = br##"{
        "elements": [{
            "from": [0, 4, 8], "to": [16, 12, 16],
            "rotation": { "origin": [8, 8, 8], "axis": "y", "angle": 22.5, "rescale": true },
            "faces": {
                "north": { "texture": "#side", "uv": [0, 0, 8, 16], "rotation": 90, "cullface": "north" },
                "up": { "texture": "top" }
            }
        }]
    }"##;
    let m = UnresolvedModel::parse(&id("custom:thing"), json, "gui").unwrap();
    assert_eq!(m.parent, ParentRef::None);

    let e = &m.elements[0];
    assert_eq!(e.from, DVec3::new(0.0, 0.25, 0.5));
    assert_eq!(e.to, DVec3::new(1.0, 0.75, 1.0));
    let rot = e.rotation.unwrap();
    assert_eq!(rot.origin, DVec3::splat(0.5));
    assert_eq!(rot.axis, Axis::Y);
    assert!(rot.rescale);

    let north = e.face(Direction::North).unwrap();
    assert_eq!(north.texture, "side");
    assert_eq!(north.rotation, 90);
    assert_eq!(north.uv, UvRect::new(0.0, 0.0, 0.5, 1.0));
    assert_eq!(e.face(Direction::Up).unwrap().texture, "top");
    assert!(e.face(Direction::Down).is_none());
}

#[test]
fn block_models_get_implicit_root() {
    let m = UnresolvedModel::parse(&id("block/stone"), b"{}", "gui").unwrap();
    assert_eq!(m.parent, ParentRef::Model(id(BLOCK_ROOT)));

    let root = UnresolvedModel::parse(&id("block/block"), b"{}", "gui").unwrap();
    assert_eq!(root.parent, ParentRef::None);

    let item = UnresolvedModel::parse(&id("item/stick"), b"{}", "gui").unwrap();
    assert_eq!(item.parent, ParentRef::None);
}

#[test]
fn generated_parent_is_recognized_with_or_without_namespace() {
    for parent in ["builtin/generated", "minecraft:builtin/generated"] {
        let json = format!(r#"{{ "parent": "{parent}" }}"#);
        let m = UnresolvedModel::parse(&id("item/x"), json.as_bytes(), "gui").unwrap();
        assert_eq!(m.parent, ParentRef::Generated);
    }
}

#[test]
fn display_reads_requested_context_only() {
    let json = br#"{
        "display": {
            "gui": { "rotation": [30, 225, 0] },
            "fixed": { "scale": [0.5, 0.5, 0.5] }
        }
    }"#;
    let gui = UnresolvedModel::parse(&id("item/x"), json, "gui").unwrap();
    assert_eq!(gui.display.rotation, Some(DVec3::new(30.0, 225.0, 0.0)));
    assert_eq!(gui.display.scale, None);

    let fixed = UnresolvedModel::parse(&id("item/x"), json, "fixed").unwrap();
    assert_eq!(fixed.display.rotation, None);
    assert_eq!(fixed.display.scale, Some(DVec3::splat(0.5)));

    let ground = UnresolvedModel::parse(&id("item/x"), json, "ground").unwrap();
    assert!(ground.display.is_unset());
}

#[test]
fn malformed_documents_are_parse_errors() {
    let err = UnresolvedModel::parse(&id("item/bad"), b"{ \"elements\": 3 }", "gui").unwrap_err();
    match err {
        BlockrayError::Parse { id, .. } => assert_eq!(id, "minecraft:item/bad"),
        other => panic!("unexpected {other:?}"),
    }
}
