use std::collections::BTreeMap;

use glam::DVec3;

use crate::foundation::core::ResourceId;
use crate::foundation::error::{BlockrayError, BlockrayResult};
use crate::model::direction::Direction;
use crate::model::raw::{RawElement, RawFace, RawModel, RawTransform};
use crate::model::resolved::ElementRotation;
use crate::texture::ops::UvRect;

/// Parent value marking a flat, layered item model.
pub const GENERATED_PARENT: &str = "minecraft:builtin/generated";

/// Root every `block/...` model inherits from when it names no parent.
pub const BLOCK_ROOT: &str = "minecraft:block/block";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParentRef {
    None,
    Generated,
    Model(ResourceId),
}

/// Display transform of one model level; any field may be unset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayTransform {
    pub rotation: Option<DVec3>,
    pub translation: Option<DVec3>,
    pub scale: Option<DVec3>,
}

impl DisplayTransform {
    pub fn is_unset(&self) -> bool {
        self.rotation.is_none() && self.translation.is_none() && self.scale.is_none()
    }

    fn from_raw(raw: RawTransform) -> Self {
        Self {
            rotation: raw.rotation.map(DVec3::from_array),
            translation: raw.translation.map(DVec3::from_array),
            scale: raw.scale.map(DVec3::from_array),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnresolvedFace {
    /// Binding name with any leading `#` removed.
    pub texture: String,
    pub rotation: i32,
    pub uv: UvRect,
}

#[derive(Clone, Debug)]
pub struct UnresolvedElement {
    pub from: DVec3,
    pub to: DVec3,
    pub rotation: Option<ElementRotation>,
    faces: Vec<(Direction, UnresolvedFace)>,
}

impl UnresolvedElement {
    pub fn face(&self, direction: Direction) -> Option<&UnresolvedFace> {
        self.faces
            .iter()
            .find(|(d, _)| *d == direction)
            .map(|(_, f)| f)
    }

    fn from_raw(raw: RawElement) -> Self {
        let from = DVec3::from_array(raw.from) / 16.0;
        let to = DVec3::from_array(raw.to) / 16.0;
        let rotation = raw.rotation.map(|r| ElementRotation {
            origin: DVec3::from_array(r.origin) / 16.0,
            axis: r.axis,
            angle: r.angle,
            rescale: r.rescale,
        });

        let mut faces: Vec<_> = raw
            .faces
            .into_iter()
            .map(|(direction, face)| (direction, UnresolvedFace::from_raw(face, from, to, direction)))
            .collect();
        faces.sort_by_key(|(d, _)| d.index());

        Self {
            from,
            to,
            rotation,
            faces,
        }
    }
}

impl UnresolvedFace {
    fn from_raw(raw: RawFace, from: DVec3, to: DVec3, direction: Direction) -> Self {
        let uv = match raw.uv {
            Some([u0, v0, u1, v1]) => UvRect::new(u0 / 16.0, v0 / 16.0, u1 / 16.0, v1 / 16.0),
            None => dynamic_uv(from, to, direction),
        };
        let texture = raw
            .texture
            .strip_prefix('#')
            .unwrap_or(&raw.texture)
            .to_owned();
        Self {
            texture,
            rotation: raw.rotation,
            uv,
        }
    }
}

/// UV box implied by the element bounds when a face declares none.
///
/// Bounds are centered on the origin, projected onto the face's tangent axes, sign-flipped
/// so neighbouring faces line up, sorted, and shifted back into `[0, 1]`.
pub fn dynamic_uv(from: DVec3, to: DVec3, direction: Direction) -> UvRect {
    let from = from - 0.5;
    let to = to - 0.5;

    let (hor, vert) = match direction {
        Direction::East | Direction::West => (2, 1),
        Direction::Up | Direction::Down => (0, 2),
        Direction::North | Direction::South => (0, 1),
    };
    let (nx, ny) = match direction {
        Direction::West | Direction::South => (1.0, -1.0),
        Direction::Up => (1.0, 1.0),
        _ => (-1.0, -1.0),
    };

    let (x0, x1) = sorted(from[hor] * nx, to[hor] * nx);
    let (y0, y1) = sorted(from[vert] * ny, to[vert] * ny);
    UvRect::new(x0 + 0.5, y0 + 0.5, x1 + 0.5, y1 + 0.5)
}

fn sorted(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// One parsed model document, parent left as a reference.
#[derive(Clone, Debug)]
pub struct UnresolvedModel {
    pub id: ResourceId,
    pub parent: ParentRef,
    pub textures: BTreeMap<String, String>,
    pub elements: Vec<UnresolvedElement>,
    pub ambient_occlusion: Option<bool>,
    pub display: DisplayTransform,
}

impl UnresolvedModel {
    /// Parses a model document, reading its display transform from `display.<context>`.
    pub fn parse(id: &ResourceId, bytes: &[u8], display_context: &str) -> BlockrayResult<Self> {
        let raw: RawModel =
            serde_json::from_slice(bytes).map_err(|e| BlockrayError::parse(id, e.to_string()))?;

        let parent = match raw.parent.as_deref() {
            Some(p) => {
                let parent = ResourceId::parse(p)?;
                if parent.as_str() == GENERATED_PARENT {
                    ParentRef::Generated
                } else {
                    ParentRef::Model(parent)
                }
            }
            None if id.path().starts_with("block/") && id.path() != "block/block" => {
                ParentRef::Model(ResourceId::parse(BLOCK_ROOT)?)
            }
            None => ParentRef::None,
        };

        let display = raw
            .display
            .get(display_context)
            .copied()
            .map(DisplayTransform::from_raw)
            .unwrap_or_default();

        Ok(Self {
            id: id.clone(),
            parent,
            textures: raw.textures,
            elements: raw.elements.into_iter().map(UnresolvedElement::from_raw).collect(),
            ambient_occlusion: raw.ambient_occlusion,
            display,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/unresolved.rs"]
mod tests;
