use glam::DVec3;

use crate::foundation::math::Axis;
use crate::model::direction::Direction;
use crate::texture::cache::Texture;

/// Single-axis element rotation. `origin` is in normalized block space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementRotation {
    pub origin: DVec3,
    pub axis: Axis,
    pub angle: f64,
    pub rescale: bool,
}

impl ElementRotation {
    pub fn is_rotated(&self) -> bool {
        self.angle != 0.0
    }
}

/// Axis-aligned cuboid with one sampled texture per face.
#[derive(Clone, Debug)]
pub struct Element {
    pub from: DVec3,
    pub to: DVec3,
    pub rotation: Option<ElementRotation>,
    faces: [Texture; 6],
}

impl Element {
    pub(crate) fn new(
        from: DVec3,
        to: DVec3,
        rotation: Option<ElementRotation>,
        faces: [Texture; 6],
    ) -> Self {
        Self {
            from,
            to,
            rotation,
            faces,
        }
    }

    /// Unmapped faces hold the shared transparent placeholder, never nothing.
    pub fn face(&self, direction: Direction) -> &Texture {
        &self.faces[direction.index()]
    }
}

#[derive(Clone, Debug)]
pub struct GeometricModel {
    pub elements: Vec<Element>,
    pub ambient_occlusion: bool,
    pub rotation: DVec3,
    pub translation: DVec3,
    pub scale: DVec3,
}

/// Flat icon: layers drawn bottom (`layer0`) to top.
#[derive(Clone, Debug)]
pub struct LayeredModel {
    pub layers: Vec<Texture>,
}

#[derive(Clone, Debug)]
pub enum ResolvedModel {
    Geometric(GeometricModel),
    Layered(LayeredModel),
}

impl ResolvedModel {
    pub fn as_geometric(&self) -> Option<&GeometricModel> {
        match self {
            Self::Geometric(m) => Some(m),
            Self::Layered(_) => None,
        }
    }

    pub fn as_layered(&self) -> Option<&LayeredModel> {
        match self {
            Self::Layered(m) => Some(m),
            Self::Geometric(_) => None,
        }
    }
}
