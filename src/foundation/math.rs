use glam::{DQuat, DVec3};

/// Principal axis of block space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> DVec3 {
        match self {
            Self::X => DVec3::X,
            Self::Y => DVec3::Y,
            Self::Z => DVec3::Z,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Right-handed rotation around an axis-aligned line through `pivot`.
pub trait RotateAbout {
    fn rotate_about(self, pivot: DVec3, axis: Axis, degrees: f64) -> Self;
}

impl RotateAbout for DVec3 {
    fn rotate_about(self, pivot: DVec3, axis: Axis, degrees: f64) -> Self {
        if degrees == 0.0 {
            return self;
        }
        let q = DQuat::from_axis_angle(axis.unit(), degrees.to_radians());
        pivot + q * (self - pivot)
    }
}
