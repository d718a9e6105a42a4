use glam::DVec3;

use crate::foundation::math::Axis;

/// One of the six cuboid faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Self; 6] = [
        Self::North,
        Self::East,
        Self::South,
        Self::West,
        Self::Up,
        Self::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Self::North | Self::South => Axis::Z,
            Self::East | Self::West => Axis::X,
            Self::Up | Self::Down => Axis::Y,
        }
    }

    /// Unit outward normal.
    pub fn normal(self) -> DVec3 {
        match self {
            Self::North => DVec3::NEG_Z,
            Self::East => DVec3::X,
            Self::South => DVec3::Z,
            Self::West => DVec3::NEG_X,
            Self::Up => DVec3::Y,
            Self::Down => DVec3::NEG_Y,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
