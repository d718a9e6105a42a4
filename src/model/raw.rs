//! Serde mirror of the model JSON document. Unknown fields (`cullface`, `tintindex`,
//! `gui_light`, ...) are ignored.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::foundation::math::Axis;
use crate::model::direction::Direction;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawModel {
    pub parent: Option<String>,
    pub textures: BTreeMap<String, String>,
    pub elements: Vec<RawElement>,
    #[serde(rename = "ambientocclusion")]
    pub ambient_occlusion: Option<bool>,
    pub display: HashMap<String, RawTransform>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
pub(crate) struct RawTransform {
    pub rotation: Option<[f64; 3]>,
    pub translation: Option<[f64; 3]>,
    pub scale: Option<[f64; 3]>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawElement {
    pub from: [f64; 3],
    pub to: [f64; 3],
    #[serde(default)]
    pub rotation: Option<RawElementRotation>,
    #[serde(default)]
    pub faces: HashMap<Direction, RawFace>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawElementRotation {
    pub origin: [f64; 3],
    pub axis: Axis,
    pub angle: f64,
    #[serde(default)]
    pub rescale: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFace {
    pub texture: String,
    #[serde(default)]
    pub uv: Option<[f64; 4]>,
    #[serde(default)]
    pub rotation: i32,
}
