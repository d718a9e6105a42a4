//! blockray renders block and item model descriptions (cuboid elements, per-face textures,
//! parent inheritance, display transforms) to images with a small CPU ray tracer.
//!
//! # Pipeline overview
//!
//! 1. **Resolve assets**: overlays and the bundled defaults are stacked in an [`AssetStore`];
//!    the first source holding a path wins.
//! 2. **Resolve the model**: [`ModelResolver`] walks the parent chain and produces a
//!    [`ResolvedModel`], either geometric (elements) or layered (flat icon).
//! 3. **Build the scene**: elements become world-space [`Cuboid`]s seen by a [`Camera`].
//! 4. **Trace**: every pixel's hits are depth-sorted and accumulated front to back, rows in
//!    parallel on a rayon pool.
//! 5. **Post-process**: display translation, margin crop, scaling to the export size.
//!
//! [`ModelRenderer`] wires these together and owns the caches.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod foundation;
mod model;
mod render;
mod renderer;
mod scene;
mod texture;

pub use assets::decode::decode_texture;
pub use assets::source::{ArchiveSource, AssetSource, DirectorySource, EmbeddedSource};
pub use assets::store::{AssetStore, normalize_rel_path};
pub use config::RendererConfig;
pub use foundation::core::{Canvas, DEFAULT_NAMESPACE, ResourceId};
pub use foundation::error::{AssetKind, BlockrayError, BlockrayResult};
pub use foundation::math::{Axis, RotateAbout};
pub use model::direction::Direction;
pub use model::resolve::ModelResolver;
pub use model::resolved::{
    Element, ElementRotation, GeometricModel, LayeredModel, ResolvedModel,
};
pub use model::unresolved::{
    BLOCK_ROOT, DisplayTransform, GENERATED_PARENT, ParentRef, UnresolvedElement, UnresolvedFace,
    UnresolvedModel, dynamic_uv,
};
pub use render::composite::{accumulate, flatten_layers, over};
pub use render::post::{crop_margins, finish, translate};
pub use renderer::ModelRenderer;
pub use scene::build::{Hits, Scene};
pub use scene::camera::{Camera, Ray};
pub use scene::geometry::{Cuboid, Intersection, Rectangle};
pub use texture::cache::{Texture, TextureCache};
pub use texture::ops::{UvRect, crop_pixels, crop_uv, first_frame, rotate_expand, transparent_pixel};
