use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::RgbaImage;

use crate::assets::decode::decode_texture;
use crate::assets::store::AssetStore;
use crate::foundation::core::ResourceId;
use crate::foundation::error::BlockrayResult;
use crate::foundation::memo::MemoCache;
use crate::texture::ops::{UvRect, crop_uv, first_frame, rotate_expand, transparent_pixel};

/// Shared, immutable texture raster.
pub type Texture = Arc<RgbaImage>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct RegionKey {
    id: ResourceId,
    rotation: i32,
    uv: [u64; 4],
}

/// Memoized texture regions, keyed by `(id, rotation, uv)`.
///
/// Raw images are decoded at most once per id and trimmed to their first animation frame
/// before any region is cut from them.
pub struct TextureCache {
    store: Arc<AssetStore>,
    frames: MemoCache<ResourceId, Texture>,
    regions: MemoCache<RegionKey, Texture>,
    placeholder: Texture,
    loads: AtomicUsize,
}

impl TextureCache {
    pub fn new(store: Arc<AssetStore>) -> Self {
        Self {
            store,
            frames: MemoCache::new(),
            regions: MemoCache::new(),
            placeholder: Arc::new(transparent_pixel()),
            loads: AtomicUsize::new(0),
        }
    }

    /// The shared 1×1 transparent texture used for unmapped faces and degenerate UVs.
    pub fn placeholder(&self) -> Texture {
        Arc::clone(&self.placeholder)
    }

    /// First animation frame of the texture, unmapped.
    pub fn frame(&self, id: &ResourceId) -> BlockrayResult<Texture> {
        self.frames.get_or_try_init(id, || {
            let bytes = self.store.open_texture(id)?;
            self.loads.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(%id, "texture loaded");
            Ok(Arc::new(first_frame(decode_texture(id, &bytes)?)))
        })
    }

    pub fn get(&self, id: &ResourceId, rotation: i32, uv: UvRect) -> BlockrayResult<Texture> {
        let key = RegionKey {
            id: id.clone(),
            rotation,
            uv: uv.key_bits(),
        };
        self.regions.get_or_try_init(&key, || {
            // Load even for degenerate rects so a missing texture still surfaces.
            let frame = self.frame(id)?;
            if uv.is_degenerate() {
                return Ok(self.placeholder());
            }
            let mut region = crop_uv(&frame, uv);
            if rotation != 0 {
                region = rotate_expand(&region, f64::from(rotation));
            }
            Ok(Arc::new(region))
        })
    }

    /// Number of raw texture reads performed so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn cached_regions(&self) -> usize {
        self.regions.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/cache.rs"]
mod tests;
