use std::io::Cursor;

use image::Rgba;

use super::*;
use crate::assets::source::AssetSource;
use crate::foundation::error::{AssetKind, BlockrayError};

#[derive(Debug)]
struct OnePng {
    rel: String,
    bytes: Vec<u8>,
}

impl AssetSource for OnePng {
    fn open(&self, rel: &str) -> BlockrayResult<Option<Vec<u8>>> {
        Ok((rel == self.rel).then(|| self.bytes.clone()))
    }

    fn describe(&self) -> String {
        "test".to_owned()
    }
}

fn png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn cache_with(path: &str, img: &RgbaImage) -> TextureCache {
    let id = ResourceId::parse(path).unwrap();
    let store = AssetStore::new().with_source(Box::new(OnePng {
        rel: id.texture_path(),
        bytes: png(img),
    }));
    TextureCache::new(Arc::new(store))
}

#[test]
fn repeated_gets_share_one_region_and_one_load() {
    let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 60, y as u8 * 60, 0, 255]));
    let cache = cache_with("block/grid", &img);
    let id = ResourceId::parse("block/grid").unwrap();
    let uv = UvRect::new(0.0, 0.0, 0.5, 0.5);

    let a = cache.get(&id, 0, uv).unwrap();
    let b = cache.get(&id, 0, uv).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.dimensions(), (2, 2));

    let full = cache.get(&id, 90, UvRect::FULL).unwrap();
    assert_eq!(full.dimensions(), (4, 4));
    assert_eq!(cache.load_count(), 1);
    assert_eq!(cache.cached_regions(), 2);
}

#[test]
fn degenerate_uv_yields_placeholder_after_loading() {
    let cache = cache_with("block/solid", &RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255])));
    let id = ResourceId::parse("block/solid").unwrap();

    let region = cache.get(&id, 0, UvRect::new(0.5, 0.0, 0.5, 1.0)).unwrap();
    assert!(Arc::ptr_eq(&region, &cache.placeholder()));
    assert_eq!(cache.load_count(), 1);

    let missing = ResourceId::parse("block/missing").unwrap();
    let err = cache
        .get(&missing, 0, UvRect::new(0.5, 0.0, 0.5, 1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        BlockrayError::NotFound {
            kind: AssetKind::Texture,
            ..
        }
    ));
}

#[test]
fn animation_strip_is_cut_to_first_frame() {
    let mut strip = RgbaImage::from_pixel(2, 8, Rgba([0, 0, 255, 255]));
    strip.put_pixel(1, 1, Rgba([255, 0, 0, 255]));
    let cache = cache_with("block/lava", &strip);
    let id = ResourceId::parse("block/lava").unwrap();

    let frame = cache.get(&id, 0, UvRect::FULL).unwrap();
    assert_eq!(frame.dimensions(), (2, 2));
    assert_eq!(frame.get_pixel(1, 1).0, [255, 0, 0, 255]);
}
