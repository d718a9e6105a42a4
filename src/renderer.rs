use std::sync::Arc;

use image::RgbaImage;

use crate::assets::store::AssetStore;
use crate::config::RendererConfig;
use crate::foundation::core::{Canvas, ResourceId};
use crate::foundation::error::BlockrayResult;
use crate::model::resolve::ModelResolver;
use crate::model::resolved::{GeometricModel, ResolvedModel};
use crate::render::composite::flatten_layers;
use crate::render::pipeline::{build_thread_pool, trace_image};
use crate::render::post;
use crate::scene::build::Scene;
use crate::texture::cache::TextureCache;

/// A rendering session over one fixed set of asset sources.
///
/// Parsed models, resolved models and texture regions are cached for the lifetime of the
/// renderer; build a new one when the resource packs change.
pub struct ModelRenderer {
    config: RendererConfig,
    render_canvas: Canvas,
    export_canvas: Canvas,
    resolver: ModelResolver,
    pool: rayon::ThreadPool,
}

impl ModelRenderer {
    /// Opens the configured resource packs (plus the bundled defaults when enabled).
    pub fn new(config: RendererConfig) -> BlockrayResult<Self> {
        config.validate()?;
        let store = AssetStore::from_packs(&config.resource_packs, config.use_internal_resources)?;
        Self::with_store(config, store)
    }

    /// Uses a caller-assembled store; `resource_packs` and `use_internal_resources` are
    /// ignored.
    pub fn with_store(config: RendererConfig, store: AssetStore) -> BlockrayResult<Self> {
        config.validate()?;
        let store = Arc::new(store);
        let textures = Arc::new(TextureCache::new(Arc::clone(&store)));
        let resolver = ModelResolver::new(store, textures, config.display_context.clone());
        Ok(Self {
            render_canvas: config.render_canvas()?,
            export_canvas: config.export_canvas()?,
            pool: build_thread_pool(config.threads)?,
            resolver,
            config,
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn resolver(&self) -> &ModelResolver {
        &self.resolver
    }

    /// Renders the model named by `id` (`namespace:path`, namespace optional).
    pub fn render(&self, id: &str) -> BlockrayResult<RgbaImage> {
        self.render_id(&ResourceId::parse(id)?)
    }

    /// Geometric models come back at the export size; layered models at their natural size.
    #[tracing::instrument(skip(self))]
    pub fn render_id(&self, id: &ResourceId) -> BlockrayResult<RgbaImage> {
        match self.resolver.resolve(id)?.as_ref() {
            ResolvedModel::Layered(layered) => Ok(flatten_layers(&layered.layers)),
            ResolvedModel::Geometric(model) => self.render_geometric(model),
        }
    }

    fn render_geometric(&self, model: &GeometricModel) -> BlockrayResult<RgbaImage> {
        let scene = Arc::new(Scene::build(
            model,
            self.render_canvas,
            self.config.camera_distance,
            self.config.fov,
        ));
        tracing::debug!(objects = scene.objects.len(), "scene built");

        let traced = trace_image(&self.pool, scene, self.config.timeout())?;
        Ok(post::finish(
            &traced,
            model.translation,
            self.config.crop_horizontal,
            self.config.crop_vertical,
            self.export_canvas,
        ))
    }
}
