use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use glam::DVec3;

use crate::assets::store::AssetStore;
use crate::foundation::core::ResourceId;
use crate::foundation::error::{BlockrayError, BlockrayResult};
use crate::foundation::memo::MemoCache;
use crate::model::direction::Direction;
use crate::model::resolved::{Element, GeometricModel, LayeredModel, ResolvedModel};
use crate::model::unresolved::{DisplayTransform, ParentRef, UnresolvedElement, UnresolvedModel};
use crate::texture::cache::{Texture, TextureCache};
use crate::texture::ops::UvRect;

/// Parses, inherits and caches models for one set of asset sources.
pub struct ModelResolver {
    store: Arc<AssetStore>,
    textures: Arc<TextureCache>,
    display_context: String,
    unresolved: MemoCache<ResourceId, Arc<UnresolvedModel>>,
    resolved: MemoCache<ResourceId, Arc<ResolvedModel>>,
}

impl ModelResolver {
    pub fn new(
        store: Arc<AssetStore>,
        textures: Arc<TextureCache>,
        display_context: impl Into<String>,
    ) -> Self {
        Self {
            store,
            textures,
            display_context: display_context.into(),
            unresolved: MemoCache::new(),
            resolved: MemoCache::new(),
        }
    }

    pub fn textures(&self) -> &Arc<TextureCache> {
        &self.textures
    }

    pub fn unresolved(&self, id: &ResourceId) -> BlockrayResult<Arc<UnresolvedModel>> {
        self.unresolved.get_or_try_init(id, || {
            let bytes = self.store.open_model(id)?;
            tracing::debug!(%id, "model parsed");
            Ok(Arc::new(UnresolvedModel::parse(
                id,
                &bytes,
                &self.display_context,
            )?))
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, id: &ResourceId) -> BlockrayResult<Arc<ResolvedModel>> {
        self.resolved
            .get_or_try_init(id, || Ok(Arc::new(self.resolve_uncached(id)?)))
    }

    fn parent_chain(&self, id: &ResourceId) -> BlockrayResult<Vec<Arc<UnresolvedModel>>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(id.clone());

        while let Some(current) = next {
            if !seen.insert(current.clone()) {
                let mut names: Vec<String> = chain
                    .iter()
                    .map(|m: &Arc<UnresolvedModel>| m.id.to_string())
                    .collect();
                names.push(current.to_string());
                return Err(BlockrayError::CyclicParent { chain: names });
            }
            let model = self.unresolved(&current)?;
            next = match &model.parent {
                ParentRef::Model(parent) => Some(parent.clone()),
                ParentRef::None | ParentRef::Generated => None,
            };
            chain.push(model);
        }
        Ok(chain)
    }

    fn resolve_uncached(&self, id: &ResourceId) -> BlockrayResult<ResolvedModel> {
        let chain = self.parent_chain(id)?;

        let mut elements: Option<&[UnresolvedElement]> = None;
        let mut bindings = BTreeMap::<String, String>::new();
        let mut display = DisplayTransform::default();
        let mut ambient_occlusion = None;
        let mut layered = false;

        for model in &chain {
            if elements.is_none() && !model.elements.is_empty() {
                elements = Some(model.elements.as_slice());
            }
            for (name, value) in &model.textures {
                bindings
                    .entry(name.clone())
                    .or_insert_with(|| value.clone());
            }
            // the first level defining any display field fixes all three
            if display.is_unset() {
                display = model.display;
            }
            if ambient_occlusion.is_none() {
                ambient_occlusion = model.ambient_occlusion;
            }
            layered |= model.parent == ParentRef::Generated;
        }

        let bindings = follow_indirections(&bindings);

        if layered {
            return Ok(ResolvedModel::Layered(LayeredModel {
                layers: self.resolve_layers(&bindings)?,
            }));
        }

        let elements = elements
            .unwrap_or_default()
            .iter()
            .map(|e| self.resolve_element(e, &bindings))
            .collect::<BlockrayResult<Vec<_>>>()?;

        Ok(ResolvedModel::Geometric(GeometricModel {
            elements,
            ambient_occlusion: ambient_occlusion.unwrap_or(true),
            rotation: display.rotation.unwrap_or(DVec3::ZERO),
            translation: display.translation.unwrap_or(DVec3::ZERO),
            scale: display.scale.unwrap_or(DVec3::ONE),
        }))
    }

    /// `layer0`, `layer1`, ... up to the first gap.
    fn resolve_layers(&self, bindings: &BTreeMap<String, String>) -> BlockrayResult<Vec<Texture>> {
        let mut layers = Vec::new();
        for i in 0.. {
            let name = format!("layer{i}");
            if !bindings.contains_key(&name) {
                break;
            }
            let id = binding_id(bindings, &name)?;
            layers.push(self.textures.get(&id, 0, UvRect::FULL)?);
        }
        Ok(layers)
    }

    fn resolve_element(
        &self,
        element: &UnresolvedElement,
        bindings: &BTreeMap<String, String>,
    ) -> BlockrayResult<Element> {
        let mut faces: [Texture; 6] = std::array::from_fn(|_| self.textures.placeholder());
        for direction in Direction::ALL {
            if let Some(face) = element.face(direction) {
                let id = binding_id(bindings, &face.texture)?;
                faces[direction.index()] = self.textures.get(&id, face.rotation, face.uv)?;
            }
        }
        Ok(Element::new(element.from, element.to, element.rotation, faces))
    }
}

/// Replaces `#name` values with what `name` is bound to, repeatedly. A chain that dangles or
/// loops keeps its last `#` value.
fn follow_indirections(bindings: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    bindings
        .iter()
        .map(|(name, value)| {
            let mut value = value;
            let mut hops = 0;
            while let Some(next) = value.strip_prefix('#').and_then(|n| bindings.get(n)) {
                if hops == bindings.len() {
                    break;
                }
                value = next;
                hops += 1;
            }
            (name.clone(), value.clone())
        })
        .collect()
}

fn binding_id(bindings: &BTreeMap<String, String>, name: &str) -> BlockrayResult<ResourceId> {
    match bindings.get(name) {
        Some(value) if !value.starts_with('#') => ResourceId::parse(value),
        _ => Err(BlockrayError::UndefinedTexture {
            name: name.to_owned(),
            available: bindings.keys().cloned().collect(),
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/resolve.rs"]
mod tests;
