//! Ordered loader registry and per-context loader pools.
//!
//! [`TextureLoaders`] is a host-owned registry of loader factories, probed
//! in registration order: the first loader whose `can_load` claims an input
//! wins. [`LoaderPool`] instantiates those factories lazily against one
//! [`RenderContext`] and routes inputs to the winning instance.

use std::{collections::hash_map::Entry, fmt, sync::Arc};

use indexmap::IndexMap;
use vitrail_core::collections::HashMap;

use crate::{
    context::RenderContext,
    error::LoadError,
    loader::{TextureInput, TextureLoad, TextureLoader},
    texture::Texture2d,
};

/// Builds a fresh loader instance over a context.
pub type LoaderFactory =
    Box<dyn Fn(Arc<dyn RenderContext>) -> Box<dyn TextureLoader> + Send + Sync>;

/// Registry of named loader factories, kept in registration order.
///
/// Registration may happen at any time, including after pools have started
/// routing inputs; later probes see the updated registry. Re-registering a
/// name replaces its factory in place.
#[derive(Default)]
pub struct TextureLoaders {
    entries: IndexMap<&'static str, LoaderFactory>,
}

impl TextureLoaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: &'static str, factory: F)
    where
        F: Fn(Arc<dyn RenderContext>) -> Box<dyn TextureLoader> + Send + Sync + 'static,
    {
        let replaced = self.entries.insert(name, Box::new(factory)).is_some();
        tracing::debug!(name, replaced, "texture loader registered");
    }

    /// Unregisters `name`, preserving the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.entries.shift_remove(name).is_some();
        if removed {
            tracing::debug!(name, "texture loader removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, in probe order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&'static str, &LoaderFactory)> + '_ {
        self.entries.iter().map(|(name, factory)| (*name, factory))
    }
}

impl fmt::Debug for TextureLoaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Lazily-instantiated loaders bound to one rendering context.
///
/// A pool owns at most one instance per registered name. Instances are
/// constructed the first time a probe reaches them and reused afterwards,
/// so routing the same input twice hits the same loader state.
pub struct LoaderPool {
    context: Arc<dyn RenderContext>,
    instances: HashMap<&'static str, Box<dyn TextureLoader>>,
}

impl LoaderPool {
    pub fn new(context: Arc<dyn RenderContext>) -> Self {
        Self {
            context,
            instances: HashMap::new(),
        }
    }

    /// Number of loader instances constructed so far.
    pub fn constructed(&self) -> usize {
        self.instances.len()
    }

    /// Routes `input` to the first registered loader that claims it.
    ///
    /// Probing instantiates loaders on demand and stops at the first claim,
    /// so loaders past the winner are never constructed.
    pub fn loader_for(
        &mut self,
        loaders: &TextureLoaders,
        input: &TextureInput,
    ) -> Option<&mut dyn TextureLoader> {
        let mut chosen = None;
        for (name, factory) in loaders.entries() {
            let loader = match self.instances.entry(name) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    tracing::debug!(name, "constructing texture loader");
                    entry.insert(factory(Arc::clone(&self.context)))
                }
            };
            if loader.can_load(input) {
                chosen = Some(name);
                break;
            }
        }
        let name = chosen?;
        Some(self.instances.get_mut(name)?.as_mut())
    }

    pub fn can_load(&mut self, loaders: &TextureLoaders, input: &TextureInput) -> bool {
        self.loader_for(loaders, input).is_some()
    }

    /// Synchronous read of the resolved texture for `input`, if any.
    pub fn get(&mut self, loaders: &TextureLoaders, input: &TextureInput) -> Option<Texture2d> {
        self.loader_for(loaders, input)?.get(input)
    }

    /// Begin or join loading `input` through its claiming loader.
    pub fn load(&mut self, loaders: &TextureLoaders, input: &TextureInput) -> TextureLoad {
        match self.loader_for(loaders, input) {
            Some(loader) => loader.load(input),
            None => TextureLoad::failed(LoadError::rejected("no loader claims this input")),
        }
    }

    /// Tears down every constructed loader and forgets the instances.
    ///
    /// The pool stays usable; the next probe constructs fresh instances.
    pub fn dispose(&mut self) {
        for (&name, loader) in self.instances.iter_mut() {
            tracing::debug!(name, "disposing texture loader");
            loader.dispose();
        }
        self.instances.clear();
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::pixels::PixelBuffer;

    struct Alpha;
    struct Beta;

    struct NullContext;

    impl RenderContext for NullContext {
        fn create_texture(&self, desc: &wgpu::TextureDescriptor) -> Texture2d {
            Texture2d::mock(0, desc.size.width, desc.size.height, desc.format)
        }

        fn write_texture(&self, _texture: &Texture2d, _pixels: &PixelBuffer) {}

        fn destroy_texture(&self, _texture: &Texture2d) {}
    }

    struct InputLoader {
        id: u64,
        claims: fn(&TextureInput) -> bool,
        disposed: Arc<AtomicUsize>,
    }

    impl TextureLoader for InputLoader {
        fn can_load(&self, input: &TextureInput) -> bool {
            (self.claims)(input)
        }

        fn get(&self, _input: &TextureInput) -> Option<Texture2d> {
            None
        }

        fn load(&mut self, _input: &TextureInput) -> TextureLoad {
            TextureLoad::ready(Texture2d::mock(self.id, 1, 1, wgpu::TextureFormat::Rgba8Unorm))
        }

        fn dispose(&mut self) {
            self.disposed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn claims<T: 'static>(input: &TextureInput) -> bool {
        input.downcast_ref::<T>().is_some()
    }

    fn any_input(_input: &TextureInput) -> bool {
        true
    }

    struct Probe {
        built: Arc<AtomicUsize>,
        disposed: Arc<AtomicUsize>,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                built: Arc::new(AtomicUsize::new(0)),
                disposed: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn built(&self) -> usize {
            self.built.load(Ordering::SeqCst)
        }

        fn disposed(&self) -> usize {
            self.disposed.load(Ordering::SeqCst)
        }

        fn factory(
            &self,
            id: u64,
            claims: fn(&TextureInput) -> bool,
        ) -> impl Fn(Arc<dyn RenderContext>) -> Box<dyn TextureLoader> + Send + Sync + 'static
        {
            let built = Arc::clone(&self.built);
            let disposed = Arc::clone(&self.disposed);
            move |_context| {
                built.fetch_add(1, Ordering::SeqCst);
                Box::new(InputLoader {
                    id,
                    claims,
                    disposed: Arc::clone(&disposed),
                })
            }
        }
    }

    fn pool() -> LoaderPool {
        LoaderPool::new(Arc::new(NullContext))
    }

    #[test]
    fn first_registered_claimant_wins() {
        let alpha = Probe::new();
        let omni = Probe::new();
        let mut loaders = TextureLoaders::new();
        loaders.register("alpha", alpha.factory(1, claims::<Alpha>));
        loaders.register("omni", omni.factory(2, any_input));

        let mut pool = pool();
        let texture = pool.load(&loaders, &Alpha).wait().unwrap();
        assert_eq!(texture.mock_id(), Some(1));

        // anything alpha refuses falls through to the catch-all
        let texture = pool.load(&loaders, &Beta).wait().unwrap();
        assert_eq!(texture.mock_id(), Some(2));
    }

    #[test]
    fn routing_is_deterministic() {
        let alpha = Probe::new();
        let beta = Probe::new();
        let mut loaders = TextureLoaders::new();
        loaders.register("alpha", alpha.factory(1, claims::<Alpha>));
        loaders.register("beta", beta.factory(2, claims::<Beta>));

        let mut pool = pool();
        for _ in 0..16 {
            let texture = pool.load(&loaders, &Beta).wait().unwrap();
            assert_eq!(texture.mock_id(), Some(2));
        }
        assert_eq!(alpha.built(), 1);
        assert_eq!(beta.built(), 1);
    }

    #[test]
    fn construction_is_lazy_and_stops_at_the_winner() {
        let alpha = Probe::new();
        let beta = Probe::new();
        let mut loaders = TextureLoaders::new();
        loaders.register("alpha", alpha.factory(1, claims::<Alpha>));
        loaders.register("beta", beta.factory(2, claims::<Beta>));

        let mut pool = pool();
        assert_eq!(pool.constructed(), 0);

        assert!(pool.can_load(&loaders, &Alpha));
        assert_eq!(alpha.built(), 1);
        assert_eq!(beta.built(), 0);
        assert_eq!(pool.constructed(), 1);

        assert!(pool.can_load(&loaders, &Beta));
        assert_eq!(beta.built(), 1);
        assert_eq!(pool.constructed(), 2);
    }

    #[test]
    fn late_registration_is_picked_up() {
        let mut loaders = TextureLoaders::new();
        let mut pool = pool();

        let error = pool.load(&loaders, &Alpha).wait().unwrap_err();
        assert!(matches!(error, LoadError::Rejected { .. }));

        let alpha = Probe::new();
        loaders.register("alpha", alpha.factory(1, claims::<Alpha>));
        assert_eq!(pool.load(&loaders, &Alpha).wait().unwrap().mock_id(), Some(1));
    }

    #[test]
    fn remove_preserves_registration_order() {
        let probe = Probe::new();
        let mut loaders = TextureLoaders::new();
        loaders.register("alpha", probe.factory(1, claims::<Alpha>));
        loaders.register("beta", probe.factory(2, claims::<Beta>));
        loaders.register("omni", probe.factory(3, any_input));

        assert!(loaders.remove("beta"));
        assert!(!loaders.remove("beta"));
        assert_eq!(loaders.names().collect::<Vec<_>>(), ["alpha", "omni"]);
        assert_eq!(loaders.len(), 2);
    }

    #[test]
    fn dispose_tears_down_and_reconstructs_on_demand() {
        let alpha = Probe::new();
        let mut loaders = TextureLoaders::new();
        loaders.register("alpha", alpha.factory(1, claims::<Alpha>));

        let mut pool = pool();
        assert!(pool.can_load(&loaders, &Alpha));
        assert_eq!(pool.constructed(), 1);

        pool.dispose();
        assert_eq!(alpha.disposed(), 1);
        assert_eq!(pool.constructed(), 0);

        assert!(pool.can_load(&loaders, &Alpha));
        assert_eq!(alpha.built(), 2);
    }
}
