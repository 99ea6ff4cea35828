//! A fully scripted single-texture loader.
//!
//! [`OneTextureRig`] builds loaders that claim exactly one symbolic
//! [`TextureTag`] and hold every load behind a gate until the test settles
//! it. Every loader call is counted, so tests can assert not just on
//! outcomes but on how often the registry and pool touched the loader.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use vitrail_textures::{
    LoadError, RenderContext, ResolutionSlot, Texture2d, TextureInput, TextureLoad, TextureLoader,
    TextureLoaders, TexturePromise,
};

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// Symbolic loader input claimed by exactly one rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureTag(u64);

impl TextureTag {
    /// A tag no other rig claims.
    pub fn unique() -> Self {
        Self(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }
}

/// Call counts observed by a rig across every loader instance it built.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OneTextureCounters {
    /// Loader instances constructed by pools.
    pub constructed: usize,
    pub can_load: usize,
    pub get: usize,
    pub load: usize,
    /// Textures actually built (at most one per rig).
    pub create_texture: usize,
    /// Dispose actions invoked on individual loads.
    pub texture_dispose: usize,
    /// Loader-level dispose calls.
    pub dispose: usize,
}

type MakeTexture = Box<dyn Fn(&dyn RenderContext) -> Texture2d + Send + Sync>;

enum Gate {
    Open,
    Resolved,
    Rejected(LoadError),
}

struct RigState {
    gate: Gate,
    waiting: Option<(TexturePromise, Arc<dyn RenderContext>)>,
    texture: Option<Texture2d>,
}

struct RigShared {
    tag: TextureTag,
    make_texture: MakeTexture,
    counters: Mutex<OneTextureCounters>,
    state: Mutex<RigState>,
}

impl RigShared {
    /// Builds the texture (once) and resolves `promise` with it.
    fn fulfill(&self, promise: TexturePromise, context: Arc<dyn RenderContext>) {
        let texture = {
            let mut state = self.state.lock();
            match &state.texture {
                Some(texture) => texture.clone(),
                None => {
                    let texture = (self.make_texture)(context.as_ref());
                    self.counters.lock().create_texture += 1;
                    state.texture = Some(texture.clone());
                    texture
                }
            }
        };
        promise.resolve(texture);
    }
}

struct OneTextureLoader {
    shared: Arc<RigShared>,
    context: Arc<dyn RenderContext>,
    slot: Arc<Mutex<ResolutionSlot>>,
}

impl TextureLoader for OneTextureLoader {
    fn can_load(&self, input: &TextureInput) -> bool {
        self.shared.counters.lock().can_load += 1;
        input.downcast_ref::<TextureTag>() == Some(&self.shared.tag)
    }

    fn get(&self, input: &TextureInput) -> Option<Texture2d> {
        self.shared.counters.lock().get += 1;
        if input.downcast_ref::<TextureTag>() != Some(&self.shared.tag) {
            return None;
        }
        self.slot.lock().get()
    }

    fn load(&mut self, input: &TextureInput) -> TextureLoad {
        self.shared.counters.lock().load += 1;
        if input.downcast_ref::<TextureTag>() != Some(&self.shared.tag) {
            return TextureLoad::failed(LoadError::rejected("input is not this rig's tag"));
        }

        let shared = Arc::clone(&self.shared);
        let context = Arc::clone(&self.context);
        let future = self.slot.lock().request(move |promise| {
            // decide under the state lock, settle outside it
            let verdict = {
                let mut state = shared.state.lock();
                match &state.gate {
                    Gate::Open => {
                        state.waiting = Some((promise.clone(), Arc::clone(&context)));
                        None
                    }
                    Gate::Resolved => Some(Ok(())),
                    Gate::Rejected(error) => Some(Err(error.clone())),
                }
            };
            match verdict {
                Some(Ok(())) => shared.fulfill(promise, context),
                Some(Err(error)) => {
                    promise.reject(error);
                }
                None => {}
            }
        });

        let shared = Arc::clone(&self.shared);
        TextureLoad::new(
            future,
            Arc::new(move || {
                shared.counters.lock().texture_dispose += 1;
            }),
        )
    }

    fn dispose(&mut self) {
        self.shared.counters.lock().dispose += 1;
    }
}

/// Scripted loader rig resolving exactly one symbolic input.
///
/// Loads against the rig's [`tag`](Self::tag) park behind a gate;
/// [`resolve`](Self::resolve) settles them with a texture built through the
/// rig's `make_texture` callback, [`reject`](Self::reject) fails them.
/// Clones share the gate and the counters.
#[derive(Clone)]
pub struct OneTextureRig {
    shared: Arc<RigShared>,
}

impl OneTextureRig {
    pub fn new(
        make_texture: impl Fn(&dyn RenderContext) -> Texture2d + Send + Sync + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(RigShared {
                tag: TextureTag::unique(),
                make_texture: Box::new(make_texture),
                counters: Mutex::new(OneTextureCounters::default()),
                state: Mutex::new(RigState {
                    gate: Gate::Open,
                    waiting: None,
                    texture: None,
                }),
            }),
        }
    }

    /// The symbolic input this rig's loaders claim.
    pub fn tag(&self) -> TextureTag {
        self.shared.tag
    }

    /// Registers this rig's loader factory under `name`.
    pub fn register(&self, loaders: &mut TextureLoaders, name: &'static str) {
        let shared = Arc::clone(&self.shared);
        loaders.register(name, move |context| {
            shared.counters.lock().constructed += 1;
            Box::new(OneTextureLoader {
                shared: Arc::clone(&shared),
                context,
                slot: Arc::new(Mutex::new(ResolutionSlot::new())),
            })
        });
    }

    /// Opens the gate with success: the pending load resolves now and later
    /// loads resolve immediately.
    pub fn resolve(&self) {
        let waiting = {
            let mut state = self.shared.state.lock();
            state.gate = Gate::Resolved;
            state.waiting.take()
        };
        if let Some((promise, context)) = waiting {
            self.shared.fulfill(promise, context);
        }
        tracing::debug!(tag = self.shared.tag.0, "rig resolved");
    }

    /// Opens the gate with failure: the pending load and later loads reject.
    pub fn reject(&self, reason: impl Into<String>) {
        let error = LoadError::rejected(reason);
        let waiting = {
            let mut state = self.shared.state.lock();
            state.gate = Gate::Rejected(error.clone());
            state.waiting.take()
        };
        if let Some((promise, _context)) = waiting {
            promise.reject(error.clone());
        }
        tracing::debug!(tag = self.shared.tag.0, error = %error, "rig rejected");
    }

    /// Snapshot of every counter.
    pub fn counters(&self) -> OneTextureCounters {
        *self.shared.counters.lock()
    }

    /// The texture the rig built, if any load completed.
    pub fn texture(&self) -> Option<Texture2d> {
        self.shared.state.lock().texture.clone()
    }
}
