//! Resolution state machine for asynchronous texture loads.
//!
//! A [`ResolutionSlot`] tracks one input through its lifecycle: nothing
//! requested yet, a load in flight, a texture ready, a failure, or disposed.
//! Loads settle through a [`TexturePromise`] handed to the load continuation;
//! every caller that joined the load observes the same [`TextureFuture`].

use vitrail_core::defer::{Deferred, DeferredFuture};

use crate::{error::LoadError, texture::Texture2d};

/// Outcome of a texture load.
pub type TextureResult = Result<Texture2d, LoadError>;

/// Shared future observing one texture load.
pub type TextureFuture = DeferredFuture<TextureResult>;

/// Where an input currently sits in its resolution lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePhase {
    /// No load has been requested.
    Unrequested,
    /// A load is in flight and has not settled.
    Pending,
    /// The texture is resolved and available.
    Ready,
    /// The last load failed; a new request may retry.
    Failed,
    /// The slot was disposed; it stays disposed.
    Disposed,
}

/// Settle side of a pending load.
///
/// A promise is handed to the load continuation, which may keep clones and
/// settle from any thread. Only the first settlement counts.
#[derive(Debug, Clone)]
pub struct TexturePromise {
    deferred: Deferred<TextureResult>,
}

impl TexturePromise {
    /// Settles the load with a texture. Returns `false` if already settled.
    pub fn resolve(&self, texture: Texture2d) -> bool {
        self.deferred.settle(Ok(texture))
    }

    /// Settles the load with an error. Returns `false` if already settled.
    pub fn reject(&self, error: LoadError) -> bool {
        self.deferred.settle(Err(error))
    }

    pub fn is_settled(&self) -> bool {
        self.deferred.is_settled()
    }
}

#[derive(Debug, Default)]
enum SlotState {
    #[default]
    Unrequested,
    Pending(Deferred<TextureResult>),
    Ready(Texture2d),
    Failed(LoadError),
    Disposed,
}

/// Owns the resolution state for one input.
///
/// `request` is memoized: while a load is pending, further requests join the
/// same future instead of starting the work again. A failed slot retries on
/// the next request. A disposed slot is terminal and answers every further
/// request with [`LoadError::Disposed`].
#[derive(Debug, Default)]
pub struct ResolutionSlot {
    state: SlotState,
}

impl ResolutionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ResolvePhase {
        match &self.state {
            SlotState::Unrequested => ResolvePhase::Unrequested,
            SlotState::Pending(deferred) => match deferred.try_get() {
                Some(Ok(_)) => ResolvePhase::Ready,
                Some(Err(_)) => ResolvePhase::Failed,
                None => ResolvePhase::Pending,
            },
            SlotState::Ready(_) => ResolvePhase::Ready,
            SlotState::Failed(_) => ResolvePhase::Failed,
            SlotState::Disposed => ResolvePhase::Disposed,
        }
    }

    /// The resolved texture, if the slot is effectively ready.
    pub fn get(&self) -> Option<Texture2d> {
        match &self.state {
            SlotState::Ready(texture) => Some(texture.clone()),
            SlotState::Pending(deferred) => match deferred.try_get() {
                Some(Ok(texture)) => Some(texture),
                _ => None,
            },
            _ => None,
        }
    }

    /// The load error, if the slot has effectively failed.
    pub fn error(&self) -> Option<LoadError> {
        match &self.state {
            SlotState::Failed(error) => Some(error.clone()),
            SlotState::Pending(deferred) => match deferred.try_get() {
                Some(Err(error)) => Some(error),
                _ => None,
            },
            _ => None,
        }
    }

    /// Begins or joins a load.
    ///
    /// `begin` runs exactly once per in-flight load, receiving the promise
    /// that settles it; it may settle synchronously before returning. While
    /// the slot is pending, further requests share the existing future and
    /// `begin` is not called. Ready and disposed slots answer with an
    /// already-settled future.
    pub fn request(&mut self, begin: impl FnOnce(TexturePromise)) -> TextureFuture {
        self.collapse();
        match &self.state {
            SlotState::Pending(deferred) => deferred.future(),
            SlotState::Ready(texture) => Deferred::settled(Ok(texture.clone())).future(),
            SlotState::Disposed => Deferred::settled(Err(LoadError::Disposed)).future(),
            SlotState::Unrequested | SlotState::Failed(_) => {
                let deferred = Deferred::new();
                let future = deferred.future();
                self.state = SlotState::Pending(deferred.clone());
                begin(TexturePromise { deferred });
                future
            }
        }
    }

    /// Disposes the slot, returning the texture iff it was ready.
    ///
    /// The `Ready -> Disposed` edge yields the texture exactly once so the
    /// caller can release its GPU memory. Disposing a pending slot leaves
    /// the in-flight future intact; whatever it settles to is unobserved by
    /// the slot.
    pub fn dispose(&mut self) -> Option<Texture2d> {
        self.collapse();
        match std::mem::replace(&mut self.state, SlotState::Disposed) {
            SlotState::Ready(texture) => Some(texture),
            _ => None,
        }
    }

    /// Folds a settled pending deferred into its terminal state.
    fn collapse(&mut self) {
        if let SlotState::Pending(deferred) = &self.state {
            if let Some(result) = deferred.try_get() {
                self.state = match result {
                    Ok(texture) => SlotState::Ready(texture),
                    Err(error) => SlotState::Failed(error),
                };
            }
        }
    }
}
