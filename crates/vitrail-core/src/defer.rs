//! Single-assignment future cells.
//!
//! A [`Deferred`] is a settle-once slot shared between whoever produces a
//! value and any number of waiters. Waiters take [`DeferredFuture`]s
//! before or after settlement; every future observes the same value.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll, Waker},
};

use parking_lot::Mutex;

enum Slot<T> {
    Pending(Vec<Waker>),
    Settled(T),
}

struct Shared<T> {
    slot: Mutex<Slot<T>>,
}

/// Settle-once cell handing out shared futures.
///
/// Cloning a `Deferred` clones the handle, not the slot: every clone
/// settles and observes the same value. The first [`settle`](Self::settle)
/// wins; the stored value is immutable afterwards.
pub struct Deferred<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Deferred<T> {
    /// Creates an unsettled cell.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot::Pending(Vec::new())),
            }),
        }
    }

    /// Creates a cell that is already settled with `value`.
    pub fn settled(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot::Settled(value)),
            }),
        }
    }

    /// Whether a value has been stored.
    pub fn is_settled(&self) -> bool {
        matches!(&*self.shared.slot.lock(), Slot::Settled(_))
    }

    /// Stores `value` and wakes every registered waiter.
    ///
    /// Only the first call stores; later calls return `false` and drop
    /// their value.
    pub fn settle(&self, value: T) -> bool {
        let wakers = {
            let mut slot = self.shared.slot.lock();
            match &mut *slot {
                Slot::Settled(_) => return false,
                Slot::Pending(wakers) => {
                    let wakers = std::mem::take(wakers);
                    *slot = Slot::Settled(value);
                    wakers
                }
            }
        };
        for waker in wakers {
            waker.wake();
        }
        true
    }

    /// Returns a future resolving to the settled value.
    ///
    /// May be called any number of times, before or after settlement.
    pub fn future(&self) -> DeferredFuture<T> {
        DeferredFuture {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone> Deferred<T> {
    /// Clones the settled value out, if any.
    pub fn try_get(&self) -> Option<T> {
        match &*self.shared.slot.lock() {
            Slot::Settled(value) => Some(value.clone()),
            Slot::Pending(_) => None,
        }
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Future side of a [`Deferred`].
///
/// Clones freely; every clone resolves to the same value.
pub struct DeferredFuture<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone> DeferredFuture<T> {
    /// Non-blocking read of the settled value.
    pub fn try_get(&self) -> Option<T> {
        match &*self.shared.slot.lock() {
            Slot::Settled(value) => Some(value.clone()),
            Slot::Pending(_) => None,
        }
    }

    /// Whether the backing cell has settled.
    pub fn is_settled(&self) -> bool {
        matches!(&*self.shared.slot.lock(), Slot::Settled(_))
    }
}

impl<T> Clone for DeferredFuture<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for DeferredFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredFuture")
            .field(
                "settled",
                &matches!(&*self.shared.slot.lock(), Slot::Settled(_)),
            )
            .finish()
    }
}

impl<T: Clone> Future for DeferredFuture<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.shared.slot.lock();
        match &mut *slot {
            Slot::Settled(value) => Poll::Ready(value.clone()),
            Slot::Pending(wakers) => {
                if !wakers.iter().any(|w| w.will_wake(cx.waker())) {
                    wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_lite::future;

    #[test]
    fn first_settle_wins() {
        let cell = Deferred::new();
        assert!(!cell.is_settled());
        assert!(cell.settle(1));
        assert!(!cell.settle(2));
        assert_eq!(cell.try_get(), Some(1));
    }

    #[test]
    fn future_is_pending_until_settled() {
        let cell = Deferred::new();
        let fut = cell.future();
        assert_eq!(future::block_on(future::poll_once(fut.clone())), None);
        cell.settle("done");
        assert_eq!(future::block_on(fut), "done");
    }

    #[test]
    fn all_futures_observe_one_value() {
        let cell = Deferred::new();
        let before = cell.future();
        cell.settle(7);
        let after = cell.future();
        assert_eq!(future::block_on(before), 7);
        assert_eq!(future::block_on(after), 7);
    }

    #[test]
    fn clones_share_the_slot() {
        let cell = Deferred::new();
        let alias = cell.clone();
        alias.settle(3);
        assert_eq!(cell.try_get(), Some(3));
    }

    #[test]
    fn parked_waiter_is_woken() {
        let cell = Deferred::new();
        let waiter = cell.future();
        let settler = std::thread::spawn({
            let cell = cell.clone();
            move || cell.settle(42)
        });
        assert_eq!(future::block_on(waiter), 42);
        assert!(settler.join().unwrap());
    }

    #[test]
    fn presettled_cell_resolves_immediately() {
        let cell = Deferred::settled(9);
        assert!(cell.is_settled());
        assert_eq!(future::block_on(future::poll_once(cell.future())), Some(9));
    }
}
