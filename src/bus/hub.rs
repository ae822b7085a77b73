//! Typed publish/subscribe hub
//!
//! Generators publish events without knowing who consumes them; the log
//! writer, UI bindings, and future analytics subscribe without knowing
//! who produces. Delivery is asynchronous with respect to the publisher:
//! `publish` clones the message into each matching subscriber's queue
//! and returns immediately, so host callbacks on the UI thread are never
//! blocked by a slow consumer.
//!
//! # Guarantees
//!
//! - Per publisher, each subscriber observes messages in publish order
//!   (one queue and one drain task per subscription).
//! - A panicking handler is caught and logged; the subscription keeps
//!   receiving, and other subscriptions are unaffected.
//! - Subscribe/unsubscribe/publish are safe to call concurrently from
//!   any thread.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tokio::sync::mpsc;

/// Anything that can travel over the bus
pub trait Message: Clone + Send + 'static {}

impl<T: Clone + Send + 'static> Message for T {}

type MessageFilter<M> = Arc<dyn Fn(&M) -> bool + Send + Sync>;

// One registered subscriber for messages of type M.
struct Entry<M: Message> {
    filter: Option<MessageFilter<M>>,
    tx: mpsc::UnboundedSender<M>,
}

struct BusInner {
    // Type-erased per-message-type subscriber lists; entries downcast
    // back to Entry<M> at publish time.
    registry: RwLock<HashMap<TypeId, Vec<(u64, Box<dyn Any + Send + Sync>)>>>,
    next_id: AtomicU64,
    handle: tokio::runtime::Handle,
}

/// In-process typed message bus
///
/// Cheap to clone; all clones share one subscriber registry.
#[derive(Clone)]
pub struct MessageBus {
    inner: Arc<BusInner>,
}

impl MessageBus {
    /// Create a bus that spawns its delivery tasks on the current tokio
    /// runtime
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; embedders that own a
    /// runtime elsewhere use [`MessageBus::with_handle`].
    pub fn new() -> Self {
        Self::with_handle(tokio::runtime::Handle::current())
    }

    /// Create a bus that spawns its delivery tasks on `handle`
    pub fn with_handle(handle: tokio::runtime::Handle) -> Self {
        Self {
            inner: Arc::new(BusInner {
                registry: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                handle,
            }),
        }
    }

    /// Deliver `message` to every current subscriber for its type whose
    /// filter accepts it
    ///
    /// Returns immediately; delivery happens on background tasks.
    pub fn publish<M: Message>(&self, message: M) {
        let type_id = TypeId::of::<M>();
        let mut dead = Vec::new();

        {
            let registry = self.inner.registry.read();
            let Some(entries) = registry.get(&type_id) else {
                return;
            };
            for (id, any_entry) in entries {
                let Some(entry) = any_entry.downcast_ref::<Entry<M>>() else {
                    continue;
                };
                if entry.filter.as_ref().is_some_and(|accepts| !accepts(&message)) {
                    continue;
                }
                if entry.tx.send(message.clone()).is_err() {
                    dead.push(*id);
                }
            }
        }

        if !dead.is_empty() {
            let mut registry = self.inner.registry.write();
            if let Some(entries) = registry.get_mut(&type_id) {
                entries.retain(|(id, _)| !dead.contains(id));
            }
        }
    }

    /// Register `handler` for every future message of type `M`
    pub fn subscribe<M, H>(&self, handler: H) -> Subscription
    where
        M: Message,
        H: Fn(M) + Send + 'static,
    {
        self.subscribe_inner(None, handler)
    }

    /// Register `handler` for future messages of type `M` accepted by
    /// `filter` (evaluated at publish time)
    pub fn subscribe_filtered<M, F, H>(&self, filter: F, handler: H) -> Subscription
    where
        M: Message,
        F: Fn(&M) -> bool + Send + Sync + 'static,
        H: Fn(M) + Send + 'static,
    {
        self.subscribe_inner(Some(Arc::new(filter)), handler)
    }

    fn subscribe_inner<M, H>(&self, filter: Option<MessageFilter<M>>, handler: H) -> Subscription
    where
        M: Message,
        H: Fn(M) + Send + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, mut rx) = mpsc::unbounded_channel::<M>();
        let active = Arc::new(AtomicBool::new(true));

        let task_active = Arc::clone(&active);
        self.inner.handle.spawn(async move {
            while let Some(message) = rx.recv().await {
                // A cancelled subscription may still have queued
                // messages; they must not reach the handler.
                if !task_active.load(Ordering::Acquire) {
                    break;
                }
                if catch_unwind(AssertUnwindSafe(|| handler(message))).is_err() {
                    log::error!("message handler panicked; message dropped");
                }
            }
        });

        self.inner
            .registry
            .write()
            .entry(TypeId::of::<M>())
            .or_default()
            .push((id, Box::new(Entry::<M> { filter, tx })));

        Subscription {
            bus: Arc::downgrade(&self.inner),
            type_id: TypeId::of::<M>(),
            id,
            active,
            armed: true,
        }
    }
}

/// Handle to one registration on the bus
///
/// Dropping the handle unsubscribes, scoping the registration to the
/// owning component's lifetime. Call [`Subscription::detach`] to keep
/// the registration alive for the rest of the process.
pub struct Subscription {
    bus: Weak<BusInner>,
    type_id: TypeId,
    id: u64,
    active: Arc<AtomicBool>,
    armed: bool,
}

impl Subscription {
    /// Unsubscribe now; the handler is never invoked again, not even
    /// for messages already queued
    pub fn cancel(mut self) {
        self.release();
    }

    /// Keep the registration alive after this handle is dropped
    pub fn detach(mut self) {
        self.armed = false;
    }

    fn release(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        self.active.store(false, Ordering::Release);

        if let Some(inner) = self.bus.upgrade() {
            let mut registry = inner.registry.write();
            if let Some(entries) = registry.get_mut(&self.type_id) {
                entries.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
