use super::types::{Event, EventKind};
use crate::utils::{PanelError, PanelResult};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, trace, warn};

type Handler = Box<dyn Fn(&Event) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct HandlerEntry {
    id: u64,
    kind: EventKind,
    name: String,
    active: AtomicBool,
    handler: Handler,
}

struct BusInner {
    handlers: Mutex<HashMap<EventKind, Vec<Arc<HandlerEntry>>>>,
    queue: Mutex<VecDeque<Event>>,
    stats: Mutex<EventBusStats>,
    history: Mutex<VecDeque<Event>>,
    max_history_size: usize,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl BusInner {
    fn remove_handler(&self, kind: EventKind, id: u64) {
        let mut handlers = lock(&self.handlers);
        if let Some(entries) = handlers.get_mut(&kind) {
            entries.retain(|entry| entry.id != id);
            if entries.is_empty() {
                handlers.remove(&kind);
            }
        }
    }
}

/// Registration of one handler on the bus.
///
/// Owned by whoever created it and never cloned. Unsubscribing is idempotent and
/// also happens when the handle is dropped.
pub struct Subscription {
    bus: Weak<BusInner>,
    entry: Arc<HandlerEntry>,
    released: bool,
}

impl Subscription {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn is_active(&self) -> bool {
        !self.released
    }

    /// Stop delivery to this handler, including events that are already queued.
    pub fn unsubscribe(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.entry.active.store(false, Ordering::Release);

        if let Some(bus) = self.bus.upgrade() {
            bus.remove_handler(self.entry.kind, self.entry.id);
        }
        trace!("Unsubscribed '{}' from {}", self.entry.name, self.entry.kind.as_str());
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.entry.name)
            .field("kind", &self.entry.kind)
            .field("released", &self.released)
            .finish()
    }
}

#[derive(Debug, Default, Clone)]
pub struct EventBusStats {
    pub total_events: u64,
    pub delivered_events: u64,
    pub dropped_events: u64,
    pub events_by_kind: HashMap<EventKind, u64>,
    pub subscriber_count: usize,
}

/// Application event bus with pop-by-kind delivery.
///
/// Events are queued by [`EventBus::post`] and handed to handlers only when the host
/// loop calls [`EventBus::pump`], in the order they were posted.
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    /// Create a new event bus keeping the last `max_history_size` events for debugging
    pub fn new(max_history_size: usize) -> Self {
        Self {
            inner: Arc::new(BusInner {
                handlers: Mutex::new(HashMap::new()),
                queue: Mutex::new(VecDeque::new()),
                stats: Mutex::new(EventBusStats::default()),
                history: Mutex::new(VecDeque::new()),
                max_history_size,
                next_id: AtomicU64::new(1),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Register `handler` for every posted occurrence of `kind`.
    ///
    /// `name` is only used for diagnostics.
    pub fn subscribe<F>(
        &self,
        kind: EventKind,
        name: impl Into<String>,
        handler: F,
    ) -> PanelResult<Subscription>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let name = name.into();
        if self.is_closed() {
            return Err(PanelError::BusClosed(name));
        }

        let entry = Arc::new(HandlerEntry {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            kind,
            name,
            active: AtomicBool::new(true),
            handler: Box::new(handler),
        });

        lock(&self.inner.handlers)
            .entry(kind)
            .or_default()
            .push(entry.clone());

        debug!("Subscribed '{}' to {}", entry.name, kind.as_str());

        Ok(Subscription {
            bus: Arc::downgrade(&self.inner),
            entry,
            released: false,
        })
    }

    /// Queue an event for delivery on the next pump
    pub fn post(&self, event: Event) {
        if self.is_closed() {
            warn!("Dropping {} posted to a closed bus", event.kind.as_str());
            lock(&self.inner.stats).dropped_events += 1;
            return;
        }

        trace!("Posting event: {}", event.kind.as_str());

        {
            let mut stats = lock(&self.inner.stats);
            stats.total_events += 1;
            *stats
                .events_by_kind
                .entry(event.kind)
                .or_insert(0) += 1;
        }

        {
            let mut history = lock(&self.inner.history);
            history.push_back(event.clone());
            while history.len() > self.inner.max_history_size {
                history.pop_front();
            }
        }

        lock(&self.inner.queue).push_back(event);
    }

    /// Deliver every event queued before this call.
    ///
    /// Events posted by handlers while pumping stay queued for the next pump.
    /// Returns the number of events taken off the queue.
    pub fn pump(&self) -> usize {
        let pending = lock(&self.inner.queue).len();
        let mut processed = 0;

        for _ in 0..pending {
            // Lock is released before handlers run so they may post or unsubscribe.
            let Some(event) = lock(&self.inner.queue).pop_front() else {
                break;
            };
            processed += 1;

            let targets: Vec<Arc<HandlerEntry>> = lock(&self.inner.handlers)
                .get(&event.kind)
                .cloned()
                .unwrap_or_default();

            let mut fired = false;
            for entry in targets {
                if !entry.active.load(Ordering::Acquire) {
                    continue;
                }
                trace!("Delivering {} to '{}'", event.kind.as_str(), entry.name);
                (entry.handler)(&event);
                fired = true;
            }

            let mut stats = lock(&self.inner.stats);
            if fired {
                stats.delivered_events += 1;
            } else {
                stats.dropped_events += 1;
            }
        }

        processed
    }

    /// Number of events waiting for the next pump
    pub fn pending(&self) -> usize {
        lock(&self.inner.queue).len()
    }

    /// Refuse new subscriptions and discard queued events
    pub fn close(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let discarded = {
            let mut queue = lock(&self.inner.queue);
            let n = queue.len();
            queue.clear();
            n
        };
        lock(&self.inner.stats).dropped_events += discarded as u64;
        debug!("Event bus closed, {} queued events discarded", discarded);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Get current subscriber count
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.handlers).values().map(Vec::len).sum()
    }

    /// Get event bus statistics
    pub fn get_stats(&self) -> EventBusStats {
        let mut stats = lock(&self.inner.stats).clone();
        stats.subscriber_count = self.subscriber_count();
        stats
    }

    /// Get event history for debugging
    pub fn get_history(&self) -> Vec<Event> {
        lock(&self.inner.history).iter().cloned().collect()
    }

    /// Clear event history
    pub fn clear_history(&self) {
        lock(&self.inner.history).clear();
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("pending", &self.pending())
            .field("closed", &self.is_closed())
            .finish()
    }
}
