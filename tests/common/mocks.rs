use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tilescope::events::{Event, EventBus};
use tilescope::models::{AssetCollection, AssetRecord, RenderStatistics};
use tilescope::services::{Session, StatisticsProvider};

/// Session that answers each refresh with the next scripted asset list and
/// announces it on the bus.
pub struct MockSession {
    bus: Weak<EventBus>,
    responses: Mutex<VecDeque<Vec<AssetRecord>>>,
    current: Mutex<Vec<AssetRecord>>,
    pub refresh_calls: AtomicUsize,
    pub assets_calls: AtomicUsize,
}

impl MockSession {
    pub fn new(bus: &Arc<EventBus>) -> Self {
        Self {
            bus: Arc::downgrade(bus),
            responses: Mutex::new(VecDeque::new()),
            current: Mutex::new(Vec::new()),
            refresh_calls: AtomicUsize::new(0),
            assets_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_responses(self, responses: Vec<Vec<AssetRecord>>) -> Self {
        *self.responses.lock().unwrap() = responses.into();
        self
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn assets_calls(&self) -> usize {
        self.assets_calls.load(Ordering::SeqCst)
    }
}

impl Session for MockSession {
    fn refresh_assets(&self) {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(next) = self.responses.lock().unwrap().pop_front() {
            *self.current.lock().unwrap() = next;
        }
        if let Some(bus) = self.bus.upgrade() {
            bus.post(Event::assets_updated());
        }
    }

    fn assets(&self) -> AssetCollection {
        self.assets_calls.fetch_add(1, Ordering::SeqCst);
        AssetCollection::new(self.current.lock().unwrap().clone())
    }
}

/// Statistics provider that counts how often it is queried
pub struct SpyStatistics {
    stats: Mutex<RenderStatistics>,
    calls: AtomicUsize,
}

impl SpyStatistics {
    pub fn new(stats: RenderStatistics) -> Self {
        Self {
            stats: Mutex::new(stats),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, stats: RenderStatistics) {
        *self.stats.lock().unwrap() = stats;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StatisticsProvider for SpyStatistics {
    fn render_statistics(&self) -> RenderStatistics {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.stats.lock().unwrap()
    }
}
