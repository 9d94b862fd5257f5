use super::event_bus::{EventBus, Subscription};
use super::types::{Event, EventKind};
use crate::utils::PanelResult;
use tracing::debug;

/// Holds every bus subscription of one owner and releases them together.
///
/// Owners call [`SubscriptionSet::release_all`] from their teardown path; dropping the
/// set does the same, so an owner that goes away on an error path cannot leave a live
/// handler behind.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` on `bus` and keep the resulting subscription.
    ///
    /// Registration failures are returned to the caller untouched.
    pub fn subscribe<F>(
        &mut self,
        bus: &EventBus,
        kind: EventKind,
        name: impl Into<String>,
        handler: F,
    ) -> PanelResult<()>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let subscription = bus.subscribe(kind, name, handler)?;
        self.subscriptions.push(subscription);
        Ok(())
    }

    /// Unsubscribe every held subscription once and forget them.
    pub fn release_all(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }

        debug!("Releasing {} subscriptions", self.subscriptions.len());
        for mut subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.release_all();
    }
}
