//! Refresh protocol between the refresh button and the session.
//!
//! `request_refresh` only asks the session to refresh; the new list is pulled when the
//! session later announces `AssetsUpdated`. Overlapping requests are not coalesced, so
//! whichever update is delivered last decides what the list shows.

use super::viewmodels::{AssetListViewModel, Property};
use crate::services::SessionProvider;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    RefreshRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Issued,
    SkippedNoSession,
}

pub struct RefreshController {
    sessions: Arc<dyn SessionProvider>,
    assets: Arc<AssetListViewModel>,
    state: Property<RefreshState>,
    requests_issued: AtomicU64,
    updates_applied: AtomicU64,
}

impl RefreshController {
    pub fn new(sessions: Arc<dyn SessionProvider>, assets: Arc<AssetListViewModel>) -> Self {
        Self {
            sessions,
            assets,
            state: Property::new(RefreshState::Idle, "refresh_state"),
            requests_issued: AtomicU64::new(0),
            updates_applied: AtomicU64::new(0),
        }
    }

    /// Ask the current session for fresh assets.
    ///
    /// Without an active session nothing is called and the state stays as it was.
    pub fn request_refresh(&self) -> RefreshOutcome {
        let Some(session) = self.sessions.session() else {
            info!("No active session, asset refresh skipped");
            return RefreshOutcome::SkippedNoSession;
        };

        info!("Assets refreshing");
        self.state.set_if_changed(RefreshState::RefreshRequested);
        self.requests_issued.fetch_add(1, Ordering::Relaxed);
        session.refresh_assets();
        RefreshOutcome::Issued
    }

    /// Handle an `AssetsUpdated` delivery by pulling the session's current list.
    ///
    /// Returns whether the list was replaced.
    pub fn on_assets_updated(&self) -> bool {
        let Some(session) = self.sessions.session() else {
            debug!("Assets updated but no session is active, ignoring");
            self.state.set_if_changed(RefreshState::Idle);
            return false;
        };

        let collection = session.assets();
        info!("Assets refreshed ({} items)", collection.items.len());
        self.assets.replace_all(collection.items);
        self.updates_applied.fetch_add(1, Ordering::Relaxed);
        self.state.set_if_changed(RefreshState::Idle);
        true
    }

    pub fn state(&self) -> RefreshState {
        self.state.get()
    }

    pub fn requests_issued(&self) -> u64 {
        self.requests_issued.load(Ordering::Relaxed)
    }

    pub fn updates_applied(&self) -> u64 {
        self.updates_applied.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetCollection, AssetRecord, AssetType};
    use crate::services::{Session, SharedSessionSlot};
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedSession {
        refreshes: AtomicU64,
        reads: AtomicU64,
        current: Mutex<Vec<AssetRecord>>,
    }

    impl ScriptedSession {
        fn publish(&self, items: Vec<AssetRecord>) {
            *self.current.lock().unwrap() = items;
        }
    }

    impl Session for ScriptedSession {
        fn refresh_assets(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }

        fn assets(&self) -> AssetCollection {
            self.reads.fetch_add(1, Ordering::SeqCst);
            AssetCollection::new(self.current.lock().unwrap().clone())
        }
    }

    fn record(id: i64) -> AssetRecord {
        AssetRecord::new(id, format!("asset {}", id), AssetType::Imagery, Utc::now())
    }

    fn setup() -> (Arc<ScriptedSession>, Arc<SharedSessionSlot>, RefreshController) {
        let session = Arc::new(ScriptedSession::default());
        let slot = Arc::new(SharedSessionSlot::with_session(session.clone()));
        let controller = RefreshController::new(slot.clone(), Arc::new(AssetListViewModel::new()));
        (session, slot, controller)
    }

    #[test]
    fn test_request_then_update_returns_to_idle() {
        let (session, _slot, controller) = setup();
        assert_eq!(controller.state(), RefreshState::Idle);

        assert_eq!(controller.request_refresh(), RefreshOutcome::Issued);
        assert_eq!(controller.state(), RefreshState::RefreshRequested);
        assert_eq!(session.refreshes.load(Ordering::SeqCst), 1);
        // The request itself never pulls data
        assert_eq!(session.reads.load(Ordering::SeqCst), 0);

        session.publish(vec![record(1), record(2)]);
        assert!(controller.on_assets_updated());
        assert_eq!(controller.state(), RefreshState::Idle);
        assert_eq!(controller.assets.item_count(), 2);
    }

    #[test]
    fn test_repeat_requests_are_not_deduplicated() {
        let (session, _slot, controller) = setup();

        controller.request_refresh();
        controller.request_refresh();

        assert_eq!(session.refreshes.load(Ordering::SeqCst), 2);
        assert_eq!(controller.requests_issued(), 2);
        assert_eq!(controller.state(), RefreshState::RefreshRequested);
    }

    #[test]
    fn test_missing_session_is_skipped() {
        let (session, slot, controller) = setup();
        slot.clear();

        assert_eq!(controller.request_refresh(), RefreshOutcome::SkippedNoSession);
        assert_eq!(controller.state(), RefreshState::Idle);
        assert_eq!(session.refreshes.load(Ordering::SeqCst), 0);
        assert_eq!(session.reads.load(Ordering::SeqCst), 0);

        assert!(!controller.on_assets_updated());
        assert_eq!(session.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_session_gone_before_update_returns_to_idle() {
        let (session, slot, controller) = setup();
        controller.request_refresh();
        slot.clear();

        assert!(!controller.on_assets_updated());
        assert_eq!(controller.state(), RefreshState::Idle);
        assert_eq!(session.reads.load(Ordering::SeqCst), 0);
        assert_eq!(controller.assets.item_count(), 0);
    }

    #[test]
    fn test_last_delivered_update_wins() {
        let (session, _slot, controller) = setup();
        controller.request_refresh();
        controller.request_refresh();

        session.publish(vec![record(10), record(11)]);
        controller.on_assets_updated();
        session.publish(vec![record(20)]);
        controller.on_assets_updated();

        let ids: Vec<i64> = controller
            .assets
            .current_items()
            .iter()
            .map(|r| r.id.value())
            .collect();
        assert_eq!(ids, vec![20]);
        assert_eq!(controller.updates_applied(), 2);
    }
}
