use crate::models::AssetCollection;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Authenticated connection to the remote asset hosting service.
pub trait Session: Send + Sync {
    /// Ask the service for a fresh asset list.
    ///
    /// Returns immediately; completion is announced later by an
    /// [`EventKind::AssetsUpdated`](crate::events::EventKind::AssetsUpdated) event.
    fn refresh_assets(&self);

    /// Latest asset list the session knows about
    fn assets(&self) -> AssetCollection;
}

/// Hands out the current session, if one is active
pub trait SessionProvider: Send + Sync {
    fn session(&self) -> Option<Arc<dyn Session>>;
}

/// Session accessor whose session can come and go at runtime (sign in / sign out)
#[derive(Default)]
pub struct SharedSessionSlot {
    current: RwLock<Option<Arc<dyn Session>>>,
}

impl SharedSessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Arc<dyn Session>) -> Self {
        Self {
            current: RwLock::new(Some(session)),
        }
    }

    pub fn set(&self, session: Arc<dyn Session>) {
        info!("Session connected");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn clear(&self) {
        info!("Session disconnected");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_connected(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl SessionProvider for SharedSessionSlot {
    fn session(&self) -> Option<Arc<dyn Session>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptySession;

    impl Session for EmptySession {
        fn refresh_assets(&self) {}

        fn assets(&self) -> AssetCollection {
            AssetCollection::default()
        }
    }

    #[test]
    fn test_slot_set_and_clear() {
        let slot = SharedSessionSlot::new();
        assert!(slot.session().is_none());
        assert!(!slot.is_connected());

        slot.set(Arc::new(EmptySession));
        assert!(slot.session().is_some());
        assert!(slot.is_connected());

        slot.clear();
        assert!(slot.session().is_none());
    }
}
