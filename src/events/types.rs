use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Event posted on the application event bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub payload: EventPayload,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Event {
    pub fn new(kind: EventKind, payload: EventPayload) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            payload,
            timestamp: chrono::Utc::now(),
        }
    }

    /// The session finished refreshing its asset list
    pub fn assets_updated() -> Self {
        Self::new(EventKind::AssetsUpdated, EventPayload::Empty)
    }

    /// One host update tick
    pub fn update_frame(index: u64, delta: Duration) -> Self {
        Self::new(EventKind::UpdateFrame, EventPayload::Frame { index, delta })
    }
}

/// Event kinds handlers can subscribe to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventKind {
    AssetsUpdated,
    UpdateFrame,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::AssetsUpdated => "session.assets_updated",
            EventKind::UpdateFrame => "app.update_frame",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    Empty,
    Frame { index: u64, delta: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        let event = Event::assets_updated();
        assert_eq!(event.kind, EventKind::AssetsUpdated);
        assert!(matches!(event.payload, EventPayload::Empty));

        let frame = Event::update_frame(3, Duration::from_millis(16));
        assert_eq!(frame.kind, EventKind::UpdateFrame);
        match frame.payload {
            EventPayload::Frame { index, delta } => {
                assert_eq!(index, 3);
                assert_eq!(delta, Duration::from_millis(16));
            }
            other => panic!("unexpected payload {:?}", other),
        }
        assert_ne!(event.id, frame.id);
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::AssetsUpdated.as_str(), "session.assets_updated");
        assert_eq!(EventKind::UpdateFrame.as_str(), "app.update_frame");
    }
}
