pub mod event_bus;
pub mod subscriptions;
pub mod types;

pub use event_bus::{EventBus, EventBusStats, Subscription};
pub use subscriptions::SubscriptionSet;
pub use types::{Event, EventKind, EventPayload};
