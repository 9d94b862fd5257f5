#![allow(dead_code)]

pub mod builders;
pub mod mocks;

use std::sync::Arc;
use tilescope::events::EventBus;

pub fn test_bus() -> Arc<EventBus> {
    Arc::new(EventBus::new(32))
}
