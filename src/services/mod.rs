pub mod local;
pub mod session;
pub mod statistics;

pub use local::{LocalSession, SimulatedStatistics};
pub use session::{Session, SessionProvider, SharedSessionSlot};
pub use statistics::StatisticsProvider;
