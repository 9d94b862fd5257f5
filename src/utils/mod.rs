pub mod errors;
pub mod format;

pub use errors::{PanelError, PanelResult};
pub use format::{format_grouped, format_human_bytes};
