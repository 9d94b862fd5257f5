// Library entry shared by the binary and the integration tests

pub mod app;
pub mod config;
pub mod constants;
pub mod events;
pub mod logging;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;
