//! pulsedeck client: streaming telemetry core plus the TUI dashboard.

pub mod app;
pub mod config;
pub mod conn;
pub mod transport;
pub mod types;
pub mod ui;
pub mod window;
