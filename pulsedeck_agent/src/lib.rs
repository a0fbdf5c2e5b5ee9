//! pulsedeck agent: collects host metrics and pushes them to every
//! dashboard subscriber over a WebSocket stream.

pub mod cli;
pub mod metrics;
pub mod sampler;
pub mod state;
pub mod types;
pub mod ws;
