// Public fallible APIs in this crate share one concrete error contract (`MplError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod config;
pub mod date_token;
pub mod duration;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod http;
pub mod models;
pub mod pipeline;
pub mod publish;
pub mod rank;
pub mod window;

pub use config::{AppConfig, DestinationConfig, EnvironmentConfig};
pub use error::{MplError, Result};
pub use filter::FilterStrategy;
pub use pipeline::{RunOptions, RunSummary, run_pipeline};
pub use window::TimeWindow;
