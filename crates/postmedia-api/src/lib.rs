//! Postmedia API Library
//!
//! HTTP surface for attaching one image to a post: handlers, the ingestion
//! and retrieval services behind them, and application setup.

pub mod constants;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::HttpAppError;
pub use state::AppState;
