pub mod app;
pub mod cli;
mod error;
mod routes;
pub mod telemetry;

pub use app::{router, serve, shutdown_signal, AppState};
pub use error::ApiError;
