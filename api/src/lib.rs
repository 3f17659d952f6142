pub mod app;
pub mod config;
pub mod http;

pub use app::{App, api_router, health_router};
pub use config::Config;
pub use http::server::{ApiError, AppState};
