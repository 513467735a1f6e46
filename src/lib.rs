pub mod auth;
pub mod billing;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod locale;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod subscription;

pub use config::AppConfig;
pub use error::ApiError;
pub use routes::app;
pub use state::AppState;
