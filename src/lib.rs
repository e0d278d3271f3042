//! Video preference service: users declare genre preferences, videos are
//! catalogued by genre, and view/share/download interactions are logged.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
