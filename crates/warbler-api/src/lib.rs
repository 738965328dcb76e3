//! # warbler-api
//!
//! HTTP server built with the Axum framework. Handlers accept HTML form posts
//! and answer with JSON bodies or `302 Found` redirects.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
