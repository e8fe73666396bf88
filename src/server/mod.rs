//! HTTP server
//!
//! actix-web front for [`CaptionService`](crate::core::captioning::CaptionService).

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;

pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
