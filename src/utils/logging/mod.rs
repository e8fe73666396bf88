//! Logging utilities

pub mod logging;

pub use logging::{build_env_filter, init_logging};
