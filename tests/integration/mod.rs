//! Integration tests for instacaption
//!
//! These drive public entry points end to end: the caption service over a
//! canned provider, the Gemini client over a local HTTP mock, and the
//! actix app over both.

pub mod config_tests;
pub mod gemini_client_tests;
pub mod server_tests;
pub mod service_tests;
