//! Common test utilities for instacaption
//!
//! - Image payloads and provider reply builders
//! - [`providers::StubProvider`], a canned-reply provider
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, providers::StubProvider};
//!
//! let provider = StubProvider::replying(fixtures::captions_reply(&["a", "b"], "Casual"));
//! ```

pub mod fixtures;
pub mod providers;

pub use fixtures::{PNG_DATA_URI, captions_reply, png_image};
pub use providers::StubProvider;

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
