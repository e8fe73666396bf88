//! Core functionality
//!
//! Caption generation, the provider seam and the types they share.

pub mod captioning;
pub mod providers;
pub mod share;
pub mod traits;
pub mod types;
