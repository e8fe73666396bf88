//! Core traits module
//!
//! Abstract interfaces between the caption service and its providers

pub mod provider;

pub use provider::*;
