//! Core type definition module
//!
//! Request, response and payload types shared by the service, the provider
//! clients and the HTTP layer.

pub mod caption;
pub mod image;
pub mod requests;

pub use caption::*;
pub use image::*;
pub use requests::*;
