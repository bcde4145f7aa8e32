//! Entity model module
//!
//! This module contains the catalog entity and the JSON error envelope.

pub mod coffee;
pub mod response;

// Re-export main types
pub use coffee::Coffee;
pub use response::JsonResponse;
