//! overboard/crates/ob-core/src/lib.rs
//!
//! The reputation and voting rules engine for Overboard.

pub mod board;
pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use board::*;
pub use error::*;
pub use models::*;
pub use traits::*;
