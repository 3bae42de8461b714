//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analysis;
pub mod knowledge;
pub mod proposals;
pub mod stats;

// Re-export all handlers for use in router
pub use analysis::*;
pub use knowledge::*;
pub use proposals::*;
pub use stats::*;
