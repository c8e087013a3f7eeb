//! Domain repositories
//! 
//! This module contains the traits through which wallet data enters the core.

pub mod snapshot_source;

// Re-export repositories
pub use snapshot_source::*;
