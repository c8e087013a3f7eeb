//! Infrastructure layer - configuration, logging and snapshot sources
//! 
//! This module contains the process-level plumbing around the wallet core:
//! environment configuration, logger setup, and file-backed snapshot sources.

pub mod config;
pub mod logger;
pub mod snapshot_file;

// Re-export infrastructure components
pub use config::*;
pub use logger::*;
pub use snapshot_file::*;
