//! Domain layer - entities and repositories
//! 
//! This module contains the domain model of the wallet state and the
//! seams through which snapshots reach it.

pub mod entities;
pub mod repositories;

// Re-export domain components
pub use entities::*;
pub use repositories::*;
