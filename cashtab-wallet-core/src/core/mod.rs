//! Core wallet functionality
//! 
//! This module contains the wallet state store and the session manager
//! that keeps it in sync with the network layer.

pub mod wallet;
