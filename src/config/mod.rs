//! Configuration Module
//!
//! Handles loading and validation of the tool configuration: where the
//! settings store lives, logging, and the content types the host offers.

pub mod manager;
pub mod types;

pub use manager::ConfigManager;
pub use types::*;
