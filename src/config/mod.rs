//! Configuration module for Buckwheat
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BuckwheatPaths;
pub use settings::Settings;
