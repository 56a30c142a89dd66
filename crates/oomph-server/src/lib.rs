//! Hosting for the movement simulator: per-player actors and configuration.

pub mod actor;
pub mod config;
