//! SpaceScope Library
//!
//! This module exposes the cache, CLI, and data modules for use in
//! integration tests.

pub mod cache;
pub mod cli;
pub mod data;
