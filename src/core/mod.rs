//! Core business logic module
//!
//! This module contains the build logic for linkshared.
//! It spawns no processes - those belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`catalog`] - Ordered package catalog
//! - [`builder`] - Build orchestration logic

pub mod builder;
pub mod catalog;
