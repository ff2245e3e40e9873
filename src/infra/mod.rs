//! Infrastructure layer
//!
//! Handles external processes.
//! This module is the only place where the toolchain is invoked.

pub mod toolchain;
