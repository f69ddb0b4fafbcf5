//! AeroSpace-specific implementations.
//!
//! This module provides the concrete
//! [`WindowManager`](crate::traits::WindowManager) backend, which drives the
//! `aerospace` command-line client, and the parsers for its output.
//!
//! Nothing outside this module should reference the AeroSpace CLI directly.

pub mod parse;
pub mod wm;
