//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//! - [`prompts`] - Interactive prompts
//!
//! # Design
//!
//! All output and prompts go through this module to ensure consistent
//! formatting and proper handling of quiet, debug and non-interactive
//! modes.

pub mod output;
pub mod prompts;
