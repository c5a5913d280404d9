//! The tools module provides the helpers shared by both stages of the codec.
//!
//! The tools are:
//! - cli: Command line options and the interactive menu.
//! - freq_count: Symbol frequency counts and the probability model built from them.
//! - whitespace: Replace spaces, newlines and tabs with text markers, and restore them.
//!
pub mod cli;
pub mod freq_count;
pub mod whitespace;
