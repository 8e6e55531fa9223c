//! geowalk CLI library.
//!
//! Subcommand handlers, output rendering, and terminal styling for the
//! `geowalk-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
