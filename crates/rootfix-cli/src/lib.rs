//! rootfix CLI library
//!
//! Exposes the argument surface, configuration loading, and command
//! implementations so integration tests can drive commands without
//! spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
