//! Library half of the `lightdark` binary.
//!
//! Argument parsing, logging setup, scenario playback and the command
//! implementations live here so they can be exercised from tests.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod scenario;
