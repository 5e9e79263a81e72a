//! csvpick command line: argument surface, logging bootstrap, and command
//! execution around the `csvpick-core` engine.

pub mod cli;
pub mod commands;
pub mod logging;
