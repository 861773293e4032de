//! Ratpath CLI library.
//!
//! Command handlers, output rendering, terminal styling and logging setup
//! for the `ratpath-cli` binary.

pub mod commands;
pub mod logging;
pub mod output;
pub mod terminal;

#[cfg(test)]
pub(crate) mod test_helpers;
