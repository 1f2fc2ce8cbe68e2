//! offspring: an interactive ancestry tree.
//!
//! Layers:
//! - [`domain`]: the arena-indexed N-ary tree and its breadth-first traversal queue
//! - [`application`]: command parsing, bulk loading and the session loop
//! - [`cli`]: argument parsing, exit codes and terminal output
//! - [`config`]: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
