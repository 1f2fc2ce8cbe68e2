//! Application layer: command parsing, bulk loading and the interactive session
//!
//! This layer orchestrates the domain tree and owns all console and file I/O.

pub mod command;
pub mod error;
pub mod error_ext;
pub mod loader;
pub mod session;

pub use command::{Command, HELP_TEXT};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use loader::{load_file, load_reader, LoadReport};
pub use session::{display_height, Flow, Session};
