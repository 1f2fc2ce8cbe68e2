//! Domain layer: ancestry tree and breadth-first traversal
//!
//! This layer is independent of external concerns (no file I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod family;
pub mod queue;

pub use arena::{AncestryTree, TreeNode};
pub use error::{DomainError, DomainResult};
pub use family::{family_line, offspring_list, NO_OFFSPRING};
pub use queue::{TraversalQueue, QUEUE_SIZE};
