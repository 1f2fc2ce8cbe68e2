//! Bulk loading of `parent, child1, child2, ...` family files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::application::command::{read_line_lossy, split_fields};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{AncestryTree, DomainError};

/// Outcome of a bulk load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of `add_child` calls that changed the tree
    pub added: usize,
    /// Rejected insertions, in input order
    pub rejected: Vec<DomainError>,
}

/// Loads every line of `path` into `tree`.
#[instrument(level = "debug", skip(tree))]
pub fn load_file(tree: &mut AncestryTree, path: &Path) -> ApplicationResult<LoadReport> {
    let file = File::open(path).with_path_context("open family file", path)?;
    load_reader(tree, BufReader::new(file))
}

/// Loads `parent, child, ...` lines into `tree`, children left to right.
///
/// Rejections never stop the load. A parent-only line creates the root of an
/// empty tree and is skipped otherwise. Invalid UTF-8 is replaced, not fatal.
pub fn load_reader<R: BufRead>(
    tree: &mut AncestryTree,
    mut reader: R,
) -> ApplicationResult<LoadReport> {
    let mut report = LoadReport::default();
    let mut buf = Vec::new();
    let mut lineno = 0;
    while let Some(line) = read_line_lossy(&mut reader, &mut buf).with_context("read family file")? {
        lineno += 1;
        let fields = split_fields(&line);
        let Some((parent, children)) = fields.split_first() else {
            continue;
        };

        if children.is_empty() {
            if tree.is_empty() {
                tree.add_child(parent, None)?;
                report.added += 1;
            } else {
                warn!(line = lineno, "skipping line without children: {}", parent);
            }
            continue;
        }

        for child in children {
            match tree.add_child(parent, Some(child.as_str())) {
                Ok(_) => report.added += 1,
                Err(e) => {
                    debug!(line = lineno, "rejected: {}", e);
                    report.rejected.push(e);
                }
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn given_lines_when_loading_then_children_added_in_order() {
        let mut tree = AncestryTree::new();
        let input = "Bob, Carl, Dana\nCarl ,Eve\n\n";
        let report = load_reader(&mut tree, Cursor::new(input)).unwrap();

        assert_eq!(report.added, 3);
        assert!(report.rejected.is_empty());
        assert_eq!(tree.tree_size(None), 4);
        let root = tree.root().unwrap();
        assert_eq!(tree.family_of(root).unwrap(), "Bob had Carl and Dana.");
    }

    #[test]
    fn given_parent_only_line_when_tree_empty_then_creates_root() {
        let mut tree = AncestryTree::new();
        let report = load_reader(&mut tree, Cursor::new("Ann\nZed\n")).unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(tree.tree_size(None), 1);
        assert_eq!(tree.name(tree.root().unwrap()), Some("Ann"));
    }

    #[test]
    fn given_disconnected_line_when_loading_then_rejected_and_load_continues() {
        let mut tree = AncestryTree::new();
        let input = "Bob, Carl\nXavier, Yan\nBob, Carl\nCarl, Dana\n";
        let report = load_reader(&mut tree, Cursor::new(input)).unwrap();

        assert_eq!(report.added, 2);
        assert_eq!(report.rejected.len(), 2);
        assert!(matches!(report.rejected[0], DomainError::NotInTree { .. }));
        assert!(matches!(report.rejected[1], DomainError::AlreadyChild { .. }));
        assert_eq!(tree.tree_size(None), 3);
    }

    #[test]
    fn given_latin1_line_when_loading_then_following_lines_still_loaded() {
        let mut tree = AncestryTree::new();
        let input: &[u8] = b"Bob, Carl\nJos\xe9, Ana\nCarl, Dana\n";
        let report = load_reader(&mut tree, Cursor::new(input)).unwrap();

        assert_eq!(report.added, 2);
        assert_eq!(report.rejected.len(), 1);
        assert!(matches!(report.rejected[0], DomainError::NotInTree { .. }));
        assert_eq!(tree.tree_size(None), 3);
        assert!(tree.find_node("Dana").is_some());
    }
}
