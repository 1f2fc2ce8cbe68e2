use generational_arena::{Arena, Index};
use std::io::Write;
use termtree::Tree;
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::family::family_line;
use crate::domain::queue::{TraversalQueue, QUEUE_SIZE};

/// Initial child storage per node; grows by doubling.
const CHILD_CAPACITY: usize = 2;

/// Tree node in the arena-based ancestry tree.
#[derive(Debug)]
pub struct TreeNode {
    /// Name of the family member, the lookup key
    pub name: String,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based N-ary ancestry tree.
///
/// Nodes live in a generational arena and are referenced by [`Index`], which
/// doubles as the identity handle for breadth-first traversal. Every node
/// reachable from `root` is owned by the tree; `destroy_tree` removes a whole
/// subtree from the arena.
#[derive(Debug)]
pub struct AncestryTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
    /// Growth increment of the per-call traversal queues
    queue_increment: usize,
}

impl Default for AncestryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl AncestryTree {
    pub fn new() -> Self {
        Self::with_queue_increment(QUEUE_SIZE)
    }

    pub fn with_queue_increment(queue_increment: usize) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            queue_increment,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes held in the arena, attached or not.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn name(&self, idx: Index) -> Option<&str> {
        self.arena.get(idx).map(|node| node.name.as_str())
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        self.arena
            .get(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    fn child_names(&self, idx: Index) -> Vec<&str> {
        self.children(idx)
            .iter()
            .filter_map(|&child| self.name(child))
            .collect()
    }

    fn queue(&self) -> TraversalQueue<Index> {
        TraversalQueue::with_increment(self.queue_increment)
    }

    /// Allocates a detached node named `name`.
    #[instrument(level = "trace", skip(self))]
    pub fn create_node(&mut self, name: &str) -> Index {
        self.arena.insert(TreeNode {
            name: name.to_string(),
            children: Vec::with_capacity(CHILD_CAPACITY),
        })
    }

    /// Removes `idx` and its whole subtree from the arena and detaches it from
    /// its parent.
    ///
    /// Walks the subtree with an explicit stack. Clears the root when the root
    /// itself is destroyed.
    #[instrument(level = "debug", skip(self))]
    pub fn destroy_tree(&mut self, idx: Option<Index>) {
        let Some(idx) = idx else {
            return;
        };
        for (_, node) in self.arena.iter_mut() {
            node.children.retain(|&child| child != idx);
        }
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children);
            }
        }
        if self.root == Some(idx) {
            self.root = None;
        }
    }

    /// Destroys the whole tree.
    pub fn clear(&mut self) {
        self.destroy_tree(self.root);
        self.arena.clear();
        self.root = None;
    }

    /// Breadth-first search for `name` below the root, root included.
    pub fn find_node(&self, name: &str) -> Option<Index> {
        self.find_from(self.root, name)
    }

    /// Breadth-first search for `name` in the subtree at `start`.
    ///
    /// Returns the shallowest, then leftmost, match.
    #[instrument(level = "trace", skip(self))]
    pub fn find_from(&self, start: Option<Index>, name: &str) -> Option<Index> {
        let start = start?;
        let mut queue = self.queue();
        queue.insert(start);
        while let Some(current) = queue.peek() {
            if self.name(current) == Some(name) {
                queue.clear();
                return Some(current);
            }
            for &child in self.children(current) {
                queue.insert(child);
            }
            queue.pop();
        }
        queue.clear();
        None
    }

    /// Resolves the subtree root for the optional-name queries.
    fn resolve(&self, name: Option<&str>) -> Option<Index> {
        match name {
            None => self.root,
            Some(name) => self.find_node(name),
        }
    }

    /// Adds `child_name` below `parent_name` and returns the (possibly new) root.
    ///
    /// Cases, in order:
    /// 1. empty tree: a root named `parent_name`, with the child if given
    /// 2. parent found: append the child unless the parent's subtree already
    ///    holds that name
    /// 3. parent missing, current root named `child_name`: a new root named
    ///    `parent_name` adopts the whole tree
    /// 4. otherwise the tree is left untouched
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent_name: &str, child_name: Option<&str>) -> DomainResult<Index> {
        let Some(root) = self.root else {
            let root = self.create_node(parent_name);
            if let Some(child_name) = child_name {
                let child = self.create_node(child_name);
                self.attach(root, child);
            }
            self.root = Some(root);
            debug!("created root '{}'", parent_name);
            return Ok(root);
        };

        let Some(child_name) = child_name else {
            return Err(DomainError::MissingChild(parent_name.to_string()));
        };

        if let Some(parent) = self.find_node(parent_name) {
            if self.find_from(Some(parent), child_name).is_some() {
                return Err(DomainError::AlreadyChild {
                    parent: parent_name.to_string(),
                    child: child_name.to_string(),
                });
            }
            let child = self.create_node(child_name);
            self.attach(parent, child);
            trace!("added '{}' to '{}'", child_name, parent_name);
            return Ok(root);
        }

        if self.name(root) == Some(child_name) {
            let new_root = self.create_node(parent_name);
            self.attach(new_root, root);
            self.root = Some(new_root);
            debug!("'{}' is the new root above '{}'", parent_name, child_name);
            return Ok(new_root);
        }

        Err(DomainError::NotInTree {
            parent: parent_name.to_string(),
            child: child_name.to_string(),
        })
    }

    fn attach(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(parent) {
            if node.children.len() == node.children.capacity() {
                let capacity = node.children.capacity().max(1);
                node.children.reserve_exact(capacity);
            }
            node.children.push(child);
        }
    }

    /// Family line of a single node: `<name> had <children>`.
    pub fn family_of(&self, idx: Index) -> Option<String> {
        let name = self.name(idx)?;
        Some(family_line(name, &self.child_names(idx)))
    }

    /// Writes one family line per node, breadth first from the root or from
    /// the node named `name`.
    #[instrument(level = "debug", skip(self, out))]
    pub fn print_tree<W: Write>(&self, name: Option<&str>, out: &mut W) -> DomainResult<()> {
        let Some(start) = self.resolve(name) else {
            return match name {
                Some(name) => Err(DomainError::NotFound(name.to_string())),
                None => Ok(()),
            };
        };
        let mut queue = self.queue();
        queue.insert(start);
        while let Some(current) = queue.peek() {
            if let Some(line) = self.family_of(current) {
                writeln!(out, "{}", line)?;
            }
            for &child in self.children(current) {
                queue.insert(child);
            }
            queue.pop();
        }
        queue.clear();
        Ok(())
    }

    /// Number of nodes in the subtree, root included. 0 for an empty tree or
    /// an unknown name.
    #[instrument(level = "debug", skip(self))]
    pub fn tree_size(&self, name: Option<&str>) -> usize {
        let Some(start) = self.resolve(name) else {
            return 0;
        };
        let mut queue = self.queue();
        queue.insert(start);
        while let Some(current) = queue.peek() {
            for &child in self.children(current) {
                queue.insert(child);
            }
            queue.pop();
        }
        let size = queue.visited_size();
        queue.clear();
        size
    }

    /// Height of the subtree counting nodes: a leaf is 1, an empty tree or
    /// unknown name is 0.
    #[instrument(level = "debug", skip(self))]
    pub fn tree_height(&self, name: Option<&str>) -> usize {
        self.resolve(name)
            .map(|start| self.calculate_height(start))
            .unwrap_or(0)
    }

    /// Recurses once per level.
    fn calculate_height(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_height(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Indented rendering of the subtree, for the `tree` command.
    pub fn to_termtree(&self, name: Option<&str>) -> DomainResult<Tree<String>> {
        match self.resolve(name) {
            Some(start) => Ok(self.build_termtree(start)),
            None => match name {
                Some(name) => Err(DomainError::NotFound(name.to_string())),
                None => Ok(Tree::new("Empty tree".to_string())),
            },
        }
    }

    fn build_termtree(&self, node_idx: Index) -> Tree<String> {
        let label = self.name(node_idx).unwrap_or_default().to_string();
        let leaves: Vec<_> = self
            .children(node_idx)
            .iter()
            .map(|&child| self.build_termtree(child))
            .collect();
        Tree::new(label).with_leaves(leaves)
    }
}
