//! Segment trie for hierarchical include/exclude decisions
//!
//! A [`PackTree`] maps path prefixes (package names split into segments) to a
//! boolean decision. Querying a path walks as far down the tree as the path
//! matches and returns the decision of the deepest node reached, so every
//! unlisted descendant inherits the rule of its nearest listed ancestor.
//!
//! ```
//! use packfilter::trie::PackTree;
//!
//! let mut tree = PackTree::new(false);
//! tree.insert(&["com", "example"], true);
//! tree.insert(&["com", "example", "generated"], false);
//!
//! assert!(tree.query(&["com", "example", "app", "Main"]));
//! assert!(!tree.query(&["com", "example", "generated", "Stub"]));
//! assert!(!tree.query(&["org", "other"]));
//! ```

use std::collections::HashMap;
use std::fmt;

/// A node of the segment trie; the root represents the empty path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackTree {
    decision: bool,
    /// Children in insertion order, so diagnostic output follows construction order
    children: Vec<(String, PackTree)>,
    /// Segment -> position in `children`
    index: HashMap<String, usize>,
}

impl PackTree {
    /// Create a root node with the given default decision and no children
    pub fn new(default_decision: bool) -> Self {
        Self {
            decision: default_decision,
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Decision recorded on this node
    pub fn decision(&self) -> bool {
        self.decision
    }

    /// Apply `decision` to the exact `path`.
    ///
    /// Intermediate nodes created on the way down take the decision that was
    /// in effect above them before this rule existed; only the last segment
    /// receives `decision`. An existing node keeps its children when its own
    /// decision is overwritten. An empty path is ignored.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], decision: bool) {
        let ambient = self.decision;
        self.insert_with_default(path, decision, ambient);
    }

    fn insert_with_default<S: AsRef<str>>(&mut self, path: &[S], decision: bool, ambient: bool) {
        let Some((head, tail)) = path.split_first() else {
            return;
        };
        let head = head.as_ref();

        match self.child_mut(head) {
            Some(child) if tail.is_empty() => child.decision = decision,
            Some(child) => {
                let inherited = child.decision;
                child.insert_with_default(tail, decision, inherited);
            }
            None => {
                let mut child = if tail.is_empty() {
                    PackTree::new(decision)
                } else {
                    PackTree::new(ambient)
                };
                let inherited = child.decision;
                child.insert_with_default(tail, decision, inherited);
                self.push_child(head, child);
            }
        }
    }

    /// Decision in effect for `path`: the deepest matching node wins.
    ///
    /// An empty path answers with this node's own decision.
    pub fn query<S: AsRef<str>>(&self, path: &[S]) -> bool {
        let mut node = self;
        for segment in path {
            match node.child(segment.as_ref()) {
                Some(child) => node = child,
                None => break,
            }
        }
        node.decision
    }

    /// Node stored for exactly `path`, without falling back to ancestors
    pub fn node<S: AsRef<str>>(&self, path: &[S]) -> Option<&PackTree> {
        path.iter()
            .try_fold(self, |node, segment| node.child(segment.as_ref()))
    }

    /// Number of nodes below this one
    pub fn node_count(&self) -> usize {
        self.children
            .iter()
            .map(|(_, child)| 1 + child.node_count())
            .sum()
    }

    /// Direct children in insertion order
    pub fn children(&self) -> impl Iterator<Item = (&str, &PackTree)> {
        self.children
            .iter()
            .map(|(segment, child)| (segment.as_str(), child))
    }

    /// Tab-indented listing of every node below this one, one per line
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn child(&self, segment: &str) -> Option<&PackTree> {
        self.index.get(segment).map(|&i| &self.children[i].1)
    }

    fn child_mut(&mut self, segment: &str) -> Option<&mut PackTree> {
        match self.index.get(segment) {
            Some(&i) => Some(&mut self.children[i].1),
            None => None,
        }
    }

    fn push_child(&mut self, segment: &str, child: PackTree) {
        self.index.insert(segment.to_string(), self.children.len());
        self.children.push((segment.to_string(), child));
    }

    fn write_level(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for (segment, child) in &self.children {
            writeln!(f, "{}{} {}", "\t".repeat(depth), segment, child.decision)?;
            child.write_level(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for PackTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_level(f, 0)
    }
}
