//! Tree cursor addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index path addressing one node within a template tree.
///
/// The empty path is the tree root; each segment selects a child by
/// position. Paths are what sessions persist between requests, so they
/// stay valid as long as the template itself does not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The root path (empty).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend the path by one child index.
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    /// Get the parent path, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Get the final child index, or `None` at the root.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Get the path depth (root is 0).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Get the raw index segments.
    pub fn segments(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(segments: Vec<usize>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
