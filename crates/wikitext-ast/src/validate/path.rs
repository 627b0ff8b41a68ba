use std::fmt;

use serde::Serialize;

/// Location of a node: the child indices leading to it from the validated
/// root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this is the path of the root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Child indices from the root.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.push(index);
        path
    }

    /// Descends into the `index`-th child.
    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    /// Ascends to the parent.
    pub fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}
