//! Virtual File System
//!
//! A read-only tree of files and directories addressed by `~`-rooted paths.
//! The tree is built once from seed data and never mutated afterwards, so a
//! single instance can be shared by every shell session.
//!
//! Path resolution is deliberately shallow: only a bare leading `..` token is
//! understood. Interior `.` and `..` segments are kept verbatim and simply
//! fail to resolve.

pub mod seed;

use std::collections::HashMap;
use thiserror::Error;

/// The root directory. Always exists.
pub const ROOT: &str = "~";

/// Filesystem lookup failures, rendered as the tail of command errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("No such file or directory")]
    NotFound,
    #[error("Is a directory")]
    IsADirectory,
    #[error("Not a directory")]
    NotADirectory,
}

/// What a node holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A file with (possibly marked-up) text content
    File { content: String },
    /// A directory with display-ordered child names and an optional blurb
    Directory {
        children: Vec<String>,
        blurb: Option<String>,
    },
}

/// A node in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsNode {
    /// Absolute path, e.g. `~/skills/tools`
    pub path: String,
    pub kind: NodeKind,
}

impl FsNode {
    /// Create a file node
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::File {
                content: content.into(),
            },
        }
    }

    /// Create a directory node. Child names are display names; directories
    /// conventionally carry a trailing `/`.
    pub fn dir(path: impl Into<String>, children: &[&str]) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::Directory {
                children: children.iter().map(|c| c.to_string()).collect(),
                blurb: None,
            },
        }
    }

    /// Attach a descriptive blurb to a directory (no-op for files)
    pub fn with_blurb(mut self, text: impl Into<String>) -> Self {
        if let NodeKind::Directory { blurb, .. } = &mut self.kind {
            *blurb = Some(text.into());
        }
        self
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// Last path segment (`~` for the root)
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Searchable text: file content or directory blurb
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Directory { blurb, .. } => blurb.as_deref(),
        }
    }

    /// Child names, empty for files
    pub fn children(&self) -> &[String] {
        match &self.kind {
            NodeKind::Directory { children, .. } => children,
            NodeKind::File { .. } => &[],
        }
    }
}

/// The filesystem
#[derive(Debug, Clone)]
pub struct VirtualFs {
    nodes: HashMap<String, FsNode>,
    /// Insertion order, used for deterministic iteration
    order: Vec<String>,
}

impl VirtualFs {
    /// Build a filesystem from nodes. A root directory is synthesized if the
    /// nodes don't provide one; later duplicates of a path replace earlier ones.
    pub fn from_nodes(nodes: impl IntoIterator<Item = FsNode>) -> Self {
        let mut fs = Self {
            nodes: HashMap::new(),
            order: Vec::new(),
        };
        for node in nodes {
            if !fs.nodes.contains_key(&node.path) {
                fs.order.push(node.path.clone());
            }
            fs.nodes.insert(node.path.clone(), node);
        }
        if !fs.nodes.get(ROOT).is_some_and(FsNode::is_dir) {
            if !fs.nodes.contains_key(ROOT) {
                fs.order.insert(0, ROOT.to_string());
            }
            fs.nodes.insert(ROOT.to_string(), FsNode::dir(ROOT, &[]));
        }
        fs
    }

    /// The portfolio tree every session starts with
    pub fn seeded() -> Self {
        Self::from_nodes(seed::nodes())
    }

    /// Look up a node by absolute path
    pub fn lookup(&self, path: &str) -> Option<&FsNode> {
        self.nodes.get(path)
    }

    /// Content of a file, or why it can't be read
    pub fn read_file(&self, path: &str) -> Result<&str, FsError> {
        match self.lookup(path).map(|n| &n.kind) {
            Some(NodeKind::File { content }) => Ok(content),
            Some(NodeKind::Directory { .. }) => Err(FsError::IsADirectory),
            None => Err(FsError::NotFound),
        }
    }

    /// The directory node at `path`, or why it isn't one
    pub fn directory(&self, path: &str) -> Result<&FsNode, FsError> {
        match self.lookup(path) {
            Some(node) if node.is_dir() => Ok(node),
            Some(_) => Err(FsError::NotADirectory),
            None => Err(FsError::NotFound),
        }
    }

    /// All nodes in seed order
    pub fn iter(&self) -> impl Iterator<Item = &FsNode> {
        self.order.iter().filter_map(|p| self.nodes.get(p))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Resolve `input` against `cwd` into an absolute path.
///
/// Rules, first match wins:
/// - empty or `.` is `cwd`
/// - `~/...` is already absolute (one trailing `/` dropped)
/// - `~` is the root
/// - `..` is the parent of `cwd`
/// - anything else is joined onto `cwd` (one trailing `/` dropped)
pub fn resolve(input: &str, cwd: &str) -> String {
    if input.is_empty() || input == "." {
        return cwd.to_string();
    }

    if input.starts_with("~/") {
        return strip_trailing_slash(input).to_string();
    }

    if input == ROOT {
        return ROOT.to_string();
    }

    if input == ".." {
        return parent(cwd);
    }

    let joined = if cwd == ROOT {
        format!("{}/{}", ROOT, input)
    } else {
        format!("{}/{}", cwd, input)
    };
    strip_trailing_slash(&joined).to_string()
}

/// Parent of an absolute path; the root is its own parent
pub fn parent(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((head, _)) if !head.is_empty() => head.to_string(),
        _ => ROOT.to_string(),
    }
}

fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}
