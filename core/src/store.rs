use std::collections::HashMap;

use crate::error::LoadError;
use crate::loader;
use crate::node::{NodeKind, VfsNode};
use crate::path::{normalize, parent_of};

/// Group assigned to entries whose image declares none.
pub const DEFAULT_GROUP: &str = "users";

/// The in-memory VFS: a flat map from absolute normalized path to node,
/// plus the image's logical name and the session's current directory.
///
/// Root `"/"` is implicit and never stored. `current_dir` always denotes
/// either root or an existing directory node; loading a new image resets
/// it to root. Parent/child relationships are derived from path structure
/// alone - there are no explicit links between nodes.
#[derive(Debug)]
pub struct VfsStore {
    name: String,
    current_dir: String,
    nodes: HashMap<String, VfsNode>,
}

impl Default for VfsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VfsStore {
    /// An empty store with no image loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "default_vfs".to_string(),
            current_dir: "/".to_string(),
            nodes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by path, resolved against the current directory.
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&VfsNode> {
        self.nodes.get(&normalize(path, &self.current_dir))
    }

    /// Load an image from a file on disk, replacing the store wholesale.
    ///
    /// `user` becomes the default owner of entries that declare none.
    /// Any read failure is `LoadError::NotFound`; on any failure the
    /// existing contents and current directory are left untouched.
    pub fn load_path(&mut self, path: &str, user: &str) -> Result<(), LoadError> {
        let xml = std::fs::read_to_string(path).map_err(|_| LoadError::NotFound {
            path: path.to_string(),
        })?;
        self.load_str(&xml, user)
    }

    /// Load an image from an XML string, replacing the store wholesale
    /// and resetting the current directory to root.
    pub fn load_str(&mut self, xml: &str, user: &str) -> Result<(), LoadError> {
        let image = loader::parse_image(xml, user)?;
        tracing::debug!(name = %image.name, nodes = image.nodes.len(), "loaded VFS image");
        self.name = image.name;
        self.nodes = image.nodes;
        self.current_dir = "/".to_string();
        Ok(())
    }

    /// Sorted names of the immediate children of `path`.
    ///
    /// `None` when the resolved path is neither root nor an existing node
    /// (the caller's "no such directory" signal). Listing a file path
    /// yields an empty listing rather than an error.
    #[must_use]
    pub fn list(&self, path: &str) -> Option<Vec<String>> {
        let target = normalize(path, &self.current_dir);

        if target != "/" && !self.nodes.contains_key(&target) {
            return None;
        }

        let mut items: Vec<String> = self
            .nodes
            .values()
            .filter(|node| node.path != target && parent_of(&node.path) == target)
            .map(|node| node.name.clone())
            .collect();
        items.sort();
        Some(items)
    }

    /// Change the current directory. Succeeds only for root or an existing
    /// directory node; otherwise the current directory is unchanged.
    pub fn change_dir(&mut self, path: &str) -> bool {
        let target = normalize(path, &self.current_dir);

        if target == "/" || self.nodes.get(&target).is_some_and(VfsNode::is_dir) {
            self.current_dir = target;
            true
        } else {
            false
        }
    }

    /// Content of the file at `path`, if it exists and is a file.
    #[must_use]
    pub fn read_file(&self, path: &str) -> Option<&str> {
        let target = normalize(path, &self.current_dir);
        self.nodes
            .get(&target)
            .filter(|node| node.kind == NodeKind::File)
            .and_then(|node| node.content.as_deref())
    }

    /// Set ownership metadata on an existing node. Owner is always set;
    /// group only when supplied and non-empty. Returns false when no node
    /// exists at the resolved path.
    pub fn set_owner(&mut self, path: &str, owner: &str, group: Option<&str>) -> bool {
        let target = normalize(path, &self.current_dir);
        let Some(node) = self.nodes.get_mut(&target) else {
            return false;
        };

        node.owner = owner.to_string();
        if let Some(group) = group {
            if !group.is_empty() {
                node.group = group.to_string();
            }
        }
        true
    }
}
