/// Kind of a VFS entry. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// One entry in the VFS: a file with in-memory content, or a directory.
///
/// `path` is the absolute normalized path and doubles as the store key;
/// `name` is its last segment. `content` is `Some` exactly when
/// `kind == NodeKind::File`. Owner and group are metadata only - no
/// permission checks are derived from them.
#[derive(Debug, Clone)]
pub struct VfsNode {
    pub path: String,
    pub name: String,
    pub kind: NodeKind,
    pub content: Option<String>,
    pub owner: String,
    pub group: String,
}

impl VfsNode {
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }
}
