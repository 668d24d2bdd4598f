use super::Metadata;
use crate::{
    config::MountOptions,
    error::{FsError, FsResult},
};
use std::collections::BTreeMap;

/// A node of the tree: a directory or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A directory owning its children
    Directory(DirNode),
    /// A regular file
    File(FileNode),
}

impl Node {
    /// Returns the node attributes
    pub fn metadata(&self) -> &Metadata {
        NodeRef::from(self).metadata()
    }
}

/// A borrowed [`Node`], or the root directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'t> {
    /// A directory
    Directory(&'t DirNode),
    /// A regular file
    File(&'t FileNode),
}

impl<'t> NodeRef<'t> {
    /// Returns the node attributes
    pub fn metadata(&self) -> &'t Metadata {
        match *self {
            NodeRef::Directory(d) => &d.metadata,
            NodeRef::File(f) => &f.metadata,
        }
    }
}

impl<'t> From<&'t Node> for NodeRef<'t> {
    fn from(node: &'t Node) -> Self {
        match node {
            Node::Directory(d) => NodeRef::Directory(d),
            Node::File(f) => NodeRef::File(f),
        }
    }
}

/// An immutable byte buffer with its attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    data: Vec<u8>,
    metadata: Metadata,
}

impl FileNode {
    /// Create a file; its size is the length of `data`
    pub fn new(data: Vec<u8>, options: &MountOptions) -> Self {
        let metadata = Metadata::file(data.len() as u64, options);
        Self { data, metadata }
    }

    /// Returns the whole content
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the file attributes
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns at most `size` bytes starting at `offset`.
    ///
    /// Reading past the end yields fewer bytes, or none.
    pub fn read_at(&self, offset: u64, size: usize) -> &[u8] {
        let len = self.data.len();
        let start = usize::try_from(offset).map_or(len, |o| o.min(len));
        let end = start.saturating_add(size).min(len);
        &self.data[start..end]
    }
}

/// A directory: named children plus its own attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirNode {
    children: BTreeMap<String, Node>,
    metadata: Metadata,
}

impl DirNode {
    /// Create an empty directory
    pub fn new(options: &MountOptions) -> Self {
        Self {
            children: BTreeMap::new(),
            metadata: Metadata::directory(options),
        }
    }

    /// Returns the directory attributes
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Add a file
    pub fn insert_file(&mut self, name: impl Into<String>, file: FileNode) {
        self.children.insert(name.into(), Node::File(file));
    }

    /// Attach a populated child directory
    pub fn insert_dir(&mut self, name: impl Into<String>, dir: DirNode) {
        self.metadata.nlink += 1;
        self.children.insert(name.into(), Node::Directory(dir));
    }

    /// Look up a direct child
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Look up a direct child directory
    pub fn child_dir(&self, name: &str) -> Option<&DirNode> {
        match self.children.get(name)? {
            Node::Directory(d) => Some(d),
            Node::File(_) => None,
        }
    }

    /// Iterate over `(name, node)` in ascending name order
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children
            .iter()
            .map(|(name, node)| (name.as_str(), node))
    }

    /// Returns the number of direct children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True if there are no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[doc = r#"
The whole projected tree, rooted at `/`.

Paths are absolute, `/`-separated. A trailing separator and empty
segments are ignored, so `/tracks/` and `/tracks` name the same node.
Every segment but the last must name a directory.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsTree {
    root: DirNode,
}

impl FsTree {
    /// Wrap a fully built root directory
    pub fn new(root: DirNode) -> Self {
        Self { root }
    }

    /// Returns the root directory
    pub fn root(&self) -> &DirNode {
        &self.root
    }

    /// Resolve `path` to a node
    pub fn resolve(&self, path: &str) -> FsResult<NodeRef<'_>> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let Some(leaf) = segments.next_back() else {
            return Ok(NodeRef::Directory(&self.root));
        };

        let mut dir = &self.root;
        for segment in segments {
            dir = dir
                .child_dir(segment)
                .ok_or_else(|| FsError::not_found(path))?;
        }
        dir.child(leaf)
            .map(NodeRef::from)
            .ok_or_else(|| FsError::not_found(path))
    }

    /// Resolve `path` to a directory
    pub fn dir(&self, path: &str) -> FsResult<&DirNode> {
        match self.resolve(path)? {
            NodeRef::Directory(d) => Ok(d),
            NodeRef::File(_) => Err(FsError::not_a_directory(path)),
        }
    }

    /// Resolve `path` to a file
    pub fn file(&self, path: &str) -> FsResult<&FileNode> {
        match self.resolve(path)? {
            NodeRef::File(f) => Ok(f),
            NodeRef::Directory(_) => Err(FsError::is_a_directory(path)),
        }
    }

    /// Call `visit` for every node below the root, parents before children.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &Node),
    {
        fn descend<F: FnMut(&str, &Node)>(prefix: &str, dir: &DirNode, visit: &mut F) {
            for (name, node) in dir.children() {
                let path = format!("{prefix}/{name}");
                visit(&path, node);
                if let Node::Directory(child) = node {
                    descend(&path, child, visit);
                }
            }
        }
        descend("", &self.root, &mut visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FsErrorKind;

    fn tree() -> FsTree {
        let options = MountOptions::default();
        let mut leaf = DirNode::new(&options);
        leaf.insert_file("b.mid", FileNode::new(vec![1, 2, 3], &options));
        let mut root = DirNode::new(&options);
        root.insert_file("a.txt", FileNode::new(b"hello".to_vec(), &options));
        root.insert_dir("dir", leaf);
        FsTree::new(root)
    }

    #[test]
    fn resolves_nested_paths() {
        let tree = tree();
        assert_eq!(tree.file("/dir/b.mid").unwrap().data(), &[1, 2, 3]);
        assert_eq!(tree.file("/a.txt").unwrap().metadata().size, 5);
        assert!(tree.dir("/dir/").is_ok());
        assert!(tree.dir("/").is_ok());
        assert!(tree.dir("").is_ok());
    }

    #[test]
    fn missing_segments_are_not_found() {
        let tree = tree();
        for path in ["/nope", "/nope/b.mid", "/a.txt/b.mid", "/dir/c.mid"] {
            assert_eq!(
                tree.resolve(path).unwrap_err().error_kind(),
                FsErrorKind::NotFound,
                "{path}"
            );
        }
    }

    #[test]
    fn kind_mismatch() {
        let tree = tree();
        assert_eq!(
            tree.dir("/a.txt").unwrap_err().error_kind(),
            FsErrorKind::NotADirectory
        );
        assert_eq!(
            tree.file("/dir").unwrap_err().error_kind(),
            FsErrorKind::IsADirectory
        );
    }

    #[test]
    fn nlink_counts_child_directories() {
        let tree = tree();
        assert_eq!(tree.root().metadata().nlink, 3);
        assert_eq!(tree.dir("/dir").unwrap().metadata().nlink, 2);
        assert_eq!(tree.file("/a.txt").unwrap().metadata().nlink, 1);
    }

    #[test]
    fn read_at_clips() {
        let file = FileNode::new(vec![0, 1, 2, 3, 4], &MountOptions::default());
        assert_eq!(file.read_at(1, 2), &[1, 2]);
        assert_eq!(file.read_at(3, 10), &[3, 4]);
        assert!(file.read_at(5, 1).is_empty());
        assert!(file.read_at(u64::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn walk_visits_parents_first() {
        let mut paths = Vec::new();
        tree().walk(|path, _| paths.push(path.to_string()));
        assert_eq!(paths, vec!["/a.txt", "/dir", "/dir/b.mid"]);
    }
}
