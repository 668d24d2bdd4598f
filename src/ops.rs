#![doc = r#"
The read-only filesystem protocol and its implementation over a projected tree.

[`ReadOnlyFilesystem`] is the surface a host binding forwards its
requests to. Operations are addressed by absolute path; reads are
stateless and addressed by offset, so a file handle is only an
identifier.

Every mutating operation has a provided implementation that rejects the
request with [`FsErrorKind::NotSupported`](crate::FsErrorKind::NotSupported)
and leaves the tree untouched.
"#]

use crate::{
    config::MountOptions,
    error::{FsError, FsResult, LoadError},
    fs::{FsTree, Metadata, Node, NodeRef},
    project::project,
    sequence::Sequence,
};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};

/// An open file handle
pub type FileHandle = u64;

/// The current directory entry, always listed first
pub const DOT: &str = ".";
/// The parent directory entry, always listed second
pub const DOT_DOT: &str = "..";

/// Totals over the whole tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatFs {
    /// Number of regular files
    pub files: u64,
    /// Number of directories, the root included
    pub directories: u64,
    /// Sum of all file sizes
    pub bytes: u64,
}

/// Reject a mutating operation.
fn read_only<T>(path: &str, operation: &'static str) -> FsResult<T> {
    warn!("Rejected {operation} on {path}: read-only file system");
    Err(FsError::not_supported(path, operation))
}

/// The path-addressed operations of a read-only filesystem.
pub trait ReadOnlyFilesystem {
    /// Attributes of the file or directory at `path`
    fn getattr(&self, path: &str) -> FsResult<Metadata>;

    /// Names under the directory at `path`, starting with `.` and `..`
    fn readdir(&self, path: &str) -> FsResult<Vec<String>>;

    /// Open the file at `path` for reading.
    ///
    /// `flags` are the `open(2)` flags; anything but read-only access is rejected.
    fn open(&self, path: &str, flags: i32) -> FsResult<FileHandle>;

    /// Up to `size` bytes of the file at `path`, starting at `offset`
    fn read(&self, path: &str, size: usize, offset: u64, handle: FileHandle) -> FsResult<Vec<u8>>;

    /// Totals over the whole filesystem
    fn statfs(&self) -> StatFs;

    /// Close a handle returned by [`open`](Self::open)
    fn release(&self, _path: &str, _handle: FileHandle) -> FsResult<()> {
        Ok(())
    }

    /// Write to a file
    fn write(
        &self,
        path: &str,
        _data: &[u8],
        _offset: u64,
        _handle: FileHandle,
    ) -> FsResult<usize> {
        read_only(path, "write")
    }

    /// Create a file
    fn create(&self, path: &str, _mode: u32) -> FsResult<FileHandle> {
        read_only(path, "create")
    }

    /// Create a directory
    fn mkdir(&self, path: &str, _mode: u32) -> FsResult<()> {
        read_only(path, "mkdir")
    }

    /// Remove a file
    fn unlink(&self, path: &str) -> FsResult<()> {
        read_only(path, "unlink")
    }

    /// Remove a directory
    fn rmdir(&self, path: &str) -> FsResult<()> {
        read_only(path, "rmdir")
    }

    /// Move a node
    fn rename(&self, from: &str, _to: &str) -> FsResult<()> {
        read_only(from, "rename")
    }

    /// Change the size of a file
    fn truncate(&self, path: &str, _size: u64) -> FsResult<()> {
        read_only(path, "truncate")
    }

    /// Change the mode of a node
    fn chmod(&self, path: &str, _mode: u32) -> FsResult<()> {
        read_only(path, "chmod")
    }
}

#[doc = r#"
A mounted MIDI sequence.

Holds the projected tree, which never changes after [`MidiFs::mount`],
and the handle counter, the only state an operation updates.
"#]
#[derive(Debug)]
pub struct MidiFs {
    tree: FsTree,
    next_handle: AtomicU64,
}

impl MidiFs {
    /// Project `sequence` and serve the result
    pub fn mount(sequence: &Sequence<'_>, options: &MountOptions) -> Result<Self, LoadError> {
        let tree = project(sequence, options)?;
        let fs = Self::new(tree);
        let stats = fs.statfs();
        debug!(
            "Mounted {} files in {} directories, {} bytes",
            stats.files, stats.directories, stats.bytes
        );
        Ok(fs)
    }

    /// Serve an already built tree
    pub fn new(tree: FsTree) -> Self {
        Self {
            tree,
            next_handle: AtomicU64::new(1),
        }
    }

    /// Returns the tree being served
    pub fn tree(&self) -> &FsTree {
        &self.tree
    }
}

impl ReadOnlyFilesystem for MidiFs {
    fn getattr(&self, path: &str) -> FsResult<Metadata> {
        trace!("getattr {path}");
        Ok(*self.tree.resolve(path)?.metadata())
    }

    fn readdir(&self, path: &str) -> FsResult<Vec<String>> {
        trace!("readdir {path}");
        let dir = self.tree.dir(path)?;
        let mut names = Vec::with_capacity(dir.len() + 2);
        names.push(DOT.to_string());
        names.push(DOT_DOT.to_string());
        // files first, then directories
        let (files, dirs): (Vec<_>, Vec<_>) = dir
            .children()
            .partition(|(_, node)| matches!(node, Node::File(_)));
        for (name, _) in files.into_iter().chain(dirs) {
            names.push(name.to_string());
        }
        Ok(names)
    }

    fn open(&self, path: &str, flags: i32) -> FsResult<FileHandle> {
        trace!("open {path} flags {flags:#o}");
        if flags & libc::O_ACCMODE != libc::O_RDONLY
            || flags & (libc::O_CREAT | libc::O_TRUNC | libc::O_APPEND) != 0
        {
            return read_only(path, "open for writing");
        }
        self.tree.file(path)?;
        Ok(self.next_handle.fetch_add(1, Ordering::Relaxed))
    }

    fn read(&self, path: &str, size: usize, offset: u64, handle: FileHandle) -> FsResult<Vec<u8>> {
        trace!("read {path} size {size} offset {offset} fh {handle}");
        Ok(self.tree.file(path)?.read_at(offset, size).to_vec())
    }

    fn statfs(&self) -> StatFs {
        // the root is not visited by `walk`
        let mut stats = StatFs {
            directories: 1,
            ..Default::default()
        };
        self.tree.walk(|_, node| match NodeRef::from(node) {
            NodeRef::Directory(_) => stats.directories += 1,
            NodeRef::File(f) => {
                stats.files += 1;
                stats.bytes += f.metadata().size;
            }
        });
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{DirNode, FileNode};

    fn fs() -> MidiFs {
        let options = MountOptions::default();
        let mut root = DirNode::new(&options);
        root.insert_file("a", FileNode::new(vec![9; 10], &options));
        root.insert_dir("d", DirNode::new(&options));
        MidiFs::new(FsTree::new(root))
    }

    #[test]
    fn handles_increase() {
        let fs = fs();
        let first = fs.open("/a", libc::O_RDONLY).unwrap();
        let second = fs.open("/a", libc::O_RDONLY).unwrap();
        assert_eq!(first, 1);
        assert!(second > first);
    }

    #[test]
    fn open_rejects_write_access() {
        let fs = fs();
        for flags in [libc::O_WRONLY, libc::O_RDWR, libc::O_RDONLY | libc::O_TRUNC] {
            let err = fs.open("/a", flags).unwrap_err();
            assert_eq!(err.errno(), crate::Errno::ReadOnly);
        }
    }

    #[test]
    fn open_directory_fails() {
        assert!(fs().open("/d", libc::O_RDONLY).is_err());
    }

    #[test]
    fn statfs_counts_everything() {
        assert_eq!(
            fs().statfs(),
            StatFs {
                files: 1,
                directories: 2,
                bytes: 10
            }
        );
    }
}
