use crate::config::{MountOptions, Owner};
use std::time::SystemTime;

/// Permission bits of every directory
pub const DIR_PERM: u16 = 0o444;
/// Permission bits of every file
pub const FILE_PERM: u16 = 0o555;

/// Whether a node is a directory or a regular file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileKind {
    /// A directory
    Directory,
    /// A regular file
    RegularFile,
}

impl FileKind {
    /// The `S_IFMT` bits of the kind
    pub const fn type_bits(&self) -> u32 {
        match self {
            Self::Directory => libc::S_IFDIR as u32,
            Self::RegularFile => libc::S_IFREG as u32,
        }
    }
}

#[doc = r#"
The attributes of one node, as reported by `getattr`.

All timestamps are the mount time and never change. The size of a
directory is 0, the size of a file is the length of its buffer.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Directory or regular file
    pub kind: FileKind,
    /// Permission bits
    pub perm: u16,
    /// Number of hard links.
    ///
    /// For a directory, 2 plus the number of child directories.
    pub nlink: u32,
    /// Owning user
    pub uid: u32,
    /// Owning group
    pub gid: u32,
    /// Size in bytes
    pub size: u64,
    /// Last access
    pub atime: SystemTime,
    /// Last modification
    pub mtime: SystemTime,
    /// Last status change
    pub ctime: SystemTime,
}

impl Metadata {
    fn stamped(kind: FileKind, perm: u16, nlink: u32, size: u64, options: &MountOptions) -> Self {
        let Owner { uid, gid } = options.owner;
        Self {
            kind,
            perm,
            nlink,
            uid,
            gid,
            size,
            atime: options.mounted_at,
            mtime: options.mounted_at,
            ctime: options.mounted_at,
        }
    }

    /// Attributes of an empty directory
    pub fn directory(options: &MountOptions) -> Self {
        Self::stamped(FileKind::Directory, DIR_PERM, 2, 0, options)
    }

    /// Attributes of a file holding `size` bytes
    pub fn file(size: u64, options: &MountOptions) -> Self {
        Self::stamped(FileKind::RegularFile, FILE_PERM, 1, size, options)
    }

    /// The full `st_mode`: type bits and permission bits
    pub const fn mode(&self) -> u32 {
        self.kind.type_bits() | self.perm as u32
    }

    /// True for directories
    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, FileKind::Directory)
    }
}
