#![doc = r#"
Errors produced while loading a sequence and while serving filesystem operations.

Loading failures ([`LoadError`]) are fatal: no tree is ever built from a
container that failed to decode or encode. Operation failures
([`FsError`]) are reported to the caller of one operation and leave the
tree untouched.
"#]

use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

/// A failure to turn a MIDI container into a filesystem tree.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The codec rejected the source bytes.
    #[error("MIDI parse error: {0}")]
    Codec(String),

    /// A format 0 container must hold exactly one track.
    #[error("Single multi-channel file holds {0} tracks, expected 1")]
    SingleTrackCount(usize),

    /// A generated file could not be encoded.
    #[error("Could not encode {name}: {source}")]
    Encode {
        /// Name of the file being generated
        name: String,
        /// Writer failure
        source: std::io::Error,
    },
}

impl From<midly::Error> for LoadError {
    fn from(e: midly::Error) -> Self {
        LoadError::Codec(e.to_string())
    }
}

#[doc = r#"
An error raised by one filesystem operation, along with the path it was raised for.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{path}: {kind}")]
pub struct FsError {
    path: String,
    pub(crate) kind: FsErrorKind,
}

/// The kind of error a filesystem operation can produce
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FsErrorKind {
    /// No node lives at the path
    #[error("No such file or directory")]
    NotFound,
    /// A directory was expected but a file was found
    #[error("Not a directory")]
    NotADirectory,
    /// A file was expected but a directory was found
    #[error("Is a directory")]
    IsADirectory,
    /// The operation would modify the tree
    #[error("Read-only file system ({0} is not supported)")]
    NotSupported(&'static str),
}

impl FsError {
    /// Create an error from a path and kind
    pub fn new(path: impl Into<String>, kind: FsErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
    /// Nothing lives at `path`
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(path, FsErrorKind::NotFound)
    }
    /// `path` is a file where a directory was expected
    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::new(path, FsErrorKind::NotADirectory)
    }
    /// `path` is a directory where a file was expected
    pub fn is_a_directory(path: impl Into<String>) -> Self {
        Self::new(path, FsErrorKind::IsADirectory)
    }
    /// `operation` would have modified `path`
    pub fn not_supported(path: impl Into<String>, operation: &'static str) -> Self {
        Self::new(path, FsErrorKind::NotSupported(operation))
    }
    /// Returns the error kind.
    pub fn error_kind(&self) -> FsErrorKind {
        self.kind
    }
    /// Returns the path the operation was called with.
    pub fn path(&self) -> &str {
        &self.path
    }
    /// True if nothing was found at the path
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, FsErrorKind::NotFound)
    }
    /// The error code a host binding should reply with.
    pub const fn errno(&self) -> Errno {
        match self.kind {
            FsErrorKind::NotFound => Errno::NoEntry,
            FsErrorKind::NotADirectory => Errno::NotDirectory,
            FsErrorKind::IsADirectory => Errno::IsDirectory,
            FsErrorKind::NotSupported(_) => Errno::ReadOnly,
        }
    }
}

/// POSIX error codes surfaced by the operation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(i32)]
pub enum Errno {
    /// `ENOENT`
    NoEntry = libc::ENOENT,
    /// `ENOTDIR`
    NotDirectory = libc::ENOTDIR,
    /// `EISDIR`
    IsDirectory = libc::EISDIR,
    /// `EROFS`
    ReadOnly = libc::EROFS,
}

/// The result type of every filesystem operation (see [`FsError`])
pub type FsResult<T> = Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errno_converts_both_ways() {
        for errno in [
            Errno::NoEntry,
            Errno::NotDirectory,
            Errno::IsDirectory,
            Errno::ReadOnly,
        ] {
            let raw: i32 = errno.into();
            assert_eq!(Errno::try_from(raw).unwrap(), errno);
        }
        assert_eq!(i32::from(Errno::ReadOnly), libc::EROFS);
        assert!(Errno::try_from(0).is_err());
    }

    #[test]
    fn kind_maps_to_errno() {
        assert_eq!(FsError::not_found("/a").errno(), Errno::NoEntry);
        assert_eq!(FsError::is_a_directory("/").errno(), Errno::IsDirectory);
        let err = FsError::not_supported("/a", "write");
        assert_eq!(err.errno(), Errno::ReadOnly);
        assert_eq!(err.path(), "/a");
    }
}
