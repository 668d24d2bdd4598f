#![doc = r#"
Options that shape a mounted tree.

```
use midifs::{DeltaMode, MountOptions, Owner};

let options = MountOptions::default()
    .with_owner(Owner::new(1000, 1000))
    .with_delta_mode(DeltaMode::Absolute);
assert_eq!(options.owner.uid, 1000);
```
"#]

use nix::unistd::{getgid, getuid};
use std::time::SystemTime;

/// Options used when projecting a sequence into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MountOptions {
    /// Owner reported for every node
    pub owner: Owner,
    /// Access, modification and change time of every node.
    ///
    /// Fixed once; reads never update it.
    pub mounted_at: SystemTime,
    /// How delta times are written into per-channel files
    pub delta_mode: DeltaMode,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            owner: Owner::current(),
            mounted_at: SystemTime::now(),
            delta_mode: DeltaMode::default(),
        }
    }
}

impl MountOptions {
    /// Set the owner
    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }
    /// Set the timestamp of every node
    pub fn with_mounted_at(mut self, mounted_at: SystemTime) -> Self {
        self.mounted_at = mounted_at;
        self
    }
    /// Set the delta mode
    pub fn with_delta_mode(mut self, delta_mode: DeltaMode) -> Self {
        self.delta_mode = delta_mode;
        self
    }
}

/// User and group ids reported as the owner of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Owner {
    /// User id
    pub uid: u32,
    /// Group id
    pub gid: u32,
}

impl Owner {
    /// Create an owner from raw ids
    pub const fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }

    /// The real user and group of the running process
    pub fn current() -> Self {
        Self {
            uid: getuid().as_raw(),
            gid: getgid().as_raw(),
        }
    }
}

#[doc = r#"
How the delta time of an event is written once its track has been split
into channels.

A channel file only holds a subset of the track, so a delta time that was
measured from an event now living in another file no longer points at the
same tick.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaMode {
    /// Every event keeps the delta it had in the source track.
    #[default]
    Verbatim,
    /// Deltas are recomputed so every event keeps its absolute tick.
    Absolute,
}
