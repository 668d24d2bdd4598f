#![doc = r#"
Browse a Standard MIDI File as a read-only filesystem.

A parsed sequence is projected into a tree of directories and files:

```text
/HEADER.txt                      format and track count
/track/channel{N}.mid            format 0: one file per channel
/tracks/track{i}.mid             format 1 and 2: one file per track
/tracks/track{i}/channel{N}.mid  format 2: one file per channel per track
```

Every `.mid` file is a freshly encoded single-track container holding a
subset of the source events, using the source's timing base.

The tree is served through [`ReadOnlyFilesystem`], a path-addressed
protocol that a host binding (FUSE or otherwise) can forward to.

```no_run
use midifs::prelude::*;

let bytes = read_source("song.mid")?;
let sequence = Sequence::parse(&bytes)?;
let fs = MidiFs::mount(&sequence, &MountOptions::default())?;

for name in fs.readdir("/")? {
    println!("{name}");
}
# Ok::<(), Box<dyn std::error::Error>>(())
```
"#]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod ops;
pub mod project;
pub mod sequence;
pub mod split;

pub use config::*;
pub use error::*;
pub use ops::*;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        config::*,
        error::*,
        event::*,
        fs::{DirNode, FileKind, FileNode, FsTree, Metadata, Node},
        ops::*,
        project::project,
        sequence::*,
        split::{ChannelBuckets, split_channels},
    };
}
