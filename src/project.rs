#![doc = r#"
Project a [`Sequence`] into a [`FsTree`].

The shape of the tree follows the layout of the sequence:

| Layout | Tree |
| --- | --- |
| [`Layout::SingleMultiChannel`] | `/track/channel{N}.mid` |
| [`Layout::Simultaneous`] | `/tracks/track{i}.mid` |
| [`Layout::SequentiallyIndependent`] | `/tracks/track{i}.mid` and `/tracks/track{i}/channel{N}.mid` |

`/HEADER.txt` is always present. Track indices are 0-based in source
order, channel numbers are written without padding.
"#]

use crate::{
    codec,
    config::MountOptions,
    error::LoadError,
    event::Event,
    fs::{DirNode, FileNode, FsTree},
    sequence::{Layout, Sequence, Track},
    split::split_channels,
};
use midly::Timing;
use tracing::debug;

/// Name of the summary file at the root
pub const HEADER_FILE: &str = "HEADER.txt";
/// Directory holding the channels of a format 0 sequence
pub const SINGLE_TRACK_DIR: &str = "track";
/// Directory holding the tracks of a format 1 or 2 sequence
pub const TRACKS_DIR: &str = "tracks";

/// Build the tree for `sequence`.
///
/// Fails only if a generated file cannot be encoded, in which case no tree
/// is returned at all.
pub fn project(sequence: &Sequence<'_>, options: &MountOptions) -> Result<FsTree, LoadError> {
    let builder = TreeBuilder {
        timing: sequence.timing(),
        options,
    };

    let mut root = DirNode::new(options);
    root.insert_file(
        HEADER_FILE,
        FileNode::new(sequence.header_text().into_bytes(), options),
    );

    match sequence.layout() {
        Layout::SingleMultiChannel(track) => {
            root.insert_dir(SINGLE_TRACK_DIR, builder.single_multichannel(track)?)
        }
        Layout::Simultaneous(tracks) => root.insert_dir(TRACKS_DIR, builder.simultaneous(tracks)?),
        Layout::SequentiallyIndependent(tracks) => {
            root.insert_dir(TRACKS_DIR, builder.sequentially_independent(tracks)?)
        }
    }

    debug!(
        "Projected format {} sequence with {} tracks",
        sequence.format_class(),
        sequence.track_count()
    );
    Ok(FsTree::new(root))
}

/// File name of the channel `channel`
pub fn channel_file_name(channel: u8) -> String {
    format!("channel{channel}.mid")
}

/// File name of the track at `index`
pub fn track_file_name(index: usize) -> String {
    format!("track{index}.mid")
}

/// Directory name holding the channels of the track at `index`
pub fn track_dir_name(index: usize) -> String {
    format!("track{index}")
}

struct TreeBuilder<'o> {
    timing: Timing,
    options: &'o MountOptions,
}

impl TreeBuilder<'_> {
    /// `/track`: one file per channel of the only track
    fn single_multichannel(&self, track: &Track<'_>) -> Result<DirNode, LoadError> {
        self.channels(track)
    }

    /// `/tracks`: one file per track
    fn simultaneous(&self, tracks: &[Track<'_>]) -> Result<DirNode, LoadError> {
        let mut dir = DirNode::new(self.options);
        for (i, track) in tracks.iter().enumerate() {
            let name = track_file_name(i);
            let file = self.encode(&name, track)?;
            dir.insert_file(name, file);
        }
        Ok(dir)
    }

    /// `/tracks`: one file per track, plus a directory of channels per track
    fn sequentially_independent(&self, tracks: &[Track<'_>]) -> Result<DirNode, LoadError> {
        let mut dir = self.simultaneous(tracks)?;
        for (i, track) in tracks.iter().enumerate() {
            dir.insert_dir(track_dir_name(i), self.channels(track)?);
        }
        Ok(dir)
    }

    fn channels(&self, track: &Track<'_>) -> Result<DirNode, LoadError> {
        let mut dir = DirNode::new(self.options);
        for (channel, events) in split_channels(track, self.options.delta_mode) {
            let name = channel_file_name(channel);
            let file = self.encode(&name, &events)?;
            dir.insert_file(name, file);
        }
        Ok(dir)
    }

    fn encode(&self, name: &str, events: &[Event<'_>]) -> Result<FileNode, LoadError> {
        let data = match codec::encode_track(events, self.timing) {
            Ok(data) => data,
            Err(source) => {
                return Err(LoadError::Encode {
                    name: name.to_string(),
                    source,
                });
            }
        };
        debug!(
            "Encoded {name}: {} events, {} bytes",
            events.len(),
            data.len()
        );
        Ok(FileNode::new(data, self.options))
    }
}
