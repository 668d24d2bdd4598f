#![doc = r#"
A decoded MIDI container: its format class, timing base and tracks.
"#]

mod format;
pub use format::*;

use crate::error::LoadError;
use midly::{Smf, Timing};
use std::path::Path;
use tracing::debug;

/// Read the raw bytes of a MIDI container from disk.
///
/// The returned buffer must outlive any [`Sequence`] parsed from it.
pub fn read_source(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

#[doc = r#"
A parsed sequence, borrowing its events from the source bytes.

Immutable once parsed.
"#]
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence<'a> {
    timing: Timing,
    layout: Layout<'a>,
}

impl<'a> Sequence<'a> {
    /// Parse a set of bytes into a sequence
    pub fn parse(bytes: &'a [u8]) -> Result<Self, LoadError> {
        let smf = Smf::parse(bytes)?;
        Self::from_smf(smf)
    }

    /// Sort the tracks of a decoded container into a [`Layout`].
    pub fn from_smf(smf: Smf<'a>) -> Result<Self, LoadError> {
        let Smf { header, tracks } = smf;

        debug!(
            "Parsing MIDI file: format {:?}, {} tracks, timing {:?}",
            header.format,
            tracks.len(),
            header.timing
        );

        let layout = match FormatType::from(header.format) {
            FormatType::SingleMultiChannel => {
                let count = tracks.len();
                let Ok([track]) = <[_; 1]>::try_from(tracks) else {
                    return Err(LoadError::SingleTrackCount(count));
                };
                Layout::SingleMultiChannel(track)
            }
            FormatType::Simultaneous => Layout::Simultaneous(tracks),
            FormatType::SequentiallyIndependent => Layout::SequentiallyIndependent(tracks),
        };

        Ok(Self {
            timing: header.timing,
            layout,
        })
    }

    /// Create a sequence from parts
    pub fn new(timing: Timing, layout: Layout<'a>) -> Self {
        Self { timing, layout }
    }

    /// Returns the timing base shared by every track
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Returns the track layout
    pub fn layout(&self) -> &Layout<'a> {
        &self.layout
    }

    /// Returns the format type for the sequence.
    pub fn format_type(&self) -> FormatType {
        self.layout.format_type()
    }

    /// Returns the format class number (0, 1 or 2)
    pub fn format_class(&self) -> u16 {
        self.format_type().class()
    }

    /// Returns the number of tracks
    pub fn track_count(&self) -> usize {
        self.layout.num_tracks()
    }

    /// Returns a track list
    pub fn tracks(&self) -> &[Track<'a>] {
        self.layout.tracks()
    }

    /// The text served as `HEADER.txt`
    pub fn header_text(&self) -> String {
        format!(
            "format: {}\nntrks: {}",
            self.format_class(),
            self.track_count()
        )
    }
}
