use crate::event::Event;

/// An ordered list of events, as decoded from one track chunk
pub type Track<'a> = Vec<Event<'a>>;

#[doc = r#"
How the tracks of a sequence are organised, with the tracks themselves.

```text
Format 0  single multi-channel track
Format 1  one or more simultaneous tracks of a sequence
Format 2  one or more sequentially independent single-track patterns
```

The projection of each variant into the tree differs, see
[`project`](crate::project::project).
"#]
#[derive(Debug, Clone, PartialEq)]
pub enum Layout<'a> {
    /// Format 0
    SingleMultiChannel(Track<'a>),
    /// Format 1
    Simultaneous(Vec<Track<'a>>),
    /// Format 2
    SequentiallyIndependent(Vec<Track<'a>>),
}

impl<'a> Layout<'a> {
    /// Returns the format type of the layout.
    pub const fn format_type(&self) -> FormatType {
        match self {
            Self::SingleMultiChannel(_) => FormatType::SingleMultiChannel,
            Self::Simultaneous(_) => FormatType::Simultaneous,
            Self::SequentiallyIndependent(_) => FormatType::SequentiallyIndependent,
        }
    }

    /// Returns the number of tracks.
    ///
    /// [`Layout::SingleMultiChannel`] will always return 1.
    pub fn num_tracks(&self) -> usize {
        match self {
            Self::SingleMultiChannel(_) => 1,
            Self::Simultaneous(t) | Self::SequentiallyIndependent(t) => t.len(),
        }
    }

    /// Returns the tracks in source order
    pub fn tracks(&self) -> &[Track<'a>] {
        match self {
            Self::SingleMultiChannel(t) => core::slice::from_ref(t),
            Self::Simultaneous(t) | Self::SequentiallyIndependent(t) => t,
        }
    }
}

/// The format class of a sequence, without its tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel,
    /// Format 1
    Simultaneous,
    /// Format 2
    SequentiallyIndependent,
}

impl FormatType {
    /// The number written in the container header
    pub const fn class(&self) -> u16 {
        match self {
            Self::SingleMultiChannel => 0,
            Self::Simultaneous => 1,
            Self::SequentiallyIndependent => 2,
        }
    }
}

impl From<midly::Format> for FormatType {
    fn from(value: midly::Format) -> Self {
        match value {
            midly::Format::SingleTrack => Self::SingleMultiChannel,
            midly::Format::Parallel => Self::Simultaneous,
            midly::Format::Sequential => Self::SequentiallyIndependent,
        }
    }
}
