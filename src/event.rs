#![doc = r#"
The event vocabulary shared by the splitter, the builder and the codec.

Events are [`midly::TrackEvent`]s borrowed from the source buffer. The
only question the rest of the crate asks of an event is which channel it
belongs to, answered by [`EventScope`].

# Hierarchy
```text
                  |-------|
                  | Event |
                  |-------|
                /     |     \
|---------|  |---------------|  |---------|
| Channel |  | ChannelPrefix |  | Context |
|---------|  |---------------|  |---------|
```
"#]

use midly::{MetaMessage, TrackEvent, TrackEventKind};

/// One timed occurrence in a track
pub type Event<'a> = TrackEvent<'a>;

/// The channel relationship of an [`Event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    /// A channel message addressed to this channel
    Channel(u8),
    /// The channel-prefix meta event, declaring this channel for the events that follow
    ChannelPrefix(u8),
    /// Any other meta event, or a system exclusive / escape packet.
    ///
    /// These carry no channel and belong to whichever channel is current.
    Context,
}

impl EventScope {
    /// Classify an event
    pub fn of(event: &Event<'_>) -> Self {
        match event.kind {
            TrackEventKind::Midi { channel, .. } => Self::Channel(channel.as_int()),
            TrackEventKind::Meta(MetaMessage::MidiChannel(channel)) => {
                Self::ChannelPrefix(channel.as_int())
            }
            TrackEventKind::Meta(_) | TrackEventKind::SysEx(_) | TrackEventKind::Escape(_) => {
                Self::Context
            }
        }
    }

    /// True for anything that is not a channel message
    pub const fn is_meta(&self) -> bool {
        !matches!(self, Self::Channel(_))
    }
}

/// True if the event is the end-of-track marker
pub fn is_end_of_track(event: &Event<'_>) -> bool {
    matches!(event.kind, TrackEventKind::Meta(MetaMessage::EndOfTrack))
}
