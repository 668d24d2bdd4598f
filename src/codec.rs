#![doc = r#"
Encode an event list as a standalone single-track MIDI file.

The container written here is always format 0 with exactly one track,
using the timing base of the source sequence.

# End of track

A track chunk must close with exactly one end-of-track event. When a
track is split by channel the source's end-of-track lands in a single
bucket, so [`encode_track`] rewrites the list before writing it: every
end-of-track is dropped, its delta carried onto the next event, and one
end-of-track holding whatever delta is left over is appended.
"#]

use crate::event::{Event, is_end_of_track};
use midly::{Format, Header, MetaMessage, Smf, Timing, TrackEventKind};

const MAX_DELTA: u32 = 0x0FFF_FFFF;

/// Encode `events` as a single-track container using `timing`.
pub fn encode_track(events: &[Event<'_>], timing: Timing) -> std::io::Result<Vec<u8>> {
    let smf = Smf {
        header: Header::new(Format::SingleTrack, timing),
        tracks: vec![terminated(events)],
    };
    let mut bytes = Vec::new();
    smf.write_std(&mut bytes)?;
    Ok(bytes)
}

/// Returns a copy of `events` ending in exactly one end-of-track.
pub fn terminated<'a>(events: &[Event<'a>]) -> Vec<Event<'a>> {
    let mut track = Vec::with_capacity(events.len() + 1);
    let mut carried = 0u32;
    for event in events {
        if is_end_of_track(event) {
            carried = carried.saturating_add(event.delta.as_int());
            continue;
        }
        let mut event = *event;
        if carried > 0 {
            event.delta = carried
                .saturating_add(event.delta.as_int())
                .min(MAX_DELTA)
                .into();
            carried = 0;
        }
        track.push(event);
    }
    track.push(Event {
        delta: carried.min(MAX_DELTA).into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    track
}

#[cfg(test)]
mod tests {
    use super::*;
    use midly::{MidiMessage, num::u15};

    fn program(delta: u32) -> Event<'static> {
        Event {
            delta: delta.into(),
            kind: TrackEventKind::Midi {
                channel: 2.into(),
                message: MidiMessage::ProgramChange { program: 7.into() },
            },
        }
    }

    fn end(delta: u32) -> Event<'static> {
        Event {
            delta: delta.into(),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        }
    }

    #[test]
    fn appends_missing_end_of_track() {
        let track = terminated(&[program(0)]);
        assert_eq!(track, vec![program(0), end(0)]);
    }

    #[test]
    fn moves_inner_end_of_track_to_the_end() {
        let track = terminated(&[end(4), program(3), end(2)]);
        assert_eq!(track, vec![program(7), end(2)]);
    }

    #[test]
    fn encoded_file_decodes_as_single_track() {
        let timing = Timing::Metrical(u15::from(96));
        let bytes = encode_track(&[program(0)], timing).unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        assert_eq!(smf.header.format, Format::SingleTrack);
        assert_eq!(smf.header.timing, timing);
        assert_eq!(smf.tracks, vec![vec![program(0), end(0)]]);
    }
}
