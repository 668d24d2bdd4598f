#![allow(dead_code)]

use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

pub const TICKS_PER_BEAT: u16 = 96;

pub fn timing() -> Timing {
    Timing::Metrical(midly::num::u15::from(TICKS_PER_BEAT))
}

pub fn note_on(delta: u32, channel: u8, key: u8) -> TrackEvent<'static> {
    TrackEvent {
        delta: delta.into(),
        kind: TrackEventKind::Midi {
            channel: channel.into(),
            message: MidiMessage::NoteOn {
                key: key.into(),
                vel: 100.into(),
            },
        },
    }
}

pub fn note_off(delta: u32, channel: u8, key: u8) -> TrackEvent<'static> {
    TrackEvent {
        delta: delta.into(),
        kind: TrackEventKind::Midi {
            channel: channel.into(),
            message: MidiMessage::NoteOff {
                key: key.into(),
                vel: 64.into(),
            },
        },
    }
}

pub fn meta(delta: u32, message: MetaMessage<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: delta.into(),
        kind: TrackEventKind::Meta(message),
    }
}

pub fn tempo() -> TrackEvent<'static> {
    meta(0, MetaMessage::Tempo(500_000.into()))
}

pub fn end_of_track(delta: u32) -> TrackEvent<'static> {
    meta(delta, MetaMessage::EndOfTrack)
}

pub fn prefix(channel: u8) -> TrackEvent<'static> {
    meta(0, MetaMessage::MidiChannel(channel.into()))
}

/// A single track playing on channels 0 and 2
pub fn two_channel_track() -> Vec<TrackEvent<'static>> {
    vec![
        tempo(),
        note_on(0, 0, 60),
        note_on(0, 2, 64),
        note_off(96, 0, 60),
        note_off(0, 2, 64),
        end_of_track(0),
    ]
}

/// A track using a channel prefix to attach its name to channel 9
pub fn drum_track() -> Vec<TrackEvent<'static>> {
    vec![
        prefix(9),
        meta(0, MetaMessage::TrackName(b"drums")),
        note_on(0, 9, 36),
        note_off(48, 9, 36),
        end_of_track(0),
    ]
}

/// Encode a whole container
pub fn container(format: Format, tracks: Vec<Vec<TrackEvent<'static>>>) -> Vec<u8> {
    let smf = Smf {
        header: Header::new(format, timing()),
        tracks,
    };
    let mut bytes = Vec::new();
    smf.write_std(&mut bytes).unwrap();
    bytes
}
