mod common;

use common::*;
use midifs::{codec, prelude::*};
use midly::{Format, MetaMessage, Smf};
use pretty_assertions::assert_eq;

fn mixed_track() -> Vec<Event<'static>> {
    vec![
        tempo(),
        meta(0, MetaMessage::TimeSignature(4, 2, 24, 8)),
        note_on(0, 1, 60),
        meta(0, MetaMessage::Marker(b"verse")),
        prefix(4),
        meta(0, MetaMessage::InstrumentName(b"strings")),
        note_on(10, 3, 67),
        note_off(20, 1, 60),
        note_off(0, 3, 67),
        end_of_track(5),
    ]
}

#[test]
fn merging_buckets_restores_the_track() {
    let track = mixed_track();
    let split = split_channels(&track, DeltaMode::Verbatim);

    assert_eq!(split.merge(), track);
    let total: usize = split.iter().map(|(_, events)| events.len()).sum();
    assert_eq!(total, track.len());
}

#[test]
fn every_event_follows_the_active_channel() {
    let track = mixed_track();
    let split = split_channels(&track, DeltaMode::Verbatim);

    assert_eq!(split.channels().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
    assert_eq!(split.assignments(), &[0, 0, 1, 1, 4, 4, 3, 1, 3, 3]);

    for (channel, events) in split.iter() {
        for event in events {
            match EventScope::of(event) {
                EventScope::Channel(ch) | EventScope::ChannelPrefix(ch) => {
                    assert_eq!(ch, channel)
                }
                EventScope::Context => {}
            }
        }
    }
}

#[test]
fn header_meta_stays_on_channel_zero() {
    let track = mixed_track();
    let split = split_channels(&track, DeltaMode::Verbatim);

    assert_eq!(split.get(0).unwrap(), &track[..2]);
    assert_eq!(split.get(4).unwrap(), &track[4..6]);

    let channel_zero = split.get(0).unwrap();
    assert!(channel_zero.iter().all(|e| EventScope::of(e).is_meta()));
}

#[test]
fn sysex_follows_the_active_channel() {
    let track = vec![
        note_on(0, 7, 50),
        Event {
            delta: 0.into(),
            kind: midly::TrackEventKind::SysEx(&[0x7E, 0x7F, 0x09, 0x01, 0xF7]),
        },
    ];
    let split = split_channels(&track, DeltaMode::Verbatim);
    assert_eq!(split.get(7).unwrap(), &track[..]);
}

#[test]
fn encoded_bucket_decodes_to_the_same_events() {
    let track = mixed_track();
    let split = split_channels(&track, DeltaMode::Verbatim);

    for (_, events) in split.iter() {
        let bytes = codec::encode_track(events, timing()).unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.header.format, Format::SingleTrack);
        assert_eq!(smf.header.timing, timing());
        assert_eq!(smf.tracks.len(), 1);

        let decoded: Vec<_> = smf.tracks[0]
            .iter()
            .filter(|e| !midifs::event::is_end_of_track(e))
            .map(|e| e.kind)
            .collect();
        let expected: Vec<_> = events
            .iter()
            .filter(|e| !midifs::event::is_end_of_track(e))
            .map(|e| e.kind)
            .collect();
        assert_eq!(decoded, expected);
    }
}

#[test]
fn absolute_deltas_preserve_tick_positions() {
    let track = mixed_track();
    let split = split_channels(&track, DeltaMode::Absolute);

    let ticks = |events: &[Event<'_>]| -> Vec<u32> {
        events
            .iter()
            .scan(0, |tick, e| {
                *tick += e.delta.as_int();
                Some(*tick)
            })
            .collect()
    };

    // channel 3: note on at tick 10, note off at tick 30, end of track at 35
    assert_eq!(ticks(split.get(3).unwrap()), vec![10, 30, 35]);
    // channel 1: note on at 0, note off at 30
    assert_eq!(ticks(split.get(1).unwrap()), vec![0, 0, 30]);
    assert_eq!(
        split.assignments(),
        split_channels(&track, DeltaMode::Verbatim).assignments()
    );
}
