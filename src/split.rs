#![doc = r#"
Partition a track into per-channel event lists.

Walking the track, a *current channel* starts at 0. A channel message
moves it to its own channel, a channel-prefix meta event moves it to the
declared channel. Every event, channel message or not, is appended to the
list of the current channel after that update.

Meta events seen before any channel message or prefix therefore land on
channel 0. No event is ever copied into two lists, so merging the lists
back in assignment order gives the source track.
"#]

use crate::{
    config::DeltaMode,
    event::{Event, EventScope},
};
use std::collections::BTreeMap;

const MAX_DELTA: u32 = 0x0FFF_FFFF;

/// Per-channel event lists of one track, in ascending channel order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelBuckets<'a> {
    buckets: BTreeMap<u8, Vec<Event<'a>>>,
    assignments: Vec<u8>,
}

impl<'a> ChannelBuckets<'a> {
    /// Iterate over `(channel, events)` in ascending channel order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[Event<'a>])> {
        self.buckets
            .iter()
            .map(|(ch, events)| (*ch, events.as_slice()))
    }

    /// Returns the events assigned to `channel`
    pub fn get(&self, channel: u8) -> Option<&[Event<'a>]> {
        self.buckets.get(&channel).map(Vec::as_slice)
    }

    /// Returns the channels that received at least one event
    pub fn channels(&self) -> impl Iterator<Item = u8> + '_ {
        self.buckets.keys().copied()
    }

    /// The channel each source event was assigned to, in source order
    pub fn assignments(&self) -> &[u8] {
        &self.assignments
    }

    /// Returns the number of non-empty channels
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True if the source track held no events
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Interleave the buckets back into the order the events were assigned in.
    ///
    /// With [`DeltaMode::Verbatim`] this is exactly the source track.
    pub fn merge(&self) -> Vec<Event<'a>> {
        let mut cursors: BTreeMap<u8, usize> = BTreeMap::new();
        let mut merged = Vec::with_capacity(self.assignments.len());
        for ch in &self.assignments {
            let cursor = cursors.entry(*ch).or_default();
            if let Some(event) = self.buckets.get(ch).and_then(|b| b.get(*cursor)) {
                merged.push(*event);
            }
            *cursor += 1;
        }
        merged
    }
}

impl<'a> IntoIterator for ChannelBuckets<'a> {
    type Item = (u8, Vec<Event<'a>>);
    type IntoIter = std::collections::btree_map::IntoIter<u8, Vec<Event<'a>>>;
    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

/// Split an ordered list of events by channel.
///
/// With [`DeltaMode::Absolute`], each event's delta is rewritten to the
/// distance from the previous event of the same bucket, so that every
/// event keeps the absolute tick it had in `events`.
pub fn split_channels<'a>(events: &[Event<'a>], delta_mode: DeltaMode) -> ChannelBuckets<'a> {
    let mut split = ChannelBuckets {
        buckets: BTreeMap::new(),
        assignments: Vec::with_capacity(events.len()),
    };
    // last absolute tick written to each bucket
    let mut last_tick: BTreeMap<u8, u64> = BTreeMap::new();
    let mut tick = 0u64;
    let mut current = 0u8;

    for event in events {
        tick += u64::from(event.delta.as_int());
        match EventScope::of(event) {
            EventScope::Channel(ch) | EventScope::ChannelPrefix(ch) => current = ch,
            EventScope::Context => {}
        }

        let mut event = *event;
        if delta_mode == DeltaMode::Absolute {
            let prev = last_tick.insert(current, tick).unwrap_or(0);
            // saturate at the largest delta a track chunk can hold
            let delta = u32::try_from(tick - prev).unwrap_or(u32::MAX);
            event.delta = delta.min(MAX_DELTA).into();
        }

        split.buckets.entry(current).or_default().push(event);
        split.assignments.push(current);
    }

    split
}
