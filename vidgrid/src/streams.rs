use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use frame_codec::decode_jpeg;
use frame_sequence::{FrameSequencer, SequencerConfig, SequencerStats};
use frame_types::{Clock, Result, StreamSignal, VideoFrame, WallClock};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::grid::MAX_TILES;

/// How long a stream may go silent before cleanup removes it.
pub const DEFAULT_INACTIVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Sequenced frames held per stream awaiting display.
pub const MAX_DISPLAY_BUFFER: usize = 5;

/// Identifies one participant's video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(Uuid);

impl StreamId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an id negotiated elsewhere (e.g. at session setup).
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Counters and buffer state for one stream.
#[derive(Clone, Debug)]
pub struct StreamStats {
    pub id: StreamId,
    /// Frames offered to this stream, including undecodable ones
    pub received: u64,
    /// Frames that made it past the decode stage
    pub decoded: u64,
    /// Frames lost to decode failures, sequencing, or buffer overflow
    pub dropped: u64,
    /// Frames waiting in the display buffer
    pub buffered: usize,
    /// Whether the stream has a frame to show this tick
    pub has_current: bool,
    /// Timeline position of the last arrival
    pub last_seen: Duration,
    /// Counters from the stream's sequencer
    pub sequencer: SequencerStats,
}

/// Aggregate counters across all registered streams.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub streams: usize,
    pub received: u64,
    pub decoded: u64,
    pub dropped: u64,
}

struct StreamEntry {
    id: StreamId,
    sequencer: FrameSequencer,
    display_buffer: VecDeque<VideoFrame>,
    current: Option<VideoFrame>,
    last_seen: Duration,
    received: u64,
    decoded: u64,
    dropped: u64,
}

impl StreamEntry {
    fn new(id: StreamId, config: SequencerConfig, now: Duration) -> Self {
        Self {
            id,
            sequencer: FrameSequencer::with_config(config),
            display_buffer: VecDeque::with_capacity(MAX_DISPLAY_BUFFER),
            current: None,
            last_seen: now,
            received: 0,
            decoded: 0,
            dropped: 0,
        }
    }

    fn stats(&self) -> StreamStats {
        StreamStats {
            id: self.id,
            received: self.received,
            decoded: self.decoded,
            dropped: self.dropped,
            buffered: self.display_buffer.len(),
            has_current: self.current.is_some(),
            last_seen: self.last_seen,
            sequencer: self.sequencer.stats().clone(),
        }
    }
}

/// Thread-safe storage for all incoming video streams.
///
/// Frames are ingested per stream, run through that stream's
/// [`FrameSequencer`], and buffered until the render loop promotes them.
/// Streams appear when their first frame arrives and disappear on end of
/// stream or after [`DEFAULT_INACTIVE_TIMEOUT`] of silence; insertion
/// order is kept so participants stay in stable grid slots.
///
/// Stream bookkeeping reads the injected [`Clock`], wall time by default
/// and a manual clock under test.
pub struct StreamRegistry {
    streams: RwLock<Vec<StreamEntry>>,
    /// Streams that signalled end of stream; late frames must not revive them.
    ended: RwLock<HashSet<StreamId>>,
    clock: Arc<dyn Clock>,
    inactive_timeout: Duration,
    sequencer_config: SequencerConfig,
}

impl StreamRegistry {
    /// Create an empty registry on a wall clock.
    pub fn new() -> Self {
        Self {
            streams: RwLock::new(Vec::new()),
            ended: RwLock::new(HashSet::new()),
            clock: Arc::new(WallClock::new()),
            inactive_timeout: DEFAULT_INACTIVE_TIMEOUT,
            sequencer_config: SequencerConfig::default(),
        }
    }

    /// Use the given clock for arrival stamps and inactivity checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use the given inactivity timeout.
    pub fn with_inactive_timeout(mut self, timeout: Duration) -> Self {
        self.inactive_timeout = timeout;
        self
    }

    /// Use the given sequencer configuration for streams registered
    /// from now on.
    pub fn with_sequencer_config(mut self, config: SequencerConfig) -> Self {
        self.sequencer_config = config;
        self
    }

    /// Register a stream ahead of its first frame.
    ///
    /// Returns false if the stream already exists or has ended.
    pub fn register(&self, id: StreamId) -> bool {
        if self.ended.read().contains(&id) {
            return false;
        }

        let mut streams = self.streams.write();
        if streams.iter().any(|entry| entry.id == id) {
            return false;
        }

        log::info!("added video stream {id}");
        streams.push(StreamEntry::new(
            id,
            self.sequencer_config,
            self.clock.position(),
        ));
        true
    }

    /// Ingest one encoded frame from the network.
    ///
    /// The payload is JPEG-decoded and fed to the stream's sequencer;
    /// unknown ids register themselves. Undecodable payloads are dropped
    /// and counted, not errors — a lossy transport delivers garbage from
    /// time to time and the stream must keep going. Returns whether the
    /// frame was accepted for sequencing.
    pub fn ingest_encoded(
        &self,
        id: StreamId,
        seq: u64,
        captured: Duration,
        sent: Duration,
        payload: &[u8],
    ) -> bool {
        if self.ended.read().contains(&id) {
            log::debug!("frame {seq} for ended stream {id} rejected");
            return false;
        }

        // Decode outside the registry lock; it is the expensive part.
        let decoded = decode_jpeg(payload);
        let now = self.clock.position();

        let mut streams = self.streams.write();
        let entry = Self::entry_or_register(&mut streams, id, self.sequencer_config, now);
        entry.received += 1;
        entry.last_seen = now;

        match decoded {
            Ok(frame) => {
                entry.decoded += 1;
                let accepted = entry.sequencer.push(seq, captured, sent, frame, now);
                if !accepted {
                    entry.dropped += 1;
                }
                accepted
            }
            Err(e) => {
                entry.dropped += 1;
                log::warn!("failed to decode frame {seq} for stream {id}: {e}");
                false
            }
        }
    }

    /// Ingest one already-decoded frame (the local preview path).
    ///
    /// Unlike [`ingest_encoded`](Self::ingest_encoded), a malformed frame
    /// here comes from this process and is reported as an error.
    pub fn ingest_frame(
        &self,
        id: StreamId,
        seq: u64,
        captured: Duration,
        sent: Duration,
        frame: VideoFrame,
    ) -> Result<bool> {
        frame.validate()?;

        if self.ended.read().contains(&id) {
            log::debug!("frame {seq} for ended stream {id} rejected");
            return Ok(false);
        }

        let now = self.clock.position();
        let mut streams = self.streams.write();
        let entry = Self::entry_or_register(&mut streams, id, self.sequencer_config, now);
        entry.received += 1;
        entry.decoded += 1;
        entry.last_seen = now;

        let accepted = entry.sequencer.push(seq, captured, sent, frame, now);
        if !accepted {
            entry.dropped += 1;
        }
        Ok(accepted)
    }

    fn entry_or_register(
        streams: &mut Vec<StreamEntry>,
        id: StreamId,
        config: SequencerConfig,
        now: Duration,
    ) -> &mut StreamEntry {
        let pos = match streams.iter().position(|entry| entry.id == id) {
            Some(pos) => pos,
            None => {
                log::info!("added video stream {id}");
                streams.push(StreamEntry::new(id, config, now));
                streams.len() - 1
            }
        };
        &mut streams[pos]
    }

    /// Advance every stream by one display tick.
    ///
    /// Ready frames drain from the sequencers into the bounded display
    /// buffers (oldest dropped past [`MAX_DISPLAY_BUFFER`]), then each
    /// stream promotes its oldest buffered frame to current.
    pub fn advance(&self) {
        let now = self.clock.position();
        let mut streams = self.streams.write();

        for entry in streams.iter_mut() {
            while let Some(timed) = entry.sequencer.next_ready(now) {
                entry.display_buffer.push_back(timed.frame);
                if entry.display_buffer.len() > MAX_DISPLAY_BUFFER {
                    entry.display_buffer.pop_front();
                    entry.dropped += 1;
                }
            }

            if let Some(frame) = entry.display_buffer.pop_front() {
                entry.current = Some(frame);
            }
        }
    }

    /// Remove streams that have gone silent for longer than the
    /// inactivity timeout. Returns the ids removed.
    ///
    /// Inactive removal is not final: a stream that resumes sending
    /// re-registers on its next frame.
    pub fn cleanup_inactive(&self) -> Vec<StreamId> {
        let now = self.clock.position();
        let timeout = self.inactive_timeout;

        let mut removed = Vec::new();
        self.streams.write().retain(|entry| {
            if now.saturating_sub(entry.last_seen) > timeout {
                log::info!("removing inactive video stream {}", entry.id);
                removed.push(entry.id);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Deliver a control signal to one stream.
    ///
    /// Flush clears the stream's buffers and resets its sequencer for a
    /// restart. End of stream removes the stream and bars its id from
    /// re-registering. Returns whether the stream existed.
    pub fn signal(&self, id: StreamId, signal: StreamSignal) -> bool {
        match signal {
            StreamSignal::Flush => {
                let mut streams = self.streams.write();
                let Some(entry) = streams.iter_mut().find(|entry| entry.id == id) else {
                    return false;
                };
                entry.sequencer.handle_signal(StreamSignal::Flush);
                entry.display_buffer.clear();
                entry.current = None;
                log::info!("flushed video stream {id}");
                true
            }
            StreamSignal::Eos => {
                let mut streams = self.streams.write();
                let before = streams.len();
                streams.retain(|entry| entry.id != id);
                let existed = streams.len() < before;
                if existed {
                    self.ended.write().insert(id);
                    log::info!("video stream {id} ended");
                }
                existed
            }
        }
    }

    /// Remove a stream immediately (participant disconnected).
    ///
    /// Unlike an end-of-stream signal the id may register again later.
    pub fn remove(&self, id: StreamId) -> bool {
        let mut streams = self.streams.write();
        let before = streams.len();
        streams.retain(|entry| entry.id != id);
        let existed = streams.len() < before;
        if existed {
            log::info!("removed video stream {id}");
        }
        existed
    }

    /// Current frames in registration order, one per stream that has
    /// anything to show, capped at [`MAX_TILES`].
    pub fn current_frames(&self) -> Vec<VideoFrame> {
        self.streams
            .read()
            .iter()
            .filter_map(|entry| entry.current.clone())
            .take(MAX_TILES)
            .collect()
    }

    /// The current frame for one stream, if it has one.
    pub fn current_frame(&self, id: StreamId) -> Option<VideoFrame> {
        self.streams
            .read()
            .iter()
            .find(|entry| entry.id == id)
            .and_then(|entry| entry.current.clone())
    }

    /// Ids of all registered streams, in registration order.
    pub fn active_ids(&self) -> Vec<StreamId> {
        self.streams.read().iter().map(|entry| entry.id).collect()
    }

    /// Number of registered streams.
    pub fn len(&self) -> usize {
        self.streams.read().len()
    }

    /// True if no streams are registered.
    pub fn is_empty(&self) -> bool {
        self.streams.read().is_empty()
    }

    /// True if the given stream is registered.
    pub fn contains(&self, id: StreamId) -> bool {
        self.streams.read().iter().any(|entry| entry.id == id)
    }

    /// Counters and buffer state for one stream.
    pub fn stream_stats(&self, id: StreamId) -> Option<StreamStats> {
        self.streams
            .read()
            .iter()
            .find(|entry| entry.id == id)
            .map(StreamEntry::stats)
    }

    /// Aggregate counters across all streams.
    pub fn stats(&self) -> RegistryStats {
        let streams = self.streams.read();
        let mut stats = RegistryStats {
            streams: streams.len(),
            ..RegistryStats::default()
        };
        for entry in streams.iter() {
            stats.received += entry.received;
            stats.decoded += entry.decoded;
            stats.dropped += entry.dropped;
        }
        stats
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_codec::JpegCodec;
    use frame_types::ManualClock;

    use crate::pattern::gradient_frame;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Registry on a manual clock with no jitter hold, so single frames
    /// flow straight through the sequencers.
    fn test_registry() -> (StreamRegistry, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let registry = StreamRegistry::new()
            .with_clock(clock.clone())
            .with_sequencer_config(SequencerConfig::new().with_jitter_buffer(1));
        (registry, clock)
    }

    fn small_frame() -> VideoFrame {
        gradient_frame(8, 8)
    }

    #[test]
    fn test_register_and_contains() {
        let (registry, _clock) = test_registry();
        let id = StreamId::new();

        assert!(registry.is_empty());
        assert!(registry.register(id));
        assert!(!registry.register(id)); // Already present
        assert!(registry.contains(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ingest_auto_registers() {
        let (registry, _clock) = test_registry();
        let id = StreamId::new();

        let accepted = registry
            .ingest_frame(id, 0, ms(0), ms(0), small_frame())
            .unwrap();

        assert!(accepted);
        assert!(registry.contains(id));
    }

    #[test]
    fn test_ingest_encoded_decodes_payload() {
        let (registry, _clock) = test_registry();
        let id = StreamId::new();

        let payload = JpegCodec::new(80).encode(&gradient_frame(32, 24)).unwrap();
        assert!(registry.ingest_encoded(id, 0, ms(0), ms(0), &payload));

        registry.advance();
        let current = registry.current_frame(id).unwrap();
        assert_eq!((current.width, current.height), (32, 24));

        let stats = registry.stream_stats(id).unwrap();
        assert_eq!(stats.received, 1);
        assert_eq!(stats.decoded, 1);
        assert_eq!(stats.dropped, 0);
    }

    #[test]
    fn test_undecodable_payload_is_counted_not_fatal() {
        let (registry, _clock) = test_registry();
        let id = StreamId::new();

        assert!(!registry.ingest_encoded(id, 0, ms(0), ms(0), &[0xba, 0xad]));

        // The stream registered anyway; the garbage was counted.
        let stats = registry.stream_stats(id).unwrap();
        assert_eq!(stats.received, 1);
        assert_eq!(stats.decoded, 0);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_ingest_frame_rejects_malformed_local_frames() {
        let (registry, _clock) = test_registry();
        let id = StreamId::new();

        let bad = VideoFrame::new(vec![0u8; 2], 8, 8, frame_types::PixelFormat::Rgb24);
        assert!(registry.ingest_frame(id, 0, ms(0), ms(0), bad).is_err());
        assert!(!registry.contains(id));
    }

    #[test]
    fn test_advance_promotes_in_capture_order() {
        let (registry, _clock) = test_registry();
        let id = StreamId::new();

        // Arrive out of order; capture order is 0, 1.
        registry
            .ingest_frame(id, 1, ms(33), ms(33), gradient_frame(4, 4))
            .unwrap();
        registry
            .ingest_frame(id, 0, ms(0), ms(0), gradient_frame(2, 2))
            .unwrap();

        registry.advance();
        assert_eq!(registry.current_frame(id).unwrap().width, 2);

        registry.advance();
        assert_eq!(registry.current_frame(id).unwrap().width, 4);

        // Nothing left; the last frame stays current.
        registry.advance();
        assert_eq!(registry.current_frame(id).unwrap().width, 4);
    }

    #[test]
    fn test_display_buffer_is_bounded() {
        let (registry, clock) = test_registry();
        let id = StreamId::new();

        for seq in 0..8u64 {
            clock.advance(ms(33));
            registry
                .ingest_frame(id, seq, ms(seq * 33), ms(seq * 33), small_frame())
                .unwrap();
        }

        // All eight drain at once; the buffer keeps the newest five,
        // one of which is promoted immediately.
        registry.advance();
        let stats = registry.stream_stats(id).unwrap();
        assert_eq!(stats.buffered, MAX_DISPLAY_BUFFER - 1);
        assert_eq!(stats.dropped, 3);
        assert!(stats.has_current);
    }

    #[test]
    fn test_cleanup_removes_silent_streams() {
        let (registry, clock) = test_registry();
        let quiet = StreamId::new();
        let active = StreamId::new();

        registry
            .ingest_frame(quiet, 0, ms(0), ms(0), small_frame())
            .unwrap();

        // Eleven seconds later only the second stream has spoken.
        clock.advance(Duration::from_secs(11));
        registry
            .ingest_frame(active, 0, ms(0), ms(0), small_frame())
            .unwrap();

        let removed = registry.cleanup_inactive();
        assert_eq!(removed, vec![quiet]);
        assert!(!registry.contains(quiet));
        assert!(registry.contains(active));
    }

    #[test]
    fn test_inactive_stream_may_return() {
        let (registry, clock) = test_registry();
        let id = StreamId::new();

        registry
            .ingest_frame(id, 0, ms(0), ms(0), small_frame())
            .unwrap();
        clock.advance(Duration::from_secs(11));
        registry.cleanup_inactive();
        assert!(!registry.contains(id));

        // New frames re-register the stream.
        registry
            .ingest_frame(id, 1, ms(33), ms(33), small_frame())
            .unwrap();
        assert!(registry.contains(id));
    }

    #[test]
    fn test_eos_removes_and_bars_the_stream() {
        let (registry, _clock) = test_registry();
        let id = StreamId::new();

        registry
            .ingest_frame(id, 0, ms(0), ms(0), small_frame())
            .unwrap();
        assert!(registry.signal(id, StreamSignal::Eos));
        assert!(!registry.contains(id));

        // Late frames neither error nor revive the stream.
        let accepted = registry
            .ingest_frame(id, 1, ms(33), ms(33), small_frame())
            .unwrap();
        assert!(!accepted);
        assert!(!registry.contains(id));
        assert!(!registry.register(id));
    }

    #[test]
    fn test_flush_clears_stream_state() {
        let (registry, _clock) = test_registry();
        let id = StreamId::new();

        registry
            .ingest_frame(id, 0, ms(0), ms(0), small_frame())
            .unwrap();
        registry.advance();
        assert!(registry.current_frame(id).is_some());

        assert!(registry.signal(id, StreamSignal::Flush));
        assert!(registry.current_frame(id).is_none());
        assert!(registry.contains(id));

        // The stream starts over from a fresh sequencer.
        let stats = registry.stream_stats(id).unwrap();
        assert_eq!(stats.sequencer, SequencerStats::default());
    }

    #[test]
    fn test_signals_to_unknown_streams_are_noops() {
        let (registry, _clock) = test_registry();
        let id = StreamId::new();

        assert!(!registry.signal(id, StreamSignal::Flush));
        assert!(!registry.signal(id, StreamSignal::Eos));
        assert!(!registry.remove(id));
    }

    #[test]
    fn test_current_frames_keep_registration_order() {
        let (registry, _clock) = test_registry();
        let ids: Vec<_> = (0..3).map(|_| StreamId::new()).collect();

        // Register in one order, ingest in another.
        for &id in &ids {
            registry.register(id);
        }
        for (i, &id) in ids.iter().enumerate().rev() {
            let size = 2 * (i as u32 + 1);
            registry
                .ingest_frame(id, 0, ms(0), ms(0), gradient_frame(size, size))
                .unwrap();
        }
        registry.advance();

        let frames = registry.current_frames();
        let widths: Vec<_> = frames.iter().map(|f| f.width).collect();
        assert_eq!(widths, vec![2, 4, 6]);
        assert_eq!(registry.active_ids(), ids);
    }

    #[test]
    fn test_current_frames_capped_at_max_tiles() {
        let (registry, _clock) = test_registry();

        for seq in 0..(MAX_TILES + 3) {
            let id = StreamId::new();
            registry
                .ingest_frame(id, 0, ms(seq as u64), ms(seq as u64), small_frame())
                .unwrap();
        }
        registry.advance();

        assert_eq!(registry.len(), MAX_TILES + 3);
        assert_eq!(registry.current_frames().len(), MAX_TILES);
    }

    #[test]
    fn test_aggregate_stats() {
        let (registry, _clock) = test_registry();
        let a = StreamId::new();
        let b = StreamId::new();

        registry
            .ingest_frame(a, 0, ms(0), ms(0), small_frame())
            .unwrap();
        registry
            .ingest_frame(b, 0, ms(0), ms(0), small_frame())
            .unwrap();
        assert!(!registry.ingest_encoded(b, 1, ms(33), ms(33), &[0x00]));

        let stats = registry.stats();
        assert_eq!(stats.streams, 2);
        assert_eq!(stats.received, 3);
        assert_eq!(stats.decoded, 2);
        assert_eq!(stats.dropped, 1);
    }
}
