/*!
    Chronological frame sequencer.
*/

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use std::time::Duration;

use frame_types::{StreamSignal, VideoFrame};

use crate::{SequencerConfig, TimedFrame};

/// Inter-arrival interval jitter is measured against, in seconds.
const EXPECTED_FRAME_INTERVAL: f64 = 1.0 / 30.0;

/// Jitter samples kept for the running average.
const JITTER_WINDOW: usize = 50;

/**
    Counters describing sequencer behavior since construction or the
    last reset.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SequencerStats {
    /// Frames offered via `push`, including ones that were dropped.
    pub received: u64,
    /// Frames handed out by `next_ready`.
    pub displayed: u64,
    /// Frames dropped for exceeding the maximum age.
    pub dropped_old: u64,
    /// Frames dropped because their sequence number was already buffered.
    pub dropped_duplicate: u64,
    /// Frames displayed out of sequence order (late arrivals with newer content).
    pub reordered: u64,
    /// Total count of sequence numbers skipped over after reorder timeouts.
    pub sequence_gaps: u64,
    /// Mean deviation of inter-arrival times from the expected interval, in seconds.
    pub average_jitter: f64,
}

/**
    Point-in-time snapshot of sequencer state.
*/
#[derive(Clone, Debug)]
pub struct SequencerStatus {
    /// Frames currently buffered.
    pub buffered: usize,
    /// Entries in the ordering heap (may exceed `buffered` after evictions).
    pub heap_len: usize,
    /// Sequence number of the last frame handed out.
    pub last_displayed: Option<u64>,
    /// Measured receiver-minus-sender clock offset in seconds (0.0 before the first frame).
    pub clock_offset: f64,
    /// True once end of stream was signalled.
    pub ended: bool,
    /// Counters at the time of the snapshot.
    pub stats: SequencerStats,
}

/**
    Reorders one participant's frames into chronological display order.

    Frames arrive tagged with a sequence number and sender-side capture
    and send timestamps. The sequencer buffers a few frames to absorb
    network jitter, releases them ordered by capture time, waits a bounded
    time for missing sequence numbers, and drops frames that arrive too
    late to matter.

    Time is passed in explicitly as positions on the receiver's timeline
    (see [`frame_types::Clock`]); the sequencer never reads a clock
    itself, which keeps its behavior deterministic under test.

    ```ignore
    let mut sequencer = FrameSequencer::new();

    // Network thread, per received frame:
    sequencer.push(seq, captured, sent, frame, clock.position());

    // Render tick:
    if let Some(timed) = sequencer.next_ready(clock.position()) {
        display(timed.frame);
    }
    ```
*/
pub struct FrameSequencer {
    config: SequencerConfig,
    /// Min-heap of (capture timestamp, sequence number).
    heap: BinaryHeap<Reverse<(Duration, u64)>>,
    buffered: HashMap<u64, TimedFrame>,
    /// Sequence number and capture timestamp of the last displayed frame.
    last_displayed: Option<(u64, Duration)>,
    /// Receiver-minus-sender clock offset in seconds, measured at the first frame.
    clock_offset: Option<f64>,
    last_arrival: Option<Duration>,
    jitter_samples: VecDeque<f64>,
    ended: bool,
    stats: SequencerStats,
}

impl FrameSequencer {
    /**
        Create a sequencer with default configuration.
    */
    pub fn new() -> Self {
        Self::with_config(SequencerConfig::default())
    }

    /**
        Create a sequencer with the given configuration.
    */
    pub fn with_config(config: SequencerConfig) -> Self {
        Self {
            config,
            heap: BinaryHeap::new(),
            buffered: HashMap::new(),
            last_displayed: None,
            clock_offset: None,
            last_arrival: None,
            jitter_samples: VecDeque::with_capacity(JITTER_WINDOW),
            ended: false,
            stats: SequencerStats::default(),
        }
    }

    /**
        Offer a frame to the sequencer.

        `captured` and `sent` are the sender's timestamps; `now` is the
        receiver's current timeline position and becomes the frame's
        arrival timestamp. Returns true if the frame was buffered, false
        if it was dropped (duplicate, too old, or after end of stream).
    */
    pub fn push(
        &mut self,
        seq: u64,
        captured: Duration,
        sent: Duration,
        frame: VideoFrame,
        now: Duration,
    ) -> bool {
        if self.ended {
            log::debug!("frame {seq} rejected after end of stream");
            return false;
        }

        self.stats.received += 1;

        if let Some(last) = self.last_arrival {
            let inter_arrival = now.saturating_sub(last).as_secs_f64();
            let jitter = (inter_arrival - EXPECTED_FRAME_INTERVAL).abs();
            if self.jitter_samples.len() == JITTER_WINDOW {
                self.jitter_samples.pop_front();
            }
            self.jitter_samples.push_back(jitter);
            self.stats.average_jitter =
                self.jitter_samples.iter().sum::<f64>() / self.jitter_samples.len() as f64;
        }
        self.last_arrival = Some(now);

        // The first frame calibrates the sender-to-receiver offset; all
        // later age checks are relative to it.
        let offset = *self.clock_offset.get_or_insert_with(|| {
            let offset = now.as_secs_f64() - sent.as_secs_f64();
            log::info!("sequencer initialized, clock offset: {offset:.3}s");
            offset
        });

        if self.buffered.contains_key(&seq) {
            self.stats.dropped_duplicate += 1;
            log::debug!("dropped duplicate frame {seq}");
            return false;
        }

        let age = now.as_secs_f64() - (sent.as_secs_f64() + offset);
        if age > self.config.max_frame_age.as_secs_f64() {
            self.stats.dropped_old += 1;
            log::debug!("dropped old frame {seq} (age: {age:.3}s)");
            return false;
        }

        self.heap.push(Reverse((captured, seq)));
        self.buffered
            .insert(seq, TimedFrame::new(seq, captured, sent, now, frame));
        self.evict(now);

        true
    }

    /**
        Take the next frame that is ready for display, if any.

        Frames come out ordered by capture timestamp, gated by the
        sequencing rules: the jitter buffer must fill (or time out)
        before playout starts, and frames whose predecessors are missing
        are held until the reorder timeout expires.
    */
    pub fn next_ready(&mut self, now: Duration) -> Option<TimedFrame> {
        if self.heap.is_empty() {
            return None;
        }

        // Hold playout until the jitter buffer fills, but never longer
        // than the reorder timeout. Draining after end of stream skips
        // the hold.
        if !self.ended
            && self.heap.len() < self.config.jitter_buffer
            && let Some(Reverse((_, seq))) = self.heap.peek()
            && let Some(oldest) = self.buffered.get(seq)
            && now.saturating_sub(oldest.arrived) < self.config.reorder_timeout
        {
            return None;
        }

        while let Some(Reverse((captured, seq))) = self.heap.pop() {
            if !self.buffered.contains_key(&seq) {
                continue; // evicted while queued
            }

            if self.ended || self.is_ready(seq, captured, now) {
                let frame = self.buffered.remove(&seq)?;

                if let Some((last_seq, _)) = self.last_displayed
                    && seq <= last_seq
                {
                    self.stats.reordered += 1;
                }
                self.last_displayed = Some((seq, captured));
                self.stats.displayed += 1;

                log::debug!("displaying frame {seq}");
                return Some(frame);
            }

            // Not ready yet; put it back and let the caller retry later.
            self.heap.push(Reverse((captured, seq)));
            return None;
        }

        None
    }

    fn is_ready(&mut self, seq: u64, captured: Duration, now: Duration) -> bool {
        // The first frame always displays.
        let Some((last_seq, last_captured)) = self.last_displayed else {
            return true;
        };

        let gap = seq as i64 - last_seq as i64;

        // Next in sequence.
        if gap == 1 {
            return true;
        }

        // Missing predecessors within the acceptable gap: hold for the
        // reorder timeout, then display and record the hole.
        if gap > 1 && gap <= self.config.max_sequence_gap as i64 {
            let Some(frame) = self.buffered.get(&seq) else {
                return false;
            };
            if now.saturating_sub(frame.arrived) >= self.config.reorder_timeout {
                self.stats.sequence_gaps += (gap - 1) as u64;
                log::warn!("sequence gap: {last_seq} -> {seq}");
                return true;
            }
            return false;
        }

        // Too far ahead for waiting on the holes to be worthwhile.
        if gap > self.config.max_sequence_gap as i64 {
            log::warn!("large sequence gap: {last_seq} -> {seq}");
            return true;
        }

        // Late arrival: display only if it carries newer content.
        captured > last_captured
    }

    fn evict(&mut self, now: Duration) {
        let max_age = self.config.max_frame_age;
        let stats = &mut self.stats;
        self.buffered.retain(|_, frame| {
            if now.saturating_sub(frame.arrived) > max_age {
                stats.dropped_old += 1;
                false
            } else {
                true
            }
        });

        // Past capacity, keep only the newest captures. Stale heap
        // entries are skipped on pop.
        if self.buffered.len() > self.config.max_buffer {
            let mut by_capture: Vec<(Duration, u64)> = self
                .buffered
                .values()
                .map(|frame| (frame.captured, frame.seq))
                .collect();
            by_capture.sort_unstable_by(|a, b| b.cmp(a));
            for (_, seq) in by_capture.drain(self.config.max_buffer..) {
                self.buffered.remove(&seq);
            }
        }
    }

    /**
        React to a stream control signal.

        [`StreamSignal::Flush`] discards all state, ready for the stream
        to start over. [`StreamSignal::Eos`] stops accepting new frames;
        buffered frames keep draining through `next_ready` without the
        jitter and reorder holds.
    */
    pub fn handle_signal(&mut self, signal: StreamSignal) {
        match signal {
            StreamSignal::Flush => self.reset(),
            StreamSignal::Eos => {
                self.ended = true;
                log::debug!("sequencer draining after end of stream");
            }
        }
    }

    /**
        Discard all buffered frames, calibration, and statistics.
    */
    pub fn reset(&mut self) {
        self.heap.clear();
        self.buffered.clear();
        self.last_displayed = None;
        self.clock_offset = None;
        self.last_arrival = None;
        self.jitter_samples.clear();
        self.ended = false;
        self.stats = SequencerStats::default();
        log::info!("sequencer reset");
    }

    /**
        Returns the configuration.
    */
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /**
        Returns the counters.
    */
    pub fn stats(&self) -> &SequencerStats {
        &self.stats
    }

    /**
        Returns true if no frames are buffered.
    */
    pub fn is_empty(&self) -> bool {
        self.buffered.is_empty()
    }

    /**
        Returns a snapshot of buffer state and counters.
    */
    pub fn status(&self) -> SequencerStatus {
        SequencerStatus {
            buffered: self.buffered.len(),
            heap_len: self.heap.len(),
            last_displayed: self.last_displayed.map(|(seq, _)| seq),
            clock_offset: self.clock_offset.unwrap_or(0.0),
            ended: self.ended,
            stats: self.stats.clone(),
        }
    }
}

impl Default for FrameSequencer {
    fn default() -> Self {
        Self::new()
    }
}
