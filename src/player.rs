//! Playback scheduling
//!
//! [`Playback`] simulates a live device feed from a static series: a cursor
//! advances one sample per tick while playing, and the displayed buffer is
//! always exactly the series prefix up to the cursor.
//!
//! The library owns no timer. `tick()` is the single advancement entry point
//! and is driven by whatever scheduling primitive the host provides: a sleep
//! loop (the CLI), an event loop callback, or manual stepping in tests. One
//! `&mut self` entry point means ticks can never interleave on the same
//! state.

use std::time::Duration;

use log::debug;

use crate::types::{PlaybackPhase, Sample, Series};

/// Cadence of the simulated live feed (10 Hz). This is the replay rate, not
/// the series' own sampling rate.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Single-writer playback state machine over one loaded series.
#[derive(Debug, Clone)]
pub struct Playback {
    series: Series,
    cursor: usize,
    running: bool,
    started: bool,
}

impl Playback {
    /// Create a player over a loaded series. Starts idle with nothing
    /// displayed.
    pub fn new(series: Series) -> Self {
        Self {
            series,
            cursor: 0,
            running: false,
            started: false,
        }
    }

    /// A player over an empty series. Legal to start; every tick auto-pauses
    /// without appending (the premature-start case).
    pub fn empty() -> Self {
        Self::new(Series::empty())
    }

    /// Start or resume playback.
    ///
    /// The very first start after construction (or after a reset) clears the
    /// displayed buffer and rewinds the cursor. Starting again after a pause
    /// resumes from the current cursor without resetting.
    pub fn start(&mut self) {
        if !self.started {
            self.cursor = 0;
            self.started = true;
            debug!("playback started, {} samples queued", self.series.len());
        }
        self.running = true;
    }

    /// Pause playback. No-op when idle or already paused.
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            debug!("playback paused at cursor {}", self.cursor);
        }
    }

    /// Return to the as-constructed state: idle, cursor at zero, nothing
    /// displayed. The only operation that shrinks the displayed buffer.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.running = false;
        self.started = false;
    }

    /// Advance playback by one sample.
    ///
    /// Only advances while playing; otherwise a no-op returning `None`.
    /// Appends the next sample to the displayed buffer and returns it. When
    /// the series is exhausted the tick auto-pauses and returns `None` —
    /// end-of-stream behaves like a pause, not a terminal state.
    pub fn tick(&mut self) -> Option<Sample> {
        if !self.running {
            return None;
        }
        match self.series.get(self.cursor) {
            Some(&sample) => {
                self.cursor += 1;
                Some(sample)
            }
            None => {
                self.running = false;
                debug!("series exhausted after {} samples, auto-pausing", self.cursor);
                None
            }
        }
    }

    /// Run up to `n` ticks, returning how many appended a sample.
    pub fn advance(&mut self, n: usize) -> usize {
        (0..n).take_while(|_| self.tick().is_some()).count()
    }

    /// The displayed buffer: exactly `series[..cursor]`, grown one sample
    /// per tick.
    pub fn displayed(&self) -> &[Sample] {
        &self.series.as_slice()[..self.cursor]
    }

    /// Current cursor position, equal to the displayed length.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the cursor has consumed the whole series.
    pub fn is_finished(&self) -> bool {
        self.cursor == self.series.len()
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.running {
            PlaybackPhase::Playing
        } else if self.started {
            PlaybackPhase::Paused
        } else {
            PlaybackPhase::Idle
        }
    }

    /// The underlying series.
    pub fn series(&self) -> &Series {
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_series(n: usize) -> Series {
        let samples = (0..n)
            .map(|i| Sample {
                timestamp: i as f64,
                ax: 0.0,
                ay: 0.0,
                az: 1.0,
                gx: 0.0,
                gy: 0.0,
                gz: 0.0,
            })
            .collect();
        Series::new(samples)
    }

    #[test]
    fn test_reset_on_first_start() {
        let mut player = Playback::new(make_series(5));
        assert_eq!(player.phase(), PlaybackPhase::Idle);

        player.start();
        assert_eq!(player.phase(), PlaybackPhase::Playing);
        assert_eq!(player.cursor(), 0);
        assert!(player.displayed().is_empty());
    }

    #[test]
    fn test_tick_appends_one_sample_in_order() {
        let mut player = Playback::new(make_series(3));
        player.start();

        let first = player.tick().unwrap();
        assert_eq!(first.timestamp, 0.0);
        assert_eq!(player.cursor(), 1);
        assert_eq!(player.displayed().len(), 1);

        let second = player.tick().unwrap();
        assert_eq!(second.timestamp, 1.0);
        assert_eq!(player.displayed().len(), 2);
    }

    #[test]
    fn test_displayed_is_always_the_prefix() {
        let mut player = Playback::new(make_series(10));
        player.start();

        for _ in 0..10 {
            player.tick();
            assert_eq!(player.displayed().len(), player.cursor());
            for (i, sample) in player.displayed().iter().enumerate() {
                assert_eq!(sample.timestamp, i as f64);
            }
        }
    }

    #[test]
    fn test_full_replay_terminates() {
        let mut player = Playback::new(make_series(4));
        player.start();

        assert_eq!(player.advance(100), 4);
        assert!(!player.is_running());
        assert!(player.is_finished());
        assert_eq!(player.phase(), PlaybackPhase::Paused);

        // Exhausted and paused: nothing more appends
        assert!(player.tick().is_none());
        assert_eq!(player.displayed().len(), 4);
    }

    #[test]
    fn test_resume_continues_from_cursor() {
        let mut player = Playback::new(make_series(6));
        player.start();
        player.advance(3);

        player.pause();
        assert_eq!(player.phase(), PlaybackPhase::Paused);
        assert!(player.tick().is_none());
        assert_eq!(player.cursor(), 3);

        // Second start must not reset
        player.start();
        assert_eq!(player.cursor(), 3);
        assert_eq!(player.tick().unwrap().timestamp, 3.0);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut player = Playback::new(make_series(3));

        // From idle
        player.pause();
        assert_eq!(player.phase(), PlaybackPhase::Idle);

        // From paused
        player.start();
        player.pause();
        player.pause();
        assert_eq!(player.phase(), PlaybackPhase::Paused);
        assert_eq!(player.cursor(), 0);
    }

    #[test]
    fn test_cursor_is_monotonic() {
        let mut player = Playback::new(make_series(5));
        let mut last = 0;

        player.start();
        for step in 0..20 {
            if step % 3 == 0 {
                player.pause();
                player.start();
            }
            player.tick();
            assert!(player.cursor() >= last);
            last = player.cursor();
        }
    }

    #[test]
    fn test_premature_start_on_empty_series() {
        let mut player = Playback::empty();
        player.start();
        assert!(player.is_running());

        // First tick finds nothing and auto-pauses
        assert!(player.tick().is_none());
        assert!(!player.is_running());
        assert!(player.displayed().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut player = Playback::new(make_series(5));
        player.start();
        player.advance(4);

        player.reset();
        assert_eq!(player.phase(), PlaybackPhase::Idle);
        assert_eq!(player.cursor(), 0);
        assert!(player.displayed().is_empty());

        // Start after reset behaves like a first start
        player.start();
        assert_eq!(player.tick().unwrap().timestamp, 0.0);
    }

    #[test]
    fn test_restart_after_exhaustion_stays_paused_on_tick() {
        let mut player = Playback::new(make_series(2));
        player.start();
        player.advance(2);

        player.start();
        assert!(player.is_running());
        assert!(player.tick().is_none());
        assert_eq!(player.phase(), PlaybackPhase::Paused);
    }
}
