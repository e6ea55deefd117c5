//! Therapy session countdown
//!
//! A second tick-driven state machine, used by the therapy mode: the patient
//! picks a duration, the session counts down one second per tick while also
//! accumulating elapsed time, and reaching zero stops the session on its
//! own. Like playback, the timer primitive lives with the host; the library
//! only exposes `tick()`.

use log::debug;
use serde::{Deserialize, Serialize};

/// Countdown state of one therapy session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Active,
}

/// Tick-driven therapy session timer.
#[derive(Debug, Clone)]
pub struct TherapySession {
    status: SessionStatus,
    total_secs: u32,
    remaining_secs: u32,
    elapsed_secs: u32,
}

impl Default for TherapySession {
    fn default() -> Self {
        Self::new()
    }
}

impl TherapySession {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Idle,
            total_secs: 0,
            remaining_secs: 0,
            elapsed_secs: 0,
        }
    }

    /// Arm and start a session of the given duration.
    pub fn begin(&mut self, minutes: u32) {
        self.total_secs = minutes * 60;
        self.remaining_secs = self.total_secs;
        self.elapsed_secs = 0;
        self.status = SessionStatus::Active;
        debug!("therapy session started, {minutes} min");
    }

    /// One-second advancement. Decrements the countdown and accumulates
    /// elapsed time; reaching zero stops the session. No-op while idle.
    pub fn tick(&mut self) {
        if self.status != SessionStatus::Active {
            return;
        }
        self.elapsed_secs += 1;
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.stop();
            return;
        }
        self.remaining_secs -= 1;
    }

    /// Stop early (or on completion) and clear the counters.
    pub fn stop(&mut self) {
        self.status = SessionStatus::Idle;
        self.elapsed_secs = 0;
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Fraction of the session remaining, 0.0 to 1.0. Full when idle.
    pub fn progress(&self) -> f64 {
        if self.status != SessionStatus::Active || self.total_secs == 0 {
            return 1.0;
        }
        f64::from(self.remaining_secs) / f64::from(self.total_secs)
    }
}

/// Render seconds as `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_counts_down() {
        let mut session = TherapySession::new();
        session.begin(15);

        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.remaining_secs(), 900);

        session.tick();
        session.tick();
        assert_eq!(session.remaining_secs(), 898);
        assert_eq!(session.elapsed_secs(), 2);
    }

    #[test]
    fn test_session_auto_stops_at_zero() {
        let mut session = TherapySession::new();
        session.begin(1);

        for _ in 0..60 {
            session.tick();
        }
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.elapsed_secs(), 0);

        // Further ticks are no-ops
        session.tick();
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_zero_duration_session_stops_on_first_tick() {
        let mut session = TherapySession::new();
        session.begin(0);
        assert_eq!(session.status(), SessionStatus::Active);

        // Nothing to count down: the first tick ends the session cleanly
        session.tick();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.remaining_secs(), 0);
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn test_progress_tracks_remaining() {
        let mut session = TherapySession::new();
        assert_eq!(session.progress(), 1.0);

        session.begin(1);
        for _ in 0..30 {
            session.tick();
        }
        assert!((session.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stop_cancels_early() {
        let mut session = TherapySession::new();
        session.begin(20);
        session.tick();

        session.stop();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(900), "15:00");
    }
}
