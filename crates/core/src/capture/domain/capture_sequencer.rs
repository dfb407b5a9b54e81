//! Countdown → capture → cooldown state machine.
//!
//! The sequencer is pure: every input returns the commands the owner must
//! carry out (timer starts/cancels, the capture action, status
//! notifications). Timer exclusivity and the one-capture-per-cooldown
//! guarantee follow from the state transitions alone.

use std::fmt;

use crate::capture::domain::timer_control::TimerKind;
use crate::gate::verdict::{FailReason, Verdict};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    CountingDown { remaining: u32 },
    CaptureInFlight,
    Cooldown { remaining: u32 },
}

/// Status notifications, rendered as user-facing text via `Display`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequencerEvent {
    Rejected(FailReason),
    CountdownStarted { remaining: u32 },
    CountdownTick { remaining: u32 },
    CountdownCancelled(FailReason),
    Capturing,
    Captured { sequence: u64 },
    CaptureFailed(String),
    Ready,
}

impl SequencerEvent {
    /// Stable grouping key: the variant, plus the fail reason code where
    /// there is one. Per-capture details (sequence, error text) are left out.
    pub fn category(&self) -> String {
        match self {
            SequencerEvent::Rejected(reason) => format!("rejected:{}", reason.code()),
            SequencerEvent::CountdownStarted { .. } => "countdown-started".to_string(),
            SequencerEvent::CountdownTick { .. } => "countdown-tick".to_string(),
            SequencerEvent::CountdownCancelled(reason) => {
                format!("countdown-cancelled:{}", reason.code())
            }
            SequencerEvent::Capturing => "capturing".to_string(),
            SequencerEvent::Captured { .. } => "captured".to_string(),
            SequencerEvent::CaptureFailed(_) => "capture-failed".to_string(),
            SequencerEvent::Ready => "ready".to_string(),
        }
    }
}

impl fmt::Display for SequencerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencerEvent::Rejected(reason) => write!(f, "{reason}"),
            SequencerEvent::CountdownStarted { remaining } => {
                write!(f, "Starting countdown: {remaining}")
            }
            SequencerEvent::CountdownTick { remaining } => write!(f, "Capturing in {remaining}"),
            SequencerEvent::CountdownCancelled(reason) => {
                write!(f, "Countdown cancelled: {reason}")
            }
            SequencerEvent::Capturing => write!(f, "Capturing"),
            SequencerEvent::Captured { sequence } => write!(f, "Photo {sequence} captured"),
            SequencerEvent::CaptureFailed(message) => write!(f, "Capture failed: {message}"),
            SequencerEvent::Ready => write!(f, "Ready"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequencerCommand {
    Notify(SequencerEvent),
    StartTimer(TimerKind),
    CancelTimer(TimerKind),
    /// Run the capture action once, then report back through
    /// [`CaptureSequencer::capture_finished`].
    Capture,
}

pub struct CaptureSequencer {
    state: SequencerState,
    countdown_start: u32,
    cooldown_ticks: u32,
    captures: u64,
}

impl CaptureSequencer {
    /// Both lengths are clamped to at least one tick.
    pub fn new(countdown_start: u32, cooldown_ticks: u32) -> Self {
        Self {
            state: SequencerState::Idle,
            countdown_start: countdown_start.max(1),
            cooldown_ticks: cooldown_ticks.max(1),
            captures: 0,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Number of successful captures so far.
    pub fn captures(&self) -> u64 {
        self.captures
    }

    /// Feeds one poll tick's verdict.
    pub fn on_verdict(&mut self, verdict: &Verdict) -> Vec<SequencerCommand> {
        use SequencerCommand::*;

        match (self.state, verdict) {
            (SequencerState::Idle, Verdict::Pass) => {
                self.state = SequencerState::CountingDown {
                    remaining: self.countdown_start,
                };
                log::info!("Face accepted, starting {}-tick countdown", self.countdown_start);
                vec![
                    Notify(SequencerEvent::CountdownStarted {
                        remaining: self.countdown_start,
                    }),
                    StartTimer(TimerKind::Countdown),
                ]
            }
            (SequencerState::Idle, Verdict::Fail(reason)) => {
                vec![Notify(SequencerEvent::Rejected(*reason))]
            }
            (SequencerState::CountingDown { .. }, Verdict::Pass) => Vec::new(),
            (SequencerState::CountingDown { remaining }, Verdict::Fail(reason)) => {
                log::info!("Countdown cancelled at {remaining}: {}", reason.code());
                self.state = SequencerState::Idle;
                vec![
                    CancelTimer(TimerKind::Countdown),
                    Notify(SequencerEvent::CountdownCancelled(*reason)),
                ]
            }
            (SequencerState::CaptureInFlight | SequencerState::Cooldown { .. }, _) => Vec::new(),
        }
    }

    /// One period of the countdown timer elapsed.
    pub fn on_countdown_tick(&mut self) -> Vec<SequencerCommand> {
        use SequencerCommand::*;

        let SequencerState::CountingDown { remaining } = self.state else {
            log::debug!("Stale countdown tick in {:?}", self.state);
            return vec![CancelTimer(TimerKind::Countdown)];
        };

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.state = SequencerState::CountingDown { remaining };
            return vec![Notify(SequencerEvent::CountdownTick { remaining })];
        }

        self.state = SequencerState::CaptureInFlight;
        vec![
            CancelTimer(TimerKind::Countdown),
            Notify(SequencerEvent::Capturing),
            Capture,
        ]
    }

    /// Requests an immediate capture, bypassing the countdown.
    ///
    /// Honoured from `Idle` and `CountingDown` only.
    pub fn on_snap(&mut self) -> Vec<SequencerCommand> {
        use SequencerCommand::*;

        match self.state {
            SequencerState::Idle => {
                self.state = SequencerState::CaptureInFlight;
                vec![Notify(SequencerEvent::Capturing), Capture]
            }
            SequencerState::CountingDown { .. } => {
                self.state = SequencerState::CaptureInFlight;
                vec![
                    CancelTimer(TimerKind::Countdown),
                    Notify(SequencerEvent::Capturing),
                    Capture,
                ]
            }
            SequencerState::CaptureInFlight | SequencerState::Cooldown { .. } => {
                log::debug!("Snap ignored in {:?}", self.state);
                Vec::new()
            }
        }
    }

    /// Reports the outcome of the capture action. Success or failure,
    /// the sequencer moves on to cooldown.
    pub fn capture_finished(&mut self, outcome: Result<(), String>) -> Vec<SequencerCommand> {
        use SequencerCommand::*;

        if self.state != SequencerState::CaptureInFlight {
            log::warn!("Capture result reported in {:?}, ignoring", self.state);
            return Vec::new();
        }

        let event = match outcome {
            Ok(()) => {
                self.captures += 1;
                log::info!("Capture {} complete", self.captures);
                SequencerEvent::Captured {
                    sequence: self.captures,
                }
            }
            Err(message) => {
                log::warn!("Capture failed: {message}");
                SequencerEvent::CaptureFailed(message)
            }
        };

        self.state = SequencerState::Cooldown {
            remaining: self.cooldown_ticks,
        };
        vec![Notify(event), StartTimer(TimerKind::Cooldown)]
    }

    /// One period of the cooldown timer elapsed.
    pub fn on_cooldown_tick(&mut self) -> Vec<SequencerCommand> {
        use SequencerCommand::*;

        let SequencerState::Cooldown { remaining } = self.state else {
            log::debug!("Stale cooldown tick in {:?}", self.state);
            return vec![CancelTimer(TimerKind::Cooldown)];
        };

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.state = SequencerState::Cooldown { remaining };
            return Vec::new();
        }

        self.state = SequencerState::Idle;
        vec![
            CancelTimer(TimerKind::Cooldown),
            Notify(SequencerEvent::Ready),
        ]
    }
}
