use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::capture::domain::timer_control::{TimerControl, TimerKind};

/// Periodic timers backed by `crossbeam_channel::tick`.
///
/// Each slot holds at most one ticker. Cancelling drops the receiver, so
/// a tick scheduled by the cancelled instance can never be observed.
pub struct CrossbeamTimers {
    countdown_period: Duration,
    cooldown_period: Duration,
    countdown: Option<Receiver<Instant>>,
    cooldown: Option<Receiver<Instant>>,
}

impl CrossbeamTimers {
    pub fn new(countdown_period: Duration, cooldown_period: Duration) -> Self {
        Self {
            countdown_period,
            cooldown_period,
            countdown: None,
            cooldown: None,
        }
    }

    /// Receiver for `kind`, or one that never fires when no timer is live.
    /// Meant to be re-fetched on every select iteration.
    pub fn receiver(&self, kind: TimerKind) -> Receiver<Instant> {
        self.slot(kind)
            .as_ref()
            .cloned()
            .unwrap_or_else(crossbeam_channel::never)
    }

    fn slot(&self, kind: TimerKind) -> &Option<Receiver<Instant>> {
        match kind {
            TimerKind::Countdown => &self.countdown,
            TimerKind::Cooldown => &self.cooldown,
        }
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<Receiver<Instant>> {
        match kind {
            TimerKind::Countdown => &mut self.countdown,
            TimerKind::Cooldown => &mut self.cooldown,
        }
    }

    fn period(&self, kind: TimerKind) -> Duration {
        match kind {
            TimerKind::Countdown => self.countdown_period,
            TimerKind::Cooldown => self.cooldown_period,
        }
    }
}

impl TimerControl for CrossbeamTimers {
    fn start(&mut self, kind: TimerKind) {
        let period = self.period(kind);
        let slot = self.slot_mut(kind);
        if slot.is_some() {
            log::debug!("{kind} timer already running");
            return;
        }
        *slot = Some(crossbeam_channel::tick(period));
    }

    fn cancel(&mut self, kind: TimerKind) {
        if self.slot_mut(kind).take().is_some() {
            log::debug!("{kind} timer cancelled");
        }
    }

    fn is_live(&self, kind: TimerKind) -> bool {
        self.slot(kind).is_some()
    }
}
