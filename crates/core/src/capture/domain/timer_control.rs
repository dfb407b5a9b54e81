use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Countdown,
    Cooldown,
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKind::Countdown => write!(f, "countdown"),
            TimerKind::Cooldown => write!(f, "cooldown"),
        }
    }
}

/// Port for the periodic countdown and cooldown timers.
///
/// Each kind has a single slot: starting a kind that is already pending
/// is a no-op, and cancelling must guarantee that no tick from the
/// cancelled instance is delivered afterwards.
pub trait TimerControl: Send {
    fn start(&mut self, kind: TimerKind);
    fn cancel(&mut self, kind: TimerKind);
    fn is_live(&self, kind: TimerKind) -> bool;
}
