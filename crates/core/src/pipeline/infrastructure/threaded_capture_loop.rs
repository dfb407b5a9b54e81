use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{select, Receiver, Sender};

use crate::capture::domain::capture_sequencer::SequencerEvent;
use crate::capture::domain::captured_frame::CapturedFrame;
use crate::capture::domain::timer_control::TimerKind;
use crate::capture::infrastructure::crossbeam_timers::CrossbeamTimers;
use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::capture_observer::{CaptureObserver, LogCaptureObserver};
use crate::pipeline::capture_session_use_case::CaptureSessionUseCase;
use crate::shared::capture_settings::{CaptureSettings, SettingsError};
use crate::video::domain::video_source::VideoSource;

/// Messages sent from the capture thread to its owner.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    Status(String),
    Captured(CapturedFrame),
    Stopped,
}

/// Requests from the owner to the capture thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureControl {
    Snap,
}

/// Forwards session output over a channel, logging it on the way.
///
/// Consecutive duplicate statuses (the per-tick rejection) are forwarded
/// once.
struct ChannelCaptureObserver {
    tx: Sender<CaptureEvent>,
    log: LogCaptureObserver,
    last_status: Option<SequencerEvent>,
}

impl ChannelCaptureObserver {
    fn new(tx: Sender<CaptureEvent>) -> Self {
        Self {
            tx,
            log: LogCaptureObserver::new(),
            last_status: None,
        }
    }
}

impl CaptureObserver for ChannelCaptureObserver {
    fn status(&mut self, event: &SequencerEvent) {
        self.log.status(event);
        if self.last_status.as_ref() == Some(event) {
            return;
        }
        self.last_status = Some(event.clone());
        let _ = self.tx.send(CaptureEvent::Status(event.to_string()));
    }

    fn captured(&mut self, capture: &CapturedFrame) {
        self.log.captured(capture);
        let _ = self.tx.send(CaptureEvent::Captured(capture.clone()));
    }

    fn summary(&self) {
        self.log.summary();
    }
}

/// Owner's side of a running capture thread.
pub struct CaptureLoopHandle {
    events: Receiver<CaptureEvent>,
    control: Sender<CaptureControl>,
    cancelled: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

impl CaptureLoopHandle {
    pub fn events(&self) -> &Receiver<CaptureEvent> {
        &self.events
    }

    /// Manual shutter. Returns false once the loop has exited.
    pub fn snap(&self) -> bool {
        self.control.send(CaptureControl::Snap).is_ok()
    }

    pub fn cancellation_token(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Stops the loop and waits for it. Pending timers are cancelled,
    /// so no capture happens after this returns.
    pub fn stop(self) {
        let Self {
            control,
            cancelled,
            join,
            ..
        } = self;
        cancelled.store(true, Ordering::Relaxed);
        drop(control);
        if join.join().is_err() {
            log::error!("Capture thread panicked");
        }
    }
}

/// Spawn the capture loop: polls on `settings.poll_interval()`, drives the
/// countdown and cooldown timers, and reports through the returned handle.
///
/// Settings are validated first; a zero interval would spin the worker.
pub fn spawn(
    detector: Box<dyn FaceDetector>,
    source: Box<dyn VideoSource>,
    settings: CaptureSettings,
) -> Result<CaptureLoopHandle, SettingsError> {
    settings.validate()?;

    let (tx, rx) = crossbeam_channel::unbounded::<CaptureEvent>();
    let (control_tx, control_rx) = crossbeam_channel::unbounded::<CaptureControl>();
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancelled_clone = cancelled.clone();

    let join = thread::spawn(move || {
        let timers = CrossbeamTimers::new(settings.countdown_interval(), settings.cooldown_interval());
        let observer = ChannelCaptureObserver::new(tx.clone());
        let mut session =
            CaptureSessionUseCase::new(detector, source, timers, Box::new(observer), &settings);

        run_loop(&mut session, &settings, &control_rx, &cancelled_clone);

        session.finish();
        let _ = tx.send(CaptureEvent::Stopped);
    });

    Ok(CaptureLoopHandle {
        events: rx,
        control: control_tx,
        cancelled,
        join,
    })
}

fn run_loop(
    session: &mut CaptureSessionUseCase<CrossbeamTimers>,
    settings: &CaptureSettings,
    control_rx: &Receiver<CaptureControl>,
    cancelled: &AtomicBool,
) {
    let poll = crossbeam_channel::tick(settings.poll_interval());
    log::info!("Capture loop started, polling every {}ms", settings.poll_interval_ms);

    loop {
        if cancelled.load(Ordering::Relaxed) {
            break;
        }

        // Re-fetched every iteration: a cancelled timer's receiver is gone.
        let countdown = session.timers().receiver(TimerKind::Countdown);
        let cooldown = session.timers().receiver(TimerKind::Cooldown);

        select! {
            recv(poll) -> _ => {
                session.poll();
            }
            recv(countdown) -> _ => session.countdown_elapsed(),
            recv(cooldown) -> _ => session.cooldown_elapsed(),
            recv(control_rx) -> msg => match msg {
                Ok(CaptureControl::Snap) => session.snap(),
                Err(_) => break,
            },
        }
    }

    log::info!("Capture loop stopped");
}
