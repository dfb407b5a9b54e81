use std::collections::VecDeque;

use crate::capture::domain::capture_error::CaptureError;
use crate::capture::domain::capture_sequencer::{CaptureSequencer, SequencerCommand, SequencerState};
use crate::capture::domain::captured_frame::CapturedFrame;
use crate::capture::domain::timer_control::{TimerControl, TimerKind};
use crate::detection::domain::detection::Detection;
use crate::detection::domain::face_detector::FaceDetector;
use crate::gate::quality_gate::QualityGate;
use crate::gate::verdict::{FailReason, Verdict};
use crate::pipeline::capture_observer::CaptureObserver;
use crate::sampling::canvas_scale::scale_detection_to_canvas;
use crate::sampling::region_sampler::RegionSampler;
use crate::sampling::sampling_error::SamplingError;
use crate::shared::capture_settings::CaptureSettings;
use crate::shared::frame::Frame;
use crate::video::domain::video_source::VideoSource;

/// Owns everything one capture session needs and carries out the
/// sequencer's commands: poll → gate → sequencer, timers, capture.
///
/// Not thread-safe by itself; a driver calls `poll`, `countdown_elapsed`,
/// `cooldown_elapsed` and `snap` from a single loop.
pub struct CaptureSessionUseCase<T: TimerControl> {
    detector: Box<dyn FaceDetector>,
    source: Box<dyn VideoSource>,
    gate: QualityGate,
    sequencer: CaptureSequencer,
    sampler: RegionSampler,
    timers: T,
    observer: Box<dyn CaptureObserver>,
    canvas_size: (u32, u32),
    sample_regions: bool,
    last_capture: Option<CapturedFrame>,
}

impl<T: TimerControl> CaptureSessionUseCase<T> {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        source: Box<dyn VideoSource>,
        timers: T,
        observer: Box<dyn CaptureObserver>,
        settings: &CaptureSettings,
    ) -> Self {
        Self {
            detector,
            source,
            gate: QualityGate::new(settings.gate.clone()),
            sequencer: CaptureSequencer::new(settings.countdown_start, settings.cooldown_ticks),
            sampler: RegionSampler::new(settings.sample_window),
            timers,
            observer,
            canvas_size: (settings.canvas_width, settings.canvas_height),
            sample_regions: settings.sample_regions,
            last_capture: None,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Most recent successful capture; each capture supersedes the last.
    pub fn last_capture(&self) -> Option<&CapturedFrame> {
        self.last_capture.as_ref()
    }

    /// One poll tick: read a frame, detect, evaluate, advance.
    ///
    /// Detections are mapped from source pixels into the canvas space the
    /// guide and distance bands are defined in before the gate sees them.
    /// Source or detector failures count as "no face" for this tick.
    pub fn poll(&mut self) -> Verdict {
        let verdict = match self.source.current_frame() {
            Ok(frame) => {
                let detections = self
                    .detector
                    .detect(&frame)
                    .map_err(|e| e.to_string())
                    .and_then(|found| self.to_canvas_space(&found, &frame).map_err(|e| e.to_string()))
                    .unwrap_or_else(|e| {
                        log::warn!("Detection failed, treating as no face: {e}");
                        Vec::new()
                    });
                self.gate.evaluate(&detections, &frame)
            }
            Err(e) => {
                log::warn!("No frame available: {e}");
                Verdict::Fail(FailReason::NoFace)
            }
        };

        let commands = self.sequencer.on_verdict(&verdict);
        self.apply(commands);
        verdict
    }

    pub fn countdown_elapsed(&mut self) {
        let commands = self.sequencer.on_countdown_tick();
        self.apply(commands);
    }

    pub fn cooldown_elapsed(&mut self) {
        let commands = self.sequencer.on_cooldown_tick();
        self.apply(commands);
    }

    /// Manual shutter: captures now unless a capture or cooldown is
    /// already under way.
    pub fn snap(&mut self) {
        let commands = self.sequencer.on_snap();
        self.apply(commands);
    }

    /// Cancels any pending timers and emits the observer summary.
    pub fn finish(&mut self) {
        self.timers.cancel(TimerKind::Countdown);
        self.timers.cancel(TimerKind::Cooldown);
        self.observer.summary();
    }

    fn apply(&mut self, commands: Vec<SequencerCommand>) {
        let mut queue: VecDeque<SequencerCommand> = commands.into();
        while let Some(command) = queue.pop_front() {
            match command {
                SequencerCommand::Notify(event) => self.observer.status(&event),
                SequencerCommand::StartTimer(kind) => self.timers.start(kind),
                SequencerCommand::CancelTimer(kind) => self.timers.cancel(kind),
                SequencerCommand::Capture => {
                    let outcome = match self.capture() {
                        Ok(captured) => {
                            self.observer.captured(&captured);
                            self.last_capture = Some(captured);
                            Ok(())
                        }
                        Err(e) => Err(e.to_string()),
                    };
                    queue.extend(self.sequencer.capture_finished(outcome));
                }
            }
        }
    }

    fn to_canvas_space(
        &self,
        detections: &[Detection],
        frame: &Frame,
    ) -> Result<Vec<Detection>, SamplingError> {
        let (cw, ch) = self.canvas_size;
        detections
            .iter()
            .map(|d| scale_detection_to_canvas(d, frame.width(), frame.height(), cw, ch))
            .collect()
    }

    fn capture(&mut self) -> Result<CapturedFrame, CaptureError> {
        let frame = self
            .source
            .current_frame()
            .map_err(|e| CaptureError::FrameUnavailable(e.to_string()))?;
        let (cw, ch) = self.canvas_size;
        let canvas = frame.draw_to_canvas(cw, ch);

        let regions = if self.sample_regions {
            let detections = self
                .detector
                .detect(&frame)
                .map_err(|e| CaptureError::Detection(e.to_string()))?;
            let landmarks = detections.first().and_then(|d| d.landmarks.as_ref());
            Some(
                self.sampler
                    .sample(landmarks, frame.width(), frame.height(), &canvas)?,
            )
        } else {
            None
        };

        Ok(CapturedFrame::new(
            self.sequencer.captures() + 1,
            canvas,
            (frame.width(), frame.height()),
            regions,
        ))
    }
}
