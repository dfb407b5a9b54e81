//! Face-quality gated webcam capture.
//!
//! A fixed-cadence poll feeds detector output through pure checks
//! (distance, brightness, guide containment, orientation) into a
//! [`gate::quality_gate::QualityGate`]; the resulting verdict drives the
//! [`capture::domain::capture_sequencer::CaptureSequencer`], which owns the
//! countdown, the single capture action and the post-capture cooldown.

pub mod capture {
    pub mod domain {
        pub mod capture_error;
        pub mod capture_sequencer;
        pub mod captured_frame;
        pub mod timer_control;
    }
    pub mod infrastructure;
}

pub mod checks {
    pub mod brightness;
    pub mod check_error;
    pub mod distance;
    pub mod guide;
    pub mod orientation;
}

pub mod detection {
    pub mod domain {
        pub mod detection;
        pub mod face_detector;
        pub mod face_landmarks;
    }
}

pub mod gate {
    pub mod quality_gate;
    pub mod verdict;
}

pub mod pipeline {
    pub mod capture_observer;
    pub mod capture_session_use_case;
    pub mod infrastructure;
}

pub mod sampling {
    pub mod canvas_scale;
    pub mod color_sampler;
    pub mod facial_regions;
    pub mod region_sampler;
    pub mod sampling_error;
}

pub mod shared {
    pub mod capture_settings;
    pub mod constants;
    pub mod frame;
    pub mod geometry;
}

pub mod video {
    pub mod domain {
        pub mod video_source;
    }
    pub mod infrastructure;
}
