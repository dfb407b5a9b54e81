use std::fmt;

/// Why a frame failed the quality gate. Ordered by evaluation priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailReason {
    NoFace,
    MultipleFaces,
    TooClose,
    TooFar,
    TooDark,
    Misaligned,
}

impl FailReason {
    pub const ALL: &[FailReason] = &[
        FailReason::NoFace,
        FailReason::MultipleFaces,
        FailReason::TooClose,
        FailReason::TooFar,
        FailReason::TooDark,
        FailReason::Misaligned,
    ];

    /// Stable machine-readable identifier.
    pub fn code(&self) -> &'static str {
        match self {
            FailReason::NoFace => "no-face",
            FailReason::MultipleFaces => "multiple-faces",
            FailReason::TooClose => "too-close",
            FailReason::TooFar => "too-far",
            FailReason::TooDark => "too-dark",
            FailReason::Misaligned => "misaligned",
        }
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::NoFace => write!(f, "No face detected"),
            FailReason::MultipleFaces => write!(f, "Multiple faces detected"),
            FailReason::TooClose => write!(f, "Too close, move back"),
            FailReason::TooFar => write!(f, "Too far, move closer"),
            FailReason::TooDark => write!(f, "Too dark, find better lighting"),
            FailReason::Misaligned => write!(f, "Center your face in the oval"),
        }
    }
}

/// Per-tick outcome of the quality gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(FailReason),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "Hold still"),
            Verdict::Fail(reason) => reason.fmt(f),
        }
    }
}
