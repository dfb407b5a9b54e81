/// Detector poll period.
pub const POLL_INTERVAL_MS: u64 = 100;

/// Countdown decrement period and starting value (ticks until capture).
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
pub const COUNTDOWN_START: u32 = 5;

/// Cooldown decrement period and length in ticks (~3 seconds).
pub const COOLDOWN_INTERVAL_MS: u64 = 1000;
pub const COOLDOWN_TICKS: u32 = 3;

/// Distance calibration, tuned empirically for one camera/focal setup.
/// Not physically general; override through settings for other cameras.
pub const REFERENCE_FACE_WIDTH: f64 = 150.0;
pub const REFERENCE_DISTANCE: f64 = 150.0;

/// Accepted estimated-distance band, inclusive.
pub const MIN_DISTANCE: f64 = 30.0;
pub const MAX_DISTANCE: f64 = 100.0;

/// Compared against the raw 0..=765 channel-sum average, not a normalized
/// brightness. Almost every real frame clears it.
pub const MIN_BRIGHTNESS: f64 = 0.5;

/// `|slope|` of the eye line below which the face counts as level.
pub const MAX_LEVEL_SLOPE: f64 = 0.1;

/// Capture raster size.
pub const CANVAS_WIDTH: u32 = 720;
pub const CANVAS_HEIGHT: u32 = 560;

/// Default on-screen guide oval, in display coordinates of a 720x560 view.
pub const GUIDE_CENTER_X: f64 = 360.0;
pub const GUIDE_CENTER_Y: f64 = 280.0;
pub const GUIDE_RADIUS_X: f64 = 180.0;
pub const GUIDE_RADIUS_Y: f64 = 220.0;

/// Empirical pixel offsets from landmarks to sampled skin regions.
pub const FOREHEAD_LIFT: f64 = 25.0;
pub const UNDER_EYE_DROP: f64 = 15.0;
pub const CHEEK_INSET: f64 = 35.0;
pub const CHEEK_LIFT: f64 = 10.0;

/// Half-extent of the square window averaged around each region point.
pub const SAMPLE_HALF_WINDOW: u32 = 5;
