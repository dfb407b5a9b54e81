use std::path::Path;

use crate::shared::frame::Frame;
use crate::video::domain::video_source::VideoSource;

/// Serves one fixed image as a never-ending video.
///
/// Each read returns a copy with an incremented frame index, so
/// consumers can tell successive reads apart.
pub struct StillImageSource {
    frame: Frame,
    reads: usize,
}

impl StillImageSource {
    pub fn new(frame: Frame) -> Self {
        Self { frame, reads: 0 }
    }

    /// Decodes any format the `image` crate supports into an RGBA frame.
    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let rgba = image::open(path)?.to_rgba8();
        log::info!(
            "Loaded still source {} ({}x{})",
            path.display(),
            rgba.width(),
            rgba.height()
        );
        Ok(Self::new(Frame::from_rgba_image(rgba, 0)))
    }
}

impl VideoSource for StillImageSource {
    fn current_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        let frame = Frame::new(
            self.frame.data().to_vec(),
            self.frame.width(),
            self.frame.height(),
            self.frame.channels(),
            self.reads,
        );
        self.reads += 1;
        Ok(frame)
    }
}
