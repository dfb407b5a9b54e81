use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use ndarray::ArrayView3;

/// A single video frame: contiguous interleaved bytes in row-major order.
///
/// Sources normally deliver RGBA (4 channels); RGB and grayscale are
/// accepted and promoted when converted to an [`RgbaImage`].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert!(channels > 0, "frame must have at least one channel");
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn from_rgba_image(image: RgbaImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, 4, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Source-assigned frame counter.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let c = self.channels as usize;
        let row = self.width as usize * c;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let i = y as usize * row + x as usize * c;
            let px = &self.data[i..i + c];
            match c {
                4 => Rgba([px[0], px[1], px[2], px[3]]),
                3 => Rgba([px[0], px[1], px[2], 255]),
                _ => Rgba([px[0], px[0], px[0], 255]),
            }
        })
    }

    /// Draws this frame onto a `width` x `height` RGBA canvas, stretching
    /// to fill it. Keeps the frame index.
    pub fn draw_to_canvas(&self, width: u32, height: u32) -> Frame {
        let rgba = self.to_rgba_image();
        let canvas = if (width, height) == (self.width, self.height) {
            rgba
        } else {
            imageops::resize(&rgba, width, height, FilterType::Triangle)
        };
        Frame::from_rgba_image(canvas, self.index)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 16]; // 2x2x4
        let frame = Frame::new(data.clone(), 2, 2, 4, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 4);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.pixel_count(), 4);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 4, 0);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        // 2x2 RGBA: pixel (row=1, col=0) is red
        let mut data = vec![0u8; 16];
        data[8] = 255;
        let frame = Frame::new(data, 2, 2, 4, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 2, 4]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }

    #[test]
    fn test_rgb_frame_promotes_to_opaque_rgba() {
        let frame = Frame::new(vec![10, 20, 30], 1, 1, 3, 0);
        let img = frame.to_rgba_image();
        assert_eq!(img.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_gray_frame_promotes_to_rgba() {
        let frame = Frame::new(vec![77], 1, 1, 1, 0);
        assert_eq!(frame.to_rgba_image().get_pixel(0, 0), &Rgba([77, 77, 77, 255]));
    }

    #[test]
    fn test_rgba_image_round_trip_keeps_bytes() {
        let data: Vec<u8> = (0..24).collect();
        let frame = Frame::new(data, 3, 2, 4, 9);
        let back = Frame::from_rgba_image(frame.to_rgba_image(), frame.index());
        assert_eq!(back, frame);
    }

    #[test]
    fn test_draw_to_canvas_resizes_and_keeps_index() {
        let frame = Frame::new(vec![200u8; 4 * 4 * 4], 4, 4, 4, 3);
        let canvas = frame.draw_to_canvas(8, 6);
        assert_eq!((canvas.width(), canvas.height()), (8, 6));
        assert_eq!(canvas.channels(), 4);
        assert_eq!(canvas.index(), 3);
        // Uniform input stays uniform after filtering.
        assert!(canvas.data().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_draw_to_canvas_same_size_is_identity_for_rgba() {
        let data: Vec<u8> = (0..16).collect();
        let frame = Frame::new(data, 2, 2, 4, 0);
        assert_eq!(frame.draw_to_canvas(2, 2), frame);
    }
}
