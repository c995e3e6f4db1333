use crate::error::TraceError;
use crate::model::Color;

/// Read-only view over a caller-owned RGB buffer, 3 bytes per pixel,
/// top-left origin, `stride` bytes per row.
pub struct RasterSampler<'a> {
    data: &'a [u8],
    width: i32,
    height: i32,
    stride: usize,
}

impl<'a> RasterSampler<'a> {
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<RasterSampler<'a>, TraceError> {
        if stride < width * 3 {
            return Err(TraceError::InvalidRaster);
        }
        if height > 0 && data.len() < stride * (height - 1) + width * 3 {
            return Err(TraceError::InvalidRaster);
        }
        Ok(RasterSampler {
            data,
            width: width as i32,
            height: height as i32,
            stride,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Sample a pixel. Bounds are the caller's responsibility.
    pub fn color_at(&self, x: i32, y: i32) -> Color {
        debug_assert!(x >= 0 && x < self.width && y >= 0 && y < self.height);
        let o = y as usize * self.stride + x as usize * 3;
        Color::from_rgb(self.data[o], self.data[o + 1], self.data[o + 2])
    }

    /// Sample a pixel, mapping anything off-image to the outside sentinel.
    pub fn color_at_checked(&self, x: i32, y: i32) -> Color {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            Color::OUTSIDE
        } else {
            self.color_at(x, y)
        }
    }
}
