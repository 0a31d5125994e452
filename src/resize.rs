use std::fmt;

use anyhow::bail;
use image::{
    imageops::{self, FilterType},
    Delay, Frame, RgbaImage,
};

/// Output dimensions. The aspect ratio of the source is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self::new(600, 240)
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}x{}", self.width, self.height)
    }
}

pub fn parse_size(value: &str) -> anyhow::Result<TargetSize> {
    if let Some((width, height)) = value
        .split_once('x')
        .map(|(w, h)| (w.parse::<u32>(), h.parse::<u32>()))
    {
        let size = TargetSize::new(width?, height?);
        if size.width == 0 || size.height == 0 {
            bail!("dimensions must be non-zero, got {}", size);
        }
        Ok(size)
    } else {
        bail!("invalid dimensions passed - please pass your dimensions in the WxH format (e.g. 600x240)")
    }
}

/// Lanczos3 resize to exactly `size`.
pub fn resize_exact(buffer: &RgbaImage, size: TargetSize) -> RgbaImage {
    imageops::resize(buffer, size.width, size.height, FilterType::Lanczos3)
}

/// Resizes one animation frame. The delay is carried over only when
/// `keep_delay` is set; otherwise the frame has no delay.
pub fn resize_frame(frame: &Frame, size: TargetSize, keep_delay: bool) -> Frame {
    let buffer = resize_exact(frame.buffer(), size);

    if keep_delay {
        Frame::from_parts(buffer, 0, 0, frame.delay())
    } else {
        Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(0, 1))
    }
}
