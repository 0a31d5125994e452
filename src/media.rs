//! Decoding of source media into RGBA frames.

use std::{fmt, io, io::Cursor, path::Path};

use fs_err as fs;
use image::{
    codecs::{gif::GifDecoder, png::PngDecoder, webp::WebPDecoder},
    AnimationDecoder, Frame, ImageError, ImageFormat, ImageResult,
};
use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read image file")]
    Read(#[from] io::Error),

    #[error("could not decode image")]
    Decode(#[from] ImageError),

    #[error("image contains no frames")]
    Empty,
}

/// A decoded image. Static images hold exactly one frame.
///
/// Animated frames are full-canvas RGBA buffers, already composited by the
/// decoder, so each can be processed on its own.
pub struct MediaImage {
    frames: Vec<Frame>,
    animated: bool,
}

impl fmt::Debug for MediaImage {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "MediaImage({:?}, {} frame(s), animated: {})",
            self.dimensions(),
            self.frames.len(),
            self.animated
        )
    }
}

impl MediaImage {
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.frames[0].buffer().dimensions()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    fn from_frames(frames: Vec<Frame>) -> Result<Self, LoadError> {
        if frames.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self {
            animated: frames.len() > 1,
            frames,
        })
    }
}

pub fn open(path: &Path) -> Result<MediaImage, LoadError> {
    let contents = fs::read(path)?;
    decode(&contents)
}

/// Decodes `contents`, sniffing the format from its magic bytes.
///
/// GIF, APNG and WebP sources are read as animations. A single-frame
/// animation is reported as a static image.
pub fn decode(contents: &[u8]) -> Result<MediaImage, LoadError> {
    let format = image::guess_format(contents)?;
    debug!("detected {:?} image ({} bytes)", format, contents.len());

    let frames = match decode_animation(contents, format)? {
        Some(frames) => frames,
        None => {
            let image = image::load_from_memory_with_format(contents, format)?;
            vec![Frame::new(image.to_rgba8())]
        }
    };

    MediaImage::from_frames(frames)
}

fn decode_animation(contents: &[u8], format: ImageFormat) -> ImageResult<Option<Vec<Frame>>> {
    let cursor = Cursor::new(contents);

    let frames = match format {
        ImageFormat::Gif => GifDecoder::new(cursor)?.into_frames().collect_frames()?,
        ImageFormat::Png => {
            let decoder = PngDecoder::new(cursor)?;
            if !decoder.is_apng()? {
                return Ok(None);
            }
            decoder.apng()?.into_frames().collect_frames()?
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(cursor)?;
            if !decoder.has_animation() {
                return Ok(None);
            }
            decoder.into_frames().collect_frames()?
        }
        _ => return Ok(None),
    };

    Ok(Some(frames))
}
