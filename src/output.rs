//! Encoding converted images and writing them into the output directory.
//!
//! There is one fixed file name per kind of output, and each run overwrites
//! whatever the previous run left there.

use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use image::{
    codecs::{
        gif::{GifEncoder, Repeat},
        png::PngEncoder,
    },
    ExtendedColorType, Frame, ImageEncoder, ImageError, RgbaImage,
};
use log::debug;
use thiserror::Error;

pub const STATIC_FILE_NAME: &str = "converted.png";
pub const ANIMATED_FILE_NAME: &str = "converted.gif";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("could not encode image")]
    Encode(#[from] ImageError),

    #[error("could not write output file")]
    Write(#[from] io::Error),
}

pub fn write_png(output_dir: &Path, image: &RgbaImage) -> Result<PathBuf, OutputError> {
    let (width, height) = image.dimensions();

    let mut encoded = Vec::new();
    PngEncoder::new(&mut encoded).write_image(
        image.as_raw(),
        width,
        height,
        ExtendedColorType::Rgba8,
    )?;

    write_file(output_dir, STATIC_FILE_NAME, &encoded)
}

/// Writes `frames` as a GIF that loops forever.
pub fn write_gif(output_dir: &Path, frames: Vec<Frame>) -> Result<PathBuf, OutputError> {
    let mut encoded = Vec::new();

    {
        let mut encoder = GifEncoder::new(&mut encoded);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(frames)?;
    }

    write_file(output_dir, ANIMATED_FILE_NAME, &encoded)
}

fn write_file(output_dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(output_dir)?;

    let path = output_dir.join(file_name);
    fs::write(&path, contents)?;
    debug!("wrote {} bytes to {}", contents.len(), path.display());

    Ok(path)
}
