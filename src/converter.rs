//! Resolving a source, loading it, and writing the resized result.

use std::{fmt, path::PathBuf};

use image::Frame;
use log::{debug, info};
use thiserror::Error;

use crate::{
    config::Settings,
    fetch::{FetchError, MediaClient},
    media::{self, LoadError, MediaImage},
    output::{self, OutputError},
    resize::{resize_exact, resize_frame, TargetSize},
    tenor,
};

/// Where the media bytes for a source live, after any Tenor page has been
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    Url(String),
    Path(PathBuf),
}

impl MediaRef {
    pub fn from_source(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            MediaRef::Url(source.to_owned())
        } else {
            MediaRef::Path(PathBuf::from(source))
        }
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MediaRef::Url(url) => formatter.write_str(url),
            MediaRef::Path(path) => write!(formatter, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("could not extract a media URL from Tenor page {page_url}")]
    TenorExtraction { page_url: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("error loading image from {media}")]
    Load {
        media: MediaRef,
        #[source]
        source: LoadError,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TenorExtraction,
    Fetch,
    Read,
    Decode,
    Encode,
    Write,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::TenorExtraction { .. } => ErrorKind::TenorExtraction,
            ConvertError::Fetch(_) => ErrorKind::Fetch,
            ConvertError::Load {
                source: LoadError::Read(_),
                ..
            } => ErrorKind::Read,
            ConvertError::Load { .. } => ErrorKind::Decode,
            ConvertError::Output(OutputError::Encode(_)) => ErrorKind::Encode,
            ConvertError::Output(OutputError::Write(_)) => ErrorKind::Write,
        }
    }
}

pub struct Converter {
    client: Box<dyn MediaClient>,
    size: TargetSize,
    output_dir: PathBuf,
    preserve_delays: bool,
}

impl Converter {
    pub fn new(client: Box<dyn MediaClient>, settings: &Settings) -> Self {
        Self {
            client,
            size: settings.size,
            output_dir: settings.output_dir.clone(),
            preserve_delays: settings.preserve_delays,
        }
    }

    /// Turns a user-supplied source into a [`MediaRef`], scraping Tenor share
    /// pages for their direct media URL.
    pub fn resolve(&self, source: &str) -> Result<MediaRef, ConvertError> {
        if !tenor::is_tenor_page(source) {
            return Ok(MediaRef::from_source(source));
        }

        let html = self.client.get_text(source)?;

        let Some(url) = tenor::extract_content_url(&html) else {
            return Err(ConvertError::TenorExtraction {
                page_url: source.to_owned(),
            });
        };

        info!("Tenor GIF URL found: {}", url);
        Ok(MediaRef::Url(url.to_owned()))
    }

    pub fn load(&self, media: &MediaRef) -> Result<MediaImage, ConvertError> {
        let loaded = match media {
            MediaRef::Url(url) => {
                let contents = self.client.get_bytes(url)?;
                media::decode(&contents)
            }
            MediaRef::Path(path) => media::open(path),
        };

        let image = loaded.map_err(|source| ConvertError::Load {
            media: media.clone(),
            source,
        })?;

        debug!(
            "loaded {} with dimensions {:?} and {} frame(s)",
            media,
            image.dimensions(),
            image.frame_count()
        );

        Ok(image)
    }

    /// Runs the whole pipeline for `source` and returns the path written.
    /// Nothing is written unless loading succeeds.
    pub fn convert(&self, source: &str) -> Result<PathBuf, ConvertError> {
        let media = self.resolve(source)?;
        let image = self.load(&media)?;

        if image.is_animated() {
            self.write_animated(image)
        } else {
            self.write_static(image)
        }
    }

    fn write_animated(&self, image: MediaImage) -> Result<PathBuf, ConvertError> {
        if !self.preserve_delays {
            info!("frame delays are not carried over; pass --preserve-delays to keep them");
        }

        debug!("resizing {} frames to {}", image.frame_count(), self.size);

        let frames: Vec<Frame> = image
            .frames()
            .iter()
            .map(|frame| resize_frame(frame, self.size, self.preserve_delays))
            .collect();

        let path = output::write_gif(&self.output_dir, frames)?;
        info!("Saved animated GIF to: {}", path.display());

        Ok(path)
    }

    fn write_static(&self, image: MediaImage) -> Result<PathBuf, ConvertError> {
        debug!("resizing image to {}", self.size);

        let frame = &image.frames()[0];
        let resized = resize_exact(frame.buffer(), self.size);

        let path = output::write_png(&self.output_dir, &resized)?;
        info!("Saved image to: {}", path.display());

        Ok(path)
    }
}
