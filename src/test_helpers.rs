//! Shared test utilities: in-memory fixture images, a fake HTTP client and a
//! one-shot loopback HTTP server.

use std::{
    collections::HashMap,
    io::{Cursor, Read, Write},
    net::TcpListener,
    path::Path,
    sync::mpsc::{self, Receiver},
    thread,
    time::Duration,
};

use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, DynamicImage, Frame, ImageFormat, Rgba, RgbaImage,
};
use reqwest::StatusCode;

use crate::fetch::{FetchError, MediaClient};

// =========================================================================
// Fixture images
// =========================================================================

pub const FRAME_DELAY: Duration = Duration::from_millis(100);

pub fn static_png(width: u32, height: u32) -> Vec<u8> {
    encode_static(width, height, ImageFormat::Png)
}

pub fn static_jpeg(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([40, 120, 200, 255]));
    let mut encoded = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .to_rgb8()
        .write_to(&mut encoded, ImageFormat::Jpeg)
        .unwrap();
    encoded.into_inner()
}

fn encode_static(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([40, 120, 200, 255]));
    let mut encoded = Cursor::new(Vec::new());
    image.write_to(&mut encoded, format).unwrap();
    encoded.into_inner()
}

/// A looping GIF whose frames are solid, distinct colors, each shown for
/// [`FRAME_DELAY`].
pub fn animated_gif(frame_count: usize, width: u32, height: u32) -> Vec<u8> {
    let delay = Delay::from_saturating_duration(FRAME_DELAY);
    let frames = (0..frame_count).map(|index| {
        let shade = (index * 40 % 256) as u8;
        let buffer = RgbaImage::from_pixel(width, height, Rgba([shade, 255 - shade, 0, 255]));
        Frame::from_parts(buffer, 0, 0, delay)
    });

    let mut encoded = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut encoded);
        encoder.set_repeat(Repeat::Infinite).unwrap();
        encoder.encode_frames(frames).unwrap();
    }
    encoded
}

/// Whether a GIF carries the NETSCAPE2.0 application extension with a loop
/// count of zero, which players treat as "loop forever".
pub fn contains_loop_extension(gif: &[u8]) -> bool {
    const APP_ID: &[u8] = b"NETSCAPE2.0";

    gif.windows(APP_ID.len())
        .position(|window| window == APP_ID)
        .and_then(|start| gif.get(start + APP_ID.len()..start + APP_ID.len() + 4))
        .map_or(false, |sub_block| sub_block == [3, 1, 0, 0])
}

/// Names of every entry in `dir`, sorted. Empty if `dir` does not exist.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =========================================================================
// Fake network
// =========================================================================

enum FakeResponse {
    Body(Vec<u8>),
    Status(StatusCode),
}

/// Serves canned responses by exact URL. Unknown URLs are 404s.
#[derive(Default)]
pub struct FakeClient {
    responses: HashMap<String, FakeResponse>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .insert(url.to_owned(), FakeResponse::Body(body.into()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(
            url.to_owned(),
            FakeResponse::Status(StatusCode::from_u16(status).unwrap()),
        );
        self
    }
}

impl MediaClient for FakeClient {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match self.responses.get(url) {
            Some(FakeResponse::Body(body)) => Ok(body.clone()),
            Some(FakeResponse::Status(status)) => Err(FetchError::ResponseError {
                url: url.to_owned(),
                status: *status,
            }),
            None => Err(FetchError::ResponseError {
                url: url.to_owned(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}

// =========================================================================
// Loopback server
// =========================================================================

/// Answers exactly one HTTP request on 127.0.0.1 with `status_line` (e.g.
/// `"404 Not Found"`) and `body`, then closes. Returns the base URL and a
/// receiver for the raw request head the client sent.
pub fn serve_once(status_line: &'static str, body: &'static [u8]) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();

        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let head = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status_line,
            body.len()
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(body);
        let _ = stream.flush();

        let _ = sender.send(String::from_utf8_lossy(&request).into_owned());
    });

    (format!("http://127.0.0.1:{}", port), receiver)
}
