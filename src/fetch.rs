//! HTTP access for share pages and media files.
//!
//! All network traffic goes through [`MediaClient`] so the converter never
//! talks to reqwest directly.

use std::fmt;

use log::{debug, trace};
use reqwest::{
    blocking::Client,
    header::{HeaderValue, InvalidHeaderValue, USER_AGENT},
    StatusCode,
};
use thiserror::Error;

/// Some hosts (Tenor included) serve a different page, or nothing at all, to
/// clients that don't look like a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    ResponseError { url: String, status: StatusCode },

    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("{value:?} is not a valid User-Agent header")]
    InvalidUserAgent {
        value: String,
        #[source]
        source: InvalidHeaderValue,
    },
}

pub trait MediaClient {
    /// Fetch the body at `url`. Transport failures and non-success statuses
    /// are both errors.
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let body = self.get_bytes(url)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

pub struct HttpClient {
    client: Client,
    user_agent: HeaderValue,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "HttpClient({:?})", self.user_agent)
    }
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let user_agent =
            HeaderValue::from_str(user_agent).map_err(|source| FetchError::InvalidUserAgent {
                value: user_agent.to_owned(),
                source,
            })?;

        let client = Client::builder().build().map_err(FetchError::Client)?;

        Ok(Self { client, user_agent })
    }
}

impl MediaClient for HttpClient {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);

        let http_error = |source| FetchError::Http {
            url: url.to_owned(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.clone())
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ResponseError {
                url: url.to_owned(),
                status,
            });
        }

        let body = response.bytes().map_err(http_error)?;
        trace!("received {} bytes from {}", body.len(), url);

        Ok(body.to_vec())
    }
}
