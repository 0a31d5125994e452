//! Tenor share pages don't link to the GIF directly. The media address is
//! published in a `contentUrl` microdata tag in the page head.

use lazy_static::lazy_static;
use regex::Regex;

const TENOR_HOST: &str = "tenor.com";

lazy_static! {
    static ref CONTENT_URL: Regex =
        Regex::new(r#"<meta itemprop="contentUrl" content="(.*?)""#).unwrap();
}

/// Whether `source` should be treated as a Tenor share page.
pub fn is_tenor_page(source: &str) -> bool {
    source.contains(TENOR_HOST)
}

/// Finds the first `contentUrl` value in a Tenor page.
pub fn extract_content_url(html: &str) -> Option<&str> {
    CONTENT_URL
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|content| content.as_str())
        .filter(|url| !url.is_empty())
}
