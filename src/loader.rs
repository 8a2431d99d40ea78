//! Image loading.
//!
//! Normalises every supported image source to the canonical base64 payload
//! uploaded to the service. The same bytes always produce the same payload,
//! whichever source they came from.

use crate::error::{Result, TwoCaptchaError};
use crate::transport::Transport;
use base64::{engine::general_purpose, Engine as _};
use std::path::PathBuf;

/// Where the captcha image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Raw image bytes
    Raw(Vec<u8>),
    /// Base64 text, optionally as a `data:` URL
    Base64(String),
    /// Local file
    File(PathBuf),
    /// Remote image fetched over HTTP
    Url(String),
}

impl ImageSource {
    fn describe(&self) -> &'static str {
        match self {
            ImageSource::Raw(_) => "raw",
            ImageSource::Base64(_) => "base64",
            ImageSource::File(_) => "file",
            ImageSource::Url(_) => "url",
        }
    }
}

/// Load `source` and return its base64 payload.
///
/// Every failure, including a failed download, is reported as
/// [`TwoCaptchaError::InvalidCaptcha`].
pub async fn load(source: &ImageSource, transport: &dyn Transport) -> Result<String> {
    let bytes = match source {
        ImageSource::Raw(bytes) => bytes.clone(),
        ImageSource::Base64(text) => decode_base64(text)?,
        ImageSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
            TwoCaptchaError::InvalidCaptcha(format!("failed to read {}: {}", path.display(), e))
        })?,
        ImageSource::Url(url) => transport.download(url).await.map_err(|e| {
            TwoCaptchaError::InvalidCaptcha(format!("failed to download {}: {}", url, e))
        })?,
    };

    if bytes.is_empty() {
        return Err(TwoCaptchaError::InvalidCaptcha(format!(
            "{} image is empty",
            source.describe()
        )));
    }

    tracing::debug!(source = source.describe(), size = bytes.len(), "Loaded captcha image");

    Ok(general_purpose::STANDARD.encode(bytes))
}

fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let data = match text.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => text,
    };

    let cleaned: String = data.chars().filter(|c| !c.is_whitespace()).collect();

    general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| TwoCaptchaError::InvalidCaptcha(format!("invalid base64 image: {}", e)))
}
