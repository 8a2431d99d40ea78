//! Error types for the two-captcha library.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Closed set of failure categories a decode attempt can end in.
///
/// The first block mirrors the error tokens the service sends back; the rest
/// are raised locally before or around the network calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    WrongUserKey,
    InvalidUserKey,
    ZeroBalance,
    NoSlotAvailable,
    SmallCaptchaFilesize,
    BigCaptchaFilesize,
    WrongFileExtension,
    ImageNotSupported,
    IpNotAllowed,
    IpBanned,
    WrongIdFormat,
    CaptchaUnsolvable,
    EmptyAction,
    /// The service answered with a token that is not in the table
    UnknownRemoteError,
    /// Empty or unloadable image payload
    InvalidCaptcha,
    /// No image source was given
    ArgumentError,
    Timeout,
    NotReported,
    Transport,
    Parse,
    Cancelled,
    InvalidConfig,
}

impl ErrorKind {
    /// Returns the stable name used in logs and FFI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::WrongUserKey => "wrong_user_key",
            ErrorKind::InvalidUserKey => "invalid_user_key",
            ErrorKind::ZeroBalance => "zero_balance",
            ErrorKind::NoSlotAvailable => "no_slot_available",
            ErrorKind::SmallCaptchaFilesize => "small_captcha_filesize",
            ErrorKind::BigCaptchaFilesize => "big_captcha_filesize",
            ErrorKind::WrongFileExtension => "wrong_file_extension",
            ErrorKind::ImageNotSupported => "image_not_supported",
            ErrorKind::IpNotAllowed => "ip_not_allowed",
            ErrorKind::IpBanned => "ip_banned",
            ErrorKind::WrongIdFormat => "wrong_id_format",
            ErrorKind::CaptchaUnsolvable => "captcha_unsolvable",
            ErrorKind::EmptyAction => "empty_action",
            ErrorKind::UnknownRemoteError => "unknown_remote_error",
            ErrorKind::InvalidCaptcha => "invalid_captcha",
            ErrorKind::ArgumentError => "argument_error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::NotReported => "not_reported",
            ErrorKind::Transport => "transport",
            ErrorKind::Parse => "parse",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::InvalidConfig => "invalid_config",
        }
    }

    /// Whether the kind was reported by the remote service.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ErrorKind::WrongUserKey
                | ErrorKind::InvalidUserKey
                | ErrorKind::ZeroBalance
                | ErrorKind::NoSlotAvailable
                | ErrorKind::SmallCaptchaFilesize
                | ErrorKind::BigCaptchaFilesize
                | ErrorKind::WrongFileExtension
                | ErrorKind::ImageNotSupported
                | ErrorKind::IpNotAllowed
                | ErrorKind::IpBanned
                | ErrorKind::WrongIdFormat
                | ErrorKind::CaptchaUnsolvable
                | ErrorKind::EmptyAction
                | ErrorKind::UnknownRemoteError
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the two-captcha library.
#[derive(Error, Debug)]
pub enum TwoCaptchaError {
    /// HTTP request failed; the message has credentials redacted
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Non-HTTP transport failure
    #[error("Transport failed: {0}")]
    Transport(String),

    /// The service rejected the request with a known error token
    #[error("Service returned {token} ({kind})")]
    Remote { kind: ErrorKind, token: String },

    /// The service rejected the request with a token we do not know
    #[error("Service returned unknown error: {0}")]
    UnknownRemote(String),

    /// Image payload is empty or could not be loaded
    #[error("Invalid captcha image: {0}")]
    InvalidCaptcha(String),

    /// No image source was provided
    #[error("Invalid arguments: {0}")]
    Argument(String),

    /// Polling exceeded the configured deadline
    #[error("Timed out after {elapsed:?} (timeout {timeout:?})")]
    Timeout { elapsed: Duration, timeout: Duration },

    /// Incorrect-answer report was not recorded
    #[error("Report was not recorded: {0}")]
    NotReported(String),

    /// Response could not be interpreted
    #[error("Could not parse response: {0}")]
    Parse(String),

    /// Caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// Client configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TwoCaptchaError {
    /// Project the error onto the closed [`ErrorKind`] set.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TwoCaptchaError::Http(_) | TwoCaptchaError::Transport(_) => ErrorKind::Transport,
            TwoCaptchaError::Remote { kind, .. } => *kind,
            TwoCaptchaError::UnknownRemote(_) => ErrorKind::UnknownRemoteError,
            TwoCaptchaError::InvalidCaptcha(_) => ErrorKind::InvalidCaptcha,
            TwoCaptchaError::Argument(_) => ErrorKind::ArgumentError,
            TwoCaptchaError::Timeout { .. } => ErrorKind::Timeout,
            TwoCaptchaError::NotReported(_) => ErrorKind::NotReported,
            TwoCaptchaError::Parse(_) => ErrorKind::Parse,
            TwoCaptchaError::Cancelled => ErrorKind::Cancelled,
            TwoCaptchaError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}

// rquest errors carry the request URL, which has the API key in its query.
impl From<rquest::Error> for TwoCaptchaError {
    fn from(err: rquest::Error) -> Self {
        TwoCaptchaError::Http(redact_key(&err.to_string()))
    }
}

/// Replace the value of every `key=` parameter in `text`.
pub(crate) fn redact_key(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("key=") {
        let starts_param = pos == 0
            || matches!(rest.as_bytes()[pos - 1], b'?' | b'&' | b' ' | b'(');
        out.push_str(&rest[..pos + 4]);
        rest = &rest[pos + 4..];

        if starts_param {
            let end = rest
                .find(|c: char| c == '&' || c == ')' || c == '#' || c.is_whitespace())
                .unwrap_or(rest.len());
            out.push_str("<redacted>");
            rest = &rest[end..];
        }
    }

    out.push_str(rest);
    out
}

/// Result type alias for two-captcha operations.
pub type Result<T> = std::result::Result<T, TwoCaptchaError>;
