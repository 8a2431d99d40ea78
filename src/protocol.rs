//! Pipe-delimited wire protocol spoken by `in.php` / `res.php`.
//!
//! Every response is either `STATUS` or `STATUS|payload`. A status of `OK`
//! means success; anything else is an error token, except for the not-ready
//! sentinel that asks the caller to poll again.

use crate::error::{ErrorKind, Result, TwoCaptchaError};
use crate::models::Answer;

/// Response of a job that is still being worked on.
pub const NOT_READY: &str = "CAPCHA_NOT_READY";

/// Response of a successfully recorded incorrect-answer report.
pub const REPORT_RECORDED: &str = "OK_REPORT_RECORDED";

/// Prefix of click-style answers, e.g. `click:1/5/9`.
pub const CLICK_PREFIX: &str = "click";

/// Encoding method sent with every upload.
pub const METHOD_BASE64: &str = "base64";

/// Actions understood by `res.php`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    ReportBad,
    GetStats,
    GetBalance,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::ReportBad => "reportbad",
            Action::GetStats => "getstats",
            Action::GetBalance => "getbalance",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const ERROR_TABLE: &[(&str, ErrorKind)] = &[
    ("ERROR_WRONG_USER_KEY", ErrorKind::WrongUserKey),
    ("ERROR_KEY_DOES_NOT_EXIST", ErrorKind::InvalidUserKey),
    ("ERROR_ZERO_BALANCE", ErrorKind::ZeroBalance),
    ("ERROR_NO_SLOT_AVAILABLE", ErrorKind::NoSlotAvailable),
    ("ERROR_ZERO_CAPTCHA_FILESIZE", ErrorKind::SmallCaptchaFilesize),
    ("ERROR_TOO_BIG_CAPTCHA_FILESIZE", ErrorKind::BigCaptchaFilesize),
    ("ERROR_WRONG_FILE_EXTENSION", ErrorKind::WrongFileExtension),
    ("ERROR_IMAGE_TYPE_NOT_SUPPORTED", ErrorKind::ImageNotSupported),
    ("ERROR_IP_NOT_ALLOWED", ErrorKind::IpNotAllowed),
    ("IP_BANNED", ErrorKind::IpBanned),
    ("ERROR_WRONG_ID_FORMAT", ErrorKind::WrongIdFormat),
    ("ERROR_CAPTCHA_UNSOLVABLE", ErrorKind::CaptchaUnsolvable),
    ("ERROR_EMPTY_ACTION", ErrorKind::EmptyAction),
];

/// Look up the kind of a remote error token.
pub fn error_kind_for(token: &str) -> Option<ErrorKind> {
    ERROR_TABLE
        .iter()
        .find(|(known, _)| *known == token)
        .map(|(_, kind)| *kind)
}

/// Whether a bare response is an error token rather than data.
pub fn is_error_token(text: &str) -> bool {
    error_kind_for(text).is_some() || text.starts_with("ERROR_")
}

/// Translate a remote error token into an error. Unknown tokens are never
/// dropped; they become [`TwoCaptchaError::UnknownRemote`].
pub fn remote_error(token: &str) -> TwoCaptchaError {
    match error_kind_for(token) {
        Some(kind) => TwoCaptchaError::Remote {
            kind,
            token: token.to_string(),
        },
        None => TwoCaptchaError::UnknownRemote(token.to_string()),
    }
}

/// A parsed `STATUS[|payload]` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub ok: bool,
    pub payload: String,
}

impl WireResponse {
    /// Parse a raw response body.
    ///
    /// Without a `|` the status itself becomes the payload, so error tokens
    /// and the not-ready sentinel land in `payload`. A bare `OK` has an
    /// empty payload.
    pub fn parse(body: &str) -> Self {
        let body = body.trim();
        match body.split_once('|') {
            Some((status, payload)) => Self {
                ok: status == "OK",
                payload: payload.to_string(),
            },
            None if body == "OK" => Self {
                ok: true,
                payload: String::new(),
            },
            None => Self {
                ok: false,
                payload: body.to_string(),
            },
        }
    }

    pub fn is_not_ready(&self) -> bool {
        self.payload == NOT_READY
    }

    /// The payload on success, the translated error otherwise.
    pub fn into_result(self) -> Result<String> {
        if self.ok {
            Ok(self.payload)
        } else {
            Err(remote_error(&self.payload))
        }
    }

    /// Like [`into_result`](Self::into_result), but a success without a
    /// payload is a [`TwoCaptchaError::Parse`] naming the missing `what`.
    pub fn into_required(self, what: &str) -> Result<String> {
        let payload = self.into_result()?;
        if payload.trim().is_empty() {
            return Err(TwoCaptchaError::Parse(format!("OK response without {}", what)));
        }
        Ok(payload)
    }
}

/// Post-process a solved payload into an [`Answer`].
///
/// `click:10/20/30` becomes `Answer::Clicks(vec![10, 20, 30])`; anything
/// without the click prefix is returned verbatim as text.
pub fn decode_message(message: &str) -> Result<Answer> {
    let Some((prefix, coordinates)) = message.split_once(':') else {
        return Ok(Answer::Text(message.to_string()));
    };

    if prefix != CLICK_PREFIX {
        return Ok(Answer::Text(message.to_string()));
    }

    let clicks = coordinates
        .split('/')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.trim().parse::<u32>().map_err(|_| {
                TwoCaptchaError::Parse(format!("invalid click coordinate '{}' in '{}'", token, message))
            })
        })
        .collect::<Result<Vec<u32>>>()?;

    Ok(Answer::Clicks(clicks))
}
