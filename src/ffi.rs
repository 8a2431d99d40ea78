//! C FFI bindings for two-captcha.
//!
//! Provides a simple blocking API for decoding captchas from C, Python, Go, etc.
//!
//! # Example (C)
//!
//! ```c
//! #include "two_captcha.h"
//!
//! int main() {
//!     char* result = twocaptcha_decode("api_key", "captcha.png", "file", 0, 0);
//!     if (result) {
//!         printf("Result: %s\n", result);
//!         twocaptcha_free_string(result);
//!     }
//!     return 0;
//! }
//! ```

use std::ffi::{c_char, CStr, CString};
use std::ptr;
use std::time::Duration;

use crate::error::ErrorKind;
use crate::loader::ImageSource;
use crate::{DecodeRequest, SolveResult, TwoCaptcha};

/// Convert Rust String to C string pointer.
fn string_to_ptr(s: String) -> *mut c_char {
    CString::new(s)
        .map(|cs| cs.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Convert C string to Rust String, returns None if null or invalid UTF-8.
unsafe fn ptr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Parse a source type name and its value into an image source.
fn parse_source(kind: &str, value: String) -> Option<ImageSource> {
    match kind.to_lowercase().as_str() {
        "base64" | "raw64" => Some(ImageSource::Base64(value)),
        "file" | "path" => Some(ImageSource::File(value.into())),
        "url" => Some(ImageSource::Url(value)),
        _ => None,
    }
}

fn failure(kind: ErrorKind, detail: impl Into<String>) -> SolveResult {
    SolveResult::Failed {
        kind,
        detail: detail.into(),
    }
}

fn result_to_ptr(result: &SolveResult) -> *mut c_char {
    let json = serde_json::to_string(result).unwrap_or_else(|e| {
        serde_json::json!({
            "status": "failed",
            "kind": "parse",
            "detail": e.to_string(),
        })
        .to_string()
    });
    string_to_ptr(json)
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Decode a captcha (blocking) and return the outcome as JSON.
///
/// # Parameters
///
/// - `key`: 2Captcha API key (required)
/// - `image`: base64 data, file path or URL, depending on `source_type` (required)
/// - `source_type`: "base64", "file" or "url" (required)
/// - `timeout_secs`: overall timeout, 0 for the default
/// - `pooling_secs`: poll interval, 0 for the default
///
/// # Returns
///
/// A JSON string such as
/// ```json
/// {"status": "solved", "id": "2122988149", "answer": {"type": "text", "value": "x7kq"}}
/// ```
/// or
/// ```json
/// {"status": "failed", "kind": "zero_balance", "detail": "..."}
/// ```
///
/// The caller must free the string with `twocaptcha_free_string`.
///
/// # Safety
///
/// - `key`, `image` and `source_type` must be NULL or valid null-terminated C strings
#[no_mangle]
pub unsafe extern "C" fn twocaptcha_decode(
    key: *const c_char,
    image: *const c_char,
    source_type: *const c_char,
    timeout_secs: u32,
    pooling_secs: u32,
) -> *mut c_char {
    let key = match ptr_to_string(key) {
        Some(s) if !s.is_empty() => s,
        _ => return result_to_ptr(&failure(ErrorKind::InvalidConfig, "key is required")),
    };

    let (image, source_type) = match (ptr_to_string(image), ptr_to_string(source_type)) {
        (Some(image), Some(source_type)) => (image, source_type),
        _ => {
            return result_to_ptr(&failure(
                ErrorKind::ArgumentError,
                "image and source_type are required",
            ))
        }
    };

    let source = match parse_source(&source_type, image) {
        Some(source) => source,
        None => {
            return result_to_ptr(&failure(
                ErrorKind::ArgumentError,
                format!(
                    "Invalid source_type '{}'. Valid values: base64, file, url",
                    source_type
                ),
            ))
        }
    };

    let runtime = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            return result_to_ptr(&failure(
                ErrorKind::Transport,
                format!("Failed to create runtime: {}", e),
            ))
        }
    };

    let result = runtime.block_on(async {
        let mut builder = TwoCaptcha::builder(key);
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs.into()));
        }
        if pooling_secs > 0 {
            builder = builder.pooling(Duration::from_secs(pooling_secs.into()));
        }

        match builder.build() {
            Ok(client) => client.decode(DecodeRequest::from(source)).await,
            Err(e) => e.into(),
        }
    });

    result_to_ptr(&result)
}

/// Fetch the account balance (blocking).
///
/// Returns 0 and writes the balance to `out` on success, or a non-zero code:
/// 1 = missing argument, 2 = runtime failure, 3 = request failed.
///
/// # Safety
///
/// - `key` must be a valid null-terminated C string
/// - `out` must be a valid pointer to a `double`
#[no_mangle]
pub unsafe extern "C" fn twocaptcha_balance(key: *const c_char, out: *mut f64) -> i32 {
    if out.is_null() {
        return 1;
    }
    let key = match ptr_to_string(key) {
        Some(s) if !s.is_empty() => s,
        _ => return 1,
    };

    let runtime = match runtime() {
        Ok(rt) => rt,
        Err(_) => return 2,
    };

    let balance = runtime.block_on(async {
        let client = TwoCaptcha::builder(key).build()?;
        client.balance().await
    });

    match balance {
        Ok(value) => {
            *out = value;
            0
        }
        Err(e) => {
            tracing::warn!("Balance request failed: {}", e);
            3
        }
    }
}

/// Free a string returned by two-captcha FFI functions.
///
/// # Safety
///
/// - `s` must be NULL or a valid pointer previously returned by two-captcha
/// - Each string must only be freed once
#[no_mangle]
pub unsafe extern "C" fn twocaptcha_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

/// Get the library version.
///
/// # Returns
///
/// A static string with the version number. Do NOT free this string.
#[no_mangle]
pub extern "C" fn twocaptcha_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
