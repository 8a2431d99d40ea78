//! # two-captcha
//!
//! An async Rust client for the 2Captcha image captcha solving service.
//!
//! ## Features
//!
//! - **Job Lifecycle**: Submits an image, polls until a worker answers, and
//!   enforces an overall timeout.
//! - **Typed Errors**: Every error token the service sends maps to an
//!   [`ErrorKind`]; unknown tokens are reported, never swallowed.
//! - **Fail-soft or Fail-fast**: [`TwoCaptcha::decode`] returns a
//!   [`SolveResult`], [`TwoCaptcha::try_decode`] propagates errors.
//! - **Cancellation**: Any decode or resolve can be aborted with a
//!   `CancellationToken`.
//! - **Pluggable Transport**: HTTP by default (`rquest`, with proxy support),
//!   or any [`Transport`] implementation.
//!
//! ## Quick Start
//!
//! ```ignore
//! use two_captcha::{DecodeRequest, SolveResult, TwoCaptcha};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TwoCaptcha::builder("your_api_key").build()?;
//!
//!     match client.decode(DecodeRequest::new().file("captcha.png")).await {
//!         SolveResult::Solved(captcha) => println!("{}: {:?}", captcha.id, captcha.answer),
//!         SolveResult::Failed { kind, detail } => println!("{}: {}", kind, detail),
//!         SolveResult::Reported => unreachable!(),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Hints
//!
//! ```ignore
//! use two_captcha::{CharacterClass, Hints, TwoCaptcha};
//! use std::time::Duration;
//!
//! let client = TwoCaptcha::builder("your_api_key")
//!     .timeout(Duration::from_secs(120))
//!     .pooling(Duration::from_secs(3))
//!     .hints(Hints {
//!         numeric: Some(CharacterClass::NumbersOnly),
//!         min_len: Some(4),
//!         max_len: Some(6),
//!         ..Default::default()
//!     })
//!     .build()?;
//! ```
//!
//! ## Timeout Semantics
//!
//! The deadline is checked after each poll interval, so a job that never
//! becomes ready fails after more than `timeout` and no later than
//! `timeout + pooling`.

pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod protocol;
pub mod transport;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-exports for convenience
pub use client::{DecodeRequest, TwoCaptcha, TwoCaptchaBuilder};
pub use config::ClientConfig;
pub use error::{ErrorKind, Result, TwoCaptchaError};
pub use loader::ImageSource;
pub use models::{Answer, Captcha, CharacterClass, Hints, Job, Language, SolveResult};
pub use transport::{Endpoint, HttpTransport, Transport};
pub use tokio_util::sync::CancellationToken;
