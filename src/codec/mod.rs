//! # Codec Abstraction Layer
//!
//! Trait and implementations for image-format codecs.
//!
//! The codec is treated as a black box: it takes raw image bytes plus a
//! target format identifier and returns converted bytes, with unbounded
//! running time and an implementation-defined error. No cancellation API
//! is assumed — once a codec call starts, it runs to completion whether or
//! not anyone is still waiting for the result.
//!
//! - [`Codec`] - core trait invoked by the executor
//! - [`MagickCodec`] - production codec using the ImageMagick CLI
//! - [`MockCodec`] - test codec with scripted behaviors
//!
//! Use [`create_codec`] to instantiate a codec by name:
//!
//! ```rust
//! use darkroom::codec::create_codec;
//!
//! assert!(create_codec("magick").is_ok());
//! assert!(create_codec("mock").is_ok());
//! assert!(create_codec("hypothetical").is_err());
//! ```

mod magick;
mod mock;

pub use magick::MagickCodec;
pub use mock::{MockBehavior, MockCodec};

use anyhow::Result;
use async_trait::async_trait;

/// One conversion request: raw bytes plus the format to convert into.
///
/// Immutable once built; the caller hands ownership to the executor and
/// gets it back only as the settled outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Raw image bytes, fully materialized up front
    pub bytes: Vec<u8>,

    /// Target format identifier (e.g. "jpeg", "png")
    pub format: String,
}

impl ConversionRequest {
    pub fn new(bytes: impl Into<Vec<u8>>, format: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            format: format.into(),
        }
    }
}

/// Core trait that all codecs must implement
///
/// All methods are async; `convert` may take arbitrarily long and the
/// executor is responsible for bounding it. Implementations must be
/// `Send + Sync` so a call can be spawned onto the runtime and abandoned
/// if the deadline wins.
#[async_trait]
pub trait Codec: Send + Sync + std::fmt::Debug {
    /// Returns the codec name (e.g. "magick", "mock")
    fn name(&self) -> &str;

    /// Check if this codec is usable (e.g. CLI installed)
    fn is_available(&self) -> bool {
        true
    }

    /// Convert the request's bytes into the target format.
    ///
    /// Errors are implementation-defined and forwarded to the caller
    /// unmodified; this crate never translates or retries them.
    async fn convert(&self, request: ConversionRequest) -> Result<Vec<u8>>;
}

/// Create a codec instance by name
///
/// | Name | Description | Requires |
/// |------|-------------|----------|
/// | `magick` | ImageMagick CLI | `magick` installed |
/// | `mock` | Testing | Nothing |
pub fn create_codec(name: &str) -> Result<Box<dyn Codec>> {
    match name.to_lowercase().as_str() {
        "magick" => Ok(Box::new(MagickCodec::new())),
        "mock" => Ok(Box::new(MockCodec::new())),
        _ => anyhow::bail!("Unknown codec: '{}'. Available: magick, mock", name),
    }
}
