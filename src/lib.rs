//! Darkroom - deadline-bounded image conversion core

pub mod breather;
pub mod codec;
pub mod config;
pub mod error;
pub mod task_executor;

pub use breather::Breather;
pub use codec::{create_codec, Codec, ConversionRequest, MagickCodec, MockBehavior, MockCodec};
pub use config::ConvertLimits;
pub use error::{ConvertError, FixSuggestion};
pub use task_executor::ConversionExecutor;
