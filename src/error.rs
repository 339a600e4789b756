//! Error types with fix suggestions

use std::time::Duration;

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Failure kinds a conversion request can settle with.
///
/// A request settles exactly once: either with converted bytes or with one
/// of these. Codec errors are carried through unmodified — the codec is a
/// black box and its error content is opaque to this crate.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("conversion deadline of {}s exceeded", .deadline.as_secs())]
    DeadlineExceeded { deadline: Duration },

    #[error(transparent)]
    Codec(#[from] anyhow::Error),

    #[error("empty payload: nothing to convert")]
    EmptyPayload,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// True if this failure came from the deadline, not the codec
    pub fn is_deadline(&self) -> bool {
        matches!(self, ConvertError::DeadlineExceeded { .. })
    }
}

impl FixSuggestion for ConvertError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ConvertError::DeadlineExceeded { .. } => {
                Some("Large images can take a while; raise the deadline with --deadline-secs")
            }
            ConvertError::Codec(_) => {
                Some("Check the input is a valid image and the target format is supported")
            }
            ConvertError::EmptyPayload => Some("Pass a non-empty input file"),
            ConvertError::Io(_) => Some("Check file path and permissions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_message_names_the_budget() {
        let err = ConvertError::DeadlineExceeded {
            deadline: Duration::from_secs(10),
        };
        assert!(err.is_deadline());
        assert_eq!(err.to_string(), "conversion deadline of 10s exceeded");
    }

    #[test]
    fn codec_error_passes_through_verbatim() {
        let err = ConvertError::from(anyhow::anyhow!("bad header"));
        assert!(!err.is_deadline());
        assert_eq!(err.to_string(), "bad header");
    }

    #[test]
    fn every_variant_has_a_suggestion() {
        let variants = [
            ConvertError::DeadlineExceeded {
                deadline: Duration::from_secs(10),
            },
            ConvertError::Codec(anyhow::anyhow!("boom")),
            ConvertError::EmptyPayload,
            ConvertError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        ];
        for v in variants {
            assert!(v.fix_suggestion().is_some());
        }
    }
}
