//! Deadline-bounded conversion executor
//!
//! Races one codec call against a fixed deadline and guarantees the caller
//! exactly one settlement: converted bytes, the codec's own error carried
//! verbatim, or a deadline failure. On success a cooperative pause runs
//! before settlement so the host loop gets a breather after heavy work.
//!
//! The deadline timer is owned by [`tokio::time::timeout`] and dropped on
//! every exit path, so a late timeout can never fire after the request has
//! settled. The codec call itself has no cancellation contract: if the
//! deadline wins, the spawned call keeps running on the runtime and its
//! eventual result is discarded.

use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::breather::Breather;
use crate::codec::{Codec, ConversionRequest};
use crate::config::ConvertLimits;
use crate::error::ConvertError;

/// Executor wrapping a single codec behind a per-request deadline.
///
/// Requests share no state: each gets its own timer and buffer, so any
/// number of conversions may be in flight concurrently, each bounded
/// independently.
#[derive(Clone)]
pub struct ConversionExecutor {
    codec: Arc<dyn Codec>,
    limits: ConvertLimits,
    breather: Breather,
}

impl ConversionExecutor {
    /// Create an executor with the default timing budget
    pub fn new(codec: Arc<dyn Codec>) -> Self {
        Self::with_limits(codec, ConvertLimits::default())
    }

    /// Create an executor with an explicit timing budget
    pub fn with_limits(codec: Arc<dyn Codec>, limits: ConvertLimits) -> Self {
        Self {
            codec,
            breather: Breather::new(limits.yield_pause),
            limits,
        }
    }

    /// Name of the codec this executor drives
    pub fn codec_name(&self) -> &str {
        self.codec.name()
    }

    /// The timing budget applied to every request
    pub fn limits(&self) -> ConvertLimits {
        self.limits
    }

    /// Convert `payload` into `target_format`, bounded by the deadline.
    ///
    /// Settles exactly once:
    /// - `Ok(bytes)` — codec finished in time; delivered only after the
    ///   yield pause has elapsed.
    /// - `Err(Codec)` — the codec's error, unmodified, no pause.
    /// - `Err(DeadlineExceeded)` — the codec had not settled in time; the
    ///   in-flight call is abandoned and any later result it produces is
    ///   discarded.
    #[instrument(skip(self, payload), fields(codec = %self.codec.name(), format = %target_format))]
    pub async fn convert(
        &self,
        payload: impl Into<Vec<u8>>,
        target_format: &str,
    ) -> Result<Vec<u8>, ConvertError> {
        // Materialize the buffer up front so nothing past this point can
        // fail on payload access.
        let bytes = payload.into();
        if bytes.is_empty() {
            return Err(ConvertError::EmptyPayload);
        }
        let request = ConversionRequest::new(bytes, target_format);
        debug!(payload_len = request.bytes.len(), "starting conversion");

        let deadline = self.limits.deadline;
        let codec = Arc::clone(&self.codec);

        // Spawned, not awaited inline: dropping the JoinHandle on timeout
        // detaches the call instead of aborting it mid-write.
        let in_flight = tokio::spawn(async move { codec.convert(request).await });

        let settled = match timeout(deadline, in_flight).await {
            Err(_) => {
                warn!(
                    deadline_ms = deadline.as_millis() as u64,
                    "deadline elapsed, abandoning codec call"
                );
                return Err(ConvertError::DeadlineExceeded { deadline });
            }
            // A panic inside the codec surfaces as a codec failure.
            Ok(joined) => joined.map_err(|e| ConvertError::Codec(anyhow::Error::new(e)))?,
        };

        // Timer already dropped here: failure or success, no late timeout.
        let converted = settled?;

        debug!(output_len = converted.len(), "conversion done, yielding to host");
        self.breather.pause().await;
        Ok(converted)
    }
}
