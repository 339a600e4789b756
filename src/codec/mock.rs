//! Mock codec for testing
//!
//! Returns scripted outcomes without touching a real converter. Behaviors
//! are consumed FIFO, so a test can line up "reply late, then fail, then
//! stall" and drive the executor through every settlement path.

use super::{Codec, ConversionRequest};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// One scripted codec outcome
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Resolve with these bytes after the given delay
    Reply { bytes: Vec<u8>, after: Duration },
    /// Fail with this message after the given delay
    Fail { message: String, after: Duration },
    /// Never settle (the codec that hangs forever)
    Stall,
}

/// Mock codec that replays scripted behaviors
///
/// Clones share the behavior queue and request log, so a test can keep one
/// handle for assertions while the executor owns another.
#[derive(Debug, Clone)]
pub struct MockCodec {
    /// Queue of behaviors to replay (FIFO)
    behaviors: Arc<Mutex<Vec<MockBehavior>>>,
    /// Default reply when the queue is empty
    default_output: Vec<u8>,
    /// Track all requests made (for assertions)
    requests: Arc<Mutex<Vec<ConversionRequest>>>,
}

impl MockCodec {
    /// Create a mock that replies instantly with a fixed payload
    pub fn new() -> Self {
        Self {
            behaviors: Arc::new(Mutex::new(vec![])),
            default_output: b"mock converted bytes".to_vec(),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Create with a queue of behaviors
    pub fn with_behaviors(behaviors: Vec<MockBehavior>) -> Self {
        Self {
            behaviors: Arc::new(Mutex::new(behaviors)),
            ..Self::new()
        }
    }

    /// Set the default reply used when the queue is empty
    pub fn with_default(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.default_output = bytes.into();
        self
    }

    /// Queue a delayed successful reply
    pub fn queue_reply(&self, bytes: impl Into<Vec<u8>>, after: Duration) {
        self.behaviors.lock().unwrap().push(MockBehavior::Reply {
            bytes: bytes.into(),
            after,
        });
    }

    /// Queue a delayed failure
    pub fn queue_failure(&self, message: impl Into<String>, after: Duration) {
        self.behaviors.lock().unwrap().push(MockBehavior::Fail {
            message: message.into(),
            after,
        });
    }

    /// Queue a call that never settles
    pub fn queue_stall(&self) {
        self.behaviors.lock().unwrap().push(MockBehavior::Stall);
    }

    /// Get all requests made to this codec
    pub fn requests(&self) -> Vec<ConversionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the last request made
    pub fn last_request(&self) -> Option<ConversionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Codec for MockCodec {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, request: ConversionRequest) -> Result<Vec<u8>> {
        // Record the request
        self.requests.lock().unwrap().push(request);

        // Take the next behavior, or fall back to the instant default
        let behavior = {
            let mut queue = self.behaviors.lock().unwrap();
            if queue.is_empty() {
                MockBehavior::Reply {
                    bytes: self.default_output.clone(),
                    after: Duration::ZERO,
                }
            } else {
                queue.remove(0)
            }
        };

        match behavior {
            MockBehavior::Reply { bytes, after } => {
                sleep(after).await;
                Ok(bytes)
            }
            MockBehavior::Fail { message, after } => {
                sleep(after).await;
                Err(anyhow::anyhow!(message))
            }
            MockBehavior::Stall => futures::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_reply_when_queue_empty() {
        let codec = MockCodec::new().with_default(b"abc".to_vec());
        let out = codec
            .convert(ConversionRequest::new(vec![1], "png"))
            .await
            .unwrap();
        assert_eq!(out, b"abc");
    }

    #[tokio::test(start_paused = true)]
    async fn behaviors_replay_in_order() {
        let codec = MockCodec::with_behaviors(vec![
            MockBehavior::Reply {
                bytes: vec![1],
                after: Duration::from_millis(5),
            },
            MockBehavior::Fail {
                message: "bad header".into(),
                after: Duration::ZERO,
            },
        ]);

        let first = codec
            .convert(ConversionRequest::new(vec![0], "png"))
            .await
            .unwrap();
        assert_eq!(first, vec![1]);

        let second = codec
            .convert(ConversionRequest::new(vec![0], "png"))
            .await
            .unwrap_err();
        assert_eq!(second.to_string(), "bad header");
    }

    #[tokio::test]
    async fn records_requests() {
        let codec = MockCodec::new();
        codec
            .convert(ConversionRequest::new(vec![0xFF], "jpeg"))
            .await
            .unwrap();
        codec
            .convert(ConversionRequest::new(vec![0xD8], "webp"))
            .await
            .unwrap();

        let requests = codec.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].format, "jpeg");
        assert_eq!(codec.last_request().unwrap().format, "webp");
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_call_never_settles() {
        let codec = MockCodec::new();
        codec.queue_stall();

        let call = codec.convert(ConversionRequest::new(vec![1], "png"));
        tokio::select! {
            _ = call => panic!("stall settled"),
            _ = sleep(Duration::from_secs(3600)) => {}
        }
    }
}
