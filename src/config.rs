//! Timing limits for conversion requests
//!
//! The two constants that govern the executor: how long a codec call may
//! run before the request is declared timed out, and how long the host
//! loop gets to breathe after a successful conversion. Both are injectable
//! so tests can shrink them or run under tokio's paused clock.

use std::time::Duration;

/// Default deadline for one codec call (10 seconds)
const DEFAULT_DEADLINE: Duration = Duration::from_millis(10_000);
/// Default cooperative pause after a successful conversion (1 second)
const DEFAULT_YIELD_PAUSE: Duration = Duration::from_millis(1_000);

/// Per-request timing budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertLimits {
    /// Hard deadline for the codec call, fixed at request start
    pub deadline: Duration,

    /// Pause inserted between codec success and settlement
    pub yield_pause: Duration,
}

impl Default for ConvertLimits {
    fn default() -> Self {
        Self {
            deadline: DEFAULT_DEADLINE,
            yield_pause: DEFAULT_YIELD_PAUSE,
        }
    }
}

impl ConvertLimits {
    /// Limits suitable for testing (short real-time waits)
    pub fn testing() -> Self {
        Self {
            deadline: Duration::from_millis(200),
            yield_pause: Duration::from_millis(10),
        }
    }

    /// Override the codec deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Override the post-success pause
    pub fn with_yield_pause(mut self, yield_pause: Duration) -> Self {
        self.yield_pause = yield_pause;
        self
    }
}
