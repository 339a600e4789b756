//! Cooperative pause after heavy work
//!
//! A conversion can pin the CPU and produce a large result; handing that
//! result straight back would let one request starve the host loop. The
//! breather inserts a fixed window between codec success and settlement so
//! pending work (rendering, input) gets serviced first. It is a scheduling
//! courtesy with no failure mode.

use std::time::Duration;

use tokio::time::sleep;

/// Fixed-length yield window
#[derive(Debug, Clone, Copy)]
pub struct Breather {
    window: Duration,
}

impl Breather {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// The configured pause length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Wait out the yield window. Takes no input and cannot fail.
    pub async fn pause(&self) {
        sleep(self.window).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn pause_waits_the_full_window() {
        let breather = Breather::new(Duration::from_millis(1_000));
        let start = Instant::now();
        breather.pause().await;
        assert_eq!(start.elapsed(), Duration::from_millis(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_window_returns_immediately() {
        let breather = Breather::new(Duration::ZERO);
        let start = Instant::now();
        breather.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
