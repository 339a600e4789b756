//! ImageMagick codec using the `magick` CLI
//!
//! Converts via piped stdio: bytes in on stdin, converted bytes out on
//! stdout, target format selected with the `<format>:-` output specifier.

use super::{Codec, ConversionRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use wait_timeout::ChildExt;

/// Timeout for CLI availability check
const CLI_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest target-format identifier we will pass to the CLI
const MAX_FORMAT_LEN: usize = 16;

/// Codec backed by the ImageMagick CLI
#[derive(Debug)]
pub struct MagickCodec {
    /// Path to the magick binary
    cli_path: String,
}

impl MagickCodec {
    pub fn new() -> Self {
        Self {
            cli_path: "magick".to_string(),
        }
    }

    /// Set a custom CLI path
    pub fn with_cli_path(mut self, path: impl Into<String>) -> Self {
        self.cli_path = path.into();
        self
    }

    /// Check if the magick CLI is installed (with 5s timeout)
    fn check_cli(&self) -> bool {
        std::process::Command::new(&self.cli_path)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .and_then(|mut child| match child.wait_timeout(CLI_CHECK_TIMEOUT)? {
                Some(status) => Ok(status.success()),
                None => {
                    let _ = child.kill();
                    Ok(false)
                }
            })
            .unwrap_or(false)
    }
}

impl Default for MagickCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// The format identifier becomes a subprocess argument; restrict it to a
/// short lowercase-alphanumeric token ("jpeg", "png", "webp", ...).
fn validate_format(format: &str) -> Result<()> {
    let ok = !format.is_empty()
        && format.len() <= MAX_FORMAT_LEN
        && format
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !ok {
        anyhow::bail!("invalid target format identifier: '{}'", format);
    }
    Ok(())
}

#[async_trait]
impl Codec for MagickCodec {
    fn name(&self) -> &str {
        "magick"
    }

    fn is_available(&self) -> bool {
        self.check_cli()
    }

    async fn convert(&self, request: ConversionRequest) -> Result<Vec<u8>> {
        validate_format(&request.format)?;

        let mut child = tokio::process::Command::new(&self.cli_path)
            .arg("-")
            .arg(format!("{}:-", request.format))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn magick CLI. Is ImageMagick installed?")?;

        let mut stdin = child.stdin.take().context("magick stdin unavailable")?;

        // Feed stdin while draining stdout, or a large image can deadlock
        // both pipes.
        let feed = async {
            stdin.write_all(&request.bytes).await?;
            stdin.shutdown().await?;
            drop(stdin);
            Ok::<_, std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        fed.context("failed to feed image bytes to magick")?;
        let output = output.context("failed to collect magick output")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("magick exited with {}: {}", output.status, stderr.trim());
        }

        Ok(output.stdout)
    }
}
