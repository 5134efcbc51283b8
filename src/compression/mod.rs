// src/compression/mod.rs
//! Gzip transport with two interchangeable backends.
//!
//! The streaming backend is preferred when the capability probe allows it.
//! Any failure there is retried once on the buffered backend, which is
//! always present. Both produce and accept plain gzip members, so a blob
//! written by one can be read by the other.

pub mod buffered;
pub mod streaming;

use std::io;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::CompressionConfig;
use crate::error::{PromptError, Result};

pub use buffered::BufferedBackend;
pub use streaming::{StreamingBackend, DEFAULT_CHUNK_SIZE};

/// Environment variable that disables the streaming backend when set to
/// anything other than `0` or `false`.
pub const NO_STREAMING_ENV: &str = "PROMPTSMITH_NO_STREAMING";

#[async_trait]
pub trait CompressionBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>>;

    async fn decompress(&self, blob: &[u8]) -> io::Result<Vec<u8>>;
}

/// What the runtime offers, decided once when the transport is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub streaming: bool,
}

impl Capabilities {
    pub fn probe(streaming_enabled: bool) -> Self {
        let flag = std::env::var(NO_STREAMING_ENV).ok();
        Self::detect(streaming_enabled, flag.as_deref())
    }

    fn detect(streaming_enabled: bool, no_streaming_flag: Option<&str>) -> Self {
        let disabled = match no_streaming_flag {
            Some(value) => !matches!(value.trim().to_lowercase().as_str(), "" | "0" | "false"),
            None => false,
        };
        Self {
            streaming: streaming_enabled && !disabled,
        }
    }
}

pub struct CompressionTransport {
    primary: Option<Box<dyn CompressionBackend>>,
    fallback: Box<dyn CompressionBackend>,
}

impl CompressionTransport {
    pub fn new(capabilities: Capabilities, chunk_size: usize, level: u32) -> Self {
        let primary: Option<Box<dyn CompressionBackend>> = if capabilities.streaming {
            Some(Box::new(StreamingBackend::new(chunk_size, level)))
        } else {
            None
        };
        Self {
            primary,
            fallback: Box::new(BufferedBackend::new(level)),
        }
    }

    pub fn from_config(config: &CompressionConfig) -> Self {
        Self::new(
            Capabilities::probe(config.streaming),
            config.chunk_size,
            config.level,
        )
    }

    /// Transport that never streams.
    pub fn buffered_only() -> Self {
        Self {
            primary: None,
            fallback: Box::new(BufferedBackend::default()),
        }
    }

    pub fn with_backends(
        primary: Option<Box<dyn CompressionBackend>>,
        fallback: Box<dyn CompressionBackend>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Backend names in the order they are tried.
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.primary
            .iter()
            .map(|b| b.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    /// UTF-8 encode and gzip `text`.
    pub async fn compress(&self, text: &str) -> Result<Vec<u8>> {
        let data = text.as_bytes();
        if let Some(primary) = &self.primary {
            match primary.compress(data).await {
                Ok(blob) => {
                    debug!(backend = primary.name(), input = data.len(), output = blob.len(), "compressed");
                    return Ok(blob);
                }
                Err(e) => warn!(backend = primary.name(), error = %e, "compression failed, retrying with fallback"),
            }
        }

        let blob = self
            .fallback
            .compress(data)
            .await
            .map_err(|e| PromptError::Compression(e.to_string()))?;
        debug!(backend = self.fallback.name(), input = data.len(), output = blob.len(), "compressed");
        Ok(blob)
    }

    /// Gunzip `blob` and decode it as UTF-8.
    pub async fn decompress(&self, blob: &[u8]) -> Result<String> {
        if let Some(primary) = &self.primary {
            match decompress_text(primary.as_ref(), blob).await {
                Ok(text) => return Ok(text),
                Err(e) => warn!(backend = primary.name(), error = %e, "decompression failed, retrying with fallback"),
            }
        }

        decompress_text(self.fallback.as_ref(), blob)
            .await
            .map_err(|e| PromptError::Decompression(e.to_string()))
    }
}

async fn decompress_text(backend: &dyn CompressionBackend, blob: &[u8]) -> io::Result<String> {
    let bytes = backend.decompress(blob).await?;
    debug!(backend = backend.name(), input = blob.len(), output = bytes.len(), "decompressed");
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
