// src/compression/buffered.rs
use std::io::{self, Read, Write};

use async_trait::async_trait;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

use super::CompressionBackend;

/// In-memory gzip. Always available; used when streaming is absent or fails.
#[derive(Debug, Clone)]
pub struct BufferedBackend {
    level: Compression,
}

impl BufferedBackend {
    pub fn new(level: u32) -> Self {
        Self {
            level: Compression::new(level),
        }
    }
}

impl Default for BufferedBackend {
    fn default() -> Self {
        Self {
            level: Compression::default(),
        }
    }
}

/// Gzip `data` in one pass.
pub fn gzip(data: &[u8], level: Compression) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), level);
    encoder.write_all(data)?;
    encoder.finish()
}

/// Inflate a complete gzip member.
pub fn gunzip(blob: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(blob);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

#[async_trait]
impl CompressionBackend for BufferedBackend {
    fn name(&self) -> &'static str {
        "buffered"
    }

    async fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        gzip(data, self.level)
    }

    async fn decompress(&self, blob: &[u8]) -> io::Result<Vec<u8>> {
        gunzip(blob)
    }
}
