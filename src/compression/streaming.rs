// src/compression/streaming.rs
//! Chunked gzip that yields to the scheduler between chunks.
//!
//! Output is pulled from a read-side coder as a finite, non-restartable
//! stream of byte buffers. Chunks are concatenated in read order; their
//! boundaries mean nothing and may split a multi-byte character.

use std::io::{self, Read};

use async_trait::async_trait;
use flate2::{read::GzDecoder, read::GzEncoder, Compression};
use futures::stream::{self, Stream, StreamExt};

use super::CompressionBackend;

pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct StreamingBackend {
    chunk_size: usize,
    level: Compression,
}

impl StreamingBackend {
    pub fn new(chunk_size: usize, level: u32) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            level: Compression::new(level),
        }
    }
}

impl Default for StreamingBackend {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            level: Compression::default(),
        }
    }
}

/// Stream the output of `reader` in buffers of at most `chunk_size` bytes.
pub fn read_chunks<R>(reader: R, chunk_size: usize) -> impl Stream<Item = io::Result<Vec<u8>>>
where
    R: Read + Send,
{
    stream::unfold(Some(reader), move |state| async move {
        let mut reader = match state {
            Some(reader) => reader,
            None => return None,
        };
        let mut buf = vec![0u8; chunk_size];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => return None,
                Ok(n) => {
                    buf.truncate(n);
                    tokio::task::yield_now().await;
                    return Some((Ok(buf), Some(reader)));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                // Ends the stream after reporting the error.
                Err(e) => return Some((Err(e), None)),
            }
        }
    })
}

/// Drain a chunk stream and join the chunks in order.
pub async fn collect_chunks<S>(chunks: S) -> io::Result<Vec<u8>>
where
    S: Stream<Item = io::Result<Vec<u8>>>,
{
    let mut chunks = Box::pin(chunks);
    let mut parts = Vec::new();
    while let Some(chunk) = chunks.next().await {
        parts.push(chunk?);
    }
    Ok(parts.concat())
}

#[async_trait]
impl CompressionBackend for StreamingBackend {
    fn name(&self) -> &'static str {
        "streaming"
    }

    async fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let encoder = GzEncoder::new(data, self.level);
        collect_chunks(read_chunks(encoder, self.chunk_size)).await
    }

    async fn decompress(&self, blob: &[u8]) -> io::Result<Vec<u8>> {
        let decoder = GzDecoder::new(blob);
        collect_chunks(read_chunks(decoder, self.chunk_size)).await
    }
}
