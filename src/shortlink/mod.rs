// src/shortlink/mod.rs
//! Shortlinks: a whole prompt document packed into a URL fragment.
//!
//! `<origin><path>#prompt=<base64(gzip(document))>`
//!
//! The payload is only encoded, never encrypted or signed. Anyone holding
//! the URL can read the prompt; see [`SECURITY_WARNING`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info};
use url::{Position, Url};

use crate::compression::CompressionTransport;
use crate::error::{PromptError, Result};

/// Fragment key carrying the payload.
pub const PROMPT_KEY: &str = "prompt";

pub const SECURITY_WARNING: &str = "\u{26a0}\u{fe0f} Security Notice: This shortlink contains your prompt data encoded in the URL. While convenient for sharing, be aware that:\n\n\
\u{2022} The data is visible in the URL\n\
\u{2022} It may be logged by browsers, servers, and proxies\n\
\u{2022} Don't share sensitive information via shortlinks\n\
\u{2022} Consider using the download feature for private prompts";

pub struct ShortlinkCodec {
    transport: CompressionTransport,
}

impl ShortlinkCodec {
    pub fn new(transport: CompressionTransport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &CompressionTransport {
        &self.transport
    }

    /// Pack `document` into a shortlink rooted at `location`.
    ///
    /// Only the origin and path of `location` are kept; its query and
    /// fragment are replaced.
    pub async fn encode(&self, document: &str, location: &Url) -> Result<String> {
        let compressed = self
            .transport
            .compress(document)
            .await
            .map_err(PromptError::encoding)?;
        let encoded = STANDARD.encode(&compressed);
        let link = format!("{}#{}={}", base_location(location), PROMPT_KEY, encoded);
        info!(
            document = document.len(),
            compressed = compressed.len(),
            link = link.len(),
            "generated shortlink"
        );
        Ok(link)
    }

    /// Recover the document carried by `url`.
    pub async fn decode(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| PromptError::decoding(e.into()))?;
        let payload = parsed
            .fragment()
            .and_then(prompt_payload)
            .filter(|p| !p.is_empty())
            .ok_or(PromptError::MissingData)?;

        let compressed = STANDARD
            .decode(payload)
            .map_err(|e| PromptError::decoding(e.into()))?;
        debug!(payload = payload.len(), compressed = compressed.len(), "decoded shortlink payload");

        self.transport
            .decompress(&compressed)
            .await
            .map_err(PromptError::decoding)
    }
}

/// Origin followed by path, the part of a page location a shortlink keeps.
pub fn base_location(location: &Url) -> String {
    let origin = location.origin();
    if origin.is_tuple() {
        format!("{}{}", origin.ascii_serialization(), location.path())
    } else {
        location[..Position::AfterPath].to_string()
    }
}

/// True when the fragment of `current_url` carries a `prompt=` key.
pub fn has_shortlink(current_url: &str) -> bool {
    current_url
        .split_once('#')
        .map(|(_, fragment)| fragment.contains("prompt="))
        .unwrap_or(false)
}

/// The full URL when it carries a shortlink.
pub fn current_shortlink(current_url: &str) -> Option<String> {
    has_shortlink(current_url).then(|| current_url.to_string())
}

fn prompt_payload(fragment: &str) -> Option<&str> {
    fragment
        .split('&')
        .find_map(|pair| pair.strip_prefix(PROMPT_KEY)?.strip_prefix('='))
}
