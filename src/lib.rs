pub mod cli;
pub mod compression;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod record;
pub mod session;
pub mod shortlink;

pub use compression::{Capabilities, CompressionBackend, CompressionTransport};
pub use config::SmithConfig;
pub use document::{build, normalize, parse, DocumentFormatter};
pub use error::{PromptError, Result};
pub use record::{Example, OutputFormat, PromptRecord};
pub use session::PromptSession;
pub use shortlink::ShortlinkCodec;
