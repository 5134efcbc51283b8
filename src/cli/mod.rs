mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_build, handle_check, handle_download, handle_format, handle_open, handle_parse,
    handle_share, handle_suggestions,
};
