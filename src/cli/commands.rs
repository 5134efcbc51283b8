use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::record::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "promptsmith")]
#[command(version, about = "Build structured XML prompts and share them as shortlinks")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file (defaults to ./promptsmith.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a prompt document from form fields
    Build {
        /// Role the model should take on
        #[arg(long, default_value = "")]
        role: String,

        /// What the prompt should achieve
        #[arg(long, default_value = "")]
        goal: String,

        /// Constraints on the answer
        #[arg(long, default_value = "")]
        constraints: String,

        /// Output format (JSON, XML, HTML, Markdown, Custom)
        #[arg(long, short = 'f', default_value = "JSON")]
        format: OutputFormat,

        /// Example content (can be specified multiple times)
        #[arg(long = "example", short = 'x')]
        examples: Vec<String>,

        /// Output the record as JSON instead of the document
        #[arg(long)]
        json: bool,
    },

    /// Parse a prompt document back into its fields
    Parse {
        /// Document to read (stdin when omitted)
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a document's layout
    Format {
        /// Document to read (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Pack a document into a shortlink
    Share {
        /// Document to read (stdin when omitted)
        file: Option<PathBuf>,

        /// Page location to build the link on (overrides config)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Recover the document from a shortlink
    Open {
        /// Shortlink URL
        url: String,

        /// Output the parsed record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Exit successfully only if the URL carries a shortlink
    Check {
        /// URL to inspect
        url: String,
    },

    /// Save a normalized document as prompt.xml
    Download {
        /// Document to read (stdin when omitted)
        file: Option<PathBuf>,

        /// Directory to write into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// List output formats and suggested roles and constraints
    Suggestions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
