// src/record/format.rs
use serde::{Deserialize, Serialize};

/// Requested output syntax for the model's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "XML")]
    Xml,
    #[serde(rename = "HTML")]
    Html,
    Markdown,
    Custom,
}

impl OutputFormat {
    /// All options, in the order the form offers them.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Json,
        OutputFormat::Xml,
        OutputFormat::Html,
        OutputFormat::Markdown,
        OutputFormat::Custom,
    ];

    /// Map free text from a document onto a format.
    ///
    /// Blank text means the field was never filled in and yields the default;
    /// anything unrecognised is treated as `Custom`.
    pub fn from_document_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return OutputFormat::default();
        }
        trimmed.parse().unwrap_or(OutputFormat::Custom)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Xml => write!(f, "XML"),
            OutputFormat::Html => write!(f, "HTML"),
            OutputFormat::Markdown => write!(f, "Markdown"),
            OutputFormat::Custom => write!(f, "Custom"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            "html" => Ok(OutputFormat::Html),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "custom" => Ok(OutputFormat::Custom),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}
