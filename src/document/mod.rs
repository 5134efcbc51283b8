// src/document/mod.rs
//! Prompt document codec.
//!
//! Converts a [`PromptRecord`] to the shallow markup document and back:
//!
//! ```text
//! <xml>
//!   <role>...</role>
//!   <goal>...</goal>
//!   <constraints>...</constraints>
//!   <outputFormat>JSON</outputFormat>
//!   <examples>
//!     <example>...</example>
//!   </examples>
//! </xml>
//! ```
//!
//! Only the fixed two-level shape is interpreted. Deeper nesting is checked
//! for well-formedness but not given any meaning.

mod formatter;
mod reader;
mod writer;

pub use formatter::DocumentFormatter;

use tracing::debug;

use crate::error::Result;
use crate::record::{Example, OutputFormat, PromptRecord};

use reader::{read_document, Element};
use writer::MarkupWriter;

/// Name of the root element written by [`build`].
pub const ROOT_ELEMENT: &str = "xml";

pub mod fields {
    pub const ROLE: &str = "role";
    pub const GOAL: &str = "goal";
    pub const CONSTRAINTS: &str = "constraints";
    pub const OUTPUT_FORMAT: &str = "outputFormat";
    pub const EXAMPLES: &str = "examples";
    pub const EXAMPLE: &str = "example";
}

/// Serialize a record.
///
/// Scalar fields are always written, even when empty. The `examples`
/// container is written only when at least one example has non-blank
/// content; blank examples are dropped.
pub fn build(record: &PromptRecord) -> String {
    let mut writer = MarkupWriter::new();
    writer.open(ROOT_ELEMENT);
    writer.leaf(fields::ROLE, &record.role);
    writer.leaf(fields::GOAL, &record.goal);
    writer.leaf(fields::CONSTRAINTS, &record.constraints);
    writer.leaf(fields::OUTPUT_FORMAT, &record.output_format.to_string());

    let mut examples = record.non_blank_examples().peekable();
    if examples.peek().is_some() {
        writer.open(fields::EXAMPLES);
        for example in examples {
            writer.leaf(fields::EXAMPLE, example);
        }
        writer.close(fields::EXAMPLES);
    }

    writer.close(ROOT_ELEMENT);
    writer.finish()
}

/// Parse a document back into a record.
///
/// Missing fields take their defaults. When a field appears more than once
/// only the first occurrence is read. Parsed examples get ids `1..=n` in
/// document order.
pub fn parse(document: &str) -> Result<PromptRecord> {
    let root = read_document(document)?;
    debug!(root = %root.name, fields = root.children.len(), "parsed document");

    let examples = root
        .child(fields::EXAMPLES)
        .map(|el| el.values())
        .unwrap_or_default()
        .into_iter()
        .filter(|content| !content.trim().is_empty())
        .zip(1u64..)
        .map(|(content, id)| Example {
            id,
            content: content.to_string(),
        })
        .collect();

    Ok(PromptRecord {
        role: scalar(&root, fields::ROLE),
        goal: scalar(&root, fields::GOAL),
        constraints: scalar(&root, fields::CONSTRAINTS),
        output_format: OutputFormat::from_document_text(&scalar(&root, fields::OUTPUT_FORMAT)),
        examples,
    })
}

/// Parse then rebuild, failing if the document does not parse.
pub fn normalize(document: &str) -> Result<String> {
    parse(document).map(|record| build(&record))
}

fn scalar(root: &Element, name: &str) -> String {
    root.child(name)
        .and_then(|el| el.values().first().map(|v| v.to_string()))
        .unwrap_or_default()
}
