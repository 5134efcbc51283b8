mod format;
mod suggestions;

pub use format::OutputFormat;
pub use suggestions::{CONSTRAINT_SUGGESTIONS, ROLE_SUGGESTIONS};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single worked example attached to a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub id: u64,
    pub content: String,
}

/// The form data for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecord {
    pub role: String,
    pub goal: String,
    pub constraints: String,
    pub output_format: OutputFormat,
    /// Kept in insertion order; ids are unique within the record.
    pub examples: Vec<Example>,
}

impl PromptRecord {
    pub fn new(role: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            ..Self::default()
        }
    }

    /// Append an empty example and return its id.
    pub fn add_example(&mut self) -> u64 {
        self.add_example_with(String::new())
    }

    /// Append an example with the given content and return its id.
    pub fn add_example_with(&mut self, content: impl Into<String>) -> u64 {
        let id = self.next_example_id();
        self.examples.push(Example {
            id,
            content: content.into(),
        });
        id
    }

    /// Remove the example with `id`. Returns false if no such example exists.
    pub fn remove_example(&mut self, id: u64) -> bool {
        match self.examples.iter().position(|ex| ex.id == id) {
            Some(index) => {
                self.examples.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the content of the example with `id`.
    pub fn update_example(&mut self, id: u64, content: impl Into<String>) -> bool {
        match self.examples.iter_mut().find(|ex| ex.id == id) {
            Some(example) => {
                example.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Example contents that survive serialization, in insertion order.
    pub fn non_blank_examples(&self) -> impl Iterator<Item = &str> {
        self.examples
            .iter()
            .map(|ex| ex.content.as_str())
            .filter(|content| !content.trim().is_empty())
    }

    pub fn example_contents(&self) -> Vec<&str> {
        self.examples.iter().map(|ex| ex.content.as_str()).collect()
    }

    /// Reset every field to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Ids are millisecond timestamps, bumped past the largest id in use so
    /// that examples added within the same millisecond stay distinct.
    fn next_example_id(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        match self.examples.iter().map(|ex| ex.id).max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        }
    }
}
