// src/session/mod.rs
//! Prompt session: the single owner of the form state.
//!
//! A session is built explicitly and handed to collaborators by reference.
//! Every mutation goes through [`PromptSession::edit`]; once the batch is
//! applied the document is regenerated and subscribers are told about it.
//! Because regeneration needs `&mut self`, two regenerations of the same
//! session can never overlap.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use url::Url;

use crate::config::DownloadConfig;
use crate::document::{build, parse, DocumentFormatter};
use crate::error::Result;
use crate::record::PromptRecord;
use crate::shortlink::ShortlinkCodec;

/// Subscription identifier.
pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&str) + Send>;

pub struct PromptSession {
    record: PromptRecord,
    formatter: DocumentFormatter,
    generated: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
    download_name: String,
}

impl Default for PromptSession {
    fn default() -> Self {
        Self::new(DocumentFormatter::new())
    }
}

impl PromptSession {
    pub fn new(formatter: DocumentFormatter) -> Self {
        Self {
            record: PromptRecord::default(),
            formatter,
            generated: String::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            download_name: DownloadConfig::default().file_name,
        }
    }

    pub fn with_download_config(mut self, config: &DownloadConfig) -> Self {
        self.download_name = config.file_name.clone();
        self
    }

    pub fn record(&self) -> &PromptRecord {
        &self.record
    }

    /// The last successfully generated document, empty if none yet.
    pub fn generated_prompt(&self) -> &str {
        &self.generated
    }

    pub fn formatter(&self) -> &DocumentFormatter {
        &self.formatter
    }

    /// Apply one batch of field changes, then regenerate.
    ///
    /// Regeneration only happens once `role` or `goal` has content.
    pub fn edit<T>(&mut self, change: impl FnOnce(&mut PromptRecord) -> T) -> T {
        let out = change(&mut self.record);
        if !self.record.role.is_empty() || !self.record.goal.is_empty() {
            self.generate();
        } else {
            debug!("role and goal empty, skipping regeneration");
        }
        out
    }

    /// Build and format the current record.
    ///
    /// If formatting reports a failure the previous document is kept and
    /// subscribers are not notified.
    pub fn generate(&mut self) -> &str {
        let built = build(&self.record);
        let formatted = self.formatter.format(&built);
        if let Some(error) = self.formatter.last_error() {
            warn!(error = %error, "keeping previous document");
            return &self.generated;
        }

        self.generated = formatted;
        self.notify();
        &self.generated
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.generated);
        }
    }

    /// Register `listener` to receive every regenerated document.
    pub fn subscribe(&mut self, listener: impl FnMut(&str) + Send + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() < before
    }

    /// Reset the form and forget the generated document.
    ///
    /// Subscribers are told about the now empty document.
    pub fn clear_form(&mut self) {
        self.record.clear();
        self.generated.clear();
        self.notify();
    }

    /// Return to a freshly constructed state, dropping subscribers too.
    pub fn reset(&mut self) {
        self.listeners.clear();
        self.clear_form();
        self.next_subscription = 0;
        self.formatter = DocumentFormatter::new();
    }

    /// Replace the form with the contents of `document`.
    ///
    /// The document is always regenerated from the loaded form, even when
    /// role and goal are empty. On a parse error the current form and
    /// document are left untouched.
    pub fn load_document(&mut self, document: &str) -> Result<()> {
        self.record = parse(document)?;
        self.generate();
        Ok(())
    }

    /// Write the generated document into `dir`.
    ///
    /// Returns `None` without touching the filesystem when nothing has been
    /// generated yet.
    pub fn download_to(&self, dir: &Path) -> Result<Option<PathBuf>> {
        if self.generated.is_empty() {
            return Ok(None);
        }
        let path = dir.join(&self.download_name);
        std::fs::write(&path, &self.generated)?;
        info!(path = %path.display(), "saved prompt");
        Ok(Some(path))
    }

    /// Shortlink for the generated document, or `None` if there is none.
    pub async fn share(&self, codec: &ShortlinkCodec, location: &Url) -> Result<Option<String>> {
        if self.generated.is_empty() {
            return Ok(None);
        }
        codec.encode(&self.generated, location).await.map(Some)
    }

    /// Replace the form with the document carried by a shortlink.
    pub async fn load_shortlink(&mut self, codec: &ShortlinkCodec, url: &str) -> Result<()> {
        let document = codec.decode(url).await?;
        self.load_document(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::CompressionTransport;
    use crate::error::PromptError;
    use crate::record::OutputFormat;
    use std::sync::{Arc, Mutex};

    fn recorder(session: &mut PromptSession) -> (SubscriptionId, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = session.subscribe(move |doc| sink.lock().unwrap().push(doc.to_string()));
        (id, seen)
    }

    #[test]
    fn test_no_generation_without_role_or_goal() {
        let mut session = PromptSession::default();
        let (_, seen) = recorder(&mut session);

        session.edit(|r| r.constraints = "Be brief".to_string());
        assert_eq!(session.generated_prompt(), "");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_edit_regenerates_and_notifies() {
        let mut session = PromptSession::default();
        let (_, seen) = recorder(&mut session);

        session.edit(|r| {
            r.role = "Data Scientist".to_string();
            r.goal = "Explain p-values".to_string();
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], session.generated_prompt());
        assert!(seen[0].contains("<role>Data Scientist</role>"));
    }

    #[test]
    fn test_regeneration_reflects_latest_values() {
        let mut session = PromptSession::default();
        let (_, seen) = recorder(&mut session);

        session.edit(|r| r.goal = "First".to_string());
        let id = session.edit(|r| r.add_example_with("Example A"));
        session.edit(|r| r.update_example(id, "Example B"));
        session.edit(|r| r.output_format = OutputFormat::Html);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        let last = seen.last().unwrap();
        assert!(last.contains("<example>Example B</example>"));
        assert!(!last.contains("Example A"));
        assert!(last.contains("<outputFormat>HTML</outputFormat>"));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut session = PromptSession::default();
        let (id, seen) = recorder(&mut session);

        session.edit(|r| r.role = "A".to_string());
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.edit(|r| r.role = "B".to_string());

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(session.generated_prompt().contains("<role>B</role>"));
    }

    #[test]
    fn test_clear_form_and_reset() {
        let mut session = PromptSession::default();
        let (_, seen) = recorder(&mut session);
        session.edit(|r| r.role = "A".to_string());

        session.clear_form();
        assert_eq!(session.record(), &PromptRecord::default());
        assert_eq!(session.generated_prompt(), "");
        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 2);
            assert_eq!(seen[1], "");
        }

        session.reset();
        session.edit(|r| r.role = "B".to_string());
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_load_document_without_role_or_goal_replaces_output() {
        let mut session = PromptSession::default();
        let (_, seen) = recorder(&mut session);
        session.edit(|r| r.role = "Old role".to_string());

        session
            .load_document("<xml><constraints>New constraints</constraints></xml>")
            .unwrap();
        assert_eq!(session.record().role, "");
        assert!(!session.generated_prompt().contains("Old role"));
        assert!(session
            .generated_prompt()
            .contains("<constraints>New constraints</constraints>"));
        assert_eq!(
            seen.lock().unwrap().last().unwrap(),
            session.generated_prompt()
        );
    }

    #[test]
    fn test_load_document_failure_keeps_state() {
        let mut session = PromptSession::default();
        session.edit(|r| r.goal = "Keep me".to_string());
        let before = session.generated_prompt().to_string();

        let err = session.load_document("<xml><goal>Broken</goal>").unwrap_err();
        assert!(matches!(err, PromptError::Parse(_)));
        assert_eq!(session.generated_prompt(), before);
        assert_eq!(session.record().goal, "Keep me");
    }

    #[test]
    fn test_download_writes_prompt_xml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut session = PromptSession::default();
        assert!(session.download_to(tmp.path()).unwrap().is_none());

        session.edit(|r| r.goal = "Save me".to_string());
        let path = session.download_to(tmp.path()).unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "prompt.xml");
        let saved = std::fs::read_to_string(path).unwrap();
        assert_eq!(saved, session.generated_prompt());
    }

    #[test]
    fn test_download_name_from_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = DownloadConfig {
            file_name: "team-prompt.xml".to_string(),
        };
        let mut session = PromptSession::default().with_download_config(&config);
        session.edit(|r| r.role = "R".to_string());
        let path = session.download_to(tmp.path()).unwrap().unwrap();
        assert!(path.ends_with("team-prompt.xml"));
    }

    #[tokio::test]
    async fn test_share_and_load_shortlink() {
        let codec = ShortlinkCodec::new(CompressionTransport::buffered_only());
        let location = Url::parse("https://example.com/").unwrap();

        let mut source = PromptSession::default();
        assert!(source.share(&codec, &location).await.unwrap().is_none());
        source.edit(|r| {
            r.role = "Technical Writer".to_string();
            r.goal = "Document the API".to_string();
            r.add_example_with("GET /users");
        });
        let link = source.share(&codec, &location).await.unwrap().unwrap();

        let mut target = PromptSession::default();
        target.load_shortlink(&codec, &link).await.unwrap();
        assert_eq!(target.record().role, "Technical Writer");
        assert_eq!(target.record().example_contents(), vec!["GET /users"]);
        assert_eq!(target.generated_prompt(), source.generated_prompt());
    }

    #[tokio::test]
    async fn test_share_after_loading_publishes_loaded_form() {
        let codec = ShortlinkCodec::new(CompressionTransport::buffered_only());
        let location = Url::parse("https://example.com/").unwrap();

        let mut session = PromptSession::default();
        session.edit(|r| r.role = "Old role".to_string());
        session
            .load_document("<xml><constraints>New constraints</constraints></xml>")
            .unwrap();

        let link = session.share(&codec, &location).await.unwrap().unwrap();
        let shared = codec.decode(&link).await.unwrap();
        assert!(!shared.contains("Old role"));
        assert!(shared.contains("<constraints>New constraints</constraints>"));
    }
}
