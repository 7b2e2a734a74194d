//! The interface the workflows read from and write to.

use slidegenius_common::{GeneratedFile, TemplateFile};
use std::io;

/// Text inputs exposed by the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    SourceText,
    Guidance,
    Provider,
    ApiKey,
}

/// Pre-existing interface handles: form inputs, the alert channel, the
/// preview container and the download mechanism.
///
/// The status indicator and generate trigger are not part of this trait;
/// they live in [`crate::status::WorkflowState`].
pub trait Page {
    /// Transient reference to a staged download.
    type Staged;

    /// Current raw value of a text input, untrimmed.
    fn read_field(&self, field: TextField) -> String;

    fn selected_template(&self) -> Option<TemplateFile>;

    /// Blocking, user-visible notice.
    fn alert(&mut self, message: &str);

    fn clear_preview(&mut self);

    /// Append one rendered, already-escaped HTML entry.
    fn append_preview_entry(&mut self, html: String);

    /// Create a transient reference to the generated bytes.
    fn stage_download(&mut self, file: GeneratedFile) -> io::Result<Self::Staged>;

    /// One-shot save of the staged bytes under `file_name`.
    fn trigger_download(&mut self, staged: &Self::Staged, file_name: &str) -> io::Result<()>;

    /// Drop the transient reference. Called exactly once per staged download.
    fn release_download(&mut self, staged: Self::Staged);
}
