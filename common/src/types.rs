use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Filename the generated presentation is delivered under.
pub const OUTPUT_FILE_NAME: &str = "SlideGenius_Output.pptx";

/// Only this many slides are rendered into a preview. The reported slide
/// count always reflects the full response.
pub const PREVIEW_DISPLAY_CAP: usize = 50;

/// Placeholder shown for slides the service returned without a title.
pub const UNTITLED: &str = "Untitled";

/// Template extensions the service accepts.
pub const TEMPLATE_EXTENSIONS: [&str; 2] = [".pptx", ".potx"];

/// LLM provider selected for outline generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    OpenAi,
    Other(String),
}

impl Provider {
    pub fn as_str(&self) -> &str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Other(id) => id.as_str(),
        }
    }
}

impl From<&str> for Provider {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("openai") {
            Provider::OpenAi
        } else {
            Provider::Other(value.to_string())
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-selected template file.
#[derive(Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl TemplateFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Whether the file name carries an extension the service accepts.
    pub fn has_supported_extension(&self) -> bool {
        let lower = self.file_name.to_ascii_lowercase();
        TEMPLATE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }
}

impl fmt::Debug for TemplateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Inputs for one workflow invocation, read fresh from the interface.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationInputs {
    pub source_text: String,
    pub guidance: String,
    pub provider: Provider,
    pub api_key: String,
    pub template: Option<TemplateFile>,
}

impl fmt::Debug for GenerationInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationInputs")
            .field("source_text_len", &self.source_text.len())
            .field("guidance", &self.guidance)
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("template", &self.template)
            .finish()
    }
}

/// Outline returned by the preview endpoint.
///
/// The service forwards model output without validating it, so every field
/// is read leniently: `null` or a mistyped value falls back to the default
/// documented on the field, and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlinePreview {
    /// Missing or `null` means no slides.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slides: Vec<Slide>,
}

impl OutlinePreview {
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Slides that fit under the display cap.
    pub fn displayed(&self) -> &[Slide] {
        let end = self.slides.len().min(PREVIEW_DISPLAY_CAP);
        &self.slides[..end]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Missing or non-text renders as [`UNTITLED`].
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Missing or `null` means an empty list.
    #[serde(default, deserialize_with = "lenient_bullets")]
    pub bullets: Vec<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `None` for `null` and for values of the wrong type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Bullet list that tolerates `null` entries and scalar bullets.
fn lenient_bullets<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
        .collect())
}

impl Slide {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED,
        }
    }
}

/// Binary presentation returned by the generate endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl GeneratedFile {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            file_name: OUTPUT_FILE_NAME.to_string(),
            bytes,
        }
    }
}

impl fmt::Debug for GeneratedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
