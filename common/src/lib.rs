//! Shared data types for the SlideGenius client.

pub mod form;
pub mod html;
pub mod types;

pub use form::{build_payload, FormField, FormPayload, FormValue};
pub use html::escape_html;
pub use types::{
    GeneratedFile, GenerationInputs, OutlinePreview, Provider, Slide, TemplateFile,
    OUTPUT_FILE_NAME, PREVIEW_DISPLAY_CAP, TEMPLATE_EXTENSIONS, UNTITLED,
};
