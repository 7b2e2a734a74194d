//! Multipart payload assembly.
//!
//! The payload is kept as plain data so it can be inspected before the HTTP
//! layer turns it into a wire form.

use crate::types::GenerationInputs;

pub const FIELD_TEXT: &str = "text";
pub const FIELD_GUIDANCE: &str = "guidance";
pub const FIELD_PROVIDER: &str = "provider";
pub const FIELD_API_KEY: &str = "api_key";
pub const FIELD_TEMPLATE: &str = "template";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File { file_name: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub value: FormValue,
}

/// Ordered set of named multipart fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<FormField>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push(FormField {
            name,
            value: FormValue::Text(value.into()),
        });
        self
    }

    pub fn file(mut self, name: &'static str, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.fields.push(FormField {
            name,
            value: FormValue::File {
                file_name: file_name.into(),
                bytes,
            },
        });
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn into_fields(self) -> Vec<FormField> {
        self.fields
    }
}

/// Build the request payload for either workflow.
///
/// The template is only attached when `include_template` is set and the
/// inputs carry one.
pub fn build_payload(inputs: GenerationInputs, include_template: bool) -> FormPayload {
    let GenerationInputs {
        source_text,
        guidance,
        provider,
        api_key,
        template,
    } = inputs;

    let payload = FormPayload::new()
        .text(FIELD_TEXT, source_text)
        .text(FIELD_GUIDANCE, guidance)
        .text(FIELD_PROVIDER, provider.as_str())
        .text(FIELD_API_KEY, api_key);

    match template {
        Some(template) if include_template => {
            payload.file(FIELD_TEMPLATE, template.file_name, template.bytes)
        }
        _ => payload,
    }
}
