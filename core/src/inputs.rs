use slidegenius_common::{GenerationInputs, Provider};

use crate::error::{MissingInput, ValidationFailure};
use crate::page::{Page, TextField};

/// Read inputs for an outline preview. The template is not required and not read.
pub fn collect_for_preview<P: Page + ?Sized>(
    page: &P,
) -> Result<GenerationInputs, ValidationFailure> {
    let (inputs, missing) = read_text_inputs(page);
    if missing.is_empty() {
        Ok(inputs)
    } else {
        Err(ValidationFailure { missing })
    }
}

/// Read inputs for presentation generation; a template must be selected.
pub fn collect_for_generate<P: Page + ?Sized>(
    page: &P,
) -> Result<GenerationInputs, ValidationFailure> {
    let (mut inputs, mut missing) = read_text_inputs(page);

    match page.selected_template() {
        Some(template) => {
            if !template.has_supported_extension() {
                tracing::warn!(
                    file_name = %template.file_name,
                    "template does not look like a .pptx/.potx file"
                );
            }
            inputs.template = Some(template);
        }
        None => missing.push(MissingInput::Template),
    }

    if missing.is_empty() {
        Ok(inputs)
    } else {
        Err(ValidationFailure { missing })
    }
}

fn read_text_inputs<P: Page + ?Sized>(page: &P) -> (GenerationInputs, Vec<MissingInput>) {
    let source_text = page.read_field(TextField::SourceText).trim().to_string();
    let guidance = page.read_field(TextField::Guidance).trim().to_string();
    let provider = Provider::from(page.read_field(TextField::Provider).as_str());
    let api_key = page.read_field(TextField::ApiKey).trim().to_string();

    let mut missing = Vec::new();
    if source_text.is_empty() {
        missing.push(MissingInput::SourceText);
    }
    if api_key.is_empty() {
        missing.push(MissingInput::ApiKey);
    }

    let inputs = GenerationInputs {
        source_text,
        guidance,
        provider,
        api_key,
        template: None,
    };
    (inputs, missing)
}
