//! Presentation generation workflow.

use slidegenius_client::{Endpoint, SlideService};
use slidegenius_common::{build_payload, GeneratedFile, GenerationInputs};

use crate::download::deliver;
use crate::error::{Result, WorkflowError};
use crate::inputs::collect_for_generate;
use crate::page::Page;
use crate::status::{
    BusyGuard, WorkflowState, DOWNLOAD_STARTED, GENERATING_LABEL, GENERATION_IN_PROGRESS,
};

pub const GENERATION_FAILED: &str = "Generation failed";

/// Generate a presentation and hand it to the page as a download.
///
/// The generate trigger is disabled for the duration of the request and
/// restored before this returns, on success and failure alike.
pub async fn run_generation<S, P>(
    service: &S,
    page: &mut P,
    state: &mut WorkflowState,
) -> Result<()>
where
    S: SlideService + ?Sized,
    P: Page + ?Sized,
{
    if !state.generate_control.enabled {
        tracing::warn!("generate ignored; a request is already in flight");
        return Err(WorkflowError::Busy);
    }

    let inputs = match collect_for_generate(page) {
        Ok(inputs) => inputs,
        Err(failure) => {
            tracing::info!(%failure, "generation not started");
            page.alert(&failure.to_string());
            return Err(failure.into());
        }
    };

    let Some(busy) = BusyGuard::acquire(&mut state.generate_control, GENERATING_LABEL) else {
        return Err(WorkflowError::Busy);
    };
    tracing::info!(provider = %inputs.provider, "requesting presentation");
    state.status.set(GENERATION_IN_PROGRESS);

    let outcome = produce_download(service, page, inputs).await;
    match &outcome {
        Ok(()) => state.status.set(DOWNLOAD_STARTED),
        Err(err) => {
            tracing::error!(%err, "generation failed");
            page.alert(&format!("{GENERATION_FAILED}: {err}"));
            state.status.clear();
        }
    }

    drop(busy);
    outcome
}

async fn produce_download<S, P>(service: &S, page: &mut P, inputs: GenerationInputs) -> Result<()>
where
    S: SlideService + ?Sized,
    P: Page + ?Sized,
{
    let payload = build_payload(inputs, true);
    let body = service.submit(Endpoint::Generate, payload).await?;
    let file = GeneratedFile::new(body);
    tracing::info!(bytes = file.bytes.len(), file_name = %file.file_name, "presentation received");
    deliver(page, file)?;
    Ok(())
}
