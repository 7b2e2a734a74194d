//! Outline preview workflow.

use slidegenius_client::{Endpoint, RequestFailure, SlideService};
use slidegenius_common::{build_payload, GenerationInputs, OutlinePreview};

use crate::error::{Result, WorkflowError};
use crate::inputs::collect_for_preview;
use crate::page::Page;
use crate::render::render_outline;
use crate::status::{outline_summary, StatusReporter, OUTLINE_IN_PROGRESS};

pub const PREVIEW_FAILED: &str = "Preview failed";

/// Fetch an outline and render it into the page's preview container.
///
/// Failures are alerted and leave the status empty before being returned.
/// A validation failure never touches the status.
pub async fn run_outline<S, P>(
    service: &S,
    page: &mut P,
    status: &mut StatusReporter,
) -> Result<OutlinePreview>
where
    S: SlideService + ?Sized,
    P: Page + ?Sized,
{
    let inputs = match collect_for_preview(page) {
        Ok(inputs) => inputs,
        Err(failure) => {
            tracing::info!(%failure, "preview not started");
            page.alert(&failure.to_string());
            return Err(failure.into());
        }
    };

    tracing::info!(provider = %inputs.provider, "requesting outline");
    status.set(OUTLINE_IN_PROGRESS);

    match fetch_outline(service, inputs).await {
        Ok(outline) => {
            let shown = render_outline(page, &outline);
            tracing::info!(total = outline.slides.len(), shown, "outline rendered");
            status.set(outline_summary(outline.slides.len()));
            Ok(outline)
        }
        Err(failure) => {
            tracing::error!(%failure, "outline request failed");
            page.alert(&format!("{PREVIEW_FAILED}: {failure}"));
            status.clear();
            Err(WorkflowError::Request(failure))
        }
    }
}

async fn fetch_outline<S>(
    service: &S,
    inputs: GenerationInputs,
) -> std::result::Result<OutlinePreview, RequestFailure>
where
    S: SlideService + ?Sized,
{
    let payload = build_payload(inputs, false);
    let body = service.submit(Endpoint::Outline, payload).await?;
    Ok(OutlinePreview::from_json(&body)?)
}
