use slidegenius_client::SlideService;
use slidegenius_common::OutlinePreview;

use crate::error::Result;
use crate::generate::run_generation;
use crate::outline::run_outline;
use crate::page::Page;
use crate::status::WorkflowState;

/// Owns the service, the page and the shared workflow state.
///
/// Each user action maps to one method call. Failures are already reported
/// to the page when a method returns `Err`.
pub struct Controller<S, P> {
    service: S,
    page: P,
    state: WorkflowState,
}

impl<S, P> Controller<S, P>
where
    S: SlideService,
    P: Page,
{
    pub fn new(service: S, page: P) -> Self {
        Self::with_state(service, page, WorkflowState::default())
    }

    pub fn with_state(service: S, page: P, state: WorkflowState) -> Self {
        Self {
            service,
            page,
            state,
        }
    }

    /// Preview button.
    pub async fn preview(&mut self) -> Result<OutlinePreview> {
        run_outline(&self.service, &mut self.page, &mut self.state.status).await
    }

    /// Generate button.
    pub async fn generate(&mut self) -> Result<()> {
        run_generation(&self.service, &mut self.page, &mut self.state).await
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WorkflowState {
        &mut self.state
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }
}
