//! Request orchestration and interface state for the SlideGenius client.

pub mod config;
pub mod controller;
pub mod download;
pub mod error;
pub mod generate;
pub mod inputs;
pub mod outline;
pub mod page;
pub mod render;
pub mod status;

pub use config::Config;
pub use controller::Controller;
pub use error::{MissingInput, ValidationFailure, WorkflowError};
pub use page::{Page, TextField};
pub use status::{StatusReporter, TriggerControl, WorkflowState};
