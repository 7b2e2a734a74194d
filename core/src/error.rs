use slidegenius_client::RequestFailure;
use std::fmt;
use thiserror::Error;

/// A required input the user left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    SourceText,
    ApiKey,
    Template,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MissingInput::SourceText => "source text",
            MissingInput::ApiKey => "API key",
            MissingInput::Template => "template file",
        };
        f.write_str(label)
    }
}

/// Inputs failed presence checks; nothing was sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required input: {}", join_missing(.missing))]
pub struct ValidationFailure {
    pub missing: Vec<MissingInput>,
}

fn join_missing(missing: &[MissingInput]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Request(#[from] RequestFailure),

    #[error("Could not save download: {0}")]
    Download(#[from] std::io::Error),

    #[error("A generation request is already in flight")]
    Busy,
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
