//! HTTP client for the SlideGenius service.

pub mod client;
pub mod error;

pub use client::{Endpoint, HttpSlideService, SlideService};
pub use error::{RequestFailure, GENERIC_FAILURE};
