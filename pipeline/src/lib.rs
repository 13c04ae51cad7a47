//! Client-side core of the package scoring app: picks an image, runs it through
//! classification, defect detection and scoring, and turns the result into a view.

pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod orchestrator;
pub mod presentation;

pub use client::{Classifier, DefectDetector, HttpServiceClient, Scorer};
pub use config::ServiceEndpoints;
pub use error::{ErrorKind, PipelineError};
pub use image::{Image, ImageSource, PreviewHandle};
pub use orchestrator::{
    Orchestrator, PipelineOutcome, PipelineReport, PipelineState, RunId, Stage, execute, scoring_input,
    scoring_material,
};
pub use presentation::{BreakdownLine, ErrorPanel, Presentation, ResultSummary, View};
