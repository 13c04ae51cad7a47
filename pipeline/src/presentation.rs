//! What the UI should show, derived from the orchestrator state.

use shared::{ScoreDetail, ScoreResult};
use std::fmt;

use crate::error::ErrorKind;
use crate::orchestrator::{PipelineOutcome, PipelineReport, PipelineState, Stage};

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownLine {
    pub defect: String,
    pub detail: ScoreDetail,
}

impl fmt::Display for BreakdownLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            ScoreDetail::Graded { percent, points, .. } => {
                write!(f, "{}: {:.2}% - {} pts", self.defect, percent, points)
            }
            ScoreDetail::Note(note) => write!(f, "{}: {}", self.defect, note),
        }
    }
}

/// A scored run. Only ever built from `ScoreResult::Scored`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub predicted_class: String,
    pub total_score: f64,
    pub breakdown: Vec<BreakdownLine>,
    pub masked_image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPanel {
    pub kind: ErrorKind,
    pub message: String,
    /// Set when classification went through but scoring rejected the material.
    pub predicted_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Upload,
    Progress(Stage),
    Celebration(ResultSummary),
    /// The summary after the celebration popup was closed.
    Result(ResultSummary),
    Error(ErrorPanel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    view: View,
    image_detail_open: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::from_state(&PipelineState::Idle)
    }
}

impl Presentation {
    pub fn from_state(state: &PipelineState) -> Self {
        let view = match state {
            PipelineState::Idle => View::Upload,
            PipelineState::Running(stage) => View::Progress(*stage),
            PipelineState::Settled(PipelineOutcome::Failure(err)) => View::Error(ErrorPanel {
                kind: err.kind(),
                message: err.to_string(),
                predicted_class: None,
            }),
            PipelineState::Settled(PipelineOutcome::Success(report)) => settled_view(report),
        };

        Self {
            view,
            image_detail_open: false,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn accepts_submission(&self) -> bool {
        !matches!(self.view, View::Progress(_))
    }

    pub fn is_celebrating(&self) -> bool {
        matches!(self.view, View::Celebration(_))
    }

    pub fn summary(&self) -> Option<&ResultSummary> {
        match &self.view {
            View::Celebration(summary) | View::Result(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn image_detail_available(&self) -> bool {
        self.summary().is_some_and(|s| s.masked_image_path.is_some())
    }

    pub fn open_image_detail(&mut self) -> bool {
        self.image_detail_open = self.image_detail_available();
        self.image_detail_open
    }

    pub fn close_image_detail(&mut self) {
        self.image_detail_open = false;
    }

    /// Masked image path while the detail view is open.
    pub fn image_detail(&self) -> Option<&str> {
        if !self.image_detail_open {
            return None;
        }
        self.summary().and_then(|s| s.masked_image_path.as_deref())
    }

    pub fn dismiss_celebration(&mut self) {
        if let View::Celebration(summary) = &self.view {
            self.view = View::Result(summary.clone());
        }
    }
}

fn settled_view(report: &PipelineReport) -> View {
    match &report.score {
        ScoreResult::Rejected { error } => View::Error(ErrorPanel {
            kind: ErrorKind::Domain,
            message: error.clone(),
            predicted_class: Some(report.classification.class.clone()),
        }),
        ScoreResult::Scored { total_score, details } => View::Celebration(ResultSummary {
            predicted_class: report.classification.class.clone(),
            total_score: *total_score,
            breakdown: details
                .iter()
                .map(|(defect, detail)| BreakdownLine {
                    defect: defect.clone(),
                    detail: detail.clone(),
                })
                .collect(),
            masked_image_path: report.defects.masked_image_path.clone(),
        }),
    }
}
