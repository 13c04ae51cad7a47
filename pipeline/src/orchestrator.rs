//! Sequencing of the three remote stages.
//!
//! `classify` and `detect` both only need the image, so they are issued together and joined;
//! `score` needs both of their results and starts after the join. Every run carries a
//! [`RunId`] and the [`Orchestrator`] only applies updates from the most recent one.

use shared::{ClassificationResult, DefectReport, ScoreResult, ScoringInput};

use crate::client::{Classifier, DefectDetector, Scorer};
use crate::error::PipelineError;
use crate::image::Image;

const BOX_CLASS: &str = "box";
const WRAPPER_MATERIAL: &str = "wrapper";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Submitting,
    ClassifyingAndDetecting,
    Scoring,
}

/// Everything a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub classification: ClassificationResult,
    pub defects: DefectReport,
    pub score: ScoreResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Transport succeeded for all three stages. The score may still be a rejection.
    Success(PipelineReport),
    Failure(PipelineError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Running(Stage),
    Settled(PipelineOutcome),
}

impl PipelineState {
    /// `None` while the run is still pending.
    pub fn outcome(&self) -> Option<&PipelineOutcome> {
        match self {
            PipelineState::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// The scoring service knows boxes as wrappers. No other class is renamed.
pub fn scoring_material(class: &str) -> String {
    if class.eq_ignore_ascii_case(BOX_CLASS) {
        WRAPPER_MATERIAL.to_string()
    } else {
        class.to_string()
    }
}

pub fn scoring_input(classification: &ClassificationResult, defects: &DefectReport) -> ScoringInput {
    ScoringInput {
        material: scoring_material(&classification.class),
        damage_data: defects.defect_percentages.clone(),
    }
}

/// Runs one submission to completion. `on_stage` is told about each stage as it starts.
///
/// If either `classify` or `detect` fails the other one is dropped unfinished and its
/// result never looked at.
pub async fn execute<S>(services: &S, image: &Image, mut on_stage: impl FnMut(Stage)) -> PipelineOutcome
where
    S: Classifier + DefectDetector + Scorer + ?Sized,
{
    match run_stages(services, image, &mut on_stage).await {
        Ok(report) => PipelineOutcome::Success(report),
        Err(err) => {
            log::warn!("Pipeline failed for {}: {}", image.file_name, err);
            PipelineOutcome::Failure(err)
        }
    }
}

async fn run_stages<S>(
    services: &S,
    image: &Image,
    on_stage: &mut impl FnMut(Stage),
) -> Result<PipelineReport, PipelineError>
where
    S: Classifier + DefectDetector + Scorer + ?Sized,
{
    on_stage(Stage::ClassifyingAndDetecting);
    let (classification, defects) = futures::try_join!(services.classify(image), services.detect(image))?;
    log::debug!(
        "Classified as {} with {} defect types",
        classification.class,
        defects.defect_percentages.len()
    );

    let input = scoring_input(&classification, &defects);
    on_stage(Stage::Scoring);
    let score = services.score(&input).await?;

    if let Some(error) = score.error() {
        log::warn!("Scoring rejected material {}: {}", input.material, error);
    }

    Ok(PipelineReport {
        classification,
        defects,
        score,
    })
}

/// Owns the current run id and the state of that run.
#[derive(Debug, Default)]
pub struct Orchestrator {
    last_run: u64,
    state: PipelineState,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PipelineState::Running(_))
    }

    /// Starts a new run, superseding any earlier one. Without an image nothing changes.
    pub fn begin(&mut self, image: Option<&Image>) -> Result<RunId, PipelineError> {
        if image.is_none() {
            return Err(PipelineError::MissingImage);
        }

        self.last_run += 1;
        self.state = PipelineState::Running(Stage::Submitting);
        log::debug!("Run {} submitted", self.last_run);
        Ok(RunId(self.last_run))
    }

    /// Back to idle; whatever is still in flight becomes stale.
    pub fn reset(&mut self) {
        self.last_run += 1;
        self.state = PipelineState::Idle;
    }

    pub fn advance(&mut self, run: RunId, stage: Stage) -> bool {
        if !self.accepts(run) {
            return false;
        }
        self.state = PipelineState::Running(stage);
        true
    }

    pub fn settle(&mut self, run: RunId, outcome: PipelineOutcome) -> bool {
        if !self.accepts(run) {
            return false;
        }
        log::debug!("Run {} settled", run.0);
        self.state = PipelineState::Settled(outcome);
        true
    }

    /// Begins, executes and settles a run in one go.
    pub async fn submit<S>(&mut self, services: &S, image: Option<&Image>) -> Result<&PipelineState, PipelineError>
    where
        S: Classifier + DefectDetector + Scorer + ?Sized,
    {
        let image = image.ok_or(PipelineError::MissingImage)?;
        let run = self.begin(Some(image))?;

        let outcome = execute(services, image, |stage| {
            self.advance(run, stage);
        })
        .await;
        self.settle(run, outcome);

        Ok(&self.state)
    }

    fn accepts(&self, run: RunId) -> bool {
        if run.0 != self.last_run {
            log::debug!("Discarding stale update from run {} (current {})", run.0, self.last_run);
            return false;
        }
        // settled is terminal for its run
        !matches!(self.state, PipelineState::Settled(_))
    }
}
