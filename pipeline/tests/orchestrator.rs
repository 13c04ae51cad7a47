use async_trait::async_trait;
use pipeline::{
    Classifier, DefectDetector, Image, Orchestrator, PipelineError, PipelineOutcome, PipelineState, Presentation,
    Scorer, Stage, View, execute,
};
use shared::{ClassificationResult, DefectReport, ScoreDetail, ScoreResult, ScoringInput};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

struct FakeServices {
    class: Result<ClassificationResult, PipelineError>,
    defects: Result<DefectReport, PipelineError>,
    score: Result<ScoreResult, PipelineError>,
    classify_delay: Duration,
    detect_delay: Duration,
    detect_never_returns: bool,
    events: RefCell<Vec<&'static str>>,
    scored_with: RefCell<Option<ScoringInput>>,
}

impl FakeServices {
    fn new(class: &str) -> Self {
        Self {
            class: Ok(ClassificationResult { class: class.into() }),
            defects: Ok(DefectReport {
                defect_percentages: BTreeMap::from([("scratch".to_string(), 12.5)]),
                masked_image_path: Some("out/1.png".into()),
            }),
            score: Ok(ScoreResult::Scored {
                total_score: 20.0,
                details: BTreeMap::from([(
                    "scratch".to_string(),
                    ScoreDetail::Graded { percent: 12.5, grade: None, points: 20 },
                )]),
            }),
            classify_delay: Duration::ZERO,
            detect_delay: Duration::ZERO,
            detect_never_returns: false,
            events: RefCell::new(Vec::new()),
            scored_with: RefCell::new(None),
        }
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Classifier for FakeServices {
    async fn classify(&self, _image: &Image) -> Result<ClassificationResult, PipelineError> {
        self.events.borrow_mut().push("classify:start");
        tokio::time::sleep(self.classify_delay).await;
        self.events.borrow_mut().push("classify:done");
        self.class.clone()
    }
}

#[async_trait(?Send)]
impl DefectDetector for FakeServices {
    async fn detect(&self, _image: &Image) -> Result<DefectReport, PipelineError> {
        self.events.borrow_mut().push("detect:start");
        if self.detect_never_returns {
            futures::future::pending::<()>().await;
        }
        tokio::time::sleep(self.detect_delay).await;
        self.events.borrow_mut().push("detect:done");
        self.defects.clone()
    }
}

#[async_trait(?Send)]
impl Scorer for FakeServices {
    async fn score(&self, input: &ScoringInput) -> Result<ScoreResult, PipelineError> {
        self.events.borrow_mut().push("score");
        *self.scored_with.borrow_mut() = Some(input.clone());
        self.score.clone()
    }
}

fn image() -> Image {
    Image::new("package.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff])
}

fn position(events: &[&str], name: &str) -> usize {
    events.iter().position(|e| *e == name).unwrap_or_else(|| panic!("{} missing from {:?}", name, events))
}

#[tokio::test]
async fn box_is_scored_as_wrapper_with_detected_damage() {
    let services = FakeServices::new("Box");
    let outcome = execute(&services, &image(), |_| {}).await;

    assert!(matches!(outcome, PipelineOutcome::Success(_)));
    assert_eq!(
        services.scored_with.borrow().clone(),
        Some(ScoringInput {
            material: "wrapper".into(),
            damage_data: BTreeMap::from([("scratch".to_string(), 12.5)]),
        })
    );
}

#[tokio::test]
async fn other_classes_keep_their_case() {
    let services = FakeServices::new("Plastic");
    execute(&services, &image(), |_| {}).await;
    assert_eq!(services.scored_with.borrow().as_ref().unwrap().material, "Plastic");
}

#[tokio::test]
async fn scoring_waits_for_slow_detection() {
    let mut services = FakeServices::new("Paper");
    services.detect_delay = Duration::from_millis(30);
    execute(&services, &image(), |_| {}).await;

    let events = services.events();
    assert!(position(&events, "classify:done") < position(&events, "score"));
    assert!(position(&events, "detect:done") < position(&events, "score"));
}

#[tokio::test]
async fn scoring_waits_for_slow_classification() {
    let mut services = FakeServices::new("Paper");
    services.classify_delay = Duration::from_millis(30);
    execute(&services, &image(), |_| {}).await;

    let events = services.events();
    assert!(position(&events, "detect:done") < position(&events, "classify:done"));
    assert!(position(&events, "classify:done") < position(&events, "score"));
}

#[tokio::test]
async fn classify_and_detect_run_together() {
    let mut services = FakeServices::new("Paper");
    services.classify_delay = Duration::from_millis(20);
    services.detect_delay = Duration::from_millis(20);
    execute(&services, &image(), |_| {}).await;

    let events = services.events();
    assert!(position(&events, "detect:start") < position(&events, "classify:done"));
}

#[tokio::test]
async fn classification_failure_does_not_wait_for_detection() {
    let mut services = FakeServices::new("Paper");
    services.class = Err(PipelineError::Service { status: 500, message: "model crashed".into() });
    services.detect_never_returns = true;

    let outcome = tokio::time::timeout(Duration::from_secs(1), execute(&services, &image(), |_| {}))
        .await
        .expect("pipeline should settle without detection");

    assert_eq!(
        outcome,
        PipelineOutcome::Failure(PipelineError::Service { status: 500, message: "model crashed".into() })
    );
    assert!(!services.events().contains(&"score"));
}

#[tokio::test]
async fn detection_failure_skips_scoring() {
    let mut services = FakeServices::new("Paper");
    services.defects = Err(PipelineError::Transport("connection reset".into()));

    let outcome = execute(&services, &image(), |_| {}).await;
    assert_eq!(outcome, PipelineOutcome::Failure(PipelineError::Transport("connection reset".into())));
    assert!(!services.events().contains(&"score"));
}

#[tokio::test]
async fn scoring_transport_failure_is_a_failure() {
    let mut services = FakeServices::new("Paper");
    services.score = Err(PipelineError::Transport("timed out".into()));

    let outcome = execute(&services, &image(), |_| {}).await;
    assert_eq!(outcome, PipelineOutcome::Failure(PipelineError::Transport("timed out".into())));
}

#[tokio::test]
async fn rejected_score_is_a_success_that_never_celebrates() {
    let mut services = FakeServices::new("Glass");
    services.score = Ok(ScoreResult::Rejected { error: "unsupported material".into() });

    let mut orchestrator = Orchestrator::new();
    let state = orchestrator.submit(&services, Some(&image())).await.unwrap();
    assert!(matches!(state.outcome(), Some(PipelineOutcome::Success(_))));

    let presentation = Presentation::from_state(state);
    assert!(!presentation.is_celebrating());
    match presentation.view() {
        View::Error(panel) => assert_eq!(panel.message, "unsupported material"),
        other => panic!("expected error panel, got {:?}", other),
    }
}

#[tokio::test]
async fn stages_are_reported_in_order() {
    let services = FakeServices::new("Paper");
    let mut stages = Vec::new();
    execute(&services, &image(), |stage| stages.push(stage)).await;
    assert_eq!(stages, vec![Stage::ClassifyingAndDetecting, Stage::Scoring]);
}

#[tokio::test]
async fn submit_without_image_makes_no_calls() {
    let services = FakeServices::new("Paper");
    let mut orchestrator = Orchestrator::new();

    let err = orchestrator.submit(&services, None).await.unwrap_err();
    assert_eq!(err, PipelineError::MissingImage);
    assert_eq!(orchestrator.state(), &PipelineState::Idle);
    assert!(services.events().is_empty());
}

#[tokio::test]
async fn only_second_submission_is_applied() {
    let mut slow = FakeServices::new("Paper");
    slow.detect_delay = Duration::from_millis(40);
    let fast = FakeServices::new("Plastic");
    let image = image();

    let orchestrator = RefCell::new(Orchestrator::new());
    let first = orchestrator.borrow_mut().begin(Some(&image)).unwrap();
    let second = orchestrator.borrow_mut().begin(Some(&image)).unwrap();

    let run_first = async {
        let outcome = execute(&slow, &image, |stage| {
            orchestrator.borrow_mut().advance(first, stage);
        })
        .await;
        orchestrator.borrow_mut().settle(first, outcome)
    };
    let run_second = async {
        let outcome = execute(&fast, &image, |stage| {
            orchestrator.borrow_mut().advance(second, stage);
        })
        .await;
        orchestrator.borrow_mut().settle(second, outcome)
    };

    let (applied_first, applied_second) = futures::join!(run_first, run_second);
    assert!(!applied_first);
    assert!(applied_second);

    match orchestrator.borrow().state().outcome() {
        Some(PipelineOutcome::Success(report)) => assert_eq!(report.classification.class, "Plastic"),
        other => panic!("expected second run's success, got {:?}", other),
    }
}

#[tokio::test]
async fn masked_image_absent_hides_image_detail() {
    let mut services = FakeServices::new("Paper");
    services.defects = Ok(DefectReport {
        defect_percentages: BTreeMap::new(),
        masked_image_path: None,
    });

    let mut orchestrator = Orchestrator::new();
    let state = orchestrator.submit(&services, Some(&image())).await.unwrap();
    let mut presentation = Presentation::from_state(state);

    assert!(presentation.is_celebrating());
    assert!(!presentation.image_detail_available());
    assert!(!presentation.open_image_detail());
}
