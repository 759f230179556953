use std::collections::HashMap;
use std::sync::Arc;

use client::{
    BoxFuture, DataSource, LoadError, MarkerController, PredictError, PredictionClient,
    PredictionService, Resolution, ResolutionPolicy, StatusDisplay, StatusLine, bootstrap,
};
use foundation::math::Vec3;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use protocol::PredictResponse;
use scene::{ConsiderationRegistry, MarkerSource};
use tokio::sync::oneshot;

type Answer = Result<PredictResponse, PredictError>;

/// Answers immediately, keyed by the integer part of `x`.
struct Scripted(HashMap<i64, Option<&'static str>>);

impl Scripted {
    fn new(entries: &[(i64, Option<&'static str>)]) -> Arc<Self> {
        Arc::new(Self(entries.iter().copied().collect()))
    }
}

impl PredictionService for Scripted {
    fn request(&self, position: Vec3) -> BoxFuture<'_, Answer> {
        let answer = match self.0.get(&(position.x as i64)) {
            Some(Some(label)) => Ok(PredictResponse::single(*label)),
            Some(None) => Ok(PredictResponse::default()),
            None => Err(PredictError::Transport("connection refused".to_string())),
        };
        Box::pin(async move { answer })
    }
}

/// Each request waits for its gate, keyed by the integer part of `x`, so
/// tests control the resolution order.
#[derive(Default)]
struct Gated {
    gates: Mutex<HashMap<i64, oneshot::Receiver<Answer>>>,
}

impl Gated {
    fn gate(&self, x: i64) -> oneshot::Sender<Answer> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(x, rx);
        tx
    }
}

impl PredictionService for Gated {
    fn request(&self, position: Vec3) -> BoxFuture<'_, Answer> {
        let rx = self.gates.lock().remove(&(position.x as i64));
        Box::pin(async move {
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(PredictError::Transport("gate dropped".to_string()))),
                None => Err(PredictError::Transport("no gate".to_string())),
            }
        })
    }
}

#[derive(Default)]
struct StatusLog(Mutex<Vec<String>>);

impl StatusDisplay for StatusLog {
    fn show(&self, text: &str) {
        self.0.lock().push(text.to_string());
    }
}

impl StatusLog {
    fn lines(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

struct InlineCsv(&'static str);

impl DataSource for InlineCsv {
    fn fetch_csv(&self) -> BoxFuture<'_, Result<String, LoadError>> {
        Box::pin(async move { Ok::<_, LoadError>(self.0.to_string()) })
    }
}

struct Unreachable;

impl DataSource for Unreachable {
    fn fetch_csv(&self) -> BoxFuture<'_, Result<String, LoadError>> {
        Box::pin(async { Err::<String, _>(LoadError::Status(404)) })
    }
}

fn registry() -> Arc<ConsiderationRegistry> {
    let mut r = ConsiderationRegistry::new();
    r.insert("Value?", Vec3::new(1.0, 2.0, 3.0));
    r.insert("People?", Vec3::new(-3.0, 0.0, 0.0));
    Arc::new(r)
}

fn controller(
    service: Arc<dyn PredictionService>,
    policy: ResolutionPolicy,
) -> (Arc<MarkerController>, Arc<StatusLog>) {
    let status = Arc::new(StatusLog::default());
    let ctrl = MarkerController::new(registry(), PredictionClient::new(service), status.clone())
        .with_policy(policy);
    (Arc::new(ctrl), status)
}

#[tokio::test]
async fn position_updates_before_prediction_resolves() {
    let gated = Arc::new(Gated::default());
    let _held = gated.gate(7);
    let (ctrl, _) = controller(gated, ResolutionPolicy::default());

    let pending = ctrl.set_position(Vec3::new(7.0, 8.0, 9.0));
    assert_eq!(ctrl.position(), Vec3::new(7.0, 8.0, 9.0));
    assert_eq!(ctrl.marker_view().position, Vec3::new(7.0, 8.0, 9.0));
    assert_eq!(ctrl.active_label(), None);
    drop(pending);
}

#[tokio::test]
async fn dropped_handle_still_applies_the_answer() {
    let gated = Arc::new(Gated::default());
    let gate = gated.gate(1);
    let (ctrl, status) = controller(gated, ResolutionPolicy::LatestIssued);

    drop(ctrl.set_position(Vec3::new(1.0, 2.0, 3.0)));
    gate.send(Ok(PredictResponse::single("Value?"))).expect("send");

    for _ in 0..100 {
        if ctrl.active_label().is_some() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(ctrl.active_label().as_deref(), Some("Value?"));
    assert_eq!(
        status.lines(),
        vec!["Closest Consideration: Value?".to_string()]
    );
}

#[tokio::test]
async fn absent_prediction_clears_active_label() {
    let service = Scripted::new(&[(1, Some("Value?")), (5, None)]);
    let (ctrl, status) = controller(service, ResolutionPolicy::default());

    let first = ctrl.set_position(Vec3::new(1.0, 2.0, 3.0)).await.expect("join");
    assert_eq!(first, Resolution::Applied(Some("Value?".to_string())));
    assert_eq!(ctrl.active_label().as_deref(), Some("Value?"));

    let second = ctrl.set_position(Vec3::new(5.0, 0.0, 0.0)).await.expect("join");
    assert_eq!(second, Resolution::Applied(None));
    assert_eq!(ctrl.active_label(), None);
    assert_eq!(ctrl.marker_view().active_label, None);
    // Nothing is written for an absent prediction.
    assert_eq!(status.lines(), vec!["Closest Consideration: Value?".to_string()]);
}

#[tokio::test]
async fn failed_request_is_treated_as_absent() {
    let service = Scripted::new(&[(1, Some("Value?"))]);
    let (ctrl, _) = controller(service, ResolutionPolicy::default());

    ctrl.set_position(Vec3::new(1.0, 2.0, 3.0)).await.expect("join");
    let failed = ctrl.set_position(Vec3::new(99.0, 0.0, 0.0)).await.expect("join");
    assert_eq!(failed, Resolution::Applied(None));
    assert_eq!(ctrl.active_label(), None);
    assert_eq!(ctrl.position(), Vec3::new(99.0, 0.0, 0.0));
}

#[tokio::test]
async fn unknown_label_does_not_activate_anything() {
    let service = Scripted::new(&[(4, Some("Mystery?"))]);
    let (ctrl, status) = controller(service, ResolutionPolicy::default());

    let out = ctrl.set_position(Vec3::new(4.0, 0.0, 0.0)).await.expect("join");
    assert_eq!(out, Resolution::Applied(None));
    assert!(status.lines().is_empty());
}

#[tokio::test]
async fn last_resolved_policy_lets_the_late_stale_answer_win() {
    let gated = Arc::new(Gated::default());
    let first_gate = gated.gate(1);
    let second_gate = gated.gate(2);
    let (ctrl, status) = controller(gated, ResolutionPolicy::LastResolved);

    let first = ctrl.set_position(Vec3::new(1.0, 0.0, 0.0));
    let second = ctrl.set_position(Vec3::new(2.0, 0.0, 0.0));

    second_gate
        .send(Ok(PredictResponse::single("People?")))
        .expect("send");
    assert_eq!(
        second.await.expect("join"),
        Resolution::Applied(Some("People?".to_string()))
    );

    first_gate
        .send(Ok(PredictResponse::single("Value?")))
        .expect("send");
    assert_eq!(
        first.await.expect("join"),
        Resolution::Applied(Some("Value?".to_string()))
    );

    // The marker sits at the second position but shows the first answer.
    assert_eq!(ctrl.position(), Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(ctrl.active_label().as_deref(), Some("Value?"));
    assert_eq!(
        status.lines(),
        vec![
            "Closest Consideration: People?".to_string(),
            "Closest Consideration: Value?".to_string(),
        ]
    );
}

#[tokio::test]
async fn latest_issued_policy_discards_stale_answers() {
    let gated = Arc::new(Gated::default());
    let first_gate = gated.gate(1);
    let second_gate = gated.gate(2);
    let (ctrl, status) = controller(gated, ResolutionPolicy::LatestIssued);

    let first = ctrl.set_position(Vec3::new(1.0, 0.0, 0.0));
    let second = ctrl.set_position(Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(ctrl.generation(), 2);

    second_gate
        .send(Ok(PredictResponse::single("People?")))
        .expect("send");
    second.await.expect("join");

    first_gate
        .send(Ok(PredictResponse::single("Value?")))
        .expect("send");
    assert_eq!(
        first.await.expect("join"),
        Resolution::Stale {
            issued: 1,
            latest: 2
        }
    );

    assert_eq!(ctrl.active_label().as_deref(), Some("People?"));
    assert_eq!(
        status.lines(),
        vec!["Closest Consideration: People?".to_string()]
    );
}

#[tokio::test]
async fn report_prediction_leaves_marker_alone() {
    let service = Scripted::new(&[(1, Some("Value?")), (6, Some("People?"))]);
    let (ctrl, status) = controller(service, ResolutionPolicy::default());
    ctrl.set_position(Vec3::new(1.0, 2.0, 3.0)).await.expect("join");

    let label = ctrl.report_prediction(Vec3::new(6.0, 0.0, 0.0)).await;
    assert_eq!(label.as_deref(), Some("People?"));
    let missing = ctrl.report_prediction(Vec3::new(50.0, 0.0, 0.0)).await;
    assert_eq!(missing, None);

    assert_eq!(ctrl.position(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(ctrl.active_label().as_deref(), Some("Value?"));
    assert_eq!(
        status.lines(),
        vec![
            "Closest Consideration: Value?".to_string(),
            "Prediction: People?".to_string(),
            "No prediction received.".to_string(),
        ]
    );
}

#[tokio::test]
async fn single_row_csv_end_to_end() {
    let source = InlineCsv("Consideration,x,y,z\nValue?,1,2,3\n");
    let service = Scripted::new(&[(1, Some("Value?")), (3, Some("Value?"))]);
    let status = Arc::new(StatusLine::new());

    let boot = bootstrap(
        &source,
        PredictionClient::new(service),
        status.clone(),
        ResolutionPolicy::default(),
    )
    .await;
    let ctrl = boot.controller;

    let entry = ctrl.registry().get("Value?").expect("entry");
    assert_eq!(entry.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(entry.base_color, foundation::color::Rgb::from_hex(0xFF9EF2));

    // Initial placement at (3, 5, 5) is already visible.
    assert_eq!(ctrl.position(), client::INITIAL_POSITION);
    boot.initial
        .expect("initial placement")
        .await
        .expect("join");

    ctrl.set_position(Vec3::new(1.0, 2.0, 3.0)).await.expect("join");
    assert_eq!(ctrl.active_label().as_deref(), Some("Value?"));
    assert_eq!(
        status.text().as_deref(),
        Some("Closest Consideration: Value?")
    );
}

#[tokio::test]
async fn failed_load_leaves_empty_scene() {
    let status = Arc::new(StatusLine::new());
    let boot = bootstrap(
        &Unreachable,
        PredictionClient::new(Scripted::new(&[])),
        status.clone(),
        ResolutionPolicy::default(),
    )
    .await;

    assert!(boot.initial.is_none());
    assert!(boot.controller.registry().is_empty());
    assert_eq!(boot.controller.generation(), 0);
    assert_eq!(status.text(), None);
}
