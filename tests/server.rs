use std::io;
use std::sync::{Arc, Mutex};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use wc_finals::dashboard::FinalsData;
use wc_finals::dataset::{Dataset, FinalRecord};
use wc_finals::server::create_router;

fn record(year: &str, winner: &str, runner_up: &str) -> FinalRecord {
    FinalRecord {
        year: year.to_string(),
        winner: winner.to_string(),
        score: "1–0".to_string(),
        runner_up: runner_up.to_string(),
        venue: "Stadium".to_string(),
        location: "City".to_string(),
        attendance: "70,000".to_string(),
    }
}

fn finals_data() -> Arc<FinalsData> {
    let dataset = Dataset::build(vec![
        record("2018", "France", "Croatia"),
        record("2014", "Germany", "Argentina"),
        record("1990", "West Germany", "Argentina"),
    ])
    .expect("dataset should build");
    Arc::new(FinalsData::new(
        dataset,
        "https://example.test/finals".to_string(),
        Utc::now(),
    ))
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be json")
}

fn event_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

#[tokio::test]
async fn index_serves_dashboard_page() {
    let app = create_router(finals_data());
    let resp = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains(r#"<select id="country-list" data-kind="country">"#));
    assert!(page.contains("France has won the FIFA World Cup 1 times"));
}

#[tokio::test]
async fn country_event_returns_map_and_total() {
    let app = create_router(finals_data());
    let resp = app
        .oneshot(event_request(r#"{"kind":"country","value":"Germany"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let updates = json.as_array().expect("array of updates");
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0]["region"], "world-map");
    assert_eq!(updates[0]["content"]["data"][0]["locationmode"], "country names");
    assert_eq!(updates[1]["region"], "total-wins");
    assert_eq!(updates[1]["content"], "Germany has won the FIFA World Cup 2 times");
}

#[tokio::test]
async fn year_event_returns_yearly_result() {
    let app = create_router(finals_data());
    let resp = app
        .oneshot(event_request(r#"{"kind":"year","value":"1990"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json[0]["region"], "yearly-result");
    assert_eq!(
        json[0]["content"],
        "Stats for FIFA world cup 1990 -- Winner: Germany, and Runner-Up: Argentina"
    );
}

#[tokio::test]
async fn unknown_selection_is_server_error() {
    let app = create_router(finals_data());
    let resp = app
        .oneshot(event_request(r#"{"kind":"country","value":"Atlantis"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn lookup_miss_is_logged_as_invariant_violation() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = create_router(finals_data());
    let resp = app
        .oneshot(event_request(r#"{"kind":"year","value":"1066"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let output = logs.contents();
    assert!(output.contains("ERROR"), "{output}");
    assert!(output.contains("invariant=true"), "{output}");
    assert!(output.contains(r#"year "1066" is not in the dashboard data"#), "{output}");
}

#[tokio::test]
async fn read_api_exposes_dataset_and_wins() {
    let data = finals_data();

    let resp = create_router(data.clone())
        .oneshot(Request::get("/api/finals").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let finals = body_json(resp).await;
    assert_eq!(finals.as_array().map(Vec::len), Some(3));
    assert_eq!(finals[2]["winner"], "Germany");

    let resp = create_router(data)
        .oneshot(Request::get("/api/wins").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let wins = body_json(resp).await;
    assert_eq!(wins[0]["country"], "France");
    assert_eq!(wins[1]["country"], "Germany");
    assert_eq!(wins[1]["wins"], 2);
}
