//! HTTP client against a throwaway axum server standing in for the reading service.
mod common;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use common::{config, limit};
use sensortop::config::MonitorConfig;
use sensortop::error::FetchError;
use sensortop::http::{latest_url, HttpSource, ReadingsSource};
use sensortop::poll::PollController;
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Seen {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    cache_control: Arc<Mutex<Vec<String>>>,
}

async fn latest(
    State(seen): State<Seen>,
    Query(q): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    if let Some(v) = headers.get("cache-control").and_then(|v| v.to_str().ok()) {
        seen.cache_control.lock().unwrap().push(v.to_string());
    }
    let n: usize = q.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
    let sensor = q.get("sensorId").cloned().unwrap_or_default();
    seen.queries.lock().unwrap().push(q);
    let rows: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "_id": format!("r{i}"),
                "sensorId": sensor,
                "location": "lab",
                "temperature": 20.0 + i as f64,
                "humidity": 40,
                "timestamp": format!("2024-03-01T12:{:02}:00Z", 59 - i),
            })
        })
        .collect();
    Json(Value::Array(rows))
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn source_for(base_url: &str) -> HttpSource {
    let cfg = MonitorConfig {
        base_url: base_url.to_string(),
        request_timeout: Some(Duration::from_secs(5)),
        ..MonitorConfig::default()
    };
    HttpSource::new(&cfg).unwrap()
}

#[test]
fn builds_latest_url_with_query() {
    let url = latest_url("http://host:4000/", "kitchen sensor", limit(15)).unwrap();
    assert_eq!(
        url.as_str(),
        "http://host:4000/api/readings/latest?sensorId=kitchen+sensor&limit=15"
    );
    let url = latest_url("https://example.org/sensors", "s1", limit(1)).unwrap();
    assert_eq!(
        url.as_str(),
        "https://example.org/sensors/api/readings/latest?sensorId=s1&limit=1"
    );
    assert!(matches!(
        latest_url("not a url", "s1", limit(1)),
        Err(FetchError::Transport(_))
    ));
}

#[tokio::test]
async fn fetches_window_with_query_and_no_cache() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/readings/latest", get(latest))
        .with_state(seen.clone());
    let base = serve(app).await;

    let window = source_for(&base)
        .fetch_latest("greenhouse-1", limit(3))
        .await
        .unwrap();
    assert_eq!(window.len(), 3);
    assert_eq!(window[0].id, "r0");
    assert_eq!(window[0].sensor_id, "greenhouse-1");

    let q = seen.queries.lock().unwrap()[0].clone();
    assert_eq!(q.get("sensorId").map(String::as_str), Some("greenhouse-1"));
    assert_eq!(q.get("limit").map(String::as_str), Some("3"));
    assert_eq!(seen.cache_control.lock().unwrap().as_slice(), ["no-cache"]);
}

#[tokio::test]
async fn non_success_status_is_reported_with_code() {
    let app = Router::new().route(
        "/api/readings/latest",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance").into_response() }),
    );
    let base = serve(app).await;

    let err = source_for(&base)
        .fetch_latest("s1", limit(5))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::Status(503));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn non_array_body_is_decode_error() {
    let app = Router::new().route(
        "/api/readings/latest",
        get(|| async { Json(json!({"message": "no readings"})) }),
    );
    let base = serve(app).await;

    let err = source_for(&base)
        .fetch_latest("s1", limit(5))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    // Grab a free port, then close it again
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = source_for(&format!("http://{addr}"))
        .fetch_latest("s1", limit(5))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn controller_polls_real_http_endpoint() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/readings/latest", get(latest))
        .with_state(seen.clone());
    let base = serve(app).await;

    let cfg = MonitorConfig {
        base_url: base.clone(),
        ..config(Duration::from_secs(10))
    };
    let mut ctl = PollController::new(&cfg, Arc::new(source_for(&base)));
    ctl.start(limit(4));
    ctl.settle().await;
    ctl.stop();

    assert!(ctl.error().is_none(), "{:?}", ctl.error());
    assert_eq!(ctl.store().len(), 4);
    assert_eq!(ctl.store().latest().unwrap().id, "r0");
    assert_eq!(
        seen.queries.lock().unwrap()[0].get("sensorId").map(String::as_str),
        Some("greenhouse-1")
    );
}
