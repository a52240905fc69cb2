use std::{cmp::Ordering, collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const QUERY_PATH: &str = "/fdsnws/event/1/query";

/// How long `/scenario/stall` sleeps before answering.
pub const STALL: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub mag: f64,
    pub place: String,
    pub time: i64,
    pub url: Option<String>,
}

impl Event {
    pub fn to_feature(&self) -> Value {
        let mut properties = json!({
            "mag": self.mag,
            "place": self.place,
            "time": self.time,
            "type": "earthquake",
        });
        if let Some(url) = &self.url {
            properties["url"] = json!(url);
        }
        json!({
            "type": "Feature",
            "id": self.id,
            "properties": properties,
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0, 10.0]},
        })
    }
}

pub type Feed = Arc<Vec<Event>>;

pub fn seed_events() -> Vec<Event> {
    let event = |id: &str, mag: f64, place: &str, time: i64| Event {
        id: id.to_string(),
        mag,
        place: place.to_string(),
        time,
        url: Some(format!("https://earthquake.usgs.gov/earthquakes/eventpage/{id}")),
    };
    vec![
        event("us1000a", 7.2, "88km N of Yelizovo, Russia", 1_700_000_300_000),
        event("us1000b", 6.5, "Fiji region", 1_700_000_200_000),
        event("us1000c", 4.1, "12km SSW of Idyllwild, CA", 1_700_000_100_000),
        event("us1000d", 2.3, "5km NW of Springfield", 1_700_000_000_000),
        Event {
            url: None,
            ..event("us1000e", 5.8, "South of the Fiji Islands", 1_699_999_900_000)
        },
    ]
}

pub fn app() -> Router {
    app_with_events(seed_events())
}

pub fn app_with_events(events: Vec<Event>) -> Router {
    let feed: Feed = Arc::new(events);
    Router::new()
        .route(QUERY_PATH, get(query_events))
        .route("/scenario/empty", get(empty_feed))
        .route("/scenario/not-json", get(not_json))
        .route("/scenario/no-features", get(no_features))
        .route("/scenario/partial", get(partial_feed))
        .route("/scenario/status/{code}", get(status_code))
        .route("/scenario/stall", get(stall))
        .with_state(feed)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "metadata": {"title": "Mock Earthquakes", "status": 200, "count": features.len()},
        "features": features,
    })
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}

/// Mirrors the FDSN parameters the client sends.
async fn query_events(
    State(feed): State<Feed>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match params.get("format").map(String::as_str) {
        Some("geojson") => {}
        other => return bad_request(format!("unsupported format: {other:?}")),
    }

    let min_mag = match params.get("minmag").map(|m| m.parse::<f64>()) {
        None => f64::NEG_INFINITY,
        Some(Ok(m)) => m,
        Some(Err(_)) => return bad_request("minmag must be a number".to_string()),
    };

    let limit = match params.get("limit").map(|l| l.parse::<usize>()) {
        None => usize::MAX,
        Some(Ok(l)) => l,
        Some(Err(_)) => return bad_request("limit must be an integer".to_string()),
    };

    let order: fn(&Event, &Event) -> Ordering =
        match params.get("orderby").map(String::as_str).unwrap_or("time") {
            "time" => newest_first,
            "time-asc" => oldest_first,
            "magnitude" => largest_first,
            "magnitude-asc" => smallest_first,
            other => return bad_request(format!("unknown orderby: {other}")),
        };

    let mut events: Vec<&Event> = feed.iter().filter(|e| e.mag >= min_mag).collect();
    events.sort_by(|a, b| order(a, b));

    let features = events
        .into_iter()
        .take(limit)
        .map(Event::to_feature)
        .collect();
    Json(collection(features)).into_response()
}

fn newest_first(a: &Event, b: &Event) -> Ordering {
    b.time.cmp(&a.time)
}

fn oldest_first(a: &Event, b: &Event) -> Ordering {
    a.time.cmp(&b.time)
}

fn largest_first(a: &Event, b: &Event) -> Ordering {
    b.mag.total_cmp(&a.mag)
}

fn smallest_first(a: &Event, b: &Event) -> Ordering {
    a.mag.total_cmp(&b.mag)
}

async fn empty_feed() -> Json<Value> {
    Json(collection(Vec::new()))
}

async fn not_json() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body>Service temporarily in maintenance</body></html>",
    )
        .into_response()
}

async fn no_features() -> Json<Value> {
    Json(json!({"type": "FeatureCollection", "metadata": {"count": 0}}))
}

/// Three features, the middle one without `mag`.
async fn partial_feed(State(feed): State<Feed>) -> Json<Value> {
    let mut features: Vec<Value> = feed.iter().take(3).map(Event::to_feature).collect();
    if let Some(props) = features
        .get_mut(1)
        .and_then(|f| f.get_mut("properties"))
        .and_then(Value::as_object_mut)
    {
        props.remove("mag");
    }
    Json(collection(features))
}

async fn status_code(State(feed): State<Feed>, Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let features = feed.iter().map(Event::to_feature).collect();
    (status, Json(collection(features))).into_response()
}

async fn stall() -> Json<Value> {
    tokio::time::sleep(STALL).await;
    Json(collection(Vec::new()))
}
