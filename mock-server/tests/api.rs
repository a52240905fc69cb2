use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_events, seed_events, Event, QUERY_PATH};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn places(doc: &Value) -> Vec<String> {
    doc["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["place"].as_str().unwrap().to_string())
        .collect()
}

// --- query ---

#[tokio::test]
async fn query_returns_geojson_newest_first() {
    let resp = app()
        .oneshot(get(&format!("{QUERY_PATH}?format=geojson&limit=10&minmag=0&orderby=time")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await;
    assert_eq!(doc["type"], "FeatureCollection");
    let times: Vec<i64> = doc["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["time"].as_i64().unwrap())
        .collect();
    assert_eq!(times.len(), seed_events().len());
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn query_filters_by_min_magnitude() {
    let resp = app()
        .oneshot(get(&format!("{QUERY_PATH}?format=geojson&minmag=6&orderby=time")))
        .await
        .unwrap();

    let doc = body_json(resp).await;
    assert_eq!(places(&doc), ["88km N of Yelizovo, Russia", "Fiji region"]);
}

#[tokio::test]
async fn query_orders_by_magnitude() {
    let resp = app()
        .oneshot(get(&format!("{QUERY_PATH}?format=geojson&minmag=0&orderby=magnitude-asc")))
        .await
        .unwrap();

    let doc = body_json(resp).await;
    let mags: Vec<f64> = doc["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["mag"].as_f64().unwrap())
        .collect();
    assert!(mags.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn query_respects_limit() {
    let resp = app()
        .oneshot(get(&format!("{QUERY_PATH}?format=geojson&limit=2")))
        .await
        .unwrap();

    let doc = body_json(resp).await;
    assert_eq!(doc["features"].as_array().unwrap().len(), 2);
    assert_eq!(doc["metadata"]["count"], 2);
}

#[tokio::test]
async fn query_rejects_bad_parameters() {
    for query in [
        "format=xml",
        "format=geojson&minmag=big",
        "format=geojson&orderby=random",
        "format=geojson&limit=-1",
    ] {
        let resp = app()
            .oneshot(get(&format!("{QUERY_PATH}?{query}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{query}");
    }
}

#[tokio::test]
async fn query_on_custom_events() {
    let events = vec![Event {
        id: "x1".to_string(),
        mag: 3.3,
        place: "Nowhere".to_string(),
        time: 5,
        url: None,
    }];
    let resp = app_with_events(events)
        .oneshot(get(&format!("{QUERY_PATH}?format=geojson")))
        .await
        .unwrap();

    let doc = body_json(resp).await;
    assert_eq!(places(&doc), ["Nowhere"]);
    assert!(doc["features"][0]["properties"].get("url").is_none());
}

// --- scenarios ---

#[tokio::test]
async fn empty_scenario_has_no_features() {
    let resp = app().oneshot(get("/scenario/empty")).await.unwrap();
    let doc = body_json(resp).await;
    assert!(doc["features"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn not_json_scenario_returns_html() {
    let resp = app().oneshot(get("/scenario/not-json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

#[tokio::test]
async fn no_features_scenario_lacks_the_array() {
    let resp = app().oneshot(get("/scenario/no-features")).await.unwrap();
    let doc = body_json(resp).await;
    assert!(doc.get("features").is_none());
}

#[tokio::test]
async fn partial_scenario_drops_one_magnitude() {
    let resp = app().oneshot(get("/scenario/partial")).await.unwrap();
    let doc = body_json(resp).await;
    let features = doc["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);
    assert!(features[1]["properties"].get("mag").is_none());
    assert!(features[0]["properties"]["mag"].is_number());
    assert!(features[2]["properties"]["mag"].is_number());
}

#[tokio::test]
async fn status_scenario_uses_requested_code() {
    let resp = app().oneshot(get("/scenario/status/503")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(get("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
