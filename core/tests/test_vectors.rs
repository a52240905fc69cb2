//! Verify request building and response parsing against the JSON vectors in
//! `test-vectors/feed.json`.
//!
//! Each case names the query, the request it must produce, a simulated
//! response, and either the records or the failure kind expected from it.

use quake_core::{
    EarthquakeRecord, FailureKind, FeedQuery, HttpMethod, HttpResponse, QuakeClient,
};

const BASE_URL: &str = "http://localhost:3000/fdsnws/event/1/query";

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> FailureKind {
    match s {
        "Connectivity" => FailureKind::Connectivity,
        "Network" => FailureKind::Network,
        "Parse" => FailureKind::Parse,
        other => panic!("unknown failure kind: {other}"),
    }
}

#[test]
fn feed_test_vectors() {
    let raw = include_str!("../../test-vectors/feed.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = QuakeClient::new(BASE_URL);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query: FeedQuery = serde_json::from_value(case["query"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = client.build_feed_request(&query);
        assert_eq!(
            req.method,
            parse_method(expected_req["method"].as_str().unwrap()),
            "{name}: method"
        );
        let expected_url = format!(
            "http://localhost:3000{}",
            expected_req["path"].as_str().unwrap()
        );
        assert_eq!(req.url, expected_url, "{name}: url");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = client.parse_feed_response(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(
                err.kind(),
                parse_kind(expected_error.as_str().unwrap()),
                "{name}: failure kind"
            );
        } else {
            let records = result.unwrap();
            let expected: Vec<EarthquakeRecord> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(records, expected, "{name}: parsed result");
        }
    }
}
