//! Fetch-and-parse against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then executes the core's
//! requests over real HTTP with ureq. Validates that request building and
//! response parsing agree with what an FDSN-style server actually serves.

use quake_core::{FailureKind, FeedQuery, HttpRequest, HttpResponse, QuakeClient};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Status codes are returned as data so the core decides what a non-2xx
/// response means.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut call = agent.get(&req.url);
    for (key, value) in &req.headers {
        call = call.header(key, value);
    }
    let mut response = call.call().expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the mock server on a random port and return its address.
fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn get(url: String) -> HttpResponse {
    execute(HttpRequest {
        method: quake_core::HttpMethod::Get,
        url,
        headers: Vec::new(),
    })
}

#[test]
fn fetch_and_parse_over_http() {
    let addr = start_server();
    let base = format!("http://{addr}{}", mock_server::QUERY_PATH);
    let client = QuakeClient::new(&base);

    // Step 1: default query, newest first, everything above 6.
    let req = client.build_feed_request(&FeedQuery::new("6", "time"));
    let records = client.parse_feed_response(execute(req)).unwrap();
    let places: Vec<&str> = records.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(places, ["88km N of Yelizovo, Russia", "Fiji region"]);

    // Step 2: everything, ordered by magnitude.
    let req = client.build_feed_request(&FeedQuery::new("0", "magnitude"));
    let records = client.parse_feed_response(execute(req)).unwrap();
    assert_eq!(records.len(), 5);
    assert!(records.windows(2).all(|w| w[0].magnitude >= w[1].magnitude));

    // Step 3: the event without a url gets a constructed detail link.
    let fiji = records
        .iter()
        .find(|r| r.location == "South of the Fiji Islands")
        .unwrap();
    assert_eq!(
        fiji.detail_url,
        "https://earthquake.usgs.gov/earthquakes/eventpage/us1000e"
    );

    // Step 4: nothing that large; empty success.
    let req = client.build_feed_request(&FeedQuery::new("9.5", "time"));
    let records = client.parse_feed_response(execute(req)).unwrap();
    assert!(records.is_empty());

    // Step 5: server rejects the magnitude; network-kind failure.
    let req = client.build_feed_request(&FeedQuery::new("huge", "time"));
    let err = client.parse_feed_response(execute(req)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Network);

    // Step 6: same query twice yields equal records.
    let req = client.build_feed_request(&FeedQuery::default());
    let first = client.parse_feed_response(execute(req.clone())).unwrap();
    let second = client.parse_feed_response(execute(req)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn scenarios_over_http() {
    let addr = start_server();
    let client = QuakeClient::new(&format!("http://{addr}{}", mock_server::QUERY_PATH));

    let records = client
        .parse_feed_response(get(format!("http://{addr}/scenario/partial")))
        .unwrap();
    assert_eq!(records.len(), 2);

    let err = client
        .parse_feed_response(get(format!("http://{addr}/scenario/not-json")))
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parse);

    let err = client
        .parse_feed_response(get(format!("http://{addr}/scenario/no-features")))
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parse);

    let err = client
        .parse_feed_response(get(format!("http://{addr}/scenario/status/502")))
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Network);
}
