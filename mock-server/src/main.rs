use tokio::net::TcpListener;

/// Serves the mock feed on `127.0.0.1:$PORT` (default 3000).
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = TcpListener::bind(("127.0.0.1", port.parse().unwrap_or(3000))).await?;
    let addr = listener.local_addr()?;
    println!("feed:      http://{addr}{}", mock_server::QUERY_PATH);
    println!("scenarios: http://{addr}/scenario/{{empty,not-json,no-features,partial,status/<code>,stall}}");
    mock_server::run(listener).await
}
