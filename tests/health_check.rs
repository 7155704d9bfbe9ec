mod common;

use common::spawn_app;
use faultline::Config;

#[tokio::test]
async fn health_check_works() {
    let (address, sink) = spawn_app(Config::development()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/health-check"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(Some(0), response.content_length());
    assert_eq!(sink.count(), 0);
}
