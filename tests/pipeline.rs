mod common;

use std::sync::Arc;

use axum::{
    body::to_bytes,
    http::{Method, StatusCode},
    response::Response,
};
use common::{Level, RecordingSink};
use faultline::models::ValidationDetail;
use faultline::services::classifier::ClassifierRegistry;
use faultline::services::pipeline::{ClassifierStage, Flow, Stage};
use faultline::{Config, ErrorValue, HttpError, Pipeline, RawError, RequestInfo, ResponseFormat};
use serde_json::{Value, json};

fn pipeline(config: &Config) -> (Pipeline, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let pipeline = Pipeline::builder(config).sink(sink.clone()).build();
    (pipeline, sink)
}

fn request(format: ResponseFormat) -> RequestInfo {
    RequestInfo::new(Method::GET, "/api/things").with_format(format)
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn eacces() -> RawError {
    RawError::default()
        .with_code("EACCES")
        .with_bind_target(80, "0.0.0.0")
}

#[test_log::test(tokio::test)]
async fn transport_error_in_development_shows_detail() {
    let (pipeline, sink) = pipeline(&Config::development());

    let response = pipeline.run(eacces(), &request(ResponseFormat::Text));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "Error 500 - InternalServerError: port 80 requires elevated privileges"
    );
    assert_eq!(
        sink.entries(),
        vec![(
            Level::Error,
            "port 80 requires elevated privileges".to_owned()
        )]
    );
}

#[test_log::test(tokio::test)]
async fn transport_error_in_production_is_redacted_but_logged() {
    let (pipeline, sink) = pipeline(&Config::production());

    let response = pipeline.run(eacces(), &request(ResponseFormat::Text));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "Error 500 - InternalServerError: Internal server error"
    );
    assert_eq!(
        sink.last(),
        Some((
            Level::Error,
            "port 80 requires elevated privileges".to_owned()
        ))
    );
}

#[test_log::test(tokio::test)]
async fn permission_denied_outside_bind_is_not_a_transport_error() {
    let (pipeline, sink) = pipeline(&Config::development());
    let error = RawError::from(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "open /etc/shadow: permission denied",
    ));

    let response = pipeline.run(error, &request(ResponseFormat::Text));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "Error 500 - InternalServerError: open /etc/shadow: permission denied"
    );
    assert_eq!(
        sink.entries(),
        vec![(
            Level::Error,
            "open /etc/shadow: permission denied".to_owned()
        )]
    );
}

#[test_log::test(tokio::test)]
async fn validation_error_renders_first_detail_as_json() {
    let (pipeline, sink) = pipeline(&Config::production());
    let raw = RawError::validation(vec![ValidationDetail::new("\"email\" is required")]);

    let response = pipeline.run(raw, &request(ResponseFormat::Json));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        body,
        json!({ "status": 400, "name": "BadRequest", "message": "\"email\" is required" })
    );
    assert_eq!(sink.last().map(|(level, _)| level), Some(Level::Warn));
}

#[test_log::test(tokio::test)]
async fn silent_auth_error_renders_invalid_token() {
    let (pipeline, _) = pipeline(&Config::production());

    let response = pipeline.run(RawError::unauthorized(None), &request(ResponseFormat::Json));

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], 401);
    assert_eq!(body["name"], "Unauthorized");
    assert_eq!(body["message"], "Invalid token");
}

#[test_log::test(tokio::test)]
async fn unrecognized_errors_keep_their_own_status() {
    let (pipeline, sink) = pipeline(&Config::production());
    let raw = RawError::new("Cannot GET /nope").with_status(404);

    let response = pipeline.run(raw, &request(ResponseFormat::Text));

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_text(response).await,
        "Error 404 - NotFound: Cannot GET /nope"
    );
    assert_eq!(sink.last().map(|(level, _)| level), Some(Level::Warn));
}

#[test_log::test(tokio::test)]
async fn unrecognized_errors_without_status_are_500() {
    let (pipeline, sink) = pipeline(&Config::development());
    let raw = RawError::new("undefined is not a function").with_name("TypeError");

    let response = pipeline.run(raw, &request(ResponseFormat::Text));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "Error 500 - TypeError: undefined is not a function"
    );
    assert_eq!(sink.last().map(|(level, _)| level), Some(Level::Error));
}

#[test_log::test(tokio::test)]
async fn families_left_out_of_the_registry_are_not_classified() {
    let config = Config {
        production: false,
        classifiers: ClassifierRegistry::parse("validation").unwrap(),
    };
    let (pipeline, _) = pipeline(&config);

    let response = pipeline.run(RawError::unauthorized(None), &request(ResponseFormat::Json));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn classifying_a_normalized_error_is_a_no_op() {
    let stage = ClassifierStage::default();
    let request = request(ResponseFormat::Text);
    let raw = RawError::validation(vec![ValidationDetail::new("\"email\" is required")]);

    let Flow::Next(ErrorValue::Normalized(first)) = stage.handle(ErrorValue::Raw(raw), &request)
    else {
        panic!("validation error should be normalized");
    };
    let Flow::Next(ErrorValue::Normalized(second)) =
        stage.handle(ErrorValue::Normalized(first.clone()), &request)
    else {
        panic!("normalized error should pass through");
    };

    assert_eq!(first, second);
}

#[test]
fn unmatched_raw_errors_pass_through_unchanged() {
    let stage = ClassifierStage::default();
    let raw = RawError::new("boom").with_status("teapot");

    let Flow::Next(ErrorValue::Raw(after)) =
        stage.handle(ErrorValue::Raw(raw.clone()), &request(ResponseFormat::Text))
    else {
        panic!("unrecognized error should pass through raw");
    };

    assert_eq!(after, raw);
}

/// Marks every error as safe to show, ahead of the renderer.
struct ExposeEverything;

impl Stage for ExposeEverything {
    fn handle(&self, error: ErrorValue, _request: &RequestInfo) -> Flow {
        Flow::Next(ErrorValue::Normalized(error.into_http_error().exposed(true)))
    }
}

#[tokio::test]
async fn caller_assembled_chains_run_in_order() {
    let stages: Vec<Arc<dyn Stage>> = vec![
        Arc::new(ClassifierStage::default()),
        Arc::new(ExposeEverything),
    ];
    // no renderer stage: the pipeline's fallback renders
    let pipeline = Pipeline::from_stages(stages, true);

    let response = pipeline.run(eacces(), &request(ResponseFormat::Text));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "Error 500 - InternalServerError: port 80 requires elevated privileges"
    );
}

#[tokio::test]
async fn pre_normalized_errors_skip_classification() {
    let (pipeline, _) = pipeline(&Config::production());
    let error = HttpError::new(StatusCode::SERVICE_UNAVAILABLE, "down for maintenance")
        .exposed(true);

    let response = pipeline.run(error, &request(ResponseFormat::Text));

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_text(response).await,
        "Error 503 - ServiceUnavailable: down for maintenance"
    );
}
