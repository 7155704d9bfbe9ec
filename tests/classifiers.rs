use axum::http::StatusCode;
use faultline::SetupError;
use faultline::models::{ConnectionFailure, Origin, RawError, ValidationDetail};
use faultline::services::classifier::{
    ClassifierRegistry, ErrorFamily, classify_auth_error, classify_connection_error,
    classify_query_error, classify_server_error, classify_validation_error,
};

#[test]
fn address_in_use_names_port_and_address() {
    let raw = RawError::default()
        .with_code("EADDRINUSE")
        .with_bind_target(8090, "127.0.0.1");

    let error = classify_server_error(&raw);

    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error.message(), "port 8090 of 127.0.0.1 already in use");
    assert_eq!(error.name(), "InternalServerError");
    assert!(!error.expose());
}

#[test]
fn permission_denied_requires_elevated_privileges() {
    let raw = RawError::default()
        .with_code("EACCES")
        .with_bind_target(80, "0.0.0.0");

    let error = classify_server_error(&raw);

    assert_eq!(error.message(), "port 80 requires elevated privileges");
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn other_server_errors_keep_their_message_or_stringify() {
    let with_message = RawError::new("listener closed").with_code("EPIPE");
    assert_eq!(classify_server_error(&with_message).message(), "listener closed");

    let bare = RawError::default().with_name("SystemError");
    assert_eq!(classify_server_error(&bare).message(), "SystemError");
}

#[test]
fn every_connection_family_has_its_fixed_reason() {
    for failure in ConnectionFailure::ALL {
        let raw = RawError::connection(failure, "driver detail");
        let error = classify_connection_error(&raw);

        assert_eq!(
            error.message(),
            format!(
                "{} - Failed to connect to database: {}",
                failure.name(),
                failure.reason()
            )
        );
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[test]
fn connection_reason_table_is_exact() {
    let reason = |name: &str| ConnectionFailure::from_name(name).map(ConnectionFailure::reason);

    assert_eq!(reason("ConnectionRefusedError"), Some("connection refused."));
    assert_eq!(reason("AccessDeniedError"), Some("insufficient privileges."));
    assert_eq!(
        reason("ConnectionAcquireTimeoutError"),
        Some("connection not acquired due to timeout.")
    );
    assert_eq!(reason("ConnectionTimedOutError"), Some("connection timed out."));
    assert_eq!(reason("HostNotFoundError"), Some("hostname not found."));
    assert_eq!(reason("HostNotReachableError"), Some("hostname not reachable."));
    assert_eq!(
        reason("InvalidConnectionError"),
        Some("invalid connection parameters.")
    );
    assert_eq!(reason("ConnectionError"), None);
}

#[test]
fn unrecognized_connection_family_falls_back_to_original_message() {
    let raw = RawError::new("tls handshake eof")
        .with_name("ConnectionError")
        .with_origin(Origin::Connection);

    let error = classify_connection_error(&raw);

    assert_eq!(
        error.message(),
        "ConnectionError - Failed to connect to database: tls handshake eof"
    );
}

#[test]
fn empty_connection_name_is_treated_as_absent() {
    let raw = RawError::new("socket closed")
        .with_name("")
        .with_origin(Origin::Connection);

    assert_eq!(
        classify_connection_error(&raw).message(),
        "ConnectionError - Failed to connect to database: socket closed"
    );
}

#[test]
fn query_errors_append_the_statement() {
    let raw = RawError::new("relation \"records\" does not exist")
        .with_origin(Origin::Query)
        .with_sql("SELECT id FROM records");

    let error = classify_query_error(&raw);

    assert_eq!(
        error.message(),
        "relation \"records\" does not exist. Query: SELECT id FROM records"
    );
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn query_errors_without_statement_keep_their_message() {
    let raw = RawError::new("deadlock detected").with_origin(Origin::Query);
    assert_eq!(classify_query_error(&raw).message(), "deadlock detected");
}

#[test]
fn validation_uses_first_detail_regardless_of_count() {
    for count in 1..5 {
        let details = (0..count)
            .map(|i| ValidationDetail::new(format!("detail {i}")))
            .collect();
        let error = classify_validation_error(&RawError::validation(details));

        assert_eq!(error.message(), "detail 0");
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.name(), "BadRequest");
        assert!(error.expose());
    }
}

#[test]
fn empty_first_detail_falls_back_to_wrapped_message() {
    let raw = RawError::new("Validation failed").with_origin(Origin::Validation {
        details: vec![ValidationDetail::new("")],
        message: Some("\"age\" must be a number".into()),
    });

    assert_eq!(
        classify_validation_error(&raw).message(),
        "\"age\" must be a number"
    );
}

#[test]
fn validation_without_details_uses_wrapped_then_own_message() {
    let wrapped = RawError::new("Validation failed").with_origin(Origin::Validation {
        details: Vec::new(),
        message: Some("\"age\" must be a number".into()),
    });
    assert_eq!(
        classify_validation_error(&wrapped).message(),
        "\"age\" must be a number"
    );

    let bare = RawError::new("body is invalid").with_origin(Origin::Validation {
        details: Vec::new(),
        message: None,
    });
    assert_eq!(classify_validation_error(&bare).message(), "body is invalid");
}

#[test]
fn auth_errors_default_to_invalid_token() {
    let silent = classify_auth_error(&RawError::unauthorized(None));
    assert_eq!(silent.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(silent.message(), "Invalid token");
    assert_eq!(silent.name(), "Unauthorized");

    let empty = classify_auth_error(&RawError::unauthorized(Some(String::new())));
    assert_eq!(empty.message(), "Invalid token");

    let explained = classify_auth_error(&RawError::unauthorized(Some("jwt expired".into())));
    assert_eq!(explained.message(), "jwt expired");
}

#[test]
fn classification_carries_stack_and_expose_override() {
    let raw = RawError::connection(ConnectionFailure::Refused, "refused")
        .with_stack("caused by: Connection refused (os error 111)")
        .exposed(true);

    let error = classify_connection_error(&raw);

    assert_eq!(error.stack(), Some("caused by: Connection refused (os error 111)"));
    assert!(error.expose());
}

#[test]
fn registry_passes_unrecognized_errors_through() {
    let registry = ClassifierRegistry::default();

    assert_eq!(registry.classify(&RawError::new("boom")), None);
    assert_eq!(
        registry.classify(&RawError::new("nope").with_status(404)),
        None
    );
}

#[test]
fn registry_recognizes_each_family() {
    let registry = ClassifierRegistry::default();
    let cases = [
        (
            RawError::default().with_code("EACCES"),
            ErrorFamily::Transport,
        ),
        (
            RawError::default().with_name("HostNotFoundError"),
            ErrorFamily::Connection,
        ),
        (
            RawError::new("syntax error").with_origin(Origin::Query),
            ErrorFamily::Query,
        ),
        (RawError::validation(Vec::new()), ErrorFamily::Validation),
        (RawError::unauthorized(None), ErrorFamily::Unauthorized),
    ];

    for (raw, family) in cases {
        assert_eq!(registry.family_of(&raw), Some(family));
    }
}

#[test]
fn first_matching_family_wins() {
    let raw = RawError::unauthorized(None).with_code("EACCES");

    let default_order = ClassifierRegistry::default().classify(&raw).unwrap();
    assert_eq!(default_order.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let auth_first = ClassifierRegistry::new([ErrorFamily::Unauthorized, ErrorFamily::Transport])
        .classify(&raw)
        .unwrap();
    assert_eq!(auth_first.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn registry_parses_names_in_order_and_drops_duplicates() {
    let registry = ClassifierRegistry::parse("validation, auth,validation,").unwrap();
    assert_eq!(
        registry.families(),
        &[ErrorFamily::Validation, ErrorFamily::Unauthorized]
    );
}

#[test]
fn registry_rejects_unknown_names_at_setup() {
    let err = ClassifierRegistry::parse("validation,bogus").unwrap_err();
    assert!(matches!(err, SetupError::UnknownClassifier(name) if name == "bogus"));
}

