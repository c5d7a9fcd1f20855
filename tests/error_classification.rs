//! Tests for error classification logic

use settler::client::{classify, ErrorBody};
use settler::{Error, ErrorKind};

#[test]
fn test_named_statuses() {
    let cases = vec![
        (401u16, ErrorKind::Authentication),
        (403, ErrorKind::Authentication),
        (404, ErrorKind::NotFound),
        (422, ErrorKind::Validation),
        (429, ErrorKind::RateLimit),
    ];

    for (status, kind) in cases {
        let err = classify(status, r#"{"message":"m","error":"E"}"#);
        assert_eq!(err.kind(), kind, "status {} should be {}", status, kind);
        assert_eq!(err.status_code(), status);
        assert_eq!(err.message(), "m");
        assert_eq!(err.error_type(), Some("E"));
    }
}

#[test]
fn test_every_5xx_is_server() {
    for status in 500u16..=599 {
        let err = classify(status, "");
        assert!(
            matches!(err, Error::Server { status_code, .. } if status_code == status),
            "status {} should be a server error",
            status
        );
    }
}

#[test]
fn test_unlisted_4xx_is_generic() {
    for status in (400u16..500).filter(|s| ![401, 403, 404, 422, 429].contains(s)) {
        let err = classify(status, r#"{"message":"nope"}"#);
        assert_eq!(err.kind(), ErrorKind::Generic, "status {}", status);
        assert!(matches!(err, Error::Api { .. }));
    }
}

#[test]
fn test_body_fallbacks() {
    assert_eq!(ErrorBody::parse("upstream connect error").message, "upstream connect error");
    assert_eq!(ErrorBody::parse("").message, "Unknown error");
    assert_eq!(ErrorBody::parse(r#"{"message":42}"#).message, "Unknown error");
}

#[test]
fn test_display_formats() {
    assert_eq!(
        classify(404, r#"{"message":"job not found"}"#).to_string(),
        "Not found: job not found"
    );
    assert_eq!(
        classify(500, r#"{"message":"db down"}"#).to_string(),
        "Server error (500): db down"
    );
    assert_eq!(
        classify(429, "").to_string(),
        "Rate limit exceeded: Unknown error"
    );
}
