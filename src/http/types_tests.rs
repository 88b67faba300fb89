//! Tests for HTTP request/response value types.

use super::*;
use http::{HeaderValue, StatusCode, header::CONTENT_TYPE};
use url::Url;

fn test_url() -> Url {
    Url::parse("https://api.example.com/api/v1/chargers/CHARGER_001/status").unwrap()
}

#[test]
fn get_request_has_no_body() {
    let request = HttpRequest::get(test_url());

    assert_eq!(request.method, http::Method::GET);
    assert!(request.body.is_none());
    assert!(request.headers.is_empty());
}

#[test]
fn post_and_put_use_expected_methods() {
    assert_eq!(HttpRequest::post(test_url()).method, http::Method::POST);
    assert_eq!(HttpRequest::put(test_url()).method, http::Method::PUT);
}

#[test]
fn with_body_sets_body() {
    let request = HttpRequest::post(test_url()).with_body(b"{\"status\":\"CHARGING\"}".to_vec());

    assert_eq!(request.body.as_deref(), Some(b"{\"status\":\"CHARGING\"}".as_slice()));
}

#[test]
fn with_header_appends_values() {
    let request = HttpRequest::get(test_url())
        .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

    let values: Vec<_> = request.headers.get_all(CONTENT_TYPE).iter().collect();
    assert_eq!(values.len(), 2);
}

#[test]
fn response_is_success_for_2xx_only() {
    let ok = HttpResponse::new(StatusCode::OK, http::HeaderMap::new(), vec![]);
    let not_found = HttpResponse::new(StatusCode::NOT_FOUND, http::HeaderMap::new(), vec![]);

    assert!(ok.is_success());
    assert!(!not_found.is_success());
}

#[test]
fn body_text_returns_utf8_body() {
    let response = HttpResponse::new(
        StatusCode::OK,
        http::HeaderMap::new(),
        b"{\"success\":true}".to_vec(),
    );

    assert_eq!(response.body_text(), Some("{\"success\":true}"));
}

#[test]
fn body_text_returns_none_for_invalid_utf8() {
    let response = HttpResponse::new(StatusCode::OK, http::HeaderMap::new(), vec![0xff, 0xfe]);

    assert!(response.body_text().is_none());
}
