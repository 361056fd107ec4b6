use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use serde_json::{Value, json};

use petstack_http::handle_http_request;
use petstack_http::service::REQUEST_ID_HEADER;

use crate::{Harness, owner_body};

async fn call(
    harness: &Harness,
    method: &str,
    uri: &str,
    body: &str,
) -> (http::StatusCode, http::HeaderMap, String) {
    let req = http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Full::new(Bytes::from(body.to_owned())))
        .unwrap();
    let resp = handle_http_request(&harness.handler, req).await;
    let (parts, body) = resp.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    (
        parts.status,
        parts.headers,
        String::from_utf8(bytes.to_vec()).unwrap(),
    )
}

#[tokio::test]
async fn test_should_serve_create_and_get_over_http() {
    let harness = Harness::new();

    let (status, headers, _) =
        call(&harness, "POST", "/owner", &owner_body("o 1").to_string()).await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(headers.contains_key(REQUEST_ID_HEADER));

    let (status, _, body) = call(&harness, "GET", "/owner?ownerid=o%201", "").await;
    assert_eq!(status, http::StatusCode::OK);
    let record: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(record["ownerid"], json!("o 1"));
}

#[tokio::test]
async fn test_should_decode_plus_as_space_in_query() {
    let harness = Harness::new();
    harness.create_owner("o 2").await;

    let (status, _, body) = call(&harness, "GET", "/owner?ownerid=o+2", "").await;
    assert_eq!(status, http::StatusCode::OK);
    assert_ne!(body, "null");
}

#[tokio::test]
async fn test_should_map_statuses_over_http() {
    let harness = Harness::new();

    let (status, _, body) = call(&harness, "GET", "/nowhere", "").await;
    assert_eq!(status, http::StatusCode::NOT_FOUND);
    assert_eq!(body, "\"404 Not Found\"");

    let (status, _, body) = call(&harness, "POST", "/owner", "").await;
    assert_eq!(status, http::StatusCode::BAD_REQUEST);
    assert_eq!(body, "\"Missing request body\"");

    let (status, headers, body) = call(&harness, "OPTIONS", "/owner", "").await;
    assert_eq!(status, http::StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    );
}

#[tokio::test]
async fn test_should_reject_non_utf8_body_over_http() {
    let harness = Harness::new();
    let req = http::Request::builder()
        .method("POST")
        .uri("/owner")
        .body(Full::new(Bytes::from_static(b"{\"ownerid\": \"\xff\xfe\"}")))
        .unwrap();
    let resp = handle_http_request(&harness.handler, req).await;
    assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);

    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], br#""Invalid JSON in request body""#);
    assert!(harness.store.is_empty());
}
