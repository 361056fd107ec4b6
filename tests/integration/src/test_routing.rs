use serde_json::json;

use petstack_model::event::{ProxyRequest, ProxyResponse};

use crate::{Harness, assert_bad_request, json_body};

fn assert_cors_headers(resp: &ProxyResponse) {
    assert_eq!(resp.headers["Content-Type"], "application/json");
    assert_eq!(resp.headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(
        resp.headers["Access-Control-Allow-Methods"],
        "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    );
    assert_eq!(resp.headers["Access-Control-Allow-Headers"], "Content-Type");
}

#[tokio::test]
async fn test_should_report_operational_status() {
    let harness = Harness::new();
    let resp = harness.send(ProxyRequest::new("GET", "/status")).await;
    assert_eq!(resp.status_code, 200);
    assert_eq!(json_body(&resp), json!("Service is operational"));
    assert_cors_headers(&resp);
}

#[tokio::test]
async fn test_should_return_not_found_for_unmatched_routes() {
    let harness = Harness::new();
    let unmatched = [
        ("GET", "/pets"),
        ("PUT", "/owner"),
        ("POST", "/owners"),
        ("DELETE", "/owners"),
        ("get", "/owner"),
        ("GET", "/owner/"),
        ("GET", "/Owner"),
        ("GET", ""),
    ];
    for (method, path) in unmatched {
        let resp = harness.send(ProxyRequest::new(method, path)).await;
        assert_eq!(resp.status_code, 404, "{method} {path}");
        assert_eq!(json_body(&resp), json!("404 Not Found"));
        assert_cors_headers(&resp);
    }
}

#[tokio::test]
async fn test_should_return_not_found_for_event_without_method() {
    let harness = Harness::new();
    let resp = harness.send(ProxyRequest::default()).await;
    assert_eq!(resp.status_code, 404);
}

#[tokio::test]
async fn test_should_answer_preflight_on_any_path() {
    let harness = Harness::new();
    for path in ["/owner", "/owners", "/status", "/anything/else"] {
        let resp = harness.send(ProxyRequest::new("OPTIONS", path)).await;
        assert_eq!(resp.status_code, 200, "{path}");
        assert!(resp.body.is_empty());
        assert_cors_headers(&resp);
    }
}

#[tokio::test]
async fn test_should_attach_cors_headers_to_errors() {
    let harness = Harness::new();
    let resp = harness.send(ProxyRequest::new("POST", "/owner")).await;
    assert_bad_request(&resp, "Missing request body");
    assert_cors_headers(&resp);
}

#[tokio::test]
async fn test_should_reject_malformed_json_before_any_store_call() {
    let harness = Harness::new();
    for method in ["POST", "PATCH", "DELETE"] {
        let resp = harness
            .send(ProxyRequest::new(method, "/owner").with_body("{\"ownerid\": "))
            .await;
        assert_bad_request(&resp, "Invalid JSON in request body");
    }
    assert!(harness.store.is_empty());
}

#[tokio::test]
async fn test_should_treat_empty_body_as_missing() {
    let harness = Harness::new();
    for method in ["POST", "PATCH", "DELETE"] {
        let resp = harness
            .send(ProxyRequest::new(method, "/owner").with_body(""))
            .await;
        assert_bad_request(&resp, "Missing request body");
    }
}

#[tokio::test]
async fn test_should_accept_raw_gateway_event() {
    let harness = Harness::new();
    let event: ProxyRequest = serde_json::from_value(json!({
        "resource": "/status",
        "path": "/status",
        "httpMethod": "GET",
        "headers": null,
        "queryStringParameters": null,
        "requestContext": {"stage": "prod"},
        "body": null,
        "isBase64Encoded": false
    }))
    .unwrap();
    let resp = harness.send(event).await;
    assert_eq!(resp.status_code, 200);

    let wire = serde_json::to_value(&resp).unwrap();
    assert_eq!(wire["statusCode"], json!(200));
    assert_eq!(wire["body"], json!("\"Service is operational\""));
}
