use std::collections::BTreeSet;

use serde_json::json;

use petstack_model::event::ProxyRequest;

use crate::{Harness, json_body};

#[tokio::test]
async fn test_should_list_empty_table() {
    let harness = Harness::new();
    let resp = harness.send(ProxyRequest::new("GET", "/owners")).await;
    assert_eq!(resp.status_code, 200);
    assert_eq!(json_body(&resp), json!({"owners": []}));
}

#[tokio::test]
async fn test_should_union_every_page_without_duplicates() {
    let harness = Harness::with_page_size(2);
    let ids: Vec<String> = (0..7).map(|i| format!("owner-{i}")).collect();
    for id in &ids {
        harness.create_owner(id).await;
    }

    let resp = harness.send(ProxyRequest::new("GET", "/owners")).await;
    assert_eq!(resp.status_code, 200);

    let body = json_body(&resp);
    let owners = body["owners"].as_array().unwrap();
    assert_eq!(owners.len(), ids.len());

    let listed: BTreeSet<&str> = owners
        .iter()
        .map(|owner| owner["ownerid"].as_str().unwrap())
        .collect();
    let expected: BTreeSet<&str> = ids.iter().map(String::as_str).collect();
    assert_eq!(listed, expected);
}

#[tokio::test]
async fn test_should_list_when_last_page_is_full() {
    let harness = Harness::with_page_size(3);
    for id in ["a", "b", "c", "d", "e", "f"] {
        harness.create_owner(id).await;
    }
    let body = json_body(&harness.send(ProxyRequest::new("GET", "/owners")).await);
    assert_eq!(body["owners"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_should_reflect_updates_and_deletes() {
    let harness = Harness::with_page_size(1);
    for id in ["a", "b", "c"] {
        harness.create_owner(id).await;
    }
    harness
        .send(ProxyRequest::new("DELETE", "/owner").with_body(r#"{"ownerId": "b"}"#))
        .await;
    harness
        .send(
            ProxyRequest::new("PATCH", "/owner")
                .with_body(r#"{"ownerId": "c", "updateKey": "age", "updateValue": 8}"#),
        )
        .await;

    let body = json_body(&harness.send(ProxyRequest::new("GET", "/owners")).await);
    let owners = body["owners"].as_array().unwrap();
    assert_eq!(owners.len(), 2);
    assert_eq!(owners[0]["ownerid"], json!("a"));
    assert_eq!(owners[1]["age"], json!(8));
}
