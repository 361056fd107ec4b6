use serde_json::{Value, json};

use petstack_core::OwnerStore;
use petstack_model::attribute_value::AttributeValue;

use crate::{Harness, TEST_BUCKET, TEST_ENDPOINT, assert_bad_request, json_body, owner_body};

#[tokio::test]
async fn test_should_create_owner_with_two_scoped_urls() {
    let harness = Harness::new();
    let body = harness.create_owner("o1").await;

    assert_eq!(body["Operation"], json!("SAVE"));
    assert_eq!(body["Message"], json!("SUCCESS"));
    assert_eq!(
        body["Item"],
        json!({"ownerid": "o1", "ownername": "Ann", "petname": "Rex", "age": 7})
    );

    let upload_url = body["uploadUrl"].as_str().unwrap();
    let file_url = body["fileUrl"].as_str().unwrap();
    assert_ne!(upload_url, file_url);

    let object_prefix = format!("{TEST_ENDPOINT}/{TEST_BUCKET}/o1.png?");
    assert!(upload_url.starts_with(&object_prefix), "{upload_url}");
    assert!(file_url.starts_with(&object_prefix), "{file_url}");

    for url in [upload_url, file_url] {
        assert!(url.contains("X-Amz-Algorithm=AWS4-HMAC-SHA256"));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("X-Amz-Signature="));
    }
    let upload_url = upload_url.to_ascii_lowercase();
    let file_url = file_url.to_ascii_lowercase();
    assert!(upload_url.contains("x-amz-signedheaders=content-type%3bhost"), "{upload_url}");
    assert!(file_url.contains("x-amz-signedheaders=host"), "{file_url}");
    assert!(!file_url.contains("content-type"), "{file_url}");
}

#[tokio::test]
async fn test_should_persist_only_owner_fields() {
    let harness = Harness::new();
    let mut body = owner_body("o1");
    body["color"] = json!("brown");
    let resp = harness.post_owner(&body).await;
    assert_eq!(resp.status_code, 200);

    assert_eq!(harness.store.len(), 1);
    let stored = harness
        .store
        .get_item(&AttributeValue::from("o1"))
        .await
        .unwrap()
        .unwrap();
    let fields: Vec<&str> = stored.keys().map(String::as_str).collect();
    assert_eq!(fields, ["age", "ownerid", "ownername", "petname"]);
}

#[tokio::test]
async fn test_should_name_first_missing_field() {
    let fields = ["ownerid", "ownername", "petname", "age", "fileName", "fileType"];
    for field in fields {
        for missing in [Value::Null, json!(""), json!(0), json!(false)] {
            let harness = Harness::new();
            let mut body = owner_body("o1");
            body[field] = missing.clone();

            let resp = harness.post_owner(&body).await;
            assert_bad_request(&resp, &format!("Missing or invalid field: {field}"));
            assert!(harness.store.is_empty(), "{field} = {missing}");
        }

        let harness = Harness::new();
        let mut body = owner_body("o1");
        body.as_object_mut().unwrap().remove(field);
        let resp = harness.post_owner(&body).await;
        assert_bad_request(&resp, &format!("Missing or invalid field: {field}"));
    }
}

#[tokio::test]
async fn test_should_report_fields_in_declared_order() {
    let harness = Harness::new();
    let resp = harness
        .post_owner(&json!({"petname": "Rex", "fileType": "image/png"}))
        .await;
    assert_bad_request(&resp, "Missing or invalid field: ownerid");

    let resp = harness
        .post_owner(&json!({"ownerid": "o1", "ownername": "Ann", "fileName": "a.png"}))
        .await;
    assert_bad_request(&resp, "Missing or invalid field: petname");
}

#[tokio::test]
async fn test_should_reject_non_string_file_fields() {
    let harness = Harness::new();
    let mut body = owner_body("o1");
    body["fileType"] = json!(["image/png"]);
    let resp = harness.post_owner(&body).await;
    assert_bad_request(&resp, "Missing or invalid field: fileType");
    assert!(harness.store.is_empty());
}

#[tokio::test]
async fn test_should_reject_non_object_body() {
    let harness = Harness::new();
    for raw in ["[1, 2]", "\"owner\"", "42"] {
        let resp = harness
            .send(petstack_model::event::ProxyRequest::new("POST", "/owner").with_body(raw))
            .await;
        assert_bad_request(&resp, "Missing or invalid field: ownerid");
    }
}

#[tokio::test]
async fn test_should_reject_unusable_bucket_without_persisting() {
    for bucket in [None, Some(""), Some("arn:aws:s3:::pet-uploads")] {
        let harness = Harness::with_bucket(bucket);
        let resp = harness.post_owner(&owner_body("o1")).await;
        assert_bad_request(
            &resp,
            "Invalid or missing S3_BUCKET_NAME environment variable",
        );
        assert!(harness.store.is_empty(), "{bucket:?}");

        let status = harness
            .send(petstack_model::event::ProxyRequest::new("GET", "/status"))
            .await;
        assert_eq!(status.status_code, 200);
    }
}

#[tokio::test]
async fn test_should_overwrite_existing_owner() {
    let harness = Harness::new();
    harness.create_owner("o1").await;

    let mut body = owner_body("o1");
    body["petname"] = json!("Max");
    let resp = harness.post_owner(&body).await;
    assert_eq!(resp.status_code, 200);

    assert_eq!(harness.store.len(), 1);
    let record = json_body(&harness.get_owner("o1").await);
    assert_eq!(record["petname"], json!("Max"));
}

#[tokio::test]
async fn test_should_surface_store_rejection_of_non_string_key() {
    let harness = Harness::new();
    let mut body = owner_body("o1");
    body["ownerid"] = json!(12);
    let resp = harness.post_owner(&body).await;
    assert_eq!(resp.status_code, 400);
    let message = json_body(&resp);
    assert!(
        message.as_str().unwrap().contains("expected: S actual: N"),
        "{message}"
    );
    assert!(harness.store.is_empty());
}
