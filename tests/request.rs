use davenport::{Body, Client, DavenportError, Method, RequestDescriptor};
use serde::{Serialize, Serializer};
use serde_json::{Value, json};
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_query_values_are_stringified_on_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/db/_design/app/_view/by_key"))
        .and(query_param("startkey", "[\"a\",1]"))
        .and(query_param("limit", "25"))
        .and(query_param("stale", "ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .mount(&server)
        .await;

    let client = Client::new();
    let url = format!("{}/db/_design/app/_view/by_key", server.uri());
    let query = json!({"startkey": ["a", 1], "limit": 25, "stale": "ok"});

    let completion = client.get_with_query(&url, &query).await.unwrap();
    assert_eq!(completion.body, Body::Json(json!({"rows": []})));
}

#[tokio::test]
async fn post_sends_a_json_body_with_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/db"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"_id": "doc-1", "value": 7})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"ok": true, "id": "doc-1", "rev": "1-abc"})),
        )
        .mount(&server)
        .await;

    let client = Client::new();
    let doc = json!({"_id": "doc-1", "value": 7});

    let completion = client.post(&format!("{}/db", server.uri()), &doc).await.unwrap();
    assert_eq!(
        completion.body.as_json().and_then(|v| v.get("rev")).cloned(),
        Some(Value::String("1-abc".into()))
    );
}

#[tokio::test]
async fn put_sends_a_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/db/doc-1"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"value": 8})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = Client::new();
    let completion = client
        .put(&format!("{}/db/doc-1", server.uri()), &json!({"value": 8}))
        .await
        .unwrap();
    assert_eq!(completion.response.status(), 201);
}

#[tokio::test]
async fn head_with_empty_json_body_succeeds_as_null() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/db/doc-1"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/json"))
        .mount(&server)
        .await;

    let client = Client::new();
    let completion = client
        .head(&format!("{}/db/doc-1", server.uri()))
        .await
        .unwrap();
    assert_eq!(completion.body, Body::Json(Value::Null));
}

#[tokio::test]
async fn delete_issues_a_bare_request() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/db/doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = Client::new();
    let completion = client
        .delete(&format!("{}/db/doc-1", server.uri()))
        .await
        .unwrap();
    assert_eq!(completion.body, Body::Json(json!({"ok": true})));
}

#[tokio::test]
async fn issue_executes_a_prebuilt_descriptor() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/db/doc-2"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true, "id": "doc-2"})))
        .mount(&server)
        .await;

    let mut request = RequestDescriptor::new(Method::Put, format!("{}/db/doc-2", server.uri()));
    request.body = Some(r#"{"value":2}"#.to_owned());
    request.content_type = Some("application/json");

    let client = Client::new();
    let completion = client.issue(request).await.unwrap();
    assert_eq!(completion.response.status(), 201);
}

struct Cyclic;

impl Serialize for Cyclic {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("cyclic structure"))
    }
}

#[tokio::test]
async fn unserializable_payload_never_issues_a_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new();
    let err = client
        .post(&format!("{}/db", server.uri()), &Cyclic)
        .await
        .unwrap_err();

    assert!(matches!(err, DavenportError::Encode(_)));
    assert_eq!(err.status(), None);
    server.verify().await;
}
