//! Integration tests for the webservice client.
//!
//! These tests run [`WebserviceClient`] against a mock server and verify the
//! requests it sends (paths, auth, content types) and how responses and
//! errors are turned into transport results.

use prestashop_mapper::clients::{HttpMethod, HttpRequest, Transport, TransportError, UploadFile};
use prestashop_mapper::rest::resources::Tax;
use prestashop_mapper::rest::{Display, QueryOptions};
use prestashop_mapper::{ApiKey, ApiUrl, WebserviceClient, WebserviceConfig};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TAX_1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<prestashop xmlns:xlink="http://www.w3.org/1999/xlink">
  <tax><id><![CDATA[1]]></id><rate><![CDATA[21.000]]></rate></tax>
</prestashop>"#;

const UNAUTHORIZED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<prestashop xmlns:xlink="http://www.w3.org/1999/xlink">
  <errors>
    <error>
      <code><![CDATA[17]]></code>
      <message><![CDATA[Authentication key is empty]]></message>
    </error>
  </errors>
</prestashop>"#;

/// `TESTKEY:` in base64.
const BASIC_AUTH: &str = "Basic VEVTVEtFWTo=";

fn create_client(server: &MockServer, tries: u32) -> WebserviceClient {
    let config = WebserviceConfig::builder()
        .api_url(ApiUrl::new(server.uri()).unwrap())
        .api_key(ApiKey::new("TESTKEY").unwrap())
        .user_agent_prefix("Catalog Sync")
        .tries(tries)
        .build()
        .unwrap();
    WebserviceClient::new(&config).unwrap()
}

fn xml_response(code: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(code).set_body_raw(body, "text/xml")
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_read_sends_basic_auth_and_parses_entity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/1"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(xml_response(200, TAX_1))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let tax = Tax::MAPPER.find(&client, 1).await.unwrap().unwrap();

    assert_eq!(tax["id"], 1);
    assert_eq!(tax["rate"], "21.000");
}

#[tokio::test]
async fn test_read_encodes_query_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes"))
        .and(query_param("filter[active]", "1"))
        .and(query_param("display", "[id,rate]"))
        .and(query_param("limit", "0,10"))
        .respond_with(xml_response(
            200,
            "<prestashop><taxes><tax><id>1</id><rate>21.000</rate></tax></taxes></prestashop>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let options = QueryOptions::new()
        .filter("active", 1)
        .display(Display::fields(["id", "rate"]))
        .page(0, 10);
    let result = Tax::MAPPER.query(&client, options).await.unwrap();

    assert_eq!(result.records().map(<[_]>::len), Some(1));
}

#[tokio::test]
async fn test_user_agent_carries_prefix() {
    let server = MockServer::start().await;
    let client = create_client(&server, 1);
    assert!(client
        .user_agent()
        .starts_with("Catalog Sync | PrestaShop Mapper v"));

    Mock::given(method("GET"))
        .and(path("/api/taxes"))
        .and(header("user-agent", client.user_agent()))
        .respond_with(xml_response(200, "<prestashop><taxes/></prestashop>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = Tax::MAPPER.query(&client, QueryOptions::new()).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_missing_entity_reads_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = create_client(&server, 1);

    assert!(Tax::MAPPER.find(&client, 9).await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_body_reads_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let document = client
        .read("taxes", Some(1), &QueryOptions::new())
        .await
        .unwrap();

    assert!(document.is_none());
}

#[tokio::test]
async fn test_check_and_delete_map_not_found_to_false() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/api/taxes/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/api/taxes/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/taxes/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/taxes/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = create_client(&server, 1);

    assert!(Tax::MAPPER.exists(&client, 1).await.unwrap());
    assert!(!Tax::MAPPER.exists(&client, 2).await.unwrap());
    assert!(Tax::MAPPER.destroy(&client, 1).await.unwrap());
    assert!(!Tax::MAPPER.destroy(&client, 2).await.unwrap());
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_update_puts_merged_xml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/1"))
        .respond_with(xml_response(200, TAX_1))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/taxes/1"))
        .and(header("content-type", "text/xml"))
        .and(body_string_contains("<rate><![CDATA[20.000]]></rate>"))
        .and(body_string_contains("<id><![CDATA[1]]></id>"))
        .respond_with(xml_response(
            200,
            "<prestashop><tax><id>1</id><rate>20.000</rate></tax></prestashop>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let partial = serde_json::json!({"rate": "20.000"})
        .as_object()
        .cloned()
        .unwrap();
    let updated = Tax::MAPPER.update(&client, 1, partial).await.unwrap().unwrap();

    assert_eq!(updated["rate"], "20.000");
}

#[tokio::test]
async fn test_upload_posts_multipart_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/images/products/42"))
        .and(body_string_contains("name=\"image\""))
        .and(body_string_contains("filename=\"front.png\""))
        .and(body_string_contains("Content-Type: image/png"))
        .respond_with(xml_response(
            200,
            "<prestashop><image><id>7</id></image></prestashop>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let file = UploadFile::new("front.png", "image/png", b"not really a png".to_vec());
    let document = client
        .upload("images", "products", 42, file)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(document["image"]["id"], 7);
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_error_document_message_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes"))
        .respond_with(xml_response(401, UNAUTHORIZED))
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let result = client.read("taxes", None, &QueryOptions::new()).await;

    match result {
        Err(TransportError::Response(error)) => {
            assert_eq!(error.code, 401);
            assert_eq!(error.message, "Authentication key is empty");
        }
        other => panic!("expected a response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/1"))
        .respond_with(xml_response(200, TAX_1))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 3);
    let tax = Tax::MAPPER.find(&client, 1).await.unwrap();

    assert!(tax.is_some());
}

#[tokio::test]
async fn test_unusable_retry_after_waits_the_fixed_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "inf"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/1"))
        .respond_with(xml_response(200, TAX_1))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 2);
    let tax = Tax::MAPPER.find(&client, 1).await.unwrap();

    assert!(tax.is_some());
}

#[tokio::test]
async fn test_retries_give_up_after_configured_tries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&server)
        .await;

    let client = create_client(&server, 2);
    let result = client.read("taxes", Some(1), &QueryOptions::new()).await;

    match result {
        Err(TransportError::MaxRetries(error)) => {
            assert_eq!(error.code, 429);
            assert_eq!(error.tries, 2);
        }
        other => panic!("expected max retries, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/taxes/1"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 3);
    let result = client.read("taxes", Some(1), &QueryOptions::new()).await;

    assert!(matches!(
        result,
        Err(TransportError::Response(ref error)) if error.code == 400
    ));
}

#[tokio::test]
async fn test_invalid_request_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = create_client(&server, 1);

    let request = HttpRequest {
        http_method: HttpMethod::Post,
        path: "taxes".to_string(),
        body: None,
        query: Vec::new(),
    };
    let result = client.request(request).await;

    assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}
