use httpmock::prelude::*;
use serde_json::json;

use customer::contract::{CustomerRolesApi, RolesError};
use customer::infra::rpc::HttpRolesClient;
use customer::CustomerConfig;

fn client_for(base_url: String) -> HttpRolesClient {
    HttpRolesClient::from_config(&CustomerConfig {
        roles_base_url: base_url,
        request_timeout_ms: 2000,
    })
    .unwrap()
}

#[tokio::test]
async fn check_user_role_hits_the_method_endpoint() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/method/check_user_role")
            .query_param("email", "jane@example.com");
        then.status(200).json_body(json!({"exists": true}));
    });

    let client = client_for(server.base_url());
    let check = client.check_user_role("jane@example.com").await.unwrap();

    assert!(check.exists);
    mock.assert();
}

#[tokio::test]
async fn negative_answer_is_not_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/method/check_user_role");
        then.status(200).json_body(json!({"exists": false}));
    });

    let client = client_for(server.base_url());
    let check = client.check_user_role("nobody@example.com").await.unwrap();
    assert!(!check.exists);
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/method/check_user_role");
        then.status(500);
    });

    let client = client_for(server.base_url());
    let err = client.check_user_role("jane@example.com").await.unwrap_err();
    assert!(matches!(err, RolesError::Status { code: 500 }));
}

#[tokio::test]
async fn malformed_body_maps_to_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/method/check_user_role");
        then.status(200).body("not json");
    });

    let client = client_for(server.base_url());
    let err = client.check_user_role("jane@example.com").await.unwrap_err();
    assert!(matches!(err, RolesError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_service_maps_to_transport_error() {
    // Nothing listens on this port.
    let client = client_for("http://127.0.0.1:1".to_string());
    let err = client.check_user_role("jane@example.com").await.unwrap_err();
    assert!(matches!(err, RolesError::Transport { .. }));
}
