//! Integration tests for the API client against a local mock server.

use std::time::Duration;

use chrono::NaiveDate;
use mockito::Matcher;
use onboard_forms::{FieldName, FormValues};
use onboard_lib::api::login::{self, INVALID_CREDENTIALS};
use onboard_lib::api::signup::SIGNUP_FAILED;
use onboard_lib::api::users::USERS_ERROR;
use onboard_lib::api::{LoginRequest, SignupRequest};
use onboard_lib::config::Endpoints;
use onboard_lib::error::{CONNECTION_MESSAGE, GENERIC_MESSAGE};
use onboard_lib::{ApiError, OnboardClient};
use serde_json::json;

fn client_for(server: &mockito::Server) -> OnboardClient {
    OnboardClient::builder()
        .url(server.url())
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}

// =============================================================================
// Login
// =============================================================================

mod login_endpoint {
    use super::*;

    #[tokio::test]
    async fn test_login_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/auth/login")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "usernameOrEmail": "me@example.com",
                "password": "secret1"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "abc"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let reply = client
            .login(&LoginRequest::new(" me@example.com ", "secret1"))
            .await
            .unwrap();

        assert_eq!(reply["token"], "abc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_success_with_empty_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/auth/login")
            .with_status(204)
            .create_async()
            .await;

        let reply = client_for(&server)
            .login(&LoginRequest::new("me@example.com", "secret1"))
            .await
            .unwrap();
        assert!(reply.is_null());
    }

    #[tokio::test]
    async fn test_login_rejected_without_json_is_an_alert() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/auth/login")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let err = client_for(&server)
            .login(&LoginRequest::new("me@example.com", "secret1"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
        assert!(login::failure_field_errors(&err).is_none());
    }

    #[tokio::test]
    async fn test_login_rejected_maps_to_field_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/auth/login")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Invalid credentials"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .login(&LoginRequest::new("me@example.com", "secret1"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.user_message(), "Invalid credentials");

        let errors = login::failure_field_errors(&err).unwrap();
        assert_eq!(errors.get(FieldName::Password), Some("Invalid credentials"));
        assert_eq!(errors.get(FieldName::Email), Some(INVALID_CREDENTIALS));
    }
}

// =============================================================================
// Signup
// =============================================================================

mod signup_endpoint {
    use super::*;

    fn form() -> FormValues {
        FormValues::new()
            .with(FieldName::Username, "jane_doe")
            .with(FieldName::Password, "Ab1!abcd")
            .with(FieldName::FullName, "Jane Doe")
            .with(FieldName::DateOfBirth, NaiveDate::from_ymd_opt(1990, 1, 31).unwrap())
            .with(FieldName::Address, "221B Baker Street")
            .with(FieldName::Country, "India")
            .with(FieldName::Email, "jane@example.com")
            .with(FieldName::PhoneNumber, "5551234567")
    }

    #[tokio::test]
    async fn test_signup_sends_wire_format() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/users")
            .match_body(Matcher::PartialJson(json!({
                "fullName": "Jane Doe",
                "dob": "1990-01-31",
                "phone": "5551234567"
            })))
            .with_status(201)
            .with_body(r#"{"id": 1}"#)
            .create_async()
            .await;

        let reply = client_for(&server)
            .signup(&SignupRequest::from_form(&form()))
            .await
            .unwrap();

        assert_eq!(reply["id"], 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_signup_failure_message_fallbacks() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/users")
            .with_status(409)
            .with_body(r#"{"error": "Username already exists"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .signup(&SignupRequest::from_form(&form()))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Username already exists");
    }

    #[tokio::test]
    async fn test_signup_failure_without_json() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/users")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .signup(&SignupRequest::from_form(&form()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(502));
        assert!(matches!(err, ApiError::Parse { .. }));
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
    }

    #[tokio::test]
    async fn test_signup_failure_json_without_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/users")
            .with_status(400)
            .with_body("{}")
            .create_async()
            .await;

        let err = client_for(&server)
            .signup(&SignupRequest::from_form(&form()))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), SIGNUP_FAILED);
    }

    #[tokio::test]
    async fn test_success_with_invalid_json_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/users")
            .with_status(200)
            .with_body("created")
            .create_async()
            .await;

        let err = client_for(&server)
            .signup(&SignupRequest::from_form(&form()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Parse { body: Some(ref b), .. } if b == "created"));
    }
}

// =============================================================================
// User list
// =============================================================================

mod users_endpoint {
    use super::*;

    async fn users_with_body(body: &str) -> Vec<onboard_lib::api::User> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/users")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        client_for(&server).users().await.unwrap()
    }

    #[tokio::test]
    async fn test_bare_array() {
        let users = users_with_body(r#"[{"id": 1, "username": "a"}, {"id": 2, "username": "b"}]"#).await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].display_name(), "b");
    }

    #[tokio::test]
    async fn test_wrapped_lists() {
        assert_eq!(users_with_body(r#"{"users": [{"_id": "x"}]}"#).await.len(), 1);
        assert_eq!(users_with_body(r#"{"data": [{"_id": "x"}, {"_id": "y"}]}"#).await.len(), 2);
        assert!(users_with_body(r#"{"count": 0}"#).await.is_empty());
    }

    #[tokio::test]
    async fn test_users_failure_default_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/users")
            .with_status(500)
            .with_body(r#"{"status": "down"}"#)
            .create_async()
            .await;

        let err = client_for(&server).users().await.unwrap_err();
        assert_eq!(err.alert_message(USERS_ERROR), "Failed to fetch users");
    }

    #[tokio::test]
    async fn test_users_failure_without_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/users")
            .with_status(500)
            .create_async()
            .await;

        let err = client_for(&server).users().await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.alert_message(USERS_ERROR), "An error occurred while fetching users.");
    }

    #[tokio::test]
    async fn test_custom_endpoints() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/people")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = OnboardClient::builder()
            .url(server.url())
            .endpoints(Endpoints {
                users: "/v2/people".to_string(),
                ..Endpoints::default()
            })
            .build()
            .unwrap();

        assert!(client.users().await.unwrap().is_empty());
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Port 9 (discard) on localhost is not expected to accept connections.
    let client = OnboardClient::builder()
        .url("http://127.0.0.1:9")
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = client.users().await.unwrap_err();
    assert!(err.is_connection());
    assert_eq!(err.user_message(), CONNECTION_MESSAGE);
}
