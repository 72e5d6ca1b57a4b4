use aegis_client::config::GatewayConfig;
use aegis_client::error::ClientError;
use aegis_client::session::SessionManager;
use aegis_types::Principal;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicU32, Ordering};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer) -> SessionManager {
    let config = GatewayConfig {
        gateway_url: server.uri(),
        identity_provider_url: server.uri(),
        max_retries: 3,
        request_timeout_secs: 5,
        ..GatewayConfig::default()
    };
    SessionManager::new(config)
}

fn session_response(principal: &str) -> serde_json::Value {
    serde_json::json!({
        "principal": principal,
        "expires_at": (Utc::now() + Duration::days(7)).to_rfc3339(),
    })
}

#[tokio::test]
async fn not_authenticated_initially() {
    let server = MockServer::start().await;
    let session = setup(&server);
    assert!(!session.is_authenticated().await);
    assert_eq!(session.principal().await, None);
}

#[tokio::test]
async fn login_establishes_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response("w7x7r-cok77-xa")))
        .mount(&server)
        .await;

    let session = setup(&server);
    let principal = session.login().await.unwrap();
    assert_eq!(principal.as_str(), "w7x7r-cok77-xa");
    assert!(session.is_authenticated().await);
    assert_eq!(session.principal().await, Some(principal));
}

#[tokio::test]
async fn login_rejects_anonymous_principal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response("2vxsx-fae")))
        .mount(&server)
        .await;

    let session = setup(&server);
    let result = session.login().await;
    assert!(matches!(result.unwrap_err(), ClientError::AuthFailed(_)));
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn login_provider_error_is_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = setup(&server);
    let result = session.login().await;
    assert!(matches!(result.unwrap_err(), ClientError::AuthFailed(_)));
}

#[tokio::test]
async fn logout_clears_session() {
    let server = MockServer::start().await;
    let session = setup(&server);
    session
        .restore(
            Principal::from_text("w7x7r-cok77-xa").unwrap(),
            Utc::now() + Duration::hours(1),
        )
        .await;
    assert!(session.is_authenticated().await);

    session.logout().await;
    assert!(!session.is_authenticated().await);
    assert_eq!(session.principal().await, None);
}

#[tokio::test]
async fn expired_session_is_not_authenticated() {
    let server = MockServer::start().await;
    let session = setup(&server);
    session
        .restore(
            Principal::from_text("w7x7r-cok77-xa").unwrap(),
            Utc::now() - Duration::seconds(1),
        )
        .await;

    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn check_session_clears_expired_principal() {
    let server = MockServer::start().await;
    let session = setup(&server);
    session
        .restore(
            Principal::from_text("w7x7r-cok77-xa").unwrap(),
            Utc::now() - Duration::seconds(1),
        )
        .await;

    assert!(!session.check_session().await);
    // The stale principal is dropped, not just reported as invalid.
    assert_eq!(session.principal().await, None);
}

#[tokio::test]
async fn restored_anonymous_principal_is_not_authenticated() {
    let server = MockServer::start().await;
    let session = setup(&server);
    session
        .restore(Principal::anonymous(), Utc::now() + Duration::hours(1))
        .await;

    assert!(!session.is_authenticated().await);
}

#[tokio::test(start_paused = true)]
async fn retry_operation_succeeds_after_transient_failures() {
    let server = MockServer::start().await;
    let session = setup(&server);

    let attempts = AtomicU32::new(0);
    let result = session
        .retry_operation(|| {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(ClientError::Gateway("transient".to_string()))
                } else {
                    Ok(n)
                }
            }
        })
        .await
        .unwrap();

    assert_eq!(result, 2);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn retry_operation_returns_last_error_after_max_attempts() {
    let server = MockServer::start().await;
    let session = setup(&server);

    let attempts = AtomicU32::new(0);
    let result: Result<(), _> = session
        .retry_operation(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(ClientError::Gateway("still down".to_string())) }
        })
        .await;

    assert!(matches!(result.unwrap_err(), ClientError::Gateway(msg) if msg == "still down"));
    // max_retries = 3 total attempts
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}
