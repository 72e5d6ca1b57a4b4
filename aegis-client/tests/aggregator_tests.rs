use aegis_client::config::GatewayConfig;
use aegis_client::error::ClientError;
use aegis_client::gateway::Gateway;
use aegis_client::session::SessionManager;
use aegis_client::types::QueryStatus;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer) -> Gateway {
    let config = GatewayConfig {
        gateway_url: server.uri(),
        identity_provider_url: server.uri(),
        aggregator_canister: "agg-canister".to_string(),
        vault_canister: "vault-canister".to_string(),
        request_timeout_secs: 5,
        ..GatewayConfig::default()
    };
    let session = Arc::new(SessionManager::new(config.clone()));
    Gateway::new(config, session)
}

#[tokio::test]
async fn submit_query_returns_the_new_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/canister/agg-canister/submitQuery"))
        .and(body_json(serde_json::json!({ "recipeId": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": 41 })))
        .mount(&server)
        .await;

    let gateway = setup(&server);
    let query_id = gateway.aggregator().await.submit_query(3).await.unwrap();
    assert_eq!(query_id, 41);
}

#[tokio::test]
async fn canister_err_variant_becomes_a_canister_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/canister/agg-canister/submitQuery"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "err": "recipe not found" })),
        )
        .mount(&server)
        .await;

    let gateway = setup(&server);
    let err = gateway
        .aggregator()
        .await
        .submit_query(999)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Canister(msg) if msg == "recipe not found"));
}

#[tokio::test]
async fn gateway_http_error_is_a_gateway_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let gateway = setup(&server);
    let err = gateway
        .aggregator()
        .await
        .get_registered_vault_count()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Gateway(_)));
}

#[tokio::test]
async fn register_my_vault_forwards_the_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/canister/agg-canister/registerMyVault"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ok": "vault registered" })),
        )
        .mount(&server)
        .await;

    let gateway = setup(&server);
    let message = gateway.aggregator().await.register_my_vault().await.unwrap();
    assert_eq!(message, "vault registered");
}

#[tokio::test]
async fn submit_anonymous_result_sends_only_the_boolean() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/canister/agg-canister/submitAnonymousResult"))
        .and(body_json(serde_json::json!({ "queryId": 7, "result": true })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": "recorded" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = setup(&server);
    let message = gateway
        .aggregator()
        .await
        .submit_anonymous_result(7, true)
        .await
        .unwrap();
    assert_eq!(message, "recorded");
}

#[tokio::test]
async fn get_analysis_recipes_decodes_the_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/canister/agg-canister/getAnalysisRecipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 1,
                "name": "Food Spending Analysis",
                "description": "share of users with average food spend above $50",
                "category": "spending",
                "parameters": [["category", "Food"], ["threshold", "50"]]
            }
        ])))
        .mount(&server)
        .await;

    let gateway = setup(&server);
    let recipes = gateway
        .aggregator()
        .await
        .get_analysis_recipes()
        .await
        .unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].parameters[1], ("threshold".to_string(), "50".to_string()));
}

#[tokio::test]
async fn get_active_queries_passes_the_status_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/canister/agg-canister/getActiveQueries"))
        .and(body_json(serde_json::json!({ "status": "active" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 7,
                "recipeId": 1,
                "description": "avg food spend",
                "timestamp": 1_700_000_000_000i64,
                "requester": "research-principal",
                "status": "active",
                "expiresAt": 1_700_086_400_000i64
            }
        ])))
        .mount(&server)
        .await;

    let gateway = setup(&server);
    let queries = gateway
        .aggregator()
        .await
        .get_active_queries(Some(QueryStatus::Active))
        .await
        .unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].status, QueryStatus::Active);
}

#[tokio::test]
async fn get_query_results_decodes_the_aggregate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/canister/agg-canister/getQueryResults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": {
                "queryId": 7,
                "trueCount": 12,
                "falseCount": 8,
                "totalResponses": 20,
                "participationRate": 0.8,
                "completedAt": 1_700_090_000_000i64
            }
        })))
        .mount(&server)
        .await;

    let gateway = setup(&server);
    let results = gateway
        .aggregator()
        .await
        .get_query_results(7)
        .await
        .unwrap();
    assert_eq!(results.true_count, 12);
    assert_eq!(results.total_responses, 20);
    assert_eq!(results.completed_at, Some(1_700_090_000_000));
}
