//! Research aggregator endpoints.

use crate::error::ClientResult;
use crate::gateway::CanisterCaller;
use crate::types::{
    AggregatorHealth, AnalysisRecipe, CanisterReply, Query, QueryResult, QueryStatus,
};

/// Typed handle for the aggregator canister.
pub struct AggregatorClient {
    caller: CanisterCaller,
}

impl AggregatorClient {
    pub(crate) fn new(caller: CanisterCaller) -> Self {
        Self { caller }
    }

    pub fn canister_id(&self) -> &str {
        self.caller.canister_id()
    }

    /// Registers the caller's vault with the aggregator.
    pub async fn register_my_vault(&self) -> ClientResult<String> {
        let reply: CanisterReply<String> = self
            .caller
            .call("registerMyVault", &serde_json::json!({}))
            .await?;
        reply.into_result()
    }

    /// Submits a research query for a recipe; returns the new query id.
    pub async fn submit_query(&self, recipe_id: u64) -> ClientResult<u64> {
        let reply: CanisterReply<u64> = self
            .caller
            .call("submitQuery", &serde_json::json!({ "recipeId": recipe_id }))
            .await?;
        reply.into_result()
    }

    /// Submits this vault's anonymous boolean answer to a query.
    pub async fn submit_anonymous_result(
        &self,
        query_id: u64,
        result: bool,
    ) -> ClientResult<String> {
        let reply: CanisterReply<String> = self
            .caller
            .call(
                "submitAnonymousResult",
                &serde_json::json!({ "queryId": query_id, "result": result }),
            )
            .await?;
        reply.into_result()
    }

    /// Aggregate results for a query.
    pub async fn get_query_results(&self, query_id: u64) -> ClientResult<QueryResult> {
        let reply: CanisterReply<QueryResult> = self
            .caller
            .call("getQueryResults", &serde_json::json!({ "queryId": query_id }))
            .await?;
        reply.into_result()
    }

    /// The recipes researchers can pick from.
    pub async fn get_analysis_recipes(&self) -> ClientResult<Vec<AnalysisRecipe>> {
        self.caller
            .call("getAnalysisRecipes", &serde_json::json!({}))
            .await
    }

    /// Queries, optionally filtered by status.
    pub async fn get_active_queries(
        &self,
        status: Option<QueryStatus>,
    ) -> ClientResult<Vec<Query>> {
        self.caller
            .call("getActiveQueries", &serde_json::json!({ "status": status }))
            .await
    }

    pub async fn get_registered_vault_count(&self) -> ClientResult<u64> {
        self.caller
            .call("getRegisteredVaultCount", &serde_json::json!({}))
            .await
    }

    pub async fn health_check(&self) -> ClientResult<AggregatorHealth> {
        self.caller.call("healthCheck", &serde_json::json!({})).await
    }
}
