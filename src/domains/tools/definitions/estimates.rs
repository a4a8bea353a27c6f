//! Estimate tools: quoting work before it becomes a job.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::common::{LineItemInput, PageParams, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body, body_without};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Draft,
    Sent,
    Approved,
    Declined,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListEstimatesParams {
    /// Filter by customer ID
    pub customer_id: Option<String>,
    /// Filter by status
    pub status: Option<EstimateStatus>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EstimateIdParams {
    /// Estimate ID
    pub estimate_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateEstimateParams {
    /// Customer ID
    pub customer_id: String,
    /// Service address ID
    pub address_id: Option<String>,
    /// Array of line items
    pub line_items: Option<Vec<LineItemInput>>,
    /// Estimate notes
    pub notes: Option<String>,
    /// Estimate expiration date (ISO 8601)
    pub valid_until: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateEstimateParams {
    /// Estimate ID
    pub estimate_id: String,
    /// Array of line items
    pub line_items: Option<Vec<LineItemInput>>,
    /// Estimate notes
    pub notes: Option<String>,
    /// Estimate expiration date (ISO 8601)
    pub valid_until: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SendEstimateParams {
    /// Estimate ID
    pub estimate_id: String,
    /// Override customer email
    pub email: Option<String>,
    /// Custom message to include
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeclineEstimateParams {
    /// Estimate ID
    pub estimate_id: String,
    /// Reason for declining
    pub reason: Option<String>,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_estimates",
            "List estimates with optional filters",
            |client, p: ListEstimatesParams| async move {
                list_all(&client, "/estimates", "estimates", &p).await
            },
        ),
        api_tool(
            client,
            "get_estimate",
            "Get detailed information about a specific estimate",
            |client, p: EstimateIdParams| async move {
                Ok(client.get(&format!("/estimates/{}", p.estimate_id), None).await?)
            },
        ),
        api_tool(
            client,
            "create_estimate",
            "Create a new estimate",
            |client, p: CreateEstimateParams| async move {
                Ok(client.post("/estimates", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "update_estimate",
            "Update an existing estimate",
            |client, p: UpdateEstimateParams| async move {
                let update = body_without(&p, &["estimate_id"])?;
                Ok(client
                    .patch(&format!("/estimates/{}", p.estimate_id), Some(&update))
                    .await?)
            },
        ),
        api_tool(
            client,
            "send_estimate",
            "Send an estimate to the customer",
            |client, p: SendEstimateParams| async move {
                let options = body_without(&p, &["estimate_id"])?;
                Ok(client
                    .post(&format!("/estimates/{}/send", p.estimate_id), Some(&options))
                    .await?)
            },
        ),
        api_tool(
            client,
            "approve_estimate",
            "Mark an estimate as approved",
            |client, p: EstimateIdParams| async move {
                Ok(client
                    .post(&format!("/estimates/{}/approve", p.estimate_id), Some(&json!({})))
                    .await?)
            },
        ),
        api_tool(
            client,
            "decline_estimate",
            "Mark an estimate as declined",
            |client, p: DeclineEstimateParams| async move {
                let reason = body_without(&p, &["estimate_id"])?;
                Ok(client
                    .post(&format!("/estimates/{}/decline", p.estimate_id), Some(&reason))
                    .await?)
            },
        ),
        api_tool(
            client,
            "convert_estimate_to_job",
            "Convert an approved estimate into a job",
            |client, p: EstimateIdParams| async move {
                Ok(client
                    .post(&format!("/estimates/{}/convert", p.estimate_id), Some(&json!({})))
                    .await?)
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JsonObject;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_estimate_line_items_in_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/estimates"))
            .and(body_json(json!({
                "customer_id": "C-1",
                "line_items": [{"name": "Tune-up", "quantity": 1.0, "unit_price": 129.0}],
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "E-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HousecallClient::with_base_url("k", &server.uri(), None).unwrap();
        let entry = register(&client)
            .into_iter()
            .find(|t| t.name() == "create_estimate")
            .unwrap();
        let args: JsonObject = json!({
            "customer_id": "C-1",
            "line_items": [{"name": "Tune-up", "quantity": 1, "unit_price": 129}],
        })
        .as_object()
        .cloned()
        .unwrap();

        assert_eq!(entry.call(args).await.unwrap()["id"], "E-1");
    }

    #[test]
    fn test_unknown_status_rejected() {
        let parsed = serde_json::from_value::<ListEstimatesParams>(json!({"status": "lost"}));
        assert!(parsed.is_err());
    }
}
