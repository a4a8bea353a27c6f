//! Webhook subscription tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{NoParams, get_with_query};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body, body_without};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Success,
    Failed,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WebhookIdParams {
    /// Webhook ID
    pub webhook_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateWebhookParams {
    /// Webhook endpoint URL
    pub url: String,
    /// Array of event types to subscribe to (e.g., "job.created", "invoice.paid")
    pub events: Vec<String>,
    /// Secret for webhook signature verification
    pub secret: Option<String>,
    /// Whether webhook is active
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateWebhookParams {
    /// Webhook ID
    pub webhook_id: String,
    /// Webhook endpoint URL
    pub url: Option<String>,
    /// Array of event types to subscribe to
    pub events: Option<Vec<String>>,
    /// Whether webhook is active
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TestWebhookParams {
    /// Webhook ID
    pub webhook_id: String,
    /// Event type to test
    pub event_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListDeliveriesParams {
    /// Filter by webhook ID
    pub webhook_id: Option<String>,
    /// Filter by delivery status
    pub status: Option<DeliveryOutcome>,
    /// Number of deliveries to return (default: 50)
    pub limit: Option<u32>,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_webhooks",
            "List all configured webhooks",
            |client, _p: NoParams| async move { Ok(client.get("/webhooks", None).await?) },
        ),
        api_tool(
            client,
            "get_webhook",
            "Get detailed information about a webhook",
            |client, p: WebhookIdParams| async move {
                Ok(client.get(&format!("/webhooks/{}", p.webhook_id), None).await?)
            },
        ),
        api_tool(
            client,
            "create_webhook",
            "Create a new webhook subscription",
            |client, p: CreateWebhookParams| async move {
                Ok(client.post("/webhooks", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "update_webhook",
            "Update an existing webhook",
            |client, p: UpdateWebhookParams| async move {
                let update = body_without(&p, &["webhook_id"])?;
                Ok(client
                    .patch(&format!("/webhooks/{}", p.webhook_id), Some(&update))
                    .await?)
            },
        ),
        api_tool(
            client,
            "delete_webhook",
            "Delete a webhook subscription",
            |client, p: WebhookIdParams| async move {
                Ok(client.delete(&format!("/webhooks/{}", p.webhook_id)).await?)
            },
        ),
        api_tool(
            client,
            "test_webhook",
            "Send a test event to a webhook",
            |client, p: TestWebhookParams| async move {
                let event = body_without(&p, &["webhook_id"])?;
                Ok(client
                    .post(&format!("/webhooks/{}/test", p.webhook_id), Some(&event))
                    .await?)
            },
        ),
        api_tool(
            client,
            "list_webhook_deliveries",
            "List recent webhook delivery attempts",
            |client, p: ListDeliveriesParams| async move {
                get_with_query(&client, "/webhooks/deliveries", &p).await
            },
        ),
    ]
}
