//! Tag tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::common::{PageParams, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateTagParams {
    /// Tag name
    pub name: String,
    /// Tag color (hex code)
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TagIdParams {
    /// Tag ID
    pub tag_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TagJobParams {
    /// Job ID
    pub job_id: String,
    /// Tag ID
    pub tag_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TagCustomerParams {
    /// Customer ID
    pub customer_id: String,
    /// Tag ID
    pub tag_id: String,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_tags",
            "List all tags",
            |client, p: PageParams| async move { list_all(&client, "/tags", "tags", &p).await },
        ),
        api_tool(
            client,
            "create_tag",
            "Create a new tag",
            |client, p: CreateTagParams| async move {
                Ok(client.post("/tags", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "delete_tag",
            "Delete a tag",
            |client, p: TagIdParams| async move {
                Ok(client.delete(&format!("/tags/{}", p.tag_id)).await?)
            },
        ),
        api_tool(
            client,
            "add_tag_to_job",
            "Add a tag to a job",
            |client, p: TagJobParams| async move {
                let tag = json!({ "tag_id": p.tag_id });
                Ok(client.post(&format!("/jobs/{}/tags", p.job_id), Some(&tag)).await?)
            },
        ),
        api_tool(
            client,
            "add_tag_to_customer",
            "Add a tag to a customer",
            |client, p: TagCustomerParams| async move {
                let tag = json!({ "tag_id": p.tag_id });
                Ok(client
                    .post(&format!("/customers/{}/tags", p.customer_id), Some(&tag))
                    .await?)
            },
        ),
    ]
}
