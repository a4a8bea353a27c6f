//! Lead tools: prospects that have not yet become customers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{PageParams, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body, body_without};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListLeadsParams {
    /// Filter by lead status
    pub status: Option<LeadStatus>,
    /// Filter by lead source
    pub source: Option<String>,
    /// Filter by assigned employee ID
    pub assigned_to: Option<String>,
    /// Filter leads created after this date (ISO 8601)
    pub created_after: Option<String>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LeadIdParams {
    /// Lead ID
    pub lead_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateLeadParams {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Lead source (e.g., "Google", "Referral")
    pub source: Option<String>,
    /// Lead notes
    pub notes: Option<String>,
    /// Employee ID to assign to
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateLeadParams {
    /// Lead ID
    pub lead_id: String,
    /// Lead status
    pub status: Option<LeadStatus>,
    /// Lead notes
    pub notes: Option<String>,
    /// Employee ID to assign to
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConvertLeadParams {
    /// Lead ID
    pub lead_id: String,
    /// Also create an initial job
    pub create_job: Option<bool>,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_leads",
            "List all leads with optional filters",
            |client, p: ListLeadsParams| async move { list_all(&client, "/leads", "leads", &p).await },
        ),
        api_tool(
            client,
            "get_lead",
            "Get detailed information about a specific lead",
            |client, p: LeadIdParams| async move {
                Ok(client.get(&format!("/leads/{}", p.lead_id), None).await?)
            },
        ),
        api_tool(
            client,
            "create_lead",
            "Create a new lead",
            |client, p: CreateLeadParams| async move {
                Ok(client.post("/leads", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "update_lead",
            "Update an existing lead",
            |client, p: UpdateLeadParams| async move {
                let update = body_without(&p, &["lead_id"])?;
                Ok(client.patch(&format!("/leads/{}", p.lead_id), Some(&update)).await?)
            },
        ),
        api_tool(
            client,
            "convert_lead_to_customer",
            "Convert a lead to a customer",
            |client, p: ConvertLeadParams| async move {
                let options = body_without(&p, &["lead_id"])?;
                Ok(client
                    .post(&format!("/leads/{}/convert", p.lead_id), Some(&options))
                    .await?)
            },
        ),
        api_tool(
            client,
            "delete_lead",
            "Delete a lead",
            |client, p: LeadIdParams| async move {
                Ok(client.delete(&format!("/leads/{}", p.lead_id)).await?)
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JsonObject;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_convert_lead_forwards_create_job() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/leads/L-3/convert"))
            .and(body_json(json!({"create_job": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"customer_id": "C-30"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HousecallClient::with_base_url("k", &server.uri(), None).unwrap();
        let entry = register(&client)
            .into_iter()
            .find(|t| t.name() == "convert_lead_to_customer")
            .unwrap();
        let args: JsonObject = json!({"lead_id": "L-3", "create_job": true})
            .as_object()
            .cloned()
            .unwrap();

        assert_eq!(entry.call(args).await.unwrap()["customer_id"], "C-30");
    }
}
