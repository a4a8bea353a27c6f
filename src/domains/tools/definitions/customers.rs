//! Customer management tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{PageParams, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body, body_without};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListCustomersParams {
    /// Search query (name, email, phone)
    pub search: Option<String>,
    /// Filter by tags
    pub tags: Option<Vec<String>>,
    /// Filter by lead source
    pub lead_source: Option<String>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CustomerIdParams {
    /// Customer ID
    pub customer_id: String,
}

/// Contact fields shared by create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CustomerFields {
    /// Email address
    pub email: Option<String>,
    /// Mobile phone number
    pub mobile_number: Option<String>,
    /// Home phone number
    pub home_number: Option<String>,
    /// Work phone number
    pub work_number: Option<String>,
    /// Company name
    pub company: Option<String>,
    /// Enable notifications for this customer
    pub notifications_enabled: Option<bool>,
    /// Lead source
    pub lead_source: Option<String>,
    /// Array of tag IDs
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateCustomerParams {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    #[serde(flatten)]
    pub fields: CustomerFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCustomerParams {
    /// Customer ID
    pub customer_id: String,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub fields: CustomerFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchCustomersParams {
    /// Search query
    pub query: String,
    #[serde(flatten)]
    pub paging: PageParams,
}

impl SearchCustomersParams {
    /// The query travels as the `search` filter of the list endpoint.
    fn to_filters(&self) -> ListCustomersParams {
        ListCustomersParams {
            search: Some(self.query.clone()),
            tags: None,
            lead_source: None,
            paging: self.paging.clone(),
        }
    }
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_customers",
            "List customers with optional filters",
            |client, p: ListCustomersParams| async move {
                list_all(&client, "/customers", "customers", &p).await
            },
        ),
        api_tool(
            client,
            "get_customer",
            "Get detailed information about a specific customer",
            |client, p: CustomerIdParams| async move {
                Ok(client.get(&format!("/customers/{}", p.customer_id), None).await?)
            },
        ),
        api_tool(
            client,
            "create_customer",
            "Create a new customer",
            |client, p: CreateCustomerParams| async move {
                Ok(client.post("/customers", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "update_customer",
            "Update an existing customer",
            |client, p: UpdateCustomerParams| async move {
                let update = body_without(&p, &["customer_id"])?;
                Ok(client
                    .patch(&format!("/customers/{}", p.customer_id), Some(&update))
                    .await?)
            },
        ),
        api_tool(
            client,
            "delete_customer",
            "Delete a customer",
            |client, p: CustomerIdParams| async move {
                Ok(client.delete(&format!("/customers/{}", p.customer_id)).await?)
            },
        ),
        api_tool(
            client,
            "search_customers",
            "Search customers by name, email, or phone",
            |client, p: SearchCustomersParams| async move {
                list_all(&client, "/customers", "customers", &p.to_filters()).await
            },
        ),
        api_tool(
            client,
            "list_customer_addresses",
            "List all addresses for a customer",
            |client, p: CustomerIdParams| async move {
                Ok(client
                    .get(&format!("/customers/{}/addresses", p.customer_id), None)
                    .await?)
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JsonObject;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn call(server: &MockServer, name: &str, args: Value) -> Value {
        let client = HousecallClient::with_base_url("k", &server.uri(), None).unwrap();
        let entry = register(&client)
            .into_iter()
            .find(|t| t.name() == name)
            .unwrap();
        let args: JsonObject = args.as_object().cloned().unwrap();
        entry.call(args).await.unwrap()
    }

    #[tokio::test]
    async fn test_search_customers_uses_search_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .and(query_param("search", "smith"))
            .and(query_param("page_size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "C-1", "last_name": "Smith"}],
                "total_pages": 1,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(&server, "search_customers", json!({"query": "smith", "page_size": 10})).await;
        assert_eq!(result["count"], 1);
        assert_eq!(result["customers"][0]["id"], "C-1");
    }

    #[tokio::test]
    async fn test_create_customer_flattens_contact_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/customers"))
            .and(body_json(json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "notifications_enabled": true,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "C-9"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(
            &server,
            "create_customer",
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "notifications_enabled": true,
            }),
        )
        .await;
        assert_eq!(result["id"], "C-9");
    }

    #[tokio::test]
    async fn test_delete_customer_empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/customers/C-2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(&server, "delete_customer", json!({"customer_id": "C-2"})).await;
        assert_eq!(result, Value::Null);
    }
}
