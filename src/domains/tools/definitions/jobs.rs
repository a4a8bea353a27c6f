//! Job management tools.
//!
//! Jobs are the unit of field work: a customer, a service address, a
//! schedule, assigned employees and line items.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::common::{PageParams, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body_without};

/// Work status of a job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Scheduled,
    OnMyWay,
    Working,
    Completed,
    Cancelled,
}

/// Invoicing state of a job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    NotInvoiced,
    Invoiced,
    Paid,
    Partial,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListJobsParams {
    /// Filter by customer ID
    pub customer_id: Option<String>,
    /// Filter by work status
    pub work_status: Option<WorkStatus>,
    /// Filter by invoice status
    pub invoice_status: Option<InvoiceStatus>,
    /// Filter jobs scheduled on or after this date (ISO 8601)
    pub start_date: Option<String>,
    /// Filter jobs scheduled on or before this date (ISO 8601)
    pub end_date: Option<String>,
    /// Filter by tags
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub paging: PageParams,
}

/// Parameters naming a single job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JobIdParams {
    /// Job ID
    pub job_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateJobParams {
    /// Customer ID
    pub customer_id: String,
    /// Service address ID
    pub address_id: Option<String>,
    /// Job description
    pub description: Option<String>,
    /// Internal notes
    pub notes: Option<String>,
    /// Scheduled start time (ISO 8601)
    pub schedule_start: Option<String>,
    /// Scheduled end time (ISO 8601)
    pub schedule_end: Option<String>,
    /// Arrival window (e.g., "8am-12pm")
    pub arrival_window: Option<String>,
    /// Array of employee IDs to assign
    pub assigned_employees: Option<Vec<String>>,
    /// Array of tag IDs
    pub tags: Option<Vec<String>>,
}

impl CreateJobParams {
    /// Request body; the schedule is only sent when both ends are known.
    fn to_body(&self) -> Value {
        let schedule = match (&self.schedule_start, &self.schedule_end) {
            (Some(start), Some(end)) => without_nulls(json!({
                "start": start,
                "end": end,
                "arrival_window": self.arrival_window,
            })),
            _ => Value::Null,
        };
        without_nulls(json!({
            "customer_id": self.customer_id,
            "address_id": self.address_id,
            "description": self.description,
            "notes": self.notes,
            "assigned_employees": self.assigned_employees,
            "tags": self.tags,
            "schedule": schedule,
        }))
    }
}

fn without_nulls(mut value: Value) -> Value {
    if let Some(map) = value.as_object_mut() {
        map.retain(|_, v| !v.is_null());
    }
    value
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateJobParams {
    /// Job ID
    pub job_id: String,
    /// Job description
    pub description: Option<String>,
    /// Internal notes
    pub notes: Option<String>,
    /// Work status
    pub work_status: Option<WorkStatus>,
    /// Array of employee IDs to assign
    pub assigned_employees: Option<Vec<String>>,
    /// Array of tag IDs
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CancelJobParams {
    /// Job ID
    pub job_id: String,
    /// Cancellation reason
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddLineItemParams {
    /// Job ID
    pub job_id: String,
    /// Line item name
    pub name: String,
    /// Line item description
    pub description: Option<String>,
    /// Quantity
    pub quantity: f64,
    /// Unit price
    pub unit_price: f64,
    /// Unit of measurement (e.g., "hours", "each")
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleJobParams {
    /// Job ID
    pub job_id: String,
    /// Scheduled start time (ISO 8601)
    pub start: String,
    /// Scheduled end time (ISO 8601)
    pub end: String,
    /// Arrival window (e.g., "8am-12pm")
    pub arrival_window: Option<String>,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_jobs",
            "List jobs with optional filters",
            |client, p: ListJobsParams| async move { list_all(&client, "/jobs", "jobs", &p).await },
        ),
        api_tool(
            client,
            "get_job",
            "Get detailed information about a specific job",
            |client, p: JobIdParams| async move {
                Ok(client.get(&format!("/jobs/{}", p.job_id), None).await?)
            },
        ),
        api_tool(
            client,
            "create_job",
            "Create a new job",
            |client, p: CreateJobParams| async move {
                Ok(client.post("/jobs", Some(&p.to_body())).await?)
            },
        ),
        api_tool(
            client,
            "update_job",
            "Update an existing job",
            |client, p: UpdateJobParams| async move {
                let update = body_without(&p, &["job_id"])?;
                Ok(client.patch(&format!("/jobs/{}", p.job_id), Some(&update)).await?)
            },
        ),
        api_tool(
            client,
            "complete_job",
            "Mark a job as completed",
            |client, p: JobIdParams| async move {
                Ok(client
                    .post(&format!("/jobs/{}/complete", p.job_id), Some(&json!({})))
                    .await?)
            },
        ),
        api_tool(
            client,
            "cancel_job",
            "Cancel a job",
            |client, p: CancelJobParams| async move {
                let reason = body_without(&p, &["job_id"])?;
                Ok(client
                    .post(&format!("/jobs/{}/cancel", p.job_id), Some(&reason))
                    .await?)
            },
        ),
        api_tool(
            client,
            "list_job_line_items",
            "List line items for a job",
            |client, p: JobIdParams| async move {
                Ok(client.get(&format!("/jobs/{}/line_items", p.job_id), None).await?)
            },
        ),
        api_tool(
            client,
            "add_job_line_item",
            "Add a line item to a job",
            |client, p: AddLineItemParams| async move {
                let item = body_without(&p, &["job_id"])?;
                Ok(client
                    .post(&format!("/jobs/{}/line_items", p.job_id), Some(&item))
                    .await?)
            },
        ),
        api_tool(
            client,
            "schedule_job",
            "Schedule a job (set initial schedule)",
            |client, p: ScheduleJobParams| async move {
                let schedule = body_without(&p, &["job_id"])?;
                Ok(client
                    .post(&format!("/jobs/{}/schedule", p.job_id), Some(&schedule))
                    .await?)
            },
        ),
        api_tool(
            client,
            "reschedule_job",
            "Reschedule an existing job",
            |client, p: ScheduleJobParams| async move {
                let schedule = body_without(&p, &["job_id"])?;
                Ok(client
                    .patch(&format!("/jobs/{}/schedule", p.job_id), Some(&schedule))
                    .await?)
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JsonObject;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool(client: &HousecallClient, name: &str) -> crate::domains::tools::ToolEntry {
        register(client)
            .into_iter()
            .find(|t| t.name() == name)
            .unwrap()
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_create_job_schedule_requires_both_ends() {
        let params: CreateJobParams = serde_json::from_value(json!({
            "customer_id": "C-1",
            "schedule_start": "2024-05-01T08:00:00Z",
            "arrival_window": "8am-12pm",
        }))
        .unwrap();
        assert_eq!(params.to_body(), json!({"customer_id": "C-1"}));

        let params: CreateJobParams = serde_json::from_value(json!({
            "customer_id": "C-1",
            "schedule_start": "2024-05-01T08:00:00Z",
            "schedule_end": "2024-05-01T12:00:00Z",
        }))
        .unwrap();
        assert_eq!(
            params.to_body(),
            json!({
                "customer_id": "C-1",
                "schedule": {
                    "start": "2024-05-01T08:00:00Z",
                    "end": "2024-05-01T12:00:00Z",
                },
            })
        );
    }

    #[tokio::test]
    async fn test_list_jobs_aggregates_pages() {
        let server = MockServer::start().await;
        for page in 1..=2u64 {
            Mock::given(method("GET"))
                .and(path("/jobs"))
                .and(query_param("work_status", "on_my_way"))
                .and(query_param("page", page.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "data": [{"id": format!("J-{page}")}],
                    "page": page,
                    "total_pages": 2,
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = HousecallClient::with_base_url("k", &server.uri(), None).unwrap();
        let result = tool(&client, "list_jobs")
            .call(args(json!({"work_status": "on_my_way"})))
            .await
            .unwrap();

        assert_eq!(result, json!({"jobs": [{"id": "J-1"}, {"id": "J-2"}], "count": 2}));
    }

    #[tokio::test]
    async fn test_update_job_sends_remaining_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/jobs/J-3"))
            .and(body_json(json!({"notes": "gate code 1234", "work_status": "working"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "J-3"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HousecallClient::with_base_url("k", &server.uri(), None).unwrap();
        let result = tool(&client, "update_job")
            .call(args(json!({
                "job_id": "J-3",
                "notes": "gate code 1234",
                "work_status": "working",
            })))
            .await
            .unwrap();
        assert_eq!(result["id"], "J-3");
    }

    #[tokio::test]
    async fn test_complete_job_posts_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jobs/J-4/complete"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "completed"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HousecallClient::with_base_url("k", &server.uri(), None).unwrap();
        let result = tool(&client, "complete_job")
            .call(args(json!({"job_id": "J-4"})))
            .await
            .unwrap();
        assert_eq!(result["status"], "completed");
    }
}
