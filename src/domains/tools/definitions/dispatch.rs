//! Dispatch board tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::common::{DateRange, get_with_query};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DispatchBoardParams {
    /// Date for dispatch board (ISO 8601 date, e.g. "2024-01-15")
    pub date: Option<String>,
    /// Filter by specific employee IDs
    pub employee_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssignEmployeeParams {
    /// Job ID
    pub job_id: String,
    /// Employee ID to assign
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AvailabilityParams {
    /// Employee ID
    pub employee_id: String,
    #[serde(flatten)]
    pub range: DateRange,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "get_dispatch_board",
            "Get the dispatch board showing scheduled jobs and employee assignments",
            |client, p: DispatchBoardParams| async move {
                get_with_query(&client, "/dispatch/board", &p).await
            },
        ),
        api_tool(
            client,
            "assign_employee_to_job",
            "Assign an employee to a job",
            |client, p: AssignEmployeeParams| async move {
                let assignment = json!({ "employee_id": p.employee_id });
                Ok(client
                    .post(&format!("/jobs/{}/assign", p.job_id), Some(&assignment))
                    .await?)
            },
        ),
        api_tool(
            client,
            "get_employee_availability",
            "Get availability slots for an employee",
            |client, p: AvailabilityParams| async move {
                let path = format!("/employees/{}/availability", p.employee_id);
                get_with_query(&client, &path, &p.range).await
            },
        ),
    ]
}
