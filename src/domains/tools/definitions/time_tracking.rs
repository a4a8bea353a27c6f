//! Time tracking tools: clocking employees in and out and editing entries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{PageParams, get_with_query, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body, body_without};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClockStatus {
    ClockedIn,
    ClockedOut,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListTimeEntriesParams {
    /// Filter by employee ID
    pub employee_id: Option<String>,
    /// Filter by job ID
    pub job_id: Option<String>,
    /// Filter entries on or after this date (ISO 8601)
    pub start_date: Option<String>,
    /// Filter entries on or before this date (ISO 8601)
    pub end_date: Option<String>,
    /// Filter by status
    pub status: Option<ClockStatus>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EntryIdParams {
    /// Time entry ID
    pub entry_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClockInParams {
    /// Employee ID
    pub employee_id: String,
    /// Associated job ID (optional)
    pub job_id: Option<String>,
    /// Clock in notes
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClockOutParams {
    /// Time entry ID (from clock in)
    pub entry_id: String,
    /// Clock out notes
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ManualEntryParams {
    /// Employee ID
    pub employee_id: String,
    /// Associated job ID
    pub job_id: Option<String>,
    /// Clock in time (ISO 8601)
    pub clock_in: String,
    /// Clock out time (ISO 8601)
    pub clock_out: String,
    /// Entry notes
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateEntryParams {
    /// Time entry ID
    pub entry_id: String,
    /// Updated clock in time (ISO 8601)
    pub clock_in: Option<String>,
    /// Updated clock out time (ISO 8601)
    pub clock_out: Option<String>,
    /// Updated notes
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeHoursParams {
    /// Employee ID
    pub employee_id: String,
    /// Start date (ISO 8601)
    pub start_date: String,
    /// End date (ISO 8601)
    pub end_date: String,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_time_entries",
            "List time entries with optional filters",
            |client, p: ListTimeEntriesParams| async move {
                list_all(&client, "/time_entries", "entries", &p).await
            },
        ),
        api_tool(
            client,
            "get_time_entry",
            "Get detailed information about a time entry",
            |client, p: EntryIdParams| async move {
                Ok(client.get(&format!("/time_entries/{}", p.entry_id), None).await?)
            },
        ),
        api_tool(
            client,
            "clock_in",
            "Clock in an employee",
            |client, p: ClockInParams| async move {
                Ok(client.post("/time_entries/clock_in", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "clock_out",
            "Clock out an employee",
            |client, p: ClockOutParams| async move {
                let notes = body_without(&p, &["entry_id"])?;
                Ok(client
                    .post(&format!("/time_entries/{}/clock_out", p.entry_id), Some(&notes))
                    .await?)
            },
        ),
        api_tool(
            client,
            "create_manual_time_entry",
            "Create a manual time entry (for past work)",
            |client, p: ManualEntryParams| async move {
                Ok(client.post("/time_entries", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "update_time_entry",
            "Update an existing time entry",
            |client, p: UpdateEntryParams| async move {
                let update = body_without(&p, &["entry_id"])?;
                Ok(client
                    .patch(&format!("/time_entries/{}", p.entry_id), Some(&update))
                    .await?)
            },
        ),
        api_tool(
            client,
            "delete_time_entry",
            "Delete a time entry",
            |client, p: EntryIdParams| async move {
                Ok(client.delete(&format!("/time_entries/{}", p.entry_id)).await?)
            },
        ),
        api_tool(
            client,
            "get_employee_hours",
            "Get total hours worked by an employee for a period",
            |client, p: EmployeeHoursParams| async move {
                let path = format!("/employees/{}/hours", p.employee_id);
                let range = body_without(&p, &["employee_id"])?;
                get_with_query(&client, &path, &range).await
            },
        ),
    ]
}
