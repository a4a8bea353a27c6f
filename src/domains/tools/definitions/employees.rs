//! Employee tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{DateRange, PageParams, get_with_query, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body, body_without};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Admin,
    Dispatcher,
    Technician,
    Sales,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListEmployeesParams {
    /// Filter by active status
    pub is_active: Option<bool>,
    /// Filter by role
    pub role: Option<EmployeeRole>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeIdParams {
    /// Employee ID
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateEmployeeParams {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Mobile phone number
    pub mobile_number: Option<String>,
    /// Employee role
    pub role: EmployeeRole,
    /// Color for calendar display (hex code)
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateEmployeeParams {
    /// Employee ID
    pub employee_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub role: Option<EmployeeRole>,
    /// Active status
    pub is_active: Option<bool>,
    /// Color for calendar display (hex code)
    pub color: Option<String>,
}

/// An employee plus an optional date window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeRangeParams {
    /// Employee ID
    pub employee_id: String,
    #[serde(flatten)]
    pub range: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeTimeEntriesParams {
    /// Employee ID
    pub employee_id: String,
    #[serde(flatten)]
    pub range: DateRange,
    #[serde(flatten)]
    pub paging: PageParams,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_employees",
            "List employees with optional filters",
            |client, p: ListEmployeesParams| async move {
                list_all(&client, "/employees", "employees", &p).await
            },
        ),
        api_tool(
            client,
            "get_employee",
            "Get detailed information about a specific employee",
            |client, p: EmployeeIdParams| async move {
                Ok(client.get(&format!("/employees/{}", p.employee_id), None).await?)
            },
        ),
        api_tool(
            client,
            "create_employee",
            "Create a new employee",
            |client, p: CreateEmployeeParams| async move {
                Ok(client.post("/employees", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "update_employee",
            "Update an existing employee",
            |client, p: UpdateEmployeeParams| async move {
                let update = body_without(&p, &["employee_id"])?;
                Ok(client
                    .patch(&format!("/employees/{}", p.employee_id), Some(&update))
                    .await?)
            },
        ),
        api_tool(
            client,
            "get_employee_schedule",
            "Get schedule for an employee",
            |client, p: EmployeeRangeParams| async move {
                let path = format!("/employees/{}/schedule", p.employee_id);
                get_with_query(&client, &path, &p.range).await
            },
        ),
        api_tool(
            client,
            "list_employee_time_entries",
            "List time entries for an employee",
            |client, p: EmployeeTimeEntriesParams| async move {
                let path = format!("/employees/{}/time_entries", p.employee_id);
                let filters = body_without(&p, &["employee_id"])?;
                list_all(&client, &path, "time_entries", &filters).await
            },
        ),
    ]
}
