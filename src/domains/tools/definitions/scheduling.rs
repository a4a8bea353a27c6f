//! Scheduling tools: calendar queries, slot search, time off and
//! recurring schedule templates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::get_with_query;
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetScheduleParams {
    /// Start date (ISO 8601)
    pub start_date: String,
    /// End date (ISO 8601)
    pub end_date: String,
    /// Filter by employee IDs
    pub employee_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckAvailabilityParams {
    /// Employee ID
    pub employee_id: String,
    /// Start time (ISO 8601)
    pub start: String,
    /// End time (ISO 8601)
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindSlotsParams {
    /// Date to search (ISO 8601)
    pub date: String,
    /// Required duration in minutes
    pub duration_minutes: u32,
    /// Filter by specific employees
    pub employee_ids: Option<Vec<String>>,
    /// Filter by service area/zip code
    pub service_area: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateTimeOffParams {
    /// Employee ID
    pub employee_id: String,
    /// Start time (ISO 8601)
    pub start: String,
    /// End time (ISO 8601)
    pub end: String,
    /// Reason for time off
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TimeOffIdParams {
    /// Time off ID
    pub time_off_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListRecurringParams {
    /// Filter by employee ID
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateRecurringParams {
    /// Employee ID
    pub employee_id: String,
    /// Days of week (0=Sunday, 6=Saturday)
    pub days_of_week: Vec<u8>,
    /// Start time (HH:MM format)
    pub start_time: String,
    /// End time (HH:MM format)
    pub end_time: String,
    /// Effective from date (ISO 8601)
    pub effective_from: Option<String>,
    /// Effective until date (ISO 8601, optional)
    pub effective_until: Option<String>,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "get_schedule",
            "Get schedule for a date range",
            |client, p: GetScheduleParams| async move {
                get_with_query(&client, "/schedule", &p).await
            },
        ),
        api_tool(
            client,
            "check_availability",
            "Check employee availability for a time slot",
            |client, p: CheckAvailabilityParams| async move {
                get_with_query(&client, "/schedule/availability", &p).await
            },
        ),
        api_tool(
            client,
            "find_available_slots",
            "Find available time slots for scheduling",
            |client, p: FindSlotsParams| async move {
                get_with_query(&client, "/schedule/available_slots", &p).await
            },
        ),
        api_tool(
            client,
            "create_time_off",
            "Create a time-off block for an employee",
            |client, p: CreateTimeOffParams| async move {
                Ok(client.post("/schedule/time_off", Some(&body(&p)?)).await?)
            },
        ),
        api_tool(
            client,
            "delete_time_off",
            "Delete a time-off block",
            |client, p: TimeOffIdParams| async move {
                Ok(client
                    .delete(&format!("/schedule/time_off/{}", p.time_off_id))
                    .await?)
            },
        ),
        api_tool(
            client,
            "list_recurring_schedules",
            "List recurring schedule templates",
            |client, p: ListRecurringParams| async move {
                get_with_query(&client, "/schedule/recurring", &p).await
            },
        ),
        api_tool(
            client,
            "create_recurring_schedule",
            "Create a recurring schedule template",
            |client, p: CreateRecurringParams| async move {
                Ok(client.post("/schedule/recurring", Some(&body(&p)?)).await?)
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JsonObject;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn entry(client: &HousecallClient, name: &str) -> crate::domains::tools::ToolEntry {
        register(client)
            .into_iter()
            .find(|t| t.name() == name)
            .unwrap()
    }

    #[tokio::test]
    async fn test_find_slots_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedule/available_slots"))
            .and(query_param("date", "2024-03-04"))
            .and(query_param("duration_minutes", "90"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"start": "09:00"}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = HousecallClient::with_base_url("k", &server.uri(), None).unwrap();
        let args: JsonObject = json!({"date": "2024-03-04", "duration_minutes": 90})
            .as_object()
            .cloned()
            .unwrap();
        let result = entry(&client, "find_available_slots").call(args).await.unwrap();
        assert_eq!(result, json!([{"start": "09:00"}]));
    }

    #[tokio::test]
    async fn test_recurring_schedule_days_sent_as_numbers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/schedule/recurring"))
            .and(body_json(json!({
                "employee_id": "E-1",
                "days_of_week": [1, 3, 5],
                "start_time": "08:00",
                "end_time": "16:30",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "R-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HousecallClient::with_base_url("k", &server.uri(), None).unwrap();
        let args: JsonObject = json!({
            "employee_id": "E-1",
            "days_of_week": [1, 3, 5],
            "start_time": "08:00",
            "end_time": "16:30",
        })
        .as_object()
        .cloned()
        .unwrap();
        let result = entry(&client, "create_recurring_schedule").call(args).await.unwrap();
        assert_eq!(result["id"], "R-1");
    }
}
