//! Reporting tools. All reports are read-only GETs over a date range.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::get_with_query;
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RevenueReportParams {
    /// Start date (ISO 8601)
    pub start_date: String,
    /// End date (ISO 8601)
    pub end_date: String,
    /// Group results by time period
    pub group_by: Option<GroupBy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReportRangeParams {
    /// Start date (ISO 8601)
    pub start_date: String,
    /// End date (ISO 8601)
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceReportParams {
    /// Employee ID (optional - leave blank for all employees)
    pub employee_id: Option<String>,
    /// Start date (ISO 8601)
    pub start_date: String,
    /// End date (ISO 8601)
    pub end_date: String,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "get_revenue_report",
            "Get revenue report for a date range",
            |client, p: RevenueReportParams| async move {
                get_with_query(&client, "/reports/revenue", &p).await
            },
        ),
        api_tool(
            client,
            "get_job_completion_report",
            "Get job completion statistics for a date range",
            |client, p: ReportRangeParams| async move {
                get_with_query(&client, "/reports/job_completion", &p).await
            },
        ),
        api_tool(
            client,
            "get_employee_performance_report",
            "Get employee performance metrics for a date range",
            |client, p: PerformanceReportParams| async move {
                get_with_query(&client, "/reports/employee_performance", &p).await
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JsonObject;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_performance_report_omits_blank_employee() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reports/employee_performance"))
            .and(query_param("start_date", "2024-01-01"))
            .and(query_param("end_date", "2024-01-31"))
            .and(query_param_is_missing("employee_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"employees": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HousecallClient::with_base_url("k", &server.uri(), None).unwrap();
        let entry = register(&client)
            .into_iter()
            .find(|t| t.name() == "get_employee_performance_report")
            .unwrap();
        let args: JsonObject = json!({"start_date": "2024-01-01", "end_date": "2024-01-31"})
            .as_object()
            .cloned()
            .unwrap();

        assert_eq!(entry.call(args).await.unwrap(), json!({"employees": []}));
    }
}
