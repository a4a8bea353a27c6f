//! Review tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{MessageChannel, PageParams, list_all};
use crate::api::HousecallClient;
use crate::domains::tools::handlers::{ToolSet, api_tool, body_without};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListReviewsParams {
    /// Filter by customer ID
    pub customer_id: Option<String>,
    /// Filter by job ID
    pub job_id: Option<String>,
    /// Filter by rating (1-5)
    #[schemars(range(min = 1, max = 5))]
    pub rating: Option<u8>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReviewIdParams {
    /// Review ID
    pub review_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RequestReviewParams {
    /// Job ID
    pub job_id: String,
    /// Review request method
    pub method: Option<MessageChannel>,
    /// Custom message to include with the review request
    pub message: Option<String>,
}

pub fn register(client: &HousecallClient) -> ToolSet {
    vec![
        api_tool(
            client,
            "list_reviews",
            "List reviews with optional filters",
            |client, p: ListReviewsParams| async move {
                list_all(&client, "/reviews", "reviews", &p).await
            },
        ),
        api_tool(
            client,
            "get_review",
            "Get detailed information about a specific review",
            |client, p: ReviewIdParams| async move {
                Ok(client.get(&format!("/reviews/{}", p.review_id), None).await?)
            },
        ),
        api_tool(
            client,
            "request_review",
            "Request a review from a customer for a completed job",
            |client, p: RequestReviewParams| async move {
                let options = body_without(&p, &["job_id"])?;
                Ok(client
                    .post(&format!("/jobs/{}/request_review", p.job_id), Some(&options))
                    .await?)
            },
        ),
    ]
}
