//! Page aggregation for collection endpoints.
//!
//! Collection endpoints answer with
//! `{data: [...], page, page_size, total_items, total_pages}`.
//! [`HousecallClient::get_paginated`] walks the pages in order and returns
//! one flat list; [`HousecallClient::get_page`] fetches exactly one page.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::client::{HousecallClient, JsonObject};
use super::error::ClientError;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// One page of a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub page_size: u64,
    #[serde(default)]
    pub total_items: u64,
    pub total_pages: u64,
}

/// Pagination settings split out of a parameter object.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
    /// Remaining filters, forwarded unchanged on every page request.
    pub filters: JsonObject,
}

impl PageRequest {
    /// Split `page` and `page_size` out of `params`.
    ///
    /// Missing or zero values fall back to the defaults.
    pub fn from_params(params: &JsonObject) -> Self {
        let mut filters = params.clone();
        let page = take_positive(&mut filters, "page").unwrap_or(DEFAULT_PAGE);
        let page_size = take_positive(&mut filters, "page_size").unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            page,
            page_size,
            filters,
        }
    }

    fn query_for(&self, page: u64) -> JsonObject {
        let mut query = self.filters.clone();
        query.insert("page".to_string(), Value::from(page));
        query.insert("page_size".to_string(), Value::from(self.page_size));
        query
    }
}

fn take_positive(params: &mut JsonObject, key: &str) -> Option<u64> {
    params.remove(key).and_then(|v| v.as_u64()).filter(|n| *n > 0)
}

impl HousecallClient {
    /// Fetch a single page without looping.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &JsonObject,
    ) -> Result<Page<T>, ClientError> {
        let body = self.get(path, Some(query)).await?;
        serde_json::from_value(body).map_err(|e| ClientError::unexpected_response(path, e))
    }

    /// Fetch every page of a collection and return the items in order.
    ///
    /// Stops once the requested page number reaches the `total_pages`
    /// reported by that page. The first failing page aborts the whole walk;
    /// items gathered so far are dropped.
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &JsonObject,
    ) -> Result<Vec<T>, ClientError> {
        let request = PageRequest::from_params(params);
        let mut items = Vec::new();
        let mut current = request.page;
        let mut reported_total: Option<u64> = None;

        loop {
            let page: Page<T> = self.get_page(path, &request.query_for(current)).await?;
            debug!(
                "Fetched page {}/{} of {} ({} items)",
                current,
                page.total_pages,
                path,
                page.data.len()
            );

            // No cap on the number of pages: the server-reported total is trusted.
            if let Some(previous) = reported_total.filter(|t| *t != page.total_pages) {
                warn!(
                    "total_pages for {} changed from {} to {} while paginating",
                    path, previous, page.total_pages
                );
            }
            reported_total = Some(page.total_pages);

            items.extend(page.data);

            if current >= page.total_pages {
                break;
            }
            current += 1;
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HousecallClient {
        HousecallClient::with_base_url("test-key", &server.uri(), None).unwrap()
    }

    fn items(range: std::ops::Range<u64>) -> Vec<Value> {
        range.map(|i| json!({"id": format!("J-{i}")})).collect()
    }

    async fn mount_page(server: &MockServer, page: u64, data: Vec<Value>, total_pages: u64) {
        mount_page_times(server, page, data, total_pages, 1).await;
    }

    async fn mount_page_times(
        server: &MockServer,
        page: u64,
        data: Vec<Value>,
        total_pages: u64,
        times: u64,
    ) {
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("page", page.to_string()))
            .and(query_param("page_size", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": data,
                "page": page,
                "page_size": 50,
                "total_items": 150,
                "total_pages": total_pages,
            })))
            .expect(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_three_pages_aggregated_in_order() {
        let server = MockServer::start().await;
        mount_page(&server, 1, items(0..50), 3).await;
        mount_page(&server, 2, items(50..100), 3).await;
        mount_page(&server, 3, items(100..150), 3).await;

        let all: Vec<Value> = client_for(&server)
            .get_paginated("/jobs", &JsonObject::new())
            .await
            .unwrap();

        assert_eq!(all.len(), 150);
        assert_eq!(all[0]["id"], "J-0");
        assert_eq!(all[50]["id"], "J-50");
        assert_eq!(all[149]["id"], "J-149");
    }

    #[tokio::test]
    async fn test_count_matches_total_items_of_first_page() {
        let server = MockServer::start().await;
        mount_page_times(&server, 1, items(0..50), 3, 2).await;
        mount_page(&server, 2, items(50..100), 3).await;
        mount_page(&server, 3, items(100..150), 3).await;

        let client = client_for(&server);
        let first: Page<Value> = client
            .get_page("/jobs", &PageRequest::from_params(&JsonObject::new()).query_for(1))
            .await
            .unwrap();

        let all: Vec<Value> = client.get_paginated("/jobs", &JsonObject::new()).await.unwrap();
        assert_eq!(all.len() as u64, first.total_items);
    }

    #[tokio::test]
    async fn test_filters_forwarded_on_every_page() {
        let server = MockServer::start().await;
        for page in 1..=2u64 {
            Mock::given(method("GET"))
                .and(path("/invoices"))
                .and(query_param("status", "paid"))
                .and(query_param("page", page.to_string()))
                .and(query_param("page_size", "2"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "data": [{"n": page * 10}, {"n": page * 10 + 1}],
                    "total_pages": 2,
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let params = json!({"status": "paid", "page_size": 2});
        let all: Vec<Value> = client_for(&server)
            .get_paginated("/invoices", params.as_object().unwrap())
            .await
            .unwrap();
        assert_eq!(all, vec![json!({"n": 10}), json!({"n": 11}), json!({"n": 20}), json!({"n": 21})]);
    }

    #[tokio::test]
    async fn test_total_pages_change_does_not_alter_termination() {
        let server = MockServer::start().await;
        mount_page(&server, 1, vec![json!(1)], 3).await;
        mount_page(&server, 2, vec![json!(2)], 1).await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let all: Vec<Value> = client_for(&server)
            .get_paginated("/jobs", &JsonObject::new())
            .await
            .unwrap();
        assert_eq!(all, vec![json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn test_starting_page_respected() {
        let server = MockServer::start().await;
        mount_page(&server, 3, items(100..150), 3).await;

        let params = json!({"page": 3});
        let all: Vec<Value> = client_for(&server)
            .get_paginated("/jobs", params.as_object().unwrap())
            .await
            .unwrap();
        assert_eq!(all.len(), 50);
        assert_eq!(all[0]["id"], "J-100");
    }

    #[tokio::test]
    async fn test_failing_page_discards_partial_results() {
        let server = MockServer::start().await;
        mount_page(&server, 1, items(0..50), 3).await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .expect(1)
            .mount(&server)
            .await;

        let result: Result<Vec<Value>, ClientError> =
            client_for(&server).get_paginated("/jobs", &JsonObject::new()).await;

        let err = result.unwrap_err();
        let classified = err.classified().expect("classified error");
        assert_eq!(classified.kind(), ErrorKind::Api);
        assert_eq!(classified.status(), 500);
        assert_eq!(classified.message(), "boom");
    }

    #[tokio::test]
    async fn test_malformed_page_is_unexpected_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_paginated::<Value>("/tags", &JsonObject::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedResponse { .. }));
        assert!(err.classified().is_none());
    }

    #[tokio::test]
    async fn test_get_page_performs_single_request() {
        let server = MockServer::start().await;
        mount_page(&server, 1, items(0..50), 3).await;

        let page: Page<Value> = client_for(&server)
            .get_page("/jobs", &PageRequest::from_params(&JsonObject::new()).query_for(1))
            .await
            .unwrap();
        assert_eq!(page.data.len(), 50);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_page_request_defaults() {
        let params = json!({"page": 0, "status": "open"});
        let request = PageRequest::from_params(params.as_object().unwrap());
        assert_eq!(request.page, DEFAULT_PAGE);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.filters.get("status"), Some(&json!("open")));
        assert!(!request.filters.contains_key("page"));
    }
}
