//! Tool Registry - central registration of all tools.
//!
//! The registry is assembled once at startup from the per-domain
//! registration functions listed in [`DOMAINS`] and is read-only afterwards.
//! When adding a new domain:
//! 1. Create the domain file in `definitions/`
//! 2. Give it a `register(&HousecallClient) -> ToolSet` function
//! 3. Append it to `DOMAINS` in `definitions/mod.rs`

use std::collections::HashMap;

use rmcp::model::Tool;
use tracing::{debug, info, warn};

use super::definitions::DOMAINS;
use super::handlers::{ToolEntry, ToolSet};
use crate::api::HousecallClient;

/// Immutable mapping from tool name to [`ToolEntry`].
///
/// Entries are kept in registration order for listing. On a name collision
/// the later registration wins but keeps the position of the first one.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build the registry from every domain, in the fixed domain order.
    pub fn new(client: &HousecallClient) -> Self {
        let registry = Self::from_sets(DOMAINS.iter().map(|(domain, register)| {
            let set = register(client);
            debug!("Domain '{}' contributed {} tools", domain, set.len());
            set
        }));
        info!("Registered {} tools", registry.len());
        registry
    }

    /// Merge partial tool sets into one registry (last writer wins).
    pub fn from_sets<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = ToolSet>,
    {
        let mut registry = Self::default();
        for entry in sets.into_iter().flatten() {
            registry.insert(entry);
        }
        registry
    }

    fn insert(&mut self, entry: ToolEntry) {
        match self.index.get(entry.name()) {
            Some(&position) => {
                warn!("Tool '{}' registered twice; keeping the later definition", entry.name());
                self.entries[position] = entry;
            }
            None => {
                self.index.insert(entry.name().to_string(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// All tools as rmcp `Tool` models, in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.iter().map(|e| e.tool().clone()).collect()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.entries.iter().map(ToolEntry::name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::handlers::api_tool;
    use crate::api::JsonObject;
    use serde_json::json;

    fn test_client() -> HousecallClient {
        HousecallClient::with_base_url("test-key", "http://127.0.0.1:1", None).unwrap()
    }

    fn constant(client: &HousecallClient, name: &'static str, answer: i64) -> ToolEntry {
        api_tool(client, name, "constant", move |_client, _p: JsonObject| async move {
            Ok(json!(answer))
        })
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(&test_client());
        assert_eq!(registry.len(), 106);

        let names = registry.tool_names();
        assert!(names.contains(&"list_jobs"));
        assert!(names.contains(&"get_job"));
        assert!(names.contains(&"search_customers"));
        assert!(names.contains(&"convert_estimate_to_job"));
        assert!(names.contains(&"mark_invoice_paid"));
        assert!(names.contains(&"get_dispatch_board"));
        assert!(names.contains(&"bulk_update_prices"));
        assert!(names.contains(&"list_webhook_deliveries"));
        assert!(names.contains(&"get_employee_hours"));
        assert!(names.contains(&"update_tax_settings"));
    }

    #[test]
    fn test_registry_keeps_domain_order() {
        let registry = ToolRegistry::new(&test_client());
        let names = registry.tool_names();
        assert_eq!(names.first(), Some(&"list_jobs"));
        assert_eq!(names.last(), Some(&"update_tax_settings"));
    }

    #[test]
    fn test_every_tool_has_object_schema_and_description() {
        let registry = ToolRegistry::new(&test_client());
        for tool in registry.tools() {
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&json!("object")),
                "tool {} has no object schema",
                tool.name
            );
            assert!(tool.description.is_some(), "tool {} has no description", tool.name);
        }
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let registry = ToolRegistry::new(&test_client());
        assert!(registry.get("not_a_real_tool").is_none());
        assert!(registry.get("get_job").is_some());
    }

    #[tokio::test]
    async fn test_later_registration_wins() {
        let client = test_client();
        let registry = ToolRegistry::from_sets(vec![
            vec![constant(&client, "first", 1), constant(&client, "shared", 1)],
            vec![constant(&client, "shared", 2), constant(&client, "last", 3)],
        ]);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.tool_names(), vec!["first", "shared", "last"]);

        let shared = registry.get("shared").unwrap();
        assert_eq!(shared.call(JsonObject::new()).await.unwrap(), json!(2));
    }
}
