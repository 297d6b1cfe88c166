//! list_facilities tool implementation.
//!
//! Lists facilities from the directory, served from cache while fresh.

use openhours_client::{DocumentFetcher, HoursService};
use openhours_core::Facility;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the list_facilities tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListFacilitiesParams {
    /// Case-insensitive substring of the facility name. Omit to list all.
    #[serde(default)]
    pub query: Option<String>,
}

/// Output structure for the list_facilities tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFacilitiesOutput {
    pub facilities: Vec<Facility>,
}

/// Implementation of the list_facilities tool.
pub async fn list_facilities_impl<F: DocumentFetcher>(
    service: &HoursService<F>, params: ListFacilitiesParams,
) -> Result<CallToolResult, McpError> {
    let facilities = match params.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => service.find_facilities(query).await?,
        _ => service.list_facilities().await?,
    };

    let output = ListFacilitiesOutput { facilities };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
