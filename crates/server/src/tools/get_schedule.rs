//! get_schedule tool implementation.
//!
//! Resolves seven days of opening hours for one facility. A facility whose
//! page cannot be fetched or read comes back as `unavailable` data, not as a
//! protocol error.

use chrono::NaiveDate;
use openhours_client::{DocumentFetcher, HoursService};
use openhours_core::ScheduleLookup;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the get_schedule tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetScheduleParams {
    /// Facility URL as returned by list_facilities. Site-relative paths such
    /// as `/baeder/detail/stadtbad-mitte/` are accepted.
    pub source_id: String,
}

/// Implementation of the get_schedule tool, anchored on `today`.
pub async fn get_schedule_impl<F: DocumentFetcher>(
    service: &HoursService<F>, params: GetScheduleParams, today: NaiveDate,
) -> Result<CallToolResult, McpError> {
    let lookup: ScheduleLookup = service.get_schedule(&params.source_id, today).await;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&lookup).unwrap_or_default(),
    )]))
}
