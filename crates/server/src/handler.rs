//! The MCP surface: two tools over one shared [`HoursService`].

use std::sync::Arc;

use crate::tools::get_schedule::{GetScheduleParams, get_schedule_impl};
use crate::tools::list_facilities::{ListFacilitiesParams, list_facilities_impl};

use openhours_client::HoursService;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

#[derive(Clone)]
pub struct OpenHoursServer {
    service: Arc<HoursService>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl OpenHoursServer {
    pub fn new(service: HoursService) -> Self {
        Self { service: Arc::new(service), tool_router: Self::tool_router() }
    }

    /// List pool facilities, optionally filtered by name.
    #[tool(description = "List public pools. Optional `query` filters by name (case-insensitive substring). \
                          Each entry has a `name` and the `source_id` to pass to get_schedule.")]
    async fn list_facilities(&self, params: Parameters<ListFacilitiesParams>) -> Result<CallToolResult, McpError> {
        list_facilities_impl(&self.service, params.0).await
    }

    /// Opening hours for the next seven days, starting today.
    #[tool(description = "Opening hours of one pool for today and the following six days. \
                          `source_id` is the facility URL from list_facilities (absolute or site-relative). \
                          Returns status `available` with a schedule, or `unavailable` with a reason.")]
    async fn get_schedule(&self, params: Parameters<GetScheduleParams>) -> Result<CallToolResult, McpError> {
        let today = chrono::Local::now().date_naive();
        get_schedule_impl(&self.service, params.0, today).await
    }
}

impl ServerHandler for OpenHoursServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "openhours-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Call list_facilities to find a pool, then get_schedule with its source_id.".into(),
            ),
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
