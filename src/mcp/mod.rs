//! MCP server exposing the calculator to AI assistants.

mod types;

pub use types::*;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;

use crate::error::EstimateError;
use crate::estimator::Estimator;
use crate::models::*;
use crate::render;

#[derive(Clone)]
pub struct McpServer {
    estimator: Estimator,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(estimator: Estimator) -> Self {
        Self {
            estimator,
            tool_router: Self::tool_router(),
        }
    }

    fn estimate_error(e: EstimateError) -> McpError {
        match e {
            EstimateError::ReferenceLookup { .. } => McpError::invalid_params(e.to_string(), None),
            EstimateError::DataFormat { .. } => McpError::internal_error(e.to_string(), None),
        }
    }

    fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // ============================================================
    // Tool logic, shared by the tools below and by tests
    // ============================================================

    pub fn pages_response(&self, category: Option<&str>) -> PageListResponse {
        PageListResponse {
            pages: self.estimator.page_overview(category),
        }
    }

    pub fn deployment_tasks_response(&self) -> DeploymentTaskListResponse {
        DeploymentTaskListResponse {
            deployment_tasks: self.estimator.reference().deployment_tasks().to_vec(),
        }
    }

    pub fn staff_response(&self) -> StaffResponse {
        let reference = self.estimator.reference();
        StaffResponse {
            managers: reference.managers().iter().map(StaffInfo::from).collect(),
            developers: reference.developers().iter().map(StaffInfo::from).collect(),
        }
    }

    pub fn estimate_response(
        &self,
        req: EstimateProjectRequest,
    ) -> Result<EstimateOutcome, McpError> {
        self.estimator
            .estimate(&Selection::from(req))
            .map_err(Self::estimate_error)
    }
}

#[tool_router]
impl McpServer {
    #[tool(
        description = "List the dashboard pages that can be ordered. Returns each page's id, name, category, estimated build time in hours, and percent_of_total (its share of the build time of all pages, 0 to 1). Use the exact page names when calling estimate_project."
    )]
    async fn list_pages(
        &self,
        params: Parameters<ListPagesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        Self::json_result(&self.pages_response(req.category.as_deref()))
    }

    #[tool(
        description = "List optional deployment tasks with their estimated time in hours. These are added to the project independently of pages."
    )]
    async fn list_deployment_tasks(&self) -> Result<CallToolResult, McpError> {
        Self::json_result(&self.deployment_tasks_response())
    }

    #[tool(
        description = "List project managers and developers with their hourly rates. One of each must be chosen before a cost can be estimated."
    )]
    async fn list_staff(&self) -> Result<CallToolResult, McpError> {
        Self::json_result(&self.staff_response())
    }

    #[tool(
        description = "Estimate total project time and cost. Time = selected page time + selected deployment time + ETL time for the sections the pages need (each section counted once) + fixed data modeling time. Cost = total time x (manager rate + developer rate). If the manager or developer is missing, returns status 'incomplete' with the missing roles instead of an estimate. Unknown names are rejected."
    )]
    async fn estimate_project(
        &self,
        params: Parameters<EstimateProjectRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.estimate_response(params.0)?;
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![
            Content::text(render::render_outcome(&outcome)),
            Content::text(json),
        ]))
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "tp-calculator".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            instructions: Some(
                r#"Estimates time and cost for dashboard projects.

WORKFLOW:
1. Call list_pages to see the available pages and their build times
2. Call list_deployment_tasks for optional deployment work
3. Call list_staff to pick a project manager and a developer
4. Call estimate_project with the chosen names

Names must match the reference tables exactly. Costs are in the same
currency as the hourly rates; report them with two decimals."#
                    .into(),
            ),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(estimator: Estimator) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("Starting MCP server via stdio");

    let service = McpServer::new(estimator);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
