//! Request and response types for MCP tools.

use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{DeploymentTask, PageOverview, Person, Selection};

// ============================================================
// Request Types
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListPagesRequest {
    #[schemars(description = "Only list pages in this category (case-insensitive). Omit for all pages.")]
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EstimateProjectRequest {
    #[schemars(description = "Names of the dashboard pages to build, exactly as returned by list_pages")]
    #[serde(default)]
    pub pages: Vec<String>,
    #[schemars(description = "Names of optional deployment tasks, exactly as returned by list_deployment_tasks")]
    #[serde(default)]
    pub deployment_tasks: Vec<String>,
    #[schemars(description = "Project manager name from list_staff")]
    #[serde(default)]
    pub manager: Option<String>,
    #[schemars(description = "Developer name from list_staff")]
    #[serde(default)]
    pub developer: Option<String>,
}

impl From<EstimateProjectRequest> for Selection {
    fn from(req: EstimateProjectRequest) -> Self {
        Selection {
            pages: req.pages.into_iter().collect(),
            deployment_tasks: req.deployment_tasks.into_iter().collect(),
            manager: req.manager,
            developer: req.developer,
        }
    }
}

// ============================================================
// Response Types
// ============================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct PageListResponse {
    pub pages: Vec<PageOverview>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeploymentTaskListResponse {
    pub deployment_tasks: Vec<DeploymentTask>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffInfo {
    pub name: String,
    pub hourly_rate: f64,
    /// Display label, e.g. "Jane Doe - 75 $ per hour".
    pub label: String,
}

impl From<&Person> for StaffInfo {
    fn from(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            hourly_rate: person.hourly_rate,
            label: person.label(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffResponse {
    pub managers: Vec<StaffInfo>,
    pub developers: Vec<StaffInfo>,
}
