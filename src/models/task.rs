use serde::{Deserialize, Serialize};

/// A unit of data-integration work, pulled in by pages that reference its section.
///
/// Several ETL tasks may share one section id; all of them count when the
/// section is selected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EtlTask {
    #[serde(alias = "Section ID")]
    pub section_id: i64,
    /// Hours.
    #[serde(alias = "Estimated Time")]
    pub estimated_time: f64,
}

/// An optional post-build task, chosen independently of pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentTask {
    #[serde(alias = "Dev Name")]
    pub name: String,
    /// Hours.
    #[serde(alias = "Estimated Time")]
    pub estimated_time: f64,
}
