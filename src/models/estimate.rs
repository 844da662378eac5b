use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Person, Role};

/// What the user picked. Names refer to the reference tables by natural key.
///
/// Page and deployment names are sets, so selecting the same page twice is
/// the same as selecting it once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Selection {
    #[serde(default)]
    pub pages: BTreeSet<String>,
    #[serde(default)]
    pub deployment_tasks: BTreeSet<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub developer: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, name: impl Into<String>) -> Self {
        self.pages.insert(name.into());
        self
    }

    pub fn deployment_task(mut self, name: impl Into<String>) -> Self {
        self.deployment_tasks.insert(name.into());
        self
    }

    pub fn manager(mut self, name: impl Into<String>) -> Self {
        self.manager = Some(name.into());
        self
    }

    pub fn developer(mut self, name: impl Into<String>) -> Self {
        self.developer = Some(name.into());
        self
    }
}

/// Total project time and cost for a selection, with the time breakdown.
///
/// All times are hours. `total_cost` applies both hourly rates to the whole
/// `total_time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Estimate {
    pub page_time: f64,
    pub deployment_time: f64,
    pub etl_time: f64,
    pub modeling_time: f64,
    pub total_time: f64,
    pub manager: Person,
    pub developer: Person,
    pub total_cost: f64,
}

/// Result of estimating a selection.
///
/// `Incomplete` is a normal state while the user has not yet chosen a
/// manager or developer; no time or cost is reported for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EstimateOutcome {
    Complete { estimate: Estimate },
    Incomplete { missing: Vec<Role> },
}

impl EstimateOutcome {
    pub fn estimate(&self) -> Option<&Estimate> {
        match self {
            Self::Complete { estimate } => Some(estimate),
            Self::Incomplete { .. } => None,
        }
    }
}

/// One row of the page checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageOverview {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub estimated_time: f64,
    /// Share of the summed build time of all pages, 0.0 to 1.0.
    pub percent_of_total: f64,
}
