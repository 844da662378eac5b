use serde::{Deserialize, Serialize};

use super::{DeploymentTask, EtlTask, PageRecord, Person};

/// The five reference tables as read from storage or a workbook export,
/// before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawDataset {
    pub pages: Vec<PageRecord>,
    pub etl_tasks: Vec<EtlTask>,
    pub deployment_tasks: Vec<DeploymentTask>,
    pub managers: Vec<Person>,
    pub developers: Vec<Person>,
}

/// Row counts per reference table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetCounts {
    pub pages: usize,
    pub etl_tasks: usize,
    pub deployment_tasks: usize,
    pub managers: usize,
    pub developers: usize,
}

impl std::fmt::Display for DatasetCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pages, {} ETL tasks, {} deployment tasks, {} managers, {} developers",
            self.pages, self.etl_tasks, self.deployment_tasks, self.managers, self.developers
        )
    }
}
