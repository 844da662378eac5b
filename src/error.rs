//! Error taxonomy for estimation and reference-data loading.

use thiserror::Error;

/// Reference table names, used to say where a lookup or format problem occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Pages,
    EtlTasks,
    DeploymentTasks,
    Managers,
    Developers,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::EtlTasks => "etl_tasks",
            Self::DeploymentTasks => "deployment_tasks",
            Self::Managers => "managers",
            Self::Developers => "developers",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    /// A selection names something that is not in its reference table.
    #[error("'{name}' not found in {table}")]
    ReferenceLookup { table: Table, name: String },

    /// The reference dataset itself is malformed. Raised while loading,
    /// never during estimation.
    #[error("malformed {table} data: {detail}")]
    DataFormat { table: Table, detail: String },
}

impl EstimateError {
    pub fn lookup(table: Table, name: impl Into<String>) -> Self {
        Self::ReferenceLookup {
            table,
            name: name.into(),
        }
    }

    pub fn format(table: Table, detail: impl Into<String>) -> Self {
        Self::DataFormat {
            table,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimateError>;
