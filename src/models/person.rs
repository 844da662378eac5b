use serde::{Deserialize, Serialize};

/// A billable person: a project manager or a developer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    #[serde(alias = "Project Manager Name", alias = "Developer Name")]
    pub name: String,
    /// Currency units per hour.
    #[serde(alias = "Salary Rate per Hour")]
    pub hourly_rate: f64,
}

impl Person {
    /// Dropdown label, e.g. `"Jane Doe - 75 $ per hour"`.
    pub fn label(&self) -> String {
        format!("{} - {} $ per hour", self.name, self.hourly_rate)
    }
}

/// Which rate table a person comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    Developer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Developer => "developer",
        }
    }
}
