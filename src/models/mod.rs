//! Domain models for the calculator.
//!
//! # Reference tables
//!
//! Loaded once and never changed while the process runs:
//!
//! - [`Page`]: a dashboard page with a build time and the ETL sections it needs.
//! - [`EtlTask`]: data-integration work keyed by section id.
//! - [`DeploymentTask`]: optional post-build work.
//! - [`Person`]: a manager or developer with an hourly rate.
//!
//! # Per-request values
//!
//! - [`Selection`]: the user's choices, by name.
//! - [`Estimate`] / [`EstimateOutcome`]: derived time and cost, never stored.
//! - [`PageOverview`]: checklist rows with each page's share of total build time.

mod dataset;
mod estimate;
mod page;
mod person;
mod task;

pub use dataset::*;
pub use estimate::*;
pub use page::*;
pub use person::*;
pub use task::*;
