//! Time and cost aggregation.
//!
//! The [`Estimator`] holds the shared [`ReferenceData`] and the fixed data
//! modeling overhead. Every operation is a pure function of the reference
//! tables and its arguments.

mod reference;

use std::collections::BTreeSet;
use std::sync::Arc;

pub use reference::ReferenceData;

use crate::error::{EstimateError, Result, Table};
use crate::models::*;

/// Data modeling hours added to every project.
pub const DEFAULT_MODELING_HOURS: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct Estimator {
    reference: Arc<ReferenceData>,
    modeling_hours: f64,
}

impl Estimator {
    pub fn new(reference: impl Into<Arc<ReferenceData>>) -> Self {
        Self {
            reference: reference.into(),
            modeling_hours: DEFAULT_MODELING_HOURS,
        }
    }

    pub fn with_modeling_hours(mut self, hours: f64) -> Self {
        self.modeling_hours = hours;
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn modeling_hours(&self) -> f64 {
        self.modeling_hours
    }

    /// ETL time for a page selection.
    ///
    /// Section ids are unioned across the selected pages before summing, so
    /// a section shared by several pages is only counted once.
    pub fn etl_time<I, S>(&self, page_names: I) -> Result<f64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sections = BTreeSet::new();
        for name in page_names {
            let page = self.lookup_page(name.as_ref())?;
            sections.extend(page.section_ids.iter().copied());
        }

        Ok(sections
            .into_iter()
            .map(|id| self.reference.etl_time_for_section(id))
            .sum())
    }

    /// Page build time plus deployment task time.
    pub fn base_time<P, D>(&self, page_names: P, deployment_names: D) -> Result<f64>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        Ok(self.page_time(page_names)? + self.deployment_time(deployment_names)?)
    }

    /// Produce the estimate for a selection.
    ///
    /// Unknown names fail before anything is computed. A missing manager or
    /// developer is reported as [`EstimateOutcome::Incomplete`].
    pub fn estimate(&self, selection: &Selection) -> Result<EstimateOutcome> {
        let page_time = self.page_time(&selection.pages)?;
        let deployment_time = self.deployment_time(&selection.deployment_tasks)?;
        let etl_time = self.etl_time(&selection.pages)?;

        let manager = selection
            .manager
            .as_deref()
            .map(|name| {
                self.reference
                    .manager(name)
                    .ok_or_else(|| EstimateError::lookup(Table::Managers, name))
            })
            .transpose()?;
        let developer = selection
            .developer
            .as_deref()
            .map(|name| {
                self.reference
                    .developer(name)
                    .ok_or_else(|| EstimateError::lookup(Table::Developers, name))
            })
            .transpose()?;

        let (manager, developer) = match (manager, developer) {
            (Some(m), Some(d)) => (m.clone(), d.clone()),
            (m, d) => {
                let mut missing = Vec::new();
                if m.is_none() {
                    missing.push(Role::Manager);
                }
                if d.is_none() {
                    missing.push(Role::Developer);
                }
                tracing::debug!(?missing, "Selection incomplete, no estimate");
                return Ok(EstimateOutcome::Incomplete { missing });
            }
        };

        let total_time = total_time(page_time + deployment_time, etl_time, self.modeling_hours);
        let total_cost = cost(total_time, manager.hourly_rate, developer.hourly_rate);

        tracing::debug!(
            pages = selection.pages.len(),
            deployment_tasks = selection.deployment_tasks.len(),
            total_time,
            total_cost,
            "Computed estimate"
        );

        Ok(EstimateOutcome::Complete {
            estimate: Estimate {
                page_time,
                deployment_time,
                etl_time,
                modeling_time: self.modeling_hours,
                total_time,
                manager,
                developer,
                total_cost,
            },
        })
    }

    /// Checklist rows, optionally limited to one category.
    ///
    /// Percentages are always relative to the build time of every page, so
    /// filtering does not change a page's share.
    pub fn page_overview(&self, category: Option<&str>) -> Vec<PageOverview> {
        let pages = self.reference.pages();
        let total: f64 = pages.iter().map(|p| p.estimated_time).sum();

        pages
            .iter()
            .filter(|p| category.map_or(true, |c| p.category.eq_ignore_ascii_case(c)))
            .map(|p| PageOverview {
                id: p.id,
                name: p.name.clone(),
                category: p.category.clone(),
                estimated_time: p.estimated_time,
                percent_of_total: if total > 0.0 {
                    p.estimated_time / total
                } else {
                    0.0
                },
            })
            .collect()
    }

    fn lookup_page(&self, name: &str) -> Result<&Page> {
        self.reference
            .page(name)
            .ok_or_else(|| EstimateError::lookup(Table::Pages, name))
    }

    fn page_time<I, S>(&self, page_names: I) -> Result<f64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut hours = 0.0;
        for name in page_names {
            let page = self.lookup_page(name.as_ref())?;
            if seen.insert(page.id) {
                hours += page.estimated_time;
            }
        }
        Ok(hours)
    }

    fn deployment_time<I, S>(&self, deployment_names: I) -> Result<f64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut hours = 0.0;
        for name in deployment_names {
            let name = name.as_ref();
            let task = self
                .reference
                .deployment_task(name)
                .ok_or_else(|| EstimateError::lookup(Table::DeploymentTasks, name))?;
            if seen.insert(task.name.clone()) {
                hours += task.estimated_time;
            }
        }
        Ok(hours)
    }
}

/// Base time plus ETL time plus the fixed modeling overhead.
pub fn total_time(base_time: f64, etl_time: f64, modeling_time: f64) -> f64 {
    base_time + etl_time + modeling_time
}

/// Both hourly rates applied to the full duration.
pub fn cost(total_time: f64, manager_rate: f64, developer_rate: f64) -> f64 {
    total_time * (manager_rate + developer_rate)
}
