//! Immutable, indexed reference tables.

use std::collections::HashMap;

use crate::error::{EstimateError, Result, Table};
use crate::models::*;

/// The loaded reference tables, indexed by natural key.
///
/// Built once at startup and shared read-only. Construction validates the
/// data, so every `ReferenceData` in existence has unique keys and finite,
/// non-negative times and rates.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pages: Vec<Page>,
    page_index: HashMap<String, usize>,
    etl_time_by_section: HashMap<i64, f64>,
    deployment_tasks: Vec<DeploymentTask>,
    deployment_index: HashMap<String, usize>,
    managers: Vec<Person>,
    manager_index: HashMap<String, usize>,
    developers: Vec<Person>,
    developer_index: HashMap<String, usize>,
}

impl ReferenceData {
    pub fn new(
        pages: Vec<Page>,
        etl_tasks: Vec<EtlTask>,
        deployment_tasks: Vec<DeploymentTask>,
        managers: Vec<Person>,
        developers: Vec<Person>,
    ) -> Result<Self> {
        let mut page_ids = HashMap::new();
        for page in &pages {
            check_amount(Table::Pages, &page.name, "estimated time", page.estimated_time)?;
            if let Some(previous) = page_ids.insert(page.id, &page.name) {
                return Err(EstimateError::format(
                    Table::Pages,
                    format!(
                        "page id {} is used by both '{}' and '{}'",
                        page.id, previous, page.name
                    ),
                ));
            }
        }
        let page_index = index_by_name(Table::Pages, pages.iter().map(|p| p.name.as_str()))?;

        let mut etl_time_by_section: HashMap<i64, f64> = HashMap::new();
        for task in &etl_tasks {
            check_amount(
                Table::EtlTasks,
                &format!("section {}", task.section_id),
                "estimated time",
                task.estimated_time,
            )?;
            *etl_time_by_section.entry(task.section_id).or_default() += task.estimated_time;
        }

        for task in &deployment_tasks {
            check_amount(Table::DeploymentTasks, &task.name, "estimated time", task.estimated_time)?;
        }
        let deployment_index = index_by_name(
            Table::DeploymentTasks,
            deployment_tasks.iter().map(|t| t.name.as_str()),
        )?;

        for person in &managers {
            check_amount(Table::Managers, &person.name, "hourly rate", person.hourly_rate)?;
        }
        let manager_index = index_by_name(Table::Managers, managers.iter().map(|p| p.name.as_str()))?;

        for person in &developers {
            check_amount(Table::Developers, &person.name, "hourly rate", person.hourly_rate)?;
        }
        let developer_index =
            index_by_name(Table::Developers, developers.iter().map(|p| p.name.as_str()))?;

        Ok(Self {
            pages,
            page_index,
            etl_time_by_section,
            deployment_tasks,
            deployment_index,
            managers,
            manager_index,
            developers,
            developer_index,
        })
    }

    /// Parse and validate raw workbook rows.
    pub fn from_raw(raw: RawDataset) -> Result<Self> {
        let pages = raw
            .pages
            .into_iter()
            .map(Page::from_record)
            .collect::<Result<Vec<_>>>()?;

        Self::new(
            pages,
            raw.etl_tasks,
            raw.deployment_tasks,
            raw.managers,
            raw.developers,
        )
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, name: &str) -> Option<&Page> {
        self.page_index.get(name).map(|&i| &self.pages[i])
    }

    /// Summed time of all ETL tasks in a section; 0 for unreferenced sections.
    pub fn etl_time_for_section(&self, section_id: i64) -> f64 {
        self.etl_time_by_section
            .get(&section_id)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn deployment_tasks(&self) -> &[DeploymentTask] {
        &self.deployment_tasks
    }

    pub fn deployment_task(&self, name: &str) -> Option<&DeploymentTask> {
        self.deployment_index
            .get(name)
            .map(|&i| &self.deployment_tasks[i])
    }

    pub fn managers(&self) -> &[Person] {
        &self.managers
    }

    pub fn manager(&self, name: &str) -> Option<&Person> {
        self.manager_index.get(name).map(|&i| &self.managers[i])
    }

    pub fn developers(&self) -> &[Person] {
        &self.developers
    }

    pub fn developer(&self, name: &str) -> Option<&Person> {
        self.developer_index.get(name).map(|&i| &self.developers[i])
    }
}

fn check_amount(table: Table, owner: &str, what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EstimateError::format(
            table,
            format!("'{}' has invalid {} {}", owner, what, value),
        ))
    }
}

fn index_by_name<'a>(
    table: Table,
    names: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (i, name) in names.enumerate() {
        if index.insert(name.to_string(), i).is_some() {
            return Err(EstimateError::format(
                table,
                format!("duplicate name '{}'", name),
            ));
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: i64, name: &str) -> Page {
        Page {
            id,
            name: name.to_string(),
            category: "General".to_string(),
            section_ids: Default::default(),
            estimated_time: 1.0,
        }
    }

    fn person(name: &str, rate: f64) -> Person {
        Person {
            name: name.to_string(),
            hourly_rate: rate,
        }
    }

    #[test]
    fn sums_etl_time_per_section() {
        let data = ReferenceData::new(
            vec![],
            vec![
                EtlTask { section_id: 1, estimated_time: 2.0 },
                EtlTask { section_id: 1, estimated_time: 3.5 },
                EtlTask { section_id: 2, estimated_time: 1.0 },
            ],
            vec![],
            vec![],
            vec![],
        )
        .unwrap();

        assert_eq!(data.etl_time_for_section(1), 5.5);
        assert_eq!(data.etl_time_for_section(2), 1.0);
        assert_eq!(data.etl_time_for_section(99), 0.0);
    }

    #[test]
    fn rejects_duplicate_page_names() {
        let err = ReferenceData::new(
            vec![page(1, "A"), page(2, "A")],
            vec![],
            vec![],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, EstimateError::DataFormat { table: Table::Pages, .. }));
    }

    #[test]
    fn rejects_duplicate_page_ids() {
        let err = ReferenceData::new(
            vec![page(1, "A"), page(1, "B")],
            vec![],
            vec![],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(err.to_string().contains("page id 1"));
    }

    #[test]
    fn rejects_negative_rates() {
        let err = ReferenceData::new(vec![], vec![], vec![], vec![person("Ann", -5.0)], vec![])
            .unwrap_err();
        assert!(matches!(err, EstimateError::DataFormat { table: Table::Managers, .. }));
    }

    #[test]
    fn same_name_may_appear_in_both_rate_tables() {
        let data = ReferenceData::new(
            vec![],
            vec![],
            vec![],
            vec![person("Sam", 80.0)],
            vec![person("Sam", 55.0)],
        )
        .unwrap();

        assert_eq!(data.manager("Sam").map(|p| p.hourly_rate), Some(80.0));
        assert_eq!(data.developer("Sam").map(|p| p.hourly_rate), Some(55.0));
    }

    #[test]
    fn from_raw_rejects_malformed_section_ids() {
        let raw = RawDataset {
            pages: vec![PageRecord {
                id: 1,
                name: "A".into(),
                category: "General".into(),
                section_ids: Some("1;2".into()),
                estimated_time: 1.0,
            }],
            ..Default::default()
        };

        assert!(matches!(
            ReferenceData::from_raw(raw),
            Err(EstimateError::DataFormat { table: Table::Pages, .. })
        ));
    }
}
