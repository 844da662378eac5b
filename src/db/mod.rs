mod import;
mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::estimator::ReferenceData;
use crate::models::*;

pub use import::{read_workbook_dir, WORKBOOK_FILES};

/// SQLite store for the five reference tables.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "tp-calculator")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("reference.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Single-row inserts
    // ============================================================

    /// Insert a page row as-is. Section ids are not checked until the
    /// dataset is loaded.
    pub fn insert_page(&self, page: &PageRecord) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        insert_page_row(&conn, page)
    }

    pub fn insert_etl_task(&self, task: &EtlTask) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        insert_etl_row(&conn, task)
    }

    pub fn insert_deployment_task(&self, task: &DeploymentTask) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        insert_deployment_row(&conn, task)
    }

    pub fn insert_manager(&self, person: &Person) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        insert_person_row(&conn, Role::Manager, person)
    }

    pub fn insert_developer(&self, person: &Person) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        insert_person_row(&conn, Role::Developer, person)
    }

    // ============================================================
    // Whole-dataset operations
    // ============================================================

    /// Replace all five tables with `dataset` in one transaction.
    ///
    /// The dataset is validated first; a malformed dataset leaves the store
    /// untouched.
    pub fn replace_dataset(&self, dataset: &RawDataset) -> Result<DatasetCounts> {
        ReferenceData::from_raw(dataset.clone()).context("Rejected reference dataset")?;

        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM pages;
             DELETE FROM etl_tasks;
             DELETE FROM deployment_tasks;
             DELETE FROM managers;
             DELETE FROM developers;",
        )?;

        for page in &dataset.pages {
            insert_page_row(&tx, page)?;
        }
        for task in &dataset.etl_tasks {
            insert_etl_row(&tx, task)?;
        }
        for task in &dataset.deployment_tasks {
            insert_deployment_row(&tx, task)?;
        }
        for person in &dataset.managers {
            insert_person_row(&tx, Role::Manager, person)?;
        }
        for person in &dataset.developers {
            insert_person_row(&tx, Role::Developer, person)?;
        }
        tx.commit()?;
        drop(conn);

        let counts = self.dataset_counts()?;
        tracing::info!("Replaced reference dataset: {}", counts);
        Ok(counts)
    }

    /// Read a workbook export directory and replace the stored dataset with it.
    pub fn import_workbook_dir(&self, dir: &Path) -> Result<DatasetCounts> {
        let dataset = read_workbook_dir(dir)?;
        self.replace_dataset(&dataset)
    }

    /// Read all five tables in their stored order, without validation.
    pub fn read_dataset(&self) -> Result<RawDataset> {
        let conn = self.conn.lock().expect("database lock poisoned");

        let mut stmt = conn.prepare(
            "SELECT id, name, category, section_ids, estimated_time
             FROM pages ORDER BY position",
        )?;
        let pages = stmt
            .query_map([], |row| {
                Ok(PageRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                    section_ids: row.get(3)?,
                    estimated_time: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt =
            conn.prepare("SELECT section_id, estimated_time FROM etl_tasks ORDER BY id")?;
        let etl_tasks = stmt
            .query_map([], |row| {
                Ok(EtlTask {
                    section_id: row.get(0)?,
                    estimated_time: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn
            .prepare("SELECT name, estimated_time FROM deployment_tasks ORDER BY position")?;
        let deployment_tasks = stmt
            .query_map([], |row| {
                Ok(DeploymentTask {
                    name: row.get(0)?,
                    estimated_time: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let managers = read_people(&conn, Role::Manager)?;
        let developers = read_people(&conn, Role::Developer)?;

        Ok(RawDataset {
            pages,
            etl_tasks,
            deployment_tasks,
            managers,
            developers,
        })
    }

    /// Load and validate the reference tables.
    ///
    /// Fails with [`EstimateError::DataFormat`](crate::error::EstimateError)
    /// if any stored row is malformed; the dataset is then unusable as a
    /// whole.
    pub fn load_reference_data(&self) -> Result<ReferenceData> {
        let raw = self.read_dataset()?;
        let data = ReferenceData::from_raw(raw)?;
        tracing::info!("Loaded reference dataset: {}", self.dataset_counts()?);
        Ok(data)
    }

    /// Row counts of the stored tables.
    pub fn dataset_counts(&self) -> Result<DatasetCounts> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count = |table: &str| -> Result<usize> {
            let n: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
            Ok(n as usize)
        };

        Ok(DatasetCounts {
            pages: count("pages")?,
            etl_tasks: count("etl_tasks")?,
            deployment_tasks: count("deployment_tasks")?,
            managers: count("managers")?,
            developers: count("developers")?,
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn person_table(role: Role) -> &'static str {
    match role {
        Role::Manager => "managers",
        Role::Developer => "developers",
    }
}

fn insert_page_row(conn: &Connection, page: &PageRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO pages (id, name, category, section_ids, estimated_time)
         VALUES (?, ?, ?, ?, ?)",
        (
            page.id,
            &page.name,
            &page.category,
            &page.section_ids,
            page.estimated_time,
        ),
    )?;
    Ok(())
}

fn insert_etl_row(conn: &Connection, task: &EtlTask) -> Result<()> {
    conn.execute(
        "INSERT INTO etl_tasks (section_id, estimated_time) VALUES (?, ?)",
        (task.section_id, task.estimated_time),
    )?;
    Ok(())
}

fn insert_deployment_row(conn: &Connection, task: &DeploymentTask) -> Result<()> {
    conn.execute(
        "INSERT INTO deployment_tasks (name, estimated_time) VALUES (?, ?)",
        (&task.name, task.estimated_time),
    )?;
    Ok(())
}

fn insert_person_row(conn: &Connection, role: Role, person: &Person) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO {} (name, hourly_rate) VALUES (?, ?)",
            person_table(role)
        ),
        (&person.name, person.hourly_rate),
    )?;
    Ok(())
}

fn read_people(conn: &Connection, role: Role) -> Result<Vec<Person>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT name, hourly_rate FROM {} ORDER BY position",
        person_table(role)
    ))?;
    let people = stmt
        .query_map([], |row| {
            Ok(Person {
                name: row.get(0)?,
                hourly_rate: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(people)
}
