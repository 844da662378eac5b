use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, Result, Table};

/// A dashboard page the customer can order.
///
/// Each page carries its own build time plus a set of ETL section ids. The
/// ETL work behind those sections is counted once per selection, no matter
/// how many selected pages share a section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub section_ids: BTreeSet<i64>,
    /// Build time in hours.
    pub estimated_time: f64,
}

/// A page row as it appears in the workbook, before section ids are parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageRecord {
    #[serde(rename = "Page ID")]
    pub id: i64,
    #[serde(rename = "Page Name")]
    pub name: String,
    #[serde(rename = "Category Name")]
    pub category: String,
    /// Comma-delimited section ids, e.g. `"1,2"`. Empty means no ETL work.
    #[serde(rename = "Section IDs", default)]
    pub section_ids: Option<String>,
    #[serde(rename = "Estimated Time")]
    pub estimated_time: f64,
}

impl Page {
    pub fn from_record(record: PageRecord) -> Result<Self> {
        let section_ids = parse_section_ids(&record.name, record.section_ids.as_deref())?;
        Ok(Self {
            id: record.id,
            name: record.name,
            category: record.category,
            section_ids,
            estimated_time: record.estimated_time,
        })
    }
}

/// Parse a delimited section-id field into a set of integers.
///
/// Blank fields yield an empty set. Every comma-separated token must be an
/// integer, or a whole-valued real such as `4.0` as spreadsheets export
/// numeric cells. Surrounding whitespace is ignored; anything else rejects
/// the whole field.
pub fn parse_section_ids(page_name: &str, raw: Option<&str>) -> Result<BTreeSet<i64>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(BTreeSet::new());
    };

    raw.split(',')
        .map(|token| {
            let token = token.trim();
            parse_section_id(token).ok_or_else(|| {
                EstimateError::format(
                    Table::Pages,
                    format!(
                        "page '{}' has invalid section id '{}' in '{}'",
                        page_name, token, raw
                    ),
                )
            })
        })
        .collect()
}

fn parse_section_id(token: &str) -> Option<i64> {
    if let Ok(id) = token.parse::<i64>() {
        return Some(id);
    }
    let value = token.parse::<f64>().ok()?;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}
