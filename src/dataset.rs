use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DashboardError;

const LEGACY_NAME: &str = "West Germany";
const SUCCESSOR_NAME: &str = "Germany";

/// One championship final. Every field keeps the page's formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRecord {
    pub year: String,
    pub winner: String,
    pub score: String,
    pub runner_up: String,
    pub venue: String,
    pub location: String,
    pub attendance: String,
}

impl FinalRecord {
    pub fn from_cells(cells: [String; 7]) -> Self {
        let [year, winner, score, runner_up, venue, location, attendance] = cells;
        Self {
            year,
            winner,
            score,
            runner_up,
            venue,
            location,
            attendance,
        }
    }
}

/// Built finals, in page order, with unique years and at least one row.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<FinalRecord>,
}

impl Dataset {
    pub fn build(rows: Vec<FinalRecord>) -> Result<Self, DashboardError> {
        let total = rows.len();
        let mut renamed = 0usize;
        let mut records = Vec::with_capacity(total);

        for mut row in rows {
            if row.attendance.is_empty() {
                debug!(year = %row.year, "dropping final without attendance");
                continue;
            }
            renamed += usize::from(normalize_country(&mut row.winner));
            renamed += usize::from(normalize_country(&mut row.runner_up));
            records.push(row);
        }

        if records.is_empty() {
            return Err(DashboardError::EmptyDataset);
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.year.as_str()) {
                return Err(DashboardError::DuplicateYear {
                    year: record.year.clone(),
                });
            }
        }

        info!(
            kept = records.len(),
            dropped = total - records.len(),
            renamed,
            "built finals dataset"
        );
        Ok(Self { records })
    }

    pub fn records(&self) -> &[FinalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Year values in dataset order; these are the year selector's options.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.year.as_str())
    }

    pub fn first_year(&self) -> &str {
        // build() rejects empty datasets
        &self.records[0].year
    }

    pub fn find_year(&self, year: &str) -> Option<&FinalRecord> {
        self.records.iter().find(|r| r.year == year)
    }
}

fn normalize_country(name: &mut String) -> bool {
    if name == LEGACY_NAME {
        *name = SUCCESSOR_NAME.to_string();
        true
    } else {
        false
    }
}
