use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::choropleth::MapFigure;
use crate::dataset::Dataset;
use crate::error::{DashboardError, LookupKind};
use crate::win_summary::WinSummary;

pub const DASHBOARD_TITLE: &str = "FIFA World Cup Winners Dashboard";

/// Everything the handlers read. Built once at startup and never mutated.
///
/// The country selector offers exactly `wins.countries()` and the year selector
/// exactly `dataset.years()`; `Dataset::build` guarantees the years are unique
/// and non-empty, so every offered value resolves to one entry.
#[derive(Debug)]
pub struct FinalsData {
    dataset: Dataset,
    wins: WinSummary,
    source_url: String,
    fetched_at: DateTime<Utc>,
}

impl FinalsData {
    pub fn new(dataset: Dataset, source_url: String, fetched_at: DateTime<Utc>) -> Self {
        let wins = WinSummary::from_dataset(&dataset);
        info!(
            finals = dataset.len(),
            countries = wins.len(),
            "aggregated wins by country"
        );
        Self {
            dataset,
            wins,
            source_url,
            fetched_at,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn wins(&self) -> &WinSummary {
        &self.wins
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub country: String,
    pub year: String,
}

impl Selection {
    pub fn initial(data: &FinalsData) -> Self {
        Self {
            // a non-empty dataset always has a first winner
            country: data.wins.first_country().unwrap_or_default().to_string(),
            year: data.dataset.first_year().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SelectionEvent {
    Country(String),
    Year(String),
}

/// Output areas of the dashboard; the ids double as DOM element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    WorldMap,
    TotalWins,
    YearlyResult,
}

impl Region {
    pub fn id(self) -> &'static str {
        match self {
            Region::WorldMap => "world-map",
            Region::TotalWins => "total-wins",
            Region::YearlyResult => "yearly-result",
        }
    }
}

/// Full replacement content for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "region", content = "content", rename_all = "kebab-case")]
pub enum RegionUpdate {
    WorldMap(MapFigure),
    TotalWins(String),
    YearlyResult(String),
}

impl RegionUpdate {
    pub fn region(&self) -> Region {
        match self {
            RegionUpdate::WorldMap(_) => Region::WorldMap,
            RegionUpdate::TotalWins(_) => Region::TotalWins,
            RegionUpdate::YearlyResult(_) => Region::YearlyResult,
        }
    }
}

/// The map is global; the selected country only triggers the redraw.
pub fn render_map(data: &FinalsData, _country: &str) -> MapFigure {
    MapFigure::from_wins(&data.wins)
}

pub fn country_summary(data: &FinalsData, country: &str) -> Result<String, DashboardError> {
    let wins = data
        .wins
        .wins_for(country)
        .ok_or_else(|| DashboardError::LookupMiss {
            kind: LookupKind::Country,
            value: country.to_string(),
        })?;
    Ok(format!("{country} has won the FIFA World Cup {wins} times"))
}

pub fn year_summary(data: &FinalsData, year: &str) -> Result<String, DashboardError> {
    let record = data
        .dataset
        .find_year(year)
        .ok_or_else(|| DashboardError::LookupMiss {
            kind: LookupKind::Year,
            value: year.to_string(),
        })?;
    Ok(format!(
        "Stats for FIFA world cup {year} -- Winner: {}, and Runner-Up: {}",
        record.winner, record.runner_up
    ))
}

/// Recompute the regions that depend on the changed selector, and only those.
pub fn handle_event(
    data: &FinalsData,
    event: &SelectionEvent,
) -> Result<Vec<RegionUpdate>, DashboardError> {
    debug!(?event, "selection changed");
    match event {
        SelectionEvent::Country(country) => {
            let summary = country_summary(data, country)?;
            Ok(vec![
                RegionUpdate::WorldMap(render_map(data, country)),
                RegionUpdate::TotalWins(summary),
            ])
        }
        SelectionEvent::Year(year) => Ok(vec![RegionUpdate::YearlyResult(year_summary(data, year)?)]),
    }
}

/// A dashboard session: shared data plus this viewer's selection.
#[derive(Debug, Clone)]
pub struct Dashboard {
    data: Arc<FinalsData>,
    selection: Selection,
}

impl Dashboard {
    pub fn new(data: Arc<FinalsData>) -> Self {
        let selection = Selection::initial(&data);
        Self { data, selection }
    }

    pub fn data(&self) -> &FinalsData {
        &self.data
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Every region, as seen with the current selection.
    pub fn initial_render(&self) -> Result<Vec<RegionUpdate>, DashboardError> {
        let mut updates = handle_event(
            &self.data,
            &SelectionEvent::Country(self.selection.country.clone()),
        )?;
        updates.extend(handle_event(
            &self.data,
            &SelectionEvent::Year(self.selection.year.clone()),
        )?);
        Ok(updates)
    }

    /// Applies the event; on a lookup miss the selection is left unchanged.
    pub fn dispatch(&mut self, event: SelectionEvent) -> Result<Vec<RegionUpdate>, DashboardError> {
        let updates = handle_event(&self.data, &event)?;
        match event {
            SelectionEvent::Country(country) => self.selection.country = country,
            SelectionEvent::Year(year) => self.selection.year = year,
        }
        Ok(updates)
    }
}
