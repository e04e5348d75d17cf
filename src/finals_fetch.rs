use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::dashboard::FinalsData;
use crate::dataset::{Dataset, FinalRecord};
use crate::error::DashboardError;
use crate::http_client::http_client;

/// The finals table is the first table whose whole `class` attribute is exactly this
/// string: order matters and extra classes disqualify it.
/// Fragile: a reorder or class rename on the page picks the wrong table or none.
pub const FINALS_TABLE_CLASS: &str = "sortable plainrowheaders wikitable";

const TABLE_SELECTOR: &str = "table";
const ROW_SELECTOR: &str = "tr";
const CELL_SELECTOR: &str = "th, td";

/// Fetch, extract, build and aggregate. Any failure here is fatal for the dashboard.
pub fn load_finals(config: &DashboardConfig) -> anyhow::Result<FinalsData> {
    let client = http_client(config.fetch_timeout)?;
    let html = fetch_finals_page(client, &config.source_url)?;
    let rows = extract_final_rows(&html)?;
    let dataset = Dataset::build(rows)?;
    Ok(FinalsData::new(dataset, config.source_url.clone(), Utc::now()))
}

pub fn fetch_finals_page(client: &Client, url: &str) -> Result<String, DashboardError> {
    let unavailable = |reason: String| DashboardError::SourceUnavailable {
        url: url.to_string(),
        reason,
    };

    info!(url, "fetching finals page");
    let resp = client
        .get(url)
        .header(USER_AGENT, "Mozilla/5.0")
        .send()
        .map_err(|err| unavailable(format!("request failed: {err}")))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(unavailable(format!("http {status}")));
    }

    let body = resp
        .text()
        .map_err(|err| unavailable(format!("failed reading body: {err}")))?;
    info!(bytes = body.len(), "fetched finals page");
    Ok(body)
}

/// Every row after the header of the finals table, cells trimmed, nothing filtered.
pub fn extract_final_rows(html: &str) -> Result<Vec<FinalRecord>, DashboardError> {
    let document = Html::parse_document(html);
    let table_selector = selector(TABLE_SELECTOR);
    let row_selector = selector(ROW_SELECTOR);
    let cell_selector = selector(CELL_SELECTOR);

    let table = document
        .select(&table_selector)
        .find(|table| table.value().attr("class").map(str::trim) == Some(FINALS_TABLE_CLASS))
        .ok_or(DashboardError::TableNotFound {
            class: FINALS_TABLE_CLASS,
        })?;

    let mut rows = Vec::new();
    for (idx, row) in table.select(&row_selector).enumerate().skip(1) {
        let cells: Vec<String> = row.select(&cell_selector).take(7).map(cell_text).collect();
        let cells = <[String; 7]>::try_from(cells).map_err(|short| {
            DashboardError::MissingColumns {
                row: idx,
                found: short.len(),
            }
        })?;
        rows.push(FinalRecord::from_cells(cells));
    }

    debug!(rows = rows.len(), "extracted finals rows");
    Ok(rows)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn selector(raw: &'static str) -> Selector {
    Selector::parse(raw).unwrap_or_else(|_| unreachable!("static selector {raw} is valid"))
}
