//! Single-page HTML for the browser dashboard.
//!
//! The page is rendered with the initial selection already applied. After load,
//! each selector's `change` event posts a `SelectionEvent` to `/api/events` and
//! replaces exactly the regions named in the response.

use std::fmt::Write as _;

use crate::dashboard::{DASHBOARD_TITLE, Dashboard, Region, RegionUpdate};
use crate::error::DashboardError;

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub fn render_page(dashboard: &Dashboard) -> Result<String, DashboardError> {
    let data = dashboard.data();
    let selection = dashboard.selection();

    let mut figure_json = String::from("null");
    let mut total_wins = String::new();
    let mut yearly_result = String::new();
    for update in dashboard.initial_render()? {
        match update {
            RegionUpdate::WorldMap(figure) => figure_json = figure.to_json(),
            RegionUpdate::TotalWins(text) => total_wins = text,
            RegionUpdate::YearlyResult(text) => yearly_result = text,
        }
    }

    let country_options = render_options(data.wins().countries(), &selection.country);
    let year_options = render_options(data.dataset().years(), &selection.year);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{plotly}"></script>
    <style>{css}</style>
</head>
<body>
    <h1>{title}</h1>
    <div id="{map_id}"></div>

    <p class="label strong">Select a Country:</p>
    <select id="country-list" data-kind="country">{country_options}</select>
    <div id="{wins_id}" class="result"><h3>{total_wins}</h3></div>

    <p class="label">Select a Year:</p>
    <select id="year-list" data-kind="year">{year_options}</select>
    <div id="{yearly_id}" class="result"><h3>{yearly_result}</h3></div>

    <footer>Source: <a href="{source}">{source}</a> &middot; fetched {fetched}</footer>
    <script id="initial-figure" type="application/json">{figure_json}</script>
    <script>{js}</script>
</body>
</html>"#,
        title = DASHBOARD_TITLE,
        plotly = PLOTLY_JS,
        css = inline_css(),
        js = inline_javascript(),
        map_id = Region::WorldMap.id(),
        wins_id = Region::TotalWins.id(),
        yearly_id = Region::YearlyResult.id(),
        total_wins = esc(&total_wins),
        yearly_result = esc(&yearly_result),
        source = esc(data.source_url()),
        fetched = data.fetched_at().format("%Y-%m-%d %H:%M UTC"),
        figure_json = script_safe(&figure_json),
    ))
}

fn render_options<'a>(values: impl Iterator<Item = &'a str>, selected: &str) -> String {
    let mut out = String::new();
    for value in values {
        let escaped = esc(value);
        let marker = if value == selected { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{escaped}"{marker}>{escaped}</option>"#);
    }
    out
}

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// JSON inside a <script> element must not close it.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn inline_css() -> &'static str {
    r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem; }
h1 { text-align: center; font-size: 40px; }
#world-map { min-height: 450px; }
.label { font-size: 20px; }
.strong { font-weight: bold; }
select { width: 100%; padding: 0.4rem; font-size: 1rem; }
.result { text-align: center; }
footer { margin-top: 2rem; font-size: 0.8rem; color: #666; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function () {
  function drawMap(figure) {
    if (figure && window.Plotly) {
      Plotly.newPlot("world-map", figure.data, figure.layout);
    }
  }

  function apply(update) {
    if (update.region === "world-map") {
      drawMap(update.content);
      return;
    }
    var target = document.getElementById(update.region);
    if (!target) { return; }
    var heading = document.createElement("h3");
    heading.textContent = update.content;
    target.replaceChildren(heading);
  }

  function onSelect(event) {
    var select = event.target;
    fetch("/api/events", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ kind: select.dataset.kind, value: select.value })
    })
      .then(function (resp) {
        if (!resp.ok) { throw new Error("selection failed: " + resp.status); }
        return resp.json();
      })
      .then(function (updates) { updates.forEach(apply); })
      .catch(function (err) { console.error(err); });
  }

  document.querySelectorAll("select[data-kind]").forEach(function (select) {
    select.addEventListener("change", onSelect);
  });

  drawMap(JSON.parse(document.getElementById("initial-figure").textContent));
})();
"#
}
