//! Plotly-compatible choropleth figure for the win summary.
//!
//! The browser hands the serialized figure straight to `Plotly.newPlot`, so field
//! names follow plotly.js, not Rust conventions.

use serde::Serialize;

use crate::win_summary::WinSummary;

pub const MAP_TITLE: &str = "World Cup Wins by Country";

/// Plotly's sequential "Plasma" scale.
pub const PLASMA: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFigure {
    pub data: Vec<ChoroplethTrace>,
    pub layout: MapLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub locations: Vec<String>,
    pub locationmode: &'static str,
    pub z: Vec<usize>,
    pub colorscale: Vec<(f64, &'static str)>,
    pub colorbar: ColorBar,
    pub hovertemplate: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    pub title: Title,
    pub geo: GeoLayout,
    pub margin: Margin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLayout {
    pub showcoastlines: bool,
    pub coastlinecolor: &'static str,
    pub showocean: bool,
    pub oceancolor: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub r: u16,
    pub t: u16,
    pub l: u16,
    pub b: u16,
}

impl MapFigure {
    /// The whole world, every winner coloured by its count.
    pub fn from_wins(wins: &WinSummary) -> Self {
        let (locations, z): (Vec<String>, Vec<usize>) = wins
            .entries()
            .iter()
            .map(|entry| (entry.country.clone(), entry.wins))
            .unzip();

        let trace = ChoroplethTrace {
            kind: "choropleth",
            locations,
            locationmode: "country names",
            z,
            colorscale: plasma_scale(),
            colorbar: ColorBar {
                title: Title { text: "Wins" },
            },
            hovertemplate: "%{location}<br>Wins=%{z}<extra></extra>",
        };

        Self {
            data: vec![trace],
            layout: MapLayout {
                title: Title { text: MAP_TITLE },
                geo: GeoLayout {
                    showcoastlines: true,
                    coastlinecolor: "Black",
                    showocean: true,
                    oceancolor: "lightblue",
                },
                margin: Margin { r: 0, t: 0, l: 0, b: 0 },
            },
        }
    }

    pub fn to_json(&self) -> String {
        // Only strings, integers and floats in [0, 1]: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// (country, wins) pairs of the single trace.
    pub fn values(&self) -> impl Iterator<Item = (&str, usize)> {
        self.data
            .iter()
            .flat_map(|trace| trace.locations.iter().map(String::as_str).zip(trace.z.iter().copied()))
    }
}

fn plasma_scale() -> Vec<(f64, &'static str)> {
    let last = (PLASMA.len() - 1) as f64;
    PLASMA
        .iter()
        .enumerate()
        .map(|(idx, color)| (idx as f64 / last, *color))
        .collect()
}
