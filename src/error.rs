use thiserror::Error;

/// Which selector a lookup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Country,
    Year,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKind::Country => f.write_str("country"),
            LookupKind::Year => f.write_str("year"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("finals source {url} unavailable: {reason}")]
    SourceUnavailable { url: String, reason: String },

    #[error("no table with class=\"{class}\" in finals page")]
    TableNotFound { class: &'static str },

    #[error("finals row {row} has {found} cells, expected 7")]
    MissingColumns { row: usize, found: usize },

    #[error("finals table produced no rows with attendance")]
    EmptyDataset,

    #[error("year {year} appears in more than one final")]
    DuplicateYear { year: String },

    /// A selector offered a value its backing data does not hold.
    #[error("{kind} {value:?} is not in the dashboard data")]
    LookupMiss { kind: LookupKind, value: String },
}

impl DashboardError {
    /// True for failures that can only come from a broken dashboard invariant,
    /// as opposed to bad remote data.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, DashboardError::LookupMiss { .. })
    }
}
