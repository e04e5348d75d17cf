use std::collections::HashMap;

use serde::Serialize;

use crate::dataset::Dataset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryWins {
    pub country: String,
    pub wins: usize,
}

/// Championships per winning country, in order of first appearance in the dataset.
#[derive(Debug, Clone)]
pub struct WinSummary {
    entries: Vec<CountryWins>,
    index: HashMap<String, usize>,
}

impl WinSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut entries: Vec<CountryWins> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in dataset.records() {
            match index.get(&record.winner) {
                Some(&slot) => entries[slot].wins += 1,
                None => {
                    index.insert(record.winner.clone(), entries.len());
                    entries.push(CountryWins {
                        country: record.winner.clone(),
                        wins: 1,
                    });
                }
            }
        }

        Self { entries, index }
    }

    pub fn wins_for(&self, country: &str) -> Option<usize> {
        self.index.get(country).map(|&slot| self.entries[slot].wins)
    }

    pub fn entries(&self) -> &[CountryWins] {
        &self.entries
    }

    /// Country values in summary order; these are the country selector's options.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.country.as_str())
    }

    pub fn first_country(&self) -> Option<&str> {
        self.entries.first().map(|e| e.country.as_str())
    }

    pub fn total_wins(&self) -> usize {
        self.entries.iter().map(|e| e.wins).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
