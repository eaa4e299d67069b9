//! Loading of yearly population counts from a CSV table.
//!
//! The table needs a header row; only the year column and the population column
//! are read, all others are ignored. Numbers may carry thousands separators
//! (`"7,794,798,739"`), which are stripped before parsing.

use crate::error::DemoError;
use crate::settings::PopulationConfig;
use log::{info, warn};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationData {
    pub years: Vec<f64>,
    pub population: Vec<f64>,
}

impl PopulationData {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Points as (year, population) pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.years.iter().copied().zip(self.population.iter().copied())
    }
}

fn parse_number(field: &str) -> Option<f64> {
    let cleaned: String = field
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok()
}

fn column_index(headers: &csv::StringRecord, name: &str, file: &Path) -> Result<usize, DemoError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            DemoError::MissingData(format!(
                "column '{}' not found in '{}' (columns: {})",
                name,
                file.display(),
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
}

/// Reads years and population counts, sorted by year.
pub fn load_population<P: AsRef<Path>>(
    path: P,
    config: &PopulationConfig,
) -> Result<PopulationData, DemoError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DemoError::MissingData(format!(
            "file '{}' does not exist",
            path.display()
        )));
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let year_idx = column_index(&headers, &config.year_column, path)?;
    let pop_idx = column_index(&headers, &config.population_column, path)?;

    let mut rows: Vec<(f64, f64)> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        // line 1 is the header
        let row_number = line + 2;
        let year_field = record.get(year_idx).unwrap_or("");
        let pop_field = record.get(pop_idx).unwrap_or("");
        if year_field.is_empty() && pop_field.is_empty() {
            warn!("skipping empty row {} in '{}'", row_number, path.display());
            continue;
        }
        let year = parse_number(year_field).ok_or_else(|| {
            DemoError::InvalidParameter(format!(
                "row {}: cannot parse year '{}'",
                row_number, year_field
            ))
        })?;
        let population = parse_number(pop_field).ok_or_else(|| {
            DemoError::InvalidParameter(format!(
                "row {}: cannot parse population '{}'",
                row_number, pop_field
            ))
        })?;
        rows.push((year, population));
    }
    if rows.is_empty() {
        return Err(DemoError::MissingData(format!(
            "no data rows in '{}'",
            path.display()
        )));
    }
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    info!("{} population records read from '{}'", rows.len(), path.display());
    Ok(PopulationData {
        years: rows.iter().map(|r| r.0).collect(),
        population: rows.iter().map(|r| r.1).collect(),
    })
}
