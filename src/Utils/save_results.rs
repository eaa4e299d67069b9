use crate::error::DemoError;
use log::info;
use std::path::Path;

/// Writes equally long columns to a CSV file with the given header.
pub fn write_columns_csv(
    filename: &Path,
    header: &[String],
    cols: &[Vec<f64>],
) -> Result<(), DemoError> {
    if cols.is_empty() {
        return Err(DemoError::MissingData("CSV: no columns".to_string()));
    }
    if header.len() != cols.len() {
        return Err(DemoError::InvalidParameter(format!(
            "CSV: {} header fields for {} columns",
            header.len(),
            cols.len()
        )));
    }
    let n = cols[0].len();
    if cols.iter().any(|c| c.len() != n) {
        return Err(DemoError::InvalidParameter(
            "CSV: column size mismatch".to_string(),
        ));
    }

    let mut wtr = csv::Writer::from_path(filename)?;
    wtr.write_record(header)?;
    for r in 0..n {
        let row: Vec<String> = cols.iter().map(|c| c[r].to_string()).collect();
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    info!("{} rows written to '{}'", n, filename.display());
    Ok(())
}
