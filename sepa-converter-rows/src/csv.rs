use std::io::Read;

use log::debug;

use crate::row::{Row, Rows};

/// Columns are always split on `;`, the delimiter is never guessed.
pub const DELIMITER: u8 = b';';

#[derive(Debug, thiserror::Error)]
pub enum CsvReadError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("the input has no data rows")]
    Empty,
}

/// Reads UTF-8 text with a header line. Rows may be shorter or longer than
/// the header: missing trailing columns are absent from the row, surplus
/// values are dropped.
pub fn read_rows(r: impl Read) -> Result<Rows, CsvReadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(r);
    let headers = rdr.headers()?.clone();
    debug!("input columns: {:?}", headers.iter().collect::<Vec<_>>());

    let mut rows = vec![];
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()));
        rows.push(Row::new(line, fields));
    }
    if rows.is_empty() {
        return Err(CsvReadError::Empty);
    }
    debug!("read {} rows", rows.len());
    Ok(Rows::new(rows))
}
