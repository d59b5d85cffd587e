//! Reads the semicolon separated payment lists that back office exports
//! into ordered rows of `column -> value`.

pub mod csv;

pub mod row;

pub use self::csv::{read_rows, CsvReadError, DELIMITER};
pub use row::{Row, Rows};
