use std::path::PathBuf;

use sepa_converter_rows::CsvReadError;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid input file {}: {source}", path.display())]
    InvalidInputPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("The input file contains no payment rows")]
    EmptyInput,
    #[error("{0} cannot be empty")]
    MissingSetting(&'static str),
    #[error("Could not read the input file: {0}")]
    MalformedInput(#[source] CsvReadError),
    #[error("Could not write {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not serialize the document: {0}")]
    Serialize(#[from] xml::writer::Error),
}

impl From<CsvReadError> for ConvertError {
    fn from(value: CsvReadError) -> Self {
        match value {
            CsvReadError::Empty => ConvertError::EmptyInput,
            other => ConvertError::MalformedInput(other),
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;
