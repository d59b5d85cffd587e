//! SEPA payment initiation files (pain.008 direct debits, pain.001 credit
//! transfers) from semicolon separated payment lists.

mod builder;
mod diagnostics;
mod document;
mod error;
mod report;
pub mod scheme;
mod settings;

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info};
use rand::{thread_rng, Rng};
use sepa_converter_rows::{read_rows, Rows};
use xml::writer::XmlEvent;

pub use builder::DocumentBuilder;
pub use diagnostics::{Coercion, CoercionKind, Diagnostics};
pub use document::{Document, Header, Mandate, Party, PaymentInformation, Totals, Transaction};
pub use error::{ConvertError, ConvertResult};
pub use report::{ConversionReport, SummaryLine};
pub use scheme::Scheme;
pub use settings::{RunSettings, DEFAULT_OUTPUT_FILE_NAME};

trait ToXml {
    fn to_xml(&self) -> Vec<XmlEvent>;
}

/// `<prefix>-<24 hex digits>`, short enough for the 35 character id fields.
pub(crate) fn new_id(prefix: &str) -> String {
    let id = thread_rng().gen::<u128>() >> 32;
    format!("{}-{:0>24x}", prefix, id)
}

/// Reads the input file of `settings`, builds the document and writes it.
///
/// Nothing is written unless the whole document could be built and
/// serialized. The file is written next to its destination first and then
/// moved into place.
pub fn convert(settings: &RunSettings) -> ConvertResult<ConversionReport> {
    settings.validate()?;
    let rows = read_input(&settings.input_path)?;
    let (document, diagnostics) = DocumentBuilder::new(settings).build(&rows)?;
    let bytes = document.to_bytes()?;

    let output = settings.output_file();
    write_output(&output, &bytes)?;
    info!(
        "wrote {} transactions ({} EUR) to {}",
        document.header().totals().number_of_transactions,
        document.header().totals().control_sum,
        output.display()
    );
    Ok(ConversionReport::new(&document, output, diagnostics))
}

/// Reads the rows of `path`.
pub fn read_input(path: &Path) -> ConvertResult<Rows> {
    let invalid = |source| ConvertError::InvalidInputPath {
        path: path.to_path_buf(),
        source,
    };
    if !path.is_file() {
        return Err(invalid(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "not a file",
        )));
    }
    let file = File::open(path).map_err(invalid)?;
    let rows = read_rows(file)?;
    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn write_output(path: &Path, bytes: &[u8]) -> ConvertResult<()> {
    let failed = |source| ConvertError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };
    let tmp = temporary_path(path);
    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|_| std::fs::rename(&tmp, path)) {
        let _ = std::fs::remove_file(&tmp);
        return Err(failed(e));
    }
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{:08x}.tmp", thread_rng().gen::<u32>()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_have_prefix_and_fit() {
        let id = new_id("E2E");
        assert!(id.starts_with("E2E-"));
        assert_eq!(id.len(), 28);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(new_id("MSG"), new_id("MSG"));
    }

    #[test]
    fn temporary_file_is_a_sibling() {
        let path = Path::new("/tmp/out/pain.xml");
        let tmp = temporary_path(path);
        assert_eq!(tmp.parent(), path.parent());
        let name = tmp.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("pain.xml."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn missing_input_file() {
        let path = std::env::temp_dir().join("sepa-converter-missing-input.csv");
        assert!(matches!(
            read_input(&path),
            Err(ConvertError::InvalidInputPath { .. })
        ));
    }
}
