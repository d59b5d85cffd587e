use std::path::{Path, PathBuf};

use sepa_converter_config::SEPAConfig;
use sepa_converter_types::{MessageType, SequenceType};

use crate::error::{ConvertError, ConvertResult};

/// File name used when the output path is a directory.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "pain-output.xml";

/// Everything one conversion needs besides the rows themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub company_name: String,
    pub message_type: MessageType,
    /// Ignored for credit transfers.
    pub sequence_type: SequenceType,
    pub batch_booking: bool,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl RunSettings {
    pub fn new(
        company_name: impl ToString,
        message_type: MessageType,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            company_name: company_name.to_string(),
            message_type,
            sequence_type: SequenceType::default(),
            batch_booking: false,
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn from_config(
        cfg: &SEPAConfig,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            company_name: cfg.company_name.clone(),
            message_type: cfg.message_type,
            sequence_type: cfg.sequence_type,
            batch_booking: cfg.batch_booking,
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn with_sequence_type(mut self, sequence_type: SequenceType) -> Self {
        self.sequence_type = sequence_type;
        self
    }

    pub fn with_batch_booking(mut self, batch_booking: bool) -> Self {
        self.batch_booking = batch_booking;
        self
    }

    /// Checks the required settings are filled in.
    pub fn validate(&self) -> ConvertResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(ConvertError::MissingSetting("Company name"));
        }
        if is_blank(&self.input_path) {
            return Err(ConvertError::MissingSetting("Input path"));
        }
        if is_blank(&self.output_path) {
            return Err(ConvertError::MissingSetting("Output path"));
        }
        Ok(())
    }

    /// The file that gets written: the output path, or
    /// [`DEFAULT_OUTPUT_FILE_NAME`] inside it if it is a directory.
    pub fn output_file(&self) -> PathBuf {
        if self.output_path.is_dir() {
            self.output_path.join(DEFAULT_OUTPUT_FILE_NAME)
        } else {
            self.output_path.clone()
        }
    }
}

fn is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings() {
        let settings = RunSettings::new(" ", MessageType::DirectDebit, "in.csv", "out.xml");
        assert!(matches!(
            settings.validate(),
            Err(ConvertError::MissingSetting("Company name"))
        ));

        let settings = RunSettings::new("Muster GmbH", MessageType::DirectDebit, "in.csv", "");
        assert!(matches!(
            settings.validate(),
            Err(ConvertError::MissingSetting("Output path"))
        ));

        let settings = RunSettings::new("Muster GmbH", MessageType::DirectDebit, "", "out.xml");
        assert!(matches!(
            settings.validate(),
            Err(ConvertError::MissingSetting("Input path"))
        ));

        let settings = RunSettings::new(
            "Muster GmbH",
            MessageType::DirectDebit,
            "in.csv",
            "out.xml",
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn copies_config_defaults() {
        let cfg = SEPAConfig {
            company_name: "Muster GmbH".to_string(),
            message_type: MessageType::CreditTransfer,
            sequence_type: SequenceType::Frst,
            batch_booking: true,
        };
        let settings = RunSettings::from_config(&cfg, "in.csv", "out.xml");
        assert_eq!(settings.company_name, "Muster GmbH");
        assert_eq!(settings.message_type, MessageType::CreditTransfer);
        assert_eq!(settings.sequence_type, SequenceType::Frst);
        assert!(settings.batch_booking);
    }

    #[test]
    fn directory_output_gets_default_name() {
        let dir = std::env::temp_dir();
        let settings = RunSettings::new("Muster GmbH", MessageType::DirectDebit, "in.csv", &dir);
        assert_eq!(settings.output_file(), dir.join(DEFAULT_OUTPUT_FILE_NAME));

        let file = dir.join("sepa-converter-settings-out.xml");
        let settings = RunSettings::new("Muster GmbH", MessageType::DirectDebit, "in.csv", &file);
        assert_eq!(settings.output_file(), file);
    }
}
