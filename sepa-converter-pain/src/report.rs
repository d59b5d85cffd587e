use std::{fmt::Display, path::PathBuf};

use sepa_converter_types::{Euro, MessageType};

use crate::{
    diagnostics::Diagnostics,
    document::{Document, Transaction},
};

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub message_type: MessageType,
    pub output_path: PathBuf,
    pub message_id: String,
    pub number_of_transactions: u32,
    pub control_sum: Euro,
    pub summary: Vec<SummaryLine>,
    pub diagnostics: Diagnostics,
}

impl ConversionReport {
    pub(crate) fn new(document: &Document, output_path: PathBuf, diagnostics: Diagnostics) -> Self {
        let totals = document.header().totals();
        Self {
            message_type: document.message_type(),
            output_path,
            message_id: document.header().message_id().to_string(),
            number_of_transactions: totals.number_of_transactions,
            control_sum: totals.control_sum,
            summary: document
                .transactions()
                .iter()
                .enumerate()
                .map(|(i, t)| SummaryLine::new(i + 1, t))
                .collect(),
            diagnostics,
        }
    }
}

/// One transaction in the overview table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub index: usize,
    pub name: String,
    pub iban: String,
    pub amount: Euro,
    pub purpose: String,
}

impl SummaryLine {
    pub fn new(index: usize, transaction: &Transaction) -> Self {
        Self {
            index,
            name: transaction.counterparty().name.clone(),
            iban: transaction.counterparty().iban.clone(),
            amount: transaction.amount(),
            purpose: transaction.remittance_information().to_string(),
        }
    }

    /// Column titles matching the [`Display`] layout.
    pub fn header() -> String {
        format!(
            "{:<5} | {:<25} | {:<22} | {:>8} | {:<25}",
            "Idx", "Name", "IBAN", "Amount", "Purpose"
        )
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

impl Display for SummaryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<5} | {:<25} | {:<22} | {:>8} | {:<25}",
            self.index,
            truncate(&self.name, 25),
            truncate(&self.iban, 22),
            self.amount,
            truncate(&self.purpose, 25)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_columns() {
        let line = SummaryLine {
            index: 1,
            name: "Alice".to_string(),
            iban: "DE02120300000000202051".to_string(),
            amount: Euro::new(100, 50),
            purpose: "Invoice 1".to_string(),
        };
        assert_eq!(
            line.to_string(),
            "1     | Alice                     | DE02120300000000202051 |   100.50 | Invoice 1                "
        );
        assert_eq!(
            SummaryLine::header(),
            "Idx   | Name                      | IBAN                   |   Amount | Purpose                  "
        );
    }

    #[test]
    fn long_values_are_cut() {
        let line = SummaryLine {
            index: 12,
            name: "Ä".repeat(30),
            iban: "X".repeat(30),
            amount: Euro::default(),
            purpose: "p".repeat(30),
        };
        let s = line.to_string();
        assert!(s.contains(&format!("| {} |", "Ä".repeat(25))));
        assert!(s.contains(&format!("| {} |", "X".repeat(22))));
        assert!(s.ends_with(&"p".repeat(25)));
    }
}
