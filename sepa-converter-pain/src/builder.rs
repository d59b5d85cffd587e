use log::debug;
use sepa_converter_rows::{Row, Rows};
use sepa_converter_types::{normalize_date, Euro, NormalizedDate};

use crate::{
    diagnostics::{Coercion, CoercionKind, Diagnostics},
    document::{Document, Header, Mandate, Party, PaymentInformation, Totals, Transaction},
    error::{ConvertError, ConvertResult},
    new_id,
    scheme::{Scheme, FALLBACK_CREDITOR_ID, FALLBACK_MANDATE_ID},
    settings::RunSettings,
};

/// Turns rows into a [`Document`] for the scheme picked by the settings.
///
/// Block level values (requested date, originator account, creditor id) come
/// from the first row, every row becomes one transaction in input order.
pub struct DocumentBuilder<'a> {
    scheme: &'static Scheme,
    settings: &'a RunSettings,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(settings: &'a RunSettings) -> Self {
        Self {
            scheme: Scheme::for_message(settings.message_type),
            settings,
        }
    }

    pub fn build(&self, rows: &Rows) -> ConvertResult<(Document, Diagnostics)> {
        let first = rows.first().ok_or(ConvertError::EmptyInput)?;
        let mut diagnostics = Diagnostics::default();

        // first row fields before the transactions, so fallbacks stay in row order
        let fields = &self.scheme.fields;
        let mut ctx = RowContext::new(1, first, &mut diagnostics);
        let requested_date = ctx.date(fields.requested_date);
        let originator = Party {
            name: self.settings.company_name.clone(),
            iban: first.value(fields.originator_iban).to_string(),
            bic: ctx.optional(fields.originator_bic),
        };
        let creditor_scheme_id = fields.creditor_id.map(|field| {
            ctx.or_fallback(field, FALLBACK_CREDITOR_ID, CoercionKind::CreditorIdDefaulted)
        });

        let transactions = rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.transaction(&mut RowContext::new(i + 1, row, &mut diagnostics)))
            .collect::<Vec<_>>();
        let totals = Totals::of(&transactions);
        debug!(
            "built {} {} transactions, sum {}",
            totals.number_of_transactions, self.scheme.message_type, totals.control_sum
        );

        let payment_information = PaymentInformation::new(
            new_id("PMT"),
            totals,
            self.scheme
                .has_mandates()
                .then_some(self.settings.sequence_type),
            requested_date,
            originator,
            creditor_scheme_id,
            transactions,
        );
        let header = Header::new(
            new_id("MSG"),
            creation_date_time(),
            totals,
            self.settings.batch_booking,
            self.settings.company_name.clone(),
        );
        let document = Document::new(self.scheme, header, payment_information);
        Ok((document, diagnostics))
    }

    fn transaction(&self, ctx: &mut RowContext) -> Transaction {
        let fields = &self.scheme.fields;
        let amount = ctx.amount(fields.amount);
        let counterparty = Party {
            name: ctx.row.value(fields.counterparty_name).to_string(),
            iban: ctx.row.value(fields.counterparty_iban).to_string(),
            bic: ctx.optional(fields.counterparty_bic),
        };
        let mandate = fields.mandate.as_ref().map(|m| Mandate {
            id: ctx.or_fallback(m.id, FALLBACK_MANDATE_ID, CoercionKind::MandateIdDefaulted),
            date_of_signature: ctx.date(m.signature_date),
            amendment: false,
        });
        Transaction::new(
            new_id("E2E"),
            amount,
            counterparty,
            ctx.row.value(fields.purpose).to_string(),
            mandate,
        )
    }
}

/// `CreDtTm`, local time without offset.
fn creation_date_time() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// One row plus the place its fallbacks are recorded.
struct RowContext<'r, 'd> {
    index: usize,
    row: &'r Row,
    diagnostics: &'d mut Diagnostics,
}

impl<'r, 'd> RowContext<'r, 'd> {
    fn new(index: usize, row: &'r Row, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            index,
            row,
            diagnostics,
        }
    }

    fn record(
        &mut self,
        field: &'static str,
        kind: CoercionKind,
        original: Option<&str>,
        replacement: &str,
    ) {
        self.diagnostics.push(Coercion {
            row: self.index,
            line: self.row.line(),
            field,
            kind,
            original: original.map(str::to_string),
            replacement: replacement.to_string(),
        });
    }

    /// Unparseable or missing amounts become zero.
    fn amount(&mut self, field: &'static str) -> Euro {
        let raw = self.row.get(field);
        match raw.filter(|v| !v.trim().is_empty()) {
            None => {
                let zero = Euro::default();
                self.record(field, CoercionKind::AmountMissing, raw, &zero.xml_string());
                zero
            }
            Some(value) => match Euro::parse_amount(value) {
                Some(amount) => amount,
                None => {
                    let zero = Euro::default();
                    self.record(
                        field,
                        CoercionKind::AmountUnparseable,
                        Some(value),
                        &zero.xml_string(),
                    );
                    zero
                }
            },
        }
    }

    fn date(&mut self, field: &'static str) -> String {
        let raw = self.row.get(field);
        let date = normalize_date(raw.unwrap_or_default());
        match &date {
            NormalizedDate::Iso(_) => {}
            NormalizedDate::Default => {
                self.record(field, CoercionKind::DateDefaulted, raw, date.as_str())
            }
            NormalizedDate::Unrecognized(original) => self.record(
                field,
                CoercionKind::DateUnrecognized,
                Some(original.as_str()),
                original,
            ),
        }
        date.into_string()
    }

    /// Trimmed value of an optional column, `None` if absent or blank.
    fn optional(&self, field: Option<&'static str>) -> Option<String> {
        field
            .and_then(|f| self.row.non_empty(f))
            .map(|v| v.trim().to_string())
    }

    fn or_fallback(&mut self, field: &'static str, fallback: &str, kind: CoercionKind) -> String {
        match self.row.non_empty(field) {
            Some(value) => value.to_string(),
            None => {
                let raw = self.row.get(field);
                self.record(field, kind, raw, fallback);
                fallback.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sepa_converter_types::{MessageType, SequenceType};

    fn settings(message_type: MessageType) -> RunSettings {
        RunSettings::new("Muster GmbH", message_type, "in.csv", "out.xml")
            .with_sequence_type(SequenceType::Frst)
    }

    fn rows(rows: &[&[(&str, &str)]]) -> Rows {
        rows.iter()
            .enumerate()
            .map(|(i, fields)| {
                Row::new(
                    i as u64 + 2,
                    fields.iter().map(|(k, v)| (k.to_string(), v.to_string())),
                )
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn empty_rows() {
        let settings = settings(MessageType::DirectDebit);
        let result = DocumentBuilder::new(&settings).build(&Rows::default());
        assert!(matches!(result, Err(ConvertError::EmptyInput)));
    }

    #[test]
    fn direct_debit_row() {
        let settings = settings(MessageType::DirectDebit);
        let rows = rows(&[&[
            ("Zahlungspflichtiger-Name", "Alice"),
            ("Zahlungspflichtiger-IBAN", "DE02120300000000202051"),
            ("Betrag", "100,50"),
            ("Verwendungszweck", "Invoice 1"),
            ("Mandatsreferenz", "M-17"),
            ("Mandatsaustellungsdatum", "3.2.2021"),
            ("Faelligkeitsdatum", "31.01.2025"),
            ("Auftraggeber-IBAN", "DE89370400440532013000"),
            ("Creditor-ID", "DE98ZZZ09999999999"),
        ]]);
        let (doc, diagnostics) = DocumentBuilder::new(&settings).build(&rows).unwrap();
        assert!(diagnostics.is_empty());

        let pmt = doc.payment_information();
        assert_eq!(pmt.requested_date(), "2025-01-31");
        assert_eq!(pmt.sequence_type(), Some(SequenceType::Frst));
        assert_eq!(pmt.creditor_scheme_id(), Some("DE98ZZZ09999999999"));
        assert_eq!(
            pmt.originator(),
            &Party {
                name: "Muster GmbH".to_string(),
                iban: "DE89370400440532013000".to_string(),
                bic: None,
            }
        );

        let tx = &doc.transactions()[0];
        assert_eq!(tx.amount().xml_string(), "100.50");
        assert_eq!(tx.counterparty().name, "Alice");
        assert_eq!(tx.remittance_information(), "Invoice 1");
        assert_eq!(
            tx.mandate(),
            Some(&Mandate {
                id: "M-17".to_string(),
                date_of_signature: "2021-02-03".to_string(),
                amendment: false,
            })
        );
        assert!(tx.end_to_end_id().starts_with("E2E-"));
        assert!(doc.header().message_id().starts_with("MSG-"));
        assert!(pmt.payment_information_id().starts_with("PMT-"));
        assert_eq!(doc.header().creation_date_time().len(), 19);
    }

    #[test]
    fn direct_debit_fallbacks() {
        let settings = settings(MessageType::DirectDebit);
        let rows = rows(&[
            &[("Betrag", "zehn"), ("Faelligkeitsdatum", "")],
            &[
                ("Betrag", "5"),
                ("Mandatsreferenz", " "),
                ("Mandatsaustellungsdatum", "soon"),
            ],
        ]);
        let (doc, diagnostics) = DocumentBuilder::new(&settings).build(&rows).unwrap();

        let pmt = doc.payment_information();
        assert_eq!(pmt.requested_date(), "2025-01-01");
        assert_eq!(pmt.creditor_scheme_id(), Some(FALLBACK_CREDITOR_ID));
        assert_eq!(pmt.totals().control_sum.xml_string(), "5.00");

        let txs = doc.transactions();
        assert_eq!(txs[0].amount(), Euro::default());
        assert_eq!(txs[0].mandate().unwrap().id, FALLBACK_MANDATE_ID);
        assert_eq!(txs[1].mandate().unwrap().id, FALLBACK_MANDATE_ID);
        assert_eq!(txs[1].mandate().unwrap().date_of_signature, "soon");

        let kinds = diagnostics
            .iter()
            .map(|c| (c.row, c.kind))
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                (1, CoercionKind::DateDefaulted),
                (1, CoercionKind::CreditorIdDefaulted),
                (1, CoercionKind::AmountUnparseable),
                (1, CoercionKind::MandateIdDefaulted),
                (1, CoercionKind::DateDefaulted),
                (2, CoercionKind::MandateIdDefaulted),
                (2, CoercionKind::DateUnrecognized),
            ]
        );
        let order = diagnostics.iter().map(|c| c.row).collect::<Vec<_>>();
        assert!(order.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(diagnostics.coercions()[0].line, 2);
    }

    #[test]
    fn credit_transfer_rows() {
        let settings = settings(MessageType::CreditTransfer).with_batch_booking(true);
        let rows = rows(&[
            &[
                ("Empfaenger-Name", "Alice"),
                ("Empfaenger-IBAN", "DE02120300000000202051"),
                ("Empfaenger-BIC", "BYLADEM1001"),
                ("Betrag", "10,00"),
                ("Verwendungszweck", "First"),
                ("Durchfuehrungsdatum", "01/02/2025"),
                ("Auftraggeber-IBAN", "DE89370400440532013000"),
                ("Auftraggeber-BIC", "COBADEFFXXX"),
            ],
            &[
                ("Empfaenger-Name", "Bob"),
                ("Empfaenger-IBAN", "DE75512108001245126199"),
                ("Empfaenger-BIC", ""),
                ("Betrag", "20.00"),
                ("Verwendungszweck", "Second"),
            ],
        ]);
        let (doc, diagnostics) = DocumentBuilder::new(&settings).build(&rows).unwrap();
        assert!(diagnostics.is_empty());
        assert!(doc.header().batch_booking());

        let pmt = doc.payment_information();
        assert_eq!(pmt.requested_date(), "2025-02-01");
        assert_eq!(pmt.sequence_type(), None);
        assert_eq!(pmt.creditor_scheme_id(), None);
        assert_eq!(pmt.originator().bic.as_deref(), Some("COBADEFFXXX"));

        let names = doc
            .transactions()
            .iter()
            .map(|t| t.counterparty().name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(
            doc.transactions()[0].counterparty().bic.as_deref(),
            Some("BYLADEM1001")
        );
        assert_eq!(doc.transactions()[1].counterparty().bic, None);
        assert!(doc.transactions().iter().all(|t| t.mandate().is_none()));

        assert_eq!(doc.header().totals(), pmt.totals());
        assert_eq!(pmt.totals().number_of_transactions, 2);
        assert_eq!(pmt.totals().control_sum.xml_string(), "30.00");
    }

    #[test]
    fn missing_amount_column() {
        let settings = settings(MessageType::CreditTransfer);
        let rows = rows(&[&[("Empfaenger-Name", "Alice")]]);
        let (doc, diagnostics) = DocumentBuilder::new(&settings).build(&rows).unwrap();
        assert_eq!(doc.transactions()[0].amount(), Euro::default());
        let coercion = &diagnostics.coercions()[0];
        assert_eq!(coercion.kind, CoercionKind::AmountMissing);
        assert_eq!(coercion.original, None);
    }
}
