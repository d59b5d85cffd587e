use std::io::Write;

use sepa_converter_types::{Euro, MessageType, SequenceType};
use xml::{
    common::XmlVersion,
    writer::{EmitterConfig, XmlEvent},
    EventWriter,
};

use crate::{scheme::Scheme, ToXml};

use self::document_gen::DocumentString;

mod document_gen;

/// A complete pain.008 or pain.001 message with a single payment block.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    scheme: &'static Scheme,
    header: Header,
    payment_information: PaymentInformation,
}

impl Document {
    pub(crate) fn new(
        scheme: &'static Scheme,
        header: Header,
        payment_information: PaymentInformation,
    ) -> Self {
        Self {
            scheme,
            header,
            payment_information,
        }
    }

    pub fn message_type(&self) -> MessageType {
        self.scheme.message_type
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn payment_information(&self) -> &PaymentInformation {
        &self.payment_information
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.payment_information.transactions
    }

    pub(crate) fn to_xml_doc(&self) -> DocumentString {
        DocumentString::from(self)
    }

    /// Writes the declaration and the document, indented.
    pub fn write<W: Write>(&self, sink: W) -> xml::writer::Result<()> {
        let mut writer = EmitterConfig::new()
            .perform_indent(true)
            .create_writer(sink);
        self.write_events(&mut writer)
    }

    pub fn write_events<W: Write>(&self, writer: &mut EventWriter<W>) -> xml::writer::Result<()> {
        writer.write(XmlEvent::StartDocument {
            version: XmlVersion::Version10,
            encoding: Some("UTF-8"),
            standalone: None,
        })?;
        let doc = self.to_xml_doc();
        for event in doc.to_xml() {
            writer.write(event)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> xml::writer::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }
}

/// Count and sum of a batch, identical in `GrpHdr` and `PmtInf`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub number_of_transactions: u32,
    pub control_sum: Euro,
}

impl Totals {
    pub fn of(transactions: &[Transaction]) -> Self {
        Self {
            number_of_transactions: transactions.len() as u32,
            control_sum: transactions.iter().map(|t| t.amount).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// MSG-randomhash
    message_id: String,
    creation_date_time: String,
    totals: Totals,
    batch_booking: bool,
    initiating_party: String,
}

impl Header {
    pub(crate) fn new(
        message_id: String,
        creation_date_time: String,
        totals: Totals,
        batch_booking: bool,
        initiating_party: String,
    ) -> Self {
        Self {
            message_id,
            creation_date_time,
            totals,
            batch_booking,
            initiating_party,
        }
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn creation_date_time(&self) -> &str {
        &self.creation_date_time
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn batch_booking(&self) -> bool {
        self.batch_booking
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInformation {
    payment_information_id: String,
    totals: Totals,
    /// Direct debits only.
    sequence_type: Option<SequenceType>,
    requested_date: String,
    originator: Party,
    /// Direct debits only.
    creditor_scheme_id: Option<String>,
    transactions: Vec<Transaction>,
}

impl PaymentInformation {
    pub(crate) fn new(
        payment_information_id: String,
        totals: Totals,
        sequence_type: Option<SequenceType>,
        requested_date: String,
        originator: Party,
        creditor_scheme_id: Option<String>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            payment_information_id,
            totals,
            sequence_type,
            requested_date,
            originator,
            creditor_scheme_id,
            transactions,
        }
    }

    pub fn payment_information_id(&self) -> &str {
        &self.payment_information_id
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn sequence_type(&self) -> Option<SequenceType> {
        self.sequence_type
    }

    pub fn requested_date(&self) -> &str {
        &self.requested_date
    }

    pub fn originator(&self) -> &Party {
        &self.originator
    }

    pub fn creditor_scheme_id(&self) -> Option<&str> {
        self.creditor_scheme_id.as_deref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

/// Name, account and optional bank of either side of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Party {
    pub name: String,
    pub iban: String,
    pub bic: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// E2E-randomhash
    end_to_end_id: String,
    amount: Euro,
    counterparty: Party,
    remittance_information: String,
    mandate: Option<Mandate>,
}

impl Transaction {
    pub(crate) fn new(
        end_to_end_id: String,
        amount: Euro,
        counterparty: Party,
        remittance_information: String,
        mandate: Option<Mandate>,
    ) -> Self {
        Self {
            end_to_end_id,
            amount,
            counterparty,
            remittance_information,
            mandate,
        }
    }

    pub fn end_to_end_id(&self) -> &str {
        &self.end_to_end_id
    }

    pub fn amount(&self) -> Euro {
        self.amount
    }

    pub fn counterparty(&self) -> &Party {
        &self.counterparty
    }

    pub fn remittance_information(&self) -> &str {
        &self.remittance_information
    }

    pub fn mandate(&self) -> Option<&Mandate> {
        self.mandate.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mandate {
    pub id: String,
    pub date_of_signature: String,
    /// Always `false`, amendments are not supported.
    pub amendment: bool,
}
