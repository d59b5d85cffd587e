//! What differs between pain.008 and pain.001: input column labels, fixed
//! codes and element names. Everything else is shared.

use sepa_converter_types::MessageType;

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

#[derive(Debug, PartialEq, Eq)]
pub struct Scheme {
    pub message_type: MessageType,
    pub namespace: &'static str,
    pub schema_file: &'static str,
    /// Child of `Document`.
    pub initiation: &'static str,
    pub payment_method: &'static str,
    /// `LclInstrm/Cd`, only for direct debits.
    pub local_instrument: Option<&'static str>,
    pub requested_date: &'static str,
    /// The party of the payment block, i.e. the company running the batch.
    pub originator: PartyTags,
    /// The party of every transaction.
    pub counterparty: PartyTags,
    pub transaction: &'static str,
    /// Element `InstdAmt` is wrapped in, if any.
    pub amount_wrapper: Option<&'static str>,
    pub fields: Fields,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PartyTags {
    pub party: &'static str,
    pub account: &'static str,
    pub agent: &'static str,
}

/// Input column labels.
#[derive(Debug, PartialEq, Eq)]
pub struct Fields {
    pub counterparty_name: &'static str,
    pub counterparty_iban: &'static str,
    pub counterparty_bic: Option<&'static str>,
    pub amount: &'static str,
    pub purpose: &'static str,
    pub requested_date: &'static str,
    pub originator_iban: &'static str,
    pub originator_bic: Option<&'static str>,
    pub mandate: Option<MandateFields>,
    pub creditor_id: Option<&'static str>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MandateFields {
    pub id: &'static str,
    pub signature_date: &'static str,
}

/// `MndtId` used when a row has no mandate reference.
pub const FALLBACK_MANDATE_ID: &str = "Mandat001";

/// `CdtrSchmeId` used when the first row has no creditor id.
pub const FALLBACK_CREDITOR_ID: &str = "DE99ZZZ09999999999";

const CREDITOR: PartyTags = PartyTags {
    party: "Cdtr",
    account: "CdtrAcct",
    agent: "CdtrAgt",
};

const DEBTOR: PartyTags = PartyTags {
    party: "Dbtr",
    account: "DbtrAcct",
    agent: "DbtrAgt",
};

pub static DIRECT_DEBIT: Scheme = Scheme {
    message_type: MessageType::DirectDebit,
    namespace: "urn:iso:std:iso:20022:tech:xsd:pain.008.003.02",
    schema_file: "pain.008.003.02.xsd",
    initiation: "CstmrDrctDbtInitn",
    payment_method: "DD",
    local_instrument: Some("CORE"),
    requested_date: "ReqdColltnDt",
    originator: CREDITOR,
    counterparty: DEBTOR,
    transaction: "DrctDbtTxInf",
    amount_wrapper: None,
    fields: Fields {
        counterparty_name: "Zahlungspflichtiger-Name",
        counterparty_iban: "Zahlungspflichtiger-IBAN",
        counterparty_bic: None,
        amount: "Betrag",
        purpose: "Verwendungszweck",
        requested_date: "Faelligkeitsdatum",
        originator_iban: "Auftraggeber-IBAN",
        originator_bic: None,
        mandate: Some(MandateFields {
            id: "Mandatsreferenz",
            signature_date: "Mandatsaustellungsdatum",
        }),
        creditor_id: Some("Creditor-ID"),
    },
};

pub static CREDIT_TRANSFER: Scheme = Scheme {
    message_type: MessageType::CreditTransfer,
    namespace: "urn:iso:std:iso:20022:tech:xsd:pain.001.003.03",
    schema_file: "pain.001.003.03.xsd",
    initiation: "CstmrCdtTrfInitn",
    payment_method: "TRF",
    local_instrument: None,
    requested_date: "ReqdExctnDt",
    originator: DEBTOR,
    counterparty: CREDITOR,
    transaction: "CdtTrfTxInf",
    amount_wrapper: Some("Amt"),
    fields: Fields {
        counterparty_name: "Empfaenger-Name",
        counterparty_iban: "Empfaenger-IBAN",
        counterparty_bic: Some("Empfaenger-BIC"),
        amount: "Betrag",
        purpose: "Verwendungszweck",
        requested_date: "Durchfuehrungsdatum",
        originator_iban: "Auftraggeber-IBAN",
        originator_bic: Some("Auftraggeber-BIC"),
        mandate: None,
        creditor_id: None,
    },
};

impl Scheme {
    pub fn for_message(message_type: MessageType) -> &'static Scheme {
        match message_type {
            MessageType::DirectDebit => &DIRECT_DEBIT,
            MessageType::CreditTransfer => &CREDIT_TRANSFER,
        }
    }

    /// Value of `xsi:schemaLocation`.
    pub fn schema_location(&self) -> String {
        format!("{} {}", self.namespace, self.schema_file)
    }

    /// Direct debits carry mandates and a sequence type.
    pub fn has_mandates(&self) -> bool {
        self.fields.mandate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_message_type() {
        assert_eq!(Scheme::for_message(MessageType::DirectDebit), &DIRECT_DEBIT);
        assert_eq!(
            Scheme::for_message(MessageType::CreditTransfer).payment_method,
            "TRF"
        );
    }

    #[test]
    fn schema_locations() {
        assert_eq!(
            DIRECT_DEBIT.schema_location(),
            "urn:iso:std:iso:20022:tech:xsd:pain.008.003.02 pain.008.003.02.xsd"
        );
        assert_eq!(
            CREDIT_TRANSFER.schema_location(),
            "urn:iso:std:iso:20022:tech:xsd:pain.001.003.03 pain.001.003.03.xsd"
        );
    }

    #[test]
    fn only_direct_debit_has_mandates() {
        assert!(DIRECT_DEBIT.has_mandates());
        assert!(!CREDIT_TRANSFER.has_mandates());
    }
}
