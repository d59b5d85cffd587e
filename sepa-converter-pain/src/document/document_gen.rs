use xml::writer::XmlEvent;

use crate::{
    scheme::{PartyTags, Scheme, XSI_NAMESPACE},
    ToXml,
};

/// Opens `name`, writes `text` and closes it again.
fn text_element<'a>(name: &'a str, text: &'a str) -> [XmlEvent<'a>; 3] {
    [
        XmlEvent::start_element(name).into(),
        XmlEvent::characters(text),
        XmlEvent::end_element().into(),
    ]
}

pub struct DocumentString {
    pub(super) scheme: &'static Scheme,
    pub(super) schema_location: String,
    pub(super) header: HeaderString,
    pub(super) payment_information: PaymentInformationString,
}

impl ToXml for DocumentString {
    fn to_xml(&self) -> Vec<XmlEvent> {
        let mut v = vec![
            XmlEvent::start_element("Document")
                .default_ns(self.scheme.namespace)
                .ns("xsi", XSI_NAMESPACE)
                .attr("xsi:schemaLocation", &self.schema_location)
                .into(),
            XmlEvent::start_element(self.scheme.initiation).into(),
        ];
        v.extend(self.header.to_xml());
        v.extend(self.payment_information.to_xml());
        v.push(XmlEvent::end_element().into());
        v.push(XmlEvent::end_element().into());

        v
    }
}

impl From<&super::Document> for DocumentString {
    fn from(value: &super::Document) -> Self {
        Self {
            scheme: value.scheme,
            schema_location: value.scheme.schema_location(),
            header: (&value.header).into(),
            payment_information: PaymentInformationString::new(
                value.scheme,
                &value.payment_information,
            ),
        }
    }
}

pub struct HeaderString {
    /// MSG-randomhash
    pub(super) message_id: String,
    pub(super) creation_date_time: String,
    pub(super) number_of_transactions: String,
    pub(super) control_sum: String,
    pub(super) batch_booking: Option<String>,
    pub(super) name: String,
}

impl ToXml for HeaderString {
    fn to_xml(&self) -> Vec<XmlEvent> {
        let mut xml = vec![XmlEvent::start_element("GrpHdr").into()];
        xml.extend(text_element("MsgId", &self.message_id));
        xml.extend(text_element("CreDtTm", &self.creation_date_time));
        xml.extend(text_element("NbOfTxs", &self.number_of_transactions));
        xml.extend(text_element("CtrlSum", &self.control_sum));
        xml.extend(text_element("Grpg", "GRPD"));
        if let Some(batch_booking) = &self.batch_booking {
            xml.extend(text_element("BtchBookg", batch_booking));
        }
        xml.push(XmlEvent::start_element("InitgPty").into());
        xml.extend(text_element("Nm", &self.name));
        xml.push(XmlEvent::end_element().into());
        xml.push(XmlEvent::end_element().into());
        xml
    }
}

impl From<&super::Header> for HeaderString {
    fn from(value: &super::Header) -> Self {
        Self {
            message_id: value.message_id.clone(),
            creation_date_time: value.creation_date_time.clone(),
            number_of_transactions: value.totals.number_of_transactions.to_string(),
            control_sum: value.totals.control_sum.xml_string(),
            batch_booking: value.batch_booking.then(|| "true".to_string()),
            name: value.initiating_party.clone(),
        }
    }
}

/// A party rendered with the element names of its role.
pub struct PartyString {
    pub(super) tags: &'static PartyTags,
    pub(super) name: String,
    pub(super) iban: String,
    pub(super) bic: Option<String>,
}

impl PartyString {
    fn new(tags: &'static PartyTags, party: &super::Party) -> Self {
        Self {
            tags,
            name: party.name.clone(),
            iban: party.iban.clone(),
            bic: party.bic.clone(),
        }
    }

    fn party(&self) -> Vec<XmlEvent> {
        let mut xml = vec![XmlEvent::start_element(self.tags.party).into()];
        xml.extend(text_element("Nm", &self.name));
        xml.push(XmlEvent::end_element().into());
        xml
    }

    fn account(&self) -> Vec<XmlEvent> {
        let mut xml = vec![
            XmlEvent::start_element(self.tags.account).into(),
            XmlEvent::start_element("Id").into(),
        ];
        xml.extend(text_element("IBAN", &self.iban));
        xml.push(XmlEvent::end_element().into());
        xml.push(XmlEvent::end_element().into());
        xml
    }

    /// `FinInstnId` stays empty without a BIC.
    fn agent(&self) -> Vec<XmlEvent> {
        let mut xml = vec![
            XmlEvent::start_element(self.tags.agent).into(),
            XmlEvent::start_element("FinInstnId").into(),
        ];
        if let Some(bic) = &self.bic {
            xml.extend(text_element("BIC", bic));
        }
        xml.push(XmlEvent::end_element().into());
        xml.push(XmlEvent::end_element().into());
        xml
    }
}

pub struct PaymentInformationString {
    pub(super) scheme: &'static Scheme,
    pub(super) payment_information_id: String,
    pub(super) number_of_transactions: String,
    pub(super) control_sum: String,
    pub(super) sequence_type: Option<String>,
    /// Due or execution date, from the first row
    pub(super) requested_date: String,
    /// The company running the batch
    pub(super) originator: PartyString,
    pub(super) creditor_scheme_id: Option<String>,
    pub(super) transactions: Vec<TransactionString>,
}

impl PaymentInformationString {
    fn new(scheme: &'static Scheme, value: &super::PaymentInformation) -> Self {
        Self {
            scheme,
            payment_information_id: value.payment_information_id.clone(),
            number_of_transactions: value.totals.number_of_transactions.to_string(),
            control_sum: value.totals.control_sum.xml_string(),
            sequence_type: value.sequence_type.map(|s| s.code().to_string()),
            requested_date: value.requested_date.clone(),
            originator: PartyString::new(&scheme.originator, &value.originator),
            creditor_scheme_id: value.creditor_scheme_id.clone(),
            transactions: value
                .transactions
                .iter()
                .map(|t| TransactionString::new(scheme, t))
                .collect(),
        }
    }
}

impl ToXml for PaymentInformationString {
    fn to_xml(&self) -> Vec<XmlEvent> {
        let mut xml = vec![XmlEvent::start_element("PmtInf").into()];
        xml.extend(text_element("PmtInfId", &self.payment_information_id));
        xml.extend(text_element("PmtMtd", self.scheme.payment_method));
        xml.extend(text_element("NbOfTxs", &self.number_of_transactions));
        xml.extend(text_element("CtrlSum", &self.control_sum));

        xml.push(XmlEvent::start_element("PmtTpInf").into());
        xml.push(XmlEvent::start_element("SvcLvl").into());
        xml.extend(text_element("Cd", "SEPA"));
        xml.push(XmlEvent::end_element().into());
        if let Some(local_instrument) = self.scheme.local_instrument {
            xml.push(XmlEvent::start_element("LclInstrm").into());
            xml.extend(text_element("Cd", local_instrument));
            xml.push(XmlEvent::end_element().into());
        }
        if let Some(sequence_type) = &self.sequence_type {
            xml.extend(text_element("SeqTp", sequence_type));
        }
        xml.push(XmlEvent::end_element().into());

        xml.extend(text_element(
            self.scheme.requested_date,
            &self.requested_date,
        ));
        xml.extend(self.originator.party());
        xml.extend(self.originator.account());
        xml.extend(self.originator.agent());
        xml.extend(text_element("ChrgBr", "SLEV"));

        if let Some(creditor_id) = &self.creditor_scheme_id {
            xml.push(XmlEvent::start_element("CdtrSchmeId").into());
            xml.push(XmlEvent::start_element("Id").into());
            xml.push(XmlEvent::start_element("PrvtId").into());
            xml.push(XmlEvent::start_element("Othr").into());
            xml.extend(text_element("Id", creditor_id));
            xml.push(XmlEvent::start_element("SchmeNm").into());
            xml.extend(text_element("Prtry", "SEPA"));
            xml.push(XmlEvent::end_element().into());
            xml.push(XmlEvent::end_element().into());
            xml.push(XmlEvent::end_element().into());
            xml.push(XmlEvent::end_element().into());
            xml.push(XmlEvent::end_element().into());
        }

        xml.extend(self.transactions.iter().flat_map(|t| t.to_xml()));
        xml.push(XmlEvent::end_element().into());
        xml
    }
}

pub struct MandateString {
    pub(super) id: String,
    pub(super) date_of_signature: String,
    pub(super) amendment: String,
}

pub struct TransactionString {
    pub(super) scheme: &'static Scheme,
    /// E2E-randomhash
    pub(super) end_to_end_id: String,
    pub(super) amount: String,
    pub(super) counterparty: PartyString,
    pub(super) remittance_information: String,
    pub(super) mandate: Option<MandateString>,
}

impl TransactionString {
    fn new(scheme: &'static Scheme, value: &super::Transaction) -> Self {
        Self {
            scheme,
            end_to_end_id: value.end_to_end_id.clone(),
            amount: value.amount.xml_string(),
            counterparty: PartyString::new(&scheme.counterparty, &value.counterparty),
            remittance_information: value.remittance_information.clone(),
            mandate: value.mandate.as_ref().map(|m| MandateString {
                id: m.id.clone(),
                date_of_signature: m.date_of_signature.clone(),
                amendment: m.amendment.to_string(),
            }),
        }
    }
}

impl ToXml for TransactionString {
    fn to_xml(&self) -> Vec<XmlEvent> {
        let mut xml = vec![
            XmlEvent::start_element(self.scheme.transaction).into(),
            XmlEvent::start_element("PmtId").into(),
        ];
        xml.extend(text_element("EndToEndId", &self.end_to_end_id));
        xml.push(XmlEvent::end_element().into());

        if let Some(wrapper) = self.scheme.amount_wrapper {
            xml.push(XmlEvent::start_element(wrapper).into());
        }
        xml.push(XmlEvent::start_element("InstdAmt").attr("Ccy", "EUR").into());
        xml.push(XmlEvent::characters(&self.amount));
        xml.push(XmlEvent::end_element().into());
        if self.scheme.amount_wrapper.is_some() {
            xml.push(XmlEvent::end_element().into());
        }

        if let Some(mandate) = &self.mandate {
            xml.push(XmlEvent::start_element("DrctDbtTx").into());
            xml.push(XmlEvent::start_element("MndtRltdInf").into());
            xml.extend(text_element("MndtId", &mandate.id));
            xml.extend(text_element("DtOfSgntr", &mandate.date_of_signature));
            xml.extend(text_element("AmdmntInd", &mandate.amendment));
            xml.push(XmlEvent::end_element().into());
            xml.push(XmlEvent::end_element().into());
        }

        xml.extend(self.counterparty.agent());
        xml.extend(self.counterparty.party());
        xml.extend(self.counterparty.account());
        xml.push(XmlEvent::start_element("RmtInf").into());
        xml.extend(text_element("Ustrd", &self.remittance_information));
        xml.push(XmlEvent::end_element().into());
        xml.push(XmlEvent::end_element().into());
        xml
    }
}
