use serde::{Deserialize, Serialize};

use sepa_converter_types::{MessageType, SequenceType};

/// Defaults for the run settings, anything given on the command line wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SEPAConfig {
    /// Initiating party, also creditor (direct debit) or debtor (credit transfer) name.
    pub company_name: String,
    pub message_type: MessageType,
    pub sequence_type: SequenceType,
    pub batch_booking: bool,
}
