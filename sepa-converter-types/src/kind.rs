use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Which pain document gets generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    /// pain.008, "Lastschrift"
    #[default]
    DirectDebit,
    /// pain.001, "Überweisung"
    CreditTransfer,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::DirectDebit => "direct-debit",
            MessageType::CreditTransfer => "credit-transfer",
        }
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message type `{0}`")]
pub struct UnknownMessageType(pub String);

impl FromStr for MessageType {
    type Err = UnknownMessageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct-debit" | "directdebit" | "dd" | "lastschrift" | "pain.008" => {
                Ok(MessageType::DirectDebit)
            }
            "credit-transfer" | "credittransfer" | "ct" | "trf" | "ueberweisung"
            | "überweisung" | "pain.001" => Ok(MessageType::CreditTransfer),
            _ => Err(UnknownMessageType(s.to_string())),
        }
    }
}

/// Direct debit `SeqTp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SequenceType {
    Frst,
    #[default]
    Rcur,
    Ooff,
    Fnal,
}

impl SequenceType {
    pub fn code(&self) -> &'static str {
        match self {
            SequenceType::Frst => "FRST",
            SequenceType::Rcur => "RCUR",
            SequenceType::Ooff => "OOFF",
            SequenceType::Fnal => "FNAL",
        }
    }
}

impl Display for SequenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sequence type `{0}`, expected one of FRST, RCUR, OOFF, FNAL")]
pub struct UnknownSequenceType(pub String);

impl FromStr for SequenceType {
    type Err = UnknownSequenceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FRST" => Ok(SequenceType::Frst),
            "RCUR" => Ok(SequenceType::Rcur),
            "OOFF" => Ok(SequenceType::Ooff),
            "FNAL" => Ok(SequenceType::Fnal),
            _ => Err(UnknownSequenceType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_aliases() {
        assert_eq!("Lastschrift".parse(), Ok(MessageType::DirectDebit));
        assert_eq!("pain.001".parse(), Ok(MessageType::CreditTransfer));
        assert_eq!("credit-transfer".parse(), Ok(MessageType::CreditTransfer));
        assert!("sepa".parse::<MessageType>().is_err());
    }

    #[test]
    fn sequence_type_codes() {
        for code in ["FRST", "RCUR", "OOFF", "FNAL"] {
            let seq: SequenceType = code.parse().unwrap();
            assert_eq!(seq.code(), code);
        }
        assert_eq!("rcur".parse(), Ok(SequenceType::Rcur));
        assert!("ONCE".parse::<SequenceType>().is_err());
    }
}
