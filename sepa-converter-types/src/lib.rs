mod date;
mod euro;
mod kind;

pub use date::{normalize, normalize_date, NormalizedDate, DEFAULT_DATE};
pub use euro::{AmountParseError, Euro};
pub use kind::{MessageType, SequenceType, UnknownMessageType, UnknownSequenceType};
