use std::{collections::BTreeSet, fmt::Display};

/// A value that could not be used as given and was replaced by a fallback.
///
/// None of these stop a conversion, they are collected so the caller can show
/// which rows need a second look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coercion {
    /// 1-based position among the data rows.
    pub row: usize,
    /// Line in the input file, `0` if unknown.
    pub line: u64,
    pub field: &'static str,
    pub kind: CoercionKind,
    /// `None` if the column was missing.
    pub original: Option<String>,
    pub replacement: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoercionKind {
    AmountMissing,
    AmountUnparseable,
    DateDefaulted,
    DateUnrecognized,
    MandateIdDefaulted,
    CreditorIdDefaulted,
}

impl CoercionKind {
    fn describe(&self) -> &'static str {
        match self {
            CoercionKind::AmountMissing => "no amount",
            CoercionKind::AmountUnparseable => "not a number",
            CoercionKind::DateDefaulted => "no date",
            CoercionKind::DateUnrecognized => "not a day-month-year date, kept as is",
            CoercionKind::MandateIdDefaulted => "no mandate reference",
            CoercionKind::CreditorIdDefaulted => "no creditor id",
        }
    }
}

impl Display for Coercion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}", self.row)?;
        if self.line > 0 {
            write!(f, " (line {})", self.line)?;
        }
        write!(f, ": {}", self.field)?;
        if let Some(original) = &self.original {
            write!(f, " `{}`", original)?;
        }
        write!(f, " {}, using `{}`", self.kind.describe(), self.replacement)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    coercions: Vec<Coercion>,
}

impl Diagnostics {
    pub(crate) fn push(&mut self, coercion: Coercion) {
        log::warn!("{}", coercion);
        self.coercions.push(coercion);
    }

    pub fn coercions(&self) -> &[Coercion] {
        &self.coercions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coercion> {
        self.coercions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.coercions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coercions.len()
    }

    /// Data rows with at least one fallback, ascending.
    pub fn rows(&self) -> BTreeSet<usize> {
        self.coercions.iter().map(|c| c.row).collect()
    }

    pub fn of_kind(&self, kind: CoercionKind) -> impl Iterator<Item = &Coercion> {
        self.coercions.iter().filter(move |c| c.kind == kind)
    }
}
