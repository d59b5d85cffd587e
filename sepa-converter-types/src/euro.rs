use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

#[derive(PartialEq, Clone, Copy, Default, PartialOrd)]
pub struct Euro(f64);

impl Euro {
    /// Amount as it goes into `InstdAmt` and `CtrlSum`, always two decimals.
    pub fn xml_string(&self) -> String {
        format!("{:.2}", self.0)
    }

    pub fn new(euros: i32, cents: i32) -> Self {
        let cents = cents as f64 / 100.0;
        let euros = euros as f64;
        Euro(euros + cents).round()
    }

    /// Parses `1234,56` as well as `1234.56`.
    ///
    /// Returns `None` for anything that is not a finite number, callers decide
    /// what the fallback is.
    pub fn parse_amount(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// rounds to the nearest cent
    fn round(mut self) -> Self {
        self.0 = (self.0 * 100.0).round() / 100.0;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid amount")]
pub struct AmountParseError(pub String);

impl FromStr for Euro {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(',', ".");
        let f = normalized
            .parse::<f64>()
            .map_err(|_| AmountParseError(s.to_string()))?;
        if !f.is_finite() {
            return Err(AmountParseError(s.to_string()));
        }
        Ok(Euro::from(f))
    }
}

impl Sum for Euro {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a Euro> for Euro {
    fn sum<I: Iterator<Item = &'a Euro>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<f64> for Euro {
    fn from(value: f64) -> Self {
        Euro(value).round()
    }
}

impl Debug for Euro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Euro").field(&self.0).finish()
    }
}

impl Display for Euro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = format!("{:.2}", self.0);
        f.pad(&s)
    }
}

impl Add for Euro {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Euro(self.0 + rhs.0).round()
    }
}

impl AddAssign for Euro {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
