//! Classified scalar container
//!
//! Every leaf value of a document is wrapped in a [`Classified`]: the value
//! itself (possibly absent), its security marking and the optional
//! provenance attributes the legacy standard mirrors on each element.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::classification::Classification;
use crate::format::{Format, FormatCode, FormatError, FormatRegistry, FormatResult};
use crate::reference::Serial;

/// Value types a format adapter can produce
pub trait Scalar: Clone + fmt::Debug + PartialEq + PartialOrd {
    /// Name used in kind-mismatch diagnostics
    const KIND: &'static str;

    fn parse_with(format: &Format, raw: &str) -> FormatResult<Self>;

    fn render_with(&self, format: &Format) -> FormatResult<String>;

    fn check_with(&self, format: &Format) -> FormatResult<()>;
}

fn mismatch<T: Scalar>(format: &Format) -> FormatError {
    FormatError::KindMismatch {
        constraint: format.to_string(),
        expected: T::KIND,
        found: format.value_kind(),
    }
}

impl Scalar for i64 {
    const KIND: &'static str = "integer";

    fn parse_with(format: &Format, raw: &str) -> FormatResult<Self> {
        match format {
            Format::Integer(f) => f.parse(raw),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn render_with(&self, format: &Format) -> FormatResult<String> {
        match format {
            Format::Integer(f) => Ok(f.render(self)),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn check_with(&self, format: &Format) -> FormatResult<()> {
        match format {
            Format::Integer(f) => f.check(*self),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl Scalar for Decimal {
    const KIND: &'static str = "decimal";

    fn parse_with(format: &Format, raw: &str) -> FormatResult<Self> {
        match format {
            Format::Decimal(f) => f.parse(raw),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn render_with(&self, format: &Format) -> FormatResult<String> {
        match format {
            Format::Decimal(f) => Ok(f.render(self)),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn check_with(&self, format: &Format) -> FormatResult<()> {
        match format {
            Format::Decimal(f) => f.check(self),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl Scalar for String {
    const KIND: &'static str = "text";

    fn parse_with(format: &Format, raw: &str) -> FormatResult<Self> {
        match format {
            Format::Text(f) => f.parse(raw),
            Format::Code(f) => f.parse(raw),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn render_with(&self, format: &Format) -> FormatResult<String> {
        match format {
            Format::Text(f) => Ok(f.render(self)),
            Format::Code(f) => Ok(f.render(self)),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn check_with(&self, format: &Format) -> FormatResult<()> {
        match format {
            Format::Text(f) => f.check(self),
            Format::Code(f) => f.check(self),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl Scalar for NaiveDate {
    const KIND: &'static str = "date";

    fn parse_with(format: &Format, raw: &str) -> FormatResult<Self> {
        match format {
            Format::Date(f) => f.parse(raw),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn render_with(&self, format: &Format) -> FormatResult<String> {
        match format {
            Format::Date(f) => Ok(f.render(self)),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn check_with(&self, format: &Format) -> FormatResult<()> {
        match format {
            Format::Date(f) => f.check(self),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl Scalar for DateTime<Utc> {
    const KIND: &'static str = "date-time";

    fn parse_with(format: &Format, raw: &str) -> FormatResult<Self> {
        match format {
            Format::DateTime(f) => f.parse(raw),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn render_with(&self, format: &Format) -> FormatResult<String> {
        match format {
            Format::DateTime(f) => Ok(f.render(self)),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn check_with(&self, format: &Format) -> FormatResult<()> {
        match format {
            Format::DateTime(f) => f.check(self),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl Scalar for Serial {
    const KIND: &'static str = "serial";

    fn parse_with(format: &Format, raw: &str) -> FormatResult<Self> {
        match format {
            Format::Serial(f) => f.parse(raw),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn render_with(&self, format: &Format) -> FormatResult<String> {
        match format {
            Format::Serial(f) => Ok(f.render(self)),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn check_with(&self, format: &Format) -> FormatResult<()> {
        match format {
            Format::Serial(f) => f.check(self),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

/// Optional provenance attributes mirrored from the legacy standard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarMeta {
    /// Indices into the document's remark table
    pub remarks: Vec<u32>,
    /// Indices into the document's external reference table
    pub ext_references: Vec<u32>,
    pub legacy_releasability: Option<String>,
    pub quality_flag: Option<String>,
    pub recommended_value: Option<String>,
    pub availability: Option<String>,
}

impl ScalarMeta {
    pub fn is_empty(&self) -> bool {
        self.remarks.is_empty()
            && self.ext_references.is_empty()
            && self.legacy_releasability.is_none()
            && self.quality_flag.is_none()
            && self.recommended_value.is_none()
            && self.availability.is_none()
    }
}

/// A format-constrained value with its security marking.
///
/// Equality, ordering and hashing look at the value only: two scalars holding
/// the same datum under different markings compare equal.
///
/// # Example
///
/// ```rust
/// use ssrf_model::format::{FormatCode, FormatRegistry};
/// use ssrf_model::scalar::{Classification, Classified};
///
/// let registry = FormatRegistry::global();
/// let digit = Classified::<i64>::parse(&FormatCode::Unsigned(1), "9", registry)
///     .unwrap()
///     .with_classification(Classification::Unclassified);
/// assert!(digit.is_set());
/// assert!(Classified::<i64>::parse(&FormatCode::Unsigned(1), "10", registry).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Classified<T> {
    value: Option<T>,
    classification: Option<Classification>,
    pub meta: ScalarMeta,
}

impl<T> Default for Classified<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Classified<T> {
    /// Wrap a language-native value as-is; no marking, no validation yet
    pub fn new(value: T) -> Self {
        Self {
            value: Some(value),
            classification: None,
            meta: ScalarMeta::default(),
        }
    }

    /// Scalar with no value
    pub fn empty() -> Self {
        Self {
            value: None,
            classification: None,
            meta: ScalarMeta::default(),
        }
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_meta(mut self, meta: ScalarMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Whether the author supplied a value (weaker than validity)
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn classification(&self) -> Option<Classification> {
        self.classification
    }

    pub fn set_classification(&mut self, classification: Option<Classification>) {
        self.classification = classification;
    }
}

impl<T: Scalar> Classified<T> {
    /// Parse wire text through the adapter bound to `code`
    pub fn parse(code: &FormatCode, raw: &str, registry: &FormatRegistry) -> FormatResult<Self> {
        registry.parse(code, raw).map(Self::new)
    }

    /// Wrap a language-native value after checking it against `code`
    pub fn validated(code: &FormatCode, value: T, registry: &FormatRegistry) -> FormatResult<Self> {
        registry.check(code, &value)?;
        Ok(Self::new(value))
    }

    /// Check the held value; an absent value is valid
    pub fn validate(&self, code: &FormatCode, registry: &FormatRegistry) -> FormatResult<()> {
        match &self.value {
            Some(value) => registry.check(code, value),
            None => Ok(()),
        }
    }

    /// Set and well-formed
    pub fn is_valid(&self, code: &FormatCode, registry: &FormatRegistry) -> bool {
        self.is_set() && self.validate(code, registry).is_ok()
    }

    /// Canonical wire text of the value, `None` when unset
    pub fn render(
        &self,
        code: &FormatCode,
        registry: &FormatRegistry,
    ) -> FormatResult<Option<String>> {
        self.value
            .as_ref()
            .map(|value| registry.render(code, value))
            .transpose()
    }
}

impl<T> From<T> for Classified<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: PartialEq> PartialEq for Classified<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Classified<T> {}

impl<T: PartialOrd> PartialOrd for Classified<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord> Ord for Classified<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Hash> Hash for Classified<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: fmt::Display> fmt::Display for Classified<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, self.classification) {
            (Some(value), Some(cls)) => write!(f, "({}) {}", cls, value),
            (Some(value), None) => write!(f, "{}", value),
            (None, _) => Ok(()),
        }
    }
}
