//! Field Validation
//!
//! Each rule is a plain function over one field's value. A [`Validator`]
//! runs the rules for a whole payload and collects every failure, so a
//! client sees all problems with a request at once instead of one per
//! round trip.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use smallvec::{SmallVec, smallvec};

/// The reason a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required value was blank.
    Blank,

    /// A collection that must have members was empty.
    Empty,

    /// A value exceeded its maximum length.
    TooLong,

    /// A number was below zero.
    Negative,

    /// A number was zero or below where a positive value is required.
    NotPositive,

    /// A value was larger than the store can represent.
    OutOfRange,

    /// A value did not have the expected shape.
    InvalidFormat,
}

impl FieldErrorKind {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Blank => "may not be blank",
            Self::Empty => "must contain at least one entry",
            Self::TooLong => "is too long",
            Self::Negative => "cannot be negative",
            Self::NotPositive => "must be greater than zero",
            Self::OutOfRange => "is out of range",
            Self::InvalidFormat => "has an invalid format",
        }
    }
}

/// A failed rule for a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.kind.message())
    }
}

/// Most payloads fail on only a handful of fields.
type FieldErrors = SmallVec<[FieldError; 4]>;

/// All field failures for one payload. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(FieldErrors);

impl ValidationErrors {
    #[must_use]
    pub fn single(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self(smallvec![FieldError {
            field: field.into(),
            kind,
        }])
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether `field` failed with `kind`.
    #[must_use]
    pub fn contains(&self, field: &str, kind: FieldErrorKind) -> bool {
        self.0
            .iter()
            .any(|error| error.field == field && error.kind == kind)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }

            write!(f, "{error}")?;
            first = false;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Collects field rule outcomes for one payload.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a rule for `field`.
    #[must_use]
    pub fn check(mut self, field: impl Into<String>, outcome: Result<(), FieldErrorKind>) -> Self {
        if let Err(kind) = outcome {
            self.errors.push(FieldError {
                field: field.into(),
                kind,
            });
        }

        self
    }

    /// Record the outcome of a rule only when the field was supplied.
    #[must_use]
    pub fn check_optional<T>(
        self,
        field: impl Into<String>,
        value: Option<T>,
        rule: impl FnOnce(T) -> Result<(), FieldErrorKind>,
    ) -> Self {
        match value {
            Some(value) => self.check(field, rule(value)),
            None => self,
        }
    }

    /// Merge nested failures, prefixing each field with `prefix`.
    #[must_use]
    pub fn nested(mut self, prefix: &str, result: Result<(), ValidationErrors>) -> Self {
        if let Err(nested) = result {
            self.errors
                .extend(nested.0.into_iter().map(|error| FieldError {
                    field: format!("{prefix}.{}", error.field),
                    kind: error.kind,
                }));
        }

        self
    }

    /// # Errors
    ///
    /// Returns every recorded failure when at least one rule failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Reject empty or whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), FieldErrorKind> {
    if value.trim().is_empty() {
        Err(FieldErrorKind::Blank)
    } else {
        Ok(())
    }
}

/// Reject text longer than `max` characters.
pub fn max_chars(value: &str, max: usize) -> Result<(), FieldErrorKind> {
    if value.chars().count() > max {
        Err(FieldErrorKind::TooLong)
    } else {
        Ok(())
    }
}

pub fn non_negative(value: i64) -> Result<(), FieldErrorKind> {
    if value < 0 {
        Err(FieldErrorKind::Negative)
    } else {
        Ok(())
    }
}

pub fn positive(value: i64) -> Result<(), FieldErrorKind> {
    if value <= 0 {
        Err(FieldErrorKind::NotPositive)
    } else {
        Ok(())
    }
}

pub fn non_empty<T>(values: &[T]) -> Result<(), FieldErrorKind> {
    if values.is_empty() {
        Err(FieldErrorKind::Empty)
    } else {
        Ok(())
    }
}

/// Run `first`, falling through to `second` only when it passes.
pub fn both(
    first: Result<(), FieldErrorKind>,
    second: impl FnOnce() -> Result<(), FieldErrorKind>,
) -> Result<(), FieldErrorKind> {
    first.and_then(|()| second())
}
