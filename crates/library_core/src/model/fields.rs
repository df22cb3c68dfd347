//! Positional text input parsing.
//!
//! Form values arrive as raw strings in `FIELD_LABELS` order. Values are
//! trimmed; an empty value is "absent". Required fields must be present,
//! optional ones map absent to `None`. Nothing else is validated.

use super::{EntityKind, DATE_FORMAT};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error produced while turning form input into a typed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Value count does not match the kind's field labels.
    Arity {
        kind: EntityKind,
        expected: usize,
        found: usize,
    },
    /// Required field is empty.
    Missing { field: &'static str },
    /// Value is not a base-10 integer.
    InvalidInteger { field: &'static str, value: String },
    /// Value is not a `YYYY-MM-DD` date.
    InvalidDate { field: &'static str, value: String },
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arity {
                kind,
                expected,
                found,
            } => write!(f, "{kind} expects {expected} values, got {found}"),
            Self::Missing { field } => write!(f, "field `{field}` is required"),
            Self::InvalidInteger { field, value } => {
                write!(f, "field `{field}` expects an integer, got `{value}`")
            }
            Self::InvalidDate { field, value } => {
                write!(f, "field `{field}` expects a YYYY-MM-DD date, got `{value}`")
            }
        }
    }
}

impl Error for FieldError {}

/// Cursor over one form submission.
pub(crate) struct FieldReader<'a> {
    labels: &'static [&'static str],
    values: &'a [&'a str],
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(
        kind: EntityKind,
        labels: &'static [&'static str],
        values: &'a [&'a str],
    ) -> Result<Self, FieldError> {
        if values.len() != labels.len() {
            return Err(FieldError::Arity {
                kind,
                expected: labels.len(),
                found: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    fn raw(&self, index: usize) -> Option<&'a str> {
        let value = self.values[index].trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    pub(crate) fn text(&self, index: usize) -> Result<String, FieldError> {
        self.raw(index)
            .map(str::to_string)
            .ok_or(FieldError::Missing {
                field: self.labels[index],
            })
    }

    pub(crate) fn optional_text(&self, index: usize) -> Option<String> {
        self.raw(index).map(str::to_string)
    }

    pub(crate) fn integer(&self, index: usize) -> Result<i64, FieldError> {
        self.optional_integer(index)?.ok_or(FieldError::Missing {
            field: self.labels[index],
        })
    }

    pub(crate) fn optional_integer(&self, index: usize) -> Result<Option<i64>, FieldError> {
        match self.raw(index) {
            None => Ok(None),
            Some(value) => value
                .parse::<i64>()
                .map(Some)
                .map_err(|_| FieldError::InvalidInteger {
                    field: self.labels[index],
                    value: value.to_string(),
                }),
        }
    }

    pub(crate) fn date(&self, index: usize) -> Result<NaiveDate, FieldError> {
        let value = self.raw(index).ok_or(FieldError::Missing {
            field: self.labels[index],
        })?;
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| FieldError::InvalidDate {
            field: self.labels[index],
            value: value.to_string(),
        })
    }
}
