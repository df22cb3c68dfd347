//! Positional row decoding and parameter encoding.
//!
//! Rows arrive as `[id, data columns...]` in the table's declared order.
//! A nullable column decodes SQL NULL to `None`; any other mismatch fails
//! the row.

use super::table::TableSpec;
use crate::db::Value;
use crate::model::{RecordId, DATE_FORMAT};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    ColumnCount {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    UnexpectedType {
        table: &'static str,
        column: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    InvalidDate {
        table: &'static str,
        column: &'static str,
        value: String,
    },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnCount {
                table,
                expected,
                found,
            } => write!(f, "{table}: expected {expected} columns, got {found}"),
            Self::UnexpectedType {
                table,
                column,
                expected,
                found,
            } => write!(f, "{table}.{column}: expected {expected}, got {found}"),
            Self::InvalidDate {
                table,
                column,
                value,
            } => write!(f, "{table}.{column}: invalid date `{value}`"),
        }
    }
}

impl Error for DecodeError {}

/// Typed positional accessor over one result row.
pub struct RowReader<'a> {
    table: &'static str,
    id_column: &'static str,
    columns: &'static [&'static str],
    values: &'a [Value],
}

impl<'a> RowReader<'a> {
    /// Wraps `values`, rejecting rows whose width does not match `spec`.
    pub fn new(spec: &TableSpec, values: &'a [Value]) -> Result<Self, DecodeError> {
        let expected = spec.columns.len() + 1;
        if values.len() != expected {
            return Err(DecodeError::ColumnCount {
                table: spec.table,
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            table: spec.table,
            id_column: spec.id_column,
            columns: spec.columns,
            values,
        })
    }

    fn column(&self, index: usize) -> &'static str {
        if index == 0 {
            self.id_column
        } else {
            self.columns[index - 1]
        }
    }

    fn mismatch(&self, index: usize, expected: &'static str) -> DecodeError {
        DecodeError::UnexpectedType {
            table: self.table,
            column: self.column(index),
            expected,
            found: type_name(&self.values[index]),
        }
    }

    /// Primary key column; always present for stored rows.
    pub fn id(&self) -> Result<Option<RecordId>, DecodeError> {
        self.integer(0).map(Some)
    }

    pub fn text(&self, index: usize) -> Result<String, DecodeError> {
        self.optional_text(index)?
            .ok_or_else(|| self.mismatch(index, "text"))
    }

    pub fn optional_text(&self, index: usize) -> Result<Option<String>, DecodeError> {
        match &self.values[index] {
            Value::Null => Ok(None),
            Value::Text(value) => Ok(Some(value.clone())),
            _ => Err(self.mismatch(index, "text")),
        }
    }

    pub fn integer(&self, index: usize) -> Result<i64, DecodeError> {
        self.optional_integer(index)?
            .ok_or_else(|| self.mismatch(index, "integer"))
    }

    pub fn optional_integer(&self, index: usize) -> Result<Option<i64>, DecodeError> {
        match &self.values[index] {
            Value::Null => Ok(None),
            Value::Integer(value) => Ok(Some(*value)),
            _ => Err(self.mismatch(index, "integer")),
        }
    }

    pub fn date(&self, index: usize) -> Result<NaiveDate, DecodeError> {
        let raw = self.text(index).map_err(|_| self.mismatch(index, "date"))?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| DecodeError::InvalidDate {
            table: self.table,
            column: self.column(index),
            value: raw,
        })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Integer(_) => "integer",
        Value::Real(_) => "real",
        Value::Text(_) => "text",
        Value::Blob(_) => "blob",
    }
}

pub(crate) fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub(crate) fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text)
}

pub(crate) fn integer(value: i64) -> Value {
    Value::Integer(value)
}

pub(crate) fn optional_integer(value: Option<i64>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}

pub(crate) fn date(value: NaiveDate) -> Value {
    Value::Text(value.format(DATE_FORMAT).to_string())
}
