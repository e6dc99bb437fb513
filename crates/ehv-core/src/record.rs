//! The [`Record`] abstraction shared by every dashboard table.
//!
//! A record is a flat mapping of field names to primitive values. Views never
//! see the concrete struct; they ask for fields by name and compare the
//! returned [`FieldValue`]s.

use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

use chrono::{NaiveDate, NaiveDateTime};

/// A flat, immutable row of a dashboard table.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Identifier type, unique within a [`RecordStore`](crate::RecordStore).
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Names of every field [`Record::field`] answers for.
    const FIELDS: &'static [&'static str];

    /// The record identifier.
    fn id(&self) -> &Self::Id;

    /// Look up a field by name. Returns `None` for unknown names and for
    /// optional fields that carry no value on this record.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Whether `name` is one of this record type's fields.
    fn has_field(name: &str) -> bool {
        Self::FIELDS.contains(&name)
    }
}

/// A primitive field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Integer(i64),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl<'a> FieldValue<'a> {
    /// Borrowed text value.
    pub fn text(s: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(s))
    }

    /// Render the value as text, the form used by search and category matching.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Integer(i) => Cow::Owned(i.to_string()),
            FieldValue::Number(n) => Cow::Owned(format_number(*n)),
            FieldValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            FieldValue::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    /// Date/time view of the value. Dates map to midnight.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::Date(d) => d.and_hms_opt(0, 0, 0),
            _ => None,
        }
    }

    /// Numeric view of the value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Integral floats print without a trailing `.0` so "400" matches 400.0.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
