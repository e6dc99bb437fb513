//! Conjunctive filter predicates over records.
//!
//! A [`FilterSchema`] names the dimensions a view offers; a [`FilterState`]
//! holds the value currently chosen for each. Absent entries and the
//! [`FilterValue::All`] sentinel match every record.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use ehv_core::Record;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One independently-controlled narrowing criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    /// Case-insensitive substring match against any of `fields`.
    Search { fields: Vec<String> },
    /// Exact match on a categorical field.
    Category { field: String },
    /// Inclusive bounds on a date or date/time field.
    DateRange { field: String },
}

impl Dimension {
    fn fields(&self) -> impl Iterator<Item = &str> {
        let fields: &[String] = match self {
            Dimension::Search { fields } => fields,
            Dimension::Category { field } | Dimension::DateRange { field } => {
                std::slice::from_ref(field)
            }
        };
        fields.iter().map(String::as_str)
    }

    fn expected(&self) -> &'static str {
        match self {
            Dimension::Search { .. } => "a search text",
            Dimension::Category { .. } => "a category value",
            Dimension::DateRange { .. } => "a date range",
        }
    }

    fn accepts(&self, value: &FilterValue) -> bool {
        matches!(
            (self, value),
            (_, FilterValue::All)
                | (Dimension::Search { .. }, FilterValue::Text(_))
                | (Dimension::Category { .. }, FilterValue::Category(_))
                | (Dimension::DateRange { .. }, FilterValue::Range(_))
        )
    }

    /// Whether `record` passes this dimension with `value` selected.
    pub fn matches<R: Record>(&self, record: &R, value: &FilterValue) -> bool {
        match (self, value) {
            (_, FilterValue::All) => true,
            (Dimension::Search { fields }, FilterValue::Text(query)) => {
                let query = query.to_lowercase();
                fields.iter().any(|f| {
                    record
                        .field(f)
                        .is_some_and(|v| v.to_text().to_lowercase().contains(&query))
                })
            }
            (Dimension::Category { field }, FilterValue::Category(selected)) => record
                .field(field)
                .is_some_and(|v| v.to_text() == selected.as_str()),
            (Dimension::DateRange { field }, FilterValue::Range(range)) => record
                .field(field)
                .and_then(|v| v.as_datetime())
                .is_some_and(|t| range.contains(t)),
            // Mismatched kinds are rejected by `FilterState::set`.
            _ => false,
        }
    }
}

/// The value selected for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterValue {
    /// Sentinel: the dimension matches everything.
    #[default]
    All,
    Text(String),
    Category(String),
    Range(DateRange),
}

impl FilterValue {
    pub fn text(query: impl Into<String>) -> Self {
        FilterValue::Text(query.into())
    }

    pub fn category(value: impl fmt::Display) -> Self {
        FilterValue::Category(value.to_string())
    }

    /// Empty queries, empty categories and unbounded ranges collapse to the
    /// sentinel.
    fn normalized(self) -> Self {
        match self {
            FilterValue::Text(q) if q.is_empty() => FilterValue::All,
            FilterValue::Category(c) if c.is_empty() => FilterValue::All,
            FilterValue::Range(r) if r.is_unbounded() => FilterValue::All,
            other => other,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }
}

/// Inclusive date/time bounds. `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn between(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.from.map_or(true, |from| t >= from) && self.to.map_or(true, |to| t <= to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Trailing windows offered by the fault-log period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePreset {
    Last24Hours,
    Last7Days,
    Last30Days,
    Last90Days,
}

impl DatePreset {
    pub const ALL: [DatePreset; 4] = [
        DatePreset::Last24Hours,
        DatePreset::Last7Days,
        DatePreset::Last30Days,
        DatePreset::Last90Days,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DatePreset::Last24Hours => "1d",
            DatePreset::Last7Days => "7d",
            DatePreset::Last30Days => "30d",
            DatePreset::Last90Days => "90d",
        }
    }

    pub fn window(&self) -> Duration {
        match self {
            DatePreset::Last24Hours => Duration::days(1),
            DatePreset::Last7Days => Duration::days(7),
            DatePreset::Last30Days => Duration::days(30),
            DatePreset::Last90Days => Duration::days(90),
        }
    }

    /// The window ending at `anchor`. A window reaching past the earliest
    /// representable time is left open at the start.
    pub fn resolve(&self, anchor: NaiveDateTime) -> DateRange {
        DateRange {
            from: anchor.checked_sub_signed(self.window()),
            to: Some(anchor),
        }
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DatePreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DatePreset::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidFilterValue {
                filter: s.to_string(),
                expected: "one of 1d, 7d, 30d, 90d",
            })
    }
}

/// Ordered, named filter dimensions offered by a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSchema {
    dimensions: Vec<(String, Dimension)>,
}

impl FilterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search<S: AsRef<str>>(mut self, name: impl Into<String>, fields: &[S]) -> Self {
        let fields = fields.iter().map(|f| f.as_ref().to_string()).collect();
        self.dimensions
            .push((name.into(), Dimension::Search { fields }));
        self
    }

    pub fn category(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.dimensions.push((
            name.into(),
            Dimension::Category {
                field: field.into(),
            },
        ));
        self
    }

    pub fn date_range(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.dimensions.push((
            name.into(),
            Dimension::DateRange {
                field: field.into(),
            },
        ));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.dimensions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dimension)> {
        self.dimensions.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Check every referenced field exists on `R`.
    pub fn validate<R: Record>(&self) -> Result<()> {
        for (_, dim) in &self.dimensions {
            if let Some(missing) = dim.fields().find(|f| !R::has_field(f)) {
                return Err(Error::UnknownField {
                    record: std::any::type_name::<R>(),
                    field: missing.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Currently selected value per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    values: BTreeMap<String, FilterValue>,
}

static ALL: FilterValue = FilterValue::All;

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value for `name`, the sentinel when unset.
    pub fn get(&self, name: &str) -> &FilterValue {
        self.values.get(name).unwrap_or(&ALL)
    }

    /// Set a dimension, checking it exists in `schema` and accepts the value.
    /// Returns whether the stored value changed.
    pub fn set(
        &mut self,
        schema: &FilterSchema,
        name: &str,
        value: FilterValue,
    ) -> Result<bool> {
        let dim = schema
            .get(name)
            .ok_or_else(|| Error::UnknownFilter(name.to_string()))?;
        if !dim.accepts(&value) {
            return Err(Error::InvalidFilterValue {
                filter: name.to_string(),
                expected: dim.expected(),
            });
        }

        let value = value.normalized();
        let changed = self.get(name) != &value;
        if value.is_all() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
        }
        Ok(changed)
    }

    /// Reset every dimension to its sentinel.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of dimensions not at their sentinel.
    pub fn active_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Whether `record` satisfies every active dimension.
    pub fn matches<R: Record>(&self, schema: &FilterSchema, record: &R) -> bool {
        self.values.iter().all(|(name, value)| {
            schema
                .get(name)
                .map_or(true, |dim| dim.matches(record, value))
        })
    }
}

/// Records satisfying every active dimension, in their original order.
pub fn apply<'a, R: Record>(
    records: impl IntoIterator<Item = &'a R>,
    schema: &FilterSchema,
    state: &FilterState,
) -> Vec<&'a R> {
    records
        .into_iter()
        .filter(|r| state.matches(schema, *r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ehv_core::{datasets, FaultLog, Severity, Substation};

    fn fault_schema() -> FilterSchema {
        FilterSchema::new()
            .search("query", &FaultLog::SEARCH_FIELDS)
            .category("severity", "severity")
            .date_range("period", "timestamp")
    }

    fn ids(records: &[&FaultLog]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let logs = datasets::fault_logs();
        let out = apply(logs, &fault_schema(), &FilterState::new());
        assert_eq!(out.len(), 8);
        assert_eq!(ids(&out)[0], "F001");
        assert_eq!(ids(&out)[7], "F008");
    }

    #[test]
    fn test_category_filter_exact_match() {
        let schema = fault_schema();
        let mut state = FilterState::new();
        state
            .set(&schema, "severity", FilterValue::category(Severity::High))
            .unwrap();
        let out = apply(datasets::fault_logs(), &schema, &state);
        assert_eq!(ids(&out), vec!["F001", "F003", "F008"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let schema = fault_schema();
        let mut state = FilterState::new();

        state.set(&schema, "query", FilterValue::text("xfmr")).unwrap();
        assert_eq!(
            ids(&apply(datasets::fault_logs(), &schema, &state)),
            vec!["F001", "F005"]
        );

        // Matches via description only.
        state
            .set(&schema, "query", FilterValue::text("LOAD SHEDDING"))
            .unwrap();
        assert_eq!(
            ids(&apply(datasets::fault_logs(), &schema, &state)),
            vec!["F008"]
        );
    }

    #[test]
    fn test_empty_query_is_sentinel() {
        let schema = fault_schema();
        let mut state = FilterState::new();
        state.set(&schema, "query", FilterValue::text("oil")).unwrap();
        assert!(state.is_active("query"));

        let changed = state.set(&schema, "query", FilterValue::text("")).unwrap();
        assert!(changed);
        assert!(!state.is_active("query"));
        assert_eq!(apply(datasets::fault_logs(), &schema, &state).len(), 8);
    }

    #[test]
    fn test_empty_category_is_sentinel() {
        let schema = fault_schema();
        let mut state = FilterState::new();
        state
            .set(&schema, "severity", FilterValue::category("Low"))
            .unwrap();
        assert_eq!(apply(datasets::fault_logs(), &schema, &state).len(), 2);

        let changed = state
            .set(&schema, "severity", FilterValue::category(""))
            .unwrap();
        assert!(changed);
        assert!(!state.is_active("severity"));
        assert_eq!(state.get("severity"), &FilterValue::All);
        assert_eq!(apply(datasets::fault_logs(), &schema, &state).len(), 8);
    }

    #[test]
    fn test_dimensions_combine_conjunctively() {
        let schema = fault_schema();
        let mut state = FilterState::new();
        state
            .set(&schema, "severity", FilterValue::category("Medium"))
            .unwrap();
        state
            .set(&schema, "query", FilterValue::text("transformer"))
            .unwrap();
        assert_eq!(
            ids(&apply(datasets::fault_logs(), &schema, &state)),
            vec!["F005"]
        );
    }

    #[test]
    fn test_monotonic_narrowing() {
        let schema = fault_schema();
        let logs = datasets::fault_logs();
        let all = apply(logs, &schema, &FilterState::new());
        let anchor = logs[0].timestamp;

        for query in ["", "detected", "xfmr", "breaker", "zzz"] {
            let mut loose = FilterState::new();
            loose.set(&schema, "query", FilterValue::text(query)).unwrap();
            let wide = apply(logs, &schema, &loose);
            assert!(wide.iter().all(|r| all.iter().any(|a| a.id == r.id)));

            for severity in Severity::ALL {
                let mut tight = loose.clone();
                tight
                    .set(&schema, "severity", FilterValue::category(severity))
                    .unwrap();
                let narrow = apply(logs, &schema, &tight);
                assert!(narrow.len() <= wide.len(), "{query:?} + {severity}");
                assert!(narrow.iter().all(|r| wide.iter().any(|w| w.id == r.id)));
                assert!(narrow.iter().all(|r| r.severity == severity));

                let mut tighter = tight.clone();
                tighter
                    .set(
                        &schema,
                        "period",
                        FilterValue::Range(DatePreset::Last7Days.resolve(anchor)),
                    )
                    .unwrap();
                let narrowest = apply(logs, &schema, &tighter);
                assert!(narrowest.len() <= narrow.len(), "{query:?} + {severity} + 7d");
                assert!(narrowest.iter().all(|r| narrow.iter().any(|n| n.id == r.id)));
            }
        }
    }

    #[test]
    fn test_preset_near_calendar_start_is_open_ended() {
        let range = DatePreset::Last7Days.resolve(NaiveDateTime::MIN);
        assert_eq!(range.from, None);
        assert_eq!(range.to, Some(NaiveDateTime::MIN));
        assert!(range.contains(NaiveDateTime::MIN));

        let anchor = datasets::fault_logs()[0].timestamp;
        let range = DatePreset::Last24Hours.resolve(anchor);
        assert_eq!(range.from, Some(anchor - Duration::days(1)));
    }

    #[test]
    fn test_date_range_preset() {
        let schema = fault_schema();
        let anchor = datasets::fault_logs()[0].timestamp;
        let mut state = FilterState::new();
        state
            .set(
                &schema,
                "period",
                FilterValue::Range(DatePreset::Last24Hours.resolve(anchor)),
            )
            .unwrap();
        assert_eq!(
            ids(&apply(datasets::fault_logs(), &schema, &state)),
            vec!["F001", "F002", "F003"]
        );
    }

    #[test]
    fn test_date_range_on_date_field() {
        let schema = FilterSchema::new().date_range("inspected", "last_inspection");
        let from = chrono::NaiveDate::from_ymd_opt(2024, 1, 12)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut state = FilterState::new();
        state
            .set(
                &schema,
                "inspected",
                FilterValue::Range(DateRange {
                    from: Some(from),
                    to: None,
                }),
            )
            .unwrap();
        let out: Vec<&Substation> = apply(datasets::substations(), &schema, &state);
        let ids: Vec<u32> = out.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 4, 6]);
    }

    #[test]
    fn test_unknown_filter_and_wrong_kind_rejected() {
        let schema = fault_schema();
        let mut state = FilterState::new();
        assert!(matches!(
            state.set(&schema, "region", FilterValue::category("Eastern")),
            Err(Error::UnknownFilter(_))
        ));
        assert!(matches!(
            state.set(&schema, "severity", FilterValue::text("High")),
            Err(Error::InvalidFilterValue { .. })
        ));
        assert_eq!(state.active_count(), 0);
    }

    #[test]
    fn test_schema_validation_catches_typos() {
        let bad = FilterSchema::new().category("severity", "sevrity");
        assert!(matches!(
            bad.validate::<FaultLog>(),
            Err(Error::UnknownField { .. })
        ));
        assert!(fault_schema().validate::<FaultLog>().is_ok());
    }

    #[test]
    fn test_preset_codes() {
        assert_eq!("7d".parse::<DatePreset>().unwrap(), DatePreset::Last7Days);
        assert!("2w".parse::<DatePreset>().is_err());
    }
}
