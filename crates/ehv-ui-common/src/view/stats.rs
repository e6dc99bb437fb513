//! Grouped counts and simple aggregates.
//!
//! Views always summarize their full store, never the filtered subset, so the
//! overview counters stay put while the table below them narrows.

use ehv_core::Record;
use serde::Serialize;

/// Bucket label for records that carry no value for the grouped field.
pub const UNSET: &str = "(none)";

/// Whole-number share of `count` in `total`; zero when `total` is zero.
pub fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 * 100.0) / total as f64).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    pub percent: u32,
}

/// Per-category counts for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub field: String,
    pub total: usize,
    pub categories: Vec<CategoryCount>,
}

impl Summary {
    pub fn get(&self, value: &str) -> Option<&CategoryCount> {
        self.categories.iter().find(|c| c.value == value)
    }

    /// Count for `value`, zero if it never occurs.
    pub fn count(&self, value: &str) -> usize {
        self.get(value).map_or(0, |c| c.count)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryCount> {
        self.categories.iter()
    }
}

/// Group `records` by `field`, categories in order of first appearance.
pub fn summarize<'a, R: Record>(records: impl IntoIterator<Item = &'a R>, field: &str) -> Summary {
    summarize_ordered(records, field, &[] as &[&str])
}

/// Like [`summarize`], but `order` seeds the category list so known values
/// appear first, in that order, even with a zero count.
pub fn summarize_ordered<'a, R, S>(
    records: impl IntoIterator<Item = &'a R>,
    field: &str,
    order: &[S],
) -> Summary
where
    R: Record,
    S: AsRef<str>,
{
    let mut categories: Vec<CategoryCount> = order
        .iter()
        .map(|v| CategoryCount {
            value: v.as_ref().to_string(),
            count: 0,
            percent: 0,
        })
        .collect();
    let mut total = 0;

    for record in records {
        total += 1;
        let value = record
            .field(field)
            .map(|v| v.to_text().into_owned())
            .unwrap_or_else(|| UNSET.to_string());
        match categories.iter_mut().find(|c| c.value == value) {
            Some(bucket) => bucket.count += 1,
            None => categories.push(CategoryCount {
                value,
                count: 1,
                percent: 0,
            }),
        }
    }

    for bucket in &mut categories {
        bucket.percent = percent(bucket.count, total);
    }

    Summary {
        field: field.to_string(),
        total,
        categories,
    }
}

/// Sum of a numeric field; records without it contribute nothing.
pub fn sum<'a, R: Record>(records: impl IntoIterator<Item = &'a R>, field: &str) -> f64 {
    records
        .into_iter()
        .filter_map(|r| r.field(field).and_then(|v| v.as_f64()))
        .sum()
}

/// Mean of a numeric field over the records that have it.
pub fn mean<'a, R: Record>(records: impl IntoIterator<Item = &'a R>, field: &str) -> Option<f64> {
    let (sum, n) = records
        .into_iter()
        .filter_map(|r| r.field(field).and_then(|v| v.as_f64()))
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
