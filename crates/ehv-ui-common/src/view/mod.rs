//! Filterable, paginated record views.
//!
//! A [`RecordView`] owns the per-page UI state of one dashboard table: the
//! filter values, the current page and the selected record. The records
//! themselves live in a shared, immutable [`RecordStore`].
//!
//! ```text
//! RecordStore ──► filter::apply ──► paginate::page ──► Page<&R>
//!      │
//!      └────────► stats::summarize (always the full store)
//! ```

pub mod filter;
pub mod paginate;
pub mod selection;
pub mod stats;

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::NaiveDateTime;
use ehv_core::{Record, RecordStore};
use tokio::sync::broadcast;

use crate::error::{Error, Result};
use crate::events::ViewEvent;

pub use filter::{DatePreset, DateRange, Dimension, FilterSchema, FilterState, FilterValue};
pub use paginate::{Page, PageState};
pub use selection::{Selection, SelectionPolicy};
pub use stats::{CategoryCount, Summary};

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
struct GroupBy {
    field: String,
    order: Vec<String>,
}

/// View state for one table of records.
pub struct RecordView<R: Record> {
    name: String,
    store: Arc<RecordStore<R>>,
    schema: FilterSchema,
    filters: FilterState,
    pages: PageState,
    selection: Selection<R::Id>,
    policy: SelectionPolicy,
    group_by: Option<GroupBy>,
    events_tx: broadcast::Sender<ViewEvent>,
}

impl<R: Record> RecordView<R> {
    /// Start building a view named `name` over `store`.
    pub fn builder(name: impl Into<String>, store: Arc<RecordStore<R>>) -> RecordViewBuilder<R> {
        RecordViewBuilder {
            name: name.into(),
            store,
            schema: FilterSchema::new(),
            page_size: DEFAULT_PAGE_SIZE,
            group_by: None,
            policy: SelectionPolicy::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &Arc<RecordStore<R>> {
        &self.store
    }

    pub fn schema(&self) -> &FilterSchema {
        &self.schema
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.pages.size()
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Subscribe to state changes of this view.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events_tx.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Filtering
    // ─────────────────────────────────────────────────────────────────────

    /// Set one filter dimension. The page always returns to 1.
    ///
    /// Returns whether the stored value changed.
    pub fn set_filter(&mut self, name: &str, value: FilterValue) -> Result<bool> {
        let changed = self.filters.set(&self.schema, name, value)?;
        self.pages.reset();

        if changed {
            let matched = self.filtered_count();
            tracing::debug!(
                view = %self.name,
                filter = name,
                matched,
                "Filter changed"
            );
            let _ = self.events_tx.send(ViewEvent::FilterChanged {
                view: self.name.clone(),
                filter: name.to_string(),
                value: self.filters.get(name).clone(),
                matched,
            });
            self.enforce_selection_policy();
        }
        Ok(changed)
    }

    /// Reset one dimension to its sentinel.
    pub fn clear_filter(&mut self, name: &str) -> Result<bool> {
        self.set_filter(name, FilterValue::All)
    }

    /// Reset every dimension to its sentinel.
    pub fn clear_filters(&mut self) {
        self.pages.reset();
        if self.filters.active_count() == 0 {
            return;
        }
        self.filters.clear();
        tracing::debug!(view = %self.name, "Filters cleared");
        let _ = self.events_tx.send(ViewEvent::FiltersCleared {
            view: self.name.clone(),
        });
    }

    /// Clicking a statistic card: select `value`, or reset the dimension if
    /// `value` is already selected.
    pub fn toggle_category(&mut self, name: &str, value: impl std::fmt::Display) -> Result<()> {
        let value = FilterValue::category(value);
        if self.filters.get(name) == &value {
            self.set_filter(name, FilterValue::All)?;
        } else {
            self.set_filter(name, value)?;
        }
        Ok(())
    }

    /// Apply a trailing date window to a date-range dimension.
    ///
    /// Without an explicit `anchor` the window ends at the newest value of the
    /// dimension's field in the store, so bundled historical data stays
    /// visible. An empty store clears the dimension.
    pub fn set_preset(
        &mut self,
        name: &str,
        preset: DatePreset,
        anchor: Option<NaiveDateTime>,
    ) -> Result<bool> {
        let field = match self.schema.get(name) {
            Some(Dimension::DateRange { field }) => field.clone(),
            Some(_) => {
                return Err(Error::InvalidFilterValue {
                    filter: name.to_string(),
                    expected: "a date-range dimension for presets",
                })
            }
            None => return Err(Error::UnknownFilter(name.to_string())),
        };

        match anchor.or_else(|| self.latest(&field)) {
            Some(anchor) => self.set_filter(name, FilterValue::Range(preset.resolve(anchor))),
            None => self.clear_filter(name),
        }
    }

    /// Newest date/time value of `field` across the store.
    pub fn latest(&self, field: &str) -> Option<NaiveDateTime> {
        self.store
            .iter()
            .filter_map(|r| r.field(field).and_then(|v| v.as_datetime()))
            .max()
    }

    /// Records passing every active filter, in store order.
    pub fn filtered(&self) -> Vec<&R> {
        filter::apply(self.store.iter(), &self.schema, &self.filters)
    }

    pub fn filtered_count(&self) -> usize {
        self.store
            .iter()
            .filter(|r| self.filters.matches(&self.schema, *r))
            .count()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Paging
    // ─────────────────────────────────────────────────────────────────────

    /// The current page of filtered records.
    pub fn page(&self) -> Page<&R> {
        let filtered = self.filtered();
        paginate::page(&filtered, self.pages.size(), self.pages.current())
    }

    pub fn current_page(&self) -> usize {
        self.pages.current()
    }

    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.filtered_count(), self.pages.size())
    }

    pub fn next_page(&mut self) -> usize {
        let count = self.filtered_count();
        let page = self.pages.next(count);
        self.page_moved(page, count)
    }

    pub fn prev_page(&mut self) -> usize {
        let count = self.filtered_count();
        let page = self.pages.prev(count);
        self.page_moved(page, count)
    }

    /// Jump to `page`, clamped to the valid range.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let count = self.filtered_count();
        let page = self.pages.go_to(page, count);
        self.page_moved(page, count)
    }

    fn page_moved(&self, page: usize, count: usize) -> usize {
        let total_pages = paginate::total_pages(count, self.pages.size());
        tracing::debug!(view = %self.name, page, total_pages, "Page changed");
        let _ = self.events_tx.send(ViewEvent::PageChanged {
            view: self.name.clone(),
            page,
            total_pages,
        });
        page
    }

    // ─────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────

    /// Select `id`, or clear the selection if `id` is already selected.
    pub fn toggle_selection(&mut self, id: &R::Id) -> Result<Option<&R>> {
        if !self.store.contains(id) {
            return Err(Error::UnknownRecord(id.to_string()));
        }
        let current = self.selection.toggle(id.clone()).map(ToString::to_string);
        tracing::debug!(view = %self.name, selected = ?current, "Selection changed");
        let _ = self.events_tx.send(ViewEvent::SelectionChanged {
            view: self.name.clone(),
            id: current,
        });
        Ok(self.selected())
    }

    pub fn selected(&self) -> Option<&R> {
        self.selection.get().and_then(|id| self.store.get(id))
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear().is_some() {
            let _ = self.events_tx.send(ViewEvent::SelectionChanged {
                view: self.name.clone(),
                id: None,
            });
        }
    }

    /// Records sharing `field` with the selected one, excluding it.
    pub fn related_to_selected(&self, field: &str, limit: usize) -> Vec<&R> {
        self.selected()
            .map(|r| self.store.related(r, field, limit))
            .unwrap_or_default()
    }

    fn enforce_selection_policy(&mut self) {
        if self.policy != SelectionPolicy::ClearWhenHidden {
            return;
        }
        let Some(id) = self.selection.get() else {
            return;
        };
        let visible = self
            .store
            .get(id)
            .is_some_and(|r| self.filters.matches(&self.schema, r));
        if !visible {
            if let Some(id) = self.selection.clear() {
                tracing::debug!(view = %self.name, %id, "Selection hidden by filter");
                let _ = self.events_tx.send(ViewEvent::SelectionCleared {
                    view: self.name.clone(),
                    id: id.to_string(),
                });
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Statistics
    // ─────────────────────────────────────────────────────────────────────

    /// Counts for the view's group-by field over the full store.
    pub fn summary(&self) -> Option<Summary> {
        self.group_by
            .as_ref()
            .map(|g| stats::summarize_ordered(self.store.iter(), &g.field, &g.order))
    }

    /// Counts for an arbitrary field over the full store.
    pub fn summarize(&self, field: &str) -> Result<Summary> {
        if !R::has_field(field) {
            return Err(Error::UnknownField {
                record: std::any::type_name::<R>(),
                field: field.to_string(),
            });
        }
        Ok(stats::summarize(self.store.iter(), field))
    }
}

/// Builder for a [`RecordView`].
pub struct RecordViewBuilder<R: Record> {
    name: String,
    store: Arc<RecordStore<R>>,
    schema: FilterSchema,
    page_size: usize,
    group_by: Option<GroupBy>,
    policy: SelectionPolicy,
}

impl<R: Record> RecordViewBuilder<R> {
    /// Add a text search over `fields`.
    pub fn search<S: AsRef<str>>(mut self, name: impl Into<String>, fields: &[S]) -> Self {
        self.schema = self.schema.search(name, fields);
        self
    }

    pub fn category(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.schema = self.schema.category(name, field);
        self
    }

    pub fn date_range(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.schema = self.schema.date_range(name, field);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Group statistics by `field`, categories in first-appearance order.
    pub fn group_by(self, field: impl Into<String>) -> Self {
        self.group_by_ordered(field, &[] as &[&str])
    }

    /// Group statistics by `field`, listing `order` first even at zero.
    pub fn group_by_ordered<S: AsRef<str>>(mut self, field: impl Into<String>, order: &[S]) -> Self {
        self.group_by = Some(GroupBy {
            field: field.into(),
            order: order.iter().map(|s| s.as_ref().to_string()).collect(),
        });
        self
    }

    pub fn selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate field names and page size, then build the view.
    pub fn build(self) -> Result<RecordView<R>> {
        self.schema.validate::<R>()?;
        if let Some(group) = &self.group_by {
            if !R::has_field(&group.field) {
                return Err(Error::UnknownField {
                    record: std::any::type_name::<R>(),
                    field: group.field.clone(),
                });
            }
        }
        let pages = PageState::new(self.page_size)?;
        let (events_tx, _) = broadcast::channel(64);

        tracing::debug!(
            view = %self.name,
            records = self.store.len(),
            page_size = self.page_size,
            "Record view created"
        );

        Ok(RecordView {
            name: self.name,
            store: self.store,
            schema: self.schema,
            filters: FilterState::new(),
            pages,
            selection: Selection::new(),
            policy: self.policy,
            group_by: self.group_by,
            events_tx,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ehv_core::{datasets, FaultLog, Severity};

    fn fault_view(policy: SelectionPolicy) -> RecordView<FaultLog> {
        let order: Vec<&str> = Severity::ALL.iter().map(|s| s.as_str()).collect();
        RecordView::builder("faults", Arc::new(datasets::fault_store().unwrap()))
            .search("query", &FaultLog::SEARCH_FIELDS)
            .category("severity", "severity")
            .date_range("period", "timestamp")
            .page_size(5)
            .group_by_ordered("severity", &order)
            .selection_policy(policy)
            .build()
            .unwrap()
    }

    fn page_ids(view: &RecordView<FaultLog>) -> Vec<String> {
        view.page().items.iter().map(|f| f.id.clone()).collect()
    }

    fn id(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_defaults_show_first_page() {
        let view = fault_view(SelectionPolicy::default());
        assert_eq!(view.current_page(), 1);
        assert_eq!(page_ids(&view), vec!["F001", "F002", "F003", "F004", "F005"]);
        assert_eq!(view.total_pages(), 2);
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_high_filter_leaves_counters_unchanged() {
        let mut view = fault_view(SelectionPolicy::default());
        let before = view.summary().unwrap();

        view.set_filter("severity", FilterValue::category(Severity::High))
            .unwrap();
        assert_eq!(view.filtered_count(), 3);
        assert_eq!(view.summary().unwrap(), before);
        assert_eq!(before.count("High"), 3);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = fault_view(SelectionPolicy::default());
        assert_eq!(view.next_page(), 2);
        view.set_filter("query", FilterValue::text("o")).unwrap();
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_page_three_clamps_to_two() {
        let mut view = fault_view(SelectionPolicy::default());
        assert_eq!(view.go_to_page(3), 2);
        assert_eq!(page_ids(&view), vec!["F006", "F007", "F008"]);
        assert_eq!(
            view.page().range_label().as_deref(),
            Some("Showing 6 to 8 of 8")
        );
    }

    #[test]
    fn test_no_matches_is_empty_state() {
        let mut view = fault_view(SelectionPolicy::default());
        view.set_filter("query", FilterValue::text("zzz-no-match"))
            .unwrap();
        let page = view.page();
        assert!(page.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(view.next_page(), 1);
    }

    #[test]
    fn test_toggle_selection_twice_clears() {
        let mut view = fault_view(SelectionPolicy::default());
        let selected = view.toggle_selection(&id("F001")).unwrap();
        assert_eq!(selected.map(|f| f.id.as_str()), Some("F001"));
        assert!(view.toggle_selection(&id("F001")).unwrap().is_none());
    }

    #[test]
    fn test_toggle_unknown_record_rejected() {
        let mut view = fault_view(SelectionPolicy::default());
        assert!(matches!(
            view.toggle_selection(&id("F999")),
            Err(Error::UnknownRecord(_))
        ));
    }

    #[test]
    fn test_hidden_selection_cleared_by_default() {
        let mut view = fault_view(SelectionPolicy::ClearWhenHidden);
        view.toggle_selection(&id("F002")).unwrap();
        view.set_filter("severity", FilterValue::category("High"))
            .unwrap();
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_visible_selection_survives_filter() {
        let mut view = fault_view(SelectionPolicy::ClearWhenHidden);
        view.toggle_selection(&id("F003")).unwrap();
        view.set_filter("severity", FilterValue::category("High"))
            .unwrap();
        assert_eq!(view.selected().map(|f| f.id.as_str()), Some("F003"));
    }

    #[test]
    fn test_persist_policy_keeps_hidden_selection() {
        let mut view = fault_view(SelectionPolicy::Persist);
        view.toggle_selection(&id("F002")).unwrap();
        view.set_filter("severity", FilterValue::category("High"))
            .unwrap();
        assert_eq!(view.selected().map(|f| f.id.as_str()), Some("F002"));
    }

    #[test]
    fn test_paging_never_clears_selection() {
        let mut view = fault_view(SelectionPolicy::ClearWhenHidden);
        view.toggle_selection(&id("F001")).unwrap();
        view.next_page();
        assert_eq!(view.selected().map(|f| f.id.as_str()), Some("F001"));
    }

    #[test]
    fn test_toggle_category_resets_when_repeated() {
        let mut view = fault_view(SelectionPolicy::default());
        view.toggle_category("severity", Severity::Low).unwrap();
        assert_eq!(view.filtered_count(), 2);
        view.toggle_category("severity", Severity::Low).unwrap();
        assert_eq!(view.filtered_count(), 8);
        assert!(!view.filters().is_active("severity"));
    }

    #[test]
    fn test_preset_anchors_at_newest_record() {
        let mut view = fault_view(SelectionPolicy::default());
        view.set_preset("period", DatePreset::Last24Hours, None)
            .unwrap();
        assert_eq!(page_ids(&view), vec!["F001", "F002", "F003"]);

        view.set_preset("period", DatePreset::Last7Days, None)
            .unwrap();
        assert_eq!(view.filtered_count(), 8);

        assert!(matches!(
            view.set_preset("severity", DatePreset::Last7Days, None),
            Err(Error::InvalidFilterValue { .. })
        ));
    }

    #[test]
    fn test_preset_with_earliest_anchor_does_not_panic() {
        let mut view = fault_view(SelectionPolicy::default());
        let changed = view
            .set_preset("period", DatePreset::Last7Days, Some(chrono::NaiveDateTime::MIN))
            .unwrap();
        assert!(changed);
        assert!(view.filters().is_active("period"));
        assert_eq!(view.filtered_count(), 0);
        assert!(view.page().is_empty());
    }

    #[test]
    fn test_empty_category_matches_everything() {
        let mut view = fault_view(SelectionPolicy::default());
        view.set_filter("severity", FilterValue::category("High"))
            .unwrap();
        assert_eq!(view.filtered_count(), 3);
        view.set_filter("severity", FilterValue::category(""))
            .unwrap();
        assert_eq!(view.filtered_count(), 8);
        assert!(!view.filters().is_active("severity"));
    }

    #[test]
    fn test_related_to_selected() {
        let mut view = fault_view(SelectionPolicy::default());
        assert!(view.related_to_selected("asset_type", 2).is_empty());
        view.toggle_selection(&id("F001")).unwrap();
        let related: Vec<&str> = view
            .related_to_selected("asset_type", 2)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(related, vec!["F005"]);
    }

    #[test]
    fn test_events_emitted() {
        let mut view = fault_view(SelectionPolicy::default());
        let mut rx = view.subscribe();

        view.toggle_selection(&id("F002")).unwrap();
        view.set_filter("severity", FilterValue::category("High"))
            .unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            ViewEvent::SelectionChanged { id: Some(_), .. }
        ));
        match rx.try_recv().unwrap() {
            ViewEvent::FilterChanged {
                filter, matched, ..
            } => {
                assert_eq!(filter, "severity");
                assert_eq!(matched, 3);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(
            rx.try_recv().unwrap(),
            ViewEvent::SelectionCleared {
                view: "faults".to_string(),
                id: "F002".to_string()
            }
        );
    }

    #[test]
    fn test_unchanged_filter_emits_nothing() {
        let mut view = fault_view(SelectionPolicy::default());
        let mut rx = view.subscribe();
        assert!(!view.set_filter("severity", FilterValue::All).unwrap());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_builder_validates() {
        let store = Arc::new(datasets::fault_store().unwrap());
        assert!(matches!(
            RecordView::builder("bad", Arc::clone(&store))
                .category("sev", "sevrity")
                .build(),
            Err(Error::UnknownField { .. })
        ));
        assert!(matches!(
            RecordView::builder("bad", Arc::clone(&store))
                .group_by("nope")
                .build(),
            Err(Error::UnknownField { .. })
        ));
        assert!(matches!(
            RecordView::builder("bad", store).page_size(0).build(),
            Err(Error::InvalidPageSize)
        ));
    }

    #[test]
    fn test_summarize_any_field() {
        let view = fault_view(SelectionPolicy::default());
        let status = view.summarize("status").unwrap();
        assert_eq!(status.total, 8);
        assert!(view.summarize("bogus").is_err());
    }
}
