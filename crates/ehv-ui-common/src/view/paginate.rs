//! Fixed-size paging over a filtered sequence.
//!
//! Pages are 1-based. The current page is always clamped to
//! `1..=max(1, total_pages)`, so an empty sequence is page 1 of 0.

use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{Error, Result};

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get())
}

fn clamp_page(requested: usize, count: usize, page_size: NonZeroUsize) -> usize {
    requested.clamp(1, total_pages(count, page_size).max(1))
}

/// Current page plus the constant page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    size: NonZeroUsize,
}

impl PageState {
    pub fn new(page_size: usize) -> Result<Self> {
        let size = NonZeroUsize::new(page_size).ok_or(Error::InvalidPageSize)?;
        Ok(Self { current: 1, size })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn size(&self) -> NonZeroUsize {
        self.size
    }

    /// Back to page 1.
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Jump to `page`, clamped against `count` items. Returns the new page.
    pub fn go_to(&mut self, page: usize, count: usize) -> usize {
        self.current = clamp_page(page, count, self.size);
        self.current
    }

    pub fn next(&mut self, count: usize) -> usize {
        self.go_to(self.current.saturating_add(1), count)
    }

    pub fn prev(&mut self, count: usize) -> usize {
        self.go_to(self.current.saturating_sub(1), count)
    }

    /// Re-clamp after the underlying sequence changed length.
    pub fn clamp(&mut self, count: usize) -> usize {
        self.go_to(self.current, count)
    }
}

/// One page of items plus the figures a pager footer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually shown, after clamping.
    pub current_page: usize,
    /// Offset of the first item on this page in the full sequence.
    pub start_index: usize,
    /// Exclusive end offset.
    pub end_index: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Nothing matched: render the "no results" state, not an empty table.
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page numbers for the pager buttons.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// "Showing 6 to 8 of 8", or `None` when there is nothing to show.
    pub fn range_label(&self) -> Option<String> {
        (!self.is_empty()).then(|| {
            format!(
                "Showing {} to {} of {}",
                self.start_index + 1,
                self.end_index,
                self.total_items
            )
        })
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            start_index: self.start_index,
            end_index: self.end_index,
            total_pages: self.total_pages,
            total_items: self.total_items,
            page_size: self.page_size,
        }
    }
}

/// Slice `items` to the requested page. Out-of-range requests clamp to the
/// nearest valid page; an empty input yields an empty page.
pub fn page<T: Clone>(items: &[T], page_size: NonZeroUsize, current_page: usize) -> Page<T> {
    let total_items = items.len();
    let current_page = clamp_page(current_page, total_items, page_size);
    let start_index = ((current_page - 1) * page_size.get()).min(total_items);
    let end_index = (start_index + page_size.get()).min(total_items);

    Page {
        items: items[start_index..end_index].to_vec(),
        current_page,
        start_index,
        end_index,
        total_pages: total_pages(total_items, page_size),
        total_items,
        page_size: page_size.get(),
    }
}
