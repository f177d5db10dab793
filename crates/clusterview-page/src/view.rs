//! What a page shows for the current state.

use serde::Serialize;
use tracing::debug;

use clusterview_seeker::{page_count, paginate, sort_records, FieldRegistry, Record};

use crate::columns::{Column, ColumnLayout};
use crate::state::PageState;

/// One rendered page of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Visible columns, in display order.
    pub headers: Vec<Column>,
    /// Cell text of the rows on this page, one entry per header.
    pub rows: Vec<Vec<String>>,
    /// Records that passed the filter, across all pages.
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub page_count: usize,
}

impl PageView {
    /// 1-based index of the first row shown, 0 when the page is empty.
    pub fn first_item(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last row shown, 0 when the page is empty.
    pub fn last_item(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.first_item() + self.rows.len() - 1
        }
    }

    /// `"1-10 of 42"`, or `"0 of 0"` for an empty page.
    pub fn range_label(&self) -> String {
        if self.rows.is_empty() {
            format!("0 of {}", self.total)
        } else {
            format!("{}-{} of {}", self.first_item(), self.last_item(), self.total)
        }
    }
}

impl PageState {
    /// Filters, sorts and paginates `records`, projecting the `visible`
    /// columns.
    ///
    /// `visible` is sanitized against `layout` first, so the required column
    /// is always present.
    pub fn derive_view<R: Record>(
        &self,
        registry: &FieldRegistry,
        layout: &ColumnLayout,
        visible: &[String],
        records: &[R],
    ) -> PageView {
        let mut matched = self.filter(registry).filter(records, registry);
        if let Some(sort) = self.sort() {
            sort_records(&mut matched, registry, sort);
        }

        let headers: Vec<Column> = layout
            .sanitize(visible.to_vec())
            .iter()
            .filter_map(|key| layout.column(key).cloned())
            .collect();
        let rows = paginate(&matched, self.page(), self.per_page())
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|column| {
                        record
                            .field_value(&column.key)
                            .map(|v| v.into_owned())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect::<Vec<Vec<String>>>();

        debug!(
            total = matched.len(),
            page = self.page(),
            shown = rows.len(),
            "derived page view"
        );
        PageView {
            headers,
            rows,
            total: matched.len(),
            page: self.page(),
            per_page: self.per_page(),
            page_count: page_count(matched.len(), self.per_page()),
        }
    }
}
