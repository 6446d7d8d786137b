//! The filter/search/sort/page pipeline.

use chrono::NaiveDate;

use crate::model::Column;
use crate::model::DateBound;

/// The adjustable query inputs, separate from the column list.
///
/// A `QueryState` plus a column list and a base item slice fully determine
/// a [`ViewState`]: the pipeline is a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    /// Zero-based page number.
    pub page_number: usize,
    /// Rows per page. `0` disables paging and returns everything.
    pub page_size: usize,
    /// Whitespace-separated search keywords. Empty means no search.
    pub global_search: String,
    /// Start of the two-column date filter, inclusive.
    pub range_start: Option<NaiveDate>,
    /// End of the two-column date filter, inclusive of the whole end day.
    pub range_end: Option<NaiveDate>,
}

impl QueryState {
    /// Creates a state with the given page size and everything else unset.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }
}

/// The materialized result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    /// Filtered, sorted, paged items for display.
    pub items: Vec<T>,
    /// Filtered and sorted items without the page window, for
    /// aggregate/summary consumers.
    pub all_items: Vec<T>,
    /// Matching count after filtering, before paging.
    pub total_count: usize,
    /// Page count: `1` when paging is disabled, `ceil(total / page_size)`
    /// otherwise (zero for an empty result).
    pub total_pages: usize,
    /// The page actually shown, clamped to the last valid page.
    pub page_number: usize,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            all_items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            page_number: 0,
        }
    }
}

/// Page count for a given total and page size.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        1
    } else {
        total_count.div_ceil(page_size)
    }
}

/// Runs the query pipeline over a base item slice.
///
/// Steps, in order:
///
/// 1. AND every column's filter predicate into the working set.
/// 2. Apply the two-column date filter: rows whose start-date column value
///    lies past the range end, or whose end-date column value lies before
///    the range start, are dropped. A missing boundary simply leaves that
///    side unfiltered.
/// 3. Apply the global search: each whitespace-separated keyword must
///    match the stringified, non-null value of at least one column with a
///    field accessor, case-insensitively; keywords match independently.
/// 4. Count the survivors (this is `total_count`, pre-paging).
/// 5. Sort by the active sort column's accessor, if any; insertion order
///    otherwise. The sort is stable.
/// 6. Clamp the page number to the last valid page.
/// 7. Cut the page window, unless `page_size` is zero.
///
/// Re-running with unchanged inputs yields an identical [`ViewState`];
/// with no filters, search, or paging the base set passes through intact.
pub fn run<T: Clone>(items: &[T], columns: &[Column<T>], state: &QueryState) -> ViewState<T> {
    let mut working: Vec<&T> = items.iter().collect();

    for column in columns {
        if let Some(filter) = column.filter() {
            working.retain(|item| filter.test(item));
        }

        // Rows without a date value in a bounded column never match while
        // that bound is active.
        match (column.date_bound(), state.range_start, state.range_end) {
            (Some(DateBound::Start), _, Some(end)) => {
                working.retain(|item| {
                    column
                        .value_of(item)
                        .as_date_time()
                        .is_some_and(|dt| dt.date_naive() <= end)
                });
            }
            (Some(DateBound::End), Some(start), _) => {
                working.retain(|item| {
                    column
                        .value_of(item)
                        .as_date_time()
                        .is_some_and(|dt| dt.date_naive() >= start)
                });
            }
            _ => {}
        }
    }

    for keyword in state.global_search.split_whitespace() {
        let keyword = keyword.to_lowercase();
        working.retain(|item| {
            columns
                .iter()
                .filter(|column| column.field().is_some())
                .any(|column| {
                    let value = column.value_of(item);
                    !value.is_null() && value.to_string().to_lowercase().contains(&keyword)
                })
        });
    }

    let total_count = working.len();

    if let Some(sort_column) = columns.iter().find(|c| c.is_sort_column()) {
        working.sort_by(|a, b| {
            let ordering = sort_column.value_of(a).sort_cmp(&sort_column.value_of(b));
            if sort_column.is_sort_descending() {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    let total_pages = total_pages(total_count, state.page_size);
    let page_number = state.page_number.min(total_pages.saturating_sub(1));

    let all_items: Vec<T> = working.iter().map(|item| (*item).clone()).collect();
    let items = if state.page_size == 0 {
        all_items.clone()
    } else {
        all_items
            .iter()
            .skip(page_number * state.page_size)
            .take(state.page_size)
            .cloned()
            .collect()
    };

    ViewState {
        items,
        all_items,
        total_count,
        total_pages,
        page_number,
    }
}
