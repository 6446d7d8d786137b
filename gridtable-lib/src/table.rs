//! The table front: columns, query state, and guarded transitions.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::ExportError;
use crate::error::TableError;
use crate::export::CsvPayload;
use crate::export::write_csv;
use crate::model::Column;
use crate::query;
use crate::query::Direction;
use crate::query::QueryState;
use crate::query::ViewState;
use crate::selection::Selection;
use crate::selection::SelectionMode;

/// Boxed error a row-click callback may return.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Callback invoked when a row is clicked, before the selection updates.
pub type RowClickCallback<T> = Arc<dyn Fn(&T) -> Result<(), CallbackError> + Send + Sync>;

/// A data table over items of type `T`.
///
/// Owns the base item set, the ordered column sequence, the query state,
/// and the selection, and re-runs the query pipeline into a cached
/// [`ViewState`] on every transition. A presentation layer registers
/// columns up front, then reads [`filtered_items`](Self::filtered_items)
/// and friends after each change to paint rows, headers, and pagination
/// controls.
///
/// Everything happens on the caller's single update cycle; nothing here
/// is shared across threads.
///
/// # Example
///
/// ```
/// use gridtable_lib::Table;
/// use gridtable_lib::model::{Column, Value};
///
/// #[derive(Clone, PartialEq)]
/// struct City { name: &'static str, population: i64 }
///
/// let mut table = Table::new(10);
/// table.add_column(Column::new("Name").with_field(|c: &City| Value::from(c.name)));
/// table.add_column(Column::new("Population").with_field(|c: &City| Value::from(c.population)));
/// table.set_items(vec![
///     City { name: "Ghent", population: 265_086 },
///     City { name: "Turin", population: 841_600 },
/// ]);
///
/// assert_eq!(table.total_count(), 2);
/// assert_eq!(table.filtered_items().len(), 2);
/// ```
pub struct Table<T> {
    items: Vec<T>,
    columns: Vec<Column<T>>,
    state: QueryState,
    view: ViewState<T>,
    selection: Selection<T>,
    row_click: Option<RowClickCallback<T>>,
    initially_hidden_titles: Vec<String>,
    initially_hidden_indices: Vec<usize>,
}

impl<T: Clone + PartialEq> Table<T> {
    /// Creates an empty table. `page_size` of `0` disables paging.
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            columns: Vec::new(),
            state: QueryState::with_page_size(page_size),
            view: ViewState::default(),
            selection: Selection::default(),
            row_click: None,
            initially_hidden_titles: Vec::new(),
            initially_hidden_indices: Vec::new(),
        }
    }

    /// Titles of columns that start hidden. Applied at registration time.
    pub fn with_hidden_titles(mut self, titles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.initially_hidden_titles = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Registration indices of columns that start hidden.
    pub fn with_hidden_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.initially_hidden_indices = indices.into_iter().collect();
        self
    }

    /// Sets the row-click callback.
    ///
    /// The callback runs before the selection updates; a failure is
    /// logged and never interrupts the selection transition.
    pub fn with_row_click(
        mut self,
        callback: impl Fn(&T) -> Result<(), CallbackError> + Send + Sync + 'static,
    ) -> Self {
        self.row_click = Some(Arc::new(callback));
        self
    }

    // =========================================================================
    // Column registration and ordering
    // =========================================================================

    /// Appends a column to the ordered sequence.
    ///
    /// A column whose registration index or title was named as initially
    /// hidden starts hidden.
    pub fn add_column(&mut self, mut column: Column<T>) {
        let index = self.columns.len();
        if self.initially_hidden_indices.contains(&index)
            || self.initially_hidden_titles.iter().any(|t| t == column.title())
        {
            column.set_hidden(true);
        }
        self.columns.push(column);
        self.update();
    }

    /// All registered columns, in display order, hidden ones included.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// The columns a presentation layer should paint.
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter().filter(|c| !c.is_hidden())
    }

    /// Hides the column with the given title. No-op when absent.
    ///
    /// Hiding keeps the column's filter and sort configuration; only its
    /// rendering is suppressed.
    pub fn hide_column(&mut self, title: &str) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.title() == title) {
            column.set_hidden(true);
        }
    }

    /// Hides the column at the given index. No-op when out of range.
    pub fn hide_column_at(&mut self, index: usize) {
        if let Some(column) = self.columns.get_mut(index) {
            column.set_hidden(true);
        }
    }

    /// Shows a previously hidden column again. No-op when absent.
    pub fn show_column(&mut self, title: &str) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.title() == title) {
            column.set_hidden(false);
        }
    }

    /// Moves the `source` column in front of the `target` column.
    ///
    /// This is the drop half of drag-to-reorder; which columns act as
    /// drag source and drop target is the collaborator's concern.
    pub fn reorder_column(&mut self, source: &str, target: &str) -> Result<(), TableError> {
        let from = self.column_index(source)?;
        let column = self.columns.remove(from);
        // Look the target up after the removal shifts indices.
        let to = match self.column_index(target) {
            Ok(to) => to,
            Err(err) => {
                self.columns.insert(from, column);
                return Err(err);
            }
        };
        self.columns.insert(to, column);
        Ok(())
    }

    fn column_index(&self, title: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c.title() == title)
            .ok_or_else(|| TableError::ColumnNotFound(title.to_string()))
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Makes the given column the single active sort column.
    pub fn set_sort_column(&mut self, title: &str, direction: Direction) -> Result<(), TableError> {
        let index = self.column_index(title)?;
        if self.columns[index].field().is_none() {
            return Err(TableError::MissingFieldAccessor(title.to_string()));
        }
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.set_sort(i == index, i == index && direction.is_descending());
        }
        self.update();
        Ok(())
    }

    /// Cycles a header click: inactive → ascending → descending.
    pub fn toggle_sort(&mut self, title: &str) -> Result<(), TableError> {
        let direction = self
            .columns
            .iter()
            .find(|c| c.title() == title && c.is_sort_column())
            .map(|c| {
                if c.is_sort_descending() {
                    Direction::Asc
                } else {
                    Direction::Desc
                }
            })
            .unwrap_or(Direction::Asc);
        self.set_sort_column(title, direction)
    }

    /// Clears the active sort; results fall back to insertion order.
    pub fn clear_sort(&mut self) {
        for column in &mut self.columns {
            column.set_sort(false, false);
        }
        self.update();
    }

    // =========================================================================
    // Query state
    // =========================================================================

    /// Replaces the base item set.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.update();
    }

    /// The base item set, unfiltered.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Applies a global-search string. Empty clears the search.
    pub fn set_global_search(&mut self, search: impl Into<String>) {
        self.state.global_search = search.into();
        self.update();
    }

    /// Sets the inclusive start of the two-column date filter.
    /// `None` leaves the lower side unfiltered.
    pub fn set_date_range_start(&mut self, start: Option<NaiveDate>) {
        self.state.range_start = start;
        self.update();
    }

    /// Sets the inclusive end of the two-column date filter.
    /// `None` leaves the upper side unfiltered.
    pub fn set_date_range_end(&mut self, end: Option<NaiveDate>) {
        self.state.range_end = end;
        self.update();
    }

    /// Changes the page size. `0` disables paging.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.state.page_size = page_size;
        self.update();
    }

    // =========================================================================
    // Page navigation
    // =========================================================================

    /// Goes to the first page.
    pub fn first_page(&mut self) {
        if self.state.page_number != 0 {
            self.state.page_number = 0;
            self.update();
        }
    }

    /// Advances one page, if a next page exists.
    pub fn next_page(&mut self) {
        if self.state.page_number + 1 < self.view.total_pages {
            self.state.page_number += 1;
            self.update();
        }
    }

    /// Goes back one page, if not already on the first.
    pub fn previous_page(&mut self) {
        if self.state.page_number > 0 {
            self.state.page_number -= 1;
            self.update();
        }
    }

    /// Jumps to the last page.
    pub fn last_page(&mut self) {
        self.state.page_number = self.view.total_pages.saturating_sub(1);
        self.update();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Switches selection modes, applying the truncation semantics of
    /// [`Selection::set_mode`].
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection.set_mode(mode);
    }

    /// The selected rows, in insertion order.
    pub fn selected_items(&self) -> &[T] {
        self.selection.items()
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, item: &T) -> bool {
        self.selection.contains(item)
    }

    /// Handles a row click: user callback first, selection second.
    ///
    /// A callback failure is logged and does not interrupt the selection
    /// update.
    pub fn handle_row_click(&mut self, item: &T) {
        if let Some(callback) = &self.row_click {
            if let Err(err) = callback(item) {
                log::error!("row click callback failed: {err}");
            }
        }
        self.selection.click(item);
    }

    // =========================================================================
    // Outputs
    // =========================================================================

    /// Re-runs the query pipeline and caches the result.
    ///
    /// Called automatically by every state-changing method; call it
    /// manually after mutating column filters in place.
    pub fn update(&mut self) {
        self.view = query::run(&self.items, &self.columns, &self.state);
        // Adopt the clamp so later navigation starts from the shown page.
        self.state.page_number = self.view.page_number;
        log::debug!(
            "query run: {} of {} items, page {}/{}",
            self.view.items.len(),
            self.view.total_count,
            self.view.page_number,
            self.view.total_pages,
        );
    }

    /// Filtered, sorted, paged rows for display.
    pub fn filtered_items(&self) -> &[T] {
        &self.view.items
    }

    /// Filtered and sorted rows without the page window.
    pub fn non_paged_filtered_items(&self) -> &[T] {
        &self.view.all_items
    }

    /// Matching count after filtering, before paging.
    pub fn total_count(&self) -> usize {
        self.view.total_count
    }

    /// Page count: `1` when paging is disabled, `ceil(total / page_size)`
    /// otherwise.
    pub fn total_pages(&self) -> usize {
        self.view.total_pages
    }

    /// The zero-based page currently shown.
    pub fn page_number(&self) -> usize {
        self.view.page_number
    }

    /// The whole cached result of the last run.
    pub fn view(&self) -> &ViewState<T> {
        &self.view
    }

    /// Encodes the currently rendered rows (visible columns, current
    /// page) as a CSV payload for a "save as file" collaborator.
    pub fn export_csv(&self, filename: impl Into<String>) -> Result<CsvPayload, ExportError> {
        write_csv(&self.columns, &self.view.items, filename)
    }
}

impl<T> std::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("items", &self.items.len())
            .field("columns", &self.columns)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
