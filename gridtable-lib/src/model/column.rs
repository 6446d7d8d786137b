//! Column definitions

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::query::Predicate;

/// Function from a row item to the comparable value shown in a column.
pub type FieldAccessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Type metadata for a column, for presentation layers that align or
/// format cells by kind. Not consulted by the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Free text.
    Text,
    /// Integer or floating-point numbers.
    Number,
    /// Calendar dates or timestamps.
    Date,
    /// Booleans.
    Bool,
}

/// Role a column plays in the two-column date-range filter.
///
/// The range's *end* bound applies to the column holding each row's start
/// date, and the range's *start* bound applies to the column holding each
/// row's end date, so that any row overlapping the range matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateBound {
    /// This column holds each row's start date.
    Start,
    /// This column holds each row's end date.
    End,
}

/// A column of the grid.
///
/// Columns carry everything the query engine needs — an optional field
/// accessor (search and sort), an optional row predicate (per-column
/// filtering), sort participation flags — plus presentation metadata
/// (`ColumnKind`) and a visibility flag. Hiding a column keeps its filter
/// and sort configuration; only its rendering is suppressed.
///
/// # Example
///
/// ```
/// use gridtable_lib::model::{Column, ColumnKind, Value};
/// use gridtable_lib::query::Predicate;
///
/// struct Order { id: i64, customer: String }
///
/// let column = Column::new("Customer")
///     .with_field(|o: &Order| Value::from(o.customer.as_str()))
///     .with_kind(ColumnKind::Text)
///     .with_filter(Predicate::new(|o: &Order| o.id > 100));
/// ```
pub struct Column<T> {
    title: String,
    field: Option<FieldAccessor<T>>,
    filter: Option<Predicate<T>>,
    sort_column: bool,
    sort_descending: bool,
    kind: Option<ColumnKind>,
    hidden: bool,
    date_bound: Option<DateBound>,
}

impl<T> Column<T> {
    /// Creates a column with the given title and no accessor or filter.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            field: None,
            filter: None,
            sort_column: false,
            sort_descending: false,
            kind: None,
            hidden: false,
            date_bound: None,
        }
    }

    /// Sets the field accessor.
    pub fn with_field(mut self, field: impl Fn(&T) -> Value + Send + Sync + 'static) -> Self {
        self.field = Some(Arc::new(field));
        self
    }

    /// Sets the per-column filter predicate.
    pub fn with_filter(mut self, filter: Predicate<T>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the type metadata.
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Marks this column as a boundary of the two-column date filter.
    pub fn with_date_bound(mut self, bound: DateBound) -> Self {
        self.date_bound = Some(bound);
        self
    }

    /// Starts the column hidden.
    pub fn initially_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Returns the column title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the field accessor, if one is defined.
    pub fn field(&self) -> Option<&FieldAccessor<T>> {
        self.field.as_ref()
    }

    /// Returns the filter predicate, if one is defined.
    pub fn filter(&self) -> Option<&Predicate<T>> {
        self.filter.as_ref()
    }

    /// Replaces the filter predicate at runtime. `None` clears it.
    pub fn set_filter(&mut self, filter: Option<Predicate<T>>) {
        self.filter = filter;
    }

    /// Returns the value of this column for the given item.
    ///
    /// `Value::Null` when no accessor is defined or the accessor reports
    /// an absent field.
    pub fn value_of(&self, item: &T) -> Value {
        match &self.field {
            Some(field) => field(item),
            None => Value::Null,
        }
    }

    /// Returns the type metadata, if set.
    pub fn kind(&self) -> Option<ColumnKind> {
        self.kind
    }

    /// Returns the date-filter role, if any.
    pub fn date_bound(&self) -> Option<DateBound> {
        self.date_bound
    }

    /// Returns `true` if the column is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Sets the visibility flag. Filter and sort configuration is kept.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Returns `true` if this is the active sort column.
    pub fn is_sort_column(&self) -> bool {
        self.sort_column
    }

    /// Returns `true` if the active sort is descending.
    pub fn is_sort_descending(&self) -> bool {
        self.sort_descending
    }

    pub(crate) fn set_sort(&mut self, active: bool, descending: bool) {
        self.sort_column = active;
        self.sort_descending = descending;
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            field: self.field.clone(),
            filter: self.filter.clone(),
            sort_column: self.sort_column,
            sort_descending: self.sort_descending,
            kind: self.kind,
            hidden: self.hidden,
            date_bound: self.date_bound,
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("title", &self.title)
            .field("has_field", &self.field.is_some())
            .field("has_filter", &self.filter.is_some())
            .field("sort_column", &self.sort_column)
            .field("sort_descending", &self.sort_descending)
            .field("kind", &self.kind)
            .field("hidden", &self.hidden)
            .field("date_bound", &self.date_bound)
            .finish_non_exhaustive()
    }
}
