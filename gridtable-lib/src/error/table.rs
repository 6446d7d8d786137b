//! Table state errors

/// Errors from table configuration and state transitions.
///
/// Everyday operations are guarded no-ops instead (paging past the end,
/// hiding an unknown column); these variants cover genuine caller
/// mistakes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// No column with the given title is registered.
    #[error("no column titled '{0}'")]
    ColumnNotFound(String),

    /// The column cannot take part in sorting without a field accessor.
    #[error("column '{0}' has no field accessor and cannot be sorted")]
    MissingFieldAccessor(String),
}
