//! Composable row predicates

use std::sync::Arc;

use crate::model::Value;

/// A filter condition over row items.
///
/// Predicates are plain boolean functions over a typed item, combinable
/// with logical operators. This trades the ability to push filtering into
/// a remote query backend for simplicity; the grid only filters in memory.
///
/// # Example
///
/// ```
/// use gridtable_lib::query::Predicate;
///
/// struct Account { state: i32, revenue: i64 }
///
/// // Simple condition
/// let active = Predicate::new(|a: &Account| a.state == 0);
///
/// // Using combinators
/// let filter = Predicate::new(|a: &Account| a.state == 0)
///     .and_also(Predicate::new(|a: &Account| a.revenue > 1_000_000));
/// ```
pub struct Predicate<T>(Arc<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Predicate<T> {
    /// Creates a predicate from a boolean function.
    pub fn new(test: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(test))
    }

    /// Creates a null-guarded predicate over an accessed value.
    ///
    /// The accessor is expected to surface absent fields as
    /// [`Value::Null`] (nested access like `a.b.c` short-circuits to
    /// `Null` when any step is absent). A `Null` value never matches,
    /// whatever `test` would say.
    ///
    /// # Example
    ///
    /// ```
    /// use gridtable_lib::model::Value;
    /// use gridtable_lib::query::Predicate;
    ///
    /// struct Contact { company: Option<String> }
    ///
    /// let filter = Predicate::over(
    ///     |c: &Contact| Value::from(c.company.clone()),
    ///     |v| v.to_string().contains("Corp"),
    /// );
    /// assert!(!filter.test(&Contact { company: None }));
    /// ```
    pub fn over(
        accessor: impl Fn(&T) -> Value + Send + Sync + 'static,
        test: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(move |item| {
            let value = accessor(item);
            !value.is_null() && test(&value)
        }))
    }

    /// Evaluates this predicate against an item.
    pub fn test(&self, item: &T) -> bool {
        (self.0)(item)
    }

    /// Combines this predicate with another using logical AND.
    ///
    /// # Example
    ///
    /// ```
    /// use gridtable_lib::query::Predicate;
    ///
    /// let filter = Predicate::new(|n: &i64| *n > 0)
    ///     .and_also(Predicate::new(|n: &i64| *n < 10));
    /// assert!(filter.test(&5));
    /// assert!(!filter.test(&12));
    /// ```
    pub fn and_also(self, other: Predicate<T>) -> Self
    where
        T: 'static,
    {
        Self(Arc::new(move |item| self.test(item) && other.test(item)))
    }

    /// Combines this predicate with another using logical OR.
    ///
    /// # Example
    ///
    /// ```
    /// use gridtable_lib::query::Predicate;
    ///
    /// let filter = Predicate::new(|n: &i64| *n < 0)
    ///     .or_else(Predicate::new(|n: &i64| *n > 10));
    /// assert!(filter.test(&-1));
    /// assert!(!filter.test(&5));
    /// ```
    pub fn or_else(self, other: Predicate<T>) -> Self
    where
        T: 'static,
    {
        Self(Arc::new(move |item| self.test(item) || other.test(item)))
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> std::fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Predicate").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        label: Option<String>,
        count: i64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { label: Some("alpha".into()), count: 1 },
            Row { label: None, count: 10 },
            Row { label: Some("beta".into()), count: 100 },
        ]
    }

    #[test]
    fn test_and_or_composition() {
        let big = Predicate::new(|r: &Row| r.count >= 10);
        let labelled = Predicate::new(|r: &Row| r.label.is_some());

        let both = big.clone().and_also(labelled.clone());
        let either = big.or_else(labelled);

        let matches = |p: &Predicate<Row>| rows().iter().filter(|r| p.test(r)).count();
        assert_eq!(matches(&both), 1);
        assert_eq!(matches(&either), 3);
    }

    #[test]
    fn test_over_null_guard() {
        let contains_a = Predicate::over(
            |r: &Row| Value::from(r.label.clone()),
            |v| v.to_string().contains('a'),
        );

        let matched: Vec<i64> = rows()
            .iter()
            .filter(|r| contains_a.test(r))
            .map(|r| r.count)
            .collect();
        // The unlabelled row never matches, even though "" contains nothing anyway.
        assert_eq!(matched, vec![1, 100]);
    }
}
